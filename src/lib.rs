//! surfacefx applies pixel effects to caller-owned RGBA8 surfaces.
//!
//! Pixels are packed `u32` values whose in-memory bytes are `R, G, B, A`. Entry points:
//!
//! - [`blur_full`] / [`blur_edge_band`]: three-pass box blur approximating a Gaussian
//! - [`demultiply`]: premultiplied to straight alpha
//! - [`over`] / [`blit`]: straight-alpha source-over and resampled image placement
//! - [`SurfaceFx`]: the same effects on any [`Surface`], with sigma clamping and dirty tracking
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod effects;
pub(crate) mod surface;

pub use crate::foundation::core::{Rect, Rgba8, pack_rgba8, unpack_rgba8};
pub use crate::foundation::error::{FxError, FxResult};

pub use crate::assets::decode::{decode_image, load_image, load_surface, save_surface};
pub use crate::assets::resample::{ImageResampler, ResampleFilter, Resampler};
pub use crate::effects::alpha::demultiply;
pub use crate::effects::blit::{BlitBounds, BlitOpts, BlitParams, blit};
pub use crate::effects::blur::{
    BlurPlan, blur_edge_band, blur_full, box_widths_for_gauss, clamp_sigma,
};
pub use crate::effects::composite::{over, over_packed};
pub use crate::surface::buffer::PixelBuffer;
pub use crate::surface::ext::SurfaceFx;
pub use crate::surface::image_surface::{ImageSurface, Surface};
