use std::path::Path;

use anyhow::Context;

use crate::foundation::error::FxResult;
use crate::surface::image_surface::ImageSurface;

/// Decode encoded image bytes into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> FxResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Load an image file into straight-alpha RGBA8.
pub fn load_image(path: &Path) -> FxResult<image::RgbaImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

/// Load an image file as a packed-pixel surface.
pub fn load_surface(path: &Path) -> FxResult<ImageSurface> {
    ImageSurface::from_rgba_image(&load_image(path)?)
}

/// Encode a surface to `path`; the format follows the file extension.
pub fn save_surface(surface: &ImageSurface, path: &Path) -> FxResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    surface
        .to_rgba_image()?
        .save(path)
        .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
