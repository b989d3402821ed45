pub(crate) mod buffer;
pub(crate) mod ext;
pub(crate) mod image_surface;
