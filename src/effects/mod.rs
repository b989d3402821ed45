pub(crate) mod alpha;
pub(crate) mod blit;
pub(crate) mod blur;
pub(crate) mod composite;
