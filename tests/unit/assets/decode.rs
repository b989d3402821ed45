use std::io::Cursor;

use super::*;
use crate::foundation::error::FxError;
use crate::surface::image_surface::Surface;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let decoded = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(decoded.dimensions(), (1, 1));
    assert_eq!(decoded.as_raw().as_slice(), &[100, 50, 200, 128]);
}

#[test]
fn decode_garbage_is_an_error_with_context() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, FxError::Other(_)));
    assert!(format!("{err:#}").contains("decode image"));
}

#[test]
fn save_then_load_surface() {
    let dir = std::path::PathBuf::from("target").join("unit_decode");
    let path = dir.join("roundtrip.png");
    let _ = std::fs::remove_file(&path);

    let mut s = ImageSurface::new(3, 2).unwrap();
    s.pixels_mut()[4] = crate::foundation::core::pack_rgba8([7, 8, 9, 10]);
    save_surface(&s, &path).unwrap();

    let loaded = load_surface(&path).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (3, 2));
    assert_eq!(loaded.pixel(1, 1), Some([7, 8, 9, 10]));
}

#[test]
fn load_missing_file_fails() {
    assert!(load_image(std::path::Path::new("target/does/not/exist.png")).is_err());
}
