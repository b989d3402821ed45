use super::*;

#[test]
fn rejects_zero_dimensions_and_length_mismatch() {
    let mut px = vec![0u32; 6];
    assert!(PixelBuffer::new(0, 6, &mut px).is_err());
    assert!(PixelBuffer::new(6, 0, &mut px).is_err());
    assert!(PixelBuffer::new(2, 2, &mut px).is_err());
    assert!(PixelBuffer::new(3, 2, &mut px).is_ok());
}

#[test]
fn indexes_row_major() {
    let mut px = vec![0u32; 12];
    let mut buf = PixelBuffer::new(4, 3, &mut px).unwrap();
    assert_eq!(buf.index_of(0, 0), Some(0));
    assert_eq!(buf.index_of(3, 0), Some(3));
    assert_eq!(buf.index_of(1, 2), Some(9));
    assert_eq!(buf.index_of(4, 0), None);
    assert_eq!(buf.index_of(0, 3), None);

    assert!(buf.set(1, 2, [9, 8, 7, 6]));
    assert!(!buf.set(4, 2, [1, 1, 1, 1]));
    assert_eq!(buf.get(1, 2), Some([9, 8, 7, 6]));
    assert_eq!(buf.pixels()[9], pack_rgba8([9, 8, 7, 6]));
    assert_eq!(buf.len(), 12);
}
