use super::*;

#[test]
fn encodes_decodable_png() {
    let mut frame = PixelBuffer::transparent(4, 3);
    frame.data[0..4].copy_from_slice(&[255, 0, 0, 255]);
    let bytes = PngStillEncoder.encode_still(&frame).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (4, 3));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(PngStillEncoder.content_type(), "image/png");
}

#[test]
fn rejects_malformed_buffer() {
    let frame = PixelBuffer {
        width: 4,
        height: 4,
        data: vec![0; 7],
    };
    assert!(PngStillEncoder.encode_still(&frame).is_err());
}
