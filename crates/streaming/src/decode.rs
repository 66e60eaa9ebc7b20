use scene::components::DecodedImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    Empty,
    Format(String),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Empty => write!(f, "empty image payload"),
            DecodeError::Format(msg) => write!(f, "failed to decode image: {msg}"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decodes a PNG or JPEG payload into tightly packed RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    let img = image::load_from_memory(bytes).map_err(|e| DecodeError::Format(e.to_string()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedImage::new(width, height, rgba.into_raw())
        .ok_or_else(|| DecodeError::Format(format!("bad pixel buffer for {width}x{height}")))
}

#[cfg(test)]
mod tests {
    use super::{DecodeError, decode_image};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .expect("encode png");
        buf
    }

    #[test]
    fn decodes_png_to_rgba() {
        let img = decode_image(&png(4, 2)).expect("decode");
        assert_eq!((img.width, img.height), (4, 2));
        assert_eq!(img.byte_len(), 4 * 2 * 4);
        assert_eq!(&img.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert_eq!(decode_image(&[]), Err(DecodeError::Empty));
        assert!(matches!(
            decode_image(b"<html>not found</html>"),
            Err(DecodeError::Format(_))
        ));
    }
}
