/// A decoded bitmap ready for upload: tightly packed RGBA8, row-major,
/// top row first.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Returns `None` when `rgba` does not hold exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if width == 0 || height == 0 || rgba.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn byte_len(&self) -> usize {
        self.rgba.len()
    }
}

// Pixel data is too large to be useful in debug output.
impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::DecodedImage;

    #[test]
    fn rejects_mismatched_buffers() {
        assert!(DecodedImage::new(2, 2, vec![0; 16]).is_some());
        assert!(DecodedImage::new(2, 2, vec![0; 15]).is_none());
        assert!(DecodedImage::new(0, 2, Vec::new()).is_none());
    }
}
