use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{AppError, AppResult};

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Image formats accepted for analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Detects the format from the leading bytes of the decoded image
    fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(JPEG_MAGIC) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(PNG_MAGIC) {
            Some(ImageFormat::Png)
        } else {
            None
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

/// A submitted photo, checked and ready to send to a vision provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub format: ImageFormat,
    /// Base64 data without any data URL prefix
    pub data: String,
}

impl ImagePayload {
    /// Parses a bare base64 string or a `data:image/...;base64,` URL
    pub fn from_base64(input: &str, max_bytes: usize) -> AppResult<Self> {
        let trimmed = input.trim();
        let data = match trimmed.strip_prefix("data:") {
            Some(rest) => rest
                .split_once(',')
                .map(|(_, data)| data)
                .ok_or_else(|| AppError::InvalidInput("Malformed data URL".to_string()))?,
            None => trimmed,
        };

        if data.is_empty() {
            return Err(AppError::InvalidInput("Image is required".to_string()));
        }

        // Reject oversized payloads before decoding them
        if data.len() / 4 * 3 > max_bytes.saturating_add(2) {
            return Err(AppError::InvalidInput(format!(
                "Image exceeds the {} byte limit",
                max_bytes
            )));
        }

        let bytes = STANDARD
            .decode(data)
            .map_err(|e| AppError::InvalidInput(format!("Image is not valid base64: {}", e)))?;

        if bytes.len() > max_bytes {
            return Err(AppError::InvalidInput(format!(
                "Image exceeds the {} byte limit",
                max_bytes
            )));
        }

        let format = ImageFormat::sniff(&bytes)
            .ok_or_else(|| AppError::InvalidInput("Image must be a JPEG or PNG".to_string()))?;

        Ok(Self {
            format,
            data: data.to_string(),
        })
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Data URL stored on the analysis record
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    fn jpeg() -> Vec<u8> {
        let mut bytes = JPEG_MAGIC.to_vec();
        bytes.extend_from_slice(&[0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F']);
        bytes
    }

    #[test]
    fn test_accepts_bare_jpeg() {
        let payload = ImagePayload::from_base64(&encoded(&jpeg()), 1024).unwrap();
        assert_eq!(payload.format, ImageFormat::Jpeg);
        assert_eq!(payload.mime_type(), "image/jpeg");
        assert!(payload.data_url().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_accepts_png_data_url() {
        let mut png = PNG_MAGIC.to_vec();
        png.extend_from_slice(&[0, 0, 0, 13]);
        let input = format!("data:image/png;base64,{}", encoded(&png));

        let payload = ImagePayload::from_base64(&input, 1024).unwrap();
        assert_eq!(payload.format, ImageFormat::Png);
        assert_eq!(payload.data, encoded(&png));
    }

    #[test]
    fn test_rejects_empty_input() {
        let err = ImagePayload::from_base64("   ", 1024).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg == "Image is required"));
    }

    #[test]
    fn test_rejects_invalid_base64() {
        let err = ImagePayload::from_base64("not base64!!", 1024).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_other_formats() {
        let gif = encoded(b"GIF89a....");
        let err = ImagePayload::from_base64(&gif, 1024).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg.contains("JPEG or PNG")));
    }

    #[test]
    fn test_rejects_oversized_image() {
        let mut big = jpeg();
        big.resize(4096, 0);
        let err = ImagePayload::from_base64(&encoded(&big), 1024).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg.contains("byte limit")));
    }

    #[test]
    fn test_unbounded_limit_does_not_overflow() {
        let payload = ImagePayload::from_base64(&encoded(&jpeg()), usize::MAX).unwrap();
        assert_eq!(payload.format, ImageFormat::Jpeg);
    }

    #[test]
    fn test_rejects_data_url_without_payload() {
        let err = ImagePayload::from_base64("data:image/jpeg;base64", 1024).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
