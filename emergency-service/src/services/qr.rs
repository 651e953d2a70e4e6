use image::{DynamicImage, ImageOutputFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

use crate::services::ServiceError;

/// Smallest edge length of a rendered code, in pixels.
const MIN_QR_DIMENSION: u32 = 256;

/// Redemption link a verifier's scanner will open.
pub fn redemption_url(public_base_url: &str, token: &str) -> String {
    format!(
        "{}/emergency_contact?token={}",
        public_base_url.trim_end_matches('/'),
        urlencoding::encode(token)
    )
}

/// Render `data` as a QR code PNG, entirely in memory.
pub fn render_png(data: &str) -> Result<Vec<u8>, ServiceError> {
    let code = QrCode::new(data).map_err(|e| ServiceError::QrRender(e.to_string()))?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_QR_DIMENSION, MIN_QR_DIMENSION)
        .build();

    let dynamic_image = DynamicImage::ImageLuma8(image);
    let mut buffer = Cursor::new(Vec::new());
    dynamic_image
        .write_to(&mut buffer, ImageOutputFormat::Png)
        .map_err(|e| ServiceError::QrRender(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn url_embeds_token_as_query_parameter() {
        assert_eq!(
            redemption_url("http://127.0.0.1:8000/", "aaa.bbb.ccc"),
            "http://127.0.0.1:8000/emergency_contact?token=aaa.bbb.ccc"
        );
    }

    #[test]
    fn url_escapes_reserved_characters() {
        let url = redemption_url("https://sos.example", "a+b/c=");
        assert_eq!(url, "https://sos.example/emergency_contact?token=a%2Bb%2Fc%3D");
    }

    #[test]
    fn renders_png_image() -> Result<(), ServiceError> {
        let png = render_png("http://127.0.0.1:8000/emergency_contact?token=abc")?;
        assert_eq!(&png[..8], &PNG_MAGIC);

        let decoded =
            image::load_from_memory(&png).map_err(|e| ServiceError::QrRender(e.to_string()))?;
        assert!(decoded.width() >= MIN_QR_DIMENSION);
        assert_eq!(decoded.width(), decoded.height());
        Ok(())
    }

    #[test]
    fn oversized_payload_is_a_render_error() {
        let data = "x".repeat(8000);
        assert!(matches!(render_png(&data), Err(ServiceError::QrRender(_))));
    }
}
