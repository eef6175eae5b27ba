use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use thiserror::Error;

/// Pre-write ceiling for inline-encoded images (~800 KB), kept comfortably
/// under the document store's per-record limit.
pub const MAX_INLINE_IMAGE_BYTES: usize = 800 * 1024;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image is too large ({size} bytes); inline images must stay under {MAX_INLINE_IMAGE_BYTES} bytes")]
    TooLarge { size: usize },
    #[error("inline image payload is not valid base64")]
    InvalidEncoding,
}

/// Checks an image field value before it is written anywhere.
/// Remote URLs pass through untouched; `data:` payloads are decoded and
/// size-checked.
pub fn check_image_value(value: &str) -> Result<(), ImageError> {
    if value.starts_with("data:") {
        decode_inline_image(value)?;
    }
    Ok(())
}

pub fn decode_inline_image(value: &str) -> Result<Bytes, ImageError> {
    let payload = value
        .split_once(";base64,")
        .map(|(_, payload)| payload)
        .ok_or(ImageError::InvalidEncoding)?;
    // 4 base64 chars encode 3 bytes; refuse clearly oversized payloads
    // without decoding them first.
    let estimated = payload.len() / 4 * 3;
    if estimated > MAX_INLINE_IMAGE_BYTES + 2 {
        return Err(ImageError::TooLarge { size: estimated });
    }
    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| ImageError::InvalidEncoding)?;
    if bytes.len() > MAX_INLINE_IMAGE_BYTES {
        return Err(ImageError::TooLarge { size: bytes.len() });
    }
    Ok(Bytes::from(bytes))
}

/// Default avatar for visitor comments submitted without an image.
pub fn placeholder_avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=0D8ABC&color=fff",
        percent_encode(name)
    )
}

fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_urls_pass_through() {
        assert!(check_image_value("https://picsum.photos/seed/coding/600/400").is_ok());
    }

    #[test]
    fn small_inline_image_is_accepted() {
        let data_url = format!("data:image/png;base64,{}", STANDARD.encode([0u8; 512]));
        assert!(check_image_value(&data_url).is_ok());
        assert_eq!(decode_inline_image(&data_url).unwrap().len(), 512);
    }

    #[test]
    fn oversized_inline_image_is_rejected() {
        let payload = STANDARD.encode(vec![0u8; MAX_INLINE_IMAGE_BYTES + 1]);
        let data_url = format!("data:image/jpeg;base64,{payload}");
        assert!(matches!(
            check_image_value(&data_url),
            Err(ImageError::TooLarge { .. })
        ));
    }

    #[test]
    fn malformed_payload_is_rejected() {
        assert!(matches!(
            check_image_value("data:image/png;base64,???not-base64???"),
            Err(ImageError::InvalidEncoding)
        ));
        assert!(matches!(
            check_image_value("data:image/png,rawdata"),
            Err(ImageError::InvalidEncoding)
        ));
    }

    #[test]
    fn avatar_url_encodes_the_name() {
        let url = placeholder_avatar_url("Ahmed Ali");
        assert_eq!(
            url,
            "https://ui-avatars.com/api/?name=Ahmed%20Ali&background=0D8ABC&color=fff"
        );

        // Non-ASCII names are percent-encoded byte by byte.
        let url = placeholder_avatar_url("زائر");
        assert!(url.contains("name=%D8%B2%D8%A7%D8%A6%D8%B1"));
    }
}
