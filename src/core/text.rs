use crate::utils::error::{FinderError, Result};
use encoding_rs::Encoding;

/// Decodes raw table bytes using a WHATWG encoding label such as `utf-8` or `windows-1252`.
///
/// A byte-order mark is stripped. Malformed sequences become U+FFFD and are reported
/// as a warning rather than an error.
pub fn decode_table(bytes: &[u8], encoding_label: &str) -> Result<String> {
    let encoding = Encoding::for_label(encoding_label.trim().as_bytes()).ok_or_else(|| {
        FinderError::UnknownEncoding {
            label: encoding_label.to_string(),
        }
    })?;

    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        tracing::warn!(
            "Input is not valid {}; malformed bytes were replaced",
            encoding.name()
        );
    }

    Ok(text.into_owned())
}
