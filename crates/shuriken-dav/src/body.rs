//! Request body decoding (§4.9): charset negotiation over a raw byte body.

use crate::error::{DavError, DavResult};

/// Extracts the `charset=` parameter from a `Content-Type` header value, if
/// present.
fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type
        .split(';')
        .find_map(|part| part.trim().strip_prefix("charset="))
        .map(|c| c.trim_matches('"'))
}

/// Builds the ordered, deduplicated charset candidate list: the request's
/// declared charset (if any), then `utf-8`, then `iso8859-1`.
fn charset_candidates(content_type: Option<&str>) -> Vec<&str> {
    let mut charsets = Vec::with_capacity(3);
    if let Some(declared) = content_type.and_then(charset_from_content_type) {
        charsets.push(declared);
    }
    charsets.push("utf-8");
    charsets.push("iso8859-1");

    let mut seen = Vec::with_capacity(charsets.len());
    for charset in charsets {
        if !seen.contains(&charset) {
            seen.push(charset);
        }
    }
    seen
}

fn decode_with(charset: &str, bytes: &[u8]) -> Option<String> {
    let encoding = encoding_rs::Encoding::for_label(charset.as_bytes())?;
    let (decoded, _, had_errors) = encoding.decode(bytes);
    (!had_errors).then(|| decoded.into_owned())
}

/// Decodes a raw request body to text, trying charsets in the order fixed by
/// §4.9 and taking the first charset that decodes cleanly.
///
/// ## Errors
/// Returns [`DavError::BadRequest`] if every candidate charset fails.
pub fn decode_request_body(bytes: &[u8], content_type: Option<&str>) -> DavResult<String> {
    let candidates = charset_candidates(content_type);
    for charset in &candidates {
        if let Some(text) = decode_with(charset, bytes) {
            return Ok(text);
        }
    }
    Err(DavError::BadRequest(format!(
        "all codecs failed [{}]",
        candidates.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_order_prefers_declared_then_utf8_then_latin1() {
        let candidates = charset_candidates(Some("text/xml; charset=iso-8859-1"));
        assert_eq!(candidates, vec!["iso-8859-1", "utf-8", "iso8859-1"]);
    }

    #[test]
    fn charset_order_dedups_declared_utf8() {
        let candidates = charset_candidates(Some("text/xml; charset=utf-8"));
        assert_eq!(candidates, vec!["utf-8", "iso8859-1"]);
    }

    #[test]
    fn charset_order_defaults_without_content_type() {
        assert_eq!(charset_candidates(None), vec!["utf-8", "iso8859-1"]);
    }

    #[test]
    fn decodes_valid_utf8() {
        let decoded = decode_request_body("héllo".as_bytes(), None).unwrap();
        assert_eq!(decoded, "héllo");
    }

    #[test]
    fn decodes_latin1_fallback() {
        let bytes = [0xE9, 0x00]; // 'é' in latin-1, invalid utf-8
        let decoded = decode_request_body(&bytes[..1], None).unwrap();
        assert_eq!(decoded, "é");
    }
}
