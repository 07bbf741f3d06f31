//! Text decoding helpers.

use std::borrow::Cow;

/// How far into a document a `<meta charset>` declaration is looked for.
const CHARSET_SCAN_LIMIT: usize = 1024;

/// Decode bytes to a string.
///
/// Tries UTF-8 first (a BOM is honored), then the hinted encoding, then
/// Windows-1252, which accepts any byte sequence.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find the label of a `<meta charset=...>` or
/// `<meta http-equiv content="...; charset=...">` near the start of a page.
pub fn extract_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(CHARSET_SCAN_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();

    (!label.is_empty()).then_some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        assert_eq!(decode_text("héllo".as_bytes(), None), "héllo");
    }

    #[test]
    fn test_fallback_to_hint_then_cp1252() {
        // 0xE9 is é in both ISO-8859-1 and Windows-1252
        let bytes = b"caf\xe9";
        assert_eq!(decode_text(bytes, Some("iso-8859-15")), "café");
        assert_eq!(decode_text(bytes, None), "café");
        assert_eq!(decode_text(bytes, Some("not-an-encoding")), "café");
    }

    #[test]
    fn test_extract_meta_charset() {
        assert_eq!(
            extract_meta_charset(br#"<html><head><meta charset="Shift_JIS">"#).as_deref(),
            Some("shift_jis")
        );
        assert_eq!(
            extract_meta_charset(
                br#"<meta http-equiv="Content-Type" content="text/html; charset=windows-1251">"#
            )
            .as_deref(),
            Some("windows-1251")
        );
        assert_eq!(extract_meta_charset(b"<p>no declaration</p>"), None);
    }
}
