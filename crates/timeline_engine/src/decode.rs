use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use timeline_logging::{timeline_debug, timeline_warn};

/// Only the start of the document is scanned for `<meta charset>`.
const META_PRESCAN_BYTES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Some byte sequences were invalid and became U+FFFD.
    pub lossy: bool,
}

/// Decode raw page bytes into UTF-8.
///
/// Precedence: BOM, then the Content-Type charset, then a `<meta charset>`
/// in the first kilobyte, then `chardetng` detection. Invalid sequences are
/// replaced rather than rejected, so one bad byte costs one character.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding, "bom");
    }

    if let Some(label) = content_type.and_then(extract_charset) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, encoding, "content-type");
        }
    }

    if let Some(encoding) = sniff_meta_charset(bytes) {
        return decode_with(bytes, encoding, "meta");
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    decode_with(bytes, encoding, "detected")
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches(&['"', '\''][..]).to_string())
        })
        .next()
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_PRESCAN_BYTES)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    let mut rest = head.as_str();
    while let Some(start) = rest.find("<meta") {
        rest = &rest[start + "<meta".len()..];
        let tag_end = rest.find('>').unwrap_or(rest.len());
        let tag = &rest[..tag_end];
        rest = &rest[tag_end..];

        let Some(pos) = tag.find("charset=") else {
            continue;
        };
        let label: String = tag[pos + "charset=".len()..]
            .trim_start_matches(&['"', '\'', ' '][..])
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
            .collect();
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            // A page that got this far as ASCII cannot really be UTF-16.
            return Some(encoding.output_encoding());
        }
    }
    None
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding, source: &str) -> DecodedHtml {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        timeline_warn!(
            "Page is not valid {} ({}); invalid bytes were replaced",
            used.name(),
            source
        );
    } else {
        timeline_debug!("Decoded {} bytes as {} ({})", bytes.len(), used.name(), source);
    }
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        lossy: had_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_parameter_is_case_insensitive() {
        assert_eq!(
            extract_charset("text/html; Charset=\"Shift_JIS\""),
            Some("Shift_JIS".to_string())
        );
        assert_eq!(extract_charset("text/html"), None);
    }

    #[test]
    fn meta_charset_is_found_in_head() {
        let html = br#"<html><head><meta http-equiv="x"><meta charset="iso-8859-2"></head>"#;
        assert_eq!(
            sniff_meta_charset(html).map(|e| e.name()),
            Some("ISO-8859-2")
        );
    }

    #[test]
    fn meta_utf16_falls_back_to_utf8() {
        let html = br#"<meta charset=utf-16le>"#;
        assert_eq!(sniff_meta_charset(html).map(|e| e.name()), Some("UTF-8"));
    }

    #[test]
    fn meta_without_charset_is_ignored() {
        assert_eq!(sniff_meta_charset(b"<meta name=viewport>"), None);
    }
}
