use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Some byte sequences were invalid and became U+FFFD.
    pub had_errors: bool,
}

/// Decode a result page into UTF-8: BOM, then Content-Type charset, then chardetng.
///
/// Malformed sequences are replaced rather than rejected so the rest of the page stays usable.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(enc) = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, enc);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> DecodedHtml {
    let (text, used, had_errors) = enc.decode(bytes);
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_wins_over_detection() {
        let bytes = b"<p>Byt 2+kk \xe8</p>";
        let decoded = decode_html(bytes, Some("text/html; Charset=\"windows-1250\""));
        assert_eq!(decoded.encoding_label, "windows-1250");
        assert!(decoded.html.contains("Byt 2+kk č"));
    }

    #[test]
    fn utf8_bom_is_honoured() {
        let bytes = "\u{feff}<p>Nové</p>".as_bytes();
        let decoded = decode_html(bytes, None);
        assert_eq!(decoded.encoding_label, "UTF-8");
        assert!(decoded.html.contains("Nové"));
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let decoded = decode_html(b"ok \xc3\x28 <a>", Some("text/html; charset=utf-8"));
        assert!(decoded.had_errors);
        assert_eq!(decoded.html, "ok \u{fffd}( <a>");
    }
}
