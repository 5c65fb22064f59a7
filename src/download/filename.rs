//! Derivation of safe local filenames from PDF URLs.
//!
//! A derived filename is a pure function of the source URL: the final path
//! segment, percent-decoded, lowercased, with every run of characters outside
//! `[a-z0-9._-]` collapsed to a single `_`. Two URLs that share a final
//! segment map to the same name; the second one is then treated as already
//! downloaded.

use std::borrow::Cow;

use tracing::debug;
use url::Url;

/// Separator written in place of each run of unsafe characters.
const SEPARATOR: char = '_';

/// Derives the local filename for a PDF URL.
///
/// The URL path is percent-decoded, its final segment is taken, and that
/// segment is query-unescaped once more before lowercasing and sanitizing.
/// Returns an empty string when the URL cannot be parsed or its path holds a
/// malformed `%` escape.
///
/// # Examples
///
/// ```
/// use pdf_scraper::download::derive_safe_filename;
///
/// assert_eq!(derive_safe_filename("https://ex.com/a.pdf"), "a.pdf");
/// assert_eq!(
///     derive_safe_filename("https://ex.com/SDS/Safety%20Sheet%20(EN).PDF?v=2"),
///     "safety_sheet_en_.pdf"
/// );
/// ```
#[must_use]
pub fn derive_safe_filename(raw_url: &str) -> String {
    let Ok(parsed) = Url::parse(raw_url) else {
        debug!(url = %raw_url, "URL parse failed, no filename derived");
        return String::new();
    };
    let Some(path) = percent_decode(parsed.path().as_bytes()) else {
        debug!(url = %raw_url, "malformed escape in URL path, no filename derived");
        return String::new();
    };

    let base = base_segment(&path);
    let decoded = query_unescape(base).unwrap_or_else(|| {
        debug!("malformed escape in final segment, using it undecoded");
        Cow::Borrowed(base)
    });

    sanitize_lowercase(&String::from_utf8_lossy(&decoded).to_lowercase())
}

/// Returns `false` for names that cannot be used as a file inside a folder.
#[must_use]
pub fn is_usable_filename(name: &str) -> bool {
    !matches!(name, "" | "." | "..")
}

/// Final path segment, ignoring trailing slashes. A root path yields `/`.
fn base_segment(path: &[u8]) -> &[u8] {
    if path.is_empty() {
        return b".";
    }
    let end = path.iter().rposition(|&b| b != b'/').map_or(0, |i| i + 1);
    let trimmed = &path[..end];
    if trimmed.is_empty() {
        return b"/";
    }
    trimmed
        .iter()
        .rposition(|&b| b == b'/')
        .map_or(trimmed, |slash| &trimmed[slash + 1..])
}

/// Decodes every `%XX` escape to its byte. `None` on a malformed escape.
fn percent_decode(raw: &[u8]) -> Option<Cow<'_, [u8]>> {
    if has_malformed_escape(raw) {
        return None;
    }
    Some(urlencoding::decode_binary(raw))
}

/// Query-style unescape: `+` is a space, `%XX` is a byte.
fn query_unescape(segment: &[u8]) -> Option<Cow<'_, [u8]>> {
    if !segment.contains(&b'+') {
        return percent_decode(segment);
    }
    if has_malformed_escape(segment) {
        return None;
    }
    let spaced: Vec<u8> = segment
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    Some(Cow::Owned(urlencoding::decode_binary(&spaced).into_owned()))
}

/// True when some `%` is not followed by two hex digits.
fn has_malformed_escape(raw: &[u8]) -> bool {
    raw.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !matches!(
                raw.get(i + 1..i + 3),
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
    })
}

fn is_safe_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '.' | '_' | '-')
}

fn sanitize_lowercase(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_unsafe_run = false;
    for c in value.chars() {
        if is_safe_char(c) {
            out.push(c);
            in_unsafe_run = false;
        } else if !in_unsafe_run {
            out.push(SEPARATOR);
            in_unsafe_run = true;
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_simple_pdf_name() {
        assert_eq!(derive_safe_filename("https://ex.com/a.pdf"), "a.pdf");
        assert_eq!(
            derive_safe_filename("https://ex.com/docs/2024/report-v1.pdf"),
            "report-v1.pdf"
        );
    }

    #[test]
    fn test_derive_lowercases_name() {
        assert_eq!(
            derive_safe_filename("https://ex.com/Docs/MSDS_Bleach.PDF"),
            "msds_bleach.pdf"
        );
    }

    #[test]
    fn test_derive_ignores_query_string() {
        assert_eq!(
            derive_safe_filename("https://ex.com/files/sheet.pdf?version=3&lang=en"),
            "sheet.pdf"
        );
    }

    #[test]
    fn test_derive_percent_decodes_before_sanitizing() {
        assert_eq!(
            derive_safe_filename("https://ex.com/Safety%20Data%20Sheet.pdf"),
            "safety_data_sheet.pdf"
        );
    }

    #[test]
    fn test_derive_plus_decodes_to_separator() {
        assert_eq!(
            derive_safe_filename("https://ex.com/hand+soap.pdf"),
            "hand_soap.pdf"
        );
    }

    #[test]
    fn test_derive_collapses_unsafe_runs() {
        assert_eq!(
            derive_safe_filename("https://ex.com/a%20%26%20b%20(1).pdf"),
            "a_b_1_.pdf"
        );
    }

    #[test]
    fn test_derive_non_ascii_becomes_separator() {
        assert_eq!(
            derive_safe_filename("https://ex.com/caf%C3%A9-menu.pdf"),
            "caf_-menu.pdf"
        );
    }

    #[test]
    fn test_derive_invalid_utf8_byte_becomes_separator() {
        let name = derive_safe_filename("https://ex.com/bad%FF.pdf");
        assert_eq!(name, "bad_.pdf");
    }

    #[test]
    fn test_derive_latin1_escapes_share_a_name() {
        let e_acute = derive_safe_filename("https://ex.com/r%E9sum%E9.pdf");
        assert_eq!(e_acute, "r_sum_.pdf");
        let u_umlaut = derive_safe_filename("https://ex.com/r%FCsum%FC.pdf");
        assert_eq!(u_umlaut, e_acute);
    }

    #[test]
    fn test_derive_malformed_escape_in_path_is_empty() {
        assert_eq!(derive_safe_filename("https://ex.com/100%zz.pdf"), "");
        assert_eq!(derive_safe_filename("https://ex.com/a%2.pdf"), "");
    }

    #[test]
    fn test_derive_segment_is_unescaped_twice() {
        assert_eq!(
            derive_safe_filename("https://ex.com/Sheet%2520One.pdf"),
            "sheet_one.pdf"
        );
        let plus = derive_safe_filename("https://ex.com/a%252Bb.pdf");
        assert_eq!(plus, "a_b.pdf");
    }

    #[test]
    fn test_derive_malformed_second_escape_keeps_segment() {
        assert_eq!(
            derive_safe_filename("https://ex.com/100%25zz.pdf"),
            "100_zz.pdf"
        );
    }

    #[test]
    fn test_has_malformed_escape() {
        assert!(!has_malformed_escape(b"a%20b%FF"));
        assert!(has_malformed_escape(b"a%zz"));
        assert!(has_malformed_escape(b"trailing%"));
        assert!(has_malformed_escape(b"short%A"));
    }

    #[test]
    fn test_derive_trailing_slash_uses_last_segment() {
        assert_eq!(derive_safe_filename("https://ex.com/docs/"), "docs");
    }

    #[test]
    fn test_derive_root_path_is_separator() {
        assert_eq!(derive_safe_filename("https://ex.com/"), "_");
        assert_eq!(derive_safe_filename("https://ex.com"), "_");
    }

    #[test]
    fn test_derive_unparseable_url_is_empty() {
        assert_eq!(derive_safe_filename("not a url"), "");
        assert_eq!(derive_safe_filename(""), "");
    }

    #[test]
    fn test_derive_is_deterministic() {
        let url = "https://ex.com/Product%20Sheets/Domestos%20Original.pdf?x=1";
        let first = derive_safe_filename(url);
        for _ in 0..10 {
            assert_eq!(derive_safe_filename(url), first);
        }
    }

    #[test]
    fn test_derive_only_safe_characters() {
        let urls = [
            "https://ex.com/A B C.pdf",
            "https://ex.com/%E2%9C%85%20done!.pdf",
            "https://ex.com/%3Cscript%3E.pdf",
            "https://ex.com/x%2F..%2Fetc%2Fpasswd.pdf",
            "https://ex.com/tab%09name.PDF",
            "https://ex.com/%25%25.pdf",
        ];
        for url in urls {
            let name = derive_safe_filename(url);
            assert!(
                name.chars().all(is_safe_char),
                "unsafe character in {name:?} derived from {url}"
            );
        }
    }

    #[test]
    fn test_derive_encoded_slash_splits_segments() {
        let name = derive_safe_filename("https://ex.com/x%2F..%2Fetc%2Fpasswd.pdf");
        assert_eq!(name, "passwd.pdf");
    }

    #[test]
    fn test_distinct_urls_can_collide() {
        assert_eq!(
            derive_safe_filename("https://a.example/x/Sheet.pdf"),
            derive_safe_filename("https://b.example/y/sheet.pdf?lang=fr")
        );
    }

    #[test]
    fn test_is_usable_filename() {
        assert!(is_usable_filename("a.pdf"));
        assert!(is_usable_filename("_"));
        assert!(!is_usable_filename(""));
        assert!(!is_usable_filename("."));
        assert!(!is_usable_filename(".."));
    }
}
