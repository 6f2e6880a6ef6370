use std::fmt::Write;

use percent_encoding::percent_decode_str;
use sha2::{Digest, Sha256};
use url::Url;

const MAX_FILENAME_CHARS: usize = 120;

const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Windows-safe name for a downloaded file.
///
/// Order of preference: the `Content-Disposition` `filename*` / `filename`
/// parameter, the percent-decoded last URL path segment, then
/// `download--{url_digest(url)}`.
pub fn download_filename(content_disposition: Option<&str>, url: &Url) -> String {
    content_disposition
        .and_then(filename_from_disposition)
        .or_else(|| filename_from_url(url))
        .map(|name| sanitize_filename(&name))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("download--{}", url_digest(url.as_str())))
}

fn filename_from_disposition(header: &str) -> Option<String> {
    let params = disposition_params(header);
    let lookup = |wanted: &str| {
        params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(wanted))
            .map(|(_, value)| value.as_str())
    };

    lookup("filename*")
        .and_then(decode_extended_value)
        .or_else(|| lookup("filename").map(str::to_string))
        .filter(|name| !name.trim().is_empty())
}

/// Splits `disposition-type; key=value; key="quoted; value"` into key/value
/// pairs. Semicolons inside quotes belong to the value; `\x` escapes `x`.
fn disposition_params(header: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut segment = String::new();
    let mut in_quotes = false;
    let mut chars = header.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                segment.push(c);
            }
            '\\' if in_quotes => {
                if let Some(escaped) = chars.next() {
                    segment.push(escaped);
                }
            }
            ';' if !in_quotes => {
                push_param(&mut params, &segment);
                segment.clear();
            }
            _ => segment.push(c),
        }
    }
    push_param(&mut params, &segment);
    params
}

fn push_param(params: &mut Vec<(String, String)>, segment: &str) {
    if let Some((key, value)) = segment.split_once('=') {
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|inner| inner.strip_suffix('"'))
            .unwrap_or(value);
        params.push((key.trim().to_string(), value.to_string()));
    }
}

/// RFC 5987 `charset'lang'%XX` form.
fn decode_extended_value(value: &str) -> Option<String> {
    let encoded = value.split_once("''").map_or(value, |(_, rest)| rest);
    percent_decode_str(encoded)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

fn filename_from_url(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.rev().find(|segment| !segment.is_empty())?;
    Some(percent_decode_str(segment).decode_utf8_lossy().into_owned())
}

fn sanitize_filename(input: &str) -> String {
    let mut name = String::with_capacity(input.len());
    for c in input.chars() {
        let c = if is_unsafe_in_filename(c) { '_' } else { c };
        if c == '_' && name.ends_with('_') {
            continue;
        }
        name.push(c);
    }

    let mut name: String = name
        .trim_matches(|c| matches!(c, '_' | ' ' | '.'))
        .chars()
        .take(MAX_FILENAME_CHARS)
        .collect();

    // `con.txt` is still the CON device on Windows.
    let stem_len = name.find('.').unwrap_or(name.len());
    if WINDOWS_DEVICE_NAMES
        .iter()
        .any(|device| device.eq_ignore_ascii_case(&name[..stem_len]))
    {
        name.insert(stem_len, '_');
    }
    name
}

fn is_unsafe_in_filename(c: char) -> bool {
    c.is_control() || matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

/// First four bytes of the URL's SHA-256, hex encoded.
fn url_digest(input: &str) -> String {
    Sha256::digest(input.as_bytes())
        .iter()
        .take(4)
        .fold(String::with_capacity(8), |mut hex, byte| {
            let _ = write!(hex, "{byte:02x}");
            hex
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn disposition_wins_over_url() {
        let name = download_filename(
            Some(r#"attachment; filename="youtube_abc123.mp4""#),
            &url("http://127.0.0.1:5000/downloads/other.bin"),
        );
        assert_eq!(name, "youtube_abc123.mp4");
    }

    #[test]
    fn unquoted_disposition_is_accepted() {
        let name = download_filename(
            Some("attachment; filename=tweet.gif"),
            &url("http://127.0.0.1:5000/x"),
        );
        assert_eq!(name, "tweet.gif");
    }

    #[test]
    fn quoted_name_keeps_semicolons_and_extension() {
        let name = download_filename(
            Some(r#"attachment; filename="Live; Remastered (2024).mp4"; size=42"#),
            &url("http://127.0.0.1:5000/x"),
        );
        assert_eq!(name, "Live; Remastered (2024).mp4");
    }

    #[test]
    fn escaped_quote_inside_quoted_name() {
        let name = download_filename(
            Some(r#"attachment; filename="say \"hi\".mp3""#),
            &url("http://127.0.0.1:5000/x"),
        );
        assert_eq!(name, "say _hi_.mp3");
    }

    #[test]
    fn extended_filename_is_preferred_and_decoded() {
        let name = download_filename(
            Some("attachment; filename=\"fallback.mp4\"; filename*=UTF-8''Caf%C3%A9%20mix.mp4"),
            &url("http://127.0.0.1:5000/x"),
        );
        assert_eq!(name, "Café mix.mp4");
    }

    #[test]
    fn falls_back_to_last_path_segment() {
        let name = download_filename(
            Some("attachment"),
            &url("http://127.0.0.1:5000/downloads/tweet_42.gif"),
        );
        assert_eq!(name, "tweet_42.gif");
    }

    #[test]
    fn url_segment_is_percent_decoded() {
        let name = download_filename(None, &url("http://127.0.0.1:5000/downloads/My%20Video.mp4"));
        assert_eq!(name, "My Video.mp4");

        let name = download_filename(None, &url("http://127.0.0.1:5000/downloads/a%2Fb.mp4"));
        assert_eq!(name, "a_b.mp4");
    }

    #[test]
    fn falls_back_to_hash_without_any_name() {
        let name = download_filename(None, &url("http://127.0.0.1:5000/"));
        assert!(name.starts_with("download--"));
        assert_eq!(name.len(), "download--".len() + 8);
    }

    #[test]
    fn strips_path_traversal_and_reserved_names() {
        let name = download_filename(
            Some(r#"attachment; filename="..//..//evil:name.mp4""#),
            &url("http://127.0.0.1:5000/x"),
        );
        assert_eq!(name, "evil_name.mp4");

        let name = download_filename(Some("attachment; filename=con.txt"), &url("http://h/x"));
        assert_eq!(name, "con_.txt");
    }
}
