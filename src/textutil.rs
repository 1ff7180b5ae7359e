//! String shortening helpers for width-bounded report columns.

use once_cell::sync::Lazy;
use regex::Regex;

/// Extracts the '[scheme]://[authority]/' part and remainder of a URL.
static ELIDE_URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^/]+://[^/]+/)(.+)$").expect("static regex"));

/// Matches the path (and everything after it) of a URL.
static URL_PATH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^/]+://[^/]+(/.*)?$").expect("static regex"));

/// Shortens `s` to at most `max` code points, never splitting a character.
///
/// URL-shaped strings keep their full '[scheme]://[authority]/' prefix and
/// lose the middle of the path instead, biased so that the tail (usually a
/// file extension) survives. Everything else is truncated with a trailing
/// ellipsis. `max` of 0 or 1 yields the ellipsis alone.
pub fn elide(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max {
        return s.to_string();
    }

    // For URLs, elide the middle portion of the path.
    if let Some(caps) = ELIDE_URL_REGEX.captures(s) {
        let prefix: Vec<char> = caps[1].chars().collect();
        if prefix.len() < max {
            let rest: Vec<char> = caps[2].chars().collect();
            let mut out = prefix;
            let head = (max - out.len()) / 2;
            out.extend(&rest[..head]);
            out.push('…');
            let rem = max - out.len();
            if rem > 0 {
                out.extend(&rest[rest.len() - rem..]);
            }
            return out.into_iter().collect();
        }
    }

    if max <= 1 {
        return "…".to_string();
    }
    let mut out: String = chars[..max - 1].iter().collect();
    out.push('…');
    out
}

/// Returns just the path portion (including leading slash) of `full`.
///
/// A URL with no path maps to ""; a string that isn't URL-shaped is
/// returned unchanged.
pub fn url_path(full: &str) -> &str {
    match URL_PATH_REGEX.captures(full) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => full,
    }
}
