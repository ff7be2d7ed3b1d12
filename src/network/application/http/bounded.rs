//! Explicit truncation for fixed-capacity strings.
//!
//! Every string that ends up on the wire has a documented byte limit. Values
//! longer than the limit are cut at the last UTF-8 character boundary that
//! fits, never in the middle of a character.

use heapless::String;

/// Returns the longest prefix of `s` that is at most `limit` bytes long and
/// ends on a character boundary.
///
/// ```rust
/// use httptiny::network::application::http::bounded::truncate;
///
/// assert_eq!(truncate("example.com", 7), "example");
/// assert_eq!(truncate("héllo", 2), "h");
/// assert_eq!(truncate("short", 64), "short");
/// ```
pub fn truncate(s: &str, limit: usize) -> &str {
    if s.len() <= limit {
        return s;
    }
    let mut end = limit;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Copies `s` into a `String<N>`, truncating it to `N` bytes first.
pub fn bounded<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    // The truncated prefix always fits.
    let _ = out.push_str(truncate(s, N));
    out
}

/// Copies `s` into a `String<N>` only if it fits without truncation.
pub fn exact<const N: usize>(s: &str) -> Option<String<N>> {
    String::try_from(s).ok()
}
