//! Look-around stand-ins for the rule table
//!
//! `regex` has no look-ahead, look-behind or back-references. The handful of rules that need one
//! match a wider candidate and let one of these functions decide what to do with it.

use regex::{Captures, Match};

/// Characters that may follow the end of a URL in running text.
fn is_url_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | '(' | ')' | ']')
}

/// The match is followed by whitespace, a quote, a paren, `]` or the end of the text.
pub fn at_url_boundary(haystack: &str, m: Match<'_>) -> bool {
    haystack[m.end()..].chars().next().map_or(true, is_url_boundary)
}

/// `?&` collapses to `?` within a URL token.
///
/// Expects capture 0 to be the whole `https?://\S+` token.
pub fn url_question_amp(caps: &Captures<'_>, _haystack: &str) -> Option<String> {
    let url = caps.get(0)?.as_str();
    url.contains("?&").then(|| url.replace("?&", "?"))
}

/// `&&` collapses to `&` within a URL token.
pub fn url_double_amp(caps: &Captures<'_>, _haystack: &str) -> Option<String> {
    let url = caps.get(0)?.as_str();
    url.contains("&&").then(|| url.replace("&&", "&"))
}

/// Drops a `?` or `&` left dangling before a URL boundary (or the end of the token).
pub fn url_dangling_separator(caps: &Captures<'_>, _haystack: &str) -> Option<String> {
    let url = caps.get(0)?.as_str();
    let mut out = String::with_capacity(url.len());
    let mut chars = url.chars().peekable();
    let mut dropped = false;

    while let Some(c) = chars.next() {
        let dangling =
            matches!(c, '?' | '&') && chars.peek().map_or(true, |&next| is_url_boundary(next));
        if dangling {
            dropped = true;
        } else {
            out.push(c);
        }
    }
    dropped.then_some(out)
}

/// The match is immediately followed by a citation marker such as `[12]`.
pub fn before_citation(haystack: &str, m: Match<'_>) -> bool {
    let Some(rest) = haystack[m.end()..].strip_prefix('[') else {
        return false;
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && rest[digits..].starts_with(']')
}

/// `[N] [url](url)` where both URLs are the same collapses to `[N] url`.
///
/// Expects captures: 1 = `[N]`, 2 = bracketed URL, 3 = parenthesised URL.
pub fn duplicate_citation_url(caps: &Captures<'_>, _haystack: &str) -> Option<String> {
    let marker = caps.get(1)?.as_str();
    let label = caps.get(2)?.as_str();
    let target = caps.get(3)?.as_str();
    (label == target).then(|| format!("{marker} {label}"))
}

/// `* item` becomes `• item`, unless the gap after the star runs straight into another star.
///
/// Expects captures: 1 = indentation, 2 = whitespace after the star. When the whitespace is
/// followed by `*`, a gap of one character declines the match; a longer gap keeps its last
/// character so the bullet never butts up against the star.
pub fn asterisk_bullet(caps: &Captures<'_>, haystack: &str) -> Option<String> {
    let whole = caps.get(0)?;
    let indent = caps.get(1)?.as_str();
    let gap = caps.get(2)?.as_str();

    if !haystack[whole.end()..].starts_with('*') {
        return Some(format!("{indent}• "));
    }
    match gap.char_indices().last() {
        Some((idx, _)) if idx > 0 => Some(format!("{indent}• {}", &gap[idx..])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn first<'h>(pattern: &str, haystack: &'h str) -> Match<'h> {
        Regex::new(pattern).unwrap().find(haystack).unwrap()
    }

    #[test]
    fn test_at_url_boundary() {
        assert!(at_url_boundary("a?", first(r"\?", "a?")));
        assert!(at_url_boundary("a? b", first(r"\?", "a? b")));
        assert!(at_url_boundary("(a?)", first(r"\?", "(a?)")));
        assert!(!at_url_boundary("a?b", first(r"\?", "a?b")));
    }

    fn url_caps(text: &str) -> Captures<'_> {
        Regex::new(r"https?://\S+").unwrap().captures(text).unwrap()
    }

    #[test]
    fn test_url_question_amp() {
        let text = "https://x.com/?&a=1";
        assert_eq!(
            url_question_amp(&url_caps(text), text),
            Some("https://x.com/?a=1".to_string())
        );

        let text = "https://x.com/?a=1";
        assert_eq!(url_question_amp(&url_caps(text), text), None);
    }

    #[test]
    fn test_url_double_amp() {
        let text = "https://x.com/?a=1&&b=2";
        assert_eq!(
            url_double_amp(&url_caps(text), text),
            Some("https://x.com/?a=1&b=2".to_string())
        );
    }

    #[test]
    fn test_url_dangling_separator() {
        let text = "https://a.b/?";
        assert_eq!(
            url_dangling_separator(&url_caps(text), text),
            Some("https://a.b/".to_string())
        );

        let text = "https://a.b/?x=1&)";
        assert_eq!(
            url_dangling_separator(&url_caps(text), text),
            Some("https://a.b/?x=1)".to_string())
        );

        let text = "https://a.b/?x=1";
        assert_eq!(url_dangling_separator(&url_caps(text), text), None);
    }

    #[test]
    fn test_before_citation() {
        let text = "x\n[12] y";
        assert!(before_citation(text, first(r"\n", text)));

        let text = "x\n[a] y";
        assert!(!before_citation(text, first(r"\n", text)));

        let text = "x\n[] y";
        assert!(!before_citation(text, first(r"\n", text)));
    }

    #[test]
    fn test_duplicate_citation_url() {
        let re = Regex::new(r"(\[\d\]) \[(\S+)\]\((\S+)\)").unwrap();

        let caps = re.captures("[1] [u](u)").unwrap();
        assert_eq!(duplicate_citation_url(&caps, ""), Some("[1] u".to_string()));

        let caps = re.captures("[1] [u](v)").unwrap();
        assert_eq!(duplicate_citation_url(&caps, ""), None);
    }

    #[test]
    fn test_asterisk_bullet() {
        let re = Regex::new(r"(?m)^([ \t]*)\*(\s+)").unwrap();

        let text = "  * item";
        let caps = re.captures(text).unwrap();
        assert_eq!(asterisk_bullet(&caps, text), Some("  • ".to_string()));

        let text = "* *x*";
        let caps = re.captures(text).unwrap();
        assert_eq!(asterisk_bullet(&caps, text), None);

        let text = "*   *x*";
        let caps = re.captures(text).unwrap();
        assert_eq!(asterisk_bullet(&caps, text), Some("• ".to_string() + " "));
    }
}
