//! WhatsApp share links
//!
//! `wa.me` takes the message as a `text` query parameter. It is encoded the way browsers'
//! `encodeURIComponent` does it, so links match what the web app produced.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build a share link for `text`. `None` when there is nothing to share.
pub fn share_url(text: &str, base_url: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let separator = if base_url.contains('?') { '&' } else { '?' };
    Some(format!(
        "{}{}text={}",
        base_url,
        separator,
        utf8_percent_encode(text, URI_COMPONENT)
    ))
}
