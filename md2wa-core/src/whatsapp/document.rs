//! The text being rewritten by a single conversion
//!
//! A `Document` lives for exactly one conversion. Besides the text itself it carries a shelf:
//! code content pulled out of the text by the code rules, replaced by a placeholder, and put back
//! by the restore rule once the markdown rules are done with the surrounding text. Nothing here is
//! shared between conversions.
//!
//! Placeholder delimiters that already occur in the input are shelved too, on construction, so
//! every placeholder in the working text is one this document made.

/// Opens a shelf placeholder. Private use area, so it never collides with real markdown syntax.
pub const SHELF_OPEN: char = '\u{E000}';
/// Closes a shelf placeholder.
pub const SHELF_CLOSE: char = '\u{E001}';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    shelf: Vec<String>,
}

impl Document {
    pub fn new<S: Into<String>>(text: S) -> Self {
        let mut doc = Document::default();
        let text = text.into();
        doc.text = if text.contains(is_delimiter) {
            doc.escape_delimiters(&text)
        } else {
            text
        };
        doc
    }

    fn escape_delimiters(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if is_delimiter(c) {
                let placeholder = self.shelve(c.encode_utf8(&mut [0; 4]));
                out.push_str(&placeholder);
            } else {
                out.push(c);
            }
        }
        out
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// True for empty or whitespace-only text. A byte order mark counts as whitespace.
    pub fn is_blank(&self) -> bool {
        self.text
            .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
            .is_empty()
    }

    /// Store `content` on the shelf and return the placeholder that stands in for it.
    pub fn shelve(&mut self, content: &str) -> String {
        let index = self.shelf.len();
        self.shelf.push(content.to_string());
        format!("{SHELF_OPEN}{index}{SHELF_CLOSE}")
    }

    /// Content shelved under `index`, if any.
    pub fn shelved(&self, index: usize) -> Option<&str> {
        self.shelf.get(index).map(String::as_str)
    }

    /// Content shelved under `index` with any placeholders inside it expanded.
    ///
    /// Code can be shelved after escaped delimiters were, so its content may hold placeholders
    /// of its own. Only placeholders pointing at lower indices are expanded.
    pub fn unshelve(&self, index: usize) -> Option<String> {
        let content = self.shelved(index)?;
        let mut out = String::with_capacity(content.len());
        self.expand_into(content, index, &mut out);
        Some(out)
    }

    fn expand_into(&self, text: &str, below: usize, out: &mut String) {
        let mut rest = text;
        while let Some(open) = rest.find(SHELF_OPEN) {
            out.push_str(&rest[..open]);
            let after = &rest[open + SHELF_OPEN.len_utf8()..];
            let digits = after.bytes().take_while(u8::is_ascii_digit).count();
            let entry = after[digits..]
                .starts_with(SHELF_CLOSE)
                .then(|| after[..digits].parse::<usize>().ok())
                .flatten()
                .filter(|&index| index < below)
                .and_then(|index| self.shelved(index).map(|content| (index, content)));
            match entry {
                Some((index, content)) => {
                    self.expand_into(content, index, out);
                    rest = &after[digits + SHELF_CLOSE.len_utf8()..];
                }
                None => {
                    out.push(SHELF_OPEN);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
    }

    pub fn shelf_len(&self) -> usize {
        self.shelf.len()
    }

    pub(crate) fn take_text(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

fn is_delimiter(c: char) -> bool {
    c == SHELF_OPEN || c == SHELF_CLOSE
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Document::new(text)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shelve_returns_indexed_placeholders() {
        let mut doc = Document::new("");
        let first = doc.shelve("let a = 1;");
        let second = doc.shelve("b");

        assert_eq!(first, "\u{E000}0\u{E001}");
        assert_eq!(second, "\u{E000}1\u{E001}");
        assert_eq!(doc.shelved(0), Some("let a = 1;"));
        assert_eq!(doc.shelved(1), Some("b"));
        assert_eq!(doc.shelved(2), None);
        assert_eq!(doc.shelf_len(), 2);
    }

    #[test]
    fn test_is_blank() {
        assert!(Document::new("").is_blank());
        assert!(Document::new(" \r\n\t ").is_blank());
        assert!(!Document::new(" x ").is_blank());
        assert!(Document::new("\u{FEFF}").is_blank());
        assert!(Document::new("\u{FEFF} \n").is_blank());
    }

    #[test]
    fn test_existing_delimiters_are_shelved() {
        let doc = Document::new("a\u{E000}0\u{E001}b");

        assert_eq!(doc.text(), "a\u{E000}0\u{E001}0\u{E000}1\u{E001}b");
        assert_eq!(doc.shelved(0), Some("\u{E000}"));
        assert_eq!(doc.shelved(1), Some("\u{E001}"));
    }

    #[test]
    fn test_unshelve_expands_nested_placeholders() {
        let mut doc = Document::new("`\u{E000}`");
        let outer = doc.text().trim_matches('`').to_string();
        doc.shelve(&outer);

        assert_eq!(doc.unshelve(1), Some("\u{E000}".to_string()));
        assert_eq!(doc.unshelve(2), None);
    }

    #[test]
    fn test_unshelve_ignores_self_reference() {
        let mut doc = Document::new("");
        doc.shelve("\u{E000}0\u{E001}");

        assert_eq!(doc.unshelve(0), Some("\u{E000}0\u{E001}".to_string()));
    }

    #[test]
    fn test_unshelve_leaves_malformed_placeholders() {
        let mut doc = Document::new("");
        doc.shelve("x\u{E001}");
        doc.shelve("\u{E000}7\u{E001} \u{E000}0\u{E001} \u{E000}");

        assert_eq!(
            doc.unshelve(1),
            Some("\u{E000}7\u{E001} x\u{E001} \u{E000}".to_string())
        );
    }

    #[test]
    fn test_take_and_set_text() {
        let mut doc = Document::from("hello");
        let text = doc.take_text();
        assert_eq!(text, "hello");
        assert_eq!(doc.text(), "");

        doc.set_text("bye".to_string());
        assert_eq!(doc.into_text(), "bye");
    }
}
