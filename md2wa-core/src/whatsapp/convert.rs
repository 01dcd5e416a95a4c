//! Conversion entry points
//!
//! [`transform`] is total: every string, however malformed, produces a string. [`trace`] runs the
//! same conversion and reports which rules actually changed the text.

use crate::whatsapp::document::Document;
use crate::whatsapp::rules::RuleSet;

pub use crate::whatsapp::rules::RuleHit;

/// Convert Markdown to WhatsApp-ready text using the standard rule table.
pub fn transform(input: &str) -> String {
    RuleSet::standard().convert(input)
}

/// Convert `input` and return the output together with every rule that changed the text.
pub fn trace(input: &str) -> (String, Vec<RuleHit>) {
    let mut doc = Document::new(input);
    let hits = RuleSet::standard().run_traced(&mut doc);
    (doc.into_text(), hits)
}
