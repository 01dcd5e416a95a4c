//! Output formats for converted text
//!
//! `text` prints the converted message as-is, ready to paste. `json` wraps it with the word
//! count and budget verdict for scripts.

use md2wa_core::WordBudget;
use serde::Serialize;

/// All available output formats
pub const AVAILABLE_FORMATS: &[&str] = &["text", "json"];

/// A finished conversion, as reported to the user
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub text: &'a str,
    pub words: usize,
    pub budget: &'static str,
}

impl<'a> Report<'a> {
    pub fn new(text: &'a str, words: usize, budget: WordBudget) -> Self {
        Report {
            text,
            words,
            budget: budget.as_str(),
        }
    }
}

/// Render `report` in the named format
pub fn render(report: &Report<'_>, format: &str, trailing_newline: bool) -> Result<String, String> {
    match format {
        "text" => {
            let mut out = report.text.to_string();
            if trailing_newline && !out.is_empty() {
                out.push('\n');
            }
            Ok(out)
        }
        "json" => serde_json::to_string_pretty(report)
            .map(|json| json + "\n")
            .map_err(|e| format!("JSON serialization failed: {}", e)),
        _ => Err(format!("Unknown format: {}", format)),
    }
}
