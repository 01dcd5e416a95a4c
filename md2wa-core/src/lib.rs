//! # md2wa-core
//!
//! Rewrites Markdown, as produced by LLM chat assistants, into plain text that pastes cleanly into
//! WhatsApp. WhatsApp only understands single-asterisk bold, single-tilde strikethrough and
//! underscore italic, so everything else (headings, fences, links, rules) is flattened.
//!
//! The conversion is not a parser. It is an ordered table of regex rewrite rules, each applied to
//! the whole text, where the output of one rule is the input of the next. Getting the order right is
//! the whole game: see [`whatsapp::rules::table`] for the table and the reasoning behind it.
//!
//! Layout
//!
//!   src/whatsapp
//!     ├── document     The per-call text being rewritten (plus shelved code content)
//!     ├── rules        Rule / RuleSet types, lookaround guards and the standard table
//!     ├── convert      `transform` / `trace` entry points
//!     ├── words        Word counting and the word budget
//!     └── loader       Reading sources from files, stdin or strings

pub mod whatsapp;

pub use whatsapp::convert::{trace, transform, RuleHit};
pub use whatsapp::words::{count_words, WordBudget, WordLimits};
