//! Main module for the Markdown to WhatsApp conversion

pub mod convert;
pub mod document;
pub mod loader;
pub mod rules;
pub mod words;
