//! The standard Markdown to WhatsApp rule table
//!
//! Rules run top to bottom, each over the whole text. The order below is load-bearing:
//!
//! 1. dashes (before anything collapses whitespace around them)
//! 2. code (shelved before any markdown rule can see `*`, `#`, `-` or `[..]` inside it)
//! 3. headings, most specific marker first
//! 4. emphasis (`***x***` and `**x**` both become `*x*`; WhatsApp has one weight)
//! 5. links (citations before generic links, so `[1](url)` is not read as link text)
//! 6. lists (bullets after emphasis, so `**` can no longer look like a bullet)
//! 7. blockquotes
//! 8. horizontal rules
//! 9. URL query cleanup
//! 10. shelved code goes back in
//! 11. blank-line and citation-block spacing
//! 12. escapes (`\$` first, then every remaining backslash)
//! 13. trim
//!
//! Line-anchored rules use `(?mR)` so `^` and `$` work on `\n` as well as `\r\n` input.

use super::guards::{
    asterisk_bullet, at_url_boundary, before_citation, duplicate_citation_url, url_dangling_separator,
    url_double_amp, url_question_amp,
};
use super::{Guard, Replacement, RuleGroup, RuleSet, RuleSpec};
use once_cell::sync::Lazy;

use Replacement::{Guarded, Restore, Rewrite, Shelve, Template};
use RuleGroup::*;

/// The standard table, compiled once per process.
pub static STANDARD: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::compile(STANDARD_RULES).unwrap_or_else(|e| panic!("standard rule table: {e}"))
});

const fn rule(
    group: RuleGroup,
    name: &'static str,
    pattern: &'static str,
    replacement: Replacement,
) -> RuleSpec {
    RuleSpec {
        name,
        group,
        pattern,
        replacement,
    }
}

const fn guarded(template: &'static str, guard: Guard) -> Replacement {
    Guarded { template, guard }
}

/// Rule specs in execution order
pub const STANDARD_RULES: &[RuleSpec] = &[
    // word—word, word–word, word--word -> word — word (Latin-1 letters count as word chars)
    rule(
        Dashes,
        "em_dash",
        r"([0-9A-Za-zÀ-ÖØ-öø-ÿ])—([0-9A-Za-zÀ-ÖØ-öø-ÿ])",
        Template("${1} — ${2}"),
    ),
    rule(
        Dashes,
        "en_dash",
        r"([0-9A-Za-zÀ-ÖØ-öø-ÿ])–([0-9A-Za-zÀ-ÖØ-öø-ÿ])",
        Template("${1} — ${2}"),
    ),
    rule(
        Dashes,
        "double_hyphen",
        r"([0-9A-Za-zÀ-ÖØ-öø-ÿ])-\s*-([0-9A-Za-zÀ-ÖØ-öø-ÿ])",
        Template("${1} — ${2}"),
    ),
    rule(Dashes, "dash_spacing", r"\s*—\s*", Template(" — ")),
    // ```lang\ncode``` and `code`: content is shelved until the markdown rules are done
    rule(
        Code,
        "fenced_code",
        r"(?s)```[A-Za-z0-9_]*\n?(.*?)```",
        Shelve,
    ),
    rule(Code, "inline_code", r"`([^`]+)`", Shelve),
    rule(Headings, "heading5", r"(?mR)^#####\s+", Template("")),
    rule(Headings, "heading4", r"(?mR)^####\s+", Template("")),
    rule(Headings, "heading3", r"(?mR)^###\s+", Template("")),
    rule(Headings, "heading2", r"(?mR)^##\s+", Template("")),
    rule(Headings, "heading1", r"(?mR)^#\s+", Template("")),
    // _italic_ is already valid WhatsApp and is left alone
    rule(
        Emphasis,
        "bold_italic",
        r"\*\*\*([^*]+)\*\*\*",
        Template("*${1}*"),
    ),
    rule(Emphasis, "bold", r"\*\*([^*]+)\*\*", Template("*${1}*")),
    rule(Emphasis, "strikethrough", r"~~([^~]+)~~", Template("~${1}~")),
    // [1](url) alone on its line is a citation, not link text
    rule(
        Links,
        "citation_link",
        r"(?mR)^\s*\[([0-9]+)\]\((https?://[^)]+)\)\s*$",
        Template("[${1}] ${2}"),
    ),
    // [1] [url](url); must see the line before inline_link splits the [url](url) pair
    rule(
        Links,
        "citation_duplicate_url",
        r"(?mR)^\s*(\[[0-9]+\])\s*\[(https?://[^\]\s]+)\]\((https?://[^)\s]+)\)\s*$",
        Rewrite(duplicate_citation_url),
    ),
    rule(
        Links,
        "inline_link",
        r"\[([^\]]+)\]\(([^)]+)\)",
        Template("${1} (${2})"),
    ),
    rule(
        Links,
        "citation_bracket_url",
        r"(?mR)^\s*(\[[0-9]+\])\s*\[(https?://[^\]\s]+)\]\s*$",
        Template("${1} ${2}"),
    ),
    // [1]: url "title" -> [1] url
    rule(
        Links,
        "citation_definition",
        r#"(?mR)^\s*\[([0-9]+)\]:\s*(https?://\S+)(?:\s+"[^"]*")?\s*$"#,
        Template("[${1}] ${2}"),
    ),
    rule(Lists, "bullet_dash", r"(?mR)^(\s*)-\s+", Template("${1}• ")),
    rule(
        Lists,
        "bullet_asterisk",
        r"(?mR)^(\s*)\*(\s+)",
        Rewrite(asterisk_bullet),
    ),
    rule(
        Lists,
        "numbered_list",
        r"(?mR)^(\s*)([0-9]+)\.\s+",
        Template("${1}${2}. "),
    ),
    rule(Blockquotes, "blockquote", r"(?mR)^>\s*", Template("» ")),
    rule(
        HorizontalRules,
        "hr_dash",
        r"(?mR)^\s*-{3,}\s*$",
        Template("_____"),
    ),
    rule(
        HorizontalRules,
        "hr_asterisk",
        r"(?mR)^\s*\*{3,}\s*$",
        Template("_____"),
    ),
    rule(
        HorizontalRules,
        "hr_underscore",
        r"(?mR)^\s*_{3,}\s*$",
        Template("_____"),
    ),
    // Signed S3 links: the query string is all auth parameters
    rule(
        UrlCleanup,
        "s3_signature",
        r"(https?://[^/\s]*\.s3\.amazonaws\.com/[^?\s]+)\?[^\s\])]+",
        Template("${1}"),
    ),
    rule(
        UrlCleanup,
        "utm_chatgpt",
        r"\?utm_source=chatgpt\.com",
        guarded("", at_url_boundary),
    ),
    rule(
        UrlCleanup,
        "utm_chatgpt_amp",
        r"&utm_source=chatgpt\.com",
        guarded("", at_url_boundary),
    ),
    rule(
        UrlCleanup,
        "utm_params",
        r#"[?&]utm_[^=]+=[^&#\s"]+"#,
        Template(""),
    ),
    // Query repairs work on whole URL tokens, so prose like "Why?" or "a && b" is left alone
    rule(
        UrlCleanup,
        "query_question_amp",
        r"https?://\S+",
        Rewrite(url_question_amp),
    ),
    rule(
        UrlCleanup,
        "query_double_amp",
        r"https?://\S+",
        Rewrite(url_double_amp),
    ),
    rule(
        UrlCleanup,
        "query_dangling",
        r"https?://\S+",
        Rewrite(url_dangling_separator),
    ),
    rule(
        CodeRestore,
        "code_restore",
        r"\x{E000}([0-9]+)\x{E001}",
        Restore,
    ),
    rule(
        Whitespace,
        "blank_lines",
        r"((\r?\n)[ \t]*){3,}",
        Template("\n\n"),
    ),
    // A citation block that starts right after paragraph text gets a blank line in front
    rule(
        Whitespace,
        "citation_block_start",
        r"([^\r\n\[0-9])(\r?\n)([ \t]*\[[0-9]+\]\s+(?:https?://|\S))",
        Template("${1}${2}${2}${3}"),
    ),
    rule(
        Whitespace,
        "citation_spacing",
        r"(\[[0-9]+\][^\r\n]+)(\r?\n)",
        guarded("${1}${2}${2}", before_citation),
    ),
    // Runs after everything that might have relied on an escape. Strips backslashes in code too.
    rule(Escapes, "escaped_dollar", r"\\\$", Template("$$")),
    rule(Escapes, "stray_backslash", r"\\", Template("")),
    // U+FEFF counts as whitespace at the edges, as it does for browser `trim()`
    rule(Trim, "trim_start", r"\A[\s\x{FEFF}]+", Template("")),
    rule(Trim, "trim_end", r"[\s\x{FEFF}]+\z", Template("")),
];
