//! Rewrite rules and ordered rule sets
//!
//! A [`Rule`] is a named regex plus a [`Replacement`]. A [`RuleSet`] is an ordered list of rules
//! where insertion order is execution order: every rule sees the text exactly as the previous rule
//! left it. Rules are data; the only code here is the single driver loop in [`RuleSet::drive`].
//!
//! The `regex` crate matches in linear time, which keeps every rule safe on adversarial input. The
//! price is the lack of look-around and back-references. Rules that need them use a
//! [`Replacement::Guarded`] or [`Replacement::Rewrite`] replacement instead: the regex finds a
//! candidate, and a plain function over the haystack decides whether (and how) to rewrite it. A
//! declined candidate is copied through untouched.

pub mod guards;
pub mod table;

use crate::whatsapp::document::Document;
use regex::{Captures, Match, Regex};
use std::fmt;

/// Decides whether a candidate match may be rewritten, given the whole haystack.
pub type Guard = fn(&str, Match<'_>) -> bool;

/// Builds the replacement for a candidate match. `None` leaves the match as it was.
pub type Rewriter = fn(&Captures<'_>, &str) -> Option<String>;

/// Error raised when a rule pattern does not compile
#[derive(Debug, Clone, PartialEq)]
pub struct RuleError {
    pub rule: String,
    pub message: String,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule '{}' failed to compile: {}", self.rule, self.message)
    }
}

impl std::error::Error for RuleError {}

/// The stage of the conversion a rule belongs to, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleGroup {
    Dashes,
    Code,
    Headings,
    Emphasis,
    Links,
    Lists,
    Blockquotes,
    HorizontalRules,
    UrlCleanup,
    CodeRestore,
    Whitespace,
    Escapes,
    Trim,
}

impl RuleGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleGroup::Dashes => "dashes",
            RuleGroup::Code => "code",
            RuleGroup::Headings => "headings",
            RuleGroup::Emphasis => "emphasis",
            RuleGroup::Links => "links",
            RuleGroup::Lists => "lists",
            RuleGroup::Blockquotes => "blockquotes",
            RuleGroup::HorizontalRules => "horizontal-rules",
            RuleGroup::UrlCleanup => "url-cleanup",
            RuleGroup::CodeRestore => "code-restore",
            RuleGroup::Whitespace => "whitespace",
            RuleGroup::Escapes => "escapes",
            RuleGroup::Trim => "trim",
        }
    }
}

impl fmt::Display for RuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// What a matched span turns into
#[derive(Debug, Clone, Copy)]
pub enum Replacement {
    /// Expand a `${n}` template against the captures.
    Template(&'static str),
    /// Expand the template only when the guard accepts the match.
    Guarded {
        template: &'static str,
        guard: Guard,
    },
    /// Compute the replacement with a function.
    Rewrite(Rewriter),
    /// Move capture group 1 onto the document shelf, leaving a placeholder.
    Shelve,
    /// Swap a placeholder (capture group 1 is its index) back for its shelved content.
    Restore,
}

/// Declarative description of a rule, compiled into a [`Rule`] by [`RuleSet::compile`].
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub name: &'static str,
    pub group: RuleGroup,
    pub pattern: &'static str,
    pub replacement: Replacement,
}

/// A compiled rewrite rule. Immutable once built.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    group: RuleGroup,
    pattern: Regex,
    replacement: Replacement,
}

impl Rule {
    pub fn compile(spec: &RuleSpec) -> Result<Self, RuleError> {
        let pattern = Regex::new(spec.pattern).map_err(|e| RuleError {
            rule: spec.name.to_string(),
            message: e.to_string(),
        })?;
        Ok(Rule {
            name: spec.name,
            group: spec.group,
            pattern,
            replacement: spec.replacement,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> RuleGroup {
        self.group
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Rewrite every non-overlapping match in the document's text.
    ///
    /// Returns the number of matches that were rewritten (declined candidates are not counted).
    pub fn apply(&self, doc: &mut Document) -> usize {
        let haystack = doc.take_text();
        let mut out = String::with_capacity(haystack.len());
        let mut last = 0;
        let mut rewrites = 0;

        for caps in self.pattern.captures_iter(&haystack) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let Some(replacement) = self.replace(&caps, whole, &haystack, doc) else {
                continue;
            };
            out.push_str(&haystack[last..whole.start()]);
            out.push_str(&replacement);
            last = whole.end();
            rewrites += 1;
        }

        if rewrites == 0 {
            doc.set_text(haystack);
        } else {
            out.push_str(&haystack[last..]);
            doc.set_text(out);
        }
        rewrites
    }

    fn replace(
        &self,
        caps: &Captures<'_>,
        whole: Match<'_>,
        haystack: &str,
        doc: &mut Document,
    ) -> Option<String> {
        match self.replacement {
            Replacement::Template(template) => Some(expand(caps, template)),
            Replacement::Guarded { template, guard } => {
                guard(haystack, whole).then(|| expand(caps, template))
            }
            Replacement::Rewrite(rewriter) => rewriter(caps, haystack),
            Replacement::Shelve => {
                let content = caps.get(1).map_or("", |m| m.as_str());
                Some(doc.shelve(content))
            }
            Replacement::Restore => {
                let index = caps.get(1)?.as_str().parse::<usize>().ok()?;
                doc.unshelve(index)
            }
        }
    }
}

fn expand(caps: &Captures<'_>, template: &str) -> String {
    let mut dst = String::new();
    caps.expand(template, &mut dst);
    dst
}

/// A rule that rewrote something during a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleHit {
    pub name: &'static str,
    pub group: RuleGroup,
    pub rewrites: usize,
}

/// Ordered, immutable sequence of rules
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile `specs` in order. Order is preserved exactly.
    pub fn compile(specs: &[RuleSpec]) -> Result<Self, RuleError> {
        let rules = specs.iter().map(Rule::compile).collect::<Result<_, _>>()?;
        Ok(RuleSet { rules })
    }

    /// The standard Markdown to WhatsApp table, compiled once per process.
    pub fn standard() -> &'static RuleSet {
        &table::STANDARD
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(Rule::name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Convert `input`. Empty or whitespace-only input short-circuits to an empty string.
    pub fn convert(&self, input: &str) -> String {
        let mut doc = Document::new(input);
        self.run(&mut doc);
        doc.into_text()
    }

    /// Run every rule over `doc`, in order.
    pub fn run(&self, doc: &mut Document) {
        self.drive(doc, |_| {});
    }

    /// Like [`RuleSet::run`], but report every rule that changed the text.
    pub fn run_traced(&self, doc: &mut Document) -> Vec<RuleHit> {
        let mut hits = Vec::new();
        self.drive(doc, |hit| hits.push(hit));
        hits
    }

    fn drive(&self, doc: &mut Document, mut on_hit: impl FnMut(RuleHit)) {
        if doc.is_blank() {
            doc.set_text(String::new());
            return;
        }

        let mut group = None;
        for rule in &self.rules {
            if group != Some(rule.group) {
                log::trace!("entering rule group {}", rule.group);
                group = Some(rule.group);
            }

            let before = doc.text().len();
            let rewrites = rule.apply(doc);
            if rewrites > 0 {
                log::debug!(
                    "rule {} rewrote {} match(es), {} -> {} bytes",
                    rule.name,
                    rewrites,
                    before,
                    doc.text().len()
                );
                on_hit(RuleHit {
                    name: rule.name,
                    group: rule.group,
                    rewrites,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &'static str, pattern: &'static str, replacement: Replacement) -> RuleSpec {
        RuleSpec {
            name,
            group: RuleGroup::Emphasis,
            pattern,
            replacement,
        }
    }

    fn never(_: &str, _: Match<'_>) -> bool {
        false
    }

    #[test]
    fn test_compile_reports_rule_name() {
        let err = RuleSet::compile(&[spec("broken", r"(unclosed", Replacement::Template(""))])
            .unwrap_err();
        assert_eq!(err.rule, "broken");
        assert!(err.to_string().starts_with("Rule 'broken' failed to compile"));
    }

    #[test]
    fn test_template_rewrites_every_match() {
        let rule = Rule::compile(&spec("x", r"a(\d)", Replacement::Template("<${1}>"))).unwrap();
        let mut doc = Document::new("a1 b a2 a3");

        assert_eq!(rule.apply(&mut doc), 3);
        assert_eq!(doc.text(), "<1> b <2> <3>");
    }

    #[test]
    fn test_declined_guard_leaves_text_alone() {
        let rule = Rule::compile(&spec(
            "x",
            r"a",
            Replacement::Guarded {
                template: "b",
                guard: never,
            },
        ))
        .unwrap();
        let mut doc = Document::new("aaa");

        assert_eq!(rule.apply(&mut doc), 0);
        assert_eq!(doc.text(), "aaa");
    }

    #[test]
    fn test_shelve_then_restore() {
        let set = RuleSet::compile(&[
            spec("shelve", r"`([^`]+)`", Replacement::Shelve),
            spec("star", r"\*", Replacement::Template("+")),
            spec("restore", r"\x{E000}([0-9]+)\x{E001}", Replacement::Restore),
        ])
        .unwrap();

        assert_eq!(set.convert("*a* `*b*`"), "+a+ *b*");
    }

    #[test]
    fn test_input_delimiters_survive_restore() {
        let set = RuleSet::compile(&[spec(
            "restore",
            r"\x{E000}([0-9]+)\x{E001}",
            Replacement::Restore,
        )])
        .unwrap();

        assert_eq!(set.convert("x \u{E000}7\u{E001}"), "x \u{E000}7\u{E001}");
    }

    #[test]
    fn test_order_is_execution_order() {
        let ab = RuleSet::compile(&[
            spec("a_to_b", "a", Replacement::Template("b")),
            spec("b_to_c", "b", Replacement::Template("c")),
        ])
        .unwrap();
        let ba = RuleSet::compile(&[
            spec("b_to_c", "b", Replacement::Template("c")),
            spec("a_to_b", "a", Replacement::Template("b")),
        ])
        .unwrap();

        assert_eq!(ab.convert("a"), "c");
        assert_eq!(ba.convert("a"), "b");
        assert_eq!(ab.names(), vec!["a_to_b", "b_to_c"]);
    }

    #[test]
    fn test_blank_input_runs_nothing() {
        let set = RuleSet::compile(&[spec("space", r"\s", Replacement::Template("_"))]).unwrap();
        let mut doc = Document::new("  \n ");

        assert!(set.run_traced(&mut doc).is_empty());
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn test_run_traced_reports_changing_rules() {
        let set = RuleSet::compile(&[
            spec("hits", "a", Replacement::Template("b")),
            spec("misses", "z", Replacement::Template("y")),
        ])
        .unwrap();
        let mut doc = Document::new("aa");
        let hits = set.run_traced(&mut doc);

        assert_eq!(
            hits,
            vec![RuleHit {
                name: "hits",
                group: RuleGroup::Emphasis,
                rewrites: 2
            }]
        );
    }
}
