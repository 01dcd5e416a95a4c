//! Word counting
//!
//! The count is a display metric over the raw input and is independent of the rule table.

use std::fmt;

/// Number of whitespace-separated tokens in `text`. Zero for empty or whitespace-only text.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Thresholds for [`WordBudget::classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordLimits {
    /// Counts above this are a warning.
    pub warn_at: usize,
    /// Counts above this are over the limit.
    pub limit: usize,
}

impl Default for WordLimits {
    fn default() -> Self {
        WordLimits {
            warn_at: 3000,
            limit: 5000,
        }
    }
}

/// How a word count sits against the configured limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordBudget {
    Within,
    Warning,
    Over,
}

impl WordBudget {
    pub fn classify(count: usize, limits: &WordLimits) -> Self {
        if count > limits.limit {
            WordBudget::Over
        } else if count > limits.warn_at {
            WordBudget::Warning
        } else {
            WordBudget::Within
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WordBudget::Within => "within",
            WordBudget::Warning => "warning",
            WordBudget::Over => "over",
        }
    }
}

impl fmt::Display for WordBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words(" \n\t "), 0);
        assert_eq!(count_words("  a   b "), 2);
        assert_eq!(count_words("one\ntwo\r\nthree"), 3);
        assert_eq!(count_words("**bold** — dash"), 3);
    }

    #[test]
    fn test_classify_boundaries() {
        let limits = WordLimits::default();

        assert_eq!(WordBudget::classify(0, &limits), WordBudget::Within);
        assert_eq!(WordBudget::classify(3000, &limits), WordBudget::Within);
        assert_eq!(WordBudget::classify(3001, &limits), WordBudget::Warning);
        assert_eq!(WordBudget::classify(5000, &limits), WordBudget::Warning);
        assert_eq!(WordBudget::classify(5001, &limits), WordBudget::Over);
    }

    #[test]
    fn test_budget_display() {
        assert_eq!(WordBudget::Over.to_string(), "over");
        assert_eq!(WordBudget::Within.to_string(), "within");
    }
}
