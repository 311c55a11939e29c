//! Token admission filter.

use std::collections::HashSet;

/// Decides whether a token (or whole cell) is worth searching at all.
/// Fails open: anything not explicitly excluded is kept.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    noise_words: HashSet<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_noise_words(words: impl IntoIterator<Item = String>) -> Self {
        Self {
            noise_words: words.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// `prefix` is reserved for callers that want context-sensitive
    /// filtering (e.g. don't drop a short token that follows an airline
    /// code); the minimum viable implementation ignores it.
    pub fn should_keep(&self, _prefix: &str, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        if token.chars().all(|c| c.is_ascii_digit()) && token.chars().count() < 2 {
            return false;
        }
        if self.noise_words.contains(&token.to_lowercase()) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_dropped() {
        assert!(!Filter::new().should_keep("", ""));
    }

    #[test]
    fn test_single_digit_is_dropped() {
        assert!(!Filter::new().should_keep("", "7"));
    }

    #[test]
    fn test_two_digit_number_is_kept() {
        assert!(Filter::new().should_keep("", "42"));
    }

    #[test]
    fn test_ordinary_word_is_kept() {
        assert!(Filter::new().should_keep("", "nice"));
    }

    #[test]
    fn test_noise_word_is_dropped() {
        let filter = Filter::with_noise_words(["the".to_string()]);
        assert!(!filter.should_keep("", "THE"));
    }
}
