//! Token counting for window budget checks.
//!
//! The counting contract is deliberately loose: a counter must be pure,
//! deterministic, and monotonically non-decreasing in input length. The
//! buffer only compares counts against a ceiling, so an approximation is
//! acceptable wherever exact model tokenization is not worth the weight.

/// Capability trait for estimating the model-token length of text.
pub trait TokenCounter: Send + Sync {
    /// Estimated token count for `text`.
    fn count(&self, text: &str) -> usize;
}

/// Character-based approximation (n chars ≈ 1 token).
///
/// Conservative and dependency-free. Counts `char`s rather than bytes so
/// multi-byte scripts are not over-billed.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicCounter {
    chars_per_token: usize,
}

impl HeuristicCounter {
    /// Creates a counter with a custom chars-per-token ratio.
    ///
    /// A ratio of zero is clamped to one.
    pub fn new(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }
}

impl Default for HeuristicCounter {
    fn default() -> Self {
        Self::new(4)
    }
}

impl TokenCounter for HeuristicCounter {
    fn count(&self, text: &str) -> usize {
        text.chars().count().div_ceil(self.chars_per_token)
    }
}

/// Real BPE counting via the `cl100k_base` encoding.
#[cfg(feature = "bpe")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BpeCounter;

/// Cached BPE encoder — loaded once, reused on every call.
#[cfg(feature = "bpe")]
#[allow(clippy::expect_used)]
fn encoder() -> &'static tiktoken_rs::CoreBPE {
    use std::sync::OnceLock;
    static BPE: OnceLock<tiktoken_rs::CoreBPE> = OnceLock::new();
    BPE.get_or_init(|| {
        tiktoken_rs::cl100k_base().expect("cl100k_base data is bundled with tiktoken-rs")
    })
}

#[cfg(feature = "bpe")]
impl TokenCounter for BpeCounter {
    fn count(&self, text: &str) -> usize {
        encoder().encode_with_special_tokens(text).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_rounds_up() {
        let counter = HeuristicCounter::default();
        assert_eq!(counter.count(""), 0);
        assert_eq!(counter.count("abcd"), 1);
        assert_eq!(counter.count("abcde"), 2);
    }

    #[test]
    fn heuristic_counts_chars_not_bytes() {
        let counter = HeuristicCounter::new(1);
        assert_eq!(counter.count("日本語"), 3);
    }

    #[test]
    fn heuristic_is_monotonic() {
        let counter = HeuristicCounter::default();
        assert!(counter.count("aaaa") <= counter.count("aaaaaaaa"));
    }

    #[test]
    fn zero_ratio_is_clamped() {
        let counter = HeuristicCounter::new(0);
        assert_eq!(counter.count("ab"), 2);
    }

    #[cfg(feature = "bpe")]
    #[test]
    fn bpe_counts_and_is_deterministic() {
        let counter = BpeCounter;
        let n = counter.count("The quick brown fox jumps over the lazy dog.");
        assert!(n > 0);
        assert_eq!(n, counter.count("The quick brown fox jumps over the lazy dog."));
    }

    #[cfg(feature = "bpe")]
    #[test]
    fn bpe_grows_with_input() {
        let counter = BpeCounter;
        let short = counter.count("hello");
        let long = counter.count("hello hello hello hello hello");
        assert!(long > short);
    }
}
