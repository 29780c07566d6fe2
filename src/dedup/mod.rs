//! Token-set duplicate detection.
//!
//! Near-duplicates are detected with Jaccard similarity over word-token
//! sets: cheap, language-agnostic, and tolerant of rewording, casing, and
//! punctuation differences without a learned model. The same algorithm and
//! threshold are used whether the comparison corpus is the static bank or
//! the already-ingested dynamic store.

use std::collections::HashSet;

use tracing::instrument;

/// Similarity at or above this counts as a duplicate.
///
/// Chosen empirically as a balance between catching rephrased duplicates
/// and not collapsing genuinely distinct questions that merely share
/// common words.
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.6;

/// Splits text into a set of lowercase word tokens.
///
/// Splits on any run of non-alphanumeric characters and drops tokens of
/// one character or less; duplicates within one text collapse.
#[must_use]
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() > 1)
        .map(ToString::to_string)
        .collect()
}

/// Jaccard similarity of two token sets: |A ∩ B| / |A ∪ B|.
///
/// Defined as 0.0 when the union is empty.
#[must_use]
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Threshold-gated near-duplicate check over a comparison corpus.
#[derive(Debug, Clone, Copy)]
pub struct DuplicateDetector {
    threshold: f64,
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self::new(DEFAULT_DUPLICATE_THRESHOLD)
    }
}

impl DuplicateDetector {
    /// Creates a detector with a custom similarity threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// The configured similarity threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// True when any corpus text is at or above the similarity threshold.
    ///
    /// Short-circuits on the first match; the maximum similarity across
    /// the corpus is never computed.
    #[instrument(skip_all, fields(threshold = self.threshold))]
    pub fn is_duplicate<'t>(
        &self,
        candidate: &str,
        corpus: impl IntoIterator<Item = &'t str>,
    ) -> bool {
        let candidate_tokens = tokenize(candidate);
        corpus
            .into_iter()
            .any(|text| jaccard(&candidate_tokens, &tokenize(text)) >= self.threshold)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> HashSet<String> {
        tokenize(text)
    }

    #[test]
    fn test_tokenize_lowercases_and_splits_on_punctuation() {
        let set = tokens("Explain async/await in C#!");
        assert!(set.contains("explain"));
        assert!(set.contains("async"));
        assert!(set.contains("await"));
        assert!(set.contains("in"));
    }

    #[test]
    fn test_tokenize_drops_single_character_tokens() {
        let set = tokens("a c# question");
        assert!(!set.contains("a"));
        assert!(!set.contains("c"));
        assert!(set.contains("question"));
    }

    #[test]
    fn test_tokenize_collapses_repeated_words() {
        let set = tokens("queue queue QUEUE");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_jaccard_symmetric() {
        let a = tokens("how does garbage collection work");
        let b = tokens("explain how garbage collection runs");
        let left = jaccard(&a, &b);
        let right = jaccard(&b, &a);
        assert!((left - right).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jaccard_identical_text_is_one() {
        let a = tokens("what is a deadlock");
        let similarity = jaccard(&a, &a);
        assert!((similarity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jaccard_disjoint_sets_is_zero() {
        let a = tokens("binary search trees");
        let b = tokens("docker container images");
        assert!(jaccard(&a, &b).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jaccard_empty_union_is_zero() {
        let a = tokens("");
        let b = tokens("! ? .");
        assert!(jaccard(&a, &b).abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_duplicate_of_itself() {
        let detector = DuplicateDetector::default();
        let text = "How does the borrow checker prevent data races?";
        assert!(
            detector.is_duplicate(text, [text]),
            "identical text has similarity 1.0, which must exceed the threshold"
        );
    }

    #[test]
    fn test_is_duplicate_rephrased_question() {
        let detector = DuplicateDetector::default();
        let candidate = "How does a hash table resolve collisions?";
        let corpus = ["how does a hash table resolve key collisions"];
        assert!(detector.is_duplicate(candidate, corpus));
    }

    #[test]
    fn test_is_not_duplicate_distinct_question() {
        let detector = DuplicateDetector::default();
        let candidate = "What is the difference between TCP and UDP?";
        let corpus = ["How does a hash table resolve collisions?"];
        assert!(!detector.is_duplicate(candidate, corpus));
    }

    #[test]
    fn test_is_duplicate_empty_corpus_is_false() {
        let detector = DuplicateDetector::default();
        assert!(!detector.is_duplicate("anything", std::iter::empty()));
    }

    #[test]
    fn test_custom_threshold_changes_verdict() {
        let candidate = "explain database indexing strategies";
        let corpus = ["explain database sharding strategies"];
        // intersection 3, union 5 = 0.6 exactly
        let strict = DuplicateDetector::new(0.7);
        let loose = DuplicateDetector::new(0.5);
        assert!(!strict.is_duplicate(candidate, corpus));
        assert!(loose.is_duplicate(candidate, corpus));
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        // intersection 3, union 5 = 0.6: exactly at the threshold counts
        let detector = DuplicateDetector::new(0.6);
        assert!(detector.is_duplicate(
            "explain database indexing strategies",
            ["explain database sharding strategies"]
        ));
    }

    // Short questions have few distinct tokens after filtering, so chance
    // overlap inflates similarity; these pin the behavior at the edge.

    #[test]
    fn test_short_questions_with_heavy_overlap_stay_distinct() {
        let detector = DuplicateDetector::default();
        // {what, is, rest} vs {what, is, grpc}: intersection 2, union 4 = 0.5.
        assert!(!detector.is_duplicate("What is REST?", ["What is gRPC?"]));
    }

    #[test]
    fn test_short_questions_differing_only_in_noise_are_duplicates() {
        let detector = DuplicateDetector::default();
        // Punctuation and casing do not rescue a token-identical question.
        assert!(detector.is_duplicate("What is REST?", ["what IS rest!!"]));
    }

    #[test]
    fn test_two_token_questions_do_not_collide_on_one_shared_word() {
        let detector = DuplicateDetector::default();
        // {explain, caching} vs {explain, sharding}: 1/3 < 0.6.
        assert!(!detector.is_duplicate("Explain caching", ["Explain sharding"]));
    }

    #[test]
    fn test_short_questions_can_false_positive_on_shared_scaffolding() {
        let detector = DuplicateDetector::default();
        // {how, to, test, async, code} vs {how, to, test, sync, code}:
        // intersection 4, union 6 = 0.67. Genuinely distinct questions,
        // flagged anyway; known cost of token-set similarity on short text.
        assert!(detector.is_duplicate("How to test async code", ["How to test sync code"]));
    }
}
