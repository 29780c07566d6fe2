//! Tag normalization for classified questions.

use std::collections::HashSet;

/// Normalizes a tag list: trim, lowercase, case-insensitive dedupe, sort.
///
/// Applied to the union of matched keywords and a question's original
/// tags so the persisted tag set is deterministic.
#[must_use]
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();

    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            continue;
        }
        if seen.insert(tag.clone()) {
            normalized.push(tag);
        }
    }

    normalized.sort();
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags_lowercases_and_sorts() {
        let tags = vec![
            "Mutex".to_string(),
            "ASYNC".to_string(),
            "deadlock".to_string(),
        ];
        assert_eq!(normalize_tags(tags), vec!["async", "deadlock", "mutex"]);
    }

    #[test]
    fn test_normalize_tags_dedupes_case_insensitively() {
        let tags = vec![
            "async".to_string(),
            "Async".to_string(),
            "ASYNC".to_string(),
        ];
        assert_eq!(normalize_tags(tags), vec!["async"]);
    }

    #[test]
    fn test_normalize_tags_trims_and_drops_empty() {
        let tags = vec![
            "  await ".to_string(),
            String::new(),
            "   ".to_string(),
        ];
        assert_eq!(normalize_tags(tags), vec!["await"]);
    }

    #[test]
    fn test_normalize_tags_is_idempotent() {
        let raw = vec![
            "  Race Condition ".to_string(),
            "race condition".to_string(),
            "Mutex".to_string(),
        ];
        let once = normalize_tags(raw);
        let twice = normalize_tags(once.clone());
        assert_eq!(once, twice);
    }
}
