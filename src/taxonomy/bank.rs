//! The fixed, hand-authored question bank.

use crate::store::Difficulty;

/// One curated question in the static bank.
#[derive(Debug, Clone)]
pub struct StaticQuestion {
    /// Question text.
    pub text: String,
    /// Expected answer.
    pub answer: String,
    /// Curated difficulty.
    pub difficulty: Difficulty,
    /// Curated tags.
    pub tags: Vec<String>,
}

impl StaticQuestion {
    fn new(text: &str, answer: &str, difficulty: Difficulty, tags: &[&str]) -> Self {
        Self {
            text: text.to_string(),
            answer: answer.to_string(),
            difficulty,
            tags: tags.iter().map(ToString::to_string).collect(),
        }
    }
}

/// One entry in the fixed taxonomy: a topic with its curated questions
/// and key concepts.
#[derive(Debug, Clone)]
pub struct StaticTopicArea {
    /// Topic identifier, matching the keyword table where both exist.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Curated questions, in authoring order.
    pub questions: Vec<StaticQuestion>,
    /// Key concepts a candidate should know for this topic.
    pub key_concepts: Vec<String>,
}

/// The full static question bank. Loaded once at startup, never persisted
/// or mutated by this subsystem.
#[derive(Debug, Clone)]
pub struct StaticBank {
    areas: Vec<StaticTopicArea>,
}

impl StaticBank {
    /// Creates a bank from custom areas.
    #[must_use]
    pub fn new(areas: Vec<StaticTopicArea>) -> Self {
        Self { areas }
    }

    /// The built-in curated bank.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            StaticTopicArea {
                id: "algorithms".to_string(),
                name: "Algorithms".to_string(),
                questions: vec![
                    StaticQuestion::new(
                        "Walk through how binary search works and state its time complexity",
                        "Repeatedly halve a sorted range around a probe index; O(log n) comparisons.",
                        Difficulty::Junior,
                        &["binary search", "complexity"],
                    ),
                    StaticQuestion::new(
                        "When would you reach for dynamic programming over a greedy approach?",
                        "When subproblems overlap and local choices do not compose into a global optimum; memoize or tabulate instead.",
                        Difficulty::Mid,
                        &["dynamic programming", "greedy"],
                    ),
                    StaticQuestion::new(
                        "Compare depth-first and breadth-first traversal and when each is preferable",
                        "DFS uses a stack and suits reachability and topological problems; BFS uses a queue and finds shortest unweighted paths.",
                        Difficulty::Junior,
                        &["traversal", "graphs"],
                    ),
                ],
                key_concepts: vec![
                    "complexity analysis".to_string(),
                    "divide and conquer".to_string(),
                    "dynamic programming".to_string(),
                ],
            },
            StaticTopicArea {
                id: "concurrency".to_string(),
                name: "Concurrency".to_string(),
                questions: vec![
                    StaticQuestion::new(
                        "What is a deadlock and what conditions are required for one to occur?",
                        "Mutual exclusion, hold-and-wait, no preemption, and circular wait; break any one to prevent it.",
                        Difficulty::Mid,
                        &["deadlock", "locking"],
                    ),
                    StaticQuestion::new(
                        "Explain the difference between a mutex and a semaphore",
                        "A mutex grants exclusive ownership to one holder; a semaphore counts permits and admits up to N holders.",
                        Difficulty::Mid,
                        &["mutex", "semaphore"],
                    ),
                ],
                key_concepts: vec![
                    "synchronization primitives".to_string(),
                    "data races".to_string(),
                    "async execution".to_string(),
                ],
            },
            StaticTopicArea {
                id: "data-structures".to_string(),
                name: "Data Structures".to_string(),
                questions: vec![
                    StaticQuestion::new(
                        "How does a hash table resolve collisions?",
                        "Separate chaining stores colliding entries in per-bucket lists; open addressing probes alternative slots.",
                        Difficulty::Junior,
                        &["hash table", "collisions"],
                    ),
                    StaticQuestion::new(
                        "Why choose a heap over a sorted array for a priority queue?",
                        "A heap gives O(log n) insert and pop-min without maintaining total order; a sorted array pays O(n) per insert.",
                        Difficulty::Mid,
                        &["heap", "priority queue"],
                    ),
                ],
                key_concepts: vec![
                    "hashing".to_string(),
                    "trees and heaps".to_string(),
                    "amortized cost".to_string(),
                ],
            },
            StaticTopicArea {
                id: "databases".to_string(),
                name: "Databases".to_string(),
                questions: vec![
                    StaticQuestion::new(
                        "What do the ACID properties guarantee for a transaction?",
                        "Atomicity, consistency, isolation, and durability: all-or-nothing effects that survive crashes.",
                        Difficulty::Junior,
                        &["acid", "transactions"],
                    ),
                    StaticQuestion::new(
                        "How does an index speed up queries, and what does it cost?",
                        "An index trades extra writes and storage for sublinear lookups over the indexed columns.",
                        Difficulty::Mid,
                        &["indexing", "query planning"],
                    ),
                ],
                key_concepts: vec![
                    "transactions".to_string(),
                    "indexing".to_string(),
                    "normalization".to_string(),
                ],
            },
            StaticTopicArea {
                id: "system-design".to_string(),
                name: "System Design".to_string(),
                questions: vec![
                    StaticQuestion::new(
                        "Design a URL shortener: what are the core components and trade-offs?",
                        "Key generation, a redirect path optimized for reads, and a storage layer partitioned for growth.",
                        Difficulty::Senior,
                        &["sharding", "caching"],
                    ),
                    StaticQuestion::new(
                        "How would you add horizontal scalability to a stateful service?",
                        "Externalize state, shard by a stable key, and route with consistent hashing behind a load balancer.",
                        Difficulty::Senior,
                        &["scalability", "sharding"],
                    ),
                ],
                key_concepts: vec![
                    "scalability".to_string(),
                    "consistency trade-offs".to_string(),
                    "capacity planning".to_string(),
                ],
            },
        ])
    }

    /// All topic areas, in authoring order.
    #[must_use]
    pub fn areas(&self) -> &[StaticTopicArea] {
        &self.areas
    }

    /// Looks up an area by topic id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StaticTopicArea> {
        self.areas.iter().find(|area| area.id == id)
    }

    /// Total curated question count across all areas.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.areas.iter().map(|area| area.questions.len()).sum()
    }

    /// Question texts of all curated questions, for duplicate comparison.
    pub fn question_texts(&self) -> impl Iterator<Item = &str> {
        self.areas
            .iter()
            .flat_map(|area| area.questions.iter().map(|q| q.text.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bank_has_unique_area_ids() {
        let bank = StaticBank::builtin();
        let mut ids: Vec<&str> = bank.areas().iter().map(|a| a.id.as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before, "area ids must be unique");
    }

    #[test]
    fn test_builtin_areas_are_nonempty() {
        let bank = StaticBank::builtin();
        assert!(!bank.areas().is_empty());
        for area in bank.areas() {
            assert!(
                !area.questions.is_empty(),
                "area '{}' must have curated questions",
                area.id
            );
            assert!(
                !area.key_concepts.is_empty(),
                "area '{}' must have key concepts",
                area.id
            );
        }
    }

    #[test]
    fn test_question_count_sums_all_areas() {
        let bank = StaticBank::builtin();
        let by_iter = bank.question_texts().count();
        assert_eq!(bank.question_count(), by_iter);
    }

    #[test]
    fn test_get_finds_area() {
        let bank = StaticBank::builtin();
        assert_eq!(bank.get("databases").unwrap().name, "Databases");
        assert!(bank.get("no-such-area").is_none());
    }
}
