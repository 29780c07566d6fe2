//! Topic keyword tables driving classification.

/// Sentinel topic id assigned when no keyword matches.
pub const UNKNOWN_TOPIC_ID: &str = "unknown";

/// Display name of the sentinel topic.
pub const UNKNOWN_TOPIC_NAME: &str = "Unclassified";

/// One topic's classification entry: identifier, display name, and the
/// ordered keyword list matched against question text.
#[derive(Debug, Clone)]
pub struct TopicKeywords {
    /// Stable topic identifier (kebab-case).
    pub id: String,
    /// Human-readable topic name.
    pub name: String,
    /// Keywords, stored lowercase. Keywords of three characters or fewer
    /// are matched whole-word; longer ones by substring containment.
    pub keywords: Vec<String>,
}

impl TopicKeywords {
    /// Creates an entry, lowercasing all keywords.
    #[must_use]
    pub fn new(id: &str, name: &str, keywords: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            keywords: keywords.iter().map(|kw| kw.to_lowercase()).collect(),
        }
    }
}

/// Immutable topic→keywords configuration.
///
/// Constructed once at startup and passed by reference into the
/// classifier; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    topics: Vec<TopicKeywords>,
}

impl KeywordTable {
    /// Creates a table from custom entries.
    #[must_use]
    pub fn new(topics: Vec<TopicKeywords>) -> Self {
        Self { topics }
    }

    /// The built-in production keyword table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            TopicKeywords::new(
                "algorithms",
                "Algorithms",
                &[
                    "algorithm",
                    "sorting",
                    "binary search",
                    "recursion",
                    "complexity",
                    "big o",
                    "dynamic programming",
                    "greedy",
                    "traversal",
                ],
            ),
            TopicKeywords::new(
                "concurrency",
                "Concurrency",
                &[
                    "async",
                    "await",
                    "thread",
                    "mutex",
                    "deadlock",
                    "race condition",
                    "semaphore",
                    "parallel",
                    "atomic",
                    "goroutine",
                ],
            ),
            TopicKeywords::new(
                "data-structures",
                "Data Structures",
                &[
                    "array",
                    "linked list",
                    "hash map",
                    "hash table",
                    "stack",
                    "queue",
                    "heap",
                    "binary tree",
                    "trie",
                    "dictionary",
                ],
            ),
            TopicKeywords::new(
                "databases",
                "Databases",
                &[
                    "sql",
                    "database",
                    "transaction",
                    "normalization",
                    "acid",
                    "indexing",
                    "replication",
                    "nosql",
                    "join",
                ],
            ),
            TopicKeywords::new(
                "devops",
                "DevOps & Infrastructure",
                &[
                    "docker",
                    "kubernetes",
                    "container",
                    "deployment",
                    "terraform",
                    "observability",
                    "incident",
                    "rollback",
                ],
            ),
            TopicKeywords::new(
                "memory-management",
                "Memory Management",
                &[
                    "gc",
                    "garbage collection",
                    "memory leak",
                    "pointer",
                    "allocation",
                    "ownership",
                    "borrow checker",
                    "reference counting",
                ],
            ),
            TopicKeywords::new(
                "networking",
                "Networking",
                &[
                    "http",
                    "tcp",
                    "udp",
                    "dns",
                    "tls",
                    "socket",
                    "websocket",
                    "grpc",
                    "load balancer",
                ],
            ),
            TopicKeywords::new(
                "oop",
                "Object-Oriented Design",
                &[
                    "inheritance",
                    "polymorphism",
                    "encapsulation",
                    "interface",
                    "abstract class",
                    "composition",
                    "design pattern",
                    "solid",
                ],
            ),
            TopicKeywords::new(
                "security",
                "Security",
                &[
                    "authentication",
                    "authorization",
                    "encryption",
                    "xss",
                    "csrf",
                    "oauth",
                    "jwt",
                    "injection",
                    "hashing",
                ],
            ),
            TopicKeywords::new(
                "system-design",
                "System Design",
                &[
                    "scalability",
                    "microservice",
                    "sharding",
                    "caching",
                    "message queue",
                    "distributed",
                    "consistency",
                    "availability",
                    "rate limiting",
                ],
            ),
            TopicKeywords::new(
                "testing",
                "Testing",
                &[
                    "unit test",
                    "integration test",
                    "mocking",
                    "tdd",
                    "assertion",
                    "coverage",
                    "fixture",
                    "regression",
                ],
            ),
            TopicKeywords::new(
                "web",
                "Web Development",
                &[
                    "javascript",
                    "typescript",
                    "css",
                    "html",
                    "dom",
                    "react",
                    "frontend",
                    "browser",
                    "cors",
                ],
            ),
        ])
    }

    /// All topic entries, in table order.
    #[must_use]
    pub fn topics(&self) -> &[TopicKeywords] {
        &self.topics
    }

    /// Looks up a topic entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TopicKeywords> {
        self.topics.iter().find(|topic| topic.id == id)
    }

    /// Display name for a topic id, when the table knows it.
    #[must_use]
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.get(id).map(|topic| topic.name.as_str())
    }
}
