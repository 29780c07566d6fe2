//! Record types for the scraped-question store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inferred seniority level of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Entry-level question.
    Junior,
    /// Mid-level question; the default when no seniority markers match.
    Mid,
    /// Senior/staff-level question.
    Senior,
}

impl Difficulty {
    /// Returns the wire string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Mid => "mid",
            Self::Senior => "senior",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "junior" => Ok(Self::Junior),
            "mid" => Ok(Self::Mid),
            "senior" => Ok(Self::Senior),
            _ => Err(format!("invalid difficulty: {s}")),
        }
    }
}

/// One externally scraped question, exactly as the scraper produced it.
///
/// Content is untrusted free text; the pipeline never mutates a raw
/// question, it only reads it and embeds a copy into accepted records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    /// Scraper-assigned identifier.
    pub id: String,
    /// The question text itself.
    pub text: String,
    /// Free-text hint about the topic area, if the source provided one.
    #[serde(default)]
    pub topic_hint: String,
    /// Best or expected answer text.
    #[serde(default)]
    pub answer: String,
    /// Free-text tags from the source.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Seniority context text (e.g. "asked in a senior backend interview").
    #[serde(default)]
    pub seniority: String,
    /// Company the question was reportedly asked at.
    #[serde(default)]
    pub company: String,
    /// When the question was scraped, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<DateTime<Utc>>,
    /// Upvote count on the source site.
    #[serde(default)]
    pub upvotes: u32,
    /// Source site name.
    #[serde(default)]
    pub source: String,
    /// Link back to the source page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// An accepted scraped question with its classification outcome.
///
/// Created by the classifier; novelty is set by the ingestion pipeline at
/// the moment the record is accepted. Immutable afterwards — the store
/// only ever appends new records, it never edits one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedQuestion {
    /// The original scraped question, embedded by value.
    pub question: RawQuestion,
    /// Assigned topic identifier (a keyword-table key, or `unknown`).
    pub topic_id: String,
    /// Display name of the assigned topic.
    pub topic_name: String,
    /// Classification confidence in [0, 100].
    pub confidence: f64,
    /// Inferred difficulty.
    pub difficulty: Difficulty,
    /// Sorted, deduplicated union of matched keywords and original tags.
    pub tags: Vec<String>,
    /// True once the ingestion pipeline accepted the record as novel.
    pub is_novel: bool,
}
