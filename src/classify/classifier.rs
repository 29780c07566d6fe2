//! Keyword-driven topic classification for scraped questions.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{instrument, warn};

use crate::store::{ClassifiedQuestion, Difficulty, RawQuestion};
use crate::taxonomy::{KeywordTable, TopicKeywords, UNKNOWN_TOPIC_ID, UNKNOWN_TOPIC_NAME};

use super::tags::normalize_tags;

/// Keyword-hit counts saturate here; confidence reaches 100 only as the
/// hit count approaches this cap.
const HIT_CAP: usize = 8;

/// Seniority markers checked first; any hit classifies as senior.
const SENIOR_MARKERS: &[&str] = &["senior", "lead", "principal", "architect", "staff"];

/// Checked only when no senior marker matched.
const JUNIOR_MARKERS: &[&str] = &["junior", "entry level", "entry-level", "graduate", "beginner"];

/// Errors from classifying a single question.
#[derive(Debug, Clone, Error)]
pub enum ClassifyError {
    /// The question has no text to build a search corpus from.
    #[error("question '{id}' has no text to classify")]
    EmptyQuestion {
        /// Identifier of the offending question.
        id: String,
    },
}

/// Assigns a topic, confidence, difficulty, and tag set to raw questions
/// using only the keyword table and simple text matching.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    table: &'a KeywordTable,
}

impl<'a> Classifier<'a> {
    /// Creates a classifier over a keyword table.
    #[must_use]
    pub fn new(table: &'a KeywordTable) -> Self {
        Self { table }
    }

    /// Classifies one raw question.
    ///
    /// The topic with the most keyword hits wins; ties go to the
    /// lexicographically smallest topic id. No hits at all yields the
    /// sentinel `unknown` topic with confidence 0, which is a valid
    /// outcome, not an error.
    ///
    /// # Errors
    /// Returns [`ClassifyError::EmptyQuestion`] when the question text is
    /// blank.
    #[instrument(skip_all, fields(id = %raw.id))]
    pub fn classify(&self, raw: &RawQuestion) -> Result<ClassifiedQuestion, ClassifyError> {
        if raw.text.trim().is_empty() {
            return Err(ClassifyError::EmptyQuestion { id: raw.id.clone() });
        }

        let corpus = build_corpus(raw);
        let words: HashSet<&str> = corpus
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();

        let mut winner: Option<(&TopicKeywords, usize)> = None;
        for topic in self.table.topics() {
            let hits = topic
                .keywords
                .iter()
                .filter(|keyword| keyword_matches(keyword, &corpus, &words))
                .count();
            if hits == 0 {
                continue;
            }
            let better = match winner {
                None => true,
                Some((best, best_hits)) => {
                    hits > best_hits || (hits == best_hits && topic.id < best.id)
                }
            };
            if better {
                winner = Some((topic, hits));
            }
        }

        let (topic_id, topic_name, hits, matched) = match winner {
            Some((topic, hits)) => {
                let matched: Vec<String> = topic
                    .keywords
                    .iter()
                    .filter(|keyword| keyword_matches(keyword, &corpus, &words))
                    .cloned()
                    .collect();
                (topic.id.clone(), topic.name.clone(), hits, matched)
            }
            None => (
                UNKNOWN_TOPIC_ID.to_string(),
                UNKNOWN_TOPIC_NAME.to_string(),
                0,
                Vec::new(),
            ),
        };

        let mut tags = matched;
        tags.extend(raw.tags.iter().cloned());

        Ok(ClassifiedQuestion {
            question: raw.clone(),
            topic_id,
            topic_name,
            confidence: confidence(hits),
            difficulty: infer_difficulty(&raw.seniority, &corpus),
            tags: normalize_tags(tags),
            is_novel: false,
        })
    }

    /// Classifies a batch, skipping and logging items that fail.
    ///
    /// Failure accounting is the orchestrator's job; this only keeps the
    /// batch going.
    #[must_use]
    pub fn classify_batch(&self, raws: &[RawQuestion]) -> Vec<ClassifiedQuestion> {
        raws.iter()
            .filter_map(|raw| match self.classify(raw) {
                Ok(classified) => Some(classified),
                Err(error) => {
                    warn!(id = %raw.id, %error, "Skipping unclassifiable question");
                    None
                }
            })
            .collect()
    }
}

/// Concatenates every text field of a question into one lowercase corpus.
fn build_corpus(raw: &RawQuestion) -> String {
    format!(
        "{} {} {} {} {} {}",
        raw.text,
        raw.topic_hint,
        raw.answer,
        raw.tags.join(" "),
        raw.seniority,
        raw.company
    )
    .to_lowercase()
}

/// Short keywords match whole words only, so "gc" cannot hit inside an
/// unrelated word; longer keywords use substring containment.
fn keyword_matches(keyword: &str, corpus: &str, words: &HashSet<&str>) -> bool {
    if keyword.chars().count() <= 3 {
        words.contains(keyword)
    } else {
        corpus.contains(keyword)
    }
}

/// Confidence in [0, 100]: zero without hits, rising steeply for the
/// first few and saturating as hits approach the cap.
fn confidence(hits: usize) -> f64 {
    if hits == 0 {
        return 0.0;
    }
    let denominator = (hits + 2).min(HIT_CAP);
    (hits as f64 / denominator as f64 * 100.0).min(100.0)
}

/// Infers difficulty from seniority context plus the full corpus.
/// The senior check always precedes the junior check.
fn infer_difficulty(seniority: &str, corpus: &str) -> Difficulty {
    let scope = format!("{} {corpus}", seniority.to_lowercase());
    if SENIOR_MARKERS.iter().any(|marker| scope.contains(marker)) {
        Difficulty::Senior
    } else if JUNIOR_MARKERS.iter().any(|marker| scope.contains(marker)) {
        Difficulty::Junior
    } else {
        Difficulty::Mid
    }
}
