//! Ingestion pipeline: classify, filter, deduplicate, append, persist.
//!
//! One ingestion call processes a batch of raw scraped questions in order:
//! classify each item, drop low-confidence classifications, reject
//! near-duplicates of the static bank and of the dynamic store (including
//! records accepted earlier in the same batch), append what survives, then
//! persist the full store once at the end.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::classify::Classifier;
use crate::dedup::{DEFAULT_DUPLICATE_THRESHOLD, DuplicateDetector};
use crate::store::{DynamicStore, LoadSource, RawQuestion, StoreError};
use crate::taxonomy::{KeywordTable, StaticBank};

/// Classifications below this confidence are skipped.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 30.0;

/// Tunable thresholds for one pipeline instance.
#[derive(Debug, Clone, Copy)]
pub struct IngestConfig {
    /// Minimum classification confidence to accept, in [0, 100].
    pub confidence_threshold: f64,
    /// Jaccard similarity at or above which a question is a duplicate.
    pub duplicate_threshold: f64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            duplicate_threshold: DEFAULT_DUPLICATE_THRESHOLD,
        }
    }
}

/// Errors that abort an ingestion call.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The accepted records could not be durably saved. Nothing from this
    /// batch was persisted; the previous on-disk snapshot is intact.
    #[error("failed to persist accepted questions: {0}")]
    Store(#[from] StoreError),
}

/// Outcome counts for one ingestion call.
///
/// `new_questions_added + duplicates_skipped + unclassified_skipped`
/// always equals `total_processed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResult {
    /// Number of raw questions in the batch.
    pub total_processed: usize,
    /// Accepted and persisted as novel.
    pub new_questions_added: usize,
    /// Rejected as near-duplicates of the static bank or dynamic store.
    pub duplicates_skipped: usize,
    /// Classification failed or confidence fell below the threshold.
    pub unclassified_skipped: usize,
    /// Sorted, deduplicated ids of topics that received new questions.
    pub topics_enriched: Vec<String>,
    /// True when the store file existed but could not be read and the
    /// call started from an empty store; prior data may have been lost.
    pub store_recovered: bool,
}

/// Sequences classification, filtering, deduplication, and persistence
/// for batches of scraped questions.
pub struct IngestPipeline<'a> {
    classifier: Classifier<'a>,
    detector: DuplicateDetector,
    bank: &'a StaticBank,
    confidence_threshold: f64,
}

impl<'a> IngestPipeline<'a> {
    /// Creates a pipeline with default thresholds.
    #[must_use]
    pub fn new(table: &'a KeywordTable, bank: &'a StaticBank) -> Self {
        Self::with_config(table, bank, IngestConfig::default())
    }

    /// Creates a pipeline with custom thresholds.
    #[must_use]
    pub fn with_config(table: &'a KeywordTable, bank: &'a StaticBank, config: IngestConfig) -> Self {
        Self {
            classifier: Classifier::new(table),
            detector: DuplicateDetector::new(config.duplicate_threshold),
            bank,
            confidence_threshold: config.confidence_threshold,
        }
    }

    /// Ingests a batch of raw questions into the data directory's store.
    ///
    /// Items are processed in order; each is classified, gated on
    /// confidence, checked against the static bank and then against the
    /// dynamic store accumulated so far in this call, and appended if
    /// novel. The store is persisted once after the whole batch.
    ///
    /// # Errors
    /// Returns [`IngestError::Store`] when the final persist fails. No
    /// counts are returned in that case: the caller never holds numbers
    /// describing records that were not durably saved.
    #[instrument(skip_all, fields(batch = batch.len(), data_dir = %data_dir.display()))]
    pub fn ingest(
        &self,
        batch: &[RawQuestion],
        data_dir: &Path,
    ) -> Result<IngestResult, IngestError> {
        let mut store = DynamicStore::load(data_dir);
        let store_recovered = store.source() == LoadSource::Recovered;
        if store_recovered {
            warn!("Ingesting into a recovered (previously unreadable) store");
        }

        let mut new_questions_added = 0;
        let mut duplicates_skipped = 0;
        let mut unclassified_skipped = 0;
        let mut topics_enriched = BTreeSet::new();

        for raw in batch {
            let mut classified = match self.classifier.classify(raw) {
                Ok(classified) => classified,
                Err(error) => {
                    warn!(id = %raw.id, %error, "Skipping unclassifiable question");
                    unclassified_skipped += 1;
                    continue;
                }
            };

            if classified.confidence < self.confidence_threshold {
                debug!(
                    id = %raw.id,
                    confidence = classified.confidence,
                    "Skipping low-confidence classification"
                );
                unclassified_skipped += 1;
                continue;
            }

            if self.detector.is_duplicate(&raw.text, self.bank.question_texts()) {
                debug!(id = %raw.id, "Skipping duplicate of the static bank");
                duplicates_skipped += 1;
                continue;
            }

            if self.detector.is_duplicate(&raw.text, store.question_texts()) {
                debug!(id = %raw.id, "Skipping duplicate of the dynamic store");
                duplicates_skipped += 1;
                continue;
            }

            classified.is_novel = true;
            topics_enriched.insert(classified.topic_id.clone());
            store.append(classified);
            new_questions_added += 1;
        }

        store.persist(data_dir)?;

        info!(
            total = batch.len(),
            added = new_questions_added,
            duplicates = duplicates_skipped,
            unclassified = unclassified_skipped,
            "Ingestion batch persisted"
        );

        Ok(IngestResult {
            total_processed: batch.len(),
            new_questions_added,
            duplicates_skipped,
            unclassified_skipped,
            topics_enriched: topics_enriched.into_iter().collect(),
            store_recovered,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn raw(id: &str, text: &str) -> RawQuestion {
        RawQuestion {
            id: id.to_string(),
            text: text.to_string(),
            topic_hint: String::new(),
            answer: String::new(),
            tags: Vec::new(),
            seniority: String::new(),
            company: String::new(),
            scraped_at: None,
            upvotes: 0,
            source: "devforum".to_string(),
            source_url: None,
        }
    }

    #[test]
    fn test_ingest_accepts_novel_question() {
        let table = KeywordTable::builtin();
        let bank = StaticBank::builtin();
        let pipeline = IngestPipeline::new(&table, &bank);
        let temp = TempDir::new().unwrap();

        let batch = vec![raw("q-1", "How do async tasks differ from threads in practice?")];
        let result = pipeline.ingest(&batch, temp.path()).unwrap();

        assert_eq!(result.new_questions_added, 1);
        assert_eq!(result.topics_enriched, vec!["concurrency"]);
        assert!(!result.store_recovered);

        let store = DynamicStore::load(temp.path());
        assert_eq!(store.len(), 1);
        assert!(store.records()[0].is_novel, "accepted records are marked novel");
    }

    #[test]
    fn test_ingest_skips_low_confidence() {
        let table = KeywordTable::builtin();
        let bank = StaticBank::builtin();
        let pipeline = IngestPipeline::new(&table, &bank);
        let temp = TempDir::new().unwrap();

        // One keyword hit = confidence 33.3 (above 30); zero hits = 0.
        let batch = vec![raw("q-1", "Tell me about your favourite hobby")];
        let result = pipeline.ingest(&batch, temp.path()).unwrap();

        assert_eq!(result.new_questions_added, 0);
        assert_eq!(result.unclassified_skipped, 1);
        assert!(DynamicStore::load(temp.path()).is_empty());
    }

    #[test]
    fn test_ingest_counts_blank_text_as_unclassified() {
        let table = KeywordTable::builtin();
        let bank = StaticBank::builtin();
        let pipeline = IngestPipeline::new(&table, &bank);
        let temp = TempDir::new().unwrap();

        let batch = vec![raw("q-1", "  ")];
        let result = pipeline.ingest(&batch, temp.path()).unwrap();
        assert_eq!(result.unclassified_skipped, 1);
        assert_eq!(result.total_processed, 1);
    }

    #[test]
    fn test_ingest_rejects_duplicate_of_static_bank() {
        let table = KeywordTable::builtin();
        let bank = StaticBank::builtin();
        let pipeline = IngestPipeline::new(&table, &bank);
        let temp = TempDir::new().unwrap();

        // Token-identical to a curated bank question.
        let batch = vec![raw("q-1", "What is a deadlock and what conditions are required for one to occur?")];
        let result = pipeline.ingest(&batch, temp.path()).unwrap();

        assert_eq!(result.duplicates_skipped, 1);
        assert_eq!(result.new_questions_added, 0);
    }

    #[test]
    fn test_ingest_rejects_duplicate_within_same_batch() {
        let table = KeywordTable::builtin();
        let bank = StaticBank::builtin();
        let pipeline = IngestPipeline::new(&table, &bank);
        let temp = TempDir::new().unwrap();

        let batch = vec![
            raw("q-1", "How do async tasks differ from threads in practice?"),
            raw("q-2", "How do async tasks differ from threads in practice?"),
        ];
        let result = pipeline.ingest(&batch, temp.path()).unwrap();

        assert_eq!(result.new_questions_added, 1);
        assert_eq!(result.duplicates_skipped, 1);
    }

    #[test]
    fn test_ingest_counts_sum_to_total() {
        let table = KeywordTable::builtin();
        let bank = StaticBank::builtin();
        let pipeline = IngestPipeline::new(&table, &bank);
        let temp = TempDir::new().unwrap();

        let batch = vec![
            raw("q-1", "How do async tasks differ from threads in practice?"),
            raw("q-2", "Tell me about your favourite hobby"),
            raw("q-3", "How do async tasks differ from threads in practice?"),
            raw("q-4", "Why does database replication lag under write-heavy load?"),
        ];
        let result = pipeline.ingest(&batch, temp.path()).unwrap();

        assert_eq!(
            result.new_questions_added + result.duplicates_skipped + result.unclassified_skipped,
            result.total_processed
        );
        assert_eq!(result.total_processed, 4);
    }

    #[test]
    fn test_ingest_same_batch_twice_is_idempotent() {
        let table = KeywordTable::builtin();
        let bank = StaticBank::builtin();
        let pipeline = IngestPipeline::new(&table, &bank);
        let temp = TempDir::new().unwrap();

        let batch = vec![
            raw("q-1", "How do async tasks differ from threads in practice?"),
            raw("q-2", "Why does database replication lag under write-heavy load?"),
        ];

        let first = pipeline.ingest(&batch, temp.path()).unwrap();
        assert_eq!(first.new_questions_added, 2);

        let second = pipeline.ingest(&batch, temp.path()).unwrap();
        assert_eq!(
            second.new_questions_added, 0,
            "every previously accepted item is now a duplicate of itself"
        );
        assert_eq!(second.duplicates_skipped, 2);
        assert_eq!(DynamicStore::load(temp.path()).len(), 2);
    }

    #[test]
    fn test_ingest_persist_failure_returns_error_not_counts() {
        let table = KeywordTable::builtin();
        let bank = StaticBank::builtin();
        let pipeline = IngestPipeline::new(&table, &bank);
        let temp = TempDir::new().unwrap();

        // A plain file where the data directory should be.
        let blocked = temp.path().join("blocked");
        std::fs::write(&blocked, "occupied").unwrap();

        let batch = vec![raw("q-1", "How do async tasks differ from threads in practice?")];
        let result = pipeline.ingest(&batch, &blocked);
        assert!(matches!(result, Err(IngestError::Store(_))));
    }

    #[test]
    fn test_ingest_surfaces_recovered_store() {
        let table = KeywordTable::builtin();
        let bank = StaticBank::builtin();
        let pipeline = IngestPipeline::new(&table, &bank);
        let temp = TempDir::new().unwrap();
        std::fs::write(DynamicStore::store_path(temp.path()), "{corrupt").unwrap();

        let result = pipeline
            .ingest(&[raw("q-1", "How do async tasks differ from threads in practice?")], temp.path())
            .unwrap();
        assert!(result.store_recovered);
        assert_eq!(result.new_questions_added, 1);
    }

    #[test]
    fn test_ingest_custom_confidence_threshold() {
        let table = KeywordTable::builtin();
        let bank = StaticBank::builtin();
        let config = IngestConfig {
            confidence_threshold: 60.0,
            ..IngestConfig::default()
        };
        let pipeline = IngestPipeline::with_config(&table, &bank, config);
        let temp = TempDir::new().unwrap();

        // Two keyword hits = confidence 50, below the raised bar.
        let batch = vec![raw("q-1", "Explain async and await in C#")];
        let result = pipeline.ingest(&batch, temp.path()).unwrap();
        assert_eq!(result.unclassified_skipped, 1);
        assert_eq!(result.new_questions_added, 0);
    }

    #[test]
    fn test_ingest_empty_batch_persists_empty_store() {
        let table = KeywordTable::builtin();
        let bank = StaticBank::builtin();
        let pipeline = IngestPipeline::new(&table, &bank);
        let temp = TempDir::new().unwrap();

        let result = pipeline.ingest(&[], temp.path()).unwrap();
        assert_eq!(result, IngestResult::default());
        assert!(DynamicStore::store_path(temp.path()).exists());
    }
}
