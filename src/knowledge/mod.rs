//! Merge & derivation layer: unified topic view over the static bank and
//! the dynamic store.
//!
//! Every read loads the dynamic store fresh from disk, so the view always
//! reflects the latest persisted snapshot.

mod report;

pub use report::{KnowledgeBaseStats, TopicCount, TrendingTopic};

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use serde::Serialize;
use tracing::instrument;

use crate::store::{ClassifiedQuestion, Difficulty, DynamicStore};
use crate::taxonomy::{KeywordTable, StaticBank, StaticTopicArea};

/// Source label attached to questions that come from the static bank.
pub const STATIC_SOURCE: &str = "static";

/// One question in the unified shape both sources are converted into.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeQuestion {
    /// Question text.
    pub text: String,
    /// Expected or best answer.
    pub answer: String,
    /// Curated or inferred difficulty.
    pub difficulty: Difficulty,
    /// Tags.
    pub tags: Vec<String>,
    /// `static` for bank questions, the scrape source otherwise.
    pub source: String,
}

/// One topic in the merged view: static and dynamic questions combined,
/// with per-source counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeTopic {
    /// Topic identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Static questions first, then dynamic, in store order.
    pub questions: Vec<KnowledgeQuestion>,
    /// Number of questions contributed by the static bank.
    pub static_count: usize,
    /// Number of questions contributed by the dynamic store.
    pub dynamic_count: usize,
    /// Curated key concepts, or concepts derived from matched keywords
    /// for topics that exist only in the dynamic store.
    pub key_concepts: Vec<String>,
}

/// Read-side facade combining the static taxonomy with a data directory's
/// dynamic store.
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeBase<'a> {
    table: &'a KeywordTable,
    bank: &'a StaticBank,
}

impl<'a> KnowledgeBase<'a> {
    /// Creates a knowledge base over the given taxonomy tables.
    #[must_use]
    pub fn new(table: &'a KeywordTable, bank: &'a StaticBank) -> Self {
        Self { table, bank }
    }

    /// Builds the unified per-topic view.
    ///
    /// Every static area produces one topic, merged with any dynamic
    /// records sharing its id. Dynamic records whose topic has no static
    /// counterpart form additional dynamic-only topics, ordered by id.
    #[instrument(skip_all, fields(data_dir = %data_dir.display()))]
    #[must_use]
    pub fn knowledge_base(&self, data_dir: &Path) -> Vec<KnowledgeTopic> {
        let store = DynamicStore::load(data_dir);

        let mut by_topic: BTreeMap<&str, Vec<&ClassifiedQuestion>> = BTreeMap::new();
        for record in store.records() {
            by_topic.entry(record.topic_id.as_str()).or_default().push(record);
        }

        let mut topics = Vec::new();
        for area in self.bank.areas() {
            let dynamic = by_topic.remove(area.id.as_str()).unwrap_or_default();
            topics.push(merge_static_area(area, &dynamic));
        }

        for (topic_id, records) in by_topic {
            topics.push(self.dynamic_only_topic(topic_id, &records));
        }

        topics
    }

    /// Builds a topic entry for records with no static counterpart.
    fn dynamic_only_topic(
        &self,
        topic_id: &str,
        records: &[&ClassifiedQuestion],
    ) -> KnowledgeTopic {
        let name = self
            .table
            .display_name(topic_id)
            .map(ToString::to_string)
            .or_else(|| records.first().map(|r| r.topic_name.clone()))
            .unwrap_or_else(|| topic_id.to_string());

        KnowledgeTopic {
            id: topic_id.to_string(),
            name,
            questions: records.iter().map(|r| dynamic_question(r)).collect(),
            static_count: 0,
            dynamic_count: records.len(),
            key_concepts: self.derive_key_concepts(topic_id, records),
        }
    }

    /// Key concepts for a dynamic-only topic: the union of each record's
    /// tags that are keywords of the topic (the matched keywords). Falls
    /// back to the full tag union when the keyword table does not know
    /// the topic.
    fn derive_key_concepts(&self, topic_id: &str, records: &[&ClassifiedQuestion]) -> Vec<String> {
        let keywords: Option<HashSet<&str>> = self
            .table
            .get(topic_id)
            .map(|topic| topic.keywords.iter().map(String::as_str).collect());

        let mut concepts = BTreeSet::new();
        for record in records {
            for tag in &record.tags {
                let keep = match &keywords {
                    Some(keywords) => keywords.contains(tag.as_str()),
                    None => true,
                };
                if keep {
                    concepts.insert(tag.clone());
                }
            }
        }
        concepts.into_iter().collect()
    }
}

/// Merges one static area with its matching dynamic records.
fn merge_static_area(area: &StaticTopicArea, dynamic: &[&ClassifiedQuestion]) -> KnowledgeTopic {
    let mut questions: Vec<KnowledgeQuestion> = area
        .questions
        .iter()
        .map(|q| KnowledgeQuestion {
            text: q.text.clone(),
            answer: q.answer.clone(),
            difficulty: q.difficulty,
            tags: q.tags.clone(),
            source: STATIC_SOURCE.to_string(),
        })
        .collect();
    questions.extend(dynamic.iter().map(|r| dynamic_question(r)));

    KnowledgeTopic {
        id: area.id.clone(),
        name: area.name.clone(),
        questions,
        static_count: area.questions.len(),
        dynamic_count: dynamic.len(),
        key_concepts: area.key_concepts.clone(),
    }
}

/// Converts a stored record into the unified question shape.
fn dynamic_question(record: &ClassifiedQuestion) -> KnowledgeQuestion {
    KnowledgeQuestion {
        text: record.question.text.clone(),
        answer: record.question.answer.clone(),
        difficulty: record.difficulty,
        tags: record.tags.clone(),
        source: record.question.source.clone(),
    }
}
