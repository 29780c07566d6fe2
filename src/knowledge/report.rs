//! Store-wide statistics and the trending-topics report.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::store::DynamicStore;

use super::{KnowledgeBase, STATIC_SOURCE};

/// Question count for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicCount {
    /// Topic identifier.
    pub id: String,
    /// Static plus dynamic question count.
    pub count: usize,
}

/// Aggregate statistics over the merged knowledge base.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseStats {
    /// Distinct topics across both sources.
    pub total_topics: usize,
    /// All questions, static plus dynamic.
    pub total_questions: usize,
    /// Questions contributed by the static bank.
    pub static_questions: usize,
    /// Questions contributed by the dynamic store.
    pub dynamic_questions: usize,
    /// Per-topic counts, highest first.
    pub questions_per_topic: Vec<TopicCount>,
    /// Most recent scrape timestamp, or `None` when nothing was ever
    /// scraped (or no record carried a timestamp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_scraped: Option<DateTime<Utc>>,
    /// Distinct sources present, always including `static`.
    pub sources: Vec<String>,
}

/// One row of the trending report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingTopic {
    /// Topic identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Dynamic questions scraped within the lookback window.
    pub recent_count: usize,
    /// All questions for the topic, static plus dynamic.
    pub total_questions: usize,
    /// Recent growth as a percentage of the pre-window question count.
    pub growth_rate: f64,
}

impl KnowledgeBase<'_> {
    /// Computes aggregate statistics for a data directory.
    #[instrument(skip_all, fields(data_dir = %data_dir.display()))]
    #[must_use]
    pub fn stats(&self, data_dir: &Path) -> KnowledgeBaseStats {
        let store = DynamicStore::load(data_dir);

        let mut per_topic: BTreeMap<&str, usize> = BTreeMap::new();
        for area in self.bank.areas() {
            *per_topic.entry(area.id.as_str()).or_default() += area.questions.len();
        }
        for record in store.records() {
            *per_topic.entry(record.topic_id.as_str()).or_default() += 1;
        }

        let mut questions_per_topic: Vec<TopicCount> = per_topic
            .iter()
            .map(|(id, count)| TopicCount {
                id: (*id).to_string(),
                count: *count,
            })
            .collect();
        questions_per_topic.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.id.cmp(&b.id)));

        let static_questions = self.bank.question_count();
        let dynamic_questions = store.len();

        let mut sources: Vec<String> = store
            .records()
            .iter()
            .map(|record| record.question.source.clone())
            .filter(|source| !source.is_empty())
            .chain(std::iter::once(STATIC_SOURCE.to_string()))
            .collect();
        sources.sort();
        sources.dedup();

        KnowledgeBaseStats {
            total_topics: per_topic.len(),
            total_questions: static_questions + dynamic_questions,
            static_questions,
            dynamic_questions,
            questions_per_topic,
            last_scraped: store
                .records()
                .iter()
                .filter_map(|record| record.question.scraped_at)
                .max(),
            sources,
        }
    }

    /// Trending topics over the last `window_days`, relative to now.
    #[must_use]
    pub fn trending_topics(&self, data_dir: &Path, window_days: u32) -> Vec<TrendingTopic> {
        self.trending_topics_at(data_dir, window_days, Utc::now())
    }

    /// Trending topics over the last `window_days` before `now`.
    ///
    /// Growth rate is the recent count as a percentage of all questions
    /// the topic had before the window; a topic whose every question is
    /// recent reports 100. Rows are sorted by recent count, then growth
    /// rate, descending.
    #[instrument(skip_all, fields(data_dir = %data_dir.display(), window_days))]
    #[must_use]
    pub fn trending_topics_at(
        &self,
        data_dir: &Path,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> Vec<TrendingTopic> {
        let store = DynamicStore::load(data_dir);
        let cutoff = now - Duration::days(i64::from(window_days));

        let mut recent: BTreeMap<&str, usize> = BTreeMap::new();
        let mut dynamic_total: BTreeMap<&str, usize> = BTreeMap::new();
        for record in store.records() {
            let topic = record.topic_id.as_str();
            *dynamic_total.entry(topic).or_default() += 1;
            let in_window = record
                .question
                .scraped_at
                .is_some_and(|scraped_at| scraped_at >= cutoff);
            if in_window {
                *recent.entry(topic).or_default() += 1;
            }
        }

        let mut trending: Vec<TrendingTopic> = dynamic_total
            .iter()
            .map(|(topic_id, &dynamic_count)| {
                let static_count = self
                    .bank
                    .get(topic_id)
                    .map_or(0, |area| area.questions.len());
                let total_questions = static_count + dynamic_count;
                let recent_count = recent.get(topic_id).copied().unwrap_or(0);
                TrendingTopic {
                    id: (*topic_id).to_string(),
                    name: self.topic_display_name(topic_id, &store),
                    recent_count,
                    total_questions,
                    growth_rate: growth_rate(recent_count, total_questions),
                }
            })
            .collect();

        trending.sort_by(|a, b| {
            b.recent_count
                .cmp(&a.recent_count)
                .then_with(|| {
                    b.growth_rate
                        .partial_cmp(&a.growth_rate)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.id.cmp(&b.id))
        });
        trending
    }

    /// Best display name for a topic id across bank, table, and records.
    fn topic_display_name(&self, topic_id: &str, store: &DynamicStore) -> String {
        if let Some(area) = self.bank.get(topic_id) {
            return area.name.clone();
        }
        if let Some(name) = self.table.display_name(topic_id) {
            return name.to_string();
        }
        store
            .records()
            .iter()
            .find(|record| record.topic_id == topic_id)
            .map_or_else(|| topic_id.to_string(), |record| record.topic_name.clone())
    }
}

/// Recent count as a percentage of the pre-window base.
///
/// The base is all questions minus the recent ones; a zero base with
/// recent activity reports 100, and no activity at all reports 0.
fn growth_rate(recent_count: usize, total_questions: usize) -> f64 {
    let base = total_questions.saturating_sub(recent_count);
    if base > 0 {
        recent_count as f64 / base as f64 * 100.0
    } else if recent_count > 0 {
        100.0
    } else {
        0.0
    }
}
