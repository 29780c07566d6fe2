//! Static topic taxonomy: keyword tables and the hand-authored question bank.
//!
//! Both tables are immutable configuration. They are constructed once at
//! startup (`builtin()` for the production tables, plain constructors for
//! custom ones) and passed by reference into the pipeline; nothing here is
//! global or mutated at runtime.

mod bank;
mod keywords;

pub use bank::{StaticBank, StaticQuestion, StaticTopicArea};
pub use keywords::{KeywordTable, TopicKeywords, UNKNOWN_TOPIC_ID, UNKNOWN_TOPIC_NAME};
