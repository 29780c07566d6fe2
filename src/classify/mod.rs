//! Topic classification for scraped questions.
//!
//! Assigns each raw question a topic from the keyword table, a confidence
//! score in [0, 100], an inferred difficulty, and a normalized tag set.
//! Classification uses fixed rule tables and simple text matching only;
//! there are no learned parameters.

mod classifier;
mod tags;

pub use classifier::{Classifier, ClassifyError};
pub use tags::normalize_tags;
