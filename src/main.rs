//! CLI entry point for the qbank tool.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use qbank::{IngestPipeline, KeywordTable, KnowledgeBase, RawQuestion, StaticBank};

mod cli;

use cli::{Args, Command};

fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let table = KeywordTable::builtin();
    let bank = StaticBank::builtin();

    match &args.command {
        Command::Ingest { input } => run_ingest(&table, &bank, input, &args.data_dir),
        Command::Topics => run_topics(&table, &bank, &args.data_dir),
        Command::Stats => run_stats(&table, &bank, &args.data_dir),
        Command::Trending { days } => run_trending(&table, &bank, &args.data_dir, *days),
    }
}

fn run_ingest(
    table: &KeywordTable,
    bank: &StaticBank,
    input: &Path,
    data_dir: &Path,
) -> Result<()> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("Cannot read input file '{}'", input.display()))?;
    let batch: Vec<RawQuestion> = serde_json::from_str(&raw)
        .with_context(|| format!("'{}' is not a JSON array of raw questions", input.display()))?;

    let pipeline = IngestPipeline::new(table, bank);
    let result = pipeline
        .ingest(&batch, data_dir)
        .context("Ingestion failed; nothing from this batch was saved")?;

    if result.store_recovered {
        println!(
            "Warning: the existing store file could not be read; ingestion started from an empty store."
        );
    }
    println!("Processed {} scraped questions:", result.total_processed);
    println!("  added      {}", result.new_questions_added);
    println!("  duplicates {}", result.duplicates_skipped);
    println!("  skipped    {}", result.unclassified_skipped);
    if !result.topics_enriched.is_empty() {
        println!("Topics enriched: {}", result.topics_enriched.join(", "));
    }
    Ok(())
}

fn run_topics(table: &KeywordTable, bank: &StaticBank, data_dir: &Path) -> Result<()> {
    let kb = KnowledgeBase::new(table, bank);
    for topic in kb.knowledge_base(data_dir) {
        println!(
            "{} ({}): {} static + {} scraped",
            topic.name, topic.id, topic.static_count, topic.dynamic_count
        );
        if !topic.key_concepts.is_empty() {
            println!("  key concepts: {}", topic.key_concepts.join(", "));
        }
    }
    Ok(())
}

fn run_stats(table: &KeywordTable, bank: &StaticBank, data_dir: &Path) -> Result<()> {
    let kb = KnowledgeBase::new(table, bank);
    let stats = kb.stats(data_dir);

    println!("Topics:    {}", stats.total_topics);
    println!(
        "Questions: {} ({} static, {} scraped)",
        stats.total_questions, stats.static_questions, stats.dynamic_questions
    );
    match stats.last_scraped {
        Some(at) => println!("Last scrape: {at}"),
        None => println!("Last scrape: never"),
    }
    println!("Sources:   {}", stats.sources.join(", "));
    println!("Largest topics:");
    for topic in stats.questions_per_topic.iter().take(5) {
        println!("  {:3}  {}", topic.count, topic.id);
    }
    Ok(())
}

fn run_trending(
    table: &KeywordTable,
    bank: &StaticBank,
    data_dir: &Path,
    days: u32,
) -> Result<()> {
    let kb = KnowledgeBase::new(table, bank);
    let trending = kb.trending_topics(data_dir, days);

    if trending.is_empty() {
        println!("No scraped questions in the store yet.");
        return Ok(());
    }

    println!("Trending over the last {days} days:");
    for topic in trending {
        println!(
            "  {}: {} recent of {} total ({:.1}% growth)",
            topic.name, topic.recent_count, topic.total_questions, topic.growth_rate
        );
    }
    Ok(())
}
