//! This crate ranks documents against queries with TF-IDF vectors and cosine similarity.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod output;
pub mod vectorizer;

/// Ranking Pipeline
/// The top-level struct of this crate. It takes a query corpus and a document
/// corpus and runs every stage in order:
/// - TF tables (dense counts over each corpus vocabulary)
/// - IDF tables (per item, only for terms the item contains)
/// - TF-IDF tables
/// - Comparison vectors restricted to each query's tokens
/// - Cosine scores of every (query, document) pair
///
/// Every intermediate table stays public after `Pipeline::run`.
///
/// # Serialization
/// Supported (CBOR via `write_snapshot`).
/// Read snapshots back through `PipelineSnapshot`.
pub use vectorizer::Pipeline;

/// Snapshot of every pipeline table, for deserialization
pub use vectorizer::serde::PipelineSnapshot;

/// Corpus
/// Ordered `ItemId -> tokens` map plus the corpus vocabulary.
/// Ids start at 1 and follow the order of body sections in the source.
pub use vectorizer::corpus::{Corpus, ItemId, RecordMarkers};

/// Tokenizer and stop word list
/// Digits are stripped, text is split into word runs, and closed-class stop
/// words are dropped. No stemming.
pub use analyzer::{StopWords, Tokenizer};

/// TF-IDF Calculation Engine Trait
/// Plug different IDF / weighting rules into the table builders.
/// `DefaultTFIDFEngine` uses ln(N / df) and tf × idf.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Ranked output
/// - `RankedRecord`: one (query, document, score) line
/// - `ScoreTable`: every score, keyed by query then document
/// - `Hits`: per-query list sorted by descending score, ties by ascending id
pub use vectorizer::evaluate::scoring::{Hits, RankedRecord, ScoreTable};

pub use config::RankerConfig;
pub use error::{Error, Result};
