//! Typed errors for the parsing core.
//!
//! The tokenizer and tagger are total by design (unknown input falls back to
//! heuristic classes), so only model loading and the scorer/decoder stages
//! can fail. Per-sentence failures are isolated: an error for one sentence
//! never affects the processing of another.

use thiserror::Error;

/// Errors that can occur while loading a model or parsing a sentence
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load parser model: {0}")]
    ModelLoad(String),

    #[error("tag '{tag}' is not part of the configured tag set")]
    UnknownTag { tag: String },

    #[error("non-finite score {value} on arc {head} -> {dependent}")]
    InvalidScore {
        /// Head token index, -1 for the synthetic root
        head: i64,
        dependent: usize,
        value: f64,
    },

    #[error("malformed input encoding at byte offset {offset}")]
    Tokenization { offset: usize },

    #[error("sentence has {len} tokens, exceeding the configured maximum of {max}")]
    SentenceTooLong { len: usize, max: usize },

    #[error("invalid dependency tree: {0}")]
    InvalidTree(String),
}
