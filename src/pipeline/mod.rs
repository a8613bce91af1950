//! The parsing pipeline, one module per stage:
//! - `tokenizer`: raw text to tokens with byte spans
//! - `tagger`: tokens to tagged tokens (bigram Viterbi over the model lexicon)
//! - `scorer`: dense arc-factored score matrix over head candidates
//! - `decoder`: maximum spanning arborescence search (Chu-Liu/Edmonds)
//! - `formatter`: stable diagnostic rendering of a finished parse
//!
//! Data flows strictly forward; every stage is deterministic given the same
//! model and input.

pub mod decoder;
pub mod formatter;
pub mod scorer;
pub mod tagger;
pub mod tokenizer;

pub use decoder::Decoder;
pub use formatter::DetailFormatter;
pub use scorer::{ScoreMatrix, Scorer};
pub use tagger::Tagger;
pub use tokenizer::Tokenizer;
