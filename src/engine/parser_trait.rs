//! The parser capability trait.
//!
//! Splits the engine surface into its pipeline stages so each one can be
//! exercised or mocked independently. `ParserEngine` is the production
//! implementation; tests can substitute stage behavior behind the same
//! interface.

use crate::data::{DependencyTree, Sentence};
use crate::error::ParseError;
use crate::pipeline::ScoreMatrix;
use crate::results::SentencePart;
use crate::types::{TaggedToken, Token};

/// A dependency parser broken into independently testable operations
pub trait Parser {
    /// Segment raw text into tokens with byte spans. Total: never fails.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Assign one tag per token from the closed tag set
    fn tag(&self, tokens: &[Token]) -> Result<Vec<TaggedToken>, ParseError>;

    /// Compute the dense arc score matrix for a sentence
    fn score(&self, sentence: &Sentence) -> Result<ScoreMatrix, ParseError>;

    /// Find the maximum spanning arborescence over the scored graph
    fn decode(
        &self,
        sentence: &Sentence,
        scores: &ScoreMatrix,
    ) -> Result<DependencyTree, ParseError>;

    /// Full pipeline: one part per input token, in input order
    fn parse(&self, text: &str) -> Result<Vec<SentencePart>, ParseError>;

    /// Stable multi-line diagnostic rendering of the parse
    fn detail(&self, text: &str) -> Result<String, ParseError>;
}
