use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::results::{ParsedSentence, SentencePart};

/// Request model for parsing text
#[derive(Debug, Deserialize, ToSchema)]
pub struct ParseRequest {
    /// The raw text to parse
    #[schema(example = "The cat sleeps.")]
    pub text: String,
}

/// Response model for parse results
#[derive(Debug, Serialize, ToSchema)]
pub struct ParseResponse {
    /// The original input text
    #[schema(example = "The cat sleeps.")]
    pub text: String,
    /// Parse duration in seconds
    #[schema(example = 0.002)]
    pub duration: f32,
    /// Number of sentences in the input
    #[schema(example = 1)]
    pub sentence_count: usize,
    /// Number of tokens across all sentences
    #[schema(example = 4)]
    pub token_count: usize,
    /// One result per sentence, in input order
    pub sentences: Vec<SentenceResponse>,
}

/// One parsed sentence
#[derive(Debug, Serialize, ToSchema)]
pub struct SentenceResponse {
    /// Surface text of the sentence
    #[schema(example = "The cat sleeps .")]
    pub text: String,
    /// Total score of the dependency tree
    #[schema(example = 21.5)]
    pub tree_score: f64,
    /// One entry per token, in token order
    pub tokens: Vec<TokenResponse>,
}

/// One token with its resolved head and label
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Sentence-local token index
    #[schema(example = 1)]
    pub index: usize,
    /// Surface form
    #[schema(example = "cat")]
    pub text: String,
    /// Start byte offset into the input
    #[schema(example = 4)]
    pub start: usize,
    /// End byte offset into the input
    #[schema(example = 7)]
    pub end: usize,
    /// Part-of-speech tag
    #[schema(example = "NN")]
    pub tag: String,
    /// Head token index, -1 for the root
    #[schema(example = 2)]
    pub head: i64,
    /// Dependency label
    #[schema(example = "nsubj")]
    pub label: String,
}

/// Request model for the detail view
#[derive(Debug, Deserialize, ToSchema)]
pub struct DetailRequest {
    /// The raw text to parse
    #[schema(example = "The cat sleeps.")]
    pub text: String,
}

/// Response model for the detail view
#[derive(Debug, Serialize, ToSchema)]
pub struct DetailResponse {
    /// The original input text
    #[schema(example = "The cat sleeps.")]
    pub text: String,
    /// Stable multi-line diagnostic rendering of the parse
    pub detail: String,
}

/// Error response model
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Text cannot be empty")]
    pub error: String,
    /// Error type
    #[schema(example = "ValidationError")]
    pub error_type: String,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "healthy")]
    pub status: String,
    /// Service name
    #[schema(example = "rustdp parse API")]
    pub service: String,
}

/// Parser statistics response
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Name of the loaded model
    #[schema(example = "builtin-en-demo")]
    pub model_name: String,
    /// Number of tags in the closed tag set
    #[schema(example = 45)]
    pub tag_count: usize,
    /// Number of known dependency labels
    #[schema(example = 21)]
    pub label_count: usize,
    /// Maximum tokens accepted per sentence
    #[schema(example = 200)]
    pub max_sentence_length: usize,
}

// Helper conversion functions
impl From<&SentencePart> for TokenResponse {
    fn from(part: &SentencePart) -> Self {
        Self {
            index: part.index,
            text: part.text.clone(),
            start: part.start,
            end: part.end,
            tag: part.tag.clone(),
            head: part.head,
            label: part.label.clone(),
        }
    }
}

impl From<&ParsedSentence> for SentenceResponse {
    fn from(sentence: &ParsedSentence) -> Self {
        Self {
            text: sentence.text.clone(),
            tree_score: sentence.tree_score,
            tokens: sentence.parts.iter().map(TokenResponse::from).collect(),
        }
    }
}
