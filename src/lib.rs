pub mod api;
pub mod data;
pub mod engine;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod results;
pub mod types;

pub use api::server::ApiConfig;
pub use api::start_server;
pub use data::{DependencyTree, Edge, LabelVocabulary, Sentence, TagSet};
pub use engine::{Parser, ParserConfig, ParserEngine};
pub use error::ParseError;
pub use model::ParserModel;
pub use results::{ParseResult, ParsedSentence, SentencePart};
pub use types::{Span, TaggedToken, Token};
