pub mod parse_results;

pub use parse_results::{ParseResult, ParsedSentence, SentencePart};
