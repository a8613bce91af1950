pub mod span;
pub mod token;

pub use span::Span;
pub use token::{TaggedToken, Token};
