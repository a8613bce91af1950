use serde::{Deserialize, Serialize};

use crate::types::Span;

/// A single lexical token produced by the tokenizer.
///
/// Tokens are immutable once created: the index is the position within the
/// sentence (0-based, contiguous) and the span holds byte offsets into the
/// original input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub index: usize,
    pub surface: String,
    pub span: Span,
}

impl Token {
    pub fn new(index: usize, surface: impl Into<String>, span: Span) -> Self {
        Self {
            index,
            surface: surface.into(),
            span,
        }
    }

    /// Copy of this token with a different sentence-local index.
    /// Used when a token stream is re-segmented into sentences.
    pub fn with_index(&self, index: usize) -> Self {
        Self {
            index,
            surface: self.surface.clone(),
            span: self.span,
        }
    }
}

/// A token paired with its part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: Token,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(token: Token, tag: impl Into<String>) -> Self {
        Self {
            token,
            tag: tag.into(),
        }
    }

    pub fn index(&self) -> usize {
        self.token.index
    }

    pub fn surface(&self) -> &str {
        &self.token.surface
    }

    pub fn span(&self) -> Span {
        self.token.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_reindex() {
        let token = Token::new(7, "cat", Span::new(4, 7));
        let local = token.with_index(1);

        assert_eq!(local.index, 1);
        assert_eq!(local.surface, "cat");
        assert_eq!(local.span, Span::new(4, 7)); // span stays global
    }

    #[test]
    fn test_tagged_token_accessors() {
        let tagged = TaggedToken::new(Token::new(0, "The", Span::new(0, 3)), "DT");
        assert_eq!(tagged.index(), 0);
        assert_eq!(tagged.surface(), "The");
        assert_eq!(tagged.tag, "DT");
    }
}
