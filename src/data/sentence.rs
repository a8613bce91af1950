use serde::{Deserialize, Serialize};

use crate::types::TaggedToken;

/// An ordered sequence of tagged tokens.
///
/// Invariant: token indices are contiguous starting at 0 and match the
/// position of each token in the sequence. The tagger guarantees this for
/// its output; `new` checks it in debug builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    tokens: Vec<TaggedToken>,
}

impl Sentence {
    pub fn new(tokens: Vec<TaggedToken>) -> Self {
        debug_assert!(
            tokens.iter().enumerate().all(|(i, t)| t.index() == i),
            "sentence token indices must be contiguous from 0"
        );
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TaggedToken> {
        self.tokens.get(index)
    }

    pub fn tokens(&self) -> &[TaggedToken] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaggedToken> {
        self.tokens.iter()
    }

    /// Surface forms in token order
    pub fn words(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.surface()).collect()
    }

    /// Tags in token order
    pub fn tags(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.tag.as_str()).collect()
    }

    /// Surface forms joined with single spaces, for display
    pub fn text(&self) -> String {
        self.words().join(" ")
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a TaggedToken;
    type IntoIter = std::slice::Iter<'a, TaggedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Span, Token};

    fn sample() -> Sentence {
        Sentence::new(vec![
            TaggedToken::new(Token::new(0, "The", Span::new(0, 3)), "DT"),
            TaggedToken::new(Token::new(1, "cat", Span::new(4, 7)), "NN"),
            TaggedToken::new(Token::new(2, "sleeps", Span::new(8, 14)), "VBZ"),
        ])
    }

    #[test]
    fn test_sentence_accessors() {
        let sentence = sample();

        assert_eq!(sentence.len(), 3);
        assert!(!sentence.is_empty());
        assert_eq!(sentence.words(), vec!["The", "cat", "sleeps"]);
        assert_eq!(sentence.tags(), vec!["DT", "NN", "VBZ"]);
        assert_eq!(sentence.text(), "The cat sleeps");
        assert_eq!(sentence.get(1).unwrap().surface(), "cat");
        assert!(sentence.get(3).is_none());
    }

    #[test]
    fn test_empty_sentence() {
        let sentence = Sentence::new(Vec::new());
        assert!(sentence.is_empty());
        assert_eq!(sentence.text(), "");
    }
}
