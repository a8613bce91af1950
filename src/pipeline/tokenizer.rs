//! Tokenization and default-path sentence segmentation.
//!
//! The tokenizer is a pure, total function over the input text: it never
//! fails. Words are maximal runs of alphanumeric characters (plus internal
//! apostrophes and hyphens); punctuation and any other symbol degrade to
//! single-character tokens, so arbitrary input always yields a token
//! sequence covering every non-whitespace character.

use crate::types::{Span, Token};

/// Splits raw text into tokens with byte-span metadata
#[derive(Debug, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Tokenize the full input. Indices are assigned 0..n across the whole
    /// text; `segment` re-indexes per sentence.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut word_start = None;

        for (offset, ch) in text.char_indices() {
            if is_word_char(ch) {
                if word_start.is_none() {
                    word_start = Some(offset);
                }
            } else {
                if let Some(start) = word_start.take() {
                    push_word(&mut tokens, text, start, offset);
                }
                if !ch.is_whitespace() {
                    // Punctuation and unrecognized symbols become
                    // single-character tokens.
                    let end = offset + ch.len_utf8();
                    let index = tokens.len();
                    tokens.push(Token::new(index, &text[offset..end], Span::new(offset, end)));
                }
            }
        }
        if let Some(start) = word_start {
            push_word(&mut tokens, text, start, text.len());
        }

        tokens
    }

    /// Split a token stream into sentences at terminal punctuation.
    ///
    /// The terminator and any immediately following closing quotes or
    /// brackets stay with the sentence they end. Tokens are re-indexed from
    /// 0 within each sentence; spans remain offsets into the original text.
    pub fn segment(&self, tokens: &[Token]) -> Vec<Vec<Token>> {
        let mut sentences = Vec::new();
        let mut current: Vec<Token> = Vec::new();
        let mut closing = false;

        for token in tokens {
            let terminator = is_terminator(&token.surface);
            if closing && !is_closing(&token.surface) {
                sentences.push(std::mem::take(&mut current));
                closing = false;
            }
            current.push(token.with_index(current.len()));
            if terminator {
                closing = true;
            }
        }
        if !current.is_empty() {
            sentences.push(current);
        }

        sentences
    }

    /// Tokenize and segment in one step
    pub fn sentences(&self, text: &str) -> Vec<Vec<Token>> {
        self.segment(&self.tokenize(text))
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '\'' || ch == '-'
}

fn is_terminator(surface: &str) -> bool {
    matches!(surface, "." | "!" | "?")
}

fn is_closing(surface: &str) -> bool {
    matches!(surface, "\"" | "'" | ")" | "]" | "”" | "’")
}

fn push_word(tokens: &mut Vec<Token>, text: &str, start: usize, end: usize) {
    // Trim apostrophes and hyphens that are not word-internal
    let word = &text[start..end];
    let trimmed = word.trim_matches(|c| c == '\'' || c == '-');
    if trimmed.is_empty() {
        // A bare run of apostrophes/hyphens degrades to single characters
        for (i, ch) in word.char_indices() {
            let s = start + i;
            let e = s + ch.len_utf8();
            let index = tokens.len();
            tokens.push(Token::new(index, &text[s..e], Span::new(s, e)));
        }
        return;
    }
    let lead = word.len() - word.trim_start_matches(|c| c == '\'' || c == '-').len();
    let s = start + lead;
    let e = s + trimmed.len();
    let index = tokens.len();
    tokens.push(Token::new(index, trimmed, Span::new(s, e)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surfaces(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.surface.as_str()).collect()
    }

    #[test]
    fn test_simple_sentence() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("The cat sleeps.");

        assert_eq!(surfaces(&tokens), vec!["The", "cat", "sleeps", "."]);
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[2].span, Span::new(8, 14));
        assert_eq!(tokens[3].span, Span::new(14, 15));
        assert!(tokens.iter().enumerate().all(|(i, t)| t.index == i));
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   \t\n").is_empty());
        assert!(tokenizer.sentences("").is_empty());
    }

    #[test]
    fn test_punctuation_split() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("Hello, world!");
        assert_eq!(surfaces(&tokens), vec!["Hello", ",", "world", "!"]);
    }

    #[test]
    fn test_internal_apostrophe_and_hyphen() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("a well-known don't");
        assert_eq!(surfaces(&tokens), vec!["a", "well-known", "don't"]);
    }

    #[test]
    fn test_symbols_become_single_tokens() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("a © b");
        assert_eq!(surfaces(&tokens), vec!["a", "©", "b"]);
        // spans stay byte-accurate for the multi-byte symbol
        assert_eq!(tokens[1].span.length(), '©'.len_utf8());
    }

    #[test]
    fn test_segmentation() {
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer.sentences("The cat sleeps. The dog barks.");

        assert_eq!(sentences.len(), 2);
        assert_eq!(surfaces(&sentences[0]), vec!["The", "cat", "sleeps", "."]);
        assert_eq!(surfaces(&sentences[1]), vec!["The", "dog", "barks", "."]);
        // second sentence is re-indexed but keeps global spans
        assert_eq!(sentences[1][0].index, 0);
        assert_eq!(sentences[1][0].span.start, 16);
    }

    #[test]
    fn test_terminator_keeps_closing_quote() {
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer.sentences("He said \"stop!\" Then he left.");

        assert_eq!(sentences.len(), 2);
        assert_eq!(*surfaces(&sentences[0]).last().unwrap(), "\"");
        assert_eq!(surfaces(&sentences[1])[0], "Then");
    }

    #[test]
    fn test_no_trailing_terminator() {
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer.sentences("no punctuation here");
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].len(), 3);
    }

    #[test]
    fn test_determinism() {
        let tokenizer = Tokenizer::new();
        let a = tokenizer.tokenize("John works at Microsoft.");
        let b = tokenizer.tokenize("John works at Microsoft.");
        assert_eq!(a, b);
    }
}
