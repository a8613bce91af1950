use serde::{Deserialize, Serialize};

use crate::data::{DependencyTree, Sentence};
use crate::engine::constants::ROOT_HEAD;

/// The externally observable unit returned per token: the tagged token
/// identity together with its resolved head and dependency label.
///
/// `head` is the sentence-local index of the governing token, or `-1` for
/// the single root token. Instances are derived read-only views over a
/// finalized tree and are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentencePart {
    pub index: usize,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub tag: String,
    pub head: i64,
    pub label: String,
    pub score: f64,
}

impl SentencePart {
    pub fn is_root(&self) -> bool {
        self.head == ROOT_HEAD
    }
}

/// One parsed sentence: its parts in token order plus the tree score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSentence {
    pub text: String,
    pub parts: Vec<SentencePart>,
    pub tree_score: f64,
}

impl ParsedSentence {
    /// Derive the per-token view from a finalized sentence and tree
    pub fn from_tree(sentence: &Sentence, tree: &DependencyTree) -> Self {
        let parts = sentence
            .iter()
            .map(|token| {
                let i = token.index();
                SentencePart {
                    index: i,
                    text: token.surface().to_string(),
                    start: token.span().start,
                    end: token.span().end,
                    tag: token.tag.clone(),
                    head: tree.head_of(i).map(|h| h as i64).unwrap_or(ROOT_HEAD),
                    label: tree.label_of(i).to_string(),
                    score: tree.score_of(i),
                }
            })
            .collect();

        Self {
            text: sentence.text(),
            parts,
            tree_score: tree.total_score(),
        }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Index of the root token
    pub fn root_index(&self) -> Option<usize> {
        self.parts.iter().find(|p| p.is_root()).map(|p| p.index)
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

/// Results of parsing one input text, one entry per sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub sentence_count: usize,
    pub token_count: usize,
    pub sentences: Vec<ParsedSentence>,
}

impl ParseResult {
    pub fn empty() -> Self {
        Self {
            sentence_count: 0,
            token_count: 0,
            sentences: Vec::new(),
        }
    }

    pub fn new(sentences: Vec<ParsedSentence>) -> Self {
        Self {
            sentence_count: sentences.len(),
            token_count: sentences.iter().map(|s| s.len()).sum(),
            sentences,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// All parts across sentences, flattened in input order
    pub fn parts(&self) -> Vec<SentencePart> {
        self.sentences
            .iter()
            .flat_map(|s| s.parts.iter().cloned())
            .collect()
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{:?}", self))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }

    /// Compact one-line-per-token summary
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Parsed {} sentence(s), {} token(s)\n",
            self.sentence_count, self.token_count
        ));
        for (i, sentence) in self.sentences.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {} (score: {:.3})\n",
                i + 1,
                sentence.text,
                sentence.tree_score
            ));
        }
        out
    }
}

impl Default for ParseResult {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Edge;
    use crate::types::{Span, TaggedToken, Token};

    fn sample() -> (Sentence, DependencyTree) {
        let sentence = Sentence::new(vec![
            TaggedToken::new(Token::new(0, "The", Span::new(0, 3)), "DT"),
            TaggedToken::new(Token::new(1, "cat", Span::new(4, 7)), "NN"),
            TaggedToken::new(Token::new(2, "sleeps", Span::new(8, 14)), "VBZ"),
        ]);
        let tree = DependencyTree::from_edges(
            3,
            &[
                Edge::new(Some(1), 0, "det", 5.0),
                Edge::new(Some(2), 1, "nsubj", 6.0),
                Edge::new(None, 2, "root", 8.0),
            ],
        )
        .unwrap();
        (sentence, tree)
    }

    #[test]
    fn test_parts_mirror_tree() {
        let (sentence, tree) = sample();
        let parsed = ParsedSentence::from_tree(&sentence, &tree);

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed.root_index(), Some(2));
        assert_eq!(parsed.parts[0].head, 1);
        assert_eq!(parsed.parts[0].label, "det");
        assert_eq!(parsed.parts[2].head, -1);
        assert!(parsed.parts[2].is_root());
        assert_eq!(parsed.parts[1].start, 4);
        assert_eq!(parsed.parts[1].end, 7);
        assert_eq!(parsed.tree_score, 19.0);
    }

    #[test]
    fn test_result_counts() {
        let (sentence, tree) = sample();
        let result = ParseResult::new(vec![ParsedSentence::from_tree(&sentence, &tree)]);

        assert_eq!(result.sentence_count, 1);
        assert_eq!(result.token_count, 3);
        assert_eq!(result.parts().len(), 3);
        assert!(result.summary().contains("The cat sleeps"));
    }

    #[test]
    fn test_json_roundtrip() {
        let (sentence, tree) = sample();
        let result = ParseResult::new(vec![ParsedSentence::from_tree(&sentence, &tree)]);
        let restored: ParseResult = serde_json::from_str(&result.to_json()).unwrap();
        assert_eq!(restored, result);
    }
}
