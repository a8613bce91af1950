//! Sentence detail rendering.
//!
//! Produces the multi-line diagnostic view of a parse. The output is a pure
//! function of the sentence and its tree: fixed column layout, no clocks,
//! no hash-order iteration, so the same input always renders byte-identical
//! output.

use crate::data::{DependencyTree, Sentence};

/// Renders parses into a stable, human-readable description
#[derive(Debug, Clone, Default)]
pub struct DetailFormatter;

impl DetailFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render the detail view for a full input and its parsed sentences
    pub fn format(&self, text: &str, parses: &[(Sentence, DependencyTree)]) -> String {
        let mut out = String::new();
        out.push_str(&format!("input: {}\n", text));
        out.push_str(&format!("sentences: {}\n", parses.len()));

        for (i, (sentence, tree)) in parses.iter().enumerate() {
            out.push('\n');
            out.push_str(&self.format_sentence(i, sentence, tree));
        }
        out
    }

    /// Render one sentence as an aligned token table
    pub fn format_sentence(
        &self,
        index: usize,
        sentence: &Sentence,
        tree: &DependencyTree,
    ) -> String {
        let mut out = String::new();
        out.push_str(&format!("sentence {}: {}\n", index, sentence.text()));

        let token_width = sentence
            .iter()
            .map(|t| t.surface().len())
            .max()
            .unwrap_or(0)
            .max("token".len());
        let tag_width = sentence
            .iter()
            .map(|t| t.tag.len())
            .max()
            .unwrap_or(0)
            .max("tag".len());

        out.push_str(&format!(
            "  {:>4}  {:<token_width$}  {:<tag_width$}  {:>4}  {}\n",
            "idx", "token", "tag", "head", "label"
        ));
        for token in sentence.iter() {
            let i = token.index();
            let head = match tree.head_of(i) {
                Some(h) => h.to_string(),
                None => "-".to_string(),
            };
            out.push_str(&format!(
                "  {:>4}  {:<token_width$}  {:<tag_width$}  {:>4}  {}\n",
                i,
                token.surface(),
                token.tag,
                head,
                tree.label_of(i)
            ));
        }
        out
    }
}
