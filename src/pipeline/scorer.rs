//! Arc-factored dependency scoring.
//!
//! For a sentence of n tokens the scorer fills a dense (n+1) x n matrix:
//! one row per candidate head (the synthetic root plus every token) and one
//! column per dependent. Every off-diagonal entry is finite so the decoder
//! always sees a complete candidate graph; self-arcs are poisoned with
//! negative infinity and excluded from both search and validation.

use std::sync::Arc;

use crate::data::Sentence;
use crate::error::ParseError;
use crate::model::ParserModel;
use crate::types::TaggedToken;

/// Dense head-by-dependent score matrix. Row 0 is the synthetic root; row
/// i+1 is token i.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    n: usize,
    scores: Vec<f64>,
}

impl ScoreMatrix {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            scores: vec![f64::NEG_INFINITY; (n + 1) * n],
        }
    }

    /// Number of tokens covered by the matrix
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    fn row(head: Option<usize>) -> usize {
        match head {
            None => 0,
            Some(h) => h + 1,
        }
    }

    /// Score of the arc `head -> dependent`; `None` is the root
    pub fn get(&self, head: Option<usize>, dependent: usize) -> f64 {
        self.scores[Self::row(head) * self.n + dependent]
    }

    pub fn set(&mut self, head: Option<usize>, dependent: usize, score: f64) {
        self.scores[Self::row(head) * self.n + dependent] = score;
    }

    /// Verify that every candidate arc carries a finite score. A non-finite
    /// entry indicates a model defect upstream and fails the sentence
    /// rather than silently substituting a default edge.
    pub fn validate_finite(&self) -> Result<(), ParseError> {
        for dependent in 0..self.n {
            for head_row in 0..=self.n {
                if head_row == dependent + 1 {
                    continue; // self-arc, never a candidate
                }
                let value = self.scores[head_row * self.n + dependent];
                if !value.is_finite() {
                    return Err(ParseError::InvalidScore {
                        head: head_row as i64 - 1,
                        dependent,
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Computes arc scores from the injected model weights
#[derive(Debug, Clone)]
pub struct Scorer {
    model: Arc<ParserModel>,
}

impl Scorer {
    pub fn new(model: Arc<ParserModel>) -> Self {
        Self { model }
    }

    /// Score all head candidates for every token of the sentence
    pub fn score(&self, sentence: &Sentence) -> Result<ScoreMatrix, ParseError> {
        let n = sentence.len();
        let mut matrix = ScoreMatrix::new(n);

        for dependent in sentence.iter() {
            let j = dependent.index();
            matrix.set(None, j, self.root_score(dependent));
            for head in sentence.iter() {
                let i = head.index();
                if i == j {
                    continue;
                }
                matrix.set(Some(i), j, self.arc_score(head, dependent));
            }
        }

        matrix.validate_finite()?;
        Ok(matrix)
    }

    fn arc_score(&self, head: &TaggedToken, dependent: &TaggedToken) -> f64 {
        let scorer = &self.model.scorer;
        let direction = if dependent.index() < head.index() { "L" } else { "R" };
        let key = format!(
            "{} {} {}",
            ParserModel::coarse_tag(&head.tag),
            ParserModel::coarse_tag(&dependent.tag),
            direction
        );
        let attachment = scorer
            .attachments
            .get(&key)
            .copied()
            .unwrap_or(scorer.default_attachment);

        let distance = head.index().abs_diff(dependent.index());
        let decay = scorer.distance_decay * (distance - 1) as f64;

        let lexical_key = format!(
            "{} {}",
            head.surface().to_lowercase(),
            dependent.surface().to_lowercase()
        );
        let affinity = scorer.lexical.get(&lexical_key).copied().unwrap_or(0.0);

        attachment - decay + affinity
    }

    fn root_score(&self, token: &TaggedToken) -> f64 {
        let scorer = &self.model.scorer;
        scorer
            .root_attachments
            .get(ParserModel::coarse_tag(&token.tag))
            .copied()
            .unwrap_or(scorer.default_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Tagger, Tokenizer};

    fn sentence(text: &str) -> Sentence {
        let model = Arc::new(ParserModel::builtin());
        let tokens = Tokenizer::new().tokenize(text);
        Sentence::new(Tagger::new(model).tag(&tokens).unwrap())
    }

    fn scorer() -> Scorer {
        Scorer::new(Arc::new(ParserModel::builtin()))
    }

    #[test]
    fn test_matrix_is_complete_and_finite() {
        let sentence = sentence("The cat sleeps .");
        let matrix = scorer().score(&sentence).unwrap();

        assert_eq!(matrix.len(), 4);
        for j in 0..4 {
            assert!(matrix.get(None, j).is_finite());
            for i in 0..4 {
                if i != j {
                    assert!(matrix.get(Some(i), j).is_finite());
                }
            }
        }
    }

    #[test]
    fn test_verb_is_preferred_root() {
        let sentence = sentence("The cat sleeps .");
        let matrix = scorer().score(&sentence).unwrap();

        // sleeps (index 2) must outscore every other token as root child
        let root_scores: Vec<f64> = (0..4).map(|j| matrix.get(None, j)).collect();
        assert!(root_scores[2] > root_scores[0]);
        assert!(root_scores[2] > root_scores[1]);
        assert!(root_scores[2] > root_scores[3]);
    }

    #[test]
    fn test_subject_attachment_outscores_root() {
        let sentence = sentence("The cat sleeps .");
        let matrix = scorer().score(&sentence).unwrap();

        // cat -> sleeps beats cat -> root
        assert!(matrix.get(Some(2), 1) > matrix.get(None, 1));
        // The -> cat beats The -> sleeps
        assert!(matrix.get(Some(1), 0) > matrix.get(Some(2), 0));
    }

    #[test]
    fn test_distance_decay() {
        let sentence = sentence("cats see dogs see cats");
        let matrix = scorer().score(&sentence).unwrap();

        // same configuration, longer arc scores lower
        assert!(matrix.get(Some(1), 0) > matrix.get(Some(3), 0));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut matrix = ScoreMatrix::new(2);
        matrix.set(None, 0, 1.0);
        matrix.set(None, 1, 1.0);
        matrix.set(Some(0), 1, f64::NAN);
        matrix.set(Some(1), 0, 1.0);

        let err = matrix.validate_finite().unwrap_err();
        assert!(matches!(err, ParseError::InvalidScore { .. }));
    }

    #[test]
    fn test_determinism() {
        let sentence = sentence("John works at Microsoft .");
        assert_eq!(
            scorer().score(&sentence).unwrap(),
            scorer().score(&sentence).unwrap()
        );
    }
}
