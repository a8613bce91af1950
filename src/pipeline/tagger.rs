//! Part-of-speech tagging.
//!
//! A bigram Viterbi tagger over the model lexicon. Unknown vocabulary never
//! fails: candidate tags fall back to shape heuristics (digits,
//! capitalization, suffix patterns) with frequency-derived log-probability
//! estimates. Given the same model and input, the output is deterministic;
//! ties are resolved toward the lexicographically smaller tag.

use std::sync::Arc;

use regex::Regex;

use crate::error::ParseError;
use crate::model::{ParserModel, START_TAG};
use crate::types::{TaggedToken, Token};

/// Assigns one tag per token from the model's closed tag set
#[derive(Debug, Clone)]
pub struct Tagger {
    model: Arc<ParserModel>,
    number_pattern: Regex,
}

impl Tagger {
    pub fn new(model: Arc<ParserModel>) -> Self {
        // Pre-compiled once; matches integers, decimals and digit groupings
        let number_pattern = Regex::new(r"^[+-]?\d+([.,]\d+)*$").expect("valid number pattern");
        Self {
            model,
            number_pattern,
        }
    }

    /// Tag a token sequence. Output has the same length and order as the
    /// input. Fails only if a produced tag falls outside the closed tag
    /// set, which indicates model misconfiguration.
    pub fn tag(&self, tokens: &[Token]) -> Result<Vec<TaggedToken>, ParseError> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let lattice: Vec<Vec<(String, f64)>> = tokens
            .iter()
            .map(|t| self.candidates(&t.surface))
            .collect();

        let tags = self.viterbi(&lattice);
        for tag in &tags {
            if !self.model.tag_set.contains(tag) {
                return Err(ParseError::UnknownTag { tag: tag.clone() });
            }
        }

        Ok(tokens
            .iter()
            .zip(tags)
            .map(|(token, tag)| TaggedToken::new(token.clone(), tag))
            .collect())
    }

    /// Candidate tags with emission log-probabilities, sorted by tag name
    /// so downstream tie-breaking is deterministic.
    fn candidates(&self, surface: &str) -> Vec<(String, f64)> {
        let mut candidates: Vec<(String, f64)> =
            if let Some(tags) = self.model.tagger.lexicon.get(&surface.to_lowercase()) {
                tags.iter().map(|(t, w)| (t.clone(), *w)).collect()
            } else {
                self.heuristic_candidates(surface)
            };
        candidates.sort_by(|a, b| a.0.cmp(&b.0));
        candidates
    }

    /// Shape-based fallback for out-of-vocabulary tokens
    fn heuristic_candidates(&self, surface: &str) -> Vec<(String, f64)> {
        let entries: &[(&str, f64)] = if is_punctuation(surface) {
            return vec![(punctuation_tag(surface).to_string(), 0.0)];
        } else if self.number_pattern.is_match(surface) {
            &[("CD", 0.0)]
        } else if surface.chars().next().is_some_and(|c| c.is_uppercase()) {
            &[("NNP", -0.3), ("NN", -2.0), ("JJ", -2.5)]
        } else if surface.ends_with("ly") {
            &[("RB", -0.3), ("JJ", -2.0)]
        } else if surface.ends_with("ing") {
            &[("VBG", -0.5), ("NN", -1.5), ("JJ", -2.0)]
        } else if surface.ends_with("ed") {
            &[("VBD", -0.5), ("VBN", -0.7), ("JJ", -2.0)]
        } else if has_suffix(surface, &["ous", "ful", "ive", "able", "ible", "al", "ish"]) {
            &[("JJ", -0.5), ("NN", -1.5)]
        } else if has_suffix(surface, &["tion", "sion", "ment", "ness", "ity", "ism", "er", "or"]) {
            &[("NN", -0.3), ("JJR", -3.0)]
        } else if surface.ends_with('s') && !surface.ends_with("ss") {
            &[("NNS", -0.7), ("VBZ", -0.9), ("NN", -2.2)]
        } else {
            &[("NN", -0.7), ("JJ", -1.5), ("VB", -2.0), ("RB", -2.2)]
        };
        entries.iter().map(|(t, w)| (t.to_string(), *w)).collect()
    }

    fn transition(&self, prev: &str, next: &str) -> f64 {
        self.model
            .tagger
            .transitions
            .get(prev)
            .and_then(|m| m.get(next))
            .copied()
            .unwrap_or(self.model.tagger.default_transition)
    }

    /// Standard bigram Viterbi over the candidate lattice. Candidates are
    /// pre-sorted, and a path only replaces the incumbent on a strictly
    /// greater score, so equal-scoring paths resolve identically on every
    /// run.
    fn viterbi(&self, lattice: &[Vec<(String, f64)>]) -> Vec<String> {
        let n = lattice.len();
        // (score, backpointer) per candidate per position
        let mut scores: Vec<Vec<(f64, usize)>> = Vec::with_capacity(n);

        let first: Vec<(f64, usize)> = lattice[0]
            .iter()
            .map(|(tag, emission)| (emission + self.transition(START_TAG, tag), 0))
            .collect();
        scores.push(first);

        for i in 1..n {
            let mut column = Vec::with_capacity(lattice[i].len());
            for (tag, emission) in &lattice[i] {
                let mut best = f64::NEG_INFINITY;
                let mut back = 0;
                for (k, (prev_tag, _)) in lattice[i - 1].iter().enumerate() {
                    let score = scores[i - 1][k].0 + self.transition(prev_tag, tag);
                    if score > best {
                        best = score;
                        back = k;
                    }
                }
                column.push((best + emission, back));
            }
            scores.push(column);
        }

        let mut best_last = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (k, (score, _)) in scores[n - 1].iter().enumerate() {
            if *score > best_score {
                best_score = *score;
                best_last = k;
            }
        }

        let mut path = vec![best_last; n];
        for i in (1..n).rev() {
            path[i - 1] = scores[i][path[i]].1;
        }
        path.iter()
            .enumerate()
            .map(|(i, &k)| lattice[i][k].0.clone())
            .collect()
    }
}

fn is_punctuation(surface: &str) -> bool {
    !surface.is_empty() && surface.chars().all(|c| c.is_ascii_punctuation())
}

fn punctuation_tag(surface: &str) -> &'static str {
    match surface {
        "." | "!" | "?" => ".",
        "," => ",",
        ";" | ":" | "--" => ":",
        "(" | "[" | "{" => "-LRB-",
        ")" | "]" | "}" => "-RRB-",
        "`" | "``" => "``",
        "'" | "\"" | "''" => "''",
        "$" => "$",
        "#" => "#",
        _ => "SYM",
    }
}

fn has_suffix(surface: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| surface.ends_with(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Tokenizer;

    fn tagger() -> Tagger {
        Tagger::new(Arc::new(ParserModel::builtin()))
    }

    fn tag_text(text: &str) -> Vec<String> {
        let tokens = Tokenizer::new().tokenize(text);
        tagger()
            .tag(&tokens)
            .unwrap()
            .into_iter()
            .map(|t| t.tag)
            .collect()
    }

    #[test]
    fn test_simple_declarative() {
        assert_eq!(tag_text("The cat sleeps ."), vec!["DT", "NN", "VBZ", "."]);
    }

    #[test]
    fn test_proper_noun_sentence() {
        assert_eq!(tag_text("John eats pizza ."), vec!["NNP", "VBZ", "NN", "."]);
    }

    #[test]
    fn test_unknown_words_fall_back() {
        // None of these are in the built-in lexicon
        let tags = tag_text("Zorblax grumbled wearily");
        assert_eq!(tags[0], "NNP"); // capitalized
        assert_eq!(tags[1], "VBD"); // -ed suffix
        assert_eq!(tags[2], "RB"); // -ly suffix
    }

    #[test]
    fn test_numbers() {
        let tags = tag_text("3 cats");
        assert_eq!(tags, vec!["CD", "NNS"]);
    }

    #[test]
    fn test_output_length_matches_input() {
        let tokens = Tokenizer::new().tokenize("a b c d e f g");
        let tagged = tagger().tag(&tokens).unwrap();
        assert_eq!(tagged.len(), tokens.len());
        for (token, tagged_token) in tokens.iter().zip(&tagged) {
            assert_eq!(token.index, tagged_token.index());
        }
    }

    #[test]
    fn test_empty_input() {
        let tagged = tagger().tag(&[]).unwrap();
        assert!(tagged.is_empty());
    }

    #[test]
    fn test_determinism() {
        let tokens = Tokenizer::new().tokenize("The quick brown fox jumps over the lazy dog .");
        let a = tagger().tag(&tokens).unwrap();
        let b = tagger().tag(&tokens).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_context_disambiguates() {
        // "works" is lexically ambiguous between VBZ and NNS; after a
        // proper noun the verb reading must win.
        let tags = tag_text("John works at Microsoft .");
        assert_eq!(tags, vec!["NNP", "VBZ", "IN", "NNP", "."]);
    }
}
