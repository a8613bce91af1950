//! Core ParserEngine struct and constructors.
//!
//! The engine replaces the original process-wide singleton with an
//! explicitly constructed value: the model is injected once at build time,
//! validated, and shared read-only behind an `Arc`. Multiple independently
//! configured engines can coexist, and every per-call operation is free of
//! shared mutable state, so one engine may serve concurrent callers.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::data::{DependencyTree, Sentence};
use crate::engine::config::ParserConfig;
use crate::engine::parser_trait::Parser;
use crate::error::ParseError;
use crate::model::{load_model, ParserModel};
use crate::pipeline::{Decoder, DetailFormatter, ScoreMatrix, Scorer, Tagger, Tokenizer};
use crate::results::{ParseResult, ParsedSentence, SentencePart};
use crate::types::{TaggedToken, Token};

/// A fully assembled dependency parser
pub struct ParserEngine {
    model: Arc<ParserModel>,
    config: ParserConfig,
    tokenizer: Tokenizer,
    tagger: Tagger,
    scorer: Scorer,
    decoder: Decoder,
    formatter: DetailFormatter,
}

impl ParserEngine {
    /// Build an engine around an injected model with default configuration
    pub fn new(model: ParserModel) -> Result<Self> {
        Self::with_config(model, ParserConfig::default())
    }

    /// Build an engine around an injected model and configuration
    pub fn with_config(model: ParserModel, config: ParserConfig) -> Result<Self> {
        model
            .validate()
            .context("model failed validation at engine construction")?;

        let model = Arc::new(model);
        log::info!(
            "Initialized parser engine with model '{}' ({} tags, {} labels)",
            model.name,
            model.tag_set.len(),
            model.label_vocabulary.len()
        );

        Ok(Self {
            tokenizer: Tokenizer::new(),
            tagger: Tagger::new(model.clone()),
            scorer: Scorer::new(model.clone()),
            decoder: Decoder::new(model.clone()),
            formatter: DetailFormatter::new(),
            model,
            config,
        })
    }

    /// Build an engine from a YAML configuration file. The referenced model
    /// file is loaded and validated here, before any parse call is
    /// accepted; without a model path the built-in model is used.
    pub fn from_config<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config = ParserConfig::from_yaml(config_path)?;
        let model = match &config.model_path {
            Some(path) => load_model(path)?,
            None => {
                log::warn!("No model_path configured, using the built-in model");
                ParserModel::builtin()
            }
        };
        Self::with_config(model, config)
    }

    /// Engine over the built-in demonstration model
    pub fn builtin() -> Result<Self> {
        Self::new(ParserModel::builtin())
    }

    // Accessor methods
    pub fn model(&self) -> &ParserModel {
        &self.model
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Tokenize, tag, score and decode one sentence's token sequence
    fn parse_tokens(&self, tokens: &[Token]) -> Result<(Sentence, DependencyTree), ParseError> {
        if tokens.len() > self.config.max_sentence_length {
            return Err(ParseError::SentenceTooLong {
                len: tokens.len(),
                max: self.config.max_sentence_length,
            });
        }
        let sentence = Sentence::new(self.tagger.tag(tokens)?);
        let scores = self.scorer.score(&sentence)?;
        let tree = self.decoder.decode(&sentence, &scores)?;
        Ok((sentence, tree))
    }

    /// Run the full pipeline over every sentence of the input.
    ///
    /// Empty input yields an empty result, not an error.
    fn analyze(&self, text: &str) -> Result<Vec<(Sentence, DependencyTree)>, ParseError> {
        let tokens = self.tokenizer.tokenize(text);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let sentences = if self.config.split_sentences {
            self.tokenizer.segment(&tokens)
        } else {
            vec![tokens]
        };
        sentences
            .iter()
            .map(|tokens| self.parse_tokens(tokens))
            .collect()
    }

    /// Parse into structured per-sentence results
    pub fn parse_sentences(&self, text: &str) -> Result<Vec<ParsedSentence>, ParseError> {
        Ok(self
            .analyze(text)?
            .iter()
            .map(|(sentence, tree)| ParsedSentence::from_tree(sentence, tree))
            .collect())
    }

    /// Parse into a bundled result with counts
    pub fn parse_result(&self, text: &str) -> Result<ParseResult, ParseError> {
        Ok(ParseResult::new(self.parse_sentences(text)?))
    }

    /// Diagnostic rendering of the parse, stable byte-for-byte across
    /// repeated calls on identical input
    pub fn sentence_detail(&self, text: &str) -> Result<String, ParseError> {
        let parses = self.analyze(text)?;
        Ok(self.formatter.format(text, &parses))
    }

    /// Parse many inputs in parallel. Inputs are independent units of work:
    /// a failure for one never affects the others, and results come back in
    /// input order.
    pub fn parse_batch(&self, texts: &[String]) -> Vec<Result<ParseResult, ParseError>> {
        texts
            .par_iter()
            .map(|text| self.parse_result(text))
            .collect()
    }
}

impl Parser for ParserEngine {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenizer.tokenize(text)
    }

    fn tag(&self, tokens: &[Token]) -> Result<Vec<TaggedToken>, ParseError> {
        self.tagger.tag(tokens)
    }

    fn score(&self, sentence: &Sentence) -> Result<ScoreMatrix, ParseError> {
        self.scorer.score(sentence)
    }

    fn decode(
        &self,
        sentence: &Sentence,
        scores: &ScoreMatrix,
    ) -> Result<DependencyTree, ParseError> {
        self.decoder.decode(sentence, scores)
    }

    fn parse(&self, text: &str) -> Result<Vec<SentencePart>, ParseError> {
        Ok(self.parse_result(text)?.parts())
    }

    fn detail(&self, text: &str) -> Result<String, ParseError> {
        self.sentence_detail(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ParserEngine {
        ParserEngine::builtin().unwrap()
    }

    #[test]
    fn test_parse_length_matches_tokenizer() {
        let engine = engine();
        let text = "The cat sleeps. The dog barks.";
        let parts = engine.parse(text).unwrap();
        let tokens = engine.tokenize(text);
        assert_eq!(parts.len(), tokens.len());
    }

    #[test]
    fn test_golden_structure() {
        let engine = engine();
        let parts = engine.parse("The cat sleeps.").unwrap();

        assert_eq!(parts.len(), 4);
        assert_eq!(parts[2].text, "sleeps");
        assert!(parts[2].is_root());
        assert_eq!(parts[1].head, 2);
        assert_eq!(parts[1].label, "nsubj");
        assert_eq!(parts[0].head, 1);
        assert_eq!(parts[0].label, "det");
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        let engine = engine();
        assert!(engine.parse("").unwrap().is_empty());
        assert!(engine.parse("   ").unwrap().is_empty());
        assert_eq!(engine.parse_result("").unwrap(), ParseResult::empty());
    }

    #[test]
    fn test_single_token_input() {
        let engine = engine();
        let parts = engine.parse("Hello.").unwrap();

        assert_eq!(parts.len(), 2);
        assert!(parts[0].is_root());
        assert_eq!(parts[0].tag, "UH");
        assert_eq!(parts[1].label, "punct");
    }

    #[test]
    fn test_multi_sentence_indices_are_sentence_local() {
        let engine = engine();
        let sentences = engine
            .parse_sentences("The cat sleeps. The dog barks.")
            .unwrap();

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].parts[0].index, 0);
        // spans stay global
        assert!(sentences[1].parts[0].start > sentences[0].parts.last().unwrap().start);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let engine = engine();
        let text = "John works at Microsoft.";
        assert_eq!(engine.parse(text).unwrap(), engine.parse(text).unwrap());
        assert_eq!(
            engine.sentence_detail(text).unwrap(),
            engine.sentence_detail(text).unwrap()
        );
    }

    #[test]
    fn test_detail_is_stable_across_engines() {
        let text = "The cat sleeps.";
        let a = engine().sentence_detail(text).unwrap();
        let b = engine().sentence_detail(text).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sentence_length_limit() {
        let model = ParserModel::builtin();
        let config = ParserConfig {
            max_sentence_length: 3,
            ..ParserConfig::default()
        };
        let engine = ParserEngine::with_config(model, config).unwrap();

        let err = engine.parse("one two three four five").unwrap_err();
        assert!(matches!(err, ParseError::SentenceTooLong { len: 5, max: 3 }));
    }

    #[test]
    fn test_batch_isolation() {
        let model = ParserModel::builtin();
        let config = ParserConfig {
            max_sentence_length: 4,
            ..ParserConfig::default()
        };
        let engine = ParserEngine::with_config(model, config).unwrap();

        let texts = vec![
            "The cat sleeps.".to_string(),
            "this sentence is far too long".to_string(),
            "John eats pizza.".to_string(),
        ];
        let results = engine.parse_batch(&texts);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_trees_are_well_formed() {
        let engine = engine();
        let sentences = engine
            .parse_sentences("She sees the small cat. Dogs and cats sleep quickly.")
            .unwrap();

        for sentence in sentences {
            let roots = sentence.parts.iter().filter(|p| p.is_root()).count();
            assert_eq!(roots, 1);
            // follow head pointers from every token; must reach the root
            // within n steps
            for part in &sentence.parts {
                let mut current = part.index;
                let mut steps = 0;
                while sentence.parts[current].head >= 0 {
                    current = sentence.parts[current].head as usize;
                    steps += 1;
                    assert!(steps <= sentence.parts.len());
                }
            }
        }
    }
}
