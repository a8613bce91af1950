//! Pre-trained parser model: tag set, tagger weights, scorer weights, and
//! dependency label rules.
//!
//! The model is an injected, read-only collaborator: it is loaded (or built)
//! once, validated up front, and then shared across threads behind an `Arc`
//! for the lifetime of the engine. Nothing in the parsing core mutates it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::{LabelVocabulary, TagSet};
use crate::error::ParseError;

/// Weights for the part-of-speech tagging stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggerWeights {
    /// Log-probability of a tag given the lowercased surface form
    pub lexicon: HashMap<String, HashMap<String, f64>>,
    /// Log-probability of a tag given the previous tag; the sentence start
    /// is keyed by `START_TAG`
    pub transitions: HashMap<String, HashMap<String, f64>>,
    /// Fallback log-probability for unobserved transitions
    pub default_transition: f64,
}

/// Arc-factored weights for the dependency scoring stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerWeights {
    /// Attachment weight keyed `"<head-coarse> <dep-coarse> <L|R>"`
    pub attachments: HashMap<String, f64>,
    /// Weight of attaching a token of the given coarse tag to the root
    pub root_attachments: HashMap<String, f64>,
    /// Fallback for unobserved attachment pairs
    pub default_attachment: f64,
    /// Fallback for root attachment of unobserved coarse tags
    pub default_root: f64,
    /// Penalty subtracted per unit of linear distance beyond adjacency
    pub distance_decay: f64,
    /// Lexical affinity bonus keyed `"<head-word> <dep-word>"` (lowercased)
    pub lexical: HashMap<String, f64>,
}

/// Deterministic mapping from attachment configurations to dependency labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelRules {
    /// Label keyed `"<head-coarse> <dep-coarse> <L|R>"`
    pub rules: HashMap<String, String>,
    /// Label of the single root arc
    pub root_label: String,
    /// Label for attachments not covered by any rule
    pub default_label: String,
}

/// Sentence-start marker used in the transition table
pub const START_TAG: &str = "<s>";

/// A complete, validated parser model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserModel {
    pub name: String,
    pub tag_set: TagSet,
    pub tagger: TaggerWeights,
    pub scorer: ScorerWeights,
    pub labels: LabelRules,
    pub label_vocabulary: LabelVocabulary,
}

impl ParserModel {
    /// Check the model for internal consistency before any parse call is
    /// accepted: non-empty tag set, lexicon and transition tags inside the
    /// tag set, and finite weights everywhere.
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.tag_set.is_empty() {
            return Err(ParseError::ModelLoad("tag set is empty".to_string()));
        }

        for tags in self.tagger.lexicon.values() {
            for (tag, weight) in tags {
                if !self.tag_set.contains(tag) {
                    return Err(ParseError::UnknownTag { tag: tag.clone() });
                }
                if !weight.is_finite() {
                    return Err(ParseError::ModelLoad(format!(
                        "non-finite lexicon weight for tag '{}'",
                        tag
                    )));
                }
            }
        }

        for (prev, nexts) in &self.tagger.transitions {
            if prev != START_TAG && !self.tag_set.contains(prev) {
                return Err(ParseError::UnknownTag { tag: prev.clone() });
            }
            for (tag, weight) in nexts {
                if !self.tag_set.contains(tag) {
                    return Err(ParseError::UnknownTag { tag: tag.clone() });
                }
                if !weight.is_finite() {
                    return Err(ParseError::ModelLoad(format!(
                        "non-finite transition weight {} -> {}",
                        prev, tag
                    )));
                }
            }
        }

        let scorer = &self.scorer;
        let all_finite = scorer.attachments.values().all(|w| w.is_finite())
            && scorer.root_attachments.values().all(|w| w.is_finite())
            && scorer.lexical.values().all(|w| w.is_finite())
            && scorer.default_attachment.is_finite()
            && scorer.default_root.is_finite()
            && scorer.distance_decay.is_finite();
        if !all_finite {
            return Err(ParseError::ModelLoad(
                "scorer weights contain a non-finite value".to_string(),
            ));
        }

        if self.labels.root_label.is_empty() || self.labels.default_label.is_empty() {
            return Err(ParseError::ModelLoad(
                "root and default labels must be non-empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Collapse a fine-grained tag to the coarse family used as the key
    /// space of the attachment and label tables.
    pub fn coarse_tag(tag: &str) -> &str {
        if tag.starts_with("PRP") {
            "PRP"
        } else if tag.starts_with("VB") {
            "VB"
        } else if tag.starts_with("NN") {
            "NN"
        } else if tag.starts_with("JJ") {
            "JJ"
        } else if tag.starts_with("RB") {
            "RB"
        } else {
            tag
        }
    }

    /// The built-in demonstration model: a small hand-curated English
    /// lexicon and weight set sufficient for short declarative sentences.
    /// Real deployments load a trained model file instead.
    pub fn builtin() -> Self {
        Self {
            name: "builtin-en-demo".to_string(),
            tag_set: TagSet::penn_treebank(),
            tagger: builtin_tagger(),
            scorer: builtin_scorer(),
            labels: builtin_labels(),
            label_vocabulary: LabelVocabulary::standard(),
        }
    }
}

fn weights(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries.iter().map(|(k, w)| (k.to_string(), *w)).collect()
}

fn tag_weights(entries: &[(&str, &[(&str, f64)])]) -> HashMap<String, HashMap<String, f64>> {
    entries
        .iter()
        .map(|(k, tags)| (k.to_string(), weights(tags)))
        .collect()
}

fn builtin_tagger() -> TaggerWeights {
    // Closed-class words carry a single dominant tag; a handful of
    // open-class entries cover the demonstration sentences. Ambiguous
    // words list alternatives with lower log-probabilities.
    let lexicon = tag_weights(&[
        ("the", &[("DT", 0.0)]),
        ("a", &[("DT", 0.0)]),
        ("an", &[("DT", 0.0)]),
        ("this", &[("DT", -0.2), ("WDT", -2.5)]),
        ("that", &[("DT", -0.7), ("IN", -1.0), ("WDT", -1.8)]),
        ("these", &[("DT", 0.0)]),
        ("those", &[("DT", 0.0)]),
        ("of", &[("IN", 0.0)]),
        ("in", &[("IN", 0.0)]),
        ("on", &[("IN", -0.1), ("RP", -2.5)]),
        ("at", &[("IN", 0.0)]),
        ("by", &[("IN", 0.0)]),
        ("with", &[("IN", 0.0)]),
        ("from", &[("IN", 0.0)]),
        ("for", &[("IN", 0.0)]),
        ("over", &[("IN", -0.2), ("RP", -2.0)]),
        ("under", &[("IN", 0.0)]),
        ("to", &[("TO", -0.2), ("IN", -1.6)]),
        ("and", &[("CC", 0.0)]),
        ("or", &[("CC", 0.0)]),
        ("but", &[("CC", -0.2), ("IN", -2.5)]),
        ("is", &[("VBZ", 0.0)]),
        ("are", &[("VBP", 0.0)]),
        ("was", &[("VBD", 0.0)]),
        ("were", &[("VBD", 0.0)]),
        ("be", &[("VB", 0.0)]),
        ("been", &[("VBN", 0.0)]),
        ("being", &[("VBG", 0.0)]),
        ("has", &[("VBZ", 0.0)]),
        ("have", &[("VBP", -0.2), ("VB", -1.5)]),
        ("had", &[("VBD", 0.0)]),
        ("do", &[("VBP", -0.3), ("VB", -1.2)]),
        ("does", &[("VBZ", 0.0)]),
        ("did", &[("VBD", 0.0)]),
        ("not", &[("RB", 0.0)]),
        ("i", &[("PRP", 0.0)]),
        ("you", &[("PRP", 0.0)]),
        ("he", &[("PRP", 0.0)]),
        ("she", &[("PRP", 0.0)]),
        ("it", &[("PRP", 0.0)]),
        ("we", &[("PRP", 0.0)]),
        ("they", &[("PRP", 0.0)]),
        ("my", &[("PRP$", 0.0)]),
        ("your", &[("PRP$", 0.0)]),
        ("his", &[("PRP$", -0.2), ("PRP", -1.8)]),
        ("her", &[("PRP$", -0.4), ("PRP", -1.1)]),
        ("its", &[("PRP$", 0.0)]),
        ("our", &[("PRP$", 0.0)]),
        ("their", &[("PRP$", 0.0)]),
        ("will", &[("MD", -0.2), ("NN", -2.5)]),
        ("would", &[("MD", 0.0)]),
        ("can", &[("MD", -0.2), ("NN", -3.0)]),
        ("could", &[("MD", 0.0)]),
        ("may", &[("MD", -0.3), ("NNP", -2.0)]),
        ("must", &[("MD", 0.0)]),
        ("should", &[("MD", 0.0)]),
        ("there", &[("EX", -0.5), ("RB", -1.0)]),
        ("hello", &[("UH", 0.0)]),
        // Open-class demonstration vocabulary
        ("cat", &[("NN", 0.0)]),
        ("cats", &[("NNS", 0.0)]),
        ("dog", &[("NN", 0.0)]),
        ("dogs", &[("NNS", 0.0)]),
        ("mat", &[("NN", 0.0)]),
        ("mouse", &[("NN", 0.0)]),
        ("bird", &[("NN", 0.0)]),
        ("fox", &[("NN", 0.0)]),
        ("man", &[("NN", 0.0)]),
        ("woman", &[("NN", 0.0)]),
        ("house", &[("NN", -0.2), ("VB", -2.5)]),
        ("pizza", &[("NN", 0.0)]),
        ("parser", &[("NN", 0.0)]),
        ("sentence", &[("NN", 0.0)]),
        ("tree", &[("NN", 0.0)]),
        ("john", &[("NNP", 0.0)]),
        ("mary", &[("NNP", 0.0)]),
        ("smith", &[("NNP", 0.0)]),
        ("london", &[("NNP", 0.0)]),
        ("microsoft", &[("NNP", 0.0)]),
        ("sleeps", &[("VBZ", 0.0)]),
        ("sleep", &[("VB", -0.4), ("VBP", -1.2), ("NN", -1.8)]),
        ("slept", &[("VBD", 0.0)]),
        ("eats", &[("VBZ", 0.0)]),
        ("eat", &[("VB", -0.4), ("VBP", -1.2)]),
        ("ate", &[("VBD", 0.0)]),
        ("works", &[("VBZ", -0.3), ("NNS", -1.5)]),
        ("work", &[("VB", -0.6), ("VBP", -1.2), ("NN", -1.0)]),
        ("worked", &[("VBD", -0.3), ("VBN", -1.3)]),
        ("sat", &[("VBD", 0.0)]),
        ("sits", &[("VBZ", 0.0)]),
        ("sit", &[("VB", -0.3), ("VBP", -1.4)]),
        ("sees", &[("VBZ", 0.0)]),
        ("saw", &[("VBD", -0.2), ("NN", -2.2)]),
        ("see", &[("VB", -0.3), ("VBP", -1.4)]),
        ("likes", &[("VBZ", -0.2), ("NNS", -2.0)]),
        ("like", &[("VB", -0.8), ("VBP", -1.0), ("IN", -1.2)]),
        ("runs", &[("VBZ", -0.3), ("NNS", -1.8)]),
        ("ran", &[("VBD", 0.0)]),
        ("jumps", &[("VBZ", -0.3), ("NNS", -1.8)]),
        ("jumped", &[("VBD", 0.0)]),
        ("barks", &[("VBZ", -0.3), ("NNS", -1.8)]),
        ("quick", &[("JJ", 0.0)]),
        ("brown", &[("JJ", -0.3), ("NN", -1.8)]),
        ("lazy", &[("JJ", 0.0)]),
        ("big", &[("JJ", 0.0)]),
        ("small", &[("JJ", 0.0)]),
        ("smart", &[("JJ", 0.0)]),
        ("old", &[("JJ", 0.0)]),
        ("quickly", &[("RB", 0.0)]),
        ("slowly", &[("RB", 0.0)]),
        ("very", &[("RB", 0.0)]),
        ("one", &[("CD", -0.4), ("NN", -1.5), ("PRP", -2.5)]),
        ("two", &[("CD", 0.0)]),
        ("three", &[("CD", 0.0)]),
    ]);

    let transitions = tag_weights(&[
        (
            START_TAG,
            &[
                ("DT", -1.0),
                ("NNP", -1.2),
                ("PRP", -1.2),
                ("NN", -1.8),
                ("JJ", -2.0),
                ("EX", -2.2),
                ("RB", -2.2),
                ("IN", -2.4),
                ("VB", -2.4),
                ("UH", -2.4),
                ("CD", -2.4),
                ("MD", -2.8),
                ("NNS", -1.9),
            ],
        ),
        (
            "DT",
            &[("NN", -0.3), ("JJ", -1.2), ("NNS", -1.4), ("NNP", -1.8), ("CD", -2.2)],
        ),
        (
            "JJ",
            &[("NN", -0.5), ("NNS", -1.1), ("JJ", -1.8), ("IN", -2.2), (",", -2.4), (".", -2.6)],
        ),
        (
            "NN",
            &[
                ("VBZ", -0.8),
                ("VBD", -1.0),
                ("IN", -1.5),
                ("NN", -1.7),
                (".", -1.7),
                (",", -2.0),
                ("CC", -2.0),
                ("MD", -2.0),
                ("POS", -2.4),
                ("WDT", -2.6),
            ],
        ),
        (
            "NNS",
            &[("VBP", -0.8), ("VBD", -1.0), ("IN", -1.5), (".", -1.7), (",", -2.0), ("CC", -2.0), ("MD", -2.0)],
        ),
        (
            "NNP",
            &[("NNP", -1.0), ("VBZ", -0.8), ("VBD", -1.1), ("IN", -1.8), (".", -1.8), (",", -2.0), ("CC", -2.2), ("MD", -2.0), ("POS", -2.2)],
        ),
        (
            "PRP",
            &[("VBP", -0.7), ("VBD", -0.9), ("VBZ", -1.0), ("MD", -1.6), (".", -2.4)],
        ),
        ("PRP$", &[("NN", -0.4), ("JJ", -1.4), ("NNS", -1.4)]),
        (
            "VBZ",
            &[("DT", -0.8), ("IN", -1.3), ("RB", -1.4), (".", -1.5), ("JJ", -1.6), ("NN", -1.8), ("TO", -1.8), ("VBN", -2.0), ("PRP", -2.0), ("NNP", -2.0), ("VBG", -2.2)],
        ),
        (
            "VBD",
            &[("DT", -0.8), ("IN", -1.2), ("RB", -1.4), (".", -1.5), ("JJ", -1.7), ("NN", -1.8), ("TO", -1.8), ("VBN", -2.0), ("PRP", -2.0), ("NNP", -2.0)],
        ),
        (
            "VBP",
            &[("DT", -0.9), ("IN", -1.3), ("RB", -1.3), (".", -1.6), ("JJ", -1.7), ("NN", -1.9), ("TO", -1.7), ("VBN", -2.0), ("PRP", -2.1), ("VBG", -2.1)],
        ),
        ("VB", &[("DT", -0.8), ("IN", -1.4), ("NN", -1.6), ("PRP", -1.7), ("RB", -1.7), (".", -1.9), ("JJ", -2.0), ("TO", -2.0)]),
        ("VBN", &[("IN", -0.8), ("RB", -1.8), (".", -1.4), (",", -2.0), ("TO", -1.8)]),
        ("VBG", &[("DT", -0.9), ("IN", -1.4), ("NN", -1.6), (".", -1.8)]),
        (
            "IN",
            &[("DT", -0.5), ("NN", -1.3), ("NNP", -1.3), ("PRP", -1.8), ("JJ", -2.0), ("NNS", -1.8), ("CD", -2.2), ("PRP$", -1.9)],
        ),
        ("TO", &[("VB", -0.4), ("DT", -1.5), ("NN", -2.0), ("NNP", -2.0)]),
        ("MD", &[("VB", -0.3), ("RB", -1.6), ("PRP", -2.6)]),
        (
            "RB",
            &[("JJ", -1.0), ("VB", -1.3), ("VBD", -1.4), ("VBZ", -1.6), ("VBN", -1.7), ("RB", -1.9), ("IN", -2.0), (".", -1.8)],
        ),
        ("CD", &[("NN", -0.8), ("NNS", -0.8), (".", -1.8), ("IN", -2.0)]),
        ("CC", &[("NN", -1.2), ("NNP", -1.3), ("DT", -1.3), ("PRP", -1.5), ("VB", -1.8), ("VBZ", -1.9), ("VBD", -1.9), ("JJ", -1.8)]),
        ("EX", &[("VBZ", -0.4), ("VBD", -0.8), ("VBP", -1.2)]),
        ("UH", &[(",", -0.7), (".", -0.8)]),
        ("POS", &[("NN", -0.5), ("JJ", -1.5), ("NNS", -1.2)]),
        (",", &[("CC", -1.4), ("DT", -1.5), ("NN", -1.8), ("NNP", -1.8), ("PRP", -1.8), ("WDT", -2.2), ("VBG", -2.2), ("RB", -2.2), ("JJ", -2.1), ("IN", -2.0)]),
        (".", &[(".", -2.0)]),
        ("WDT", &[("VBZ", -0.8), ("VBD", -1.0), ("VBP", -1.2)]),
    ]);

    TaggerWeights {
        lexicon,
        transitions,
        default_transition: -4.0,
    }
}

fn builtin_scorer() -> ScorerWeights {
    // Attachment keys are "<head-coarse> <dep-coarse> <direction>", where
    // direction L means the dependent precedes its head.
    let attachments = weights(&[
        ("VB NN L", 6.0),
        ("VB NN R", 5.5),
        ("VB PRP L", 6.0),
        ("VB PRP R", 4.5),
        ("VB EX L", 5.5),
        ("VB RB L", 3.2),
        ("VB RB R", 3.4),
        ("VB IN R", 3.6),
        ("VB TO R", 3.2),
        ("VB MD L", 4.2),
        ("VB VB R", 3.4),
        ("VB CC R", 2.2),
        ("VB . R", 2.6),
        ("VB , R", 2.1),
        ("VB , L", 1.8),
        ("NN DT L", 5.2),
        ("NN JJ L", 4.6),
        ("NN NN L", 3.6),
        ("NN CD L", 3.2),
        ("NN PRP$ L", 4.6),
        ("NN POS L", 3.0),
        ("NN IN R", 2.2),
        ("NN CC R", 2.0),
        ("NN NN R", 1.6),
        ("JJ RB L", 3.4),
        ("JJ DT L", 2.4),
        ("IN NN R", 5.2),
        ("IN PRP R", 4.6),
        ("IN CD R", 3.2),
        ("TO VB R", 4.4),
        ("RB RB L", 2.2),
    ]);

    let root_attachments = weights(&[
        ("VB", 8.0),
        ("MD", 5.0),
        ("NN", 4.0),
        ("JJ", 3.2),
        ("UH", 3.2),
        ("CD", 2.2),
    ]);

    ScorerWeights {
        attachments,
        root_attachments,
        default_attachment: 0.5,
        default_root: 0.5,
        distance_decay: 0.6,
        lexical: weights(&[("works at", 1.0), ("sat on", 1.0), ("eats pizza", 0.5)]),
    }
}

fn builtin_labels() -> LabelRules {
    let rules: HashMap<String, String> = [
        ("VB NN L", "nsubj"),
        ("VB NN R", "dobj"),
        ("VB PRP L", "nsubj"),
        ("VB PRP R", "dobj"),
        ("VB EX L", "nsubj"),
        ("VB RB L", "advmod"),
        ("VB RB R", "advmod"),
        ("VB IN R", "prep"),
        ("VB TO R", "prep"),
        ("VB MD L", "aux"),
        ("VB VB R", "xcomp"),
        ("VB CC R", "cc"),
        ("NN DT L", "det"),
        ("NN JJ L", "amod"),
        ("NN NN L", "compound"),
        ("NN CD L", "num"),
        ("NN PRP$ L", "poss"),
        ("NN POS L", "poss"),
        ("NN IN R", "prep"),
        ("NN CC R", "cc"),
        ("NN NN R", "conj"),
        ("JJ RB L", "advmod"),
        ("JJ DT L", "det"),
        ("IN NN R", "pobj"),
        ("IN PRP R", "pobj"),
        ("IN CD R", "pobj"),
        ("TO VB R", "xcomp"),
        ("RB RB L", "advmod"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    LabelRules {
        rules,
        root_label: "root".to_string(),
        default_label: "dep".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_model_validates() {
        let model = ParserModel::builtin();
        assert!(model.validate().is_ok());
        assert_eq!(model.name, "builtin-en-demo");
    }

    #[test]
    fn test_coarse_tags() {
        assert_eq!(ParserModel::coarse_tag("VBZ"), "VB");
        assert_eq!(ParserModel::coarse_tag("NNPS"), "NN");
        assert_eq!(ParserModel::coarse_tag("PRP$"), "PRP");
        assert_eq!(ParserModel::coarse_tag("JJR"), "JJ");
        assert_eq!(ParserModel::coarse_tag("DT"), "DT");
        assert_eq!(ParserModel::coarse_tag("."), ".");
    }

    #[test]
    fn test_validate_rejects_unknown_lexicon_tag() {
        let mut model = ParserModel::builtin();
        model
            .tagger
            .lexicon
            .insert("bogus".to_string(), [("XYZ".to_string(), 0.0)].into());
        assert!(matches!(
            model.validate(),
            Err(ParseError::UnknownTag { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_weight() {
        let mut model = ParserModel::builtin();
        model
            .scorer
            .attachments
            .insert("VB NN L".to_string(), f64::NAN);
        assert!(matches!(model.validate(), Err(ParseError::ModelLoad(_))));
    }

    #[test]
    fn test_model_roundtrips_through_json() {
        let model = ParserModel::builtin();
        let json = serde_json::to_string(&model).unwrap();
        let restored: ParserModel = serde_json::from_str(&json).unwrap();
        assert!(restored.validate().is_ok());
        assert_eq!(restored.name, model.name);
        assert_eq!(restored.tag_set, model.tag_set);
    }
}
