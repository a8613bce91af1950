use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Vocabulary mapping dependency labels to integer IDs.
///
/// IDs are assigned in insertion order, so a vocabulary built from the same
/// label sequence is always identical. Persisted as a plain JSON array of
/// labels; the reverse index is rebuilt on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LabelVocabulary {
    id_to_label: Vec<String>,
    label_to_id: HashMap<String, usize>,
}

impl LabelVocabulary {
    pub fn new() -> Self {
        Self {
            id_to_label: Vec::new(),
            label_to_id: HashMap::new(),
        }
    }

    /// The Stanford-style label inventory used by the built-in model
    pub fn standard() -> Self {
        let labels = [
            "root", "nsubj", "dobj", "iobj", "det", "amod", "advmod", "nmod", "aux", "cop",
            "mark", "cc", "conj", "compound", "poss", "num", "prep", "pobj", "punct", "xcomp",
            "dep",
        ];
        let mut vocab = Self::new();
        for label in labels {
            vocab.get_or_create_id(label);
        }
        vocab
    }

    /// Get or create the ID for a label
    pub fn get_or_create_id(&mut self, label: &str) -> usize {
        if let Some(&id) = self.label_to_id.get(label) {
            id
        } else {
            let id = self.id_to_label.len();
            self.id_to_label.push(label.to_string());
            self.label_to_id.insert(label.to_string(), id);
            id
        }
    }

    pub fn get_id(&self, label: &str) -> Option<usize> {
        self.label_to_id.get(label).copied()
    }

    pub fn get_label(&self, id: usize) -> Option<&str> {
        self.id_to_label.get(id).map(|s| s.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.label_to_id.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.id_to_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_label.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.id_to_label
    }

    /// Save the vocabulary to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.id_to_label)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a vocabulary from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read label vocabulary {}: {}", path.display(), e))?;
        let labels: Vec<String> = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Invalid label vocabulary in {}: {}", path.display(), e))?;
        Ok(Self::from(labels))
    }
}

impl Default for LabelVocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<String>> for LabelVocabulary {
    fn from(labels: Vec<String>) -> Self {
        let mut vocab = Self::new();
        for label in labels {
            vocab.get_or_create_id(&label);
        }
        vocab
    }
}

impl From<LabelVocabulary> for Vec<String> {
    fn from(vocab: LabelVocabulary) -> Self {
        vocab.id_to_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_basic() {
        let mut vocab = LabelVocabulary::new();

        assert_eq!(vocab.get_or_create_id("nsubj"), 0);
        assert_eq!(vocab.get_or_create_id("dobj"), 1);
        assert_eq!(vocab.get_or_create_id("nsubj"), 0); // existing ID

        assert_eq!(vocab.get_id("nsubj"), Some(0));
        assert_eq!(vocab.get_id("missing"), None);
        assert_eq!(vocab.get_label(1), Some("dobj"));
        assert_eq!(vocab.get_label(2), None);
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_standard_inventory() {
        let vocab = LabelVocabulary::standard();
        assert!(vocab.contains("root"));
        assert!(vocab.contains("nsubj"));
        assert!(vocab.contains("punct"));
        assert_eq!(vocab.get_id("root"), Some(0));
    }

    #[test]
    fn test_save_load() {
        let mut vocab = LabelVocabulary::new();
        vocab.get_or_create_id("nsubj");
        vocab.get_or_create_id("dobj");

        let temp_path = std::env::temp_dir().join("test_label_vocab.json");
        vocab.save(&temp_path).unwrap();

        let loaded = LabelVocabulary::load(&temp_path).unwrap();
        assert_eq!(loaded, vocab);
        assert_eq!(loaded.get_id("dobj"), Some(1));

        let _ = fs::remove_file(temp_path);
    }
}
