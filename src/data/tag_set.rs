use serde::{Deserialize, Serialize};

/// The closed part-of-speech tag inventory the tagger may emit.
///
/// A tag outside this set indicates a model/vocabulary mismatch and is
/// reported as `ParseError::UnknownTag` rather than silently accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new(tags: Vec<String>) -> Self {
        Self { tags }
    }

    /// The Penn Treebank inventory used by the built-in model
    pub fn penn_treebank() -> Self {
        let tags = [
            "CC", "CD", "DT", "EX", "FW", "IN", "JJ", "JJR", "JJS", "LS", "MD", "NN", "NNS",
            "NNP", "NNPS", "PDT", "POS", "PRP", "PRP$", "RB", "RBR", "RBS", "RP", "SYM", "TO",
            "UH", "VB", "VBD", "VBG", "VBN", "VBP", "VBZ", "WDT", "WP", "WP$", "WRB", ".", ",",
            ":", "``", "''", "-LRB-", "-RRB-", "$", "#",
        ];
        Self::new(tags.iter().map(|t| t.to_string()).collect())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Position of a tag in the inventory. Called rarely (validation and
    /// deterministic ordering), so a linear scan is acceptable.
    pub fn id_of(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t == tag)
    }

    pub fn tag_at(&self, id: usize) -> Option<&str> {
        self.tags.get(id).map(|t| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penn_treebank_inventory() {
        let tags = TagSet::penn_treebank();

        assert!(tags.contains("NN"));
        assert!(tags.contains("VBZ"));
        assert!(tags.contains("."));
        assert!(!tags.contains("NOUN")); // universal tags are not in this set
        assert!(!tags.is_empty());
    }

    #[test]
    fn test_id_roundtrip() {
        let tags = TagSet::penn_treebank();
        let id = tags.id_of("DT").unwrap();
        assert_eq!(tags.tag_at(id), Some("DT"));
        assert_eq!(tags.id_of("???"), None);
        assert_eq!(tags.tag_at(10_000), None);
    }
}
