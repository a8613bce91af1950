pub mod label_vocabulary;
pub mod sentence;
pub mod tag_set;
pub mod tree;

pub use label_vocabulary::LabelVocabulary;
pub use sentence::Sentence;
pub use tag_set::TagSet;
pub use tree::{DependencyTree, Edge};
