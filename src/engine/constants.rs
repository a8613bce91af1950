//! Shared constants for consistency across the codebase

/// Head value of the root token in externally visible results
pub const ROOT_HEAD: i64 = -1;

/// Label assigned to punctuation dependents
pub const PUNCT_LABEL: &str = "punct";

/// Default location of the engine configuration file
pub const DEFAULT_CONFIG_PATH: &str = "configs/parser.yaml";

/// Default cap on tokens per sentence; longer sentences are rejected
/// rather than decoded at quadratic cost
pub const DEFAULT_MAX_SENTENCE_LENGTH: usize = 200;
