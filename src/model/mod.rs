pub mod loader;
pub mod parser_model;

pub use loader::{load_model, save_model};
pub use parser_model::{LabelRules, ParserModel, ScorerWeights, TaggerWeights, START_TAG};
