//! EL 補完推論エンジン
//!
//! このクレートは EL 記述論理の推論を提供します:
//! - TBox 正規化 (等価公理の GCI 化)
//! - 補完モデルによる包含判定
//! - クラス階層の計算
//! - ELオントロジーローダー

pub mod completion;
pub mod loader;
pub mod ontology;
pub mod reasoner;
pub mod tbox;

pub use completion::CompletionModel;
pub use loader::{load_ontology, parse_ontology};
pub use ontology::Ontology;
pub use reasoner::{ConceptRef, ElReasoner};
pub use tbox::TBox;

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown concept: {0}")]
    UnknownConcept(String),

    #[error("Model not initialized before rule application")]
    UninitializedModel,

    #[error("Axiom outside EL: {0}")]
    NotInEl(String),
}
