//! # Sprout Core
//!
//! Core engine for generating short, chemically valid SMILES strings from a
//! trained next-token model.
//!
//! This crate provides:
//! - **Vocabulary**: fixed, ordered token table with a separator token
//! - **Tokenizer**: atom-level SMILES tokenization with longest-match rules
//! - **SequenceModel**: the contract for a stateful next-token predictor
//! - **ValidityOracle**: the contract for the external structure check
//! - **Generator**: bounded breadth-first search over model continuations,
//!   returning the shortest accepted candidates

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod model;
pub mod oracle;
pub mod sample;
pub mod search;
pub mod tokenizer;
pub mod vocab;

pub use error::{Result, SproutError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Result, SproutError};
    pub use crate::model::{SequenceModel, UniformModel};
    pub use crate::oracle::{StructuralOracle, ValidityOracle};
    pub use crate::search::{GenerateConfig, GenerateOutcome, Generator};
    pub use crate::tokenizer::SmilesTokenizer;
    pub use crate::vocab::{TokenId, Vocabulary};
}
