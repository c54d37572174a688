//! # Sprout
//!
//! Short-SMILES generation by bounded breadth-first search over a trained
//! next-token model, pruned by an external validity oracle.
//!
//! Sprout wraps the core search in an engine that owns the model, the
//! vocabulary and a seedable sampling source:
//! - **Seed priming**: carry model state over an arbitrary seed prefix
//! - **Restart loop**: independent attempts under one global sample budget
//! - **Validity pruning**: only oracle-approved candidates survive
//! - **Shortest-first ranking**: the shortest accepted strings win
//!
//! ## Quick Start
//!
//! ```rust
//! use sprout::prelude::*;
//!
//! fn main() -> sprout::Result<()> {
//!     // A real deployment supplies a trained SequenceModel and a
//!     // cheminformatics-backed oracle here.
//!     let engine = Engine::new(
//!         UniformModel::new(Vocabulary::default_smiles().len()),
//!         StructuralOracle::new(),
//!     )?;
//!     let mut engine = engine.with_rng_seed(0);
//!
//!     let candidates = engine.generate("CCO")?;
//!     assert!(candidates.len() <= 5);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Re-export core crate
pub use sprout_core::*;

mod engine;

pub use engine::Engine;

/// Commonly used types.
pub mod prelude {
    pub use crate::engine::Engine;
    pub use crate::{
        error::{Result, SproutError},
        model::{SequenceModel, UniformModel},
        oracle::{StructuralOracle, ValidityOracle},
        search::{GenerateConfig, GenerateOutcome, Generator},
        tokenizer::SmilesTokenizer,
        vocab::{TokenId, Vocabulary},
    };

    // Re-export useful external types
    pub use tracing;
}
