//! Breadth-first generation over a next-token model.
//!
//! The engine explores continuations of a seed string in rounds: every
//! branch alive at the current depth takes one model step, two distinct
//! next tokens are sampled from its distribution, and each drawn token
//! either finishes the branch (separator / validity-gated acceptance) or
//! spawns a child for the next round. Whole attempts restart from the seed
//! until enough candidates accumulate or the global sample budget runs out.
//!
//! # Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`Branch`] | One partial sequence with its owned model state |
//! | [`Frontier`] | FIFO queue of branches, taken one full round at a time |
//! | [`Generator`] | Restart loop, expansion rounds, result ranking |
//! | [`GenerateConfig`] | Budgets and depth limits |
//!
//! # Example
//!
//! ```
//! use sprout_core::model::UniformModel;
//! use sprout_core::search::{GenerateConfig, Generator};
//! use sprout_core::tokenizer::SmilesTokenizer;
//! use sprout_core::vocab::Vocabulary;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let vocab = Vocabulary::default_smiles();
//! let tokenizer = SmilesTokenizer::new();
//! let model = UniformModel::new(vocab.len());
//! let oracle = |candidate: &str| !candidate.trim_end().is_empty();
//!
//! let generator = Generator::new(&vocab, &tokenizer, &model, &oracle, GenerateConfig::default());
//! let mut rng = StdRng::seed_from_u64(0);
//! let outcome = generator.generate("C", &mut rng).unwrap();
//! assert!(outcome.candidates.len() <= 5);
//! ```

mod bfs;
mod frontier;

pub use bfs::{GenerateConfig, GenerateOutcome, Generator};
pub use frontier::{Branch, Frontier};
