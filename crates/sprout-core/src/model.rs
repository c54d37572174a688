//! Next-token model contract.
//!
//! The engine consumes a frozen, pre-trained model through a single-step
//! interface: given one token id and an optional carried state, produce raw
//! scores over the vocabulary and the successor state. Loading,
//! architecture and weights are the implementation's concern.

use crate::error::Result;
use crate::vocab::TokenId;

/// A stateful next-token predictor.
///
/// Implementations must behave as pure functions of `(token, state)`: the
/// returned state is owned by the caller and forked by cloning, so no call
/// may mutate buffers shared with previously returned states.
pub trait SequenceModel {
    /// Opaque carried state. Cloned once per branch that continues from it.
    type State: Clone;

    /// Width of the score vector returned by [`step`](Self::step).
    fn vocab_size(&self) -> usize;

    /// Advance the model by one token.
    ///
    /// # Arguments
    ///
    /// * `token` - The input token id
    /// * `state` - Carried state from the previous step, or `None` at the
    ///   start of a sequence
    ///
    /// # Returns
    ///
    /// Raw (unnormalized) scores over the vocabulary, and the successor
    /// state. Implementations should return
    /// [`SproutError::ModelUnavailable`](crate::SproutError::ModelUnavailable)
    /// if their parameters never loaded, and
    /// [`SproutError::Model`](crate::SproutError::Model) for step failures.
    /// Failures are fatal to the generation call; the engine does not retry.
    fn step(&self, token: TokenId, state: Option<&Self::State>) -> Result<(Vec<f32>, Self::State)>;
}

/// Model that scores every token equally.
///
/// Useful for testing and benchmarking the search without trained weights.
#[derive(Debug, Clone)]
pub struct UniformModel {
    /// Vocabulary width of the emitted score vector.
    vocab_size: usize,
}

impl UniformModel {
    /// Create a uniform model over a vocabulary of the given size.
    pub fn new(vocab_size: usize) -> Self {
        Self { vocab_size }
    }
}

impl SequenceModel for UniformModel {
    type State = ();

    fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    fn step(&self, _token: TokenId, _state: Option<&()>) -> Result<(Vec<f32>, ())> {
        Ok((vec![0.0; self.vocab_size], ()))
    }
}
