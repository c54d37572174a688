//! High-level generation engine.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sprout_core::error::{Result, SproutError};
use sprout_core::model::SequenceModel;
use sprout_core::oracle::ValidityOracle;
use sprout_core::search::{GenerateConfig, GenerateOutcome, Generator};
use sprout_core::tokenizer::SmilesTokenizer;
use sprout_core::vocab::Vocabulary;

/// Generation engine owning the model, oracle, vocabulary, tokenizer,
/// configuration and sampling source.
///
/// One engine serves one request at a time (`generate` takes `&mut self`
/// because the engine owns its RNG); model parameters behind `&self` are
/// read-only and may be shared across engines.
pub struct Engine<M, O> {
    vocab: Vocabulary,
    tokenizer: SmilesTokenizer,
    model: M,
    oracle: O,
    config: GenerateConfig,
    rng: StdRng,
}

impl<M, O> Engine<M, O>
where
    M: SequenceModel,
    O: ValidityOracle,
{
    /// Create an engine over the default SMILES vocabulary.
    ///
    /// Fails with [`SproutError::ModelUnavailable`] if the model's score
    /// width does not match the vocabulary, since no `generate` call could
    /// then proceed.
    pub fn new(model: M, oracle: O) -> Result<Self> {
        Self::with_vocab(model, oracle, Vocabulary::default_smiles())
    }

    /// Create an engine over a custom vocabulary.
    pub fn with_vocab(model: M, oracle: O, vocab: Vocabulary) -> Result<Self> {
        if model.vocab_size() != vocab.len() {
            return Err(SproutError::ModelUnavailable(format!(
                "model emits {} scores but the vocabulary holds {} tokens",
                model.vocab_size(),
                vocab.len()
            )));
        }

        Ok(Self {
            vocab,
            tokenizer: SmilesTokenizer::new(),
            model,
            oracle,
            config: GenerateConfig::default(),
            rng: StdRng::from_entropy(),
        })
    }

    /// Replace the generation configuration.
    pub fn with_config(mut self, config: GenerateConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the sampling source, making every `generate` call deterministic.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Get the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Generate up to `num_return` valid candidates from a seed string.
    ///
    /// Returns fewer (possibly zero) candidates when the sample budget runs
    /// out first; that is a low-confidence outcome, not an error.
    pub fn generate(&mut self, seed: &str) -> Result<Vec<String>> {
        Ok(self.generate_with_report(seed)?.candidates)
    }

    /// Generate, returning the full outcome (candidates, samples used,
    /// attempt count and skipped seed characters).
    pub fn generate_with_report(&mut self, seed: &str) -> Result<GenerateOutcome> {
        let generator = Generator::new(
            &self.vocab,
            &self.tokenizer,
            &self.model,
            &self.oracle,
            self.config.clone(),
        );
        let outcome = generator.generate(seed, &mut self.rng)?;

        if !outcome.skipped.is_empty() {
            tracing::warn!(
                seed,
                skipped = outcome.skipped.len(),
                "seed contains characters outside the token pattern"
            );
        }
        tracing::debug!(
            seed,
            attempts = outcome.attempts,
            samples = outcome.samples_used,
            found = outcome.candidates.len(),
            "generation finished"
        );

        Ok(outcome)
    }
}

impl<M, O> std::fmt::Debug for Engine<M, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("vocab_size", &self.vocab.len())
            .field("config", &self.config)
            .finish()
    }
}
