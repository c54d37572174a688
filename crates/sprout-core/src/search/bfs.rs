//! Breadth-first candidate generation.
//!
//! # Algorithm
//!
//! One `generate` call runs a *restart loop*: independent breadth-first
//! attempts from the seed, accumulating accepted candidates, until the
//! global result target is met or the global sample budget is spent.
//!
//! Per attempt:
//! 1. Prime the model on separator + all-but-last seed tokens
//! 2. Start the frontier with one branch holding the last seed token
//! 3. Each round, take the whole frontier; for every branch: one model
//!    step, softmax, draw two distinct tokens. A drawn separator past the
//!    minimum depth submits the branch to the validity oracle; any token
//!    past the minimum depth that passes the oracle is accepted; everything
//!    else (except a shallow separator, which dies) becomes a child branch
//! 4. Stop the attempt on the depth horizon, a full attempt buffer, an
//!    empty frontier, or budget exhaustion
//!
//! Results are deduplicated, sorted shortest-first (ties keep discovery
//! order) and truncated.

use crate::error::{Result, SproutError};
use crate::model::SequenceModel;
use crate::oracle::ValidityOracle;
use crate::sample::{sample_distinct, softmax};
use crate::search::frontier::{Branch, Frontier};
use crate::tokenizer::{SkippedChar, SmilesTokenizer};
use crate::vocab::{TokenId, Vocabulary};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Number of candidates to return.
    pub num_return: usize,
    /// Global result count that ends the restart loop.
    pub target_results: usize,
    /// Global budget of sampled symbols across all attempts.
    pub sample_budget: usize,
    /// Distinct tokens drawn per branch expansion.
    pub samples_per_branch: usize,
    /// Depth a branch must exceed before any candidate can be accepted.
    pub min_depth: usize,
    /// Depth horizon that ends an attempt.
    pub max_depth: usize,
    /// Accepted candidates that end an attempt once exceeded.
    pub attempt_capacity: usize,
    /// Optional cap on live branches; children past it are dropped.
    #[serde(default)]
    pub max_frontier: Option<usize>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            num_return: 5,
            target_results: 15,
            sample_budget: 5000,
            samples_per_branch: 2,
            min_depth: 5,
            max_depth: 50,
            attempt_capacity: 4,
            max_frontier: None,
        }
    }
}

impl GenerateConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// Outcome of one `generate` call.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// Accepted candidates, shortest first, at most `num_return` entries.
    /// Fewer (or none) after budget exhaustion is a valid outcome.
    pub candidates: Vec<String>,
    /// Symbols sampled across all attempts, never above the budget.
    pub samples_used: usize,
    /// Number of restart attempts run.
    pub attempts: usize,
    /// Seed characters the tokenizer could not match.
    pub skipped: Vec<SkippedChar>,
}

/// Breadth-first generator over a sequence model.
pub struct Generator<'a, M, O> {
    vocab: &'a Vocabulary,
    tokenizer: &'a SmilesTokenizer,
    model: &'a M,
    oracle: &'a O,
    config: GenerateConfig,
}

impl<'a, M, O> Generator<'a, M, O>
where
    M: SequenceModel,
    O: ValidityOracle,
{
    /// Create a generator borrowing its collaborators.
    pub fn new(
        vocab: &'a Vocabulary,
        tokenizer: &'a SmilesTokenizer,
        model: &'a M,
        oracle: &'a O,
        config: GenerateConfig,
    ) -> Self {
        Self {
            vocab,
            tokenizer,
            model,
            oracle,
            config,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Generate up to `num_return` accepted candidates from a seed string.
    ///
    /// The sampling source is caller-provided: a seeded RNG makes the whole
    /// call deterministic.
    pub fn generate<R: Rng>(&self, seed: &str, rng: &mut R) -> Result<GenerateOutcome> {
        let encoding = self.tokenizer.encode(seed, self.vocab)?;

        let mut candidates: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut samples_used = 0usize;
        let mut attempts = 0usize;

        while candidates.len() < self.config.target_results
            && samples_used < self.config.sample_budget
        {
            attempts += 1;
            let before = samples_used;
            let accepted = self.run_attempt(seed, &encoding.ids, &mut samples_used, rng)?;

            for candidate in accepted {
                if seen.insert(candidate.clone()) {
                    candidates.push(candidate);
                }
            }

            // An attempt that consumed nothing cannot make progress.
            if samples_used == before {
                break;
            }
        }

        // Shortest first; the sort is stable, so ties keep discovery order.
        candidates.sort_by_key(|c| c.len());
        candidates.truncate(self.config.num_return);

        Ok(GenerateOutcome {
            candidates,
            samples_used,
            attempts,
            skipped: encoding.skipped,
        })
    }

    /// Run one breadth-first attempt, returning its accepted candidates.
    fn run_attempt<R: Rng>(
        &self,
        seed: &str,
        seed_ids: &[TokenId],
        samples_used: &mut usize,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        let separator = self.vocab.separator_id();

        // Prime the state on separator + everything before the last seed
        // token; the last token stays pending for the first branch step.
        let mut state: Option<M::State> = None;
        if seed_ids.len() > 1 {
            let prefix = &seed_ids[..seed_ids.len() - 1];
            for &token in std::iter::once(&separator).chain(prefix) {
                let (_, next) = self.step_checked(token, state.as_ref())?;
                state = Some(next);
            }
        }
        let pending = seed_ids.last().copied().unwrap_or(separator);

        let mut frontier: Frontier<M::State> = Frontier::new();
        frontier.push(Branch::root(seed.to_string(), pending, state));

        let mut accepted: Vec<String> = Vec::new();
        let mut depth = 0usize;

        'rounds: loop {
            for branch in frontier.take_round() {
                let budget_left = self.config.sample_budget.saturating_sub(*samples_used);
                let want = self.config.samples_per_branch.min(budget_left);
                if want == 0 {
                    break 'rounds;
                }

                let (scores, next_state) = self.step_checked(branch.pending, branch.state.as_ref())?;
                let probs = softmax(&scores);

                for token in sample_distinct(&probs, want, rng)? {
                    *samples_used += 1;

                    let token_text = self.vocab.token(token).ok_or_else(|| {
                        SproutError::Vocabulary(format!("sampled id {token} out of range"))
                    })?;
                    let candidate = format!("{}{}", branch.text, token_text);
                    let past_min = depth > self.config.min_depth;

                    if token == separator {
                        // A shallow separator is too short to accept and
                        // cannot be extended; the branch dies.
                        if past_min
                            && self.oracle.is_valid(&candidate)
                            && !accepted.contains(&candidate)
                        {
                            accepted.push(candidate);
                        }
                    } else if past_min && self.oracle.is_valid(&candidate) {
                        if !accepted.contains(&candidate) {
                            accepted.push(candidate);
                        }
                    } else if self
                        .config
                        .max_frontier
                        .is_none_or(|cap| frontier.len() < cap)
                    {
                        frontier.push(branch.child(token_text, token, next_state.clone()));
                    }
                }
            }

            depth += 1;
            if depth > self.config.max_depth
                || accepted.len() > self.config.attempt_capacity
                || frontier.is_empty()
            {
                break;
            }
        }

        Ok(accepted)
    }

    /// One model step with an output shape check.
    fn step_checked(
        &self,
        token: TokenId,
        state: Option<&M::State>,
    ) -> Result<(Vec<f32>, M::State)> {
        let (scores, next) = self.model.step(token, state)?;
        if scores.len() != self.vocab.len() {
            return Err(SproutError::Model(format!(
                "expected {} scores, got {}",
                self.vocab.len(),
                scores.len()
            )));
        }
        Ok((scores, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;

    fn two_token_vocab() -> Vocabulary {
        Vocabulary::new(vec![" ".to_string(), "C".to_string()], " ").unwrap()
    }

    fn three_token_vocab() -> Vocabulary {
        Vocabulary::new(
            vec![" ".to_string(), "C".to_string(), "O".to_string()],
            " ",
        )
        .unwrap()
    }

    /// Uniform stateless model over an arbitrary vocabulary width.
    struct Uniform(usize);

    impl SequenceModel for Uniform {
        type State = ();

        fn vocab_size(&self) -> usize {
            self.0
        }

        fn step(&self, _token: TokenId, _state: Option<&()>) -> Result<(Vec<f32>, ())> {
            Ok((vec![0.0; self.0], ()))
        }
    }

    /// Records every (token, carried-state?) pair it is stepped with.
    struct Recording {
        width: usize,
        calls: RefCell<Vec<(TokenId, bool)>>,
    }

    impl Recording {
        fn new(width: usize) -> Self {
            Self {
                width,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl SequenceModel for Recording {
        type State = usize;

        fn vocab_size(&self) -> usize {
            self.width
        }

        fn step(&self, token: TokenId, state: Option<&usize>) -> Result<(Vec<f32>, usize)> {
            self.calls.borrow_mut().push((token, state.is_some()));
            Ok((vec![0.0; self.width], state.copied().unwrap_or(0) + 1))
        }
    }

    fn accept_all(_: &str) -> bool {
        true
    }

    fn reject_all(_: &str) -> bool {
        false
    }

    #[test]
    fn two_symbol_uniform_scenario() {
        // With a two-token vocabulary both symbols are drawn every round,
        // so the attempt structure is fully deterministic: the separator
        // path is dropped until the minimum depth, then both continuations
        // are accepted at depth six and the frontier empties.
        let vocab = two_token_vocab();
        let tokenizer = SmilesTokenizer::new();
        let model = Uniform(2);
        let generator =
            Generator::new(&vocab, &tokenizer, &model, &accept_all, GenerateConfig::default());

        let mut rng = StdRng::seed_from_u64(0);
        let outcome = generator.generate("C", &mut rng).unwrap();

        assert_eq!(outcome.candidates.len(), 2);
        assert!(outcome.candidates.contains(&"CCCCCCC ".to_string()));
        assert!(outcome.candidates.contains(&"CCCCCCCC".to_string()));
        // The target of 15 is unreachable, so the budget is spent exactly.
        assert_eq!(outcome.samples_used, 5000);
    }

    #[test]
    fn generate_is_deterministic_with_seeded_rng() {
        let vocab = Vocabulary::default_smiles();
        let tokenizer = SmilesTokenizer::new();
        let model = Uniform(vocab.len());
        let oracle = |s: &str| s.trim_end().len() % 2 == 0;
        let generator =
            Generator::new(&vocab, &tokenizer, &model, &oracle, GenerateConfig::default());

        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);
        let a = generator.generate("CC", &mut first).unwrap();
        let b = generator.generate("CC", &mut second).unwrap();

        assert_eq!(a.candidates, b.candidates);
        assert_eq!(a.samples_used, b.samples_used);
        assert_eq!(a.attempts, b.attempts);
    }

    #[test]
    fn budget_and_return_limits_hold() {
        let vocab = Vocabulary::default_smiles();
        let tokenizer = SmilesTokenizer::new();
        let model = Uniform(vocab.len());
        let config = GenerateConfig::default();
        let generator = Generator::new(&vocab, &tokenizer, &model, &accept_all, config.clone());

        let mut rng = StdRng::seed_from_u64(5);
        let outcome = generator.generate("C", &mut rng).unwrap();

        assert!(outcome.samples_used <= config.sample_budget);
        assert!(outcome.candidates.len() <= config.num_return);
    }

    #[test]
    fn rejecting_oracle_yields_empty_result() {
        let vocab = Vocabulary::default_smiles();
        let tokenizer = SmilesTokenizer::new();
        let model = Uniform(vocab.len());
        let generator =
            Generator::new(&vocab, &tokenizer, &model, &reject_all, GenerateConfig::default());

        let mut rng = StdRng::seed_from_u64(5);
        let outcome = generator.generate("C", &mut rng).unwrap();

        // Exhausting the budget without a single candidate is not an error.
        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.samples_used, 5000);
    }

    #[test]
    fn every_candidate_passes_the_oracle() {
        let vocab = three_token_vocab();
        let tokenizer = SmilesTokenizer::new();
        let model = Uniform(3);
        let oracle = |s: &str| s.ends_with('O');
        let generator =
            Generator::new(&vocab, &tokenizer, &model, &oracle, GenerateConfig::default());

        let mut rng = StdRng::seed_from_u64(17);
        let outcome = generator.generate("C", &mut rng).unwrap();

        assert!(!outcome.candidates.is_empty());
        for candidate in &outcome.candidates {
            assert!(candidate.ends_with('O'), "oracle leak: {candidate:?}");
        }
    }

    #[test]
    fn candidates_are_sorted_shortest_first() {
        let vocab = three_token_vocab();
        let tokenizer = SmilesTokenizer::new();
        let model = Uniform(3);
        // Acceptance at varying depths produces varying lengths.
        let oracle = |s: &str| s.ends_with('O');
        let generator =
            Generator::new(&vocab, &tokenizer, &model, &oracle, GenerateConfig::default());

        let mut rng = StdRng::seed_from_u64(23);
        let outcome = generator.generate("C", &mut rng).unwrap();

        for pair in outcome.candidates.windows(2) {
            assert!(pair[0].len() <= pair[1].len());
        }
    }

    #[test]
    fn min_depth_gates_acceptance() {
        let vocab = two_token_vocab();
        let tokenizer = SmilesTokenizer::new();
        let model = Uniform(2);
        let config = GenerateConfig::default();
        let generator = Generator::new(&vocab, &tokenizer, &model, &accept_all, config.clone());

        let mut rng = StdRng::seed_from_u64(2);
        let seed = "C";
        let outcome = generator.generate(seed, &mut rng).unwrap();

        for candidate in &outcome.candidates {
            assert!(candidate.len() > seed.len() + config.min_depth);
        }
    }

    #[test]
    fn empty_seed_starts_from_separator() {
        let vocab = two_token_vocab();
        let tokenizer = SmilesTokenizer::new();
        let model = Uniform(2);
        let generator =
            Generator::new(&vocab, &tokenizer, &model, &accept_all, GenerateConfig::default());

        let mut rng = StdRng::seed_from_u64(4);
        let outcome = generator.generate("", &mut rng).unwrap();

        assert!(outcome.candidates.len() <= 5);
        assert!(outcome.samples_used <= 5000);
    }

    #[test]
    fn single_token_seed_skips_priming() {
        let vocab = two_token_vocab();
        let tokenizer = SmilesTokenizer::new();
        let model = Recording::new(2);
        let config = GenerateConfig {
            sample_budget: 2,
            ..Default::default()
        };
        let generator = Generator::new(&vocab, &tokenizer, &model, &reject_all, config);

        let mut rng = StdRng::seed_from_u64(0);
        generator.generate("C", &mut rng).unwrap();

        let calls = model.calls.borrow();
        // First model step feeds the seed's only token with no carried state.
        assert_eq!(calls[0], (1, false));
    }

    #[test]
    fn multi_token_seed_primes_with_separator_prefix() {
        let vocab = two_token_vocab();
        let tokenizer = SmilesTokenizer::new();
        let model = Recording::new(2);
        let config = GenerateConfig {
            sample_budget: 2,
            ..Default::default()
        };
        let generator = Generator::new(&vocab, &tokenizer, &model, &reject_all, config);

        let mut rng = StdRng::seed_from_u64(0);
        generator.generate("CC", &mut rng).unwrap();

        let calls = model.calls.borrow();
        // Priming: separator without state, then the first seed token with
        // the primed state; the branch step follows with state carried.
        assert_eq!(calls[0], (0, false));
        assert_eq!(calls[1], (1, true));
        assert_eq!(calls[2], (1, true));
    }

    #[test]
    fn unknown_seed_token_errors() {
        let vocab = Vocabulary::default_smiles();
        let tokenizer = SmilesTokenizer::new();
        let model = Uniform(vocab.len());
        let generator =
            Generator::new(&vocab, &tokenizer, &model, &accept_all, GenerateConfig::default());

        let mut rng = StdRng::seed_from_u64(0);
        let result = generator.generate("bC", &mut rng);
        assert!(matches!(result, Err(SproutError::UnknownToken { .. })));
    }

    #[test]
    fn skipped_seed_characters_surface() {
        let vocab = Vocabulary::default_smiles();
        let tokenizer = SmilesTokenizer::new();
        let model = Uniform(vocab.len());
        let config = GenerateConfig {
            sample_budget: 10,
            ..Default::default()
        };
        let generator = Generator::new(&vocab, &tokenizer, &model, &reject_all, config);

        let mut rng = StdRng::seed_from_u64(0);
        let outcome = generator.generate("CxC", &mut rng).unwrap();

        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].ch, 'x');
    }

    #[test]
    fn frontier_cap_limits_live_branches() {
        let vocab = three_token_vocab();
        let tokenizer = SmilesTokenizer::new();
        let model = Uniform(3);
        let config = GenerateConfig {
            max_frontier: Some(1),
            ..Default::default()
        };
        let generator = Generator::new(&vocab, &tokenizer, &model, &accept_all, config);

        let mut rng = StdRng::seed_from_u64(8);
        let outcome = generator.generate("C", &mut rng).unwrap();

        assert!(outcome.candidates.len() <= 5);
        assert!(outcome.samples_used <= 5000);
    }

    #[test]
    fn score_shape_mismatch_is_an_error() {
        struct Wide;
        impl SequenceModel for Wide {
            type State = ();
            fn vocab_size(&self) -> usize {
                3
            }
            fn step(&self, _: TokenId, _: Option<&()>) -> Result<(Vec<f32>, ())> {
                Ok((vec![0.0; 3], ()))
            }
        }

        let vocab = two_token_vocab();
        let tokenizer = SmilesTokenizer::new();
        let model = Wide;
        let generator =
            Generator::new(&vocab, &tokenizer, &model, &accept_all, GenerateConfig::default());

        let mut rng = StdRng::seed_from_u64(0);
        let result = generator.generate("C", &mut rng);
        assert!(matches!(result, Err(SproutError::Model(_))));
    }

    #[test]
    fn model_failure_propagates() {
        struct Failing;
        impl SequenceModel for Failing {
            type State = ();
            fn vocab_size(&self) -> usize {
                2
            }
            fn step(&self, _: TokenId, _: Option<&()>) -> Result<(Vec<f32>, ())> {
                Err(SproutError::Model("weights corrupted".to_string()))
            }
        }

        let vocab = two_token_vocab();
        let tokenizer = SmilesTokenizer::new();
        let model = Failing;
        let generator =
            Generator::new(&vocab, &tokenizer, &model, &accept_all, GenerateConfig::default());

        let mut rng = StdRng::seed_from_u64(0);
        assert!(generator.generate("C", &mut rng).is_err());
    }

    #[test]
    fn config_from_file() {
        let config = GenerateConfig {
            num_return: 3,
            sample_budget: 100,
            ..Default::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generate.json");
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        let loaded = GenerateConfig::from_file(&path).unwrap();
        assert_eq!(loaded.num_return, 3);
        assert_eq!(loaded.sample_budget, 100);
        assert_eq!(loaded.min_depth, 5);
    }
}
