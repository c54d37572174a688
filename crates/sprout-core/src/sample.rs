//! Categorical sampling over next-token distributions.
//!
//! Raw model scores become a probability distribution via a numerically
//! stable softmax; distinct tokens are then drawn without replacement. The
//! draw is stochastic, not top-k: low-probability tokens can still appear.

use crate::error::{Result, SproutError};
use crate::vocab::TokenId;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Convert raw scores to a normalized probability distribution.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    if scores.is_empty() {
        return Vec::new();
    }
    let max_score = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exp_scores: Vec<f32> = scores.iter().map(|&s| (s - max_score).exp()).collect();
    let sum_exp: f32 = exp_scores.iter().sum();
    exp_scores.iter().map(|&e| e / sum_exp).collect()
}

/// Draw up to `count` distinct indices from a categorical distribution,
/// without replacement.
///
/// Each draw removes the drawn index's weight and renormalizes, which gives
/// the same distribution as retrying on duplicates but in bounded time even
/// when the distribution is sharply peaked. The draw count is capped at the
/// number of indices with nonzero probability.
pub fn sample_distinct<R: Rng>(probs: &[f32], count: usize, rng: &mut R) -> Result<Vec<TokenId>> {
    let support = probs.iter().filter(|&&p| p > 0.0).count();
    let want = count.min(support);

    let mut weights = probs.to_vec();
    let mut drawn = Vec::with_capacity(want);
    for _ in 0..want {
        let dist = WeightedIndex::new(&weights)
            .map_err(|e| SproutError::Distribution(e.to_string()))?;
        let idx = dist.sample(rng);
        drawn.push(idx as TokenId);
        weights[idx] = 0.0;
    }

    Ok(drawn)
}
