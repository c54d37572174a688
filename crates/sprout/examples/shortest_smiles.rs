//! Shortest-SMILES generation example.
//!
//! Runs the engine with the uniform stub model and the syntax-only oracle,
//! so it works without trained weights or a cheminformatics toolkit. A real
//! deployment swaps in a trained `SequenceModel` and an oracle backed by a
//! molecular parser.

use anyhow::Result;
use sprout::prelude::*;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let vocab = Vocabulary::default_smiles();
    let mut engine = Engine::new(UniformModel::new(vocab.len()), StructuralOracle::new())?
        .with_rng_seed(42);

    for seed in ["C", "CCO", "c1ccccc1"] {
        let report = engine.generate_with_report(seed)?;
        println!(
            "seed {:?}: {} candidates in {} attempts ({} samples)",
            seed,
            report.candidates.len(),
            report.attempts,
            report.samples_used
        );
        for candidate in &report.candidates {
            println!("  {candidate:?}");
        }
    }

    Ok(())
}
