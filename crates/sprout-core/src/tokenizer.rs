//! Atom-level SMILES tokenization.
//!
//! Splits a SMILES string into the longest-matching sequence of vocabulary
//! tokens. The alternation order matters: bracket atoms (`[C@@H]`, `[O-]`)
//! and two-letter halogens (`Br`, `Cl`) must win over their single-character
//! prefixes.
//!
//! Characters that match no pattern are skipped, but never silently: every
//! skipped character is reported with its byte position so callers can warn
//! or reject.

use crate::error::{Result, SproutError};
use crate::vocab::{TokenId, Vocabulary};
use fancy_regex::Regex;

/// SMILES atom-level tokenization pattern.
///
/// Matches, in priority order: bracketed atoms, two-char halogens, single
/// elements and aromatic atoms, bonds and stereo markers, branches, `%NN`
/// ring closures, and single digits.
const SMILES_TOKEN_PATTERN: &str = r"(\[[^\]]+]|Br?|Cl?|N|O|S|P|F|I|b|c|n|o|s|p|\(|\)|\.|=|#|-|\+|\\|\/|:|~|@|\?|>|\*|\$|\%[0-9]{2}|[0-9])";

/// A character the tokenizer could not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedChar {
    /// Byte offset in the input string.
    pub position: usize,
    /// The unmatched character.
    pub ch: char,
}

/// Result of tokenizing a string: the matched tokens plus any skipped input.
#[derive(Debug, Clone, Default)]
pub struct Tokenization {
    /// Matched tokens, in input order.
    pub tokens: Vec<String>,
    /// Characters that matched no pattern.
    pub skipped: Vec<SkippedChar>,
}

/// Tokens of a string resolved against a vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Encoding {
    /// Token ids, in input order.
    pub ids: Vec<TokenId>,
    /// Characters that matched no pattern.
    pub skipped: Vec<SkippedChar>,
}

/// Atom-level SMILES tokenizer.
#[derive(Debug, Clone)]
pub struct SmilesTokenizer {
    /// Compiled token pattern.
    pattern: Regex,
}

impl SmilesTokenizer {
    /// Create a tokenizer with the standard SMILES pattern.
    pub fn new() -> Self {
        let pattern = Regex::new(SMILES_TOKEN_PATTERN).expect("invalid SMILES pattern");
        Self { pattern }
    }

    /// Tokenize a SMILES string.
    ///
    /// Empty input yields an empty token list. Pure function of the input
    /// and the pattern table.
    pub fn tokenize(&self, smiles: &str) -> Tokenization {
        let mut tokens = Vec::new();
        let mut skipped = Vec::new();
        let mut cursor = 0;

        for m in self.pattern.find_iter(smiles).flatten() {
            // Anything between the previous match and this one fell through
            // the pattern table.
            for (offset, ch) in smiles[cursor..m.start()].char_indices() {
                skipped.push(SkippedChar {
                    position: cursor + offset,
                    ch,
                });
            }
            tokens.push(m.as_str().to_string());
            cursor = m.end();
        }
        for (offset, ch) in smiles[cursor..].char_indices() {
            skipped.push(SkippedChar {
                position: cursor + offset,
                ch,
            });
        }

        Tokenization { tokens, skipped }
    }

    /// Tokenize and resolve token ids against a vocabulary.
    ///
    /// Fails with [`SproutError::UnknownToken`] when a matched token is not
    /// in the vocabulary.
    pub fn encode(&self, smiles: &str, vocab: &Vocabulary) -> Result<Encoding> {
        let mut ids = Vec::new();
        let mut skipped = Vec::new();
        let mut cursor = 0;

        for m in self.pattern.find_iter(smiles).flatten() {
            for (offset, ch) in smiles[cursor..m.start()].char_indices() {
                skipped.push(SkippedChar {
                    position: cursor + offset,
                    ch,
                });
            }
            let id = vocab
                .id(m.as_str())
                .ok_or_else(|| SproutError::UnknownToken {
                    token: m.as_str().to_string(),
                    position: m.start(),
                })?;
            ids.push(id);
            cursor = m.end();
        }
        for (offset, ch) in smiles[cursor..].char_indices() {
            skipped.push(SkippedChar {
                position: cursor + offset,
                ch,
            });
        }

        Ok(Encoding { ids, skipped })
    }
}

impl Default for SmilesTokenizer {
    fn default() -> Self {
        Self::new()
    }
}
