//! Fixed, ordered SMILES token vocabulary.
//!
//! Each token's position in the table is its id, stable for the lifetime of
//! the process. One designated separator token doubles as the
//! start-of-sequence marker during priming and as the model's own stop
//! emission.

use crate::error::{Result, SproutError};
use std::collections::HashMap;

/// Index of a token in the vocabulary.
pub type TokenId = u32;

/// The default SMILES vocabulary, in id order. The trailing space is the
/// separator token.
const DEFAULT_TOKENS: &[&str] = &[
    "#", "(", ")", "-", ".", "/", "1", "2", "3", "4", "5", "6", "=", "B", "Br", "C", "Cl", "F",
    "I", "N", "O", "P", "S", "[135I]", "[2H]", "[Br-]", "[C@@H]", "[C@@]", "[C@H]", "[C@]",
    "[Cl-]", "[I-]", "[Li+]", "[N+]", "[N-]", "[Na+]", "[O-]", "[OH-]", "[PH]", "[S+]", "[S-]",
    "[S@@+]", "[Se]", "[Si]", "[n+]", "[n-]", "[nH]", "[o+]", "[s+]", "\\", "c", "n", "o", "s",
    " ",
];

/// Ordered token table with a designated separator token.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Tokens in id order.
    tokens: Vec<String>,
    /// Reverse lookup: token text to id.
    index: HashMap<String, TokenId>,
    /// Id of the separator token.
    separator_id: TokenId,
}

impl Vocabulary {
    /// Create a vocabulary from an ordered token list.
    ///
    /// Fails if the list contains duplicates or does not contain the
    /// separator token.
    pub fn new(tokens: Vec<String>, separator: &str) -> Result<Self> {
        let mut index = HashMap::with_capacity(tokens.len());
        for (id, token) in tokens.iter().enumerate() {
            if index.insert(token.clone(), id as TokenId).is_some() {
                return Err(SproutError::Vocabulary(format!(
                    "duplicate token {token:?} at id {id}"
                )));
            }
        }
        let separator_id = *index.get(separator).ok_or_else(|| {
            SproutError::Vocabulary(format!("separator {separator:?} not in vocabulary"))
        })?;

        Ok(Self {
            tokens,
            index,
            separator_id,
        })
    }

    /// The default 55-token SMILES vocabulary with a space separator.
    pub fn default_smiles() -> Self {
        let tokens = DEFAULT_TOKENS.iter().map(|t| t.to_string()).collect();
        // The built-in table is duplicate-free and carries its separator.
        Self::new(tokens, " ").expect("built-in vocabulary is valid")
    }

    /// Look up the id of a token.
    pub fn id(&self, token: &str) -> Option<TokenId> {
        self.index.get(token).copied()
    }

    /// Look up the text of a token id.
    pub fn token(&self, id: TokenId) -> Option<&str> {
        self.tokens.get(id as usize).map(|s| s.as_str())
    }

    /// Id of the separator token.
    pub fn separator_id(&self) -> TokenId {
        self.separator_id
    }

    /// Text of the separator token.
    pub fn separator(&self) -> &str {
        &self.tokens[self.separator_id as usize]
    }

    /// Check whether an id is the separator.
    pub fn is_separator(&self, id: TokenId) -> bool {
        id == self.separator_id
    }

    /// Number of tokens in the vocabulary.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
