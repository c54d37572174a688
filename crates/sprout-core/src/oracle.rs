//! Molecular validity oracle.
//!
//! The engine treats validity as a black-box predicate over candidate
//! strings. Production deployments back the trait with a real
//! cheminformatics parser; [`StructuralOracle`] is a lightweight built-in
//! that checks necessary syntactic conditions only, so examples and benches
//! can run without one.

/// External predicate deciding whether a candidate string is a structurally
/// valid molecule.
pub trait ValidityOracle {
    /// Check a candidate string.
    fn is_valid(&self, candidate: &str) -> bool;
}

impl<F> ValidityOracle for F
where
    F: Fn(&str) -> bool,
{
    fn is_valid(&self, candidate: &str) -> bool {
        self(candidate)
    }
}

/// Syntax-level validity screen.
///
/// Accepts a candidate only if its parentheses and brackets balance, every
/// ring-closure digit is paired, and the string neither starts nor ends on a
/// bond symbol. This is a necessary-condition filter, not a full parser:
/// anything it rejects is invalid, but not everything it accepts is a real
/// molecule.
#[derive(Debug, Clone, Default)]
pub struct StructuralOracle;

impl StructuralOracle {
    /// Create a structural oracle.
    pub fn new() -> Self {
        Self
    }
}

const BOND_SYMBOLS: &[char] = &['-', '=', '#', ':', '/', '\\', '~'];

impl ValidityOracle for StructuralOracle {
    fn is_valid(&self, candidate: &str) -> bool {
        let trimmed = candidate.trim_end();
        if trimmed.is_empty() {
            return false;
        }

        let first = trimmed.chars().next().unwrap_or(' ');
        let last = trimmed.chars().last().unwrap_or(' ');
        if BOND_SYMBOLS.contains(&first) || BOND_SYMBOLS.contains(&last) {
            return false;
        }
        if first == ')' || last == '(' {
            return false;
        }

        let mut parens = 0i32;
        let mut in_bracket = false;
        let mut ring_counts = [0u32; 10];
        for ch in trimmed.chars() {
            match ch {
                '[' if !in_bracket => in_bracket = true,
                ']' if in_bracket => in_bracket = false,
                '[' | ']' => return false,
                '(' if !in_bracket => parens += 1,
                ')' if !in_bracket => {
                    parens -= 1;
                    if parens < 0 {
                        return false;
                    }
                }
                d if !in_bracket && d.is_ascii_digit() => {
                    ring_counts[d as usize - '0' as usize] += 1;
                }
                _ => {}
            }
        }

        parens == 0 && !in_bracket && ring_counts.iter().all(|&n| n % 2 == 0)
    }
}
