//! Short link codec for recipe identifiers.
//!
//! Maps a recipe id to a compact string by writing it as a number in base
//! `alphabet.len()`, using the alphabet characters as digits. The mapping is a
//! pure bijection: nothing is stored, both directions are recomputed on demand.
//!
//! The alphabet is shared by every encode and decode call site. Changing it
//! invalidates all previously issued links.

use std::collections::HashMap;

/// Base62 alphabet used when `SHORT_LINK_ALPHABET` is not set.
pub const DEFAULT_ALPHABET: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Rejected alphabet configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlphabetError {
    #[error("Alphabet must contain at least 2 characters, got {0}")]
    TooShort(usize),

    #[error("Alphabet contains duplicate character '{0}'")]
    DuplicateCharacter(char),
}

/// A short code that does not decode under the configured alphabet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCodeError {
    #[error("Short code is empty")]
    Empty,

    #[error("Character '{character}' at position {position} is not part of the alphabet")]
    InvalidCharacter { character: char, position: usize },

    #[error("Short code does not fit in a 64-bit identifier")]
    Overflow,
}

/// Bidirectional integer <-> string codec over a fixed alphabet.
///
/// ```ignore
/// let codec = ShortLinkCodec::new("01").unwrap();
/// assert_eq!(codec.encode(5), "101");
/// assert_eq!(codec.decode("101").unwrap(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct ShortLinkCodec {
    digits: Vec<char>,
    values: HashMap<char, u64>,
}

impl ShortLinkCodec {
    /// Builds a codec from an ordered set of unique characters.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError`] if the alphabet has fewer than two characters
    /// or repeats a character.
    pub fn new(alphabet: &str) -> Result<Self, AlphabetError> {
        let digits: Vec<char> = alphabet.chars().collect();

        if digits.len() < 2 {
            return Err(AlphabetError::TooShort(digits.len()));
        }

        let mut values = HashMap::with_capacity(digits.len());
        for (value, &ch) in digits.iter().enumerate() {
            if values.insert(ch, value as u64).is_some() {
                return Err(AlphabetError::DuplicateCharacter(ch));
            }
        }

        Ok(Self { digits, values })
    }

    /// Number of digits in the alphabet.
    pub fn base(&self) -> u64 {
        self.digits.len() as u64
    }

    /// Encodes `n` as a base-N string. `encode(0)` is the first alphabet character.
    pub fn encode(&self, mut n: u64) -> String {
        let base = self.base();

        if n == 0 {
            return self.digits[0].to_string();
        }

        let mut reversed = Vec::new();
        while n > 0 {
            reversed.push(self.digits[(n % base) as usize]);
            n /= base;
        }

        reversed.into_iter().rev().collect()
    }

    /// Decodes a base-N string back to its integer.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCodeError`] if the code is empty, contains a character
    /// outside the alphabet, or overflows `u64`.
    pub fn decode(&self, code: &str) -> Result<u64, InvalidCodeError> {
        if code.is_empty() {
            return Err(InvalidCodeError::Empty);
        }

        let base = self.base();

        code.chars()
            .enumerate()
            .try_fold(0u64, |acc, (position, character)| {
                let digit = *self
                    .values
                    .get(&character)
                    .ok_or(InvalidCodeError::InvalidCharacter {
                        character,
                        position,
                    })?;

                acc.checked_mul(base)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or(InvalidCodeError::Overflow)
            })
    }
}

impl Default for ShortLinkCodec {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHABET).expect("default alphabet is valid")
    }
}
