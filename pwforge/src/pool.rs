//! Character pools the generator draws from.

use std::collections::HashSet;
use std::fmt;

/// The list of lowercase letters.
pub const LOWER_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// The list of uppercase letters.
pub const UPPER_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The list of permitted digits.
pub const DIGITS: &str = "0123456789";

/// The list of symbols.
pub const SYMBOLS: &str = "~!@#$%^&*()_+`-={}|[]\\:\"<>?,./";

/// Which character class a pool supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    Lower,
    Upper,
    /// Lowercase pool with the uppercase pool appended, used for the letter phase.
    Letter,
    Digit,
    Symbol,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PoolKind::Lower => "lowercase",
            PoolKind::Upper => "uppercase",
            PoolKind::Letter => "letter",
            PoolKind::Digit => "digit",
            PoolKind::Symbol => "symbol",
        };
        f.write_str(name)
    }
}

/// An ordered sequence of candidate characters.
///
/// Duplicates are kept: a character listed twice is drawn twice as often.
/// Availability checks for repeat-avoidance count distinct characters only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPool {
    kind: PoolKind,
    chars: Vec<char>,
}

impl CharacterPool {
    pub fn new(kind: PoolKind, chars: &str) -> Self {
        Self { kind, chars: chars.chars().collect() }
    }

    pub fn kind(&self) -> PoolKind {
        self.kind
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Number of distinct characters in the pool.
    pub fn distinct_len(&self) -> usize {
        self.chars.iter().collect::<HashSet<_>>().len()
    }

    /// Number of distinct pool characters that do not yet occur in `taken`.
    pub fn distinct_len_excluding(&self, taken: &[char]) -> usize {
        self.chars.iter().filter(|ch| !taken.contains(*ch)).collect::<HashSet<_>>().len()
    }

    /// Appends `other` to this pool, producing a pool of the given kind.
    pub fn concat(&self, other: &CharacterPool, kind: PoolKind) -> CharacterPool {
        let mut chars = Vec::with_capacity(self.len() + other.len());
        chars.extend_from_slice(&self.chars);
        chars.extend_from_slice(&other.chars);
        CharacterPool { kind, chars }
    }
}

impl fmt::Display for CharacterPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|ch| write!(f, "{ch}"))
    }
}
