use rand::rngs::OsRng;
use tracing::{debug, trace};

use crate::error::Error;
use crate::pool::{CharacterPool, DIGITS, LOWER_LETTERS, PoolKind, SYMBOLS, UPPER_LETTERS};
use crate::source::{RandomSource, random_element, random_insert};

/// The requirements for a single password.
///
/// `Default` yields an empty password with no digits, no symbols, uppercase
/// letters allowed and repeats forbidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerationSpec {
    /// Total number of characters in the password.
    pub length: usize,
    /// Number of characters drawn from the digit pool.
    pub digits: usize,
    /// Number of characters drawn from the symbol pool.
    pub symbols: usize,
    /// Leave the uppercase pool out of the letter pool.
    pub no_upper: bool,
    /// Allow any character to appear more than once.
    pub allow_repeat: bool,
}

impl GenerationSpec {
    pub fn new(length: usize) -> Self {
        Self { length, ..Self::default() }
    }

    pub fn digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    pub fn symbols(mut self, symbols: usize) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn no_upper(mut self, no_upper: bool) -> Self {
        self.no_upper = no_upper;
        self
    }

    pub fn allow_repeat(mut self, allow_repeat: bool) -> Self {
        self.allow_repeat = allow_repeat;
        self
    }
}

/// Generates passwords from four configurable character pools.
///
/// A `Generator` is immutable once built; the `with_*` methods return a
/// modified copy and leave the receiver untouched. It holds no randomness
/// state, so one value can be shared across threads and used concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    lower_letters: CharacterPool,
    upper_letters: CharacterPool,
    digits: CharacterPool,
    symbols: CharacterPool,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Creates a generator with the default ASCII pools.
    pub fn new() -> Self {
        Self {
            lower_letters: CharacterPool::new(PoolKind::Lower, LOWER_LETTERS),
            upper_letters: CharacterPool::new(PoolKind::Upper, UPPER_LETTERS),
            digits: CharacterPool::new(PoolKind::Digit, DIGITS),
            symbols: CharacterPool::new(PoolKind::Symbol, SYMBOLS),
        }
    }

    pub fn with_lower_letters(&self, lower_letters: &str) -> Self {
        Self { lower_letters: CharacterPool::new(PoolKind::Lower, lower_letters), ..self.clone() }
    }

    pub fn with_upper_letters(&self, upper_letters: &str) -> Self {
        Self { upper_letters: CharacterPool::new(PoolKind::Upper, upper_letters), ..self.clone() }
    }

    pub fn with_digits(&self, digits: &str) -> Self {
        Self { digits: CharacterPool::new(PoolKind::Digit, digits), ..self.clone() }
    }

    pub fn with_symbols(&self, symbols: &str) -> Self {
        Self { symbols: CharacterPool::new(PoolKind::Symbol, symbols), ..self.clone() }
    }

    pub fn lower_letters(&self) -> &CharacterPool {
        &self.lower_letters
    }

    pub fn upper_letters(&self) -> &CharacterPool {
        &self.upper_letters
    }

    pub fn digits(&self) -> &CharacterPool {
        &self.digits
    }

    pub fn symbols(&self) -> &CharacterPool {
        &self.symbols
    }

    /// The pool the letter phase draws from: lowercase, plus uppercase unless
    /// `no_upper` is set.
    pub fn letter_pool(&self, no_upper: bool) -> CharacterPool {
        if no_upper {
            self.lower_letters.concat(&CharacterPool::new(PoolKind::Upper, ""), PoolKind::Letter)
        } else {
            self.lower_letters.concat(&self.upper_letters, PoolKind::Letter)
        }
    }

    /// Generates a password meeting `spec` using the operating system's
    /// secure random source.
    ///
    /// The result has exactly `spec.length` characters: `spec.digits` from the
    /// digit pool, `spec.symbols` from the symbol pool and the rest from the
    /// letter pool, each inserted at a uniformly random position. Uppercase
    /// letters are possible but not guaranteed.
    pub fn generate(&self, spec: &GenerationSpec) -> Result<String, Error> {
        self.generate_with(spec, &mut OsRng)
    }

    /// Same as [`Generator::generate`], but draws from `source`.
    pub fn generate_with<S>(&self, spec: &GenerationSpec, source: &mut S) -> Result<String, Error>
    where
        S: RandomSource + ?Sized,
    {
        let letters = self.letter_pool(spec.no_upper);

        let letter_count =
            spec.digits.checked_add(spec.symbols).and_then(|n| spec.length.checked_sub(n));
        let Some(letter_count) = letter_count else {
            return Err(Error::LengthExceeded {
                length: spec.length,
                digits: spec.digits,
                symbols: spec.symbols,
            });
        };

        if !spec.allow_repeat {
            let available = letters.distinct_len();
            if letter_count > available {
                return Err(Error::LettersUnavailable { requested: letter_count, available });
            }
            let available = self.digits.distinct_len();
            if spec.digits > available {
                return Err(Error::DigitsUnavailable { requested: spec.digits, available });
            }
            let available = self.symbols.distinct_len();
            if spec.symbols > available {
                return Err(Error::SymbolsUnavailable { requested: spec.symbols, available });
            }
        }

        debug!(
            length = spec.length,
            digits = spec.digits,
            symbols = spec.symbols,
            no_upper = spec.no_upper,
            allow_repeat = spec.allow_repeat,
            "generating password"
        );

        let mut result = Vec::with_capacity(spec.length);
        fill(&mut result, &letters, letter_count, spec.allow_repeat, source)?;
        fill(&mut result, &self.digits, spec.digits, spec.allow_repeat, source)?;
        fill(&mut result, &self.symbols, spec.symbols, spec.allow_repeat, source)?;

        Ok(result.into_iter().collect())
    }

    /// Same as [`Generator::generate`], but panics on error.
    pub fn must_generate(&self, spec: &GenerationSpec) -> String {
        match self.generate(spec) {
            Ok(password) => password,
            Err(e) => panic!("{e}"),
        }
    }
}

/// Draws `count` characters from `pool` into random positions of `result`.
///
/// With repeats disallowed, a draw that already occurs in `result` is thrown
/// away and retried without counting toward `count`.
fn fill<S>(
    result: &mut Vec<char>,
    pool: &CharacterPool,
    count: usize,
    allow_repeat: bool,
    source: &mut S,
) -> Result<(), Error>
where
    S: RandomSource + ?Sized,
{
    if count == 0 {
        return Ok(());
    }

    // Overlapping custom pools can leave fewer fresh characters than the
    // up-front distinct count promised; rejection sampling would never finish.
    if !allow_repeat {
        let available = pool.distinct_len_excluding(result);
        if count > available {
            return Err(unavailable(pool.kind(), count, available));
        }
    }

    let mut filled = 0;
    while filled < count {
        let ch = random_element(pool, source)?;
        if !allow_repeat && result.contains(&ch) {
            trace!(kind = %pool.kind(), "rejected repeated draw");
            continue;
        }
        random_insert(result, ch, source)?;
        filled += 1;
    }

    Ok(())
}

fn unavailable(kind: PoolKind, requested: usize, available: usize) -> Error {
    match kind {
        PoolKind::Digit => Error::DigitsUnavailable { requested, available },
        PoolKind::Symbol => Error::SymbolsUnavailable { requested, available },
        PoolKind::Lower | PoolKind::Upper | PoolKind::Letter => {
            Error::LettersUnavailable { requested, available }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::source::tests::ScriptedSource;

    fn has_duplicates(s: &str) -> bool {
        let mut found = HashSet::with_capacity(s.len());
        s.chars().any(|ch| !found.insert(ch))
    }

    #[test]
    fn test_exceeds_length() {
        let generator = Generator::new();

        let err = generator.generate(&GenerationSpec::new(0).digits(1)).unwrap_err();
        assert!(matches!(err, Error::LengthExceeded { length: 0, digits: 1, symbols: 0 }));

        let err = generator.generate(&GenerationSpec::new(0).symbols(1)).unwrap_err();
        assert!(matches!(err, Error::LengthExceeded { .. }));

        let err = generator.generate(&GenerationSpec::new(5).digits(3).symbols(3)).unwrap_err();
        assert!(matches!(err, Error::LengthExceeded { length: 5, digits: 3, symbols: 3 }));
    }

    #[test]
    fn test_exceeds_letters_available() {
        let err = Generator::new().generate(&GenerationSpec::new(1000)).unwrap_err();
        assert!(matches!(err, Error::LettersUnavailable { requested: 1000, available: 52 }));
    }

    #[test]
    fn test_exceeds_letters_available_without_upper() {
        let spec = GenerationSpec::new(27).no_upper(true);
        let err = Generator::new().generate(&spec).unwrap_err();
        assert!(matches!(err, Error::LettersUnavailable { requested: 27, available: 26 }));
    }

    #[test]
    fn test_exceeds_digits_available() {
        let err = Generator::new().generate(&GenerationSpec::new(52).digits(11)).unwrap_err();
        assert!(matches!(err, Error::DigitsUnavailable { requested: 11, available: 10 }));
    }

    #[test]
    fn test_exceeds_symbols_available() {
        let err = Generator::new().generate(&GenerationSpec::new(52).symbols(31)).unwrap_err();
        assert!(matches!(err, Error::SymbolsUnavailable { requested: 31, available: 30 }));
    }

    #[test]
    fn test_duplicated_pool_counts_distinct() {
        let generator = Generator::new().with_digits("00112");
        let err = generator.generate(&GenerationSpec::new(4).digits(4)).unwrap_err();
        assert!(matches!(err, Error::DigitsUnavailable { requested: 4, available: 3 }));
    }

    #[test]
    fn test_overlapping_pools_fail_instead_of_spinning() {
        // The letter phase consumes every digit, leaving none fresh for the digit phase.
        let generator = Generator::new().with_lower_letters("ab").with_upper_letters("").with_digits("ab");
        let err = generator.generate(&GenerationSpec::new(3).digits(1)).unwrap_err();
        assert!(matches!(err, Error::DigitsUnavailable { requested: 1, available: 0 }));
    }

    #[test]
    fn test_validation_happens_before_any_draw() {
        let mut source = ScriptedSource::new(&[]);
        let spec = GenerationSpec::new(52).digits(11);
        assert!(Generator::new().generate_with(&spec, &mut source).is_err());
        assert!(source.bounds.is_empty());
    }

    #[test]
    fn test_empty_letter_pool_with_repeats() {
        let generator = Generator::new().with_lower_letters("").with_upper_letters("");
        let spec = GenerationSpec::new(3).allow_repeat(true);
        let err = generator.generate(&spec).unwrap_err();
        assert!(matches!(err, Error::EmptyPool { kind: PoolKind::Letter }));

        // Nothing drawn from the empty pool, so nothing fails.
        let spec = GenerationSpec::new(2).digits(1).symbols(1).allow_repeat(true);
        assert_eq!(generator.generate(&spec).unwrap().chars().count(), 2);
    }

    #[test]
    fn test_zero_length() {
        assert_eq!(Generator::new().generate(&GenerationSpec::default()).unwrap(), "");
    }

    #[test]
    fn test_rejected_draw_is_retried() {
        let generator = Generator::new().with_lower_letters("abc").with_upper_letters("");
        // 'a' first, then 'a' again (rejected, no insert draw), then 'c' at the end.
        let mut source = ScriptedSource::new(&[0, 0, 2, 1]);
        let password = generator.generate_with(&GenerationSpec::new(2), &mut source).unwrap();

        assert_eq!(password, "ac");
        assert_eq!(source.bounds, vec![3, 3, 3, 2]);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_repeats_are_kept_when_allowed() {
        let generator = Generator::new().with_lower_letters("abc").with_upper_letters("");
        let mut source = ScriptedSource::new(&[0, 0, 0]);
        let spec = GenerationSpec::new(2).allow_repeat(true);
        let password = generator.generate_with(&spec, &mut source).unwrap();

        assert_eq!(password, "aa");
        assert_eq!(source.bounds, vec![3, 3, 2]);
    }

    #[test]
    fn test_phases_insert_at_drawn_positions() {
        let generator = Generator::new()
            .with_lower_letters("x")
            .with_upper_letters("")
            .with_digits("7")
            .with_symbols("#");
        // Letter 'x' (no insert draw), digit '7' at 0, symbol '#' at 1.
        let mut source = ScriptedSource::new(&[0, 0, 0, 0, 1]);
        let spec = GenerationSpec::new(3).digits(1).symbols(1);
        let password = generator.generate_with(&spec, &mut source).unwrap();

        assert_eq!(password, "7#x");
        assert_eq!(source.bounds, vec![1, 1, 2, 1, 3]);
    }

    #[test]
    fn test_gen_lowercase() {
        let generator = Generator::new();
        let mut rng = StdRng::seed_from_u64(1);

        for i in 0..1_000 {
            let spec = GenerationSpec::new(i % LOWER_LETTERS.len()).no_upper(true).allow_repeat(true);
            let password = generator.generate_with(&spec, &mut rng).unwrap();
            assert_eq!(password, password.to_lowercase(), "{password:?} is not lowercase");
        }
    }

    #[test]
    fn test_gen_uppercase() {
        let spec = GenerationSpec::new(1000).allow_repeat(true);
        let password = Generator::new().generate(&spec).unwrap();
        assert_ne!(password, password.to_lowercase(), "{password:?} does not include uppercase");
    }

    #[test]
    fn test_gen_no_repeats() {
        let generator = Generator::new();
        let mut rng = StdRng::seed_from_u64(2);
        let spec = GenerationSpec::new(90).digits(10).symbols(30);

        for _ in 0..1_000 {
            let password = generator.generate_with(&spec, &mut rng).unwrap();
            assert_eq!(password.chars().count(), 90);
            assert!(!has_duplicates(&password), "{password:?} should not have duplicates");
        }
    }

    #[test]
    fn test_class_counts() {
        let generator = Generator::new();
        let mut rng = StdRng::seed_from_u64(3);
        let spec = GenerationSpec::new(64).digits(10).symbols(10).allow_repeat(true);

        for _ in 0..1_000 {
            let password = generator.generate_with(&spec, &mut rng).unwrap();
            let digits = password.chars().filter(|ch| DIGITS.contains(*ch)).count();
            let symbols = password.chars().filter(|ch| SYMBOLS.contains(*ch)).count();
            let letters = password.chars().filter(|ch| ch.is_ascii_alphabetic()).count();

            assert_eq!(digits, 10);
            assert_eq!(symbols, 10);
            assert_eq!(letters, 44);
        }
    }

    #[test]
    fn test_with_symbols_leaves_original_untouched() {
        let original = Generator::new();
        let custom = original.with_symbols("!");

        assert_eq!(original.symbols().to_string(), SYMBOLS);
        assert_eq!(custom.symbols().to_string(), "!");
        assert_eq!(custom.digits(), original.digits());
    }

    #[test]
    #[should_panic(expected = "must not exceed total length")]
    fn test_must_generate_panics() {
        Generator::new().must_generate(&GenerationSpec::new(0).digits(1));
    }

    #[test]
    fn test_insert_positions_are_uniform() {
        // Place one digit among 9 letters; it should land in each of the 10
        // slots about equally often.
        let generator = Generator::new();
        let mut rng = StdRng::seed_from_u64(4);
        let spec = GenerationSpec::new(10).digits(1).no_upper(true);
        let mut counts = [0usize; 10];

        for _ in 0..100_000 {
            let password = generator.generate_with(&spec, &mut rng).unwrap();
            let position = password.chars().position(|ch| ch.is_ascii_digit()).unwrap();
            counts[position] += 1;
        }

        for (position, count) in counts.iter().enumerate() {
            assert!((9_000..=11_000).contains(count), "slot {position} hit {count} times");
        }
    }
}
