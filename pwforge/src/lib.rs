//! Random password generation from a cryptographically secure source.
//!
//! A password is built from four character pools (lowercase letters,
//! uppercase letters, digits and symbols). The caller fixes the total length
//! and the exact number of digits and symbols; every remaining character is a
//! letter. Each character is drawn uniformly from its pool and spliced into a
//! uniformly random position of the password built so far.
//!
//! ```
//! use pwforge::GenerationSpec;
//!
//! let password = pwforge::generate(&GenerationSpec::new(64).digits(10).symbols(10))?;
//! assert_eq!(password.chars().count(), 64);
//! # Ok::<(), pwforge::Error>(())
//! ```
//!
//! Pools can be customized. Every `with_*` call returns a new [`Generator`]:
//!
//! ```
//! use pwforge::{GenerationSpec, Generator};
//!
//! let generator = Generator::new().with_symbols("!@#$%^()");
//! let password = generator.generate(&GenerationSpec::new(16).symbols(4))?;
//! assert_eq!(password.chars().filter(|c| "!@#$%^()".contains(*c)).count(), 4);
//! # Ok::<(), pwforge::Error>(())
//! ```
//!
//! Uppercase letters are drawn like any other letter, so a password is not
//! guaranteed to contain one and may not satisfy every site's policy.
//!
//! All randomness comes from [`rand::rngs::OsRng`] unless a different
//! [`RandomSource`] is passed to [`Generator::generate_with`].

pub mod error;
pub mod generator;
pub mod pool;
pub mod source;

pub use error::Error;
pub use generator::{GenerationSpec, Generator};
pub use pool::{CharacterPool, DIGITS, LOWER_LETTERS, PoolKind, SYMBOLS, UPPER_LETTERS};
pub use source::{RandomSource, random_element, random_insert};

/// Generates a password with the default pools.
///
/// Shortcut for `Generator::new().generate(spec)`.
pub fn generate(spec: &GenerationSpec) -> Result<String, Error> {
    Generator::new().generate(spec)
}

/// Generates a password with the default pools, panicking on error.
///
/// ```should_panic
/// // More digits than characters.
/// pwforge::must_generate(&pwforge::GenerationSpec::new(0).digits(1));
/// ```
pub fn must_generate(spec: &GenerationSpec) -> String {
    Generator::new().must_generate(spec)
}
