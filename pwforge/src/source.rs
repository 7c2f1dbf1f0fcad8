//! Randomness primitives.
//!
//! Every draw goes through [`RandomSource`], which is implemented for any
//! [`RngCore`] that is also a [`CryptoRng`]. Production code wires
//! [`rand::rngs::OsRng`]; tests and benches may pass a seeded CSPRNG instead.

use rand::{CryptoRng, RngCore};

use crate::error::Error;
use crate::pool::CharacterPool;

/// Provides uniformly distributed integers in a half-open range.
pub trait RandomSource {
    /// Returns an integer drawn uniformly from `[0, upper)`.
    ///
    /// `upper` must be positive. A bound of 1 returns 0 without consuming
    /// randomness.
    fn below(&mut self, upper: usize) -> Result<usize, Error>;
}

impl<R: RngCore + CryptoRng + ?Sized> RandomSource for R {
    fn below(&mut self, upper: usize) -> Result<usize, Error> {
        debug_assert!(upper > 0, "upper bound must be positive");
        if upper <= 1 {
            return Ok(0);
        }

        let upper = upper as u64;
        // Values at or above the largest multiple of `upper` would skew the
        // low residues, so they are redrawn.
        let zone = u64::MAX - u64::MAX % upper;
        let mut buf = [0u8; 8];
        loop {
            self.try_fill_bytes(&mut buf).map_err(Error::RandomSource)?;
            let value = u64::from_le_bytes(buf);
            if value < zone {
                return Ok((value % upper) as usize);
            }
        }
    }
}

/// Draws one character from `pool`, each position with probability `1/len`.
pub fn random_element<S>(pool: &CharacterPool, source: &mut S) -> Result<char, Error>
where
    S: RandomSource + ?Sized,
{
    if pool.is_empty() {
        return Err(Error::EmptyPool { kind: pool.kind() });
    }
    let index = source.below(pool.len())?;
    Ok(pool.chars()[index])
}

/// Splices `ch` into `current` at a position drawn uniformly from
/// `[0, current.len()]`, so it may land first, last or anywhere between.
pub fn random_insert<S>(current: &mut Vec<char>, ch: char, source: &mut S) -> Result<(), Error>
where
    S: RandomSource + ?Sized,
{
    if current.is_empty() {
        current.push(ch);
        return Ok(());
    }
    let index = source.below(current.len() + 1)?;
    current.insert(index, ch);
    Ok(())
}
