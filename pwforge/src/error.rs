use crate::pool::PoolKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("number of digits ({digits}) and symbols ({symbols}) must not exceed total length ({length})")]
    LengthExceeded { length: usize, digits: usize, symbols: usize },

    #[error(
        "number of letters ({requested}) exceeds available letters ({available}) and repeats are not allowed"
    )]
    LettersUnavailable { requested: usize, available: usize },

    #[error(
        "number of digits ({requested}) exceeds available digits ({available}) and repeats are not allowed"
    )]
    DigitsUnavailable { requested: usize, available: usize },

    #[error(
        "number of symbols ({requested}) exceeds available symbols ({available}) and repeats are not allowed"
    )]
    SymbolsUnavailable { requested: usize, available: usize },

    #[error("cannot draw from the empty {kind} pool")]
    EmptyPool { kind: PoolKind },

    #[error("failed to generate random integer: {0}")]
    RandomSource(#[source] rand::Error),
}
