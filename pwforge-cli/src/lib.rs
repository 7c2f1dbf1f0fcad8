//! Command-line front end for [pwforge](https://crates.io/crates/pwforge).
//!
//! Parses flags into a [`pwforge::GenerationSpec`], applies any pool
//! overrides to a [`pwforge::Generator`] and prints the results.
//!
//! ```sh
//! pwforge --length 24 --digits 4 --symbols 4 --count 5
//! pwforge -l 16 -s 0 --no-upper --json
//! ```

pub mod args;
pub mod error;

pub use args::Args;
pub use error::Error;
