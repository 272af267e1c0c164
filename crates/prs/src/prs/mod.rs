#![warn(missing_docs, unused_imports)]

//! The additively homomorphic 2^k-th power residue (PRS) encryption scheme.
//!
//! Plaintexts are integers modulo 2^k. A ciphertext is
//! `c = y^m * x^(2^k) mod n` where `n = p * q` with `p = 1 mod 2^k`, and the
//! product of ciphertexts encrypts the sum of the plaintexts.

mod ciphertext;
mod keys;
mod ops;
mod parameters;
mod plaintext;

pub use ciphertext::Ciphertext;
pub use keys::{PublicKey, SecretKey};
pub use parameters::{PrsParameters, PrsParametersBuilder};
pub use plaintext::Plaintext;
