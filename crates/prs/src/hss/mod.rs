//! Homomorphic secret sharing of the product of secret inputs.
//!
//! Each input is split into additive shares, one per server, and every share
//! is also encrypted with the PRS scheme. A server sees all plaintext shares
//! except its own, for which it only sees the ciphertext. Each server folds
//! the cross terms it is responsible for into an encrypted partial result,
//! and the product of all partial results decrypts to the product of the
//! inputs.

mod aggregate;
pub mod config;
mod direct;
mod evaluator;
mod partial;
mod partition;
mod sharing;
mod view;

pub use aggregate::{Aggregate, AggregateIter};
pub use config::HssConfig;
pub use direct::direct_evaluate;
pub use evaluator::Evaluator;
pub use partial::{decode, PartialResult};
pub use partition::{Fold, Term, TermPartition};
pub use sharing::{AdditiveSharing, EncryptedShareVector, ShareVector};
pub use view::ServerView;
