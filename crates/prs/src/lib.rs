#![crate_name = "prs"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Additively homomorphic encryption from 2^k-th power residuosity (PRS),
//! and a homomorphic secret sharing protocol for the product of secret
//! inputs built on top of it.

mod errors;

pub mod hss;
pub mod proto;
pub mod prs;
pub use errors::{Error, ParametersError, Result};
