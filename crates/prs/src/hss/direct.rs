//! Plaintext evaluation of the product, used to validate the protocol.

use crate::prs::{Plaintext, PrsParameters};
use crate::{Error, Result};
use num_bigint_dig::BigUint;
use num_traits::One;
use std::sync::Arc;

/// Product of the factors modulo 2^k, reducing after every multiplication.
pub(crate) fn product_mod<'a, I>(factors: I, par: &PrsParameters) -> BigUint
where
    I: IntoIterator<Item = &'a BigUint>,
{
    factors
        .into_iter()
        .fold(BigUint::one(), |acc, f| par.reduce(&(acc * f)))
}

/// Compute the product of the inputs modulo 2^k directly from the plaintexts.
pub fn direct_evaluate(inputs: &[Plaintext], par: &Arc<PrsParameters>) -> Result<Plaintext> {
    if inputs.is_empty() {
        return Err(Error::TooFewValues(0, 1));
    }
    if inputs.iter().any(|pt| &pt.par != par) {
        return Err(Error::IncompatibleParameters);
    }
    let value = product_mod(inputs.iter().map(|pt| &pt.value), par);
    Ok(Plaintext {
        par: par.clone(),
        value,
    })
}
