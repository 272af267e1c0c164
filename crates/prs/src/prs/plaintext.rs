//! Plaintext type in the PRS encryption scheme.

use crate::prs::PrsParameters;
use crate::{Error, Result};
use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::{ToPrimitive, Zero};
use prs_traits::{HeParametrized, HePlaintext};
use rand::{CryptoRng, RngCore};
use std::sync::Arc;
use zeroize::Zeroize;

/// A plaintext object, that encodes an integer in `[0, 2^k)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plaintext {
    /// The parameters of the underlying PRS encryption scheme.
    pub(crate) par: Arc<PrsParameters>,
    /// The value encoded by the plaintext.
    pub(crate) value: BigUint,
}

impl Plaintext {
    /// Create a plaintext from a value, which must be smaller than 2^k.
    pub fn try_new(value: BigUint, par: &Arc<PrsParameters>) -> Result<Self> {
        if value.bits() > par.message_bits() {
            return Err(Error::PlaintextOutOfRange(par.message_bits()));
        }
        Ok(Self {
            par: par.clone(),
            value,
        })
    }

    /// Create a plaintext from a `u64` value, which must be smaller than 2^k.
    pub fn try_from_u64(value: u64, par: &Arc<PrsParameters>) -> Result<Self> {
        Self::try_new(BigUint::from(value), par)
    }

    /// Create a plaintext from an arbitrary value, reduced modulo 2^k.
    pub fn new_reduced(value: &BigUint, par: &Arc<PrsParameters>) -> Self {
        Self {
            par: par.clone(),
            value: par.reduce(value),
        }
    }

    /// Generate the zero plaintext.
    pub fn zero(par: &Arc<PrsParameters>) -> Self {
        Self {
            par: par.clone(),
            value: BigUint::zero(),
        }
    }

    /// Generate a uniformly random plaintext.
    pub fn random<R: RngCore + CryptoRng>(par: &Arc<PrsParameters>, rng: &mut R) -> Self {
        Self {
            par: par.clone(),
            value: rng.gen_biguint(par.message_bits()),
        }
    }

    /// Returns the value encoded by the plaintext.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Returns the value as a `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.value.to_u64()
    }
}

impl Zeroize for Plaintext {
    fn zeroize(&mut self) {
        self.value.zeroize();
        // Zeroizing the limbs leaves a non-normalized value.
        self.value = BigUint::zero();
    }
}

impl HeParametrized for Plaintext {
    type Parameters = PrsParameters;
}

impl HePlaintext for Plaintext {}
