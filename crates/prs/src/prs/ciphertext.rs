//! Ciphertext type in the PRS encryption scheme.

use crate::proto::prs::Ciphertext as CiphertextProto;
use crate::prs::{PrsParameters, PublicKey};
use crate::{Error, Result};
use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use prost::Message;
use prs_traits::{DeserializeWithContext, HeCiphertext, HeParametrized, Serialize};
use std::sync::Arc;

/// A ciphertext encrypting a plaintext.
///
/// The plaintext group is additive while the ciphertext group is
/// multiplicative: the product of two ciphertexts encrypts the sum of their
/// plaintexts modulo 2^k.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    /// The parameters of the underlying PRS encryption scheme.
    pub(crate) par: Arc<PrsParameters>,

    /// The public modulus of the key the ciphertext was produced under.
    pub(crate) n: Arc<BigUint>,

    /// The ciphertext value, in [1, n).
    pub(crate) c: BigUint,
}

impl Ciphertext {
    /// Create a ciphertext from its value under a public key.
    pub fn new(c: BigUint, pk: &PublicKey) -> Result<Self> {
        if c.is_zero() || &c >= pk.n() {
            return Err(Error::UnspecifiedInput(
                "Ciphertext value must lie in [1, n)".to_string(),
            ));
        }
        Ok(Self {
            par: pk.par.clone(),
            n: pk.n.clone(),
            c,
        })
    }

    /// The neutral ciphertext 1, a deterministic encryption of zero.
    pub fn identity(pk: &PublicKey) -> Self {
        Self {
            par: pk.par.clone(),
            n: pk.n.clone(),
            c: BigUint::one(),
        }
    }

    /// Returns the ciphertext value.
    pub fn value(&self) -> &BigUint {
        &self.c
    }

    /// Returns the parameters of the ciphertext.
    pub fn parameters(&self) -> &Arc<PrsParameters> {
        &self.par
    }

    /// Whether both ciphertexts were produced under the same public key.
    pub fn is_compatible(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.n, &other.n) || self.n == other.n) && self.par == other.par
    }

    /// Homomorphic addition of the plaintexts, or an error if the ciphertexts
    /// were produced under different public keys.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        if !self.is_compatible(other) {
            return Err(Error::IncompatibleKeys);
        }
        Ok(Self {
            par: self.par.clone(),
            n: self.n.clone(),
            c: (&self.c * &other.c) % self.n.as_ref(),
        })
    }

    /// Homomorphic multiplication of the plaintext by a public scalar.
    pub fn scalar_mul(&self, scalar: &BigUint) -> Self {
        Self {
            par: self.par.clone(),
            n: self.n.clone(),
            c: self.c.modpow(scalar, &self.n),
        }
    }
}

impl HeCiphertext for Ciphertext {}

impl HeParametrized for Ciphertext {
    type Parameters = PrsParameters;
}

impl Serialize for Ciphertext {
    fn to_bytes(&self) -> Vec<u8> {
        CiphertextProto::from(self).encode_to_vec()
    }
}

impl DeserializeWithContext for Ciphertext {
    type Error = Error;
    type Context = PublicKey;

    fn from_bytes(bytes: &[u8], pk: &Arc<PublicKey>) -> Result<Self> {
        let proto: CiphertextProto =
            Message::decode(bytes).map_err(|_| Error::SerializationError)?;
        Ciphertext::new(BigUint::from_bytes_be(&proto.c), pk)
            .map_err(|_| Error::SerializationError)
    }
}

impl From<&Ciphertext> for CiphertextProto {
    fn from(ct: &Ciphertext) -> Self {
        CiphertextProto {
            c: ct.c.to_bytes_be(),
        }
    }
}
