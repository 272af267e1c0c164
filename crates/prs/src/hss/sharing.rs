//! Additive secret sharing of plaintexts, with one encrypted copy per share.

use crate::hss::HssConfig;
use crate::prs::{Ciphertext, Plaintext, PrsParameters, PublicKey};
use crate::{Error, Result};
use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// The N plaintext shares of one input, summing to the input modulo 2^k.
pub struct ShareVector {
    pub(crate) par: Arc<PrsParameters>,
    pub(crate) shares: Vec<Plaintext>,
}

impl ShareVector {
    /// Number of shares, which is the number of servers.
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    /// Whether the vector holds no shares.
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// The share held at index `i`.
    pub fn get(&self, i: usize) -> Option<&Plaintext> {
        self.shares.get(i)
    }

    /// Iterate over the shares.
    pub fn iter(&self) -> impl Iterator<Item = &Plaintext> {
        self.shares.iter()
    }

    /// Recombine the shares into the shared input.
    pub fn reconstruct(&self) -> Plaintext {
        let sum = self
            .shares
            .iter()
            .fold(BigUint::zero(), |acc, s| acc + &s.value);
        Plaintext::new_reduced(&sum, &self.par)
    }
}

impl fmt::Debug for ShareVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareVector")
            .field("par", &self.par)
            .field("len", &self.shares.len())
            .finish_non_exhaustive()
    }
}

impl Zeroize for ShareVector {
    fn zeroize(&mut self) {
        self.shares.iter_mut().for_each(|s| s.zeroize());
    }
}

impl Drop for ShareVector {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for ShareVector {}

/// The encryptions of the N shares of one input, in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedShareVector {
    pub(crate) ciphertexts: Vec<Ciphertext>,
}

impl EncryptedShareVector {
    /// Number of ciphertexts, which is the number of servers.
    pub fn len(&self) -> usize {
        self.ciphertexts.len()
    }

    /// Whether the vector holds no ciphertexts.
    pub fn is_empty(&self) -> bool {
        self.ciphertexts.is_empty()
    }

    /// The ciphertext of the share held at index `i`.
    pub fn get(&self, i: usize) -> Option<&Ciphertext> {
        self.ciphertexts.get(i)
    }

    /// Iterate over the ciphertexts.
    pub fn iter(&self) -> impl Iterator<Item = &Ciphertext> {
        self.ciphertexts.iter()
    }
}

/// Splits plaintexts into additive shares for a fixed set of servers, and
/// encrypts every share under the public key.
#[derive(Debug, Clone)]
pub struct AdditiveSharing {
    pk: Arc<PublicKey>,
    num_servers: usize,
    base_size: usize,
}

impl AdditiveSharing {
    /// Create a sharer for the servers of `config`, encrypting under `pk`
    /// with the default base size of the parameters.
    pub fn new(config: &HssConfig, pk: &Arc<PublicKey>) -> Result<Self> {
        if config.parameters() != &pk.par {
            return Err(Error::IncompatibleParameters);
        }
        Ok(Self {
            pk: pk.clone(),
            num_servers: config.num_servers(),
            base_size: pk.par.base_size(),
        })
    }

    /// Use a different number of bits for the encryption randomness.
    pub fn with_base_size(mut self, base_size: usize) -> Result<Self> {
        self.pk.par.check_base_size(base_size)?;
        self.base_size = base_size;
        Ok(self)
    }

    /// Returns the number of servers.
    pub fn num_servers(&self) -> usize {
        self.num_servers
    }

    /// Split a plaintext into additive shares without encrypting them.
    ///
    /// The first N-1 shares are uniform in `[0, input)`, and the last one is
    /// `input - sum(others)` reduced modulo 2^k.
    pub fn split<R: RngCore + CryptoRng>(&self, pt: &Plaintext, rng: &mut R) -> Result<ShareVector> {
        let par = &self.pk.par;
        if &pt.par != par {
            return Err(Error::IncompatibleParameters);
        }

        let mut shares = Vec::with_capacity(self.num_servers);
        let mut sum = Zeroizing::new(BigUint::zero());
        for _ in 1..self.num_servers {
            let share = if pt.value.is_zero() {
                BigUint::zero()
            } else {
                rng.gen_biguint_below(&pt.value)
            };
            *sum += &share;
            shares.push(Plaintext {
                par: par.clone(),
                value: share,
            });
        }
        let last = par.reduce(&(&pt.value + par.plaintext_modulus() - par.reduce(&sum)));
        shares.push(Plaintext {
            par: par.clone(),
            value: last,
        });

        Ok(ShareVector {
            par: par.clone(),
            shares,
        })
    }

    /// Split a plaintext into additive shares and encrypt each of them.
    pub fn share<R: RngCore + CryptoRng>(
        &self,
        pt: &Plaintext,
        rng: &mut R,
    ) -> Result<(ShareVector, EncryptedShareVector)> {
        let shares = self.split(pt, rng)?;
        let ciphertexts = shares
            .iter()
            .map(|s| self.pk.encrypt_value(&s.value, self.base_size, &mut *rng))
            .collect::<Vec<_>>();
        debug!(
            shares = ciphertexts.len(),
            base_size = self.base_size,
            "encrypted shares"
        );
        Ok((shares, EncryptedShareVector { ciphertexts }))
    }

    /// Share every input, in order.
    pub fn share_all<R: RngCore + CryptoRng>(
        &self,
        inputs: &[Plaintext],
        rng: &mut R,
    ) -> Result<(Vec<ShareVector>, Vec<EncryptedShareVector>)> {
        info!(
            "Sharing {} inputs among {} servers",
            inputs.len(),
            self.num_servers
        );
        let mut shares = Vec::with_capacity(inputs.len());
        let mut encrypted = Vec::with_capacity(inputs.len());
        for pt in inputs {
            let (s, e) = self.share(pt, rng)?;
            shares.push(s);
            encrypted.push(e);
        }
        Ok((shares, encrypted))
    }
}
