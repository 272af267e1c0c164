//! Create parameters for the PRS encryption scheme

use crate::proto::prs::Parameters as ParametersProto;
use crate::{Error, ParametersError, Result};
use num_bigint_dig::BigUint;
use num_traits::One;
use prost::Message;
use prs_traits::{HeParameters, Serialize};
use std::sync::Arc;

/// Parameters for the PRS encryption scheme.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PrsParameters {
    /// Number of bits of a plaintext (the `k` of the scheme).
    message_bits: usize,

    /// Number of bits of the public modulus `n = p * q`.
    modulus_bits: usize,

    /// Default number of bits of the encryption randomness.
    base_size: usize,

    /// Number of Miller-Rabin rounds used when generating primes.
    primality_rounds: usize,

    /// Cap on the number of candidates drawn by each generation loop.
    max_attempts: usize,

    /// Plaintext modulus 2^k.
    pub(crate) plaintext_modulus: BigUint,
}

impl PrsParameters {
    /// Returns the number of bits of a plaintext.
    pub const fn message_bits(&self) -> usize {
        self.message_bits
    }

    /// Returns the number of bits of the public modulus.
    pub const fn modulus_bits(&self) -> usize {
        self.modulus_bits
    }

    /// Returns the default number of bits of the encryption randomness.
    pub const fn base_size(&self) -> usize {
        self.base_size
    }

    /// Returns the number of Miller-Rabin rounds.
    pub const fn primality_rounds(&self) -> usize {
        self.primality_rounds
    }

    /// Returns the cap on the number of attempts of each generation loop.
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Returns the plaintext modulus 2^k.
    pub fn plaintext_modulus(&self) -> &BigUint {
        &self.plaintext_modulus
    }

    /// Reduce a value modulo the plaintext modulus.
    pub fn reduce(&self, value: &BigUint) -> BigUint {
        value % &self.plaintext_modulus
    }

    /// Check that `base_size` is a valid randomness size for these
    /// parameters, i.e. that `0 < base_size <= k`.
    pub fn check_base_size(&self, base_size: usize) -> Result<()> {
        if base_size == 0 || base_size > self.message_bits {
            Err(Error::ParametersError(ParametersError::InvalidBaseSize(
                base_size,
                self.message_bits,
            )))
        } else {
            Ok(())
        }
    }

    /// Returns default parameters for a message size and a modulus size.
    #[cfg(test)]
    pub fn default_arc(message_bits: usize, modulus_bits: usize) -> Arc<Self> {
        PrsParametersBuilder::new()
            .set_message_bits(message_bits)
            .set_modulus_bits(modulus_bits)
            .build_arc()
            .unwrap()
    }
}

impl HeParameters for PrsParameters {}

impl Serialize for PrsParameters {
    fn to_bytes(&self) -> Vec<u8> {
        ParametersProto::from(self).encode_to_vec()
    }
}

impl PrsParameters {
    /// Deserialize parameters, validating them as the builder would.
    pub fn try_deserialize(bytes: &[u8]) -> Result<Self> {
        let proto: ParametersProto =
            Message::decode(bytes).map_err(|_| Error::SerializationError)?;
        PrsParametersBuilder::new()
            .set_message_bits(proto.message_bits as usize)
            .set_modulus_bits(proto.modulus_bits as usize)
            .set_base_size(proto.base_size as usize)
            .set_primality_rounds(proto.primality_rounds as usize)
            .set_max_attempts(proto.max_attempts as usize)
            .build()
    }
}

impl From<&PrsParameters> for ParametersProto {
    fn from(par: &PrsParameters) -> Self {
        ParametersProto {
            message_bits: par.message_bits as u32,
            modulus_bits: par.modulus_bits as u32,
            base_size: par.base_size as u32,
            primality_rounds: par.primality_rounds as u32,
            max_attempts: par.max_attempts as u64,
        }
    }
}

/// Builder for parameters for the PRS encryption scheme.
#[derive(Debug, Clone)]
pub struct PrsParametersBuilder {
    message_bits: usize,
    modulus_bits: usize,
    base_size: Option<usize>,
    primality_rounds: usize,
    max_attempts: usize,
}

impl PrsParametersBuilder {
    /// Default number of Miller-Rabin rounds.
    pub const DEFAULT_PRIMALITY_ROUNDS: usize = 25;

    /// Default cap on the number of candidates drawn by generation loops.
    pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

    /// Number of bits each prime must have beyond the 2^k alignment. Below
    /// this the range of candidates for p holds too few primes for key
    /// generation to succeed within the attempt cap.
    pub const PRIME_HEADROOM: usize = 16;

    /// Creates a new instance of the builder
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            message_bits: Default::default(),
            modulus_bits: Default::default(),
            base_size: None,
            primality_rounds: Self::DEFAULT_PRIMALITY_ROUNDS,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the number of bits of a plaintext.
    pub fn set_message_bits(&mut self, message_bits: usize) -> &mut Self {
        self.message_bits = message_bits;
        self
    }

    /// Sets the number of bits of the public modulus.
    pub fn set_modulus_bits(&mut self, modulus_bits: usize) -> &mut Self {
        self.modulus_bits = modulus_bits;
        self
    }

    /// Sets the default number of bits of the encryption randomness. When
    /// not set, half of the message size is used.
    pub fn set_base_size(&mut self, base_size: usize) -> &mut Self {
        self.base_size = Some(base_size);
        self
    }

    /// Sets the number of Miller-Rabin rounds used during key generation.
    pub fn set_primality_rounds(&mut self, rounds: usize) -> &mut Self {
        self.primality_rounds = rounds;
        self
    }

    /// Sets the cap on the number of candidates drawn by each generation loop.
    pub fn set_max_attempts(&mut self, max_attempts: usize) -> &mut Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Build a new `PrsParameters` inside an `Arc`.
    pub fn build_arc(&self) -> Result<Arc<PrsParameters>> {
        self.build().map(Arc::new)
    }

    /// Build a new `PrsParameters`.
    pub fn build(&self) -> Result<PrsParameters> {
        if self.message_bits == 0 {
            return Err(Error::ParametersError(
                ParametersError::InvalidMessageSize(self.message_bits),
            ));
        }

        // Each prime has n_bits / 2 bits, of which the top bit and the k low
        // bits of p are fixed.
        let min_modulus_bits = 2 * (self.message_bits + Self::PRIME_HEADROOM);
        if self.modulus_bits == 0 {
            return Err(Error::ParametersError(ParametersError::TooFewSpecified(
                "The modulus size must be specified".to_string(),
            )));
        }
        if self.modulus_bits % 2 != 0 || self.modulus_bits < min_modulus_bits {
            return Err(Error::ParametersError(
                ParametersError::InvalidModulusSize(self.modulus_bits, min_modulus_bits),
            ));
        }

        let base_size = self
            .base_size
            .unwrap_or_else(|| std::cmp::max(self.message_bits / 2, 1));
        if base_size == 0 || base_size > self.message_bits {
            return Err(Error::ParametersError(ParametersError::InvalidBaseSize(
                base_size,
                self.message_bits,
            )));
        }

        if self.primality_rounds == 0 {
            return Err(Error::ParametersError(ParametersError::InvalidRounds(
                self.primality_rounds,
            )));
        }
        if self.max_attempts == 0 {
            return Err(Error::ParametersError(ParametersError::InvalidAttempts(
                self.max_attempts,
            )));
        }

        Ok(PrsParameters {
            message_bits: self.message_bits,
            modulus_bits: self.modulus_bits,
            base_size,
            primality_rounds: self.primality_rounds,
            max_attempts: self.max_attempts,
            plaintext_modulus: BigUint::one() << self.message_bits,
        })
    }
}
