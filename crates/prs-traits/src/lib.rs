#![crate_name = "prs_traits"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Traits for additively homomorphic public-key encryption and the secret
//! sharing protocols built on top of it.

use rand::{CryptoRng, RngCore};
use std::sync::Arc;

/// The encryption parameters.
pub trait HeParameters {}

/// Indicates that an object is parametrized.
pub trait HeParametrized {
    /// The type of the encryption parameters.
    type Parameters: HeParameters;
}

/// A plaintext which encodes a single value.
pub trait HePlaintext
where
    Self: Sized + HeParametrized,
{
}

/// A ciphertext which encrypts a plaintext.
pub trait HeCiphertext
where
    Self: Sized + Serialize + HeParametrized,
{
}

/// Encrypt a plaintext into a ciphertext.
pub trait HeEncrypter<
    P: HePlaintext<Parameters = Self::Parameters>,
    C: HeCiphertext<Parameters = Self::Parameters>,
>: HeParametrized
{
    /// The type of error returned.
    type Error;

    /// Try to encrypt a [`HePlaintext`] into a [`HeCiphertext`].
    fn try_encrypt<R: RngCore + CryptoRng>(&self, pt: &P, rng: &mut R) -> Result<C, Self::Error>;
}

/// Decrypt a ciphertext into a plaintext.
pub trait HeDecrypter<
    P: HePlaintext<Parameters = Self::Parameters>,
    C: HeCiphertext<Parameters = Self::Parameters>,
>: HeParametrized
{
    /// The type of error returned.
    type Error;

    /// Try to decrypt a [`HeCiphertext`] into a [`HePlaintext`].
    fn try_decrypt(&self, ct: &C) -> Result<P, Self::Error>;
}

/// Serialization.
pub trait Serialize {
    /// Serialize `Self` into a vector of bytes.
    fn to_bytes(&self) -> Vec<u8>;
}

/// Deserialization of a parametrized value.
pub trait DeserializeParametrized
where
    Self: Sized,
    Self: HeParametrized,
{
    /// The type of error returned.
    type Error;

    /// Attempt to deserialize from a vector of bytes.
    fn from_bytes(bytes: &[u8], par: &Arc<Self::Parameters>) -> Result<Self, Self::Error>;
}

/// Deserialization setting an explicit context.
pub trait DeserializeWithContext
where
    Self: Sized,
{
    /// The type of error returned.
    type Error;

    /// The type of context.
    type Context;

    /// Attempt to deserialize from a vector of bytes.
    fn from_bytes(bytes: &[u8], ctx: &Arc<Self::Context>) -> Result<Self, Self::Error>;
}
