//! Partial results of the servers, and their recombination.

use crate::hss::Aggregate;
use crate::proto::prs::{Ciphertext as CiphertextProto, PartialResult as PartialResultProto};
use crate::prs::{Ciphertext, Plaintext, PublicKey, SecretKey};
use crate::{Error, Result};
use num_bigint_dig::BigUint;
use prost::Message;
use prs_traits::{DeserializeWithContext, HeDecrypter, Serialize};
use std::sync::Arc;
use tracing::info;

/// The contribution of one server: an encryption of the sum of the terms
/// assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialResult {
    pub(crate) server: usize,
    pub(crate) ciphertext: Ciphertext,
}

impl PartialResult {
    /// The index of the server that produced the partial result.
    pub fn server(&self) -> usize {
        self.server
    }

    /// The encrypted partial result.
    pub fn ciphertext(&self) -> &Ciphertext {
        &self.ciphertext
    }
}

impl Aggregate<PartialResult> for Ciphertext {
    fn from_shares<T>(iter: T) -> Result<Self>
    where
        T: IntoIterator<Item = PartialResult>,
    {
        let mut iter = iter.into_iter();
        let first = iter.next().ok_or(Error::TooFewValues(0, 1))?;
        iter.try_fold(first.ciphertext, |acc, partial| {
            acc.try_add(&partial.ciphertext)
        })
    }
}

impl<'a> Aggregate<&'a PartialResult> for Ciphertext {
    fn from_shares<T>(iter: T) -> Result<Self>
    where
        T: IntoIterator<Item = &'a PartialResult>,
    {
        Ciphertext::from_shares(iter.into_iter().cloned())
    }
}

/// Multiply the partial results of all servers together and decrypt the
/// product.
pub fn decode<'a, I>(partials: I, sk: &SecretKey) -> Result<Plaintext>
where
    I: IntoIterator<Item = &'a PartialResult>,
{
    let partials = partials.into_iter().collect::<Vec<_>>();
    info!("Decoding {} partial results", partials.len());
    let combined = Ciphertext::from_shares(partials)?;
    sk.try_decrypt(&combined)
}

impl Serialize for PartialResult {
    fn to_bytes(&self) -> Vec<u8> {
        PartialResultProto {
            server: self.server as u32,
            ciphertext: Some(CiphertextProto::from(&self.ciphertext)),
        }
        .encode_to_vec()
    }
}

impl DeserializeWithContext for PartialResult {
    type Error = Error;
    type Context = PublicKey;

    fn from_bytes(bytes: &[u8], pk: &Arc<PublicKey>) -> Result<Self> {
        let proto: PartialResultProto =
            Message::decode(bytes).map_err(|_| Error::SerializationError)?;
        let ciphertext = proto.ciphertext.ok_or(Error::SerializationError)?;
        let ciphertext = Ciphertext::new(BigUint::from_bytes_be(&ciphertext.c), pk)
            .map_err(|_| Error::SerializationError)?;
        Ok(Self {
            server: proto.server as usize,
            ciphertext,
        })
    }
}
