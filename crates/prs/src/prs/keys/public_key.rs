//! Public keys for the PRS encryption scheme

use crate::proto::prs::PublicKey as PublicKeyProto;
use crate::prs::{Ciphertext, Plaintext, PrsParameters};
use crate::{Error, Result};
use num_bigint_dig::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use prost::Message;
use prs_traits::{DeserializeParametrized, HeEncrypter, HeParametrized, Serialize};
use rand::{CryptoRng, RngCore};
use std::sync::Arc;

/// Public key for the PRS encryption scheme.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PublicKey {
    pub(crate) par: Arc<PrsParameters>,
    /// The modulus n = p * q
    pub(crate) n: Arc<BigUint>,
    /// A unit modulo n with Jacobi symbol -1 modulo both p and q
    pub(crate) y: BigUint,
}

impl PublicKey {
    pub(crate) fn new(n: BigUint, y: BigUint, par: &Arc<PrsParameters>) -> Self {
        Self {
            par: par.clone(),
            n: Arc::new(n),
            y,
        }
    }

    /// Returns the public modulus n.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Returns the public base y.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// Returns the parameters of the public key.
    pub fn parameters(&self) -> &Arc<PrsParameters> {
        &self.par
    }

    /// Whether a ciphertext modulo `n` was produced under this key.
    pub(crate) fn is_compatible_with(&self, n: &Arc<BigUint>) -> bool {
        Arc::ptr_eq(&self.n, n) || self.n == *n
    }

    /// Encrypt a plaintext with an explicit size for the encryption
    /// randomness, which must satisfy `0 < base_size <= k`.
    pub fn try_encrypt_with_base_size<R: RngCore + CryptoRng>(
        &self,
        pt: &Plaintext,
        rng: &mut R,
        base_size: usize,
    ) -> Result<Ciphertext> {
        self.par.check_base_size(base_size)?;
        if pt.par != self.par {
            return Err(Error::IncompatibleParameters);
        }
        Ok(self.encrypt_value(&pt.value, base_size, rng))
    }

    /// Compute c = y^m * x^(2^k) mod n, for a random x in [1, 2^base_size).
    ///
    /// Any such x is a unit since 2^base_size <= 2^k is below both primes.
    pub(crate) fn encrypt_value<R: RngCore + CryptoRng>(
        &self,
        m: &BigUint,
        base_size: usize,
        rng: &mut R,
    ) -> Ciphertext {
        debug_assert!(base_size > 0 && base_size <= self.par.message_bits());
        let upper = BigUint::one() << base_size;
        let x = rng.gen_biguint_range(&BigUint::one(), &upper);
        let y_m = self.y.modpow(m, &self.n);
        let x_k = x.modpow(&self.par.plaintext_modulus, &self.n);
        Ciphertext {
            par: self.par.clone(),
            n: self.n.clone(),
            c: (y_m * x_k) % self.n.as_ref(),
        }
    }
}

impl HeParametrized for PublicKey {
    type Parameters = PrsParameters;
}

impl HeEncrypter<Plaintext, Ciphertext> for PublicKey {
    type Error = Error;

    fn try_encrypt<R: RngCore + CryptoRng>(
        &self,
        pt: &Plaintext,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        self.try_encrypt_with_base_size(pt, rng, self.par.base_size())
    }
}

impl Serialize for PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        PublicKeyProto {
            n: self.n.to_bytes_be(),
            y: self.y.to_bytes_be(),
        }
        .encode_to_vec()
    }
}

impl DeserializeParametrized for PublicKey {
    type Error = Error;

    fn from_bytes(bytes: &[u8], par: &Arc<PrsParameters>) -> Result<Self> {
        let proto: PublicKeyProto =
            Message::decode(bytes).map_err(|_| Error::SerializationError)?;
        let n = BigUint::from_bytes_be(&proto.n);
        let y = BigUint::from_bytes_be(&proto.y);

        // n is the product of two n_bits / 2 primes.
        let n_bits = n.bits();
        if n_bits + 1 < par.modulus_bits() || n_bits > par.modulus_bits() || n.is_even() {
            return Err(Error::SerializationError);
        }
        if y >= n {
            return Err(Error::SerializationError);
        }
        Ok(Self::new(n, y, par))
    }
}

#[cfg(test)]
mod tests {
    use crate::prs::{Plaintext, PrsParameters, PublicKey, SecretKey};
    use crate::{Error, ParametersError};
    use prs_traits::{DeserializeParametrized, HeDecrypter, Serialize};
    use rand::thread_rng;
    use std::error::Error as StdError;

    #[test]
    fn encrypt_decrypt_every_base_size() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let params = PrsParameters::default_arc(16, 512);
        let sk = SecretKey::random(&params, &mut rng)?;
        let pk = sk.public_key();

        for base_size in 1..=16 {
            for _ in 0..3 {
                let pt = Plaintext::random(&params, &mut rng);
                let ct = pk.try_encrypt_with_base_size(&pt, &mut rng, base_size)?;
                assert!(ct.value() < pk.n());
                assert_eq!(sk.try_decrypt(&ct)?, pt);
            }
        }
        Ok(())
    }

    #[test]
    fn encryption_is_probabilistic() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let params = PrsParameters::default_arc(16, 512);
        let sk = SecretKey::random(&params, &mut rng)?;
        let pk = sk.public_key();
        let pt = Plaintext::try_from_u64(777, &params)?;
        let ct1 = pk.try_encrypt_with_base_size(&pt, &mut rng, 16)?;
        let ct2 = pk.try_encrypt_with_base_size(&pt, &mut rng, 16)?;
        let ct3 = pk.try_encrypt_with_base_size(&pt, &mut rng, 16)?;
        assert!(ct1 != ct2 || ct2 != ct3);
        Ok(())
    }

    #[test]
    fn invalid_base_size() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let params = PrsParameters::default_arc(16, 512);
        let sk = SecretKey::random(&params, &mut rng)?;
        let pt = Plaintext::try_from_u64(1, &params)?;
        for base_size in [0, 17, 512] {
            assert_eq!(
                sk.public_key()
                    .try_encrypt_with_base_size(&pt, &mut rng, base_size),
                Err(Error::ParametersError(ParametersError::InvalidBaseSize(
                    base_size, 16
                )))
            );
        }
        Ok(())
    }

    #[test]
    fn incompatible_plaintext() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let params = PrsParameters::default_arc(16, 512);
        let other = PrsParameters::default_arc(8, 512);
        let sk = SecretKey::random(&params, &mut rng)?;
        let pt = Plaintext::try_from_u64(1, &other)?;
        assert_eq!(
            sk.public_key().try_encrypt_with_base_size(&pt, &mut rng, 4),
            Err(Error::IncompatibleParameters)
        );
        Ok(())
    }

    #[test]
    fn serialize() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let params = PrsParameters::default_arc(16, 512);
        let sk = SecretKey::random(&params, &mut rng)?;
        let pk = sk.public_key();
        let bytes = pk.to_bytes();
        assert_eq!(&PublicKey::from_bytes(&bytes, &params)?, pk.as_ref());

        let wrong = PrsParameters::default_arc(16, 1024);
        assert_eq!(
            PublicKey::from_bytes(&bytes, &wrong),
            Err(Error::SerializationError)
        );
        assert_eq!(
            PublicKey::from_bytes(&[0xff, 0xff, 0xff], &params),
            Err(Error::SerializationError)
        );
        Ok(())
    }
}
