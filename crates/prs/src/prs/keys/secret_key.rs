//! Secret keys for the PRS encryption scheme

use crate::prs::{Ciphertext, Plaintext, PrsParameters, PublicKey};
use crate::{Error, Result};
use num_bigint_dig::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use prs_traits::{HeDecrypter, HeParametrized};
use prs_util::{generate_prime_with_residue, jacobi, retry};
use rand::{CryptoRng, RngCore};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Secret key for the PRS encryption scheme.
///
/// The secret key owns the matching [`PublicKey`], so it plays the role of the
/// key pair produced by key generation.
#[derive(Clone)]
pub struct SecretKey {
    /// The public part of the key pair
    pub(crate) pk: Arc<PublicKey>,
    /// The prime p, congruent to 1 modulo 2^k
    p: BigUint,
    /// The prime q, congruent to 3 modulo 4
    q: BigUint,
    /// (p - 1) / 2^k
    exponent: BigUint,
    /// ladder[i] = y^(-2^i * (p - 1) / 2^k) mod p, for i in 0..k-1
    ladder: Box<[BigUint]>,
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.p.zeroize();
        self.q.zeroize();
        self.exponent.zeroize();
        self.ladder.iter_mut().for_each(|d| d.zeroize());
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("pk", &self.pk)
            .finish_non_exhaustive()
    }
}

impl SecretKey {
    /// Generate a random [`SecretKey`], together with its [`PublicKey`].
    ///
    /// 1. Draw a prime `p = 1 mod 2^k` of `n_bits / 2` bits;
    /// 2. Draw a prime `q = 3 mod 4` of the same size;
    /// 3. Draw `y`, a unit modulo `n = p * q` which is a quadratic non-residue
    ///    modulo both `p` and `q`;
    /// 4. Precompute the decryption ladder from `p` and `y`.
    ///
    /// Each sampling loop draws at most `par.max_attempts()` candidates and
    /// fails with [`Error::GenerationExhausted`] otherwise.
    pub fn random<R: RngCore + CryptoRng>(par: &Arc<PrsParameters>, rng: &mut R) -> Result<Self> {
        let k = par.message_bits();
        let p_bits = par.modulus_bits() / 2;
        let rounds = par.primality_rounds();
        let max_attempts = par.max_attempts();

        let (p, attempts) = generate_prime_with_residue(
            p_bits,
            k,
            &BigUint::one(),
            rounds,
            max_attempts,
            rng,
            |_| true,
        )
        .ok_or_else(|| Error::GenerationExhausted("prime p".to_string(), max_attempts))?;
        debug!(attempts, bits = p.bits(), "generated p");

        let q_bits = p.bits();
        let (q, attempts) = generate_prime_with_residue(
            q_bits,
            2,
            &BigUint::from(3u8),
            rounds,
            max_attempts,
            rng,
            |candidate| candidate != &p,
        )
        .ok_or_else(|| Error::GenerationExhausted("prime q".to_string(), max_attempts))?;
        debug!(attempts, bits = q.bits(), "generated q");

        let n = &p * &q;

        // J(y/n) = J(y/p) * J(y/q) = 1, but y is not a square modulo n.
        let (y, attempts) = retry(max_attempts, || {
            let y = rng.gen_biguint(par.modulus_bits());
            if y.gcd(&n).is_one()
                && jacobi(&y, &p) == Some(-1)
                && jacobi(&y, &q) == Some(-1)
            {
                Some(y % &n)
            } else {
                None
            }
        })
        .ok_or_else(|| Error::GenerationExhausted("base y".to_string(), max_attempts))?;
        debug!(attempts, "generated y");

        let exponent = (&p - BigUint::one()) >> k;
        let ladder = Self::ladder(&p, &y, &exponent, k);

        let pk = Arc::new(PublicKey::new(n, y, par));
        Ok(Self {
            pk,
            p,
            q,
            exponent,
            ladder,
        })
    }

    /// Compute d[0] = (y^((p-1)/2^k))^(-1) mod p, then d[i] = d[i-1]^2 mod p.
    fn ladder(p: &BigUint, y: &BigUint, exponent: &BigUint, k: usize) -> Box<[BigUint]> {
        let g = Zeroizing::new(y.modpow(exponent, p));
        // p is prime, so g^(-1) = g^(p-2) mod p.
        let d0 = g.modpow(&(p - BigUint::from(2u8)), p);
        std::iter::successors(Some(d0), |d| Some((d * d) % p))
            .take(k.saturating_sub(1))
            .collect()
    }

    /// Returns the public key associated with this secret key.
    pub fn public_key(&self) -> &Arc<PublicKey> {
        &self.pk
    }

    /// Returns the parameters of the secret key.
    pub fn parameters(&self) -> &Arc<PrsParameters> {
        &self.pk.par
    }

    #[cfg(test)]
    pub(crate) fn primes(&self) -> (&BigUint, &BigUint) {
        (&self.p, &self.q)
    }

    #[cfg(test)]
    pub(crate) fn ladder_len(&self) -> usize {
        self.ladder.len()
    }
}

impl HeParametrized for SecretKey {
    type Parameters = PrsParameters;
}

impl HeDecrypter<Plaintext, Ciphertext> for SecretKey {
    type Error = Error;

    /// Recover the bits of the message from the least significant one, using
    /// that c^((p-1)/2^k) = g^m mod p for g = y^((p-1)/2^k) of order 2^k.
    fn try_decrypt(&self, ct: &Ciphertext) -> Result<Plaintext> {
        if !self.pk.is_compatible_with(&ct.n) {
            return Err(Error::IncompatibleKeys);
        }

        let k = self.pk.par.message_bits();
        let mut c = Zeroizing::new(ct.c.modpow(&self.exponent, &self.p));
        let mut m = Zeroizing::new(BigUint::zero());

        for j in 1..k {
            let z = Zeroizing::new(c.modpow(&(BigUint::one() << (k - j)), &self.p));
            if !z.is_one() {
                *m += BigUint::one() << (j - 1);
                *c = (&*c * &self.ladder[j - 1]) % &self.p;
            }
        }
        if !c.is_one() {
            *m += BigUint::one() << (k - 1);
        }

        Ok(Plaintext {
            par: self.pk.par.clone(),
            value: std::mem::take(&mut *m),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SecretKey;
    use crate::prs::{Plaintext, PrsParameters, PrsParametersBuilder};
    use crate::Error;
    use num_bigint_dig::BigUint;
    use num_traits::{One, ToPrimitive};
    use prs_traits::{HeDecrypter, HeEncrypter};
    use prs_util::{is_probable_prime, jacobi};
    use rand::{thread_rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::error::Error as StdError;

    #[test]
    fn keygen() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        for (k, n_bits) in [(1, 64), (2, 64), (16, 64), (16, 512), (32, 256)] {
            let params = PrsParameters::default_arc(k, n_bits);
            let sk = SecretKey::random(&params, &mut rng)?;
            let (p, q) = sk.primes();
            let pk = sk.public_key();

            assert!(is_probable_prime(p, 20));
            assert!(is_probable_prime(q, 20));
            assert_eq!(p.bits(), n_bits / 2);
            assert_eq!(q.bits(), n_bits / 2);
            assert_eq!((p % params.plaintext_modulus()), BigUint::one());
            assert_eq!((q % BigUint::from(4u8)).to_u8(), Some(3));
            assert_eq!(pk.n(), &(p * q));
            assert_eq!(jacobi(pk.y(), p), Some(-1));
            assert_eq!(jacobi(pk.y(), q), Some(-1));
            assert_eq!(jacobi(pk.y(), pk.n()), Some(1));
            assert_eq!(sk.ladder_len(), k - 1);
        }
        Ok(())
    }

    #[test]
    fn keygen_gives_up() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let params = PrsParametersBuilder::new()
            .set_message_bits(16)
            .set_modulus_bits(512)
            .set_max_attempts(1)
            .build_arc()
            .unwrap();
        // A single candidate is overwhelmingly unlikely to be a 256-bit prime.
        let mut failures = 0;
        for _ in 0..5 {
            if let Err(e) = SecretKey::random(&params, &mut rng) {
                assert!(matches!(e, Error::GenerationExhausted(_, 1)));
                failures += 1;
            }
        }
        assert!(failures > 0);
    }

    #[test]
    fn encrypt_decrypt() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let params = PrsParameters::default_arc(16, 512);
        let sk = SecretKey::random(&params, &mut rng)?;
        let pk = sk.public_key();

        for value in [0u64, 1, 2, 255, 12345, 32768, 65535] {
            let pt = Plaintext::try_from_u64(value, &params)?;
            for _ in 0..5 {
                let ct = pk.try_encrypt(&pt, &mut rng)?;
                assert_eq!(sk.try_decrypt(&ct)?, pt);
            }
        }
        Ok(())
    }

    #[test]
    fn encrypt_decrypt_single_bit_messages() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let params = PrsParameters::default_arc(1, 64);
        let sk = SecretKey::random(&params, &mut rng)?;
        for value in [0u64, 1] {
            let pt = Plaintext::try_from_u64(value, &params)?;
            let ct = sk.public_key().try_encrypt(&pt, &mut rng)?;
            assert_eq!(sk.try_decrypt(&ct)?.to_u64(), Some(value));
        }
        Ok(())
    }

    #[test]
    fn decrypt_rejects_foreign_ciphertext() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let params = PrsParameters::default_arc(8, 128);
        let sk1 = SecretKey::random(&params, &mut rng)?;
        let sk2 = SecretKey::random(&params, &mut rng)?;
        let pt = Plaintext::try_from_u64(42, &params)?;
        let ct = sk1.public_key().try_encrypt(&pt, &mut rng)?;
        assert_eq!(sk2.try_decrypt(&ct), Err(Error::IncompatibleKeys));
        Ok(())
    }

    #[test]
    fn debug_hides_secrets() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let params = PrsParameters::default_arc(8, 128);
        let sk = SecretKey::random(&params, &mut rng)?;
        let (p, _) = sk.primes();
        let s = format!("{:?}", sk);
        assert!(!s.contains(&p.to_string()));
        assert!(s.contains("SecretKey"));
        Ok(())
    }
}
