#![crate_name = "prs_util"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Number-theoretic utilities for the prs-hss library.

#[cfg(test)]
#[macro_use]
extern crate proptest;

use num_bigint_dig::{prime::probably_prime, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::{CryptoRng, RngCore};

/// Returns whether `p` is probably prime, using `rounds` Miller-Rabin rounds
/// with pseudorandom bases followed by a Baillie-PSW test.
pub fn is_probable_prime(p: &BigUint, rounds: usize) -> bool {
    probably_prime(p, rounds)
}

/// Compute the Jacobi symbol `(a / n)` for an odd modulus `n`.
///
/// Returns `None` when `n` is even or zero, where the symbol is undefined.
pub fn jacobi(a: &BigUint, n: &BigUint) -> Option<i8> {
    if n.is_zero() || n.is_even() {
        return None;
    }

    let mut a = a % n;
    let mut n = n.clone();
    let mut t = 1i8;

    while !a.is_zero() {
        while a.is_even() {
            a = a >> 1usize;
            let r = low_bits(&n, 3);
            if r == 3 || r == 5 {
                t = -t;
            }
        }
        std::mem::swap(&mut a, &mut n);
        if low_bits(&a, 2) == 3 && low_bits(&n, 2) == 3 {
            t = -t;
        }
        a = &a % &n;
    }

    if n.is_one() {
        Some(t)
    } else {
        Some(0)
    }
}

/// Returns `x mod 2^nbits` for `nbits <= 8`.
fn low_bits(x: &BigUint, nbits: usize) -> u8 {
    debug_assert!(nbits <= 8);
    let mask = BigUint::from((1u16 << nbits) - 1);
    (x & &mask).to_u8().unwrap_or(0)
}

/// Sample a uniform `num_bits`-bit candidate (top bit set) whose `shift` low
/// bits equal `residue`, i.e. a candidate congruent to `residue` modulo
/// `2^shift`.
///
/// Returns `None` when `shift >= num_bits` or `residue >= 2^shift`.
pub fn sample_with_residue<R: RngCore + CryptoRng>(
    num_bits: usize,
    shift: usize,
    residue: &BigUint,
    rng: &mut R,
) -> Option<BigUint> {
    if shift >= num_bits || residue.bits() > shift {
        return None;
    }
    let high_bits = num_bits - shift;
    let mut r = rng.gen_biguint(high_bits);
    r |= BigUint::one() << (high_bits - 1);
    Some((r << shift) | residue)
}

/// Generate a `num_bits`-bit probable prime congruent to `residue` modulo
/// `2^shift`, rejecting candidates for which `accept` returns false.
///
/// At most `max_attempts` candidates are drawn. On success, the prime and
/// the number of candidates drawn are returned.
pub fn generate_prime_with_residue<R, F>(
    num_bits: usize,
    shift: usize,
    residue: &BigUint,
    rounds: usize,
    max_attempts: usize,
    rng: &mut R,
    accept: F,
) -> Option<(BigUint, usize)>
where
    R: RngCore + CryptoRng,
    F: Fn(&BigUint) -> bool,
{
    retry(max_attempts, || {
        sample_with_residue(num_bits, shift, residue, &mut *rng)
            .filter(|candidate| is_probable_prime(candidate, rounds) && accept(candidate))
    })
}

/// Run `f` until it returns `Some`, at most `max_attempts` times.
///
/// Returns the value along with the number of attempts it took.
pub fn retry<T, F>(max_attempts: usize, mut f: F) -> Option<(T, usize)>
where
    F: FnMut() -> Option<T>,
{
    (1..=max_attempts).find_map(|attempt| f().map(|value| (value, attempt)))
}

#[cfg(test)]
mod tests {
    use super::{
        generate_prime_with_residue, is_probable_prime, jacobi, retry, sample_with_residue,
    };
    use num_bigint_dig::BigUint;
    use num_traits::{One, ToPrimitive};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SMALL_PRIMES: [u64; 8] = [3, 5, 7, 11, 13, 65537, 1_000_003, 4_294_967_291];

    fn euler_criterion(a: u64, p: u64) -> i8 {
        let a = BigUint::from(a % p);
        let p_big = BigUint::from(p);
        if a == BigUint::from(0u64) {
            return 0;
        }
        let e = (&p_big - BigUint::one()) >> 1usize;
        let r = a.modpow(&e, &p_big);
        if r.is_one() {
            1
        } else {
            -1
        }
    }

    #[test]
    fn jacobi_known_values() {
        let j = |a: u64, n: u64| jacobi(&BigUint::from(a), &BigUint::from(n));
        assert_eq!(j(1001, 9907), Some(-1));
        assert_eq!(j(19, 45), Some(1));
        assert_eq!(j(8, 21), Some(-1));
        assert_eq!(j(5, 21), Some(1));
        assert_eq!(j(30, 7), Some(1));
        assert_eq!(j(21, 7), Some(0));
        assert_eq!(j(0, 1), Some(1));
        assert_eq!(j(3, 8), None);
        assert_eq!(j(3, 0), None);
    }

    #[test]
    fn jacobi_is_multiplicative_in_modulus() {
        // (a / pq) = (a / p)(a / q)
        for a in 1u64..200 {
            let p = 11u64;
            let q = 19u64;
            let ja = jacobi(&BigUint::from(a), &BigUint::from(p * q)).unwrap();
            let jp = jacobi(&BigUint::from(a), &BigUint::from(p)).unwrap();
            let jq = jacobi(&BigUint::from(a), &BigUint::from(q)).unwrap();
            assert_eq!(ja, jp * jq);
        }
    }

    proptest! {
        #[test]
        fn jacobi_matches_euler_criterion(a: u64, idx in 0usize..SMALL_PRIMES.len()) {
            let p = SMALL_PRIMES[idx];
            prop_assert_eq!(
                jacobi(&BigUint::from(a), &BigUint::from(p)),
                Some(euler_criterion(a, p))
            );
        }
    }

    #[test]
    fn primality() {
        for p in SMALL_PRIMES {
            assert!(is_probable_prime(&BigUint::from(p), 20));
        }
        for c in [1u64, 4, 9, 561, 1105, 4_294_967_297] {
            assert!(!is_probable_prime(&BigUint::from(c), 20));
        }
    }

    #[test]
    fn sample_respects_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let residue = BigUint::one();
        for _ in 0..50 {
            let c = sample_with_residue(64, 16, &residue, &mut rng).unwrap();
            assert_eq!(c.bits(), 64);
            assert_eq!((&c % BigUint::from(1u64 << 16)).to_u64(), Some(1));
        }
        assert!(sample_with_residue(16, 16, &residue, &mut rng).is_none());
        assert!(sample_with_residue(64, 2, &BigUint::from(4u8), &mut rng).is_none());
    }

    #[test]
    fn generate_prime_congruent_to_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let (p, attempts) =
            generate_prime_with_residue(128, 20, &BigUint::one(), 20, 100_000, &mut rng, |_| true)
                .unwrap();
        assert!(attempts >= 1);
        assert_eq!(p.bits(), 128);
        assert!(is_probable_prime(&p, 20));
        assert_eq!((&p % BigUint::from(1u64 << 20)).to_u64(), Some(1));
    }

    #[test]
    fn generate_prime_gives_up() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let res = generate_prime_with_residue(
            128,
            2,
            &BigUint::from(3u8),
            20,
            1_000,
            &mut rng,
            |_| false,
        );
        assert!(res.is_none());
    }

    #[test]
    fn retry_counts_attempts() {
        let mut calls = 0;
        let res = retry(10, || {
            calls += 1;
            (calls == 4).then_some(calls)
        });
        assert_eq!(res, Some((4, 4)));
        assert_eq!(retry(3, || None::<()>), None);
    }
}
