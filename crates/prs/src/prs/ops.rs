//! Operations over ciphertexts

use super::Ciphertext;
use num_bigint_dig::BigUint;
use std::ops::{Add, AddAssign, Mul, MulAssign};

impl Add<&Ciphertext> for &Ciphertext {
    type Output = Ciphertext;

    fn add(self, rhs: &Ciphertext) -> Ciphertext {
        assert!(self.is_compatible(rhs));
        Ciphertext {
            par: self.par.clone(),
            n: self.n.clone(),
            c: (&self.c * &rhs.c) % self.n.as_ref(),
        }
    }
}

impl Add<&Ciphertext> for Ciphertext {
    type Output = Ciphertext;

    fn add(mut self, rhs: &Ciphertext) -> Ciphertext {
        self += rhs;
        self
    }
}

impl AddAssign<&Ciphertext> for Ciphertext {
    fn add_assign(&mut self, rhs: &Ciphertext) {
        assert!(self.is_compatible(rhs));
        self.c = (&self.c * &rhs.c) % self.n.as_ref();
    }
}

impl Mul<&BigUint> for &Ciphertext {
    type Output = Ciphertext;

    fn mul(self, rhs: &BigUint) -> Ciphertext {
        self.scalar_mul(rhs)
    }
}

impl MulAssign<&BigUint> for Ciphertext {
    fn mul_assign(&mut self, rhs: &BigUint) {
        self.c = self.c.modpow(rhs, &self.n);
    }
}
