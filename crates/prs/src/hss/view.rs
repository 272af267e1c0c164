//! What a single server is allowed to see of the shared inputs.

use crate::hss::config::validate_server_index;
use crate::hss::{EncryptedShareVector, ShareVector};
use crate::prs::{Ciphertext, Plaintext};
use crate::{Error, Result};

/// The inputs of server `index`: for every input, the plaintext shares held
/// at every other index, and the ciphertext of the share held at `index`.
#[derive(Debug, Clone, Copy)]
pub struct ServerView<'a> {
    index: usize,
    num_servers: usize,
    shares: &'a [ShareVector],
    encrypted: &'a [EncryptedShareVector],
}

impl<'a> ServerView<'a> {
    /// Build the view of server `index`, checking that there is one share
    /// vector and one encrypted share vector per input, each with one entry
    /// per server.
    pub fn new(
        index: usize,
        num_servers: usize,
        shares: &'a [ShareVector],
        encrypted: &'a [EncryptedShareVector],
    ) -> Result<Self> {
        validate_server_index(index, num_servers)?;
        if shares.len() < encrypted.len() {
            return Err(Error::TooFewValues(shares.len(), encrypted.len()));
        }
        if shares.len() > encrypted.len() {
            return Err(Error::TooManyValues(shares.len(), encrypted.len()));
        }
        for len in shares
            .iter()
            .map(ShareVector::len)
            .chain(encrypted.iter().map(EncryptedShareVector::len))
        {
            if len < num_servers {
                return Err(Error::TooFewValues(len, num_servers));
            }
            if len > num_servers {
                return Err(Error::TooManyValues(len, num_servers));
            }
        }
        Ok(Self {
            index,
            num_servers,
            shares,
            encrypted,
        })
    }

    /// The index of the server owning the view.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The number of servers.
    pub fn num_servers(&self) -> usize {
        self.num_servers
    }

    /// The number of inputs.
    pub fn arity(&self) -> usize {
        self.shares.len()
    }

    /// The plaintext share of input `input` held at index `position`, which
    /// must differ from the index of the server.
    pub fn plaintext_share(&self, input: usize, position: usize) -> Result<&'a Plaintext> {
        let shares = self
            .shares
            .get(input)
            .ok_or(Error::TooFewValues(self.arity(), input + 1))?;
        validate_server_index(position, self.num_servers)?;
        if position == self.index {
            return Err(Error::UnspecifiedInput(format!(
                "Server {} cannot see its own plaintext share of input {}",
                self.index, input
            )));
        }
        // Lengths were checked against num_servers in `new`.
        shares
            .get(position)
            .ok_or(Error::InvalidServerIndex(position, self.num_servers))
    }

    /// The ciphertext of the share of input `input` held by the server.
    pub fn own_ciphertext(&self, input: usize) -> Result<&'a Ciphertext> {
        let encrypted = self
            .encrypted
            .get(input)
            .ok_or(Error::TooFewValues(self.arity(), input + 1))?;
        encrypted
            .get(self.index)
            .ok_or(Error::InvalidServerIndex(self.index, self.num_servers))
    }

    /// Iterate over the ciphertexts the server can see.
    pub fn own_ciphertexts(&self) -> impl Iterator<Item = &'a Ciphertext> + '_ {
        self.encrypted.iter().filter_map(|e| e.get(self.index))
    }
}

#[cfg(test)]
mod tests {
    use super::ServerView;
    use crate::hss::{AdditiveSharing, HssConfig};
    use crate::prs::{Plaintext, PrsParameters, SecretKey};
    use crate::Error;
    use prs_traits::HeDecrypter;
    use rand::thread_rng;
    use std::error::Error as StdError;

    #[test]
    fn visibility() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let params = PrsParameters::default_arc(16, 256);
        let sk = SecretKey::random(&params, &mut rng)?;
        let config = HssConfig::trilinear(4, &params)?;
        let sharing = AdditiveSharing::new(&config, sk.public_key())?;
        let inputs = [5u64, 6, 7]
            .iter()
            .map(|v| Plaintext::try_from_u64(*v, &params))
            .collect::<crate::Result<Vec<_>>>()?;
        let (shares, encrypted) = sharing.share_all(&inputs, &mut rng)?;

        for index in 0..4 {
            let view = ServerView::new(index, 4, &shares, &encrypted)?;
            assert_eq!(view.arity(), 3);
            for input in 0..3 {
                for position in 0..4 {
                    let share = view.plaintext_share(input, position);
                    if position == index {
                        assert!(share.is_err());
                    } else {
                        assert_eq!(share?, shares[input].get(position).unwrap());
                    }
                }
                assert_eq!(
                    sk.try_decrypt(view.own_ciphertext(input)?)?,
                    *shares[input].get(index).unwrap()
                );
            }
            assert_eq!(view.own_ciphertexts().count(), 3);
        }
        Ok(())
    }

    #[test]
    fn shapes() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let params = PrsParameters::default_arc(16, 256);
        let sk = SecretKey::random(&params, &mut rng)?;
        let config = HssConfig::trilinear(3, &params)?;
        let sharing = AdditiveSharing::new(&config, sk.public_key())?;
        let inputs = vec![Plaintext::try_from_u64(9, &params)?; 2];
        let (shares, encrypted) = sharing.share_all(&inputs, &mut rng)?;

        assert_eq!(
            ServerView::new(3, 3, &shares, &encrypted).err(),
            Some(Error::InvalidServerIndex(3, 3))
        );
        assert_eq!(
            ServerView::new(0, 3, &shares[..1], &encrypted).err(),
            Some(Error::TooFewValues(1, 2))
        );
        assert_eq!(
            ServerView::new(0, 3, &shares, &encrypted[..1]).err(),
            Some(Error::TooManyValues(2, 1))
        );
        assert_eq!(
            ServerView::new(0, 4, &shares, &encrypted).err(),
            Some(Error::TooFewValues(3, 4))
        );
        assert_eq!(
            ServerView::new(0, 2, &shares, &encrypted).err(),
            Some(Error::TooManyValues(3, 2))
        );
        Ok(())
    }

    #[test]
    fn out_of_range_lookups() -> Result<(), Box<dyn StdError>> {
        let mut rng = thread_rng();
        let params = PrsParameters::default_arc(16, 256);
        let sk = SecretKey::random(&params, &mut rng)?;
        let config = HssConfig::trilinear(3, &params)?;
        let sharing = AdditiveSharing::new(&config, sk.public_key())?;
        let inputs = vec![Plaintext::try_from_u64(11, &params)?; 3];
        let (shares, encrypted) = sharing.share_all(&inputs, &mut rng)?;
        let view = ServerView::new(0, 3, &shares, &encrypted)?;

        // Input past the arity.
        assert_eq!(
            view.plaintext_share(5, 1).err(),
            Some(Error::TooFewValues(3, 6))
        );
        assert_eq!(view.own_ciphertext(3).err(), Some(Error::TooFewValues(3, 4)));

        // Position past the number of servers.
        assert_eq!(
            view.plaintext_share(0, 7).err(),
            Some(Error::InvalidServerIndex(7, 3))
        );
        assert_eq!(
            view.plaintext_share(2, 3).err(),
            Some(Error::InvalidServerIndex(3, 3))
        );
        Ok(())
    }
}
