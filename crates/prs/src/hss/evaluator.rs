//! Local evaluation of the product by each server.

use crate::hss::direct::product_mod;
use crate::hss::{
    EncryptedShareVector, Fold, HssConfig, PartialResult, ServerView, ShareVector, TermPartition,
};
use crate::prs::{Ciphertext, PublicKey};
use crate::{Error, Result};
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, trace};
use zeroize::Zeroizing;

/// Evaluator of the product of shared inputs.
///
/// Every server holds the same evaluator; the server index passed to
/// [`Evaluator::evaluate`] selects both the view of the inputs and the terms
/// of the [`TermPartition`] the server is responsible for.
#[derive(Debug, Clone)]
pub struct Evaluator {
    pk: Arc<PublicKey>,
    partition: Arc<TermPartition>,
    base_size: usize,
}

impl Evaluator {
    /// Create an evaluator for the configuration, encrypting fresh terms
    /// under `pk` with the default base size of the parameters.
    pub fn new(config: &HssConfig, pk: &Arc<PublicKey>) -> Result<Self> {
        if config.parameters() != &pk.par {
            return Err(Error::IncompatibleParameters);
        }
        let partition = TermPartition::new(config.arity(), config.num_servers())?;
        Ok(Self {
            pk: pk.clone(),
            partition: Arc::new(partition),
            base_size: pk.par.base_size(),
        })
    }

    /// Use a different number of bits for the encryption randomness.
    pub fn with_base_size(mut self, base_size: usize) -> Result<Self> {
        self.pk.par.check_base_size(base_size)?;
        self.base_size = base_size;
        Ok(self)
    }

    /// Returns the partition of the terms among the servers.
    pub fn partition(&self) -> &TermPartition {
        &self.partition
    }

    /// Compute the partial result of server `index`.
    ///
    /// The server only reads its inputs through a [`ServerView`], and folds
    /// the terms assigned to it into a fresh accumulator starting at the
    /// identity ciphertext.
    pub fn evaluate<R: RngCore + CryptoRng>(
        &self,
        index: usize,
        shares: &[ShareVector],
        encrypted: &[EncryptedShareVector],
        rng: &mut R,
    ) -> Result<PartialResult> {
        let view = ServerView::new(index, self.partition.num_servers(), shares, encrypted)?;
        if view.arity() < self.partition.arity() {
            return Err(Error::TooFewValues(view.arity(), self.partition.arity()));
        }
        if view.arity() > self.partition.arity() {
            return Err(Error::TooManyValues(view.arity(), self.partition.arity()));
        }
        if shares.iter().any(|s| s.par != self.pk.par) {
            return Err(Error::IncompatibleParameters);
        }
        if view
            .own_ciphertexts()
            .any(|ct| !self.pk.is_compatible_with(&ct.n) || ct.par != self.pk.par)
        {
            return Err(Error::IncompatibleKeys);
        }

        let terms = self.partition.terms_for(index)?;
        debug!(server = index, terms = terms.len(), "evaluating terms");

        let par = &self.pk.par;
        let mut acc = Ciphertext::identity(&self.pk);
        for term in terms {
            let indices = term.indices();
            let folded = match term.fold() {
                Fold::Direct => {
                    let factors = indices
                        .iter()
                        .enumerate()
                        .map(|(input, &i)| view.plaintext_share(input, i).map(|s| &s.value))
                        .collect::<Result<Vec<_>>>()?;
                    let t = Zeroizing::new(product_mod(factors, par));
                    self.pk.encrypt_value(&t, self.base_size, &mut *rng)
                }
                Fold::Homomorphic { position } => {
                    let factors = indices
                        .iter()
                        .enumerate()
                        .filter(|&(input, _)| input != position)
                        .map(|(input, &i)| view.plaintext_share(input, i).map(|s| &s.value))
                        .collect::<Result<Vec<_>>>()?;
                    let scalar = Zeroizing::new(product_mod(factors, par));
                    view.own_ciphertext(position)?.scalar_mul(&scalar)
                }
            };
            trace!(server = index, ?indices, fold = ?term.fold(), "folded term");
            acc = acc.try_add(&folded)?;
        }

        Ok(PartialResult {
            server: index,
            ciphertext: acc,
        })
    }

    /// Compute the partial results of all servers in parallel.
    ///
    /// Each server gets its own [`ChaCha20Rng`], seeded from `rng` before the
    /// parallel section.
    pub fn evaluate_all<R: RngCore + CryptoRng>(
        &self,
        shares: &[ShareVector],
        encrypted: &[EncryptedShareVector],
        rng: &mut R,
    ) -> Result<Vec<PartialResult>> {
        let num_servers = self.partition.num_servers();
        info!("Evaluating {} servers in parallel", num_servers);

        let seeds: Vec<<ChaCha20Rng as SeedableRng>::Seed> =
            (0..num_servers).map(|_| rng.gen()).collect();

        seeds
            .into_par_iter()
            .enumerate()
            .map(|(index, seed)| {
                let mut rng = ChaCha20Rng::from_seed(seed);
                self.evaluate(index, shares, encrypted, &mut rng)
            })
            .collect()
    }
}
