//! Assignment of the cross terms of a product of shared inputs to servers.
//!
//! With inputs `m_t = sum_i s_t[i]`, the product of `r` inputs expands into
//! the `N^r` cross terms `s_0[i_0] * ... * s_{r-1}[i_{r-1}]`. Server `s` sees
//! every plaintext share except those at index `s`, for which it only holds a
//! ciphertext. It can therefore evaluate a term in which `s` does not occur
//! (all factors are plaintexts), or occurs exactly once (one ciphertext
//! factor raised to the product of the others). Every term is given to the
//! lowest-indexed server able to evaluate it.

use crate::hss::config::{validate_all_params, validate_server_index};
use crate::{Error, Result};
use itertools::Itertools;
use tracing::debug;

/// How a server folds a term into its partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fold {
    /// All factors are visible plaintexts: multiply them, then encrypt.
    Direct,
    /// The factor at `position` is the server's own ciphertext share, raised
    /// to the product of the other factors.
    Homomorphic {
        /// The input whose ciphertext share is used.
        position: usize,
    },
}

/// One cross term: the share index used for each input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    indices: Box<[usize]>,
    fold: Fold,
}

impl Term {
    /// The share index of every input.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// How the term is folded.
    pub fn fold(&self) -> Fold {
        self.fold
    }
}

/// The table of terms assigned to each server, for a given number of inputs
/// and servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermPartition {
    arity: usize,
    num_servers: usize,
    terms: Vec<Vec<Term>>,
}

impl TermPartition {
    /// Build the partition of the `num_servers^arity` terms.
    ///
    /// Fails with [`Error::UncoverableTerm`] when some term contains every
    /// server index at least twice, which requires `arity >= 2 * num_servers`.
    pub fn new(arity: usize, num_servers: usize) -> Result<Self> {
        validate_all_params(num_servers, arity)?;

        let mut terms = vec![Vec::new(); num_servers];
        for indices in (0..arity).map(|_| 0..num_servers).multi_cartesian_product() {
            let (server, fold) = Self::assign(&indices, num_servers)
                .ok_or_else(|| Error::UncoverableTerm(indices.clone()))?;
            terms[server].push(Term {
                indices: indices.into_boxed_slice(),
                fold,
            });
        }

        debug!(
            arity,
            num_servers,
            busy_servers = terms.iter().filter(|t| !t.is_empty()).count(),
            "built term partition"
        );
        Ok(Self {
            arity,
            num_servers,
            terms,
        })
    }

    /// The partition of the product of three inputs.
    pub fn trilinear(num_servers: usize) -> Result<Self> {
        Self::new(3, num_servers)
    }

    fn assign(indices: &[usize], num_servers: usize) -> Option<(usize, Fold)> {
        (0..num_servers).find_map(|server| {
            let mut positions = indices.iter().positions(|&i| i == server);
            match (positions.next(), positions.next()) {
                (None, _) => Some((server, Fold::Direct)),
                (Some(position), None) => Some((server, Fold::Homomorphic { position })),
                _ => None,
            }
        })
    }

    /// The number of inputs.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The number of servers.
    pub fn num_servers(&self) -> usize {
        self.num_servers
    }

    /// The terms assigned to `server`.
    pub fn terms_for(&self, server: usize) -> Result<&[Term]> {
        validate_server_index(server, self.num_servers)?;
        Ok(&self.terms[server])
    }

    /// The total number of terms, `num_servers^arity`.
    pub fn len(&self) -> usize {
        self.terms.iter().map(Vec::len).sum()
    }

    /// Whether the partition holds no terms.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Fold, TermPartition};
    use crate::{Error, Result};
    use std::collections::HashSet;

    fn counts(partition: &TermPartition, server: usize) -> Result<(usize, usize)> {
        let terms = partition.terms_for(server)?;
        let direct = terms.iter().filter(|t| t.fold() == Fold::Direct).count();
        Ok((direct, terms.len() - direct))
    }

    #[test]
    fn trilinear_counts() -> Result<()> {
        for n in 2..=10 {
            let partition = TermPartition::trilinear(n)?;
            assert_eq!(partition.len(), n * n * n);
            assert_eq!(counts(&partition, 0)?, ((n - 1).pow(3), 3 * (n - 1).pow(2)));
            assert_eq!(counts(&partition, 1)?, (1 + 3 * (n - 2), 3));
            for server in 2..n {
                assert!(partition.terms_for(server)?.is_empty());
            }
            assert_eq!(
                (n - 1).pow(3) + 3 * (n - 1).pow(2) + 1 + 3 + 3 * (n - 2),
                n * n * n
            );
        }
        Ok(())
    }

    #[test]
    fn every_term_exactly_once() -> Result<()> {
        let n = 5;
        let partition = TermPartition::trilinear(n)?;
        let mut seen = HashSet::new();
        for server in 0..n {
            for term in partition.terms_for(server)? {
                assert!(seen.insert(term.indices().to_vec()));
            }
        }
        assert_eq!(seen.len(), n * n * n);
        Ok(())
    }

    #[test]
    fn folds_respect_visibility() -> Result<()> {
        for (arity, n) in [(1, 2), (2, 3), (3, 4), (4, 3), (5, 3)] {
            let partition = TermPartition::new(arity, n)?;
            assert_eq!(partition.len(), n.pow(arity as u32));
            for server in 0..n {
                for term in partition.terms_for(server)? {
                    let own = term.indices().iter().filter(|&&i| i == server).count();
                    match term.fold() {
                        Fold::Direct => assert_eq!(own, 0),
                        Fold::Homomorphic { position } => {
                            assert_eq!(own, 1);
                            assert_eq!(term.indices()[position], server);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    #[test]
    fn server_one_terms() -> Result<()> {
        let partition = TermPartition::trilinear(3)?;
        let terms = partition.terms_for(1)?;
        assert!(terms
            .iter()
            .any(|t| t.indices() == [0, 0, 0] && t.fold() == Fold::Direct));
        assert!(terms
            .iter()
            .any(|t| t.indices() == [0, 1, 0] && t.fold() == Fold::Homomorphic { position: 1 }));
        assert!(terms
            .iter()
            .any(|t| t.indices() == [2, 0, 0] && t.fold() == Fold::Direct));
        Ok(())
    }

    #[test]
    fn errors() {
        assert_eq!(
            TermPartition::new(4, 2),
            Err(Error::UncoverableTerm(vec![0, 0, 1, 1]))
        );
        assert!(TermPartition::new(3, 1).is_err());
        assert!(TermPartition::new(0, 3).is_err());
        assert_eq!(
            TermPartition::trilinear(3).and_then(|p| p.terms_for(3).map(<[_]>::len)),
            Err(Error::InvalidServerIndex(3, 3))
        );
    }
}
