//! The detection engine: scan every chain for occurrences of one address.

use crate::chain::Chain;
use crate::contracts::flatten;
use crate::error::{DetectError, FetchError};
use crate::matching::addresses_match;
use crate::source::ChainSource;
use crate::types::{AddressMatch, DetectionResult, MatchKind};
use crate::validator::validate_input;

/// Runs detections against a [`ChainSource`].
///
/// Each call fetches the chain list afresh. Nothing is cached between calls,
/// and fetch failures are returned as-is without retrying.
pub struct Detector<S> {
    source: S,
}

impl<S: ChainSource> Detector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Find every occurrence of `address` across all chains.
    ///
    /// `address` is used as given; see [`check`](Self::check) for the
    /// validating entry point.
    pub async fn detect(&self, address: &str) -> Result<DetectionResult, FetchError> {
        let chains = self.source.fetch_chains().await?;
        tracing::debug!(source = self.source.url(), chains = chains.len(), "scanning chains");

        let matches = match_chains(&chains, address);
        tracing::info!(
            address,
            matches = matches.len(),
            is_relay = !matches.is_empty(),
            "detection complete"
        );
        Ok(DetectionResult::new(address, matches))
    }

    /// Validate raw user input, then [`detect`](Self::detect) the trimmed address.
    ///
    /// Invalid input is rejected before any fetch happens.
    pub async fn check(&self, raw: &str) -> Result<DetectionResult, DetectError> {
        let address = validate_input(raw)?;
        Ok(self.detect(address).await?)
    }
}

/// Match `address` against every chain, in list order.
pub fn match_chains(chains: &[Chain], address: &str) -> Vec<AddressMatch> {
    chains
        .iter()
        .flat_map(|chain| match_chain(chain, address))
        .collect()
}

/// Match `address` against one chain.
///
/// Solver matches come first in list order, then the depository, then
/// contract matches ordered by path. Every occurrence is reported, even when
/// the same address appears in several fields.
pub fn match_chain(chain: &Chain, address: &str) -> Vec<AddressMatch> {
    let vm_type = &chain.vm_type;
    let mut matches = Vec::new();

    for solver in &chain.solver_addresses {
        if addresses_match(solver, address, vm_type) {
            tracing::debug!(chain = %chain.name, solver = %solver, "solver match");
            matches.push(AddressMatch::new(chain, MatchKind::Solver, solver.as_str()));
        }
    }

    if let Some(depository) = chain.depository() {
        if addresses_match(depository, address, vm_type) {
            tracing::debug!(chain = %chain.name, depository, "depository match");
            matches.push(AddressMatch::new(chain, MatchKind::Depository, depository));
        }
    }

    if let Some(tree) = &chain.contracts {
        let mut entries = flatten(tree);
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        for entry in entries {
            if addresses_match(&entry.address, address, vm_type) {
                tracing::debug!(chain = %chain.name, path = %entry.path, "contract match");
                matches.push(AddressMatch::new(
                    chain,
                    MatchKind::Contract {
                        contract_type: entry.path,
                    },
                    entry.address,
                ));
            }
        }
    }

    matches
}
