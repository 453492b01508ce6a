//! Content-based hashing for run IDs.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Hash a serializable scenario description together with the solver version.
///
/// Unchanged inputs hash to the same ID, so re-running an unchanged scenario
/// hits the run cache; bumping the solver version invalidates every cached run.
pub fn compute_run_id<S: Serialize>(scenario: &S, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let scenario_json = serde_json::to_string(scenario).unwrap_or_default();
    hasher.update(scenario_json.as_bytes());

    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
