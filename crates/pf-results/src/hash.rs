//! Content-based hashing for run IDs.

use pf_project::CaseDef;
use sha2::{Digest, Sha256};

/// Stable ID for a case solved by a given solver version.
///
/// The case name is left out so renaming a case keeps its cached runs.
pub fn compute_run_id(case: &CaseDef, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let inputs = (case.version, &case.flow, &case.body, &case.grid, &case.control_offset);
    let inputs_json = serde_json::to_string(&inputs).unwrap_or_default();
    hasher.update(inputs_json.as_bytes());

    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_stability() {
        let case = CaseDef::default();
        let hash1 = compute_run_id(&case, "v1");
        let hash2 = compute_run_id(&case, "v1");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let case1 = CaseDef::default();
        let mut case2 = CaseDef::default();
        case2.body.panels = 200;

        assert_ne!(compute_run_id(&case1, "v1"), compute_run_id(&case2, "v1"));
        assert_ne!(compute_run_id(&case1, "v1"), compute_run_id(&case1, "v2"));
    }

    #[test]
    fn hash_ignores_case_name() {
        let case1 = CaseDef::default();
        let case2 = CaseDef {
            name: "renamed".to_string(),
            ..CaseDef::default()
        };
        assert_eq!(compute_run_id(&case1, "v1"), compute_run_id(&case2, "v1"));
    }
}
