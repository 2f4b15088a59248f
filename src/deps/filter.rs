//! Selection of directly pinned dependencies.

use super::value::DepsMap;
use tracing::debug;

/// Returns the plain string entries of a `deps` mapping.
///
/// Structured entries (`{'packages': [...], 'dep_type': 'cipd'}` and friends)
/// describe package-manager artifacts rather than pinned source locations and
/// are skipped. The order of the result is not significant.
#[must_use]
pub fn filter_deps(deps: &DepsMap) -> Vec<String> {
    deps.iter()
        .filter_map(|(name, value)| match value.as_str() {
            Some(reference) => Some(reference.to_string()),
            None => {
                debug!("Skipping structured dependency '{name}' ({})", value.type_name());
                None
            }
        })
        .collect()
}
