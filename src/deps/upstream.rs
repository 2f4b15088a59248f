//! Consistency between mirrored dependencies and their `upstream_*` vars.
//!
//! Mirrored dependencies are scanned for vulnerabilities against their origin
//! repository, which is recorded in `vars` as `upstream_<name>`. Every pinned
//! dependency needs such an entry, and every such entry needs a dependency.

use super::DepsFile;
use crate::constants::{UPSTREAM_EXEMPT, UPSTREAM_PREFIX};
use crate::core::{FlattenError, Result};
use crate::manifest::DependencyReference;
use std::collections::BTreeSet;
use tracing::debug;

/// Checks that `deps` and the `upstream_*` entries of `vars` line up.
///
/// # Errors
///
/// [`FlattenError::UpstreamMismatch`] listing every problem found, or
/// [`FlattenError::InvalidReference`] if a dependency is not `location@revision`.
pub fn check_upstream(deps_file: &DepsFile) -> Result<()> {
    let mut names = BTreeSet::new();
    for entry in deps_file.filtered_deps() {
        names.insert(DependencyReference::parse(&entry)?.short_name().to_string());
    }

    let upstreams: BTreeSet<&str> =
        deps_file.vars.keys().filter_map(|key| key.strip_prefix(UPSTREAM_PREFIX)).collect();

    let mut problems = Vec::new();
    for name in &names {
        if UPSTREAM_EXEMPT.contains(&name.as_str()) {
            debug!("'{name}' is exempt from the upstream check");
            continue;
        }
        if !upstreams.contains(name.as_str()) {
            problems.push(format!(
                "{name} has no '{UPSTREAM_PREFIX}{name}' entry in vars; every dependency needs an upstream URL"
            ));
        }
    }
    for upstream in &upstreams {
        if !names.contains(*upstream) {
            problems.push(format!(
                "'{UPSTREAM_PREFIX}{upstream}' in vars has no matching dependency in deps"
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(FlattenError::UpstreamMismatch {
            problems,
        })
    }
}
