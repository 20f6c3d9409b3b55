// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reference resolution.
//!
//! ```text
//! projects.<name>.repository.ref   --> <ref>             (verbatim)
//! projects.<name>.tag              --> refs/tags/<tag>
//! projects.<name>.{branch,version}
//!     neither                      --> origin/master
//!     branch only                  --> origin/<branch>
//!     version (with or w/o branch) --> origin/<version>[+<upstream version>]
//! ```
//!
//! The upstream suffix is only added for the product project.

use super::{PRODUCT, UPSTREAM};
use crate::config::options::OptionSource;

/// Branch checked out when nothing else is configured.
pub const DEFAULT_REF: &str = "origin/master";

const TAG_PREFIX: &str = "refs/tags/";
const REMOTE: &str = "origin";

/// Computes the reference to check out for `project`. Never fails.
#[must_use]
pub fn resolve_ref<O: OptionSource + ?Sized>(project: &str, options: &O) -> String {
    let lookup = |field: &str| options.get(&format!("projects.{project}.{field}"));

    if let Some(reference) = lookup("repository.ref") {
        return reference;
    }

    if let Some(tag) = lookup("tag") {
        return format!("{TAG_PREFIX}{tag}");
    }

    let branch = lookup("branch");
    let version = lookup("version");
    match (version, branch) {
        (None, None) => DEFAULT_REF.to_string(),
        (None, Some(branch)) => format!("{REMOTE}/{branch}"),
        // A version beats an explicit branch when both are given.
        (Some(version), _) => {
            let reference = format!("{REMOTE}/{version}");
            match upstream_version(project, options) {
                Some(upstream) => format!("{reference}+{upstream}"),
                None => reference,
            }
        }
    }
}

/// Version the product is composed against: the upstream's tag, branch or
/// version override, in that order.
fn upstream_version<O: OptionSource + ?Sized>(project: &str, options: &O) -> Option<String> {
    if project != PRODUCT {
        return None;
    }
    ["tag", "branch", "version"]
        .into_iter()
        .find_map(|field| options.get(&format!("projects.{UPSTREAM}.{field}")))
}
