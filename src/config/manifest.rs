// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Product version persisted in the product's `package.json`.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

pub const PACKAGE_JSON: &str = "package.json";

#[derive(Debug, Deserialize)]
struct PackageJson {
    #[serde(default)]
    version: Option<String>,
}

/// Reads `version` from `<dir>/package.json`.
///
/// A missing file, an unreadable file or a missing field all yield `None`;
/// the version is optional input.
#[must_use]
pub fn read_product_version(dir: &Path) -> Option<String> {
    let path = dir.join(PACKAGE_JSON);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no product package.json");
            return None;
        }
    };

    match serde_json::from_str::<PackageJson>(&content) {
        Ok(package) => package.version.filter(|v| !v.is_empty()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed package.json");
            None
        }
    }
}

/// Part of a product version before any `+<upstream>` suffix.
#[must_use]
pub fn release_tag(version: &str) -> &str {
    version.split_once('+').map_or(version, |(tag, _)| tag)
}
