// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! `.gclient` rendering.
//!
//! The file is a Python literal: one unmanaged solution per versioned
//! project, plus `target_os` for the mobile variant.

use std::fmt::Write as _;

use crate::config::Config;

/// Python string literal; JSON escaping is a valid subset.
fn py_str(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

fn py_opt(value: Option<&str>) -> String {
    value.map_or_else(|| "None".to_string(), py_str)
}

/// Renders the client configuration for `config`.
#[must_use]
pub fn render(config: &Config) -> String {
    let mut out = String::from("solutions = [\n");

    for project in config.projects().versioned() {
        out.push_str("  {\n");
        out.push_str("    \"managed\": False,\n");
        let _ = writeln!(out, "    \"name\": {},", py_str(project.gclient_name()));
        let _ = writeln!(out, "    \"url\": {},", py_opt(project.url()));
        if project.custom_deps().is_empty() {
            out.push_str("    \"custom_deps\": {},\n");
        } else {
            out.push_str("    \"custom_deps\": {\n");
            for dep in project.custom_deps() {
                let _ = writeln!(
                    out,
                    "      {}: {},",
                    py_str(&dep.path),
                    py_opt(dep.url.as_deref())
                );
            }
            out.push_str("    },\n");
        }
        out.push_str("  },\n");
    }

    out.push_str("]\n");

    if config.is_android() {
        out.push_str("target_os = [\"android\"]\n");
    }
    out
}
