// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{AntimuonError, AntimuonResult, ConfigError, ProcessError, SyncError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::invalid("debug_build", "maybe", "a boolean");
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value 'maybe' for 'debug_build': expected a boolean"
    );

    let err = ConfigError::MissingRegistryEntry {
        project: "skia".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"unknown project 'skia' (not in the project registry)"
    );
}

#[test]
fn test_sync_error_display() {
    let err = SyncError::ProjectStepFailed {
        step: "pin_versions",
        project: "chrome".to_string(),
        source: ProcessError::NonZeroExit {
            command: "git checkout refs/tags/1.2.3".to_string(),
            code: 128,
        },
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"step 'pin_versions' failed for project 'chrome': process 'git checkout refs/tags/1.2.3' exited with code 128"
    );
}

#[test]
fn test_exit_code_propagation() {
    let err: AntimuonError = SyncError::StepFailed {
        step: "run_hooks",
        source: ProcessError::NonZeroExit {
            command: "gclient runhooks".to_string(),
            code: 3,
        },
    }
    .into();
    assert_eq!(err.exit_code(), Some(3));

    let err: AntimuonError = ProcessError::ExecutableNotFound {
        name: "gclient".to_string(),
    }
    .into();
    assert_eq!(err.exit_code(), None);

    let err: AntimuonError = ConfigError::MissingKey {
        key: "projects.chrome".to_string(),
    }
    .into();
    assert_eq!(err.exit_code(), None);
}

#[test]
fn test_antimuon_error_size() {
    let size = std::mem::size_of::<AntimuonError>();
    assert!(size <= 24, "AntimuonError is {size} bytes, expected <= 24");
}

#[test]
fn test_antimuon_result_size() {
    let size = std::mem::size_of::<AntimuonResult<()>>();
    assert!(size <= 24, "AntimuonResult<()> is {size} bytes, expected <= 24");
}
