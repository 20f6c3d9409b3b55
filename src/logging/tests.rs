// antimuon-rs: Antimuon Build Tool
//
// SPDX-FileCopyrightText: 2026 Antimuon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};
use tracing::level_filters::LevelFilter;

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::from_u8(0), Some(LogLevel::SILENT));
    assert_eq!(LogLevel::from_u8(6), Some(LogLevel::DUMP));
    assert_eq!(LogLevel::from_u8(7), None);
}

#[test]
fn test_log_level_filters() {
    let filters: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();
    insta::assert_debug_snapshot!(filters, @r#"
    [
        "off",
        "antimuon_rs=error,antimuon=error",
        "antimuon_rs=warn,antimuon=warn",
        "antimuon_rs=info,antimuon=info",
        "antimuon_rs=debug,antimuon=debug",
        "antimuon_rs=trace,antimuon=trace",
        "trace",
    ]
    "#);
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.json_file());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .with_log_file("out/sync.log".to_string())
        .with_json_file(true)
        .build();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.log_file(), Some("out/sync.log"));
    assert!(config.json_file());
}

#[test]
fn test_console_filter_override() {
    let level_only = LogConfig::builder()
        .with_console_level(LogLevel::DEBUG)
        .build();
    assert_eq!(
        level_only.console_env_filter().max_level_hint(),
        Some(LevelFilter::DEBUG)
    );

    let overridden = LogConfig::builder()
        .with_console_level(LogLevel::DEBUG)
        .with_console_filter("warn".to_string())
        .build();
    assert_eq!(overridden.console_filter(), Some("warn"));
    assert_eq!(
        overridden.console_env_filter().max_level_hint(),
        Some(LevelFilter::WARN)
    );
}

#[test]
fn test_console_filter_invalid_falls_back() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::ERROR)
        .with_console_filter("antimuon_rs=loudest".to_string())
        .build();
    assert_eq!(
        config.console_env_filter().max_level_hint(),
        Some(LevelFilter::ERROR)
    );
}
