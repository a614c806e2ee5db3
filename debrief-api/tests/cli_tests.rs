//! Command-line and environment configuration tests
//!
//! Note: Uses serial_test to prevent ENV variable race conditions.
//! Tests that set DEBRIEF_* variables are marked with #[serial].

use clap::Parser;
use debrief_api::cli::Args;
use debrief_common::config::UpdateIdPolicy;
use serial_test::serial;
use std::env;
use std::io::Write;

const VARS: &[&str] = &[
    "DEBRIEF_CONFIG",
    "DEBRIEF_BIND_ADDR",
    "DEBRIEF_CLASSIFIER_URL",
    "DEBRIEF_GATEWAY_URL",
    "DEBRIEF_SECTION_NAMES",
    "DEBRIEF_UPDATE_DESCENDANT_IDS",
    "DEBRIEF_ALLOWED_ORIGIN",
    "DEBRIEF_HTTP_TIMEOUT_SECS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_flags_parsed() {
    clear_env();

    let args = Args::try_parse_from([
        "debrief-api",
        "--classifier-url",
        "http://classifier:4005",
        "--section-names",
        "Background,Summary",
        "--update-descendant-ids",
        "clear",
        "--http-timeout-secs",
        "15",
    ])
    .unwrap();

    let overrides = args.overrides();
    assert_eq!(overrides.classifier_url.as_deref(), Some("http://classifier:4005"));
    assert_eq!(
        overrides.section_names,
        Some(vec!["Background".to_string(), "Summary".to_string()])
    );
    assert_eq!(overrides.update_descendant_ids, Some(UpdateIdPolicy::Clear));
    assert_eq!(overrides.http_timeout_secs, Some(15));
}

#[test]
#[serial]
fn test_environment_fallback() {
    clear_env();
    env::set_var("DEBRIEF_GATEWAY_URL", "http://backend:8080/graphql/");

    let args = Args::try_parse_from(["debrief-api"]).unwrap();
    assert_eq!(args.gateway_url.as_deref(), Some("http://backend:8080/graphql/"));

    clear_env();
}

#[test]
#[serial]
fn test_flag_beats_environment() {
    clear_env();
    env::set_var("DEBRIEF_BIND_ADDR", "0.0.0.0:1");

    let args = Args::try_parse_from(["debrief-api", "--bind-addr", "127.0.0.1:2"]).unwrap();
    assert_eq!(args.bind_addr.as_deref(), Some("127.0.0.1:2"));

    clear_env();
}

#[test]
#[serial]
fn test_invalid_policy_rejected() {
    clear_env();
    let result = Args::try_parse_from(["debrief-api", "--update-descendant-ids", "sometimes"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_resolve_config_layers_toml_under_flags() {
    clear_env();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "classifier_url = \"http://toml-classifier\"\ngateway_url = \"http://toml-gateway/graphql\""
    )
    .unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let args = Args::try_parse_from([
        "debrief-api",
        "--config",
        path.as_str(),
        "--gateway-url",
        "http://cli-gateway/graphql/",
    ])
    .unwrap();

    let config = args.resolve_config().unwrap();
    assert_eq!(config.classifier_url, "http://toml-classifier");
    assert_eq!(config.gateway_url, "http://cli-gateway/graphql");
}
