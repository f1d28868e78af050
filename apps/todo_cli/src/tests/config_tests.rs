use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn empty_file_yields_defaults() {
    assert_eq!(parse_settings("").expect("parse"), Settings::default());
}

#[test]
fn file_overrides_only_present_keys() {
    let settings = parse_settings(r#"create_endpoint = "body""#).expect("parse");
    assert_eq!(settings.create_endpoint, CreateEndpoint::Body);
    assert_eq!(settings.server_url, Settings::default().server_url);
}

#[test]
fn unknown_create_endpoint_in_file_is_rejected() {
    assert!(parse_settings(r#"create_endpoint = "query""#).is_err());
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        lookup_from(&[
            ("TODO_SERVER_URL", "http://plain:1"),
            ("APP__SERVER_URL", "http://app:2"),
            ("TODO_CREATE_ENDPOINT", "model"),
        ]),
    )
    .expect("apply env");

    assert_eq!(settings.server_url, "http://app:2");
    assert_eq!(settings.create_endpoint, CreateEndpoint::Model);
}

#[test]
fn invalid_create_endpoint_env_is_an_error() {
    let mut settings = Settings::default();
    let err = apply_env_overrides(
        &mut settings,
        lookup_from(&[("APP__CREATE_ENDPOINT", "carrier-pigeon")]),
    )
    .expect_err("should fail");
    assert!(err.to_string().contains("APP__CREATE_ENDPOINT"));
}

#[test]
fn explicit_config_file_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("todo_cli_config_test_{suffix}.toml"));
    fs::write(
        &path,
        "server_url = \"http://todo.test:9000\"\ncreate_endpoint = \"model\"\n",
    )
    .expect("write config");

    let settings = read_settings_file(&path).expect("load config");
    assert_eq!(settings.server_url, "http://todo.test:9000");
    assert_eq!(settings.create_endpoint, CreateEndpoint::Model);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let path = env::temp_dir().join("todo_cli_config_test_does_not_exist.toml");
    assert!(read_settings_file(&path).is_err());
}
