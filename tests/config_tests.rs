use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

use spotify_web_handlers::api::http::DEFAULT_API_BASE;
use spotify_web_handlers::auth::DEFAULT_AUTH_BASE;
use spotify_web_handlers::config::Config;

#[test]
fn config_from_path_parses_toml() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    let mut f = File::create(&cfg_path).unwrap();
    let toml = r#"
access_token = "abc"
market = "SE"
log_dir = "/tmp/spotify-logs"
"#;
    f.write_all(toml.as_bytes()).unwrap();
    let cfg = Config::from_path(&cfg_path).expect("parse config");
    assert_eq!(cfg.access_token.as_deref(), Some("abc"));
    assert_eq!(cfg.market.as_deref(), Some("SE"));
    assert_eq!(cfg.log_dir.unwrap().to_str().unwrap(), "/tmp/spotify-logs");
    // unset fields fall back to defaults
    assert_eq!(cfg.api_base, DEFAULT_API_BASE);
    assert_eq!(cfg.auth_base, DEFAULT_AUTH_BASE);
}

#[test]
fn blank_credentials_in_file_are_unset() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("blank.toml");
    std::fs::write(&cfg_path, "access_token = \"\"\nclient_id = \" \"\nclient_secret = \"s\"\n").unwrap();
    let cfg = Config::from_path(&cfg_path).unwrap();
    assert_eq!(cfg.access_token, None);
    assert_eq!(cfg.bearer_token(), None);
    assert_eq!(cfg.client_id, None);
    assert_eq!(cfg.client_secret.as_deref(), Some("s"));
    assert!(!cfg.has_client_credentials());
}

#[test]
fn empty_file_equals_default() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("empty.toml");
    File::create(&cfg_path).unwrap();
    assert_eq!(Config::from_path(&cfg_path).unwrap(), Config::default());
}

#[test]
fn malformed_toml_is_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("bad.toml");
    std::fs::write(&cfg_path, "market = [unterminated").unwrap();
    assert!(Config::from_path(&cfg_path).is_err());
}

#[test]
fn overrides_replace_file_values_and_skip_empty() {
    let env: HashMap<&str, &str> = [
        ("SPOTIFY_API_BASE", "http://127.0.0.1:1234"),
        ("SPOTIFY_ACCESS_TOKEN", ""),
        ("SPOTIFY_CLIENT_ID", "cid"),
        ("SPOTIFY_CLIENT_SECRET", "secret"),
        ("SPOTIFY_MARKET", "FR"),
    ]
    .into_iter()
    .collect();

    let base = Config {
        access_token: Some("from-file".into()),
        ..Config::default()
    };
    let cfg = base.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
    assert_eq!(cfg.api_base, "http://127.0.0.1:1234");
    assert_eq!(cfg.auth_base, DEFAULT_AUTH_BASE);
    assert_eq!(cfg.access_token.as_deref(), Some("from-file"));
    assert_eq!(cfg.market.as_deref(), Some("FR"));
    assert!(cfg.has_client_credentials());
}

#[test]
fn client_credentials_need_both_halves() {
    let cfg = Config {
        client_id: Some("cid".into()),
        ..Config::default()
    };
    assert!(!cfg.has_client_credentials());
    let cfg = Config {
        client_id: Some("cid".into()),
        client_secret: Some(String::new()),
        ..Config::default()
    };
    assert!(!cfg.has_client_credentials());
}
