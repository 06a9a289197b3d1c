// tests/config_load.rs
use std::{env, fs};

use gigwatch::config::{WatchConfig, ENV_CONFIG_PATH};

const SAMPLE: &str = r#"
base_url = "https://city.example.org/search/cpg?searchNearby=2"
num_posts = 25
keywords = ["data", "python"]

[email]
recipients = "you@example.org"
subject = "Gig Postings"
"#;

#[serial_test::serial]
#[test]
fn env_path_takes_precedence() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("watch.toml");
    fs::write(&path, SAMPLE).unwrap();

    env::set_var(ENV_CONFIG_PATH, path.display().to_string());
    let cfg = WatchConfig::load_default().unwrap();
    env::remove_var(ENV_CONFIG_PATH);

    assert_eq!(cfg.base_url, "https://city.example.org/search/cpg?searchNearby=2");
    assert_eq!(cfg.keywords, vec!["data".to_string(), "python".to_string()]);
}

#[serial_test::serial]
#[test]
fn missing_config_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("absent.toml").display().to_string());
    let res = WatchConfig::load_default();
    env::remove_var(ENV_CONFIG_PATH);
    assert!(res.is_err());
}

#[test]
fn repo_sample_config_parses() {
    let content = fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/config/gigwatch.toml"
    ))
    .unwrap();
    let cfg = WatchConfig::from_toml_str(&content).unwrap();
    assert_eq!(cfg.num_posts, 50);
    assert!(!cfg.keywords.is_empty());
}
