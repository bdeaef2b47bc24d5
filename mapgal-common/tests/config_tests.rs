//! Integration tests for config file location and loading
//!
//! Uses serial_test because MAPGAL_CONFIG is process-global; tests that set
//! or clear it are marked #[serial].

use std::env;
use std::io::Write;
use std::path::PathBuf;

use mapgal_common::config::{locate_config_file, CliOverrides, GalleryConfig, CONFIG_ENV_VAR};
use mapgal_common::{DatasetSource, Error};
use serial_test::serial;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(content.as_bytes()).expect("write temp config");
    file
}

#[test]
#[serial]
fn test_explicit_path_wins_over_env() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/mapgal-from-env.toml");

    let explicit = PathBuf::from("/tmp/mapgal-explicit.toml");
    assert_eq!(locate_config_file(Some(&explicit)), Some(explicit));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_used_when_no_explicit_path() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/mapgal-from-env.toml");

    assert_eq!(
        locate_config_file(None),
        Some(PathBuf::from("/tmp/mapgal-from-env.toml"))
    );

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_load_from_env_config_file() {
    let file = write_config("dataset = \"/srv/maps/maps.csv\"\nport = 6001\n");
    env::set_var(CONFIG_ENV_VAR, file.path());

    let cfg = GalleryConfig::load(CliOverrides::default()).expect("config should load");
    assert_eq!(cfg.dataset, DatasetSource::Path(PathBuf::from("/srv/maps/maps.csv")));
    assert_eq!(cfg.port, 6001);
    assert_eq!(cfg.config_file.as_deref(), Some(file.path()));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_cli_beats_config_file() {
    let file = write_config("port = 6001\nimage_dir = \"/srv/maps\"\n");
    let cli = CliOverrides {
        config: Some(file.path().to_path_buf()),
        port: Some(7002),
        image_dir: Some(PathBuf::from("/data/thumbs")),
        ..Default::default()
    };

    let cfg = GalleryConfig::load(cli).expect("config should load");
    assert_eq!(cfg.port, 7002);
    assert_eq!(cfg.image_dir, Some(PathBuf::from("/data/thumbs")));
}

#[test]
#[serial]
fn test_missing_explicit_file_is_error() {
    env::remove_var(CONFIG_ENV_VAR);

    let cli = CliOverrides {
        config: Some(PathBuf::from("/nonexistent/mapgal/config.toml")),
        ..Default::default()
    };
    assert!(matches!(GalleryConfig::load(cli), Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_invalid_file_is_error() {
    let file = write_config("port = [1, 2]\n");
    let cli = CliOverrides {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(GalleryConfig::load(cli), Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_custom_filter_order_from_file() {
    let file = write_config("filter_order = [\"Bug\", \"NPC\", \"Bug\"]\n");
    let cli = CliOverrides {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    let cfg = GalleryConfig::load(cli).expect("config should load");
    assert_eq!(cfg.filter_order.labels(), &["Bug".to_string(), "NPC".to_string()]);
}
