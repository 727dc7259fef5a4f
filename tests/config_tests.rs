use gryphon_acs::Config;
use std::fs;
use tempfile::tempdir;

const SAMPLE: &str = r#"
seed = 42

[search]
ant_count = 24
max_steps = 250
break_on_iterations = 5

[search.global]
increment = 5.0
evaporation = 0.2

[logging]
level = "debug"

[data]
dir = "/srv/maps"
"#;

#[tokio::test]
async fn test_from_file_reads_partial_tables() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, SAMPLE).unwrap();

    let config = Config::from_file(&path).await.unwrap();
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.search.ant_count, 24);
    assert_eq!(config.search.max_steps, 250);
    assert_eq!(config.search.break_on_iterations, 5);
    assert_eq!(config.search.global.increment, 5.0);
    // untouched knobs keep their defaults
    assert!((config.search.local.increment - 0.01).abs() < 1e-6);
    assert!((config.search.exploitation.base - 0.4).abs() < 1e-6);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file, None);
    assert_eq!(config.data.dir.as_deref(), Some(std::path::Path::new("/srv/maps")));
}

#[tokio::test]
async fn test_from_file_rejects_invalid_search_settings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[search]\nant_count = 0\n").unwrap();

    let err = Config::from_file(&path).await.unwrap_err();
    assert!(err.to_string().contains("ant_count"));
}

#[test]
fn test_load_without_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.search.max_steps, 100);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.seed, None);
}

#[test]
fn test_load_layers_environment_over_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, SAMPLE).unwrap();

    std::env::set_var("GRYPHON_ACS__SEARCH__MAX_ITERATIONS", "7");
    let config = Config::load(&path);
    std::env::remove_var("GRYPHON_ACS__SEARCH__MAX_ITERATIONS");

    let config = config.unwrap();
    assert_eq!(config.search.max_iterations, 7);
    assert_eq!(config.search.ant_count, 24);
    assert_eq!(config.seed, Some(42));
}

#[test]
fn test_load_rejects_out_of_range_rates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[search.local]\nincrement = 0.01\nevaporation = 3.0\n").unwrap();

    assert!(Config::load(&path).is_err());
}
