use basedupe::config::Config;
use basedupe::duplicates::{DuplicateFinder, PercentageMode, ScanPhase};
use basedupe::scanner::HashAlgorithm;
use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_defaults_through_figment() {
    // Figment directly, without Env, so parallel tests cannot interfere
    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .extract()
        .unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_toml_keeps_other_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "hash_algorithm = \"blake3\"\nfollow_symlinks = true\n").unwrap();

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .extract()
        .unwrap();

    assert_eq!(config.hash_algorithm, HashAlgorithm::Blake3);
    assert!(config.follow_symlinks);
    assert_eq!(config.max_file_size, 75_000_000);
    assert_eq!(config.percentage_mode, PercentageMode::Legacy);
}

#[test]
fn test_unknown_enum_value_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "percentage_mode = \"sometimes\"\n").unwrap();

    let result: Result<Config, _> = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .extract();
    assert!(result.is_err());
}

#[test]
fn test_config_drives_finder() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("build")).unwrap();
    fs::write(dir.path().join("build").join("out.bin"), "artifact").unwrap();
    fs::write(dir.path().join("small.txt"), "tiny").unwrap();
    fs::write(dir.path().join("big.txt"), "much larger file").unwrap();

    let config = Config {
        max_file_size: 10,
        excluded_dirs: vec![".git".into(), "Build".into()],
        ..Config::default()
    };
    let mut finder = DuplicateFinder::new(config.finder_config());
    let summary = finder.run_scan(dir.path(), true, ScanPhase::Base).unwrap();

    assert_eq!(summary.counters.files_processed, 1);
    assert_eq!(summary.counters.empty_or_oversized_skipped, 1);
    assert_eq!(summary.counters.subfolders_visited, 0);
}
