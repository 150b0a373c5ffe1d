//! Opening the bindings from configuration.

use std::fs;

use glalby::{open, Config, LoadError, OpenError};

#[test]
fn test_open_without_library() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let mut config = Config::default();
    config.library.search_paths = vec![dir.path().to_path_buf()];

    match open(&config).expect_err("Expected missing library") {
        OpenError::Load(LoadError::LibraryNotFound { name, .. }) => {
            assert_eq!(name, "glalby_bindings")
        }
        other => panic!("Expected LibraryNotFound, got {:?}", other),
    }
}

#[test]
fn test_open_from_config_file() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let config_path = dir.path().join("config.toml");
    let library_dir = dir.path().join("lib");
    fs::create_dir(&library_dir).expect("Failed to create library directory");

    let mut config = Config::default();
    config.library.search_paths = vec![library_dir.clone()];
    config.save(&config_path).expect("Failed to save config");

    let loaded = Config::from_file(&config_path).expect("Failed to load config");
    assert_eq!(loaded.library.search_paths, vec![library_dir]);
    assert!(matches!(open(&loaded), Err(OpenError::Load(_))));
}

#[test]
fn test_version_is_reported() {
    assert_eq!(glalby::glalby_meta::VERSION, env!("CARGO_PKG_VERSION"));
}
