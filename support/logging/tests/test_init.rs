//! Global subscriber installation.

use std::fs;

use logging::{init, trace, LoggingError};

#[test]
fn test_init_writes_to_file_once() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let log_path = dir.path().join("glalby.log");

    init("trace", Some(&log_path)).expect("Failed to install subscriber");
    trace("DYLIB", "resolving ffi_glalby_bindings_rustbuffer_free");
    tracing::warn!(code = 7, "unknown call status");

    let contents = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert!(contents.contains("resolving ffi_glalby_bindings_rustbuffer_free"));
    assert!(contents.contains("module=\"DYLIB\""));
    assert!(contents.contains("unknown call status"));
    assert!(!contents.contains("\u{1b}["), "file output has no ANSI colors");

    match init("info", None).expect_err("Expected second init to fail") {
        LoggingError::AlreadyInitialized(_) => {}
        other => panic!("Expected AlreadyInitialized, got {:?}", other),
    }
}
