//! Extension discovery integration tests
//!
//! Exercise the public API with the platform-native loader over scratch
//! directories. Candidate files here are deliberately not real libraries:
//! the native loader must fail on them in isolation while the scan itself
//! completes.

use std::fs;
use std::path::Path;

use modrelay::extension::api::{
    discover_extensions, ExtensionDiscovery, ExtensionError, ExtensionLoader, IdentityResolver,
    NativeLoader, RunMode,
};

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"not a real shared library").unwrap();
}

#[test]
fn malformed_libraries_are_isolated_and_the_scan_completes() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "first.so");
    touch(dir.path(), "second.so");
    touch(dir.path(), "nested/third.so");

    // every candidate fails to load; none may abort the walk
    let results = discover_extensions(dir.path(), "pkg", RunMode::PRODUCTION).unwrap();
    assert!(results.is_empty());
}

#[test]
fn private_candidates_are_never_loaded() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "_private.so");
    touch(dir.path(), "_drafts/tool.so");

    let results = discover_extensions(dir.path(), "pkg", RunMode::PRODUCTION).unwrap();
    assert!(results.is_empty());
}

#[test]
fn empty_root_discovers_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let results = discover_extensions(dir.path(), "pkg", RunMode::PRODUCTION).unwrap();
    assert!(results.is_empty());
}

#[test]
fn missing_root_is_reported_up_front() {
    let result = discover_extensions(
        "/nonexistent/modrelay-extension-root",
        "pkg",
        RunMode::PRODUCTION,
    );
    assert!(matches!(result, Err(ExtensionError::RootNotFound { .. })));
}

#[test]
fn native_loader_reports_load_failures_as_values() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "garbage.so");

    let resolver = IdentityResolver::new(dir.path(), "pkg");
    let identity = resolver.resolve(&dir.path().join("garbage.so")).unwrap();

    let result = NativeLoader::new().load(&identity);
    assert!(matches!(result, Err(ExtensionError::LoadFailed { .. })));
}

#[test]
fn discovery_is_restartable_over_an_unchanged_tree() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "a.so");
    touch(dir.path(), "b.so");

    let discovery = ExtensionDiscovery::new(dir.path(), "pkg", RunMode::PRODUCTION);
    // both runs fail every candidate the same way, yielding equal (empty)
    // sequences without disturbing each other
    let first: usize = discovery.discover().unwrap().count();
    let second: usize = discovery.discover().unwrap().count();
    assert_eq!(first, second);
}
