//! Roundtrip and loading tests for the `simforge.yaml` manifest.
//!
//! Each `#[case]` is isolated — no shared state.

use rstest::rstest;
use std::fs;
use tempfile::TempDir;

use simforge_core::manifest::{self, Manifest, MANIFEST_FILE};

fn empty_manifest() -> Manifest {
    Manifest::default()
}

fn full_manifest() -> Manifest {
    Manifest {
        project: Some("drone".to_string()),
        files: Some(vec!["calc.hpp".to_string(), "calc.cpp".to_string()]),
        main: Some("main.cpp".to_string()),
        return_code: Some("2".to_string()),
        generator: Some("Ninja".to_string()),
        build_type: Some("Debug".to_string()),
    }
}

#[rstest]
#[case::empty(empty_manifest())]
#[case::full(full_manifest())]
fn yaml_roundtrip_preserves_manifest(#[case] manifest: Manifest) {
    let yaml = serde_yaml::to_string(&manifest).expect("serialize");
    let back: Manifest = serde_yaml::from_str(&yaml).expect("deserialize");
    assert_eq!(back, manifest);
}

#[test]
fn load_reads_a_written_manifest() {
    let dir = TempDir::new().expect("tempdir");
    let yaml = serde_yaml::to_string(&full_manifest()).expect("serialize");
    fs::write(dir.path().join(MANIFEST_FILE), yaml).expect("write");

    let loaded = manifest::load(dir.path()).expect("load").expect("present");
    assert_eq!(loaded, full_manifest());
}

#[test]
fn files_order_is_preserved() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join(MANIFEST_FILE),
        "files:\n  - b.cpp\n  - a.cpp\n  - c.cpp\n",
    )
    .expect("write");

    let loaded = manifest::load(dir.path()).expect("load").expect("present");
    assert_eq!(
        loaded.files,
        Some(vec![
            "b.cpp".to_string(),
            "a.cpp".to_string(),
            "c.cpp".to_string()
        ])
    );
}
