//! Test fixture loading utilities

use std::path::PathBuf;

use im_authors::{CanonicalRegistry, Catalog, Engine};

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as a string
#[allow(dead_code)]
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// The sample catalog shared by the pipeline and scanner tests
#[allow(dead_code)]
pub fn sample_catalog() -> Catalog {
    Catalog::load(&fixture_path("catalog_sample.json")).expect("sample catalog should parse")
}

/// Engine with default settings and the given inline rules
#[allow(dead_code)]
pub fn engine_with_rules(pairs: &[(&str, &str)]) -> Engine {
    let registry = CanonicalRegistry::from_pairs(pairs.iter().copied()).expect("valid rules");
    Engine::with_registry(registry)
}

/// Engine with default settings and the builtin rules
#[allow(dead_code)]
pub fn builtin_engine() -> Engine {
    Engine::with_registry(CanonicalRegistry::builtin().expect("builtin rules should load"))
}
