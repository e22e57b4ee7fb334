//! Shared JSON fixtures for the recap crates' tests and benches.
//!
//! Fixtures live under `<workspace>/fixtures` and are listed in
//! `fixtures/manifest.json` by kind and name.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    scenes: HashMap<String, String>,
    marquee: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Scene registries (`RegistryDoc` JSON).
pub mod scenes {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.scenes.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_to_string(lookup(&MANIFEST.scenes, "scene registry", name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        super::load_json(lookup(&MANIFEST.scenes, "scene registry", name)?)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(resolve_path(lookup(&MANIFEST.scenes, "scene registry", name)?))
    }
}

/// Marquee configs and glyph rows.
pub mod marquee {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.marquee.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_to_string(lookup(&MANIFEST.marquee, "marquee", name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        super::load_json(lookup(&MANIFEST.marquee, "marquee", name)?)
    }
}
