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
    essays: HashMap<String, String>,
    scenarios: HashMap<String, String>,
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

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Video essay manifests.
pub mod essays {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.essays.keys().cloned().collect()
    }

    fn rel(name: &str) -> Result<&'static str> {
        lookup(&MANIFEST.essays, "essay", name).map(String::as_str)
    }

    pub fn json(name: &str) -> Result<String> {
        read_to_string(rel(name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        load_json(rel(name)?)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(resolve_path(rel(name)?))
    }
}

/// Recorded scroll traces: container/viewport sizes, a media duration and a list of container tops.
pub mod scenarios {
    use super::*;

    #[derive(Debug, Clone, Deserialize)]
    pub struct ScrollScenario {
        pub container_height: f64,
        pub viewport_height: f64,
        pub duration: f64,
        pub tops: Vec<f64>,
    }

    pub fn keys() -> Vec<String> {
        MANIFEST.scenarios.keys().cloned().collect()
    }

    pub fn load(name: &str) -> Result<ScrollScenario> {
        let rel = lookup(&MANIFEST.scenarios, "scenario", name)?;
        load_json(rel)
    }
}
