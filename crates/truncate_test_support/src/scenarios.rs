use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const SCENARIOS_FORMAT_V1: &str = "ellipsis-scenarios-v1";

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct ScenarioManifest {
    format: String,
    scenarios: Vec<Scenario>,
}

/// One fixture: content in a box, and what a single pass must produce.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub id: String,
    pub width: f32,
    pub height: f32,
    pub content: ScenarioContent,
    /// Raw option table, deserialized by the test into the real options type.
    #[serde(default)]
    pub options: toml::Table,
    /// Text content of the rendered result.
    pub expected_text: String,
    #[serde(default)]
    pub expected_markup: Option<String>,
    /// Absent when the content must not be truncated.
    #[serde(default)]
    pub truncated_at: Option<usize>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ScenarioContent {
    Text(String),
    Markup(String),
    Number(f64),
    Null,
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and validate `fixtures/<name>`. Panics with context on any problem.
pub fn load_scenarios(name: &str) -> Vec<Scenario> {
    let path = fixtures_dir().join(name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read scenario TOML {path:?}: {err}"));
    let manifest: ScenarioManifest = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse scenario TOML {path:?}: {err}"));
    validate_manifest(&manifest, &path);
    manifest.scenarios
}

fn validate_manifest(manifest: &ScenarioManifest, path: &Path) {
    assert_eq!(
        manifest.format, SCENARIOS_FORMAT_V1,
        "unsupported scenario manifest format in {path:?}"
    );
    let mut ids: Vec<&str> = manifest.scenarios.iter().map(|s| s.id.as_str()).collect();
    ids.sort_unstable();
    if let Some(dup) = ids.windows(2).find(|w| w[0] == w[1]) {
        panic!("duplicate scenario id in {path:?}: {}", dup[0]);
    }
    for s in &manifest.scenarios {
        assert!(
            s.width >= 0.0 && s.height >= 0.0,
            "scenario {} in {path:?} has a negative box",
            s.id
        );
    }
}
