//! The run file: a base and a test scenario plus report options.
//!
//! ```toml
//! export_dir = "exports"   # optional; no exports when absent
//! parallel   = true        # default false
//!
//! [base]
//! name = "cmaq_base"
//! root = "/models/cmaq_base"
//!
//! [test]
//! name = "cmaq_test"
//! root = "/models/cmaq_test"
//! ```
//!
//! Scenario tables take every `ScenarioConfig` key.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use tmm_store::ScenarioConfig;

#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    pub base: ScenarioConfig,
    pub test: ScenarioConfig,

    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    #[serde(default)]
    pub parallel: bool,
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading run file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing run file {}", path.display()))
    }
}
