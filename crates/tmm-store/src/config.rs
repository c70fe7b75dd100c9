//! Scenario configuration.
//!
//! A scenario is one model run directory.  Everything but `name` and `root`
//! has a default:
//!
//! ```toml
//! name        = "cmaq_base"
//! root        = "/models/cmaq_base_20140911"
//! sample_rate = 0.05          # default 0.05
//! db          = "base.db"     # default <root>/<name>.db; "memory" keeps it in RAM
//! rebuild     = true          # default true; false reopens an existing db
//! skim_dir    = "skims"       # default <root>/model/skims
//! transit_dir = "transit"     # default <root>/model/transit
//! ```
//!
//! Relative `db`, `skim_dir` and `transit_dir` values resolve against `root`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use tmm_core::SampleRate;

use crate::StoreResult;

/// Where a scenario's database lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub root: PathBuf,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,

    #[serde(default)]
    pub db: Option<PathBuf>,

    #[serde(default = "default_rebuild")]
    pub rebuild: bool,

    #[serde(default)]
    pub skim_dir: Option<PathBuf>,

    #[serde(default)]
    pub transit_dir: Option<PathBuf>,
}

fn default_sample_rate() -> f64 {
    SampleRate::DEFAULT.get()
}

fn default_rebuild() -> bool {
    true
}

impl ScenarioConfig {
    /// A rebuilt, in-memory scenario with the default sample rate.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name:        name.into(),
            root:        root.into(),
            sample_rate: default_sample_rate(),
            db:          Some(PathBuf::from(MEMORY)),
            rebuild:     true,
            skim_dir:    None,
            transit_dir: None,
        }
    }

    pub fn from_toml_str(text: &str) -> StoreResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> StoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn sample_rate(&self) -> StoreResult<SampleRate> {
        Ok(SampleRate::new(self.sample_rate)?)
    }

    pub fn db_location(&self) -> DbLocation {
        match &self.db {
            Some(p) if p.as_os_str() == MEMORY => DbLocation::Memory,
            Some(p) => DbLocation::File(self.resolve(p)),
            None => DbLocation::File(self.root.join(format!("{}.db", self.name))),
        }
    }

    // ── Source locations ──────────────────────────────────────────────────

    pub fn inputs_dir(&self) -> PathBuf {
        self.root.join("model").join("inputs")
    }

    pub fn outputs_dir(&self) -> PathBuf {
        self.root.join("model").join("outputs")
    }

    pub fn tap_attributes_csv(&self) -> PathBuf {
        self.inputs_dir().join("tap_attributes.csv")
    }

    pub fn households_csv(&self) -> PathBuf {
        self.outputs_dir().join("hhData_1.csv")
    }

    pub fn people_csv(&self) -> PathBuf {
        self.outputs_dir().join("personData_1.csv")
    }

    pub fn tours_csv(&self, is_joint: bool) -> PathBuf {
        let file = if is_joint { "jointTourData_1.csv" } else { "indivTourData_1.csv" };
        self.outputs_dir().join(file)
    }

    pub fn trips_csv(&self, is_joint: bool) -> PathBuf {
        let file = if is_joint { "jointTripData_1.csv" } else { "indivTripData_1.csv" };
        self.outputs_dir().join(file)
    }

    pub fn skim_dir(&self) -> PathBuf {
        match &self.skim_dir {
            Some(p) => self.resolve(p),
            None => self.root.join("model").join("skims"),
        }
    }

    pub fn transit_dir(&self) -> PathBuf {
        match &self.transit_dir {
            Some(p) => self.resolve(p),
            None => self.root.join("model").join("transit"),
        }
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() { p.to_path_buf() } else { self.root.join(p) }
    }
}

const MEMORY: &str = "memory";
