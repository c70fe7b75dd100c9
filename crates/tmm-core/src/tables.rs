//! Immutable model lookup tables.
//!
//! Everything that is "documented, not computable" about a particular model
//! deployment lives in [`ModelTables`]: the period map, the skim matrix
//! numbering, the transit sub-mode letters and the id ranges used by the
//! per-zone exports.  A `ModelTables` value is built once and passed by
//! reference to the build pipeline, the dataset and the comparator.

use crate::{DriveMode, PeriodMap, Tod};

/// Congested time / distance matrix numbers for one drive mode.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixPair {
    pub time:     u16,
    pub distance: u16,
}

/// Drive mode → matrix numbers.  Indexed by [`DriveMode::index`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixNumbers {
    pairs: [MatrixPair; 6],
}

impl MatrixNumbers {
    pub fn new(pairs: [MatrixPair; 6]) -> Self {
        Self { pairs }
    }

    /// CMAP ABM numbering (ABM User Guide p.36).
    pub fn cmap() -> Self {
        let p = |time, distance| MatrixPair { time, distance };
        Self::new([
            p(175, 177), // SOV, no toll
            p(180, 183), // SOV, toll
            p(185, 187), // HOV2, no toll
            p(190, 193), // HOV2, toll
            p(195, 197), // HOV3+, no toll
            p(200, 203), // HOV3+, toll
        ])
    }

    pub fn get(&self, mode: DriveMode) -> MatrixPair {
        self.pairs[mode.index()]
    }

    /// Full matrix name in the network database, e.g. `mf3175` for TOD 3
    /// SOV-free time.
    pub fn matrix_name(tod: Tod, number: u16) -> String {
        format!("mf{tod}{number}")
    }
}

impl Default for MatrixNumbers {
    fn default() -> Self {
        Self::cmap()
    }
}

/// One transit sub-mode letter from the assignment network.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitSubMode {
    pub code:        String,
    pub description: String,
}

/// Id ranges swept by the per-geography person-trip export.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportRanges {
    pub max_zone:    u32,
    pub max_subzone: u32,
}

impl Default for ExportRanges {
    fn default() -> Self {
        Self { max_zone: 1944, max_subzone: 16819 }
    }
}

/// All deployment-specific lookup tables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelTables {
    pub periods:           PeriodMap,
    pub matrices:          MatrixNumbers,
    pub transit_sub_modes: Vec<TransitSubMode>,
    pub export_ranges:     ExportRanges,
    /// Prefix of the per-TOD transit assignment scenario ids (`10` → `101..108`).
    pub assignment_scenario_prefix: String,
}

impl ModelTables {
    /// Tables for the CMAP activity-based model.
    pub fn cmap() -> Self {
        let sub = |code: &str, description: &str| TransitSubMode {
            code:        code.to_owned(),
            description: description.to_owned(),
        };
        Self {
            periods:  PeriodMap::ctramp(),
            matrices: MatrixNumbers::cmap(),
            transit_sub_modes: vec![
                sub("M", "Metra Rail"),
                sub("C", "CTA Rail"),
                sub("B", "CTA Bus (Regular)"),
                sub("E", "CTA Bus (Express)"),
                sub("L", "Pace Bus (Local)"),
                sub("P", "Pace Bus (Regular)"),
                sub("Q", "Pace Bus (Express)"),
            ],
            export_ranges: ExportRanges::default(),
            assignment_scenario_prefix: "10".to_owned(),
        }
    }

    /// Network scenario holding the transit assignment for `tod`.
    pub fn assignment_scenario(&self, tod: Tod) -> String {
        format!("{}{tod}", self.assignment_scenario_prefix)
    }

    pub fn sub_mode_description(&self, code: &str) -> Option<&str> {
        self.transit_sub_modes
            .iter()
            .find(|m| m.code == code)
            .map(|m| m.description.as_str())
    }
}

impl Default for ModelTables {
    fn default() -> Self {
        Self::cmap()
    }
}
