//! The base/test comparator.

use std::fmt;

use rustc_hash::FxHashMap;

use tmm_core::{Mode, ModeGroup};
use tmm_stats::{ClassTally, ScenarioDataset};
use tmm_store::{ModeTable, TravelUnit};

use crate::diversion::{AutoImpact, ModeDiffs, attribute_auto_change};
use crate::{Change, ClassChange, CompareResult, SubModeChange, TotalsChange, TransitChange};

/// Read-only view over a base and a test scenario.
///
/// Every figure is unsampled with its own scenario's rate before the two
/// sides meet, so scenarios run at different sample rates compare safely.
pub struct Comparison<'a> {
    pub base: &'a ScenarioDataset,
    pub test: &'a ScenarioDataset,
}

impl<'a> Comparison<'a> {
    pub fn new(base: &'a ScenarioDataset, test: &'a ScenarioDataset) -> Self {
        Self { base, test }
    }

    // ── Mode share ────────────────────────────────────────────────────────

    /// Share change for every mode, in code order.
    pub fn mode_share_change(&self, table: ModeTable) -> CompareResult<Vec<(Mode, Change)>> {
        let base = self.base.mode_share(table)?;
        let test = self.test.mode_share(table)?;
        Ok(Mode::ALL.iter().map(|&m| (m, Change::new(base.get(m), test.get(m)))).collect())
    }

    /// Share change for the four reporting groups.
    pub fn grouped_mode_share_change(&self, table: ModeTable) -> CompareResult<Vec<(ModeGroup, Change)>> {
        let base = self.base.mode_share(table)?;
        let test = self.test.mode_share(table)?;
        Ok(ModeGroup::ALL.iter().map(|&g| (g, Change::new(base.group(g), test.group(g)))).collect())
    }

    // ── New / lost trips ──────────────────────────────────────────────────

    /// Unsampled rows whose mode is in `modes`, in both scenarios.
    pub fn new_for_modes(&self, table: ModeTable, modes: &[Mode]) -> CompareResult<Change> {
        let base = self.base.count_modes(table, modes)?;
        let test = self.test.count_modes(table, modes)?;
        log::debug!("{} {:?}: {base} → {test}", table.name(), modes);
        Ok(Change::new(base.get(), test.get()))
    }

    pub fn new_all(&self, table: ModeTable) -> CompareResult<Change> {
        self.new_for_modes(table, &Mode::ALL)
    }

    pub fn new_auto(&self, table: ModeTable) -> CompareResult<Change> {
        self.new_for_modes(table, &ModeGroup::Auto.modes())
    }

    pub fn new_dtt(&self, table: ModeTable) -> CompareResult<Change> {
        self.new_for_modes(table, &ModeGroup::DriveTransit.modes())
    }

    pub fn new_wtt(&self, table: ModeTable) -> CompareResult<Change> {
        self.new_for_modes(table, &ModeGroup::WalkTransit.modes())
    }

    pub fn new_other(&self, table: ModeTable) -> CompareResult<Change> {
        self.new_for_modes(table, &ModeGroup::Other.modes())
    }

    // ── Transit ───────────────────────────────────────────────────────────

    pub fn transit_stats_change(&self) -> TransitChange {
        let base = self.base.transit_stats();
        let test = self.test.transit_stats();
        let by_mode = base
            .by_mode()
            .iter()
            .map(|m| SubModeChange {
                code:        m.code.clone(),
                description: m.description.clone(),
                change:      TotalsChange::between(m.totals, test.get(&m.code).unwrap_or_default()),
            })
            .collect();
        TransitChange { total: TotalsChange::between(base.total(), test.total()), by_mode }
    }

    pub fn ptrips_by_class_change(&self) -> ClassChange {
        let base = self.base.ptrips_by_class();
        let test = self.test.ptrips_by_class();
        ClassChange {
            by_class: ClassTally::CLASSES
                .iter()
                .map(|&c| (c, Change::new(base.get(c).get(), test.get(c).get())))
                .collect(),
            total: Change::new(base.total().get(), test.total().get()),
        }
    }

    // ── Diversion ─────────────────────────────────────────────────────────

    /// Test-minus-base trips per traveler and mode group.  Travelers found
    /// in only one scenario count as making no trips in the other.
    pub fn trip_mode_diffs(&self, unit: TravelUnit) -> CompareResult<FxHashMap<String, ModeDiffs>> {
        let mut diffs: FxHashMap<String, ModeDiffs> = FxHashMap::default();
        for (dataset, sign) in [(self.base, -1.0), (self.test, 1.0)] {
            for row in dataset.traveler_trips(unit)? {
                diffs.entry(row.traveler).or_default().add(row.mode, sign * row.trips.get());
            }
        }
        Ok(diffs)
    }

    /// Auto trips diverted to drive-to-transit and eliminated, summed over
    /// travelers.
    pub fn auto_trips_affected(&self, unit: TravelUnit) -> CompareResult<AutoImpact> {
        let diffs = self.trip_mode_diffs(unit)?;
        let impact: AutoImpact = diffs.values().map(attribute_auto_change).sum();
        log::info!(
            "{unit:?}: {} travelers, {:.0} auto trips diverted, {:.0} eliminated",
            diffs.len(),
            impact.diverted,
            impact.eliminated,
        );
        Ok(impact)
    }
}

impl fmt::Display for Comparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[comparison: base {}; test {}]", self.base, self.test)
    }
}
