//! The scenario dataset: a built store plus its sample rate and lookup
//! tables.

use tmm_core::{Mode, ModelTables, NodeNumber, RawCount, SampleRate, Unsampled};
use tmm_store::{
    ModeTable, ScenarioBuilder, ScenarioConfig, ScenarioStore, StratifyBy, Table, TravelUnit,
};

use crate::{ClassTally, ModeShare, StatsResult, StratifiedClasses, TransitStats};

/// Row counts read once when the dataset opens.  Everything but
/// `transit_segments` is unsampled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableCounts {
    pub households:       Unsampled,
    pub people:           Unsampled,
    pub tours_indiv:      Unsampled,
    pub tours_joint:      Unsampled,
    pub tours:            Unsampled,
    pub person_tours:     Unsampled,
    pub trips_indiv:      Unsampled,
    pub trips_joint:      Unsampled,
    pub trips:            Unsampled,
    pub person_trips:     Unsampled,
    pub transit_segments: RawCount,
}

impl TableCounts {
    fn read(store: &ScenarioStore, rate: SampleRate) -> StatsResult<Self> {
        let u = |n: RawCount| n.unsample(rate);
        let tours_indiv = u(store.count_joint(ModeTable::Tours, false)?);
        let tours_joint = u(store.count_joint(ModeTable::Tours, true)?);
        let trips_indiv = u(store.count_joint(ModeTable::Trips, false)?);
        let trips_joint = u(store.count_joint(ModeTable::Trips, true)?);
        Ok(Self {
            households:       u(store.count(Table::Households)?),
            people:           u(store.count(Table::People)?),
            tours_indiv,
            tours_joint,
            tours:            tours_indiv + tours_joint,
            person_tours:     u(store.count(Table::PersonTours)?),
            trips_indiv,
            trips_joint,
            trips:            trips_indiv + trips_joint,
            person_trips:     u(store.count(Table::PersonTrips)?),
            transit_segments: store.count(Table::TransitSegs)?,
        })
    }
}

/// Trips of one mode made by one traveler, unsampled.
#[derive(Clone, Debug, PartialEq)]
pub struct TravelerTrips {
    pub traveler: String,
    pub mode:     Mode,
    pub trips:    Unsampled,
}

/// One scenario, ready for aggregation.
///
/// Every count leaving a dataset is unsampled with the scenario's own rate;
/// raw counts stay behind [`store`][Self::store].  The trip mode share,
/// transit stats and person-trips by user class are computed once when the
/// dataset opens and kept for its lifetime.
pub struct ScenarioDataset {
    name:       String,
    rate:       SampleRate,
    tables:     ModelTables,
    store:      ScenarioStore,
    counts:     TableCounts,
    trip_share: Option<ModeShare>,
    transit:    TransitStats,
    classes:    ClassTally,
}

impl ScenarioDataset {
    /// Build (or reopen) the scenario described by `config` from its
    /// default sources.
    pub fn open(config: ScenarioConfig, tables: ModelTables) -> StatsResult<Self> {
        Self::from_builder(ScenarioBuilder::new(config, tables))
    }

    /// Build through a configured builder (custom skim or assignment
    /// sources).
    pub fn from_builder(builder: ScenarioBuilder) -> StatsResult<Self> {
        let name = builder.config().name.clone();
        let rate = builder.config().sample_rate()?;
        let tables = builder.tables().clone();
        let store = builder.build()?;
        Self::from_store(name, rate, tables, store)
    }

    pub fn from_store(
        name:   impl Into<String>,
        rate:   SampleRate,
        tables: ModelTables,
        store:  ScenarioStore,
    ) -> StatsResult<Self> {
        let name = name.into();
        let counts = TableCounts::read(&store, rate)?;
        log::info!(
            "{name}: {:.0} households, {:.0} people, {:.0} tours, {:.0} trips, {:.0} person-trips, {} transit segments",
            counts.households.get(),
            counts.people.get(),
            counts.tours.get(),
            counts.trips.get(),
            counts.person_trips.get(),
            counts.transit_segments.0,
        );

        let transit = TransitStats::from_totals(&store.transit_totals()?, &tables);
        let classes = class_tally(&store, rate)?;
        let mut dataset = Self { name, rate, tables, store, counts, trip_share: None, transit, classes };
        dataset.trip_share = match dataset.compute_share(ModeTable::Trips) {
            Ok(share) => Some(share),
            Err(crate::StatsError::EmptyTable(_)) => {
                log::warn!("{}: no trips; trip mode share unavailable", dataset.name);
                None
            }
            Err(e) => return Err(e),
        };
        Ok(dataset)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sample_rate(&self) -> SampleRate {
        self.rate
    }

    pub fn tables(&self) -> &ModelTables {
        &self.tables
    }

    pub fn counts(&self) -> &TableCounts {
        &self.counts
    }

    /// The underlying store, for ad hoc queries.  Its counts are sampled.
    pub fn store(&self) -> &ScenarioStore {
        &self.store
    }

    #[inline]
    pub fn unsample(&self, n: RawCount) -> Unsampled {
        n.unsample(self.rate)
    }

    // ── Modes ─────────────────────────────────────────────────────────────

    /// Unsampled rows per mode, all 14 modes in code order.
    pub fn mode_counts(&self, table: ModeTable) -> StatsResult<Vec<(Mode, Unsampled)>> {
        Ok(self
            .store
            .mode_counts(table)?
            .into_iter()
            .map(|(m, n)| (m, self.unsample(n)))
            .collect())
    }

    /// Unsampled rows whose mode is in `modes`.
    pub fn count_modes(&self, table: ModeTable, modes: &[Mode]) -> StatsResult<Unsampled> {
        Ok(self
            .mode_counts(table)?
            .into_iter()
            .filter(|(m, _)| modes.contains(m))
            .map(|(_, n)| n)
            .sum())
    }

    /// Mode share of trips (cached) or tours.
    pub fn mode_share(&self, table: ModeTable) -> StatsResult<ModeShare> {
        match (table, &self.trip_share) {
            (ModeTable::Trips, Some(share)) => Ok(share.clone()),
            (ModeTable::Trips, None) => Err(crate::StatsError::EmptyTable(table.name())),
            (ModeTable::Tours, _) => self.compute_share(table),
        }
    }

    fn compute_share(&self, table: ModeTable) -> StatsResult<ModeShare> {
        ModeShare::from_counts(table.name(), &self.mode_counts(table)?)
    }

    /// Unsampled trips per traveler and mode.
    pub fn traveler_trips(&self, unit: TravelUnit) -> StatsResult<Vec<TravelerTrips>> {
        Ok(self
            .store
            .traveler_mode_counts(unit)?
            .into_iter()
            .map(|c| TravelerTrips { traveler: c.traveler, mode: c.mode, trips: self.unsample(c.count) })
            .collect())
    }

    // ── Transit ───────────────────────────────────────────────────────────

    pub fn transit_stats(&self) -> &TransitStats {
        &self.transit
    }

    /// Boardings per boarding node (stations).
    pub fn station_boardings(&self) -> StatsResult<Vec<(NodeNumber, f64)>> {
        Ok(self.store.boardings_by_node()?)
    }

    /// Boardings per transit line (vehicles).
    pub fn line_boardings(&self) -> StatsResult<Vec<(String, f64)>> {
        Ok(self.store.boardings_by_line()?)
    }

    // ── User classes ──────────────────────────────────────────────────────

    /// Transit person-trips per user class.
    pub fn ptrips_by_class(&self) -> &ClassTally {
        &self.classes
    }

    /// Transit person-trips per user class within each value of `by`.
    pub fn ptrips_by_class_stratified(&self, by: StratifyBy) -> StatsResult<StratifiedClasses> {
        let mut out = StratifiedClasses::new(by, self.store.strata(by)?);
        for row in self.store.ptrips_by_class(Some(by))? {
            let stratum = row.stratum.unwrap_or(tmm_store::Stratum::Missing);
            out.add(stratum, row.user_class, self.unsample(row.count))?;
        }
        Ok(out)
    }
}

fn class_tally(store: &ScenarioStore, rate: SampleRate) -> StatsResult<ClassTally> {
    let mut tally = ClassTally::default();
    for row in store.ptrips_by_class(None)? {
        tally.add(row.user_class, row.count.unsample(rate))?;
    }
    Ok(tally)
}

impl std::fmt::Display for ScenarioDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[scenario {} ({} sample)]", self.name, self.rate)
    }
}
