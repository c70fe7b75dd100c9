//! Staged scenario build pipeline.

use tmm_core::ModelTables;
use tmm_load::{
    CsvAssignmentSource, DriveCalculator, LoadError, LoadResult, PeopleIndex, TourIndex,
    TransitAssignmentSource, load_transit_segments, loader, person_trips,
};
use tmm_skim::{CsvSkimSource, SkimSet, SkimSource, TapZones};

use crate::config::{DbLocation, ScenarioConfig};
use crate::query::{ModeTable, Table};
use crate::{ScenarioStore, StoreError, StoreResult};

/// Builds (or reopens) the store for one scenario.
///
/// # Stages
///
/// Households, people, tours (with person-tours), trips (with person-trips),
/// transit segments.  Each stage is one transaction and must complete
/// before the next starts: person-trips need the tour and people indexes the
/// earlier stages fill.  The skim set is loaded right before the trip stage
/// and dropped right after it.
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                        |
/// |------------------------|------------------------------------------------|
/// | `.skims(s)`            | `CsvSkimSource` over `config.skim_dir()`       |
/// | `.assignment(s)`       | `CsvAssignmentSource` over `config.transit_dir()` |
/// | `.taps(t)`             | read from `config.tap_attributes_csv()`        |
///
/// # Example
///
/// ```rust,ignore
/// let config = ScenarioConfig::load(Path::new("base.toml"))?;
/// let store = ScenarioBuilder::new(config, ModelTables::cmap()).build()?;
/// ```
pub struct ScenarioBuilder {
    config:     ScenarioConfig,
    tables:     ModelTables,
    skims:      Option<Box<dyn SkimSource + Send>>,
    assignment: Option<Box<dyn TransitAssignmentSource + Send>>,
    taps:       Option<TapZones>,
}

impl ScenarioBuilder {
    pub fn new(config: ScenarioConfig, tables: ModelTables) -> Self {
        Self { config, tables, skims: None, assignment: None, taps: None }
    }

    /// Supply the skim matrices instead of reading the skim directory.
    pub fn skims(mut self, source: impl SkimSource + Send + 'static) -> Self {
        self.skims = Some(Box::new(source));
        self
    }

    /// Supply transit assignment results instead of reading the transit
    /// directory.
    pub fn assignment(mut self, source: impl TransitAssignmentSource + Send + 'static) -> Self {
        self.assignment = Some(Box::new(source));
        self
    }

    /// Supply the TAP → zone table instead of reading `tap_attributes.csv`.
    pub fn taps(mut self, taps: TapZones) -> Self {
        self.taps = Some(taps);
        self
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn tables(&self) -> &ModelTables {
        &self.tables
    }

    /// Build into a fresh database, or reopen the existing one when
    /// `config.rebuild` is false.
    pub fn build(self) -> StoreResult<ScenarioStore> {
        let location = self.config.db_location();
        if !self.config.rebuild {
            return match &location {
                DbLocation::File(path) => {
                    log::info!("{}: reusing {}", self.config.name, path.display());
                    ScenarioStore::open_existing(path)
                }
                DbLocation::Memory => Err(StoreError::NotBuilt(format!("{} (in memory)", self.config.name))),
            };
        }

        let Self { config, tables, skims, assignment, taps } = self;
        log::info!("{}: building scenario database", config.name);
        let store = ScenarioStore::create(&location)?;

        load_households(&store, &config)?;
        let people = load_people(&store, &config)?;
        let tours = load_tours(&store, &config, &tables, &people)?;

        {
            let taps = match taps {
                Some(t) => t,
                None => TapZones::load_csv(&config.tap_attributes_csv())?,
            };
            let mut source = skims.unwrap_or_else(|| {
                Box::new(CsvSkimSource::new(config.skim_dir())) as Box<dyn SkimSource + Send>
            });
            let skim_set = SkimSet::load(source.as_mut(), &tables.matrices)?;
            load_trips(&store, &config, &tables, &skim_set, &taps, &tours, &people)?;
            log::debug!("{}: releasing skim matrices", config.name);
        }

        let mut source = assignment.unwrap_or_else(|| {
            Box::new(CsvAssignmentSource::new(config.transit_dir()))
                as Box<dyn TransitAssignmentSource + Send>
        });
        load_segments(&store, source.as_mut(), &tables)?;

        store.mark_built()?;
        store.checkpoint()?;
        log::info!("{}: build complete", config.name);
        Ok(store)
    }
}

// ── Stages ────────────────────────────────────────────────────────────────────

/// Attach the source path to any row error.
fn in_file<T>(path: &std::path::Path) -> impl Fn(LoadResult<T>) -> LoadResult<T> + '_ {
    move |row| row.map_err(|e| e.in_file(path))
}

fn load_households(store: &ScenarioStore, config: &ScenarioConfig) -> StoreResult<()> {
    let path = config.households_csv();
    let w = store.writer()?;
    for h in loader::households(loader::open(&path)?).map_err(|e| e.in_file(&path))?.map(in_file(&path)) {
        w.household(&h?)?;
    }
    w.commit()?;
    log::info!("{}: {} households", config.name, store.count(Table::Households)?.0);
    Ok(())
}

fn load_people(store: &ScenarioStore, config: &ScenarioConfig) -> StoreResult<PeopleIndex> {
    let path = config.people_csv();
    let mut index = PeopleIndex::new();
    let w = store.writer()?;
    for p in loader::people(loader::open(&path)?).map_err(|e| e.in_file(&path))?.map(in_file(&path)) {
        let p = p?;
        w.person(&p)?;
        index.insert(&p);
    }
    w.commit()?;
    log::info!("{}: {} people", config.name, index.len());
    Ok(index)
}

/// Every participant must already be a loaded person.
fn load_tours(
    store:  &ScenarioStore,
    config: &ScenarioConfig,
    tables: &ModelTables,
    people: &PeopleIndex,
) -> StoreResult<TourIndex> {
    let mut index = TourIndex::new();
    let w = store.writer()?;
    for is_joint in [false, true] {
        let path = config.tours_csv(is_joint);
        let rows = loader::tours(loader::open(&path)?, is_joint, &tables.periods)
            .map_err(|e| e.in_file(&path))?;
        for t in rows.map(in_file(&path)) {
            let t = t?;
            w.tour(&t)?;
            for pt in t.person_tours() {
                if !people.contains(&pt.person_id) {
                    return Err(LoadError::UnknownPerson(pt.person_id).in_file(&path).into());
                }
                w.person_tour(&pt)?;
            }
            index.insert(&t);
        }
    }
    w.commit()?;
    log::info!(
        "{}: {} tours ({} joint), {} person-tours",
        config.name,
        index.len(),
        store.count_joint(ModeTable::Tours, true)?.0,
        store.count(Table::PersonTours)?.0,
    );
    Ok(index)
}

fn load_trips(
    store:  &ScenarioStore,
    config: &ScenarioConfig,
    tables: &ModelTables,
    skims:  &SkimSet,
    taps:   &TapZones,
    tours:  &TourIndex,
    people: &PeopleIndex,
) -> StoreResult<()> {
    let drive = DriveCalculator::new(skims, taps);
    let w = store.writer()?;
    for is_joint in [false, true] {
        let path = config.trips_csv(is_joint);
        let rows = loader::trips(loader::open(&path)?, is_joint, &tables.periods, &drive)
            .map_err(|e| e.in_file(&path))?;
        for t in rows.map(in_file(&path)) {
            let t = t?;
            w.trip(&t)?;
            for pt in person_trips(&t, tours, people).map_err(|e: LoadError| e.in_file(&path))? {
                w.person_trip(&pt)?;
            }
        }
    }
    w.commit()?;
    log::info!(
        "{}: {} trips ({} joint), {} person-trips",
        config.name,
        store.count(Table::Trips)?.0,
        store.count_joint(ModeTable::Trips, true)?.0,
        store.count(Table::PersonTrips)?.0,
    );
    Ok(())
}

fn load_segments(
    store:  &ScenarioStore,
    source: &mut (dyn TransitAssignmentSource + Send),
    tables: &ModelTables,
) -> StoreResult<()> {
    let segments = load_transit_segments(source, tables)?;
    let w = store.writer()?;
    for s in &segments {
        w.transit_segment(s)?;
    }
    w.commit()?;
    Ok(())
}
