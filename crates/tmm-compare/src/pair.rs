//! Loading a base and a test scenario together.
//!
//! The two scenarios share no state, so with the `parallel` feature they
//! are built on Rayon's thread pool.  Within each scenario the build stages
//! still run strictly in order.

use tmm_core::ModelTables;
use tmm_stats::{ScenarioDataset, StatsResult};
use tmm_store::{ScenarioBuilder, ScenarioConfig};

use crate::CompareResult;

/// Build (or reopen) both scenarios from their default sources.
pub fn load_pair(
    base:   ScenarioConfig,
    test:   ScenarioConfig,
    tables: &ModelTables,
) -> CompareResult<(ScenarioDataset, ScenarioDataset)> {
    load_pair_with(
        ScenarioBuilder::new(base, tables.clone()),
        ScenarioBuilder::new(test, tables.clone()),
    )
}

/// Build both scenarios through configured builders.
pub fn load_pair_with(
    base: ScenarioBuilder,
    test: ScenarioBuilder,
) -> CompareResult<(ScenarioDataset, ScenarioDataset)> {
    log::info!("loading base {} and test {}", base.config().name, test.config().name);
    let (base, test) = join(base, test);
    Ok((base?, test?))
}

#[cfg(not(feature = "parallel"))]
fn join(
    base: ScenarioBuilder,
    test: ScenarioBuilder,
) -> (StatsResult<ScenarioDataset>, StatsResult<ScenarioDataset>) {
    (ScenarioDataset::from_builder(base), ScenarioDataset::from_builder(test))
}

#[cfg(feature = "parallel")]
fn join(
    base: ScenarioBuilder,
    test: ScenarioBuilder,
) -> (StatsResult<ScenarioDataset>, StatsResult<ScenarioDataset>) {
    rayon::join(
        move || ScenarioDataset::from_builder(base),
        move || ScenarioDataset::from_builder(test),
    )
}
