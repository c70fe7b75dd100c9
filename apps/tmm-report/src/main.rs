//! tmm-report — compare a base and a test CT-RAMP model run.
//!
//! Builds (or reopens) both scenario databases named in a TOML run file,
//! then logs table counts, mode share, new trips per mode group, transit
//! statistics, user-class changes and auto-trip diversion.  With
//! `export_dir` set, the per-zone and per-subzone person-trip tables are
//! written there as well.
//!
//! ```text
//! RUST_LOG=info tmm-report demos/run.toml
//! ```

mod config;


use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use tmm_compare::{Change, Comparison, TotalsChange};
use tmm_core::ModelTables;
use tmm_output::{CsvWriter, Geography, TripEnd};
use tmm_stats::ScenarioDataset;
use tmm_store::{ModeTable, ScenarioBuilder, TravelUnit};

use config::RunConfig;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(version, about = "Compare a base and a test travel-model run")]
struct Args {
    /// TOML run file naming the base and test scenarios.
    run: PathBuf,

    /// Load the two scenarios concurrently (overrides the run file).
    #[arg(long)]
    parallel: bool,

    /// Export directory (overrides the run file).
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Export file format.
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Parquet,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Csv     => "csv",
            Format::Parquet => "parquet",
        }
    }
}

const EXPORTS: [(Geography, TripEnd); 4] = [
    (Geography::Zone, TripEnd::Origin),
    (Geography::Zone, TripEnd::Destination),
    (Geography::Subzone, TripEnd::Origin),
    (Geography::Subzone, TripEnd::Destination),
];

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level.as_str())).init();

    let mut run = RunConfig::load(&args.run)?;
    run.parallel |= args.parallel;
    if args.export_dir.is_some() {
        run.export_dir = args.export_dir.clone();
    }

    let tables = ModelTables::cmap();
    let t0 = Instant::now();
    let (base, test) = load(&run, &tables)?;
    log::info!("loaded {base} and {test} in {:.1}s", t0.elapsed().as_secs_f64());

    report_counts(&base);
    report_counts(&test);

    let cmp = Comparison::new(&base, &test);
    log::info!("{cmp}");
    report_mode_share(&cmp)?;
    report_new_trips(&cmp)?;
    report_transit(&cmp);
    report_classes(&cmp);
    for unit in [TravelUnit::Trips, TravelUnit::PersonTrips] {
        let impact = cmp.auto_trips_affected(unit)?;
        log::info!("{unit:?}: diverted {:.0}, eliminated {:.0}", impact.diverted, impact.eliminated);
    }

    if let Some(dir) = &run.export_dir {
        export(&cmp, dir, args.format)?;
    }
    Ok(())
}

fn load(run: &RunConfig, tables: &ModelTables) -> Result<(ScenarioDataset, ScenarioDataset)> {
    if run.parallel {
        if !cfg!(feature = "parallel") {
            log::warn!("built without the `parallel` feature; loading scenarios one at a time");
        }
        return Ok(tmm_compare::load_pair(run.base.clone(), run.test.clone(), tables)?);
    }
    let base = ScenarioDataset::from_builder(ScenarioBuilder::new(run.base.clone(), tables.clone()))?;
    let test = ScenarioDataset::from_builder(ScenarioBuilder::new(run.test.clone(), tables.clone()))?;
    Ok((base, test))
}

// ── Summaries ─────────────────────────────────────────────────────────────────

fn report_counts(ds: &ScenarioDataset) {
    let c = ds.counts();
    log::info!("{ds}");
    log::info!("  households   {}", c.households);
    log::info!("  people       {}", c.people);
    log::info!("  tours        {} ({} individual, {} joint)", c.tours, c.tours_indiv, c.tours_joint);
    log::info!("  person-tours {}", c.person_tours);
    log::info!("  trips        {} ({} individual, {} joint)", c.trips, c.trips_indiv, c.trips_joint);
    log::info!("  person-trips {}", c.person_trips);
    log::info!("  transit segments {}", c.transit_segments.0);
}

fn report_mode_share(cmp: &Comparison<'_>) -> Result<()> {
    for table in [ModeTable::Trips, ModeTable::Tours] {
        log::info!("{} mode share (base → test)", table.name());
        for (mode, change) in cmp.mode_share_change(table)? {
            log::info!("  {:<32} {}", mode.description(), shares(change));
        }
        for (group, change) in cmp.grouped_mode_share_change(table)? {
            log::info!("  {:<32} {}", group.label(), shares(change));
        }
    }
    Ok(())
}

fn report_new_trips(cmp: &Comparison<'_>) -> Result<()> {
    let table = ModeTable::Trips;
    log::info!("new trips (test − base)");
    log::info!("  all                {}", counts(cmp.new_all(table)?));
    log::info!("  auto               {}", counts(cmp.new_auto(table)?));
    log::info!("  drive-to-transit   {}", counts(cmp.new_dtt(table)?));
    log::info!("  walk-to-transit    {}", counts(cmp.new_wtt(table)?));
    log::info!("  other              {}", counts(cmp.new_other(table)?));
    Ok(())
}

fn report_transit(cmp: &Comparison<'_>) {
    let change = cmp.transit_stats_change();
    log::info!("transit (base → test)");
    log_totals("all transit", &change.total);
    for m in &change.by_mode {
        log_totals(&format!("{} {}", m.code, m.description), &m.change);
    }
}

fn log_totals(label: &str, t: &TotalsChange) {
    log::info!("  {label}");
    log::info!("    boardings       {}", counts(t.boardings));
    log::info!("    passenger-miles {}", counts(t.pass_miles));
    log::info!("    passenger-hours {}", counts(t.pass_hours));
}

fn report_classes(cmp: &Comparison<'_>) {
    let change = cmp.ptrips_by_class_change();
    log::info!("transit person-trips by user class (base → test)");
    for (class, c) in &change.by_class {
        log::info!("  class {class}  {}", counts(*c));
    }
    log::info!("  total    {}", counts(change.total));
}

fn shares(c: Change) -> String {
    format!("{:6.2}% → {:6.2}% ({:+.2} pts)", c.base * 100.0, c.test * 100.0, c.diff() * 100.0)
}

fn counts(c: Change) -> String {
    match c.percent() {
        Ok(p)  => format!("{:.0} → {:.0} ({:+.0}, {:+.1}%)", c.base, c.test, c.diff(), p * 100.0),
        Err(_) => format!("{:.0} → {:.0} ({:+.0})", c.base, c.test, c.diff()),
    }
}

// ── Export ────────────────────────────────────────────────────────────────────

fn export(cmp: &Comparison<'_>, dir: &Path, format: Format) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    for (geography, end) in EXPORTS {
        let path = export_path(dir, geography, end, format);
        let rows = match format {
            Format::Csv => {
                let mut w = CsvWriter::new(&path, geography, end)?;
                cmp.export_person_trips(&mut w, geography, end)?
            }
            Format::Parquet => export_parquet(cmp, &path, geography, end)?,
        };
        log::info!("wrote {rows} rows to {}", path.display());
    }
    Ok(())
}

fn export_path(dir: &Path, geography: Geography, end: TripEnd, format: Format) -> PathBuf {
    dir.join(format!("ptrips_uclass_{}.{}", tmm_output::id_column(geography, end), format.extension()))
}

#[cfg(feature = "parquet")]
fn export_parquet(cmp: &Comparison<'_>, path: &Path, geography: Geography, end: TripEnd) -> Result<usize> {
    let mut w = tmm_output::ParquetWriter::new(path, geography, end)?;
    Ok(cmp.export_person_trips(&mut w, geography, end)?)
}

#[cfg(not(feature = "parquet"))]
fn export_parquet(_: &Comparison<'_>, _: &Path, _: Geography, _: TripEnd) -> Result<usize> {
    anyhow::bail!("parquet export needs the `parquet` feature")
}
