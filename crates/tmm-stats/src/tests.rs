//! Unit tests for tmm-stats.

use std::path::Path;

use tmm_core::{ModelTables, SampleRate};
use tmm_store::fixture::SyntheticRun;

use crate::{ScenarioDataset, StatsResult};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// hh 1: one auto commuter and one walk-to-transit student (work walk
/// class 1).  hh 2: a three-person drive-to-transit shopping tour (non-work
/// pnr 2, knr 3) and one walk trip.
fn standard_run() -> SyntheticRun {
    SyntheticRun::new()
        .household(1, 2, [1, 2, 3], [2, 1, 1])
        .household(2, 3, [3, 3, 3], [1, 2, 3])
        .tour(1, 1, 0, "work", "mandatory", &[(false, -1, 1, 3, 1), (true, -1, 3, 1, 1)])
        .tour(1, 2, 0, "school", "mandatory", &[(false, -1, 1, 2, 9), (true, -1, 2, 1, 9)])
        .joint_tour(2, &[1, 2, 3], 0, "shop", &[(false, -1, 1, 3, 11), (true, -1, 3, 1, 11)])
        .tour(2, 1, 1, "work", "mandatory", &[(false, 0, 1, 2, 7)])
}

/// A dataset over `run` at a 50 % sample, so every unsampled count is
/// twice the raw one.
fn dataset(run: &SyntheticRun, root: &Path) -> StatsResult<ScenarioDataset> {
    let store = run.build("base", root, 1.0)?;
    ScenarioDataset::from_store("base", SampleRate::new(0.5).unwrap(), ModelTables::cmap(), store)
}

#[cfg(test)]
mod counts {
    use approx::assert_relative_eq;
    use tmm_core::RawCount;

    use super::*;

    #[test]
    fn table_counts_are_unsampled() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let c = ds.counts();
        assert_relative_eq!(c.households.get(), 4.0);
        assert_relative_eq!(c.people.get(), 10.0);
        assert_relative_eq!(c.tours_indiv.get(), 6.0);
        assert_relative_eq!(c.tours_joint.get(), 2.0);
        assert_relative_eq!(c.tours.get(), 8.0);
        assert_relative_eq!(c.person_tours.get(), 12.0);
        assert_relative_eq!(c.trips_indiv.get(), 10.0);
        assert_relative_eq!(c.trips_joint.get(), 4.0);
        assert_relative_eq!(c.trips.get(), 14.0);
        assert_relative_eq!(c.person_trips.get(), 22.0);
        assert_eq!(c.transit_segments, RawCount(24));
    }

    #[test]
    fn unsampling_is_linear() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let one = ds.unsample(RawCount(7));
        let two = ds.unsample(RawCount(14));
        assert_relative_eq!(two.get(), 2.0 * one.get());
        assert_relative_eq!(one.get(), 7.0 / ds.sample_rate().get());
    }

    #[test]
    fn default_rate_applies_through_builder() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let run = standard_run();
        run.write(dir.path()).unwrap();
        let tables = ModelTables::cmap();
        let builder = tmm_store::ScenarioBuilder::new(tmm_store::ScenarioConfig::new("b", dir.path()), tables.clone())
            .skims(tmm_store::fixture::skims())
            .assignment(tmm_store::fixture::assignment(&tables, 1.0));
        let ds = ScenarioDataset::from_builder(builder).unwrap();
        assert_eq!(ds.name(), "b");
        assert_relative_eq!(ds.counts().households.get(), 40.0);
        assert_eq!(ds.to_string(), "[scenario b (5% sample)]");
    }
}

#[cfg(test)]
mod share {
    use approx::assert_relative_eq;
    use tmm_core::{Mode, ModeGroup, Unsampled};
    use tmm_store::ModeTable;

    use super::*;
    use crate::{ModeShare, StatsError};

    #[test]
    fn trip_share_closes_to_one() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let share = ds.mode_share(ModeTable::Trips).unwrap();
        assert_relative_eq!(share.total(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(share.get(Mode::DriveAloneFree), 2.0 / 7.0);
        assert_relative_eq!(share.get(Mode::Walk), 1.0 / 7.0);
        assert_eq!(share.get(Mode::Taxi), 0.0);
        assert_eq!(share.iter().count(), 14);
    }

    #[test]
    fn grouped_share() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let share = ds.mode_share(ModeTable::Trips).unwrap();
        let grouped = share.grouped();
        assert_eq!(grouped.len(), 4);
        assert_eq!(grouped[0].0, ModeGroup::Auto);
        assert_relative_eq!(share.group(ModeGroup::Auto), 2.0 / 7.0);
        assert_relative_eq!(share.group(ModeGroup::DriveTransit), 2.0 / 7.0);
        assert_relative_eq!(share.group(ModeGroup::WalkTransit), 2.0 / 7.0);
        assert_relative_eq!(share.group(ModeGroup::Other), 1.0 / 7.0);
        let sum: f64 = grouped.iter().map(|(_, s)| s).sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn tour_share() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let share = ds.mode_share(ModeTable::Tours).unwrap();
        for mode in [Mode::DriveAloneFree, Mode::WalkLocalTransit, Mode::DriveLocalTransit, Mode::Walk] {
            assert_relative_eq!(share.get(mode), 0.25);
        }
    }

    #[test]
    fn empty_table_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let run = SyntheticRun::new().household(1, 1, [1, 1, 1], [1, 1, 1]);
        let ds = dataset(&run, dir.path()).unwrap();
        assert!(matches!(ds.mode_share(ModeTable::Trips), Err(StatsError::EmptyTable("Trips"))));
        assert!(matches!(ds.mode_share(ModeTable::Tours), Err(StatsError::EmptyTable("Tours"))));
    }

    #[test]
    fn share_is_independent_of_sample_rate() {
        let counts = [(Mode::Walk, Unsampled(3.0)), (Mode::Bike, Unsampled(1.0))];
        let scaled = [(Mode::Walk, Unsampled(60.0)), (Mode::Bike, Unsampled(20.0))];
        assert_eq!(
            ModeShare::from_counts("Trips", &counts).unwrap(),
            ModeShare::from_counts("Trips", &scaled).unwrap()
        );
    }

    #[test]
    fn count_modes_sums_selected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let transit = ds
            .count_modes(ModeTable::Trips, &[Mode::WalkLocalTransit, Mode::DriveLocalTransit])
            .unwrap();
        assert_relative_eq!(transit.get(), 8.0);
    }
}

#[cfg(test)]
mod transit {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{TransitStats, TransitTotals};

    #[test]
    fn grouped_totals() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let total = ds.transit_stats().total();
        assert_relative_eq!(total.boardings, 360.0);
        assert_relative_eq!(total.pass_miles, 1600.0 + 21760.0);
        assert_relative_eq!(total.pass_hours, 80.0 + 464.0);
    }

    #[test]
    fn every_configured_sub_mode_is_listed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let stats = ds.transit_stats();
        let by_mode = stats.by_mode();
        assert_eq!(by_mode.len(), 7);
        assert_eq!(by_mode[0].description, "CTA Bus (Express)");
        assert_eq!(stats.get("C"), Some(TransitTotals::default()));
        assert_relative_eq!(stats.get("M").unwrap().boardings, 280.0);
        assert_relative_eq!(stats.get("B").unwrap().pass_hours, 80.0);
        assert_eq!(stats.get("Z"), None);
    }

    #[test]
    fn unconfigured_letters_count_in_total_only() {
        let rows = vec![tmm_store::SubModeTotals {
            mode:       "X".into(),
            boardings:  5.0,
            pass_miles: 1.0,
            pass_hours: 2.0,
        }];
        let stats = TransitStats::from_totals(&rows, &ModelTables::cmap());
        assert_relative_eq!(stats.total().boardings, 5.0);
        assert!(stats.by_mode().iter().all(|m| m.totals == TransitTotals::default()));
    }

    #[test]
    fn cached_stats_match_store() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let fresh = TransitStats::from_totals(&ds.store().transit_totals().unwrap(), ds.tables());
        assert_eq!(ds.transit_stats(), &fresh);
        assert!(std::ptr::eq(ds.transit_stats(), ds.transit_stats()));
    }

    #[test]
    fn transit_totals_are_not_unsampled() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let stations = ds.station_boardings().unwrap();
        let total: f64 = stations.iter().map(|(_, b)| b).sum();
        assert_relative_eq!(total, 320.0);
    }
}

#[cfg(test)]
mod classes {
    use approx::assert_relative_eq;
    use tmm_core::Unsampled;
    use tmm_store::{Stratum, StratifyBy};

    use super::*;
    use crate::ClassTally;

    #[test]
    fn ptrips_by_class_unsampled() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let tally = ds.ptrips_by_class();
        assert_relative_eq!(tally.get(1).get(), 4.0);
        assert_relative_eq!(tally.get(2).get(), 0.0);
        assert_relative_eq!(tally.get(3).get(), 12.0);
        assert_relative_eq!(tally.total().get(), 16.0);
        assert_relative_eq!(tally.mean_class(), 2.5);
    }

    #[test]
    fn cached_tally_matches_store() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let mut fresh = ClassTally::default();
        for row in ds.store().ptrips_by_class(None).unwrap() {
            fresh.add(row.user_class, ds.unsample(row.count)).unwrap();
        }
        assert_eq!(ds.ptrips_by_class(), &fresh);
    }

    #[test]
    fn mean_class_of_nothing_is_zero() {
        assert_eq!(ClassTally::default().mean_class(), 0.0);
        assert_eq!(ClassTally::default().get(7), Unsampled::ZERO);
    }

    #[test]
    fn stratified_by_origin_zone() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let by_zone = ds.ptrips_by_class_stratified(StratifyBy::TripOriginZone).unwrap();
        assert_eq!(by_zone.len(), 3);
        let z1 = by_zone.get_id(1).unwrap();
        assert_relative_eq!(z1.get(1).get(), 2.0);
        assert_relative_eq!(z1.get(3).get(), 6.0);
        assert_relative_eq!(by_zone.get_id(2).unwrap().get(1).get(), 2.0);
        assert_relative_eq!(by_zone.get_id(3).unwrap().get(3).get(), 6.0);
        assert!(by_zone.get_id(4).is_none());
    }

    #[test]
    fn strata_without_transit_report_zero() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let run = standard_run().household(3, 1, [1, 1, 1], [1, 1, 1]);
        let ds = dataset(&run, dir.path()).unwrap();
        let by_size = ds.ptrips_by_class_stratified(StratifyBy::HouseholdSize).unwrap();
        assert_eq!(
            by_size.iter().map(|(s, _)| s.clone()).collect::<Vec<_>>(),
            vec![Stratum::Int(1), Stratum::Int(2), Stratum::Int(3)]
        );
        assert_eq!(by_size.get(&Stratum::Int(1)).unwrap().total(), Unsampled::ZERO);
        assert_relative_eq!(by_size.get(&Stratum::Int(2)).unwrap().get(1).get(), 4.0);
        assert_relative_eq!(by_size.get(&Stratum::Int(3)).unwrap().get(3).get(), 12.0);
    }
}

#[cfg(test)]
mod quantile {
    use tmm_core::NodeNumber;

    use super::*;
    use crate::{Interval, StatsError, quantile_bins, quantiles};

    #[test]
    fn equal_count_bins() {
        let bins = quantile_bins(&[40.0, 10.0, 30.0, 20.0], 2).unwrap();
        assert_eq!(
            bins,
            vec![
                Interval { lower: 10.0, upper: 25.0, lower_closed: true },
                Interval { lower: 25.0, upper: 40.0, lower_closed: false },
            ]
        );
        assert_eq!(bins[0].to_string(), "[10, 25]");
        assert_eq!(bins[1].to_string(), "(25, 40]");
    }

    #[test]
    fn labels_are_zero_based_and_edge_inclusive() {
        let values = [("a", 10.0), ("b", 20.0), ("c", 30.0), ("d", 40.0), ("e", 25.0)];
        let q = quantiles(&values, 2).unwrap();
        // Edges: 10, 25, 40.
        assert_eq!(q.labels["a"], 0);
        assert_eq!(q.labels["b"], 0);
        assert_eq!(q.labels["e"], 0);
        assert_eq!(q.labels["c"], 1);
        assert_eq!(q.labels["d"], 1);
    }

    #[test]
    fn bad_requests() {
        assert!(matches!(quantile_bins(&[1.0, 2.0], 0), Err(StatsError::ZeroBins)));
        assert!(matches!(
            quantile_bins(&[1.0, 2.0, 3.0], 4),
            Err(StatsError::TooFewValues { values: 3, bins: 4 })
        ));
        assert!(matches!(
            quantile_bins(&[5.0, 5.0, 5.0, 10.0], 2),
            Err(StatsError::DuplicateQuantileEdges(e)) if e == 5.0
        ));
    }

    #[test]
    fn station_quantiles() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let q = quantiles(&ds.station_boardings().unwrap(), 2).unwrap();
        assert_eq!(q.bins[0].upper, 160.0);
        assert_eq!(q.labels[&NodeNumber(1)], 0);
        assert_eq!(q.labels[&NodeNumber(3)], 1);
    }
}

#[cfg(test)]
mod travelers {
    use approx::assert_relative_eq;
    use tmm_core::Mode;
    use tmm_store::TravelUnit;

    use super::*;

    #[test]
    fn traveler_trips_are_unsampled() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let ds = dataset(&standard_run(), dir.path()).unwrap();
        let trips = ds.traveler_trips(TravelUnit::Trips).unwrap();
        let joint = trips.iter().find(|t| t.traveler == "2-J").unwrap();
        assert_eq!(joint.mode, Mode::DriveLocalTransit);
        assert_relative_eq!(joint.trips.get(), 4.0);

        let ptrips = ds.traveler_trips(TravelUnit::PersonTrips).unwrap();
        let total: f64 = ptrips.iter().map(|t| t.trips.get()).sum();
        assert_relative_eq!(total, 22.0);
    }
}
