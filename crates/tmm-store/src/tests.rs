//! Unit tests for tmm-store.

use std::path::Path;

use crate::fixture::SyntheticRun;
use crate::{ScenarioStore, StoreResult};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Two households:
///
/// - hh 1 (2 people): person 1 drives to work and back, person 2 walks to
///   transit for school and back (work walk class 1).
/// - hh 2 (3 people): a joint shopping tour by drive-to-transit for all
///   three (non-work pnr 2, knr 3), plus one walk trip by person 1.
fn standard_run() -> SyntheticRun {
    SyntheticRun::new()
        .household(1, 2, [1, 2, 3], [2, 1, 1])
        .household(2, 3, [3, 3, 3], [1, 2, 3])
        .tour(1, 1, 0, "work", "mandatory", &[(false, -1, 1, 3, 1), (true, -1, 3, 1, 1)])
        .tour(1, 2, 0, "school", "mandatory", &[(false, -1, 1, 2, 9), (true, -1, 2, 1, 9)])
        .joint_tour(2, &[1, 2, 3], 0, "shop", &[(false, -1, 1, 3, 11), (true, -1, 3, 1, 11)])
        .tour(2, 1, 1, "work", "mandatory", &[(false, 0, 1, 2, 7)])
}

fn build_standard(root: &Path) -> StoreResult<ScenarioStore> {
    standard_run().build("base", root, 1.0)
}

#[cfg(test)]
mod config {
    use std::path::PathBuf;

    use crate::{DbLocation, ScenarioConfig, StoreError};

    #[test]
    fn defaults_apply() {
        let c = ScenarioConfig::from_toml_str("name = \"base\"\nroot = \"/runs/base\"\n").unwrap();
        assert_eq!(c.sample_rate, 0.05);
        assert!(c.rebuild);
        assert_eq!(c.db_location(), DbLocation::File(PathBuf::from("/runs/base/base.db")));
        assert_eq!(c.households_csv(), PathBuf::from("/runs/base/model/outputs/hhData_1.csv"));
        assert_eq!(c.tours_csv(true), PathBuf::from("/runs/base/model/outputs/jointTourData_1.csv"));
        assert_eq!(c.trips_csv(false), PathBuf::from("/runs/base/model/outputs/indivTripData_1.csv"));
        assert_eq!(c.tap_attributes_csv(), PathBuf::from("/runs/base/model/inputs/tap_attributes.csv"));
        assert_eq!(c.skim_dir(), PathBuf::from("/runs/base/model/skims"));
    }

    #[test]
    fn overrides_resolve_against_root() {
        let text = "name = \"test\"\nroot = \"/runs/t\"\nsample_rate = 0.1\ndb = \"out/t.db\"\nrebuild = false\nskim_dir = \"/shared/skims\"\ntransit_dir = \"assign\"\n";
        let c = ScenarioConfig::from_toml_str(text).unwrap();
        assert_eq!(c.sample_rate().unwrap().get(), 0.1);
        assert!(!c.rebuild);
        assert_eq!(c.db_location(), DbLocation::File(PathBuf::from("/runs/t/out/t.db")));
        assert_eq!(c.skim_dir(), PathBuf::from("/shared/skims"));
        assert_eq!(c.transit_dir(), PathBuf::from("/runs/t/assign"));
    }

    #[test]
    fn memory_database() {
        let c = ScenarioConfig::from_toml_str("name = \"m\"\nroot = \"/r\"\ndb = \"memory\"\n").unwrap();
        assert_eq!(c.db_location(), DbLocation::Memory);
        assert_eq!(ScenarioConfig::new("m", "/r").db_location(), DbLocation::Memory);
    }

    #[test]
    fn invalid_sample_rate_is_rejected() {
        let c = ScenarioConfig::from_toml_str("name = \"m\"\nroot = \"/r\"\nsample_rate = 0.0\n").unwrap();
        assert!(matches!(c.sample_rate(), Err(StoreError::Core(_))));
    }

    #[test]
    fn missing_name_is_a_config_error() {
        assert!(matches!(ScenarioConfig::from_toml_str("root = \"/r\"\n"), Err(StoreError::Config(_))));
    }
}

#[cfg(test)]
mod persistence {
    use tmm_core::ModelTables;

    use super::*;
    use crate::fixture::{assignment, skims};
    use crate::{DbLocation, ScenarioBuilder, ScenarioConfig, StoreError, Table};

    #[test]
    fn missing_file_is_not_built() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result = ScenarioStore::open_existing(&dir.path().join("nope.db"));
        assert!(matches!(result, Err(StoreError::NotBuilt(_))));
    }

    #[test]
    fn file_without_schema_is_not_built() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("empty.db");
        rusqlite::Connection::open(&path).unwrap().execute_batch("CREATE TABLE Households (hh_id INTEGER);").unwrap();
        assert!(matches!(ScenarioStore::open_existing(&path), Err(StoreError::NotBuilt(_))));
    }

    #[test]
    fn memory_scenario_cannot_be_reused() {
        let mut config = ScenarioConfig::new("m", "/nowhere");
        config.rebuild = false;
        let result = ScenarioBuilder::new(config, ModelTables::cmap()).build();
        assert!(matches!(result, Err(StoreError::NotBuilt(_))));
    }

    #[test]
    fn build_to_file_then_reopen() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        standard_run().write(root).unwrap();

        let tables = ModelTables::cmap();
        let mut config = ScenarioConfig::new("base", root);
        config.db = None;
        let built = ScenarioBuilder::new(config.clone(), tables.clone())
            .skims(skims())
            .assignment(assignment(&tables, 1.0))
            .build()
            .unwrap();
        let trips = built.count(Table::Trips).unwrap();
        drop(built);
        assert!(root.join("base.db").is_file());

        config.rebuild = false;
        let reopened = ScenarioBuilder::new(config, tables).build().unwrap();
        assert_eq!(reopened.count(Table::Trips).unwrap(), trips);
        assert_eq!(reopened.count(Table::TransitSegs).unwrap().0, 24);
    }

    #[test]
    fn failed_build_cannot_be_reopened() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        SyntheticRun::new()
            .household(1, 1, [1, 1, 1], [1, 1, 1])
            .tour(1, 1, 0, "work", "mandatory", &[(false, -1, 1, 3, 99)])
            .write(root)
            .unwrap();

        let tables = ModelTables::cmap();
        let mut config = ScenarioConfig::new("broken", root);
        config.db = None;
        let first = ScenarioBuilder::new(config.clone(), tables.clone())
            .skims(skims())
            .assignment(assignment(&tables, 1.0))
            .build();
        assert!(first.is_err());
        assert!(root.join("broken.db").is_file());

        config.rebuild = false;
        let reopened = ScenarioBuilder::new(config, tables).build();
        assert!(matches!(reopened, Err(StoreError::NotBuilt(_))));
    }

    #[test]
    fn tables_without_completion_mark_are_not_built() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("partial.db");
        drop(ScenarioStore::create(&DbLocation::File(path.clone())).unwrap());
        assert!(matches!(ScenarioStore::open_existing(&path), Err(StoreError::NotBuilt(_))));
    }

    #[test]
    fn rebuild_replaces_existing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        let tables = ModelTables::cmap();
        let mut config = ScenarioConfig::new("base", root);
        config.db = None;

        let build = |run: SyntheticRun| {
            run.write(root).unwrap();
            ScenarioBuilder::new(config.clone(), tables.clone())
                .skims(skims())
                .assignment(assignment(&tables, 1.0))
                .build()
                .unwrap()
        };

        drop(build(standard_run()));
        let second = build(SyntheticRun::new().household(9, 1, [1, 1, 1], [1, 1, 1]));
        assert_eq!(second.count(Table::Households).unwrap().0, 1);
        assert_eq!(second.count(Table::Trips).unwrap().0, 0);
    }
}

#[cfg(test)]
mod build {
    use approx::assert_relative_eq;
    use tmm_load::LoadError;

    use super::*;
    use crate::{ModeTable, StoreError, Table};

    #[test]
    fn table_counts() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = build_standard(dir.path()).unwrap();
        assert_eq!(store.count(Table::Households).unwrap().0, 2);
        assert_eq!(store.count(Table::People).unwrap().0, 5);
        assert_eq!(store.count(Table::Tours).unwrap().0, 4);
        assert_eq!(store.count_joint(ModeTable::Tours, true).unwrap().0, 1);
        assert_eq!(store.count(Table::PersonTours).unwrap().0, 6);
        assert_eq!(store.count(Table::Trips).unwrap().0, 7);
        assert_eq!(store.count_joint(ModeTable::Trips, false).unwrap().0, 5);
        assert_eq!(store.count(Table::PersonTrips).unwrap().0, 11);
        assert_eq!(store.count(Table::TransitSegs).unwrap().0, 24);
    }

    #[test]
    fn every_trip_resolves_to_one_tour() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = build_standard(dir.path()).unwrap();
        let orphans: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM Trips LEFT JOIN Tours ON Trips.tour_id = Tours.tour_id \
                 WHERE Tours.tour_id IS NULL",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn drive_metrics_are_stored() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = build_standard(dir.path()).unwrap();
        let (time, dist, speed): (f64, f64, f64) = store
            .connection()
            .query_row(
                "SELECT drive_time, drive_distance, drive_speed FROM Trips WHERE trip_id = '1-1-0-work-0-0'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_relative_eq!(time, 10.0);
        assert_relative_eq!(dist, 5.0);
        assert_relative_eq!(speed, 30.0);

        let walk_time: f64 = store
            .connection()
            .query_row("SELECT drive_time FROM Trips WHERE mode = 9 LIMIT 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(walk_time, 0.0);
    }

    #[test]
    fn unknown_participant_aborts_build() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let run = SyntheticRun::new()
            .household(3, 2, [1, 1, 1], [1, 1, 1])
            .joint_tour(3, &[1, 4], 0, "visit", &[(false, -1, 1, 2, 7)]);
        match run.build("bad", dir.path(), 1.0) {
            Err(StoreError::Load(LoadError::File { source, .. })) => {
                assert!(matches!(*source, LoadError::UnknownPerson(ref id) if id.as_str() == "3-4"));
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("build should fail"),
        }
    }

    #[test]
    fn tour_participant_missing_from_people_aborts_build() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let run = SyntheticRun::new()
            .household(1, 2, [1, 1, 1], [1, 1, 1])
            .tour(1, 7, 0, "work", "mandatory", &[(false, -1, 1, 3, 1)]);
        match run.build("bad", dir.path(), 1.0) {
            Err(StoreError::Load(LoadError::File { path, source })) => {
                assert!(path.ends_with("indivTourData_1.csv"));
                assert!(matches!(*source, LoadError::UnknownPerson(ref id) if id.as_str() == "1-7"));
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("build should fail"),
        }
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let store = ScenarioStore::create(&crate::DbLocation::Memory).unwrap();
        let on: bool = store
            .connection()
            .pragma_query_value(None, "foreign_keys", |r| r.get(0))
            .unwrap();
        assert!(on);

        let tour_without_household = store.connection().execute(
            "INSERT INTO Tours (tour_id, hh_id, participants, pers_num, is_joint, category, purpose, \
             sz_o, sz_d, tod_d, tod_a, mode) \
             VALUES ('9-1-0-work', 9, '1', '1', 0, 'mandatory', 'work', 109, 109, 2, 5, 1)",
            [],
        );
        assert!(matches!(tour_without_household, Err(rusqlite::Error::SqliteFailure(..))));

        let person_without_household = store.connection().execute(
            "INSERT INTO People (pers_id, hh_id, pers_num, age, gender, class_w_wtt, class_w_pnr, \
             class_w_knr, class_o_wtt, class_o_pnr, class_o_knr) \
             VALUES ('9-1', 9, 1, 30, 'm', 1, 1, 1, 1, 1, 1)",
            [],
        );
        assert!(person_without_household.is_err());
    }

    #[test]
    fn reopened_store_enforces_foreign_keys() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        standard_run().write(root).unwrap();
        let tables = tmm_core::ModelTables::cmap();
        let mut config = crate::ScenarioConfig::new("base", root);
        config.db = None;
        drop(
            crate::ScenarioBuilder::new(config, tables.clone())
                .skims(crate::fixture::skims())
                .assignment(crate::fixture::assignment(&tables, 1.0))
                .build()
                .unwrap(),
        );

        let store = ScenarioStore::open_existing(&root.join("base.db")).unwrap();
        let orphan = store.connection().execute(
            "INSERT INTO PersonTours (ptour_id, tour_id, hh_id, pers_id, mode) \
             VALUES ('x-1', 'no-such-tour', 1, '1-1', 1)",
            [],
        );
        assert!(orphan.is_err());
    }

    #[test]
    fn missing_source_file_is_reported_with_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        standard_run().write(dir.path()).unwrap();
        std::fs::remove_file(dir.path().join("model/outputs/personData_1.csv")).unwrap();
        let tables = tmm_core::ModelTables::cmap();
        let result = crate::ScenarioBuilder::new(crate::ScenarioConfig::new("x", dir.path()), tables)
            .build();
        match result {
            Err(StoreError::Load(LoadError::File { path, .. })) => assert!(path.ends_with("personData_1.csv")),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("build should fail"),
        }
    }
}

#[cfg(test)]
mod queries {
    use approx::assert_relative_eq;
    use tmm_core::{Mode, NodeNumber, RawCount};

    use super::*;
    use crate::{ModeTable, RealKey, Stratum, StratifyBy, TravelUnit};

    #[test]
    fn mode_counts_cover_all_modes() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = build_standard(dir.path()).unwrap();
        let trips = store.mode_counts(ModeTable::Trips).unwrap();
        assert_eq!(trips.len(), 14);
        assert_eq!(trips[0], (Mode::DriveAloneFree, RawCount(2)));
        assert_eq!(trips[6], (Mode::Walk, RawCount(1)));
        assert_eq!(trips[8], (Mode::WalkLocalTransit, RawCount(2)));
        assert_eq!(trips[10], (Mode::DriveLocalTransit, RawCount(2)));
        assert_eq!(trips[13], (Mode::SchoolBus, RawCount(0)));

        let tours = store.mode_counts(ModeTable::Tours).unwrap();
        let total: RawCount = tours.iter().map(|(_, n)| *n).sum();
        assert_eq!(total, RawCount(4));
    }

    #[test]
    fn transit_totals_by_sub_mode() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = build_standard(dir.path()).unwrap();
        let totals = store.transit_totals().unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].mode, "B");
        assert_relative_eq!(totals[0].boardings, 80.0);
        assert_relative_eq!(totals[0].pass_miles, 1600.0);
        assert_relative_eq!(totals[0].pass_hours, 80.0);
        assert_eq!(totals[1].mode, "M");
        assert_relative_eq!(totals[1].boardings, 280.0);
        assert_relative_eq!(totals[1].pass_miles, 21760.0);
        assert_relative_eq!(totals[1].pass_hours, 464.0);
    }

    #[test]
    fn boardings_exclude_non_boarding_segments() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = build_standard(dir.path()).unwrap();
        let by_node = store.boardings_by_node().unwrap();
        assert_eq!(by_node.len(), 2);
        assert_eq!(by_node[0].0, NodeNumber(1));
        assert_relative_eq!(by_node[0].1, 80.0);
        assert_eq!(by_node[1].0, NodeNumber(3));
        assert_relative_eq!(by_node[1].1, 240.0);

        let by_line = store.boardings_by_line().unwrap();
        assert_eq!(by_line[0].0, "b1");
        assert_relative_eq!(by_line[1].1, 240.0);
    }

    #[test]
    fn ptrips_by_class_unstratified() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = build_standard(dir.path()).unwrap();
        let counts = store.ptrips_by_class(None).unwrap();
        let got: Vec<_> = counts.iter().map(|c| (c.stratum.clone(), c.user_class, c.count.0)).collect();
        assert_eq!(got, vec![(None, 1, 2), (None, 3, 6)]);
    }

    #[test]
    fn ptrips_by_class_by_origin_zone() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = build_standard(dir.path()).unwrap();
        let counts = store.ptrips_by_class(Some(StratifyBy::TripOriginZone)).unwrap();
        let got: Vec<_> = counts
            .iter()
            .map(|c| (c.stratum.clone().unwrap(), c.user_class, c.count.0))
            .collect();
        assert_eq!(
            got,
            vec![
                (Stratum::Int(1), 1, 1),
                (Stratum::Int(1), 3, 3),
                (Stratum::Int(2), 1, 1),
                (Stratum::Int(3), 3, 3),
            ]
        );
    }

    #[test]
    fn ptrips_by_class_by_tour_category() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = build_standard(dir.path()).unwrap();
        let counts = store.ptrips_by_class(Some(StratifyBy::TourCategory)).unwrap();
        assert_eq!(counts[0].stratum, Some(Stratum::Text("joint".into())));
        assert_eq!(counts[0].count.0, 6);
        assert_eq!(counts[1].stratum, Some(Stratum::Text("mandatory".into())));
    }

    #[test]
    fn strata_list_distinct_values() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = build_standard(dir.path()).unwrap();
        assert_eq!(
            store.strata(StratifyBy::HouseholdSize).unwrap(),
            vec![Stratum::Int(2), Stratum::Int(3)]
        );
        assert_eq!(
            store.strata(StratifyBy::PersonGender).unwrap(),
            vec![Stratum::Text("f".into()), Stratum::Text("m".into())]
        );
        assert_eq!(StratifyBy::TripDestSubzone.to_string(), "Trips.sz_d");
    }

    #[test]
    fn real_strata_sort_numerically() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let mut stmt = conn
            .prepare("SELECT v FROM (SELECT 10.5 AS v UNION ALL SELECT 9.0 UNION ALL SELECT 3 UNION ALL SELECT 'x')")
            .unwrap();
        let mut strata: Vec<Stratum> = stmt
            .query_map([], |r| Ok(Stratum::from_sql(r.get_ref(0)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        strata.sort();
        assert_eq!(
            strata,
            vec![
                Stratum::Int(3),
                Stratum::Real(RealKey(9.0)),
                Stratum::Real(RealKey(10.5)),
                Stratum::Text("x".into()),
            ]
        );
        assert_eq!(Stratum::Real(RealKey(10.5)).to_string(), "10.5");
    }

    #[test]
    fn traveler_counts_by_unit() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = build_standard(dir.path()).unwrap();

        let trips = store.traveler_mode_counts(TravelUnit::Trips).unwrap();
        let joint: Vec<_> = trips.iter().filter(|t| t.traveler == "2-J").collect();
        assert_eq!(joint.len(), 1);
        assert_eq!((joint[0].mode, joint[0].count.0), (Mode::DriveLocalTransit, 2));

        let ptrips = store.traveler_mode_counts(TravelUnit::PersonTrips).unwrap();
        let p21: Vec<_> = ptrips.iter().filter(|t| t.traveler == "2-1").map(|t| (t.mode, t.count.0)).collect();
        assert_eq!(p21.len(), 2);
        assert!(p21.contains(&(Mode::Walk, 1)));
        assert!(p21.contains(&(Mode::DriveLocalTransit, 2)));
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let a = tempfile::tempdir().expect("create temp dir");
        let b = tempfile::tempdir().expect("create temp dir");
        let first = build_standard(a.path()).unwrap();
        let second = build_standard(b.path()).unwrap();
        assert_eq!(first.mode_counts(ModeTable::Trips).unwrap(), second.mode_counts(ModeTable::Trips).unwrap());
        assert_eq!(first.ptrips_by_class(None).unwrap(), second.ptrips_by_class(None).unwrap());
        assert_eq!(first.transit_totals().unwrap(), second.transit_totals().unwrap());
    }
}
