//! Unit tests for tmm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{HouseholdId, Participant, PersonId, PersonTourId, PersonTripId, TourId, TripId};

    #[test]
    fn individual_tour_id() {
        let id = TourId::new(HouseholdId(42), Participant::Person(2), 0, "work");
        assert_eq!(id.as_str(), "42-2-0-work");
    }

    #[test]
    fn joint_marker_separates_tours() {
        let indiv = TourId::new(HouseholdId(42), Participant::Person(1), 1, "shop");
        let joint = TourId::new(HouseholdId(42), Participant::Joint, 1, "shop");
        assert_ne!(indiv, joint);
        assert_eq!(joint.as_str(), "42-J-1-shop");
    }

    #[test]
    fn trip_and_person_keys_nest() {
        let tour = TourId::new(HouseholdId(7), Participant::Joint, 3, "eatout");
        let trip = TripId::new(&tour, true, 1);
        assert_eq!(trip.as_str(), "7-J-3-eatout-1-1");
        assert_eq!(PersonTourId::new(&tour, 2).as_str(), "7-J-3-eatout-2");
        assert_eq!(PersonTripId::new(&trip, 2).as_str(), "7-J-3-eatout-1-1-2");
        assert_eq!(PersonId::new(HouseholdId(7), 2).as_str(), "7-2");
    }

    #[test]
    fn numeric_display_is_bare() {
        assert_eq!(HouseholdId(9).to_string(), "9");
    }
}

#[cfg(test)]
mod mode {
    use crate::{CoreError, DriveMode, Mode, ModeGroup};

    #[test]
    fn codes_round_trip() {
        for code in 1..=14 {
            assert_eq!(Mode::from_code(code).unwrap().code() as i64, code);
        }
    }

    #[test]
    fn out_of_range_is_fatal() {
        assert_eq!(Mode::from_code(0), Err(CoreError::InvalidMode(0)));
        assert_eq!(Mode::from_code(15), Err(CoreError::InvalidMode(15)));
    }

    #[test]
    fn groups() {
        assert_eq!(Mode::SharedRide3Pay.group(), ModeGroup::Auto);
        assert_eq!(Mode::Taxi.group(), ModeGroup::Other);
        assert_eq!(Mode::WalkPremiumTransit.group(), ModeGroup::WalkTransit);
        assert_eq!(Mode::DriveLocalTransit.group(), ModeGroup::DriveTransit);
        let total: usize = ModeGroup::ALL.iter().map(|g| g.modes().len()).sum();
        assert_eq!(total, 14);
    }

    #[test]
    fn transit_modes_are_9_to_12() {
        let transit: Vec<u8> = Mode::ALL.iter().filter(|m| m.is_transit()).map(|m| m.code()).collect();
        assert_eq!(transit, vec![9, 10, 11, 12]);
    }

    #[test]
    fn drive_modes() {
        assert_eq!(Mode::DriveAloneFree.drive_mode(), Some(DriveMode::SovFree));
        assert_eq!(Mode::SharedRide3Pay.drive_mode(), Some(DriveMode::Hov3Toll));
        assert_eq!(Mode::Taxi.drive_mode(), None);
        assert!(DriveMode::try_from(Mode::Walk).is_err());
    }
}

#[cfg(test)]
mod time {
    use crate::{CoreError, PeriodMap, Tod};

    #[test]
    fn forward_lookup() {
        let map = PeriodMap::ctramp();
        assert_eq!(map.tod(1).unwrap(), Tod::new(1).unwrap());
        assert_eq!(map.tod(5).unwrap(), Tod::new(2).unwrap());
        assert_eq!(map.tod(12).unwrap(), Tod::new(5).unwrap());
        assert_eq!(map.tod(31).unwrap(), Tod::new(8).unwrap());
        assert_eq!(map.tod(42).unwrap(), Tod::new(1).unwrap());
    }

    #[test]
    fn tod_one_is_not_contiguous() {
        let map = PeriodMap::ctramp();
        let periods: Vec<u8> = map.periods(Tod::new(1).unwrap()).iter().map(|p| p.0).collect();
        let mut expected = vec![1, 2, 3];
        expected.extend(32..=42);
        assert_eq!(periods, expected);
    }

    #[test]
    fn out_of_range_period_is_fatal() {
        let map = PeriodMap::ctramp();
        assert_eq!(map.tod(0), Err(CoreError::PeriodOutOfRange(0)));
        assert_eq!(map.tod(43), Err(CoreError::PeriodOutOfRange(43)));
        assert_eq!(map.tod(-1), Err(CoreError::PeriodOutOfRange(-1)));
    }

    #[test]
    fn inverse_is_consistent_for_every_bucket() {
        let map = PeriodMap::ctramp();
        for tod in Tod::all() {
            let periods = map.periods(tod);
            assert!(!periods.is_empty(), "TOD {tod} has no periods");
            for p in periods {
                assert_eq!(map.tod(p.0 as i64).unwrap(), tod);
            }
        }
    }

    #[test]
    fn every_period_is_covered_once() {
        let map = PeriodMap::ctramp();
        let total: usize = Tod::all().map(|t| map.periods(t).len()).sum();
        assert_eq!(total, map.max_period());
        assert_eq!(map.max_period(), 42);
    }

    #[test]
    fn custom_table_rejects_bad_tod() {
        assert!(PeriodMap::new(vec![None, Some(9)]).is_err());
    }
}

#[cfg(test)]
mod sample {
    use approx::assert_relative_eq;

    use crate::{RawCount, SampleRate, Unsampled};

    #[test]
    fn unsample_divides_by_rate() {
        let rate = SampleRate::new(0.05).unwrap();
        assert_relative_eq!(RawCount(3).unsample(rate).get(), 60.0);
    }

    #[test]
    fn unsampling_is_linear() {
        let rate = SampleRate::new(0.2).unwrap();
        for n in [0u64, 1, 7, 1_000] {
            let single = RawCount(n).unsample(rate).get();
            let double = RawCount(2 * n).unsample(rate).get();
            assert_relative_eq!(double, 2.0 * single);
        }
    }

    #[test]
    fn rate_bounds() {
        assert!(SampleRate::new(0.0).is_err());
        assert!(SampleRate::new(1.5).is_err());
        assert!(SampleRate::new(1.0).is_ok());
    }

    #[test]
    fn estimates_combine() {
        let total: Unsampled = [Unsampled(1.5), Unsampled(2.5)].into_iter().sum();
        assert_relative_eq!(total.get(), 4.0);
        assert_relative_eq!((Unsampled(3.0) - Unsampled(4.0)).get(), -1.0);
        assert_relative_eq!(Unsampled(1.0) / Unsampled(4.0), 0.25);
    }
}

#[cfg(test)]
mod tables {
    use crate::{DriveMode, MatrixNumbers, ModelTables, Tod};

    #[test]
    fn cmap_matrix_numbers() {
        let m = MatrixNumbers::cmap();
        assert_eq!(m.get(DriveMode::SovFree).time, 175);
        assert_eq!(m.get(DriveMode::SovFree).distance, 177);
        assert_eq!(m.get(DriveMode::Hov3Toll).distance, 203);
    }

    #[test]
    fn matrix_names_are_tod_prefixed() {
        let tod = Tod::new(3).unwrap();
        assert_eq!(MatrixNumbers::matrix_name(tod, 175), "mf3175");
    }

    #[test]
    fn assignment_scenarios() {
        let t = ModelTables::cmap();
        assert_eq!(t.assignment_scenario(Tod::new(8).unwrap()), "108");
        assert_eq!(t.sub_mode_description("M"), Some("Metra Rail"));
        assert_eq!(t.sub_mode_description("Z"), None);
    }
}
