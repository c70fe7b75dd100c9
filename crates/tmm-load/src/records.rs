//! Normalized records, one struct per store table.
//!
//! Records are immutable once built.  `Tour` and `Trip` carry every column
//! the store persists; `PersonTour` and `PersonTrip` are projections of a
//! tour or trip onto each of its participants.

use tmm_core::{
    HouseholdId, Mode, NodeNumber, Participant, PersonId, PersonTourId, PersonTripId, SubzoneId,
    TapId, Tod, TourId, TripId, ZoneId,
};

/// The tour category that selects "work" user classes.
pub const MANDATORY_CATEGORY: &str = "mandatory";

#[derive(Clone, Debug, PartialEq)]
pub struct Household {
    pub id:      HouseholdId,
    pub subzone: SubzoneId,
    pub size:    u32,
}

// ── People ────────────────────────────────────────────────────────────────────

/// Transit user classes (1–3) for one trip purpose, by access type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct AccessClasses {
    pub walk: u8,
    pub pnr:  u8,
    pub knr:  u8,
}

/// A person's eligibility classes for work and non-work purposes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct UserClasses {
    pub work:     AccessClasses,
    pub non_work: AccessClasses,
}

impl UserClasses {
    /// Work classes for mandatory tours, non-work classes otherwise.
    pub fn access(&self, mandatory: bool) -> AccessClasses {
        if mandatory {
            self.work
        } else {
            self.non_work
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    pub id:         PersonId,
    pub hh_id:      HouseholdId,
    pub person_num: u8,
    pub age:        u32,
    pub gender:     String,
    pub classes:    UserClasses,
}

// ── Tours ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    pub id:           TourId,
    pub hh_id:        HouseholdId,
    /// Person numbers of everyone on the tour.  Exactly one for individual
    /// tours, one or more for joint tours.
    pub participants: Vec<u8>,
    pub marker:       Participant,
    pub category:     String,
    pub purpose:      String,
    pub sz_o:         SubzoneId,
    pub sz_d:         SubzoneId,
    pub tod_depart:   Tod,
    pub tod_arrive:   Tod,
    pub mode:         Mode,
}

impl Tour {
    pub fn is_joint(&self) -> bool {
        self.marker.is_joint()
    }

    pub fn is_mandatory(&self) -> bool {
        self.category == MANDATORY_CATEGORY
    }

    /// One `PersonTour` per participant, in participant order.
    pub fn person_tours(&self) -> impl Iterator<Item = PersonTour> + '_ {
        self.participants.iter().map(move |&p| PersonTour {
            id:        PersonTourId::new(&self.id, p),
            tour_id:   self.id.clone(),
            hh_id:     self.hh_id,
            person_id: PersonId::new(self.hh_id, p),
            mode:      self.mode,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PersonTour {
    pub id:        PersonTourId,
    pub tour_id:   TourId,
    pub hh_id:     HouseholdId,
    pub person_id: PersonId,
    pub mode:      Mode,
}

// ── Trips ─────────────────────────────────────────────────────────────────────

/// Approximate driven leg of a trip.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct DriveMetrics {
    /// Minutes.
    pub time:     f64,
    /// Miles.
    pub distance: f64,
    /// Miles per hour; 0 when time or distance is 0.
    pub speed:    f64,
}

impl DriveMetrics {
    pub const NONE: DriveMetrics = DriveMetrics { time: 0.0, distance: 0.0, speed: 0.0 };

    pub fn new(time: f64, distance: f64) -> Self {
        let speed = if time != 0.0 && distance != 0.0 {
            distance / (time / 60.0)
        } else {
            0.0
        };
        Self { time, distance, speed }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub id:        TripId,
    pub tour_id:   TourId,
    pub hh_id:     HouseholdId,
    pub marker:    Participant,
    pub inbound:   bool,
    pub purpose_o: String,
    pub purpose_d: String,
    pub sz_o:      SubzoneId,
    pub sz_d:      SubzoneId,
    pub zn_o:      ZoneId,
    pub zn_d:      ZoneId,
    pub tap_o:     TapId,
    pub tap_d:     TapId,
    pub tod:       Tod,
    pub mode:      Mode,
    pub drive:     DriveMetrics,
}

impl Trip {
    pub fn is_joint(&self) -> bool {
        self.marker.is_joint()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PersonTrip {
    pub id:             PersonTripId,
    pub person_tour_id: PersonTourId,
    pub trip_id:        TripId,
    pub tour_id:        TourId,
    pub hh_id:          HouseholdId,
    pub person_id:      PersonId,
    pub mode:           Mode,
    /// Set only for transit modes 9–12.
    pub user_class:     Option<u8>,
}

// ── Transit ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct TransitSegment {
    pub id:              String,
    pub line_id:         String,
    pub line_desc:       String,
    pub number:          u32,
    pub i_node:          NodeNumber,
    pub j_node:          NodeNumber,
    pub tod:             Tod,
    /// Sub-mode letter (`M`, `C`, `B`, …).
    pub mode:            String,
    pub boardings:       f64,
    pub allow_boardings: bool,
    pub passengers:      f64,
    pub pass_hours:      f64,
    pub pass_miles:      f64,
}
