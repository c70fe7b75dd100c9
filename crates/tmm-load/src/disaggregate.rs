//! Splitting trips into person-trips.
//!
//! A trip is recorded once per tour, but a joint tour carries several
//! household members.  Each trip therefore yields one [`PersonTrip`] per
//! participant of its parent tour.  Transit person-trips also get a user
//! class, which depends on the parent tour's category and the traveler's
//! eligibility classes, so both indexes must be complete before the trip
//! stage starts.

use rustc_hash::FxHashMap;

use tmm_core::{Mode, PersonId, PersonTourId, PersonTripId, TourId};

use crate::records::{AccessClasses, Person, PersonTrip, Tour, Trip, UserClasses};
use crate::{LoadError, LoadResult};

struct TourEntry {
    participants: Vec<u8>,
    mandatory:    bool,
}

/// Participants and category of every loaded tour.
#[derive(Default)]
pub struct TourIndex {
    tours: FxHashMap<TourId, TourEntry>,
}

impl TourIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tour: &Tour) {
        self.tours.insert(
            tour.id.clone(),
            TourEntry { participants: tour.participants.clone(), mandatory: tour.is_mandatory() },
        );
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }
}

/// Eligibility classes of every loaded person.
#[derive(Default)]
pub struct PeopleIndex {
    classes: FxHashMap<PersonId, UserClasses>,
}

impl PeopleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, person: &Person) {
        self.classes.insert(person.id.clone(), person.classes);
    }

    pub fn classes(&self, person: &PersonId) -> LoadResult<UserClasses> {
        self.classes.get(person).copied().ok_or_else(|| LoadError::UnknownPerson(person.clone()))
    }

    pub fn contains(&self, person: &PersonId) -> bool {
        self.classes.contains_key(person)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Transit user class for a trip of `mode` made under `classes`.
///
/// Walk access uses the walk class.  Drive access takes the better of the
/// park-and-ride and kiss-and-ride classes; the source data does not say
/// which one a rider used, so riders are assumed to pick the higher tier.
pub fn user_class(mode: Mode, classes: AccessClasses) -> Option<u8> {
    match mode {
        Mode::WalkLocalTransit | Mode::WalkPremiumTransit => Some(classes.walk),
        Mode::DriveLocalTransit | Mode::DrivePremiumTransit => Some(classes.pnr.max(classes.knr)),
        _ => None,
    }
}

/// One person-trip per participant of `trip`'s parent tour.
pub fn person_trips(trip: &Trip, tours: &TourIndex, people: &PeopleIndex) -> LoadResult<Vec<PersonTrip>> {
    let tour = tours
        .tours
        .get(&trip.tour_id)
        .ok_or_else(|| LoadError::UnknownTour(trip.tour_id.clone()))?;

    tour.participants
        .iter()
        .map(|&p| {
            let person_id = PersonId::new(trip.hh_id, p);
            let classes = people.classes(&person_id)?.access(tour.mandatory);
            Ok(PersonTrip {
                id: PersonTripId::new(&trip.id, p),
                person_tour_id: PersonTourId::new(&trip.tour_id, p),
                trip_id: trip.id.clone(),
                tour_id: trip.tour_id.clone(),
                hh_id: trip.hh_id,
                person_id,
                mode: trip.mode,
                user_class: user_class(trip.mode, classes),
            })
        })
        .collect()
}
