//! Strongly typed identifiers.
//!
//! Two families live here:
//!
//! - **Numeric ids** (`HouseholdId`, `ZoneId`, `SubzoneId`, `TapId`,
//!   `NodeNumber`) are `Copy + Ord + Hash` wrappers around the integers the
//!   travel model writes.  Their `Display` is the bare number so they can be
//!   spliced into composite keys.
//! - **Composite ids** (`PersonId`, `TourId`, `TripId`, `PersonTourId`,
//!   `PersonTripId`) are dash-joined strings.  They are deterministic: the
//!   same source row always yields the same id, and ids are unique within a
//!   scenario.
//!
//! ```text
//! PersonId      = {hh}-{person_num}
//! TourId        = {hh}-{person_num | J}-{tour_num}-{purpose}
//! TripId        = {tour_id}-{inbound 0|1}-{stop_id + 1}
//! PersonTourId  = {tour_id}-{person_num}
//! PersonTripId  = {trip_id}-{person_num}
//! ```

use std::fmt;

/// Generate a typed numeric ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The raw integer as written by the model.
            #[inline(always)]
            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// CT-RAMP household id (`hh_id`).
    pub struct HouseholdId(u32);
}

typed_id! {
    /// Traffic analysis zone, the unit the skim matrices are indexed by.
    pub struct ZoneId(u32);
}

typed_id! {
    /// Micro-zone (MAZ).  Finer than [`ZoneId`]; households live in one.
    pub struct SubzoneId(u32);
}

typed_id! {
    /// Transit access point.  `0` in the trip files means "no TAP used".
    pub struct TapId(u32);
}

typed_id! {
    /// Network node number from the transit assignment.
    pub struct NodeNumber(u32);
}

// ── Participant marker ────────────────────────────────────────────────────────

/// The person slot of a tour or trip key.
///
/// Individual records carry the traveler's person number; joint records carry
/// the synthetic `J` marker so that they never collide with an individual
/// tour of the same household and sequence number.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Participant {
    Person(u8),
    Joint,
}

impl Participant {
    pub fn is_joint(self) -> bool {
        matches!(self, Participant::Joint)
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Person(n) => write!(f, "{n}"),
            Participant::Joint => f.write_str("J"),
        }
    }
}

// ── Composite ids ─────────────────────────────────────────────────────────────

/// Generate a dash-joined string key.
macro_rules! composite_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        /// Re-wrap a key read back from the store.
        impl From<String> for $name {
            fn from(s: String) -> $name {
                $name(s)
            }
        }
    };
}

composite_id! {
    /// `{hh}-{person_num}`.  Not the `person_id` column of the person file.
    pub struct PersonId;
}

composite_id! {
    /// `{hh}-{person_num | J}-{tour_num}-{purpose}`.
    pub struct TourId;
}

composite_id! {
    /// `{tour_id}-{inbound}-{stop}`.
    pub struct TripId;
}

composite_id! {
    /// `{tour_id}-{person_num}`.
    pub struct PersonTourId;
}

composite_id! {
    /// `{trip_id}-{person_num}`.
    pub struct PersonTripId;
}

impl PersonId {
    pub fn new(hh: HouseholdId, person_num: u8) -> Self {
        Self(format!("{hh}-{person_num}"))
    }
}

impl TourId {
    /// `purpose` must already be normalized (see `tmm_load::clean_str`).
    pub fn new(hh: HouseholdId, marker: Participant, tour_num: u32, purpose: &str) -> Self {
        Self(format!("{hh}-{marker}-{tour_num}-{purpose}"))
    }
}

impl TripId {
    /// `stop` is the 1-based sequence number (source `stop_id + 1`).
    pub fn new(tour: &TourId, inbound: bool, stop: u32) -> Self {
        Self(format!("{tour}-{}-{stop}", inbound as u8))
    }
}

impl PersonTourId {
    pub fn new(tour: &TourId, person_num: u8) -> Self {
        Self(format!("{tour}-{person_num}"))
    }
}

impl PersonTripId {
    pub fn new(trip: &TripId, person_num: u8) -> Self {
        Self(format!("{trip}-{person_num}"))
    }
}
