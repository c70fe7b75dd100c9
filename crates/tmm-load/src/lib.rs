//! `tmm-load` — turns CT-RAMP output files into normalized records.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`records`]      | `Household`, `Person`, `Tour`, `PersonTour`, `Trip`, `PersonTrip`, `TransitSegment` |
//! | [`loader`]       | streaming CSV loaders, `clean_str`                        |
//! | [`derive`]       | `DriveCalculator` (drive time / distance / speed)         |
//! | [`disaggregate`] | `TourIndex`, `PeopleIndex`, `person_trips`, `user_class`  |
//! | [`transit`]      | `TransitAssignmentSource`, CSV and in-memory sources, `load_transit_segments` |
//! | [`error`]        | `LoadError`, `LoadResult<T>`                              |
//!
//! # Stage order
//!
//! Households, people, tours, trips, transit segments.  Person-trips need the
//! parent tour's participants and category ([`TourIndex`]) and every
//! participant's user classes ([`PeopleIndex`]), so the trip stage can only
//! run once the earlier ones are complete.

pub mod derive;
pub mod disaggregate;
pub mod error;
pub mod loader;
pub mod records;
pub mod transit;


pub use derive::DriveCalculator;
pub use disaggregate::{PeopleIndex, TourIndex, person_trips, user_class};
pub use error::{LoadError, LoadResult};
pub use loader::clean_str;
pub use records::{
    AccessClasses, DriveMetrics, Household, Person, PersonTour, PersonTrip, Tour, TransitSegment,
    Trip, UserClasses,
};
pub use transit::{
    CsvAssignmentSource, MemoryAssignmentSource, RawSegment, TransitAssignmentSource,
    load_transit_segments,
};
