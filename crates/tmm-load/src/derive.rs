//! Approximate drive time, distance and speed for a trip.
//!
//! | Trip mode              | Driven leg                                      | Skim mode |
//! |------------------------|-------------------------------------------------|-----------|
//! | 1–6   private auto     | `zn_o → zn_d`                                   | own       |
//! | 13–14 taxi, school bus | `zn_o → zn_d`                                   | SOV free  |
//! | 11–12 drive-to-transit | outbound `zn_o → zone(tap_o)`, inbound `zone(tap_d) → zn_d` | SOV free |
//! | 7–10  walk, bike, walk-to-transit | none                                 | –         |

use tmm_core::{DriveMode, Mode, ZoneId};
use tmm_skim::{SkimResult, SkimSet, TapZones};

use crate::records::{DriveMetrics, Trip};
use crate::{LoadError, LoadResult};

/// Looks up a trip's driven leg in the congested skims.
///
/// Borrows the skim set for the duration of the trip stage only.
pub struct DriveCalculator<'a> {
    skims: &'a SkimSet,
    taps:  &'a TapZones,
}

impl<'a> DriveCalculator<'a> {
    pub fn new(skims: &'a SkimSet, taps: &'a TapZones) -> Self {
        Self { skims, taps }
    }

    pub fn metrics(&self, trip: &Trip) -> LoadResult<DriveMetrics> {
        self.lookup(trip).map_err(|source| LoadError::Skim { trip: trip.id.clone(), source })
    }

    fn lookup(&self, trip: &Trip) -> SkimResult<DriveMetrics> {
        let Some((mode, from, to)) = self.driven_leg(trip)? else {
            return Ok(DriveMetrics::NONE);
        };
        let time = self.skims.time(mode, trip.tod, from, to)?;
        let distance = self.skims.distance(mode, trip.tod, from, to)?;
        Ok(DriveMetrics::new(time, distance))
    }

    /// The skim mode and zone pair of the driven part of `trip`, if any.
    fn driven_leg(&self, trip: &Trip) -> SkimResult<Option<(DriveMode, ZoneId, ZoneId)>> {
        Ok(match trip.mode {
            Mode::Taxi | Mode::SchoolBus => Some((DriveMode::SovFree, trip.zn_o, trip.zn_d)),
            Mode::DriveLocalTransit | Mode::DrivePremiumTransit => {
                let leg = if trip.inbound {
                    (self.taps.zone(trip.tap_d)?, trip.zn_d)
                } else {
                    (trip.zn_o, self.taps.zone(trip.tap_o)?)
                };
                Some((DriveMode::SovFree, leg.0, leg.1))
            }
            mode => mode.drive_mode().map(|m| (m, trip.zn_o, trip.zn_d)),
        })
    }
}
