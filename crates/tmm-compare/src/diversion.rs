//! Auto-trip diversion and elimination.
//!
//! For one traveler, a drop in auto trips is explained first by growth in
//! drive-to-transit trips ("diverted"), then by growth in walk-to-transit
//! and other trips, and finally as trips that simply stopped; the last two
//! both count as "eliminated".  A rise in auto trips runs the same steps
//! with the signs flipped.  A traveler whose auto trips did not change
//! contributes nothing.
//!
//! The step-by-step attribution reduces to `min` of the auto change and
//! the opposite-signed drive-to-transit change, which stays exact for
//! unsampled (fractional) counts.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use tmm_core::{Mode, ModeGroup};

/// Test-minus-base trips for one traveler, per mode group.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ModeDiffs {
    pub auto:  f64,
    pub dtt:   f64,
    pub wtt:   f64,
    pub other: f64,
}

impl ModeDiffs {
    pub fn add(&mut self, mode: Mode, delta: f64) {
        match mode.group() {
            ModeGroup::Auto         => self.auto += delta,
            ModeGroup::DriveTransit => self.dtt += delta,
            ModeGroup::WalkTransit  => self.wtt += delta,
            ModeGroup::Other        => self.other += delta,
        }
    }
}

/// Auto trips diverted to drive-to-transit and eliminated outright.
/// Negative values are auto trips gained.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AutoImpact {
    pub diverted:   f64,
    pub eliminated: f64,
}

impl Add for AutoImpact {
    type Output = AutoImpact;
    fn add(self, rhs: AutoImpact) -> AutoImpact {
        AutoImpact {
            diverted:   self.diverted + rhs.diverted,
            eliminated: self.eliminated + rhs.eliminated,
        }
    }
}

impl AddAssign for AutoImpact {
    fn add_assign(&mut self, rhs: AutoImpact) {
        *self = *self + rhs;
    }
}

impl Sum for AutoImpact {
    fn sum<I: Iterator<Item = AutoImpact>>(iter: I) -> AutoImpact {
        iter.fold(AutoImpact::default(), Add::add)
    }
}

/// Attribute one traveler's auto-trip change.
pub fn attribute_auto_change(d: &ModeDiffs) -> AutoImpact {
    if d.auto < 0.0 {
        let lost = -d.auto;
        let diverted = lost.min(d.dtt.max(0.0));
        AutoImpact { diverted, eliminated: lost - diverted }
    } else if d.auto > 0.0 {
        let gained = d.auto;
        let undiverted = gained.min((-d.dtt).max(0.0));
        AutoImpact { diverted: -undiverted, eliminated: -(gained - undiverted) }
    } else {
        AutoImpact::default()
    }
}
