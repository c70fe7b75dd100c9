//! The 14-code CT-RAMP mode taxonomy.
//!
//! | Code | Mode                      | Group           |
//! |------|---------------------------|-----------------|
//! | 1–6  | drive alone / shared ride | `Auto`          |
//! | 7, 8 | walk, bike                | `Other`         |
//! | 9,10 | walk to local / premium   | `WalkTransit`   |
//! | 11,12| drive to local / premium  | `DriveTransit`  |
//! | 13,14| taxi, school bus          | `Other`         |

use std::fmt;

use crate::{CoreError, CoreResult};

/// Trip or tour mode.  The discriminant is the model's integer code.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Mode {
    DriveAloneFree = 1,
    DriveAlonePay = 2,
    SharedRide2Free = 3,
    SharedRide2Pay = 4,
    SharedRide3Free = 5,
    SharedRide3Pay = 6,
    Walk = 7,
    Bike = 8,
    WalkLocalTransit = 9,
    WalkPremiumTransit = 10,
    DriveLocalTransit = 11,
    DrivePremiumTransit = 12,
    Taxi = 13,
    SchoolBus = 14,
}

impl Mode {
    /// All fourteen modes in code order.
    pub const ALL: [Mode; 14] = [
        Mode::DriveAloneFree,
        Mode::DriveAlonePay,
        Mode::SharedRide2Free,
        Mode::SharedRide2Pay,
        Mode::SharedRide3Free,
        Mode::SharedRide3Pay,
        Mode::Walk,
        Mode::Bike,
        Mode::WalkLocalTransit,
        Mode::WalkPremiumTransit,
        Mode::DriveLocalTransit,
        Mode::DrivePremiumTransit,
        Mode::Taxi,
        Mode::SchoolBus,
    ];

    /// Parse a model code.  Anything outside 1–14 is an inconsistent run.
    pub fn from_code(code: i64) -> CoreResult<Mode> {
        match code {
            1..=14 => Ok(Mode::ALL[(code - 1) as usize]),
            _ => Err(CoreError::InvalidMode(code)),
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn group(self) -> ModeGroup {
        match self.code() {
            1..=6 => ModeGroup::Auto,
            11 | 12 => ModeGroup::DriveTransit,
            9 | 10 => ModeGroup::WalkTransit,
            _ => ModeGroup::Other,
        }
    }

    pub fn is_transit(self) -> bool {
        matches!(self.group(), ModeGroup::WalkTransit | ModeGroup::DriveTransit)
    }

    /// The skim matrix set this mode reads directly, if it is a private auto.
    pub fn drive_mode(self) -> Option<DriveMode> {
        DriveMode::from_mode(self)
    }

    pub fn description(self) -> &'static str {
        match self {
            Mode::DriveAloneFree      => "Drive alone free",
            Mode::DriveAlonePay       => "Drive alone pay",
            Mode::SharedRide2Free     => "Shared ride 2 free",
            Mode::SharedRide2Pay      => "Shared ride 2 pay",
            Mode::SharedRide3Free     => "Shared ride 3+ free",
            Mode::SharedRide3Pay      => "Shared ride 3+ pay",
            Mode::Walk                => "Walk",
            Mode::Bike                => "Bike",
            Mode::WalkLocalTransit    => "Walk to local transit",
            Mode::WalkPremiumTransit  => "Walk to premium transit",
            Mode::DriveLocalTransit   => "Drive to local transit",
            Mode::DrivePremiumTransit => "Drive to premium transit",
            Mode::Taxi                => "Taxi",
            Mode::SchoolBus           => "School bus",
        }
    }
}

impl TryFrom<i64> for Mode {
    type Error = CoreError;
    fn try_from(code: i64) -> CoreResult<Mode> {
        Mode::from_code(code)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// ── ModeGroup ─────────────────────────────────────────────────────────────────

/// The four reporting buckets used by grouped mode share and new-trip counts.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeGroup {
    /// Modes 1–6 (taxi excluded).
    Auto,
    /// Modes 11, 12.
    DriveTransit,
    /// Modes 9, 10.
    WalkTransit,
    /// Modes 7, 8, 13, 14.
    Other,
}

impl ModeGroup {
    pub const ALL: [ModeGroup; 4] = [
        ModeGroup::Auto,
        ModeGroup::DriveTransit,
        ModeGroup::WalkTransit,
        ModeGroup::Other,
    ];

    pub fn modes(self) -> Vec<Mode> {
        Mode::ALL.into_iter().filter(|m| m.group() == self).collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            ModeGroup::Auto         => "Auto (Excl. Taxi)",
            ModeGroup::DriveTransit => "Drive-to-Transit",
            ModeGroup::WalkTransit  => "Walk-to-Transit",
            ModeGroup::Other        => "Walk/Bike/Taxi/School Bus",
        }
    }
}

impl fmt::Display for ModeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── DriveMode ─────────────────────────────────────────────────────────────────

/// The six private-auto modes that own a congested time/distance skim pair.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriveMode {
    SovFree,
    SovToll,
    Hov2Free,
    Hov2Toll,
    Hov3Free,
    Hov3Toll,
}

impl DriveMode {
    pub const ALL: [DriveMode; 6] = [
        DriveMode::SovFree,
        DriveMode::SovToll,
        DriveMode::Hov2Free,
        DriveMode::Hov2Toll,
        DriveMode::Hov3Free,
        DriveMode::Hov3Toll,
    ];

    pub fn from_mode(mode: Mode) -> Option<DriveMode> {
        match mode.code() {
            c @ 1..=6 => Some(DriveMode::ALL[(c - 1) as usize]),
            _ => None,
        }
    }

    /// Dense index 0–5, used to lay out per-mode matrix arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn mode(self) -> Mode {
        Mode::ALL[self.index()]
    }
}

impl TryFrom<Mode> for DriveMode {
    type Error = CoreError;
    fn try_from(mode: Mode) -> CoreResult<DriveMode> {
        DriveMode::from_mode(mode).ok_or(CoreError::NotADriveMode(mode.code()))
    }
}
