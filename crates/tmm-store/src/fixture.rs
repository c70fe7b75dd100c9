//! Synthetic model runs for tests (feature `fixture`).
//!
//! [`SyntheticRun`] accumulates CT-RAMP rows and writes them in the model's
//! directory layout; [`skims`] and [`assignment`] provide matching in-memory
//! network sources.  Zones are 1–3 with every pair skimmed (10 minutes,
//! 5 miles), and TAP 100 sits in zone 2.

use std::fmt::Write as _;
use std::io;
use std::path::Path;

use tmm_core::{DriveMode, ModelTables, TapId, Tod, ZoneId};
use tmm_load::{MemoryAssignmentSource, RawSegment};
use tmm_skim::{MemorySkimSource, TapZones};

use crate::{ScenarioBuilder, ScenarioConfig, ScenarioStore, StoreResult};

const HH: &str = "hh_id,maz,size\n";
const PERSON: &str = "hh_id,person_num,age,gender,user_class_work_walk,user_class_work_pnr,user_class_work_knr,user_class_non_work_walk,user_class_non_work_pnr,user_class_non_work_knr\n";
const TOUR: &str = "hh_id,person_num,tour_id,tour_purpose,tour_category,orig_maz,dest_maz,depart_period,arrive_period,tour_mode\n";
const JOINT_TOUR: &str = "hh_id,tour_participants,tour_id,tour_purpose,tour_category,orig_maz,dest_maz,depart_period,arrive_period,tour_mode\n";
const TRIP: &str = "hh_id,person_num,tour_id,tour_purpose,inbound,stop_id,orig_purpose,dest_purpose,orig_maz,dest_maz,orig_taz,dest_taz,board_tap,alight_tap,stop_period,trip_mode\n";
const JOINT_TRIP: &str = "hh_id,tour_id,tour_purpose,inbound,stop_id,orig_purpose,dest_purpose,orig_maz,dest_maz,orig_taz,dest_taz,board_tap,alight_tap,stop_period,trip_mode\n";

/// The TAP every drive-to-transit trip in a synthetic run uses.
pub const TAP: u32 = 100;

/// One trip leg: `(inbound, stop_id, orig zone, dest zone, mode)`.
pub type Leg = (bool, i64, u32, u32, u8);

/// CT-RAMP output files under construction.
#[derive(Clone)]
pub struct SyntheticRun {
    households:  String,
    people:      String,
    tours:       String,
    joint_tours: String,
    trips:       String,
    joint_trips: String,
}

impl Default for SyntheticRun {
    fn default() -> Self {
        Self {
            households:  HH.into(),
            people:      PERSON.into(),
            tours:       TOUR.into(),
            joint_tours: JOINT_TOUR.into(),
            trips:       TRIP.into(),
            joint_trips: JOINT_TRIP.into(),
        }
    }
}

impl SyntheticRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// A household of `size` people living in subzone `100 + hh`.  Each
    /// person gets work classes `work` and non-work classes `non_work`
    /// (`[walk, pnr, knr]`).
    pub fn household(mut self, hh: u32, size: u8, work: [u8; 3], non_work: [u8; 3]) -> Self {
        let _ = writeln!(self.households, "{hh},{},{size}", 100 + hh);
        for p in 1..=size {
            let _ = writeln!(
                self.people,
                "{hh},{p},{},{},{},{},{},{},{},{}",
                30 + p,
                if p % 2 == 0 { "F" } else { "M" },
                work[0], work[1], work[2], non_work[0], non_work[1], non_work[2],
            );
        }
        self
    }

    /// An individual tour whose trips are `legs`.
    pub fn tour(mut self, hh: u32, person: u8, tour: u32, purpose: &str, category: &str, legs: &[Leg]) -> Self {
        let mode = legs.first().map_or(1, |l| l.4);
        let _ = writeln!(self.tours, "{hh},{person},{tour},{purpose},{category},{0},{0},10,30,{mode}", 100 + hh);
        for leg in legs {
            let _ = writeln!(self.trips, "{hh},{person},{tour},{purpose},{}", leg_row(hh, purpose, leg));
        }
        self
    }

    /// A joint tour of `participants` whose trips are `legs`.
    pub fn joint_tour(mut self, hh: u32, participants: &[u8], tour: u32, purpose: &str, legs: &[Leg]) -> Self {
        let mode = legs.first().map_or(1, |l| l.4);
        let list = participants.iter().map(u8::to_string).collect::<Vec<_>>().join(" ");
        let _ = writeln!(self.joint_tours, "{hh},{list},{tour},{purpose},joint,{0},{0},12,20,{mode}", 100 + hh);
        for leg in legs {
            let _ = writeln!(self.joint_trips, "{hh},{tour},{purpose},{}", leg_row(hh, purpose, leg));
        }
        self
    }

    /// Write the run under `root` in the model's layout.
    pub fn write(&self, root: &Path) -> io::Result<()> {
        let inputs = root.join("model").join("inputs");
        let outputs = root.join("model").join("outputs");
        std::fs::create_dir_all(&inputs)?;
        std::fs::create_dir_all(&outputs)?;
        std::fs::write(inputs.join("tap_attributes.csv"), format!("tap_id,taz09\n{TAP},2\n"))?;
        std::fs::write(outputs.join("hhData_1.csv"), &self.households)?;
        std::fs::write(outputs.join("personData_1.csv"), &self.people)?;
        std::fs::write(outputs.join("indivTourData_1.csv"), &self.tours)?;
        std::fs::write(outputs.join("jointTourData_1.csv"), &self.joint_tours)?;
        std::fs::write(outputs.join("indivTripData_1.csv"), &self.trips)?;
        std::fs::write(outputs.join("jointTripData_1.csv"), &self.joint_trips)?;
        Ok(())
    }

    /// Write under `root` and build an in-memory store from it, with
    /// [`skims`] and [`assignment`] scaled by `boarding_scale`.
    pub fn build(&self, name: &str, root: &Path, boarding_scale: f64) -> StoreResult<ScenarioStore> {
        self.write(root)?;
        let tables = ModelTables::cmap();
        let assignment = assignment(&tables, boarding_scale);
        ScenarioBuilder::new(ScenarioConfig::new(name, root), tables)
            .skims(skims())
            .assignment(assignment)
            .build()
    }
}

fn leg_row(hh: u32, purpose: &str, leg: &Leg) -> String {
    let &(inbound, stop_id, zn_o, zn_d, mode) = leg;
    let (from, to) = if inbound { (purpose, "home") } else { ("home", purpose) };
    let (board, alight) = match (mode, inbound) {
        (11 | 12, false) => (TAP, 0),
        (11 | 12, true) => (0, TAP),
        _ => (0, 0),
    };
    format!(
        "{},{stop_id},{from},{to},{1},{1},{zn_o},{zn_d},{board},{alight},12,{mode}",
        inbound as u8,
        100 + hh,
    )
}

/// Every drive mode, every TOD: 10 minutes and 5 miles between any of
/// zones 1–3.
pub fn skims() -> MemorySkimSource {
    let tables = ModelTables::cmap();
    let pairs: Vec<(u32, u32)> = (1..=3).flat_map(|o| (1..=3).map(move |d| (o, d))).collect();
    let time: Vec<_> = pairs.iter().map(|&(o, d)| (ZoneId(o), ZoneId(d), 10.0)).collect();
    let distance: Vec<_> = pairs.iter().map(|&(o, d)| (ZoneId(o), ZoneId(d), 5.0)).collect();

    let mut src = MemorySkimSource::new();
    for mode in DriveMode::ALL {
        src.insert_drive_mode(&tables.matrices, mode, &time, &distance);
    }
    src
}

pub fn taps() -> TapZones {
    TapZones::from_pairs([(TapId(TAP), ZoneId(2))])
}

/// Three segments per TOD: a bus segment, a rail segment that allows
/// boardings and one that does not.  Boardings are multiplied by `scale`.
pub fn assignment(tables: &ModelTables, scale: f64) -> MemoryAssignmentSource {
    let seg = |id: &str, line: &str, mode: &str, nodes: (u32, u32), boardings: f64, allow: bool, volume: f64, time: f64, length: f64| {
        RawSegment {
            id:              id.into(),
            line_id:         line.into(),
            line_desc:       line.to_uppercase(),
            number:          1,
            i_node:          Some(nodes.0),
            j_node:          Some(nodes.1),
            mode:            mode.into(),
            boardings:       boardings * scale,
            allow_boardings: allow,
            volume,
            transit_time:    time,
            length,
        }
    };

    let mut src = MemoryAssignmentSource::new();
    for tod in Tod::all() {
        src.insert(
            tables.assignment_scenario(tod),
            vec![
                seg("b1-1", "b1", "B", (1, 2), 10.0, true, 100.0, 6.0, 2.0),
                seg("m1-1", "m1", "M", (3, 4), 30.0, true, 200.0, 12.0, 10.0),
                seg("m1-2", "m1", "M", (4, 5), 5.0, false, 180.0, 6.0, 4.0),
            ],
        );
    }
    src
}
