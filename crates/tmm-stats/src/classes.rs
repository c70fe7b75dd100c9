//! Transit person-trips by user class.

use std::collections::BTreeMap;

use tmm_core::Unsampled;
use tmm_store::{Stratum, StratifyBy};

use crate::{StatsError, StatsResult};

/// Unsampled transit person-trips for user classes 1, 2 and 3.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ClassTally {
    counts: [Unsampled; 3],
}

impl ClassTally {
    pub const CLASSES: [u8; 3] = [1, 2, 3];

    pub fn get(&self, class: u8) -> Unsampled {
        match class {
            1..=3 => self.counts[class as usize - 1],
            _ => Unsampled::ZERO,
        }
    }

    pub(crate) fn add(&mut self, class: u8, n: Unsampled) -> StatsResult<()> {
        match class {
            1..=3 => {
                self.counts[class as usize - 1] += n;
                Ok(())
            }
            _ => Err(StatsError::UserClass(class)),
        }
    }

    pub fn total(&self) -> Unsampled {
        self.counts.iter().copied().sum()
    }

    /// Trip-weighted mean user class; 0 when there are no trips.
    pub fn mean_class(&self) -> f64 {
        let total = self.total();
        if total.get() <= 0.0 {
            return 0.0;
        }
        let weighted: f64 = self.iter().map(|(c, n)| f64::from(c) * n.get()).sum();
        weighted / total.get()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, Unsampled)> + '_ {
        Self::CLASSES.iter().map(|&c| (c, self.get(c)))
    }
}

/// A [`ClassTally`] for every value of one stratification field.
///
/// Every distinct value in the field's own table has an entry, so strata
/// with no transit person-trips report zeros.
#[derive(Clone, Debug, PartialEq)]
pub struct StratifiedClasses {
    pub by: StratifyBy,
    strata: BTreeMap<Stratum, ClassTally>,
}

impl StratifiedClasses {
    pub(crate) fn new(by: StratifyBy, strata: impl IntoIterator<Item = Stratum>) -> Self {
        Self {
            by,
            strata: strata.into_iter().map(|s| (s, ClassTally::default())).collect(),
        }
    }

    pub(crate) fn add(&mut self, stratum: Stratum, class: u8, n: Unsampled) -> StatsResult<()> {
        self.strata.entry(stratum).or_default().add(class, n)
    }

    pub fn get(&self, stratum: &Stratum) -> Option<&ClassTally> {
        self.strata.get(stratum)
    }

    /// Tally for an integer-keyed stratum (zones, subzones).
    pub fn get_id(&self, id: u32) -> Option<&ClassTally> {
        self.strata.get(&Stratum::Int(i64::from(id)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Stratum, &ClassTally)> {
        self.strata.iter()
    }

    pub fn len(&self) -> usize {
        self.strata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strata.is_empty()
    }
}
