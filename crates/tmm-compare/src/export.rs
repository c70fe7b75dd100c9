//! Per-geography transit person-trip and user-class export.

use tmm_output::{ExportWriter, Geography, PersonTripZoneRow, TripEnd};
use tmm_store::StratifyBy;

use crate::{CompareResult, Comparison};

/// The trip field keyed by `geography` at `end`.
pub fn stratify_by(geography: Geography, end: TripEnd) -> StratifyBy {
    match (geography, end) {
        (Geography::Zone, TripEnd::Origin)         => StratifyBy::TripOriginZone,
        (Geography::Zone, TripEnd::Destination)    => StratifyBy::TripDestZone,
        (Geography::Subzone, TripEnd::Origin)      => StratifyBy::TripOriginSubzone,
        (Geography::Subzone, TripEnd::Destination) => StratifyBy::TripDestSubzone,
    }
}

impl Comparison<'_> {
    /// One row per id in `1..=max_id`, where `max_id` comes from the base
    /// scenario's export ranges.  Ids without transit person-trips in a
    /// scenario report zero trips and mean class 0 there.
    pub fn person_trip_rows(&self, geography: Geography, end: TripEnd) -> CompareResult<Vec<PersonTripZoneRow>> {
        let by = stratify_by(geography, end);
        let base = self.base.ptrips_by_class_stratified(by)?;
        let test = self.test.ptrips_by_class_stratified(by)?;
        let ranges = self.base.tables().export_ranges;
        let max_id = match geography {
            Geography::Zone    => ranges.max_zone,
            Geography::Subzone => ranges.max_subzone,
        };

        Ok((1..=max_id)
            .map(|id| {
                let b = base.get_id(id).copied().unwrap_or_default();
                let t = test.get_id(id).copied().unwrap_or_default();
                PersonTripZoneRow::new(id, b.total().get(), b.mean_class(), t.total().get(), t.mean_class())
            })
            .collect())
    }

    /// Write [`person_trip_rows`][Self::person_trip_rows] through `writer`
    /// and finish it.  Returns the number of rows written.
    pub fn export_person_trips<W: ExportWriter>(
        &self,
        writer:    &mut W,
        geography: Geography,
        end:       TripEnd,
    ) -> CompareResult<usize> {
        let rows = self.person_trip_rows(geography, end)?;
        writer.write_rows(&rows)?;
        writer.finish()?;
        log::info!("exported {} {} rows", rows.len(), tmm_output::id_column(geography, end));
        Ok(rows.len())
    }
}
