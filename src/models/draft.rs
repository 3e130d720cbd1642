use chrono::{DateTime, NaiveDate, SubsecRound, Utc};

use crate::error::DraftError;

use super::trip::{Destination, Trip};

/// In-progress input of the trip creation form.
///
/// Only a draft that passes [`TripDraft::build`] turns into a [`Trip`]; the
/// storage layer trusts whatever it is handed.
#[derive(Debug, Clone, Default)]
pub struct TripDraft {
    pub name: String,
    pub summary: String,
    destinations: Vec<Destination>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl TripDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns `false` when the destination was already selected.
    pub fn add_destination(&mut self, destination: Destination) -> bool {
        if self.destinations.iter().any(|d| d.id == destination.id) {
            return false;
        }
        self.destinations.push(destination);
        true
    }

    pub fn remove_destination(&mut self, id: &str) {
        self.destinations.retain(|d| d.id != id);
    }

    /// Drops an end date that would now precede the new start.
    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = Some(date);
        if self.end_date.is_some_and(|end| end < date) {
            self.end_date = None;
        }
    }

    /// An end date before the start is pulled up to the start date.
    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.end_date = Some(match self.start_date {
            Some(start) if date < start => start,
            _ => date,
        });
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if self.destinations.is_empty() {
            return Err(DraftError::NoDestinations);
        }
        if self.name.trim().is_empty() {
            return Err(DraftError::EmptyName);
        }
        let start = self.start_date.ok_or(DraftError::MissingStartDate)?;
        if self.end_date.is_some_and(|end| end < start) {
            return Err(DraftError::EndBeforeStart);
        }
        Ok(())
    }

    /// Produces the trip created at `now`; its id is `now` in epoch milliseconds.
    pub fn build(&self, now: DateTime<Utc>) -> Result<Trip, DraftError> {
        self.validate()?;
        let start_date = self.start_date.ok_or(DraftError::MissingStartDate)?;
        let created_at = now.trunc_subsecs(3);
        let summary = self.summary.trim();

        Ok(Trip {
            id: created_at.timestamp_millis().to_string(),
            name: self.name.trim().to_string(),
            destinations: self.destinations.clone(),
            start_date,
            end_date: self.end_date,
            summary: (!summary.is_empty()).then(|| summary.to_string()),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn paris() -> Destination {
        Destination::new("2", "Paris", "France")
    }

    fn filled() -> TripDraft {
        let mut draft = TripDraft::new();
        draft.add_destination(paris());
        draft.name = "  Spring in Europe ".into();
        draft.set_start_date(date(2024, 3, 1));
        draft
    }

    #[test]
    fn ignores_duplicate_destinations() {
        let mut draft = TripDraft::new();
        assert!(draft.add_destination(paris()));
        assert!(!draft.add_destination(paris()));
        assert!(draft.add_destination(Destination::new("6", "Rome", "Italy")));
        assert_eq!(draft.destinations().len(), 2);

        draft.remove_destination("2");
        assert_eq!(draft.destinations()[0].name, "Rome");
    }

    #[test]
    fn reports_missing_fields_in_form_order() {
        let mut draft = TripDraft::new();
        assert_eq!(draft.validate(), Err(DraftError::NoDestinations));
        draft.add_destination(paris());
        draft.name = "   ".into();
        assert_eq!(draft.validate(), Err(DraftError::EmptyName));
        draft.name = "Paris".into();
        assert_eq!(draft.validate(), Err(DraftError::MissingStartDate));
    }

    #[test]
    fn end_date_never_precedes_start() {
        let mut draft = filled();
        draft.set_end_date(date(2024, 2, 20));
        assert_eq!(draft.end_date(), Some(date(2024, 3, 1)));

        draft.set_end_date(date(2024, 3, 10));
        draft.set_start_date(date(2024, 3, 15));
        assert_eq!(draft.end_date(), None);
    }

    #[test]
    fn build_trims_and_derives_id_from_clock() {
        let mut draft = filled();
        draft.summary = "   ".into();
        let now = DateTime::parse_from_rfc3339("2023-11-14T22:13:20.000123Z")
            .unwrap()
            .with_timezone(&Utc);

        let trip = draft.build(now).unwrap();
        assert_eq!(trip.id, "1700000000000");
        assert_eq!(trip.name, "Spring in Europe");
        assert_eq!(trip.summary, None);
        assert_eq!(trip.created_at.timestamp_subsec_nanos(), 0);
        assert_eq!(trip.destinations, vec![paris()]);
    }
}
