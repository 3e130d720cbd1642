use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::dates::{format_calendar_date, CalendarDate, IsoMillis};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub country: String,
}

impl Destination {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: country.into(),
        }
    }

    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub destinations: Vec<Destination>,
    #[serde_as(as = "CalendarDate")]
    pub start_date: NaiveDate,
    #[serde_as(as = "Option<CalendarDate>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde_as(as = "IsoMillis")]
    pub created_at: DateTime<Utc>,
}

impl Trip {
    pub fn destination_names(&self) -> String {
        self.destinations
            .iter()
            .map(|d| d.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn dates_display(&self) -> String {
        match self.end_date {
            Some(end) => format!(
                "{} → {}",
                format_calendar_date(self.start_date),
                format_calendar_date(end)
            ),
            None => format_calendar_date(self.start_date),
        }
    }

    pub fn has_summary(&self) -> bool {
        self.summary.is_some()
    }

    pub fn summary_display(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }
}

/// Display order for trip lists: most recently created first.
pub fn sort_newest_first(trips: &mut [Trip]) {
    trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPRING_JSON: &str = r#"{"id":"1700000000000","name":"Spring in Europe","destinations":[{"id":"2","name":"Paris","country":"France"}],"startDate":"03/01/2024","createdAt":"2024-03-01T10:00:00.000Z"}"#;

    fn spring_trip() -> Trip {
        Trip {
            id: "1700000000000".into(),
            name: "Spring in Europe".into(),
            destinations: vec![Destination::new("2", "Paris", "France")],
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: None,
            summary: None,
            created_at: DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn reads_the_persisted_layout() {
        let trip: Trip = serde_json::from_str(SPRING_JSON).unwrap();
        assert_eq!(trip, spring_trip());
    }

    #[test]
    fn omits_absent_optional_fields() {
        let json = serde_json::to_string(&spring_trip()).unwrap();
        assert_eq!(json, SPRING_JSON);
    }

    #[test]
    fn writes_end_date_and_summary_when_present() {
        let mut trip = spring_trip();
        trip.end_date = NaiveDate::from_ymd_opt(2024, 3, 8);
        trip.summary = Some("bakeries".into());
        let value = serde_json::to_value(&trip).unwrap();
        assert_eq!(value["endDate"], "03/08/2024");
        assert_eq!(value["summary"], "bakeries");
        assert_eq!(trip.dates_display(), "03/01/2024 → 03/08/2024");
    }

    #[test]
    fn stored_date_range_is_not_rechecked_on_read() {
        let json = r#"{"id":"1700000000000","name":"Backwards","destinations":[{"id":"2","name":"Paris","country":"France"}],"startDate":"03/10/2024","endDate":"03/01/2024","createdAt":"2024-03-01T10:00:00.000Z"}"#;

        let trip: Trip = serde_json::from_str(json).unwrap();
        assert_eq!(trip.start_date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(trip.end_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(serde_json::to_string(&trip).unwrap(), json);
    }

    #[test]
    fn locale_spelled_date_fails_the_whole_array() {
        let bad = SPRING_JSON.replace("03/01/2024", "01.03.2024");
        let json = format!("[{SPRING_JSON},{bad}]");

        assert!(serde_json::from_str::<Vec<Trip>>(&json).is_err());
    }

    #[test]
    fn sorts_newest_first() {
        let older = spring_trip();
        let mut newer = spring_trip();
        newer.id = "1700000000001".into();
        newer.created_at = older.created_at + chrono::Duration::minutes(5);

        let mut trips = vec![older.clone(), newer.clone()];
        sort_newest_first(&mut trips);
        assert_eq!(trips, vec![newer, older]);
    }

    #[test]
    fn joins_destination_names() {
        let mut trip = spring_trip();
        trip.destinations.push(Destination::new("6", "Rome", "Italy"));
        assert_eq!(trip.destination_names(), "Paris, Rome");
        assert_eq!(trip.destinations[1].label(), "Rome, Italy");
    }
}
