//! Timecard and day-entry models.
//!
//! These mirror the JSON shape the extraction model is instructed to
//! produce: a list of timecards, each with a `name` and a list of
//! `days` carrying clock-in/clock-out strings.

use serde::{Deserialize, Serialize};

/// One day's clock-in/clock-out pair on a timecard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Day label as written on the card (e.g., "1st Day"). Trusted
    /// verbatim from the extraction output, never renumbered.
    #[serde(default)]
    pub day: String,

    /// Clock-in time (e.g., "08:00 AM"). Empty when missing from source.
    #[serde(default)]
    pub time_in: String,

    /// Clock-out time (e.g., "04:30 PM"). Empty when missing from source.
    #[serde(default)]
    pub time_out: String,

    /// Derived worked hours ("H:MM"). Attached during enrichment;
    /// absent when the entry's times could not be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_worked: Option<String>,
}

impl DayEntry {
    /// Create an entry from its label and clock times.
    pub fn new(
        day: impl Into<String>,
        time_in: impl Into<String>,
        time_out: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            time_in: time_in.into(),
            time_out: time_out.into(),
            hours_worked: None,
        }
    }
}

/// A named collection of day entries for one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timecard {
    /// Person or card name. Empty in raw model output when the card is
    /// unnamed; the normalizer fills in "Timecard N" by order.
    #[serde(default)]
    pub name: String,

    /// Day entries in chronological order.
    #[serde(default)]
    pub days: Vec<DayEntry>,

    /// Derived total of all parsed day entries ("H:MM"). Attached
    /// during enrichment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours_worked: Option<String>,
}

impl Timecard {
    /// Create a named timecard with no entries.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            days: Vec::new(),
            total_hours_worked: None,
        }
    }

    /// Builder method to append a day entry.
    pub fn with_day(mut self, entry: DayEntry) -> Self {
        self.days.push(entry);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full() {
        let json = r#"{
            "name": "Taha",
            "days": [
                {"day": "1st Day", "time_in": "08:00 AM", "time_out": "04:30 PM"}
            ]
        }"#;

        let card: Timecard = serde_json::from_str(json).unwrap();
        assert_eq!(card.name, "Taha");
        assert_eq!(card.days.len(), 1);
        assert_eq!(card.days[0].day, "1st Day");
        assert_eq!(card.days[0].time_in, "08:00 AM");
        assert!(card.days[0].hours_worked.is_none());
        assert!(card.total_hours_worked.is_none());
    }

    #[test]
    fn test_deserialize_missing_keys_tolerated() {
        let card: Timecard = serde_json::from_str("{}").unwrap();
        assert_eq!(card.name, "");
        assert!(card.days.is_empty());

        let entry: DayEntry = serde_json::from_str(r#"{"day": "1st Day"}"#).unwrap();
        assert_eq!(entry.time_in, "");
        assert_eq!(entry.time_out, "");

        let bare: DayEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(bare.day, "");
    }

    #[test]
    fn test_serialize_omits_unset_derived_fields() {
        let card = Timecard::new("A").with_day(DayEntry::new("1st Day", "08:00 AM", "04:30 PM"));
        let json = serde_json::to_string(&card).unwrap();
        assert!(!json.contains("hours_worked"));
        assert!(!json.contains("total_hours_worked"));
    }

    #[test]
    fn test_serialize_keeps_derived_fields_when_set() {
        let mut card = Timecard::new("A").with_day(DayEntry::new("1st Day", "08:00 AM", "04:30 PM"));
        card.days[0].hours_worked = Some("8:30".to_string());
        card.total_hours_worked = Some("8:30".to_string());

        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains(r#""hours_worked":"8:30""#));
        assert!(json.contains(r#""total_hours_worked":"8:30""#));
    }

    #[test]
    fn test_round_trip() {
        let card = Timecard::new("B")
            .with_day(DayEntry::new("1st Day", "09:00 PM", "05:00 AM"))
            .with_day(DayEntry::new("2nd Day", "09:00 AM", "05:00 PM"));

        let json = serde_json::to_string(&card).unwrap();
        let back: Timecard = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
