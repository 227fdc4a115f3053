//! Timecard enrichment.
//!
//! Walks each timecard's day entries, attaches per-entry worked hours,
//! and totals them per card. Entries are independent: a bad clock time
//! marks that entry and moves on instead of aborting the batch, so a
//! partially legible image still yields usable results.

use serde::Serialize;
use tracing::debug;

use crate::calculate::{hours_between, total_duration};
use crate::models::{DayEntry, Timecard, WorkDuration};

/// A day entry whose clock times could not be parsed, attributed by
/// position so a caller can target the exact field to correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryIssue {
    /// Index of the timecard within the batch (0 for flat entry lists).
    pub timecard_index: usize,

    /// Index of the entry within the timecard.
    pub entry_index: usize,

    /// Day label of the offending entry.
    pub day: String,

    /// Human-readable description of the failure.
    pub message: String,
}

/// A batch of enriched timecards plus any per-entry failures.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedBatch {
    pub timecards: Vec<Timecard>,
    pub issues: Vec<EntryIssue>,
}

/// Enriched flat entry list (the edit flow, no card grouping).
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedEntries {
    pub entries: Vec<DayEntry>,
    pub total_hours_worked: String,
    pub issues: Vec<EntryIssue>,
}

/// Attach `hours_worked` to every entry of every card and a
/// `total_hours_worked` to every card.
///
/// Always recomputes from `time_in`/`time_out`; stale derived values
/// are overwritten, so enriching twice is a no-op. Entries that fail
/// to parse get `hours_worked = None` and an issue record, and are
/// excluded from the card total.
pub fn enrich_timecards(mut timecards: Vec<Timecard>) -> EnrichedBatch {
    let mut issues = Vec::new();

    for (card_index, card) in timecards.iter_mut().enumerate() {
        let total = enrich_days(&mut card.days, card_index, &mut issues);
        card.total_hours_worked = Some(total.to_string());
        debug!(
            card = %card.name,
            days = card.days.len(),
            total = %total,
            "enriched timecard"
        );
    }

    EnrichedBatch { timecards, issues }
}

/// Attach `hours_worked` to a flat list of entries and total them.
pub fn enrich_entries(mut entries: Vec<DayEntry>) -> EnrichedEntries {
    let mut issues = Vec::new();
    let total = enrich_days(&mut entries, 0, &mut issues);

    EnrichedEntries {
        entries,
        total_hours_worked: total.to_string(),
        issues,
    }
}

fn enrich_days(
    days: &mut [DayEntry],
    timecard_index: usize,
    issues: &mut Vec<EntryIssue>,
) -> WorkDuration {
    let mut computed: Vec<String> = Vec::with_capacity(days.len());

    for (entry_index, entry) in days.iter_mut().enumerate() {
        match hours_between(&entry.time_in, &entry.time_out) {
            Ok(duration) => {
                let rendered = duration.to_string();
                entry.hours_worked = Some(rendered.clone());
                computed.push(rendered);
            }
            Err(err) => {
                entry.hours_worked = None;
                issues.push(EntryIssue {
                    timecard_index,
                    entry_index,
                    day: entry.day.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    total_duration(computed.iter().map(String::as_str))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::normalize::parse_timecards;

    fn card(name: &str, days: Vec<DayEntry>) -> Timecard {
        Timecard {
            name: name.to_string(),
            days,
            total_hours_worked: None,
        }
    }

    #[test]
    fn test_enrich_single_card() {
        let cards = vec![card(
            "Taha",
            vec![
                DayEntry::new("1st Day", "08:00 AM", "04:30 PM"),
                DayEntry::new("2nd Day", "09:00 AM", "05:00 PM"),
            ],
        )];

        let batch = enrich_timecards(cards);
        assert!(batch.issues.is_empty());

        let enriched = &batch.timecards[0];
        assert_eq!(enriched.days[0].hours_worked.as_deref(), Some("8:30"));
        assert_eq!(enriched.days[1].hours_worked.as_deref(), Some("8:00"));
        assert_eq!(enriched.total_hours_worked.as_deref(), Some("16:30"));
    }

    #[test]
    fn test_enrich_overnight_entry() {
        let cards = vec![card(
            "Night shift",
            vec![DayEntry::new("1st Day", "09:00 PM", "05:00 AM")],
        )];

        let batch = enrich_timecards(cards);
        assert_eq!(batch.timecards[0].days[0].hours_worked.as_deref(), Some("8:00"));
        assert_eq!(batch.timecards[0].total_hours_worked.as_deref(), Some("8:00"));
    }

    #[test]
    fn test_enrich_bad_entry_does_not_abort_batch() {
        let cards = vec![card(
            "A",
            vec![
                DayEntry::new("1st Day", "08:00 AM", "04:30 PM"),
                DayEntry::new("2nd Day", "25:00 AM", "05:00 PM"),
                DayEntry::new("3rd Day", "09:00 AM", "10:45 AM"),
            ],
        )];

        let batch = enrich_timecards(cards);

        let enriched = &batch.timecards[0];
        assert_eq!(enriched.days[0].hours_worked.as_deref(), Some("8:30"));
        assert_eq!(enriched.days[1].hours_worked, None);
        assert_eq!(enriched.days[2].hours_worked.as_deref(), Some("1:45"));
        // Bad entry excluded from the total
        assert_eq!(enriched.total_hours_worked.as_deref(), Some("10:15"));

        assert_eq!(batch.issues.len(), 1);
        assert_eq!(batch.issues[0].timecard_index, 0);
        assert_eq!(batch.issues[0].entry_index, 1);
        assert_eq!(batch.issues[0].day, "2nd Day");
    }

    #[test]
    fn test_enrich_missing_times_flagged() {
        // Missing time_in/time_out deserialize to empty strings
        let cards = vec![card("A", vec![DayEntry::new("1st Day", "", "")])];

        let batch = enrich_timecards(cards);
        assert_eq!(batch.timecards[0].days[0].hours_worked, None);
        assert_eq!(batch.timecards[0].total_hours_worked.as_deref(), Some("0:00"));
        assert_eq!(batch.issues.len(), 1);
    }

    #[test]
    fn test_enrich_empty_days() {
        let batch = enrich_timecards(vec![card("Empty", vec![])]);
        assert_eq!(batch.timecards[0].total_hours_worked.as_deref(), Some("0:00"));
        assert!(batch.issues.is_empty());
    }

    #[test]
    fn test_enrich_idempotent_recomputes_stale_values() {
        let mut entry = DayEntry::new("1st Day", "08:00 AM", "04:30 PM");
        entry.hours_worked = Some("99:99".to_string());
        let mut stale = card("A", vec![entry]);
        stale.total_hours_worked = Some("99:99".to_string());

        let batch = enrich_timecards(vec![stale]);
        assert_eq!(batch.timecards[0].days[0].hours_worked.as_deref(), Some("8:30"));
        assert_eq!(batch.timecards[0].total_hours_worked.as_deref(), Some("8:30"));

        // Enriching the enriched output changes nothing
        let again = enrich_timecards(batch.timecards.clone());
        assert_eq!(again.timecards, batch.timecards);
    }

    #[test]
    fn test_enrich_issue_indices_across_cards() {
        let cards = vec![
            card("A", vec![DayEntry::new("1st Day", "bad", "04:30 PM")]),
            card("B", vec![
                DayEntry::new("1st Day", "08:00 AM", "04:30 PM"),
                DayEntry::new("2nd Day", "08:00 AM", "worse"),
            ]),
        ];

        let batch = enrich_timecards(cards);
        assert_eq!(batch.issues.len(), 2);
        assert_eq!(
            (batch.issues[0].timecard_index, batch.issues[0].entry_index),
            (0, 0)
        );
        assert_eq!(
            (batch.issues[1].timecard_index, batch.issues[1].entry_index),
            (1, 1)
        );
        // Card B's valid entry still totals
        assert_eq!(batch.timecards[1].total_hours_worked.as_deref(), Some("8:30"));
    }

    #[test]
    fn test_enrich_entries_flat() {
        let entries = vec![
            DayEntry::new("1st Day", "08:00 AM", "04:30 PM"),
            DayEntry::new("2nd Day", "09:00 PM", "05:00 AM"),
        ];

        let result = enrich_entries(entries);
        assert_eq!(result.entries[0].hours_worked.as_deref(), Some("8:30"));
        assert_eq!(result.entries[1].hours_worked.as_deref(), Some("8:00"));
        assert_eq!(result.total_hours_worked, "16:30");
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_end_to_end_from_model_output() {
        let raw = r#"```json
[
  {"days": [{"day": "1st Day", "time_in": "08:00 AM", "time_out": "04:30 PM"}]},
  {"days": [{"day": "2nd Day", "time_in": "09:00 AM", "time_out": "09:00 AM"}]}
]
```"#;

        let cards = parse_timecards(raw).unwrap();
        let batch = enrich_timecards(cards);

        assert_eq!(batch.timecards[0].name, "Timecard 1");
        assert_eq!(batch.timecards[1].name, "Timecard 2");
        assert_eq!(batch.timecards[0].days[0].hours_worked.as_deref(), Some("8:30"));
        assert_eq!(batch.timecards[0].total_hours_worked.as_deref(), Some("8:30"));
        // Equal in/out counts as a full overnight day
        assert_eq!(batch.timecards[1].days[0].hours_worked.as_deref(), Some("24:00"));
        assert_eq!(batch.timecards[1].total_hours_worked.as_deref(), Some("24:00"));
        assert!(batch.issues.is_empty());
    }
}
