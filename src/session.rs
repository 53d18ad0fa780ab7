//! Session aggregation: merging canonical records from multiple uploads into
//! one deduplicated timeline.
//!
//! The engine never persists sessions; callers fetch whatever records belong
//! to a session from their store and hand over a snapshot per call.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::data::{AdministeredDate, CanonicalVaccineRecord};
use crate::vocab::VaccineId;

/// Merge session records into a deduplicated, date-ordered timeline.
///
/// Two records are duplicates when they share `(vaccine_id, date)` with a
/// known date; the higher-confidence one survives, and an exact confidence
/// tie keeps the earliest-inserted. Unknown-dated records are never treated
/// as duplicates of anything: separate doses whose dates failed to parse must
/// not be discarded. Output is ascending by date, stable for equal dates,
/// with unknown-dated records appended in insertion order.
pub fn aggregate(records: Vec<CanonicalVaccineRecord>) -> Vec<CanonicalVaccineRecord> {
    let mut keep = vec![true; records.len()];
    let mut best_by_key: HashMap<(VaccineId, NaiveDate), usize> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        let AdministeredDate::Known(date) = record.date_administered else {
            continue;
        };
        match best_by_key.entry((record.vaccine_id, date)) {
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
            Entry::Occupied(mut slot) => {
                let incumbent = *slot.get();
                // Strict comparison keeps the earliest record on exact ties.
                let dropped = if record.confidence > records[incumbent].confidence {
                    keep[incumbent] = false;
                    slot.insert(idx);
                    incumbent
                } else {
                    keep[idx] = false;
                    idx
                };
                debug!(
                    vaccine = %record.vaccine_id,
                    %date,
                    dropped,
                    "dropped duplicate dose during session aggregation"
                );
            }
        }
    }

    let mut dated: Vec<CanonicalVaccineRecord> = Vec::new();
    let mut undated: Vec<CanonicalVaccineRecord> = Vec::new();
    for (idx, record) in records.into_iter().enumerate() {
        if !keep[idx] {
            continue;
        }
        match record.date_administered {
            AdministeredDate::Known(_) => dated.push(record),
            AdministeredDate::Unknown => undated.push(record),
        }
    }
    // Stable sort: equal dates stay in insertion order.
    dated.sort_by_key(|record| record.date_administered.known());
    dated.extend(undated);
    dated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::canonicalize;
    use crate::data::RawFieldRecord;

    fn record(name: &str, date: Option<&str>, confidence: f32) -> CanonicalVaccineRecord {
        let mut raw = RawFieldRecord::new(name, name).with_confidence(confidence);
        if let Some(date) = date {
            raw = raw.with_date(date);
        }
        canonicalize(&raw)
    }

    #[test]
    fn exact_duplicates_collapse_to_one_record() {
        let merged = aggregate(vec![
            record("MMR", Some("2021-01-01"), 0.9),
            record("MMR", Some("2021-01-01"), 0.9),
        ]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn higher_confidence_duplicate_wins() {
        let merged = aggregate(vec![
            record("MMR", Some("2021-01-01"), 0.6),
            record("MMR", Some("2021-01-01"), 0.9),
        ]);
        assert_eq!(merged.len(), 1);
        assert!((merged[0].confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn confidence_ties_keep_the_earliest_inserted_record() {
        let mut first = record("MMR", Some("2021-01-01"), 0.8);
        first.original_text = "first upload".to_string();
        let mut second = record("MMR", Some("2021-01-01"), 0.8);
        second.original_text = "second upload".to_string();
        let merged = aggregate(vec![first, second]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].original_text, "first upload");
    }

    #[test]
    fn same_vaccine_different_dates_are_distinct_doses() {
        let merged = aggregate(vec![
            record("Tetanus", Some("2013-04-01"), 1.0),
            record("Tetanus", Some("2023-04-01"), 1.0),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn unknown_dated_records_never_deduplicate() {
        let merged = aggregate(vec![
            record("MMR", None, 0.9),
            record("MMR", None, 0.9),
            record("MMR", Some("2021-01-01"), 0.9),
        ]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn output_is_date_ascending_with_unknowns_appended_in_insertion_order() {
        let mut late_unknown = record("Polio", None, 1.0);
        late_unknown.original_text = "second unknown".to_string();
        let mut early_unknown = record("HPV", None, 1.0);
        early_unknown.original_text = "first unknown".to_string();
        let merged = aggregate(vec![
            record("Tetanus", Some("2023-04-01"), 1.0),
            early_unknown,
            record("MMR", Some("2019-02-01"), 1.0),
            late_unknown,
        ]);
        let order: Vec<&str> = merged
            .iter()
            .map(|r| r.original_text.as_str())
            .collect();
        assert_eq!(
            order,
            vec!["MMR", "Tetanus", "first unknown", "second unknown"]
        );
    }

    #[test]
    fn unrecognized_records_with_the_same_unknown_date_all_survive() {
        let merged = aggregate(vec![
            record("Qwerty123", None, 0.5),
            record("Qwerty123", None, 0.5),
        ]);
        assert_eq!(merged.len(), 2);
    }
}
