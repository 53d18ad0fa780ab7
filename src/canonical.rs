//! Record canonicalization: raw extractor output into canonical records.
//!
//! Canonicalization is total. A name that maps to nothing becomes
//! [`VaccineId::Unrecognized`], a date that parses under no accepted format
//! becomes [`AdministeredDate::Unknown`], and each degraded field halves the
//! record's confidence; the record itself always survives.

use chrono::NaiveDate;
use tracing::debug;

use crate::constants::canonicalize::{DATE_FORMATS, DEGRADED_FIELD_PENALTY};
use crate::data::{AdministeredDate, CanonicalVaccineRecord, RawFieldRecord};
use crate::vocab::{self, VaccineId};

/// Convert one raw extracted record into canonical form.
///
/// Deterministic and infallible: identical input always yields an identical
/// record, and degraded fields lower confidence instead of failing the call.
pub fn canonicalize(raw: &RawFieldRecord) -> CanonicalVaccineRecord {
    let vaccine_id = vocab::normalize(&raw.claimed_vaccine_name);
    let date_administered = raw
        .date_administered
        .as_deref()
        .map_or(AdministeredDate::Unknown, parse_date);

    let mut confidence = raw.extraction_confidence.clamp(0.0, 1.0);
    if vaccine_id == VaccineId::Unrecognized {
        confidence *= DEGRADED_FIELD_PENALTY;
    }
    if date_administered.is_unknown() {
        confidence *= DEGRADED_FIELD_PENALTY;
    }

    CanonicalVaccineRecord {
        vaccine_id,
        date_administered,
        original_text: raw.original_text.clone(),
        confidence,
        status: None,
        lot_number: raw.lot_number.clone(),
        provider: raw.provider.clone(),
        translated_text: raw.translated_text.clone(),
    }
}

/// Parse a date string against the accepted format list; first parse wins.
pub fn parse_date(text: &str) -> AdministeredDate {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return AdministeredDate::Unknown;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return AdministeredDate::Known(date);
        }
    }
    debug!(date = trimmed, "administration date matched no accepted format");
    AdministeredDate::Unknown
}
