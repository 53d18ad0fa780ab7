//! Data model for the standardization and compliance pipeline: raw extractor
//! output, canonical records, and evaluation results.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{LanguageTag, OriginalText, StandardId};
use crate::vocab::VaccineId;

/// One extracted vaccine line as reported by the upstream vision/OCR stage.
/// Free text of unknown language and convention; the engine imposes no shape
/// beyond these fields. Immutable once produced.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawFieldRecord {
    /// Verbatim document line, preserved for the audit trail.
    pub original_text: OriginalText,
    /// Vaccine name as the extractor claimed it (any language or spelling).
    pub claimed_vaccine_name: String,
    /// Administration date string in whatever format the document used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_administered: Option<String>,
    /// Language the extractor detected for the source document.
    #[serde(default)]
    pub source_language: LanguageTag,
    /// Extractor's self-reported confidence in [0, 1].
    pub extraction_confidence: f32,
    /// Vaccine lot number when the document carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    /// Administering provider or clinic when the document carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// English translation of the original line, if one was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
}

impl RawFieldRecord {
    /// Build a record with full extraction confidence and no date; callers
    /// layer the remaining fields with the `with_*` methods.
    pub fn new(original_text: impl Into<String>, claimed_vaccine_name: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            claimed_vaccine_name: claimed_vaccine_name.into(),
            date_administered: None,
            source_language: "en".to_string(),
            extraction_confidence: 1.0,
            lot_number: None,
            provider: None,
            translated_text: None,
        }
    }

    /// Set the administration date string.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date_administered = Some(date.into());
        self
    }

    /// Set the extractor confidence.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.extraction_confidence = confidence;
        self
    }

    /// Set the detected source language.
    pub fn with_language(mut self, language: impl Into<LanguageTag>) -> Self {
        self.source_language = language.into();
        self
    }

    /// Set the vaccine lot number.
    pub fn with_lot_number(mut self, lot_number: impl Into<String>) -> Self {
        self.lot_number = Some(lot_number.into());
        self
    }

    /// Set the administering provider.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Set the translated text.
    pub fn with_translated_text(mut self, translated: impl Into<String>) -> Self {
        self.translated_text = Some(translated.into());
        self
    }
}

/// Parsed administration date. Unparsable or absent dates become `Unknown`
/// rather than failing the record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdministeredDate {
    /// Calendar date parsed from the document.
    Known(NaiveDate),
    /// The document carried no parseable date.
    Unknown,
}

impl AdministeredDate {
    /// The parsed date, when there is one.
    pub fn known(self) -> Option<NaiveDate> {
        match self {
            AdministeredDate::Known(date) => Some(date),
            AdministeredDate::Unknown => None,
        }
    }

    /// True when no date could be parsed.
    pub fn is_unknown(self) -> bool {
        matches!(self, AdministeredDate::Unknown)
    }
}

/// Per-record compliance status, assigned by the evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    /// The record contributes to a fully satisfied requirement.
    #[serde(rename = "Compliant")]
    Compliant,
    /// The record's vaccine is irrelevant to the evaluated standard.
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
    /// Under the required dose count, or the name needs human review.
    #[serde(rename = "Review Needed")]
    ReviewNeeded,
}

/// A vaccine record after canonicalization: fixed-vocabulary id, parsed date,
/// penalized confidence, and the verbatim source text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CanonicalVaccineRecord {
    /// Canonical vaccine id, or `Unrecognized` when nothing matched.
    pub vaccine_id: VaccineId,
    /// Parsed administration date.
    pub date_administered: AdministeredDate,
    /// Verbatim document line; never dropped, whatever the mapping outcome.
    pub original_text: OriginalText,
    /// Extraction confidence after degraded-field penalties, in [0, 1].
    pub confidence: f32,
    /// Evaluation status; `None` until the record passes through an
    /// evaluation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Lot number carried over from extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    /// Provider carried over from extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Translation carried over from extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
}

/// Outcome of one compliance evaluation. A value object: built fresh per
/// call, never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// Standard the records were evaluated against.
    pub standard_id: StandardId,
    /// True iff every requirement of the standard is satisfied.
    pub is_compliant: bool,
    /// Mean confidence of the records that fed a `Compliant` or
    /// `Review Needed` determination; 0.0 when none did.
    pub confidence_score: f32,
    /// Evaluated records in input order, each with its status assigned.
    pub records: Vec<CanonicalVaccineRecord>,
    /// Required vaccines that are absent or under their dose count, in
    /// requirement order, without duplicates.
    pub missing_vaccines: Vec<VaccineId>,
    /// Human/agent-readable summary of the outcome.
    pub compliance_notes: String,
    /// When this evaluation ran (not when the document was issued).
    pub extracted_at: DateTime<Utc>,
}
