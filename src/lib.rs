#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Record canonicalization (free-text extractor output to canonical records).
pub mod canonical;
/// Centralized constants: thresholds, penalties, date formats, standard ids.
pub mod constants;
/// Data model: raw and canonical records, statuses, compliance results.
pub mod data;
/// Engine façade exposing the caller-facing operations.
pub mod engine;
/// Compliance evaluation against a standard definition.
pub mod evaluate;
/// Standard definitions and the standard registry.
pub mod registry;
/// Session aggregation into a deduplicated timeline.
pub mod session;
/// Shared type aliases.
pub mod types;
/// Text folding helpers.
pub mod utils;
/// Canonical vaccine vocabulary and name normalization.
pub mod vocab;

mod errors;

pub use canonical::{canonicalize, parse_date};
pub use data::{
    AdministeredDate, CanonicalVaccineRecord, ComplianceResult, RawFieldRecord, RecordStatus,
};
pub use engine::ComplianceEngine;
pub use errors::ComplianceError;
pub use evaluate::evaluate;
pub use registry::{builtin_registry, Requirement, StandardDefinition, StandardRegistry};
pub use session::aggregate;
pub use types::{ClaimedName, LanguageTag, OriginalText, SessionId, StandardId};
pub use vocab::{normalize, VaccineId};
