//! Compliance evaluation: canonical records against one standard definition.

use chrono::Utc;
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::data::{CanonicalVaccineRecord, ComplianceResult, RecordStatus};
use crate::registry::StandardDefinition;
use crate::vocab::VaccineId;

/// Evaluate canonical records against a standard.
///
/// Dose counts come from recognized records only; unrecognized records are
/// retained in the output for transparency, marked `Review Needed`, and never
/// surface in `missing_vaccines`. Records keep their input order; grouping is
/// internal to the algorithm. Total over its input: malformed or degraded
/// records lower confidence, they never fail the evaluation.
pub fn evaluate(
    records: Vec<CanonicalVaccineRecord>,
    standard: &StandardDefinition,
) -> ComplianceResult {
    let mut records = records;

    // Group record indices by recognized vaccine id. IndexMap keeps grouping
    // deterministic without disturbing the output order.
    let mut doses: IndexMap<VaccineId, Vec<usize>> = IndexMap::new();
    for (idx, record) in records.iter().enumerate() {
        if record.vaccine_id.is_recognized() {
            doses.entry(record.vaccine_id).or_default().push(idx);
        }
    }

    let mut missing: IndexSet<VaccineId> = IndexSet::new();
    let mut required: IndexSet<VaccineId> = IndexSet::new();
    for requirement in standard.requirements() {
        required.insert(requirement.vaccine_id);
        let contributing = doses
            .get(&requirement.vaccine_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let status = if contributing.len() as u32 >= requirement.minimum_dose_count {
            RecordStatus::Compliant
        } else {
            // Covers both "present but under the minimum" and "absent"; only
            // the former has contributing records to mark.
            missing.insert(requirement.vaccine_id);
            RecordStatus::ReviewNeeded
        };
        for &idx in contributing {
            records[idx].status = Some(status);
        }
    }

    // Recognized vaccines the standard never asks for do not block
    // compliance, but they stay visible instead of being silently hidden.
    for (vaccine_id, indices) in &doses {
        if !required.contains(vaccine_id) {
            for &idx in indices {
                records[idx].status = Some(RecordStatus::NonCompliant);
            }
        }
    }
    for record in &mut records {
        if !record.vaccine_id.is_recognized() {
            record.status = Some(RecordStatus::ReviewNeeded);
        }
    }

    let mut confidence_sum = 0.0f64;
    let mut confidence_count = 0usize;
    for record in &records {
        if matches!(
            record.status,
            Some(RecordStatus::Compliant | RecordStatus::ReviewNeeded)
        ) {
            confidence_sum += f64::from(record.confidence);
            confidence_count += 1;
        }
    }
    let confidence_score = if confidence_count == 0 {
        0.0
    } else {
        (confidence_sum / confidence_count as f64) as f32
    };

    let is_compliant = missing.is_empty();
    let missing_vaccines: Vec<VaccineId> = missing.into_iter().collect();
    debug!(
        standard = %standard.standard_id,
        compliant = is_compliant,
        missing = missing_vaccines.len(),
        "evaluated compliance"
    );

    ComplianceResult {
        standard_id: standard.standard_id.clone(),
        is_compliant,
        confidence_score,
        compliance_notes: build_notes(&standard.standard_id, &missing_vaccines),
        records,
        missing_vaccines,
        extracted_at: Utc::now(),
    }
}

/// One-line outcome summary in the shape downstream agents expect.
fn build_notes(standard_id: &str, missing: &[VaccineId]) -> String {
    let heading = format!(
        "Validated against {} requirements.",
        standard_id.to_uppercase()
    );
    if missing.is_empty() {
        format!("{heading} All required vaccines present.")
    } else {
        let names: Vec<&str> = missing.iter().map(|id| id.display_name()).collect();
        format!("{heading} Missing: {}", names.join(", "))
    }
}
