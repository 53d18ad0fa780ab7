use vaxcheck::{
    aggregate, canonicalize, normalize, ComplianceEngine, RawFieldRecord, VaccineId,
};

fn raw(name: &str, date: Option<&str>, confidence: f32) -> RawFieldRecord {
    let mut record = RawFieldRecord::new(
        format!("{name} - {}", date.unwrap_or("date illegible")),
        name,
    )
    .with_confidence(confidence);
    if let Some(date) = date {
        record = record.with_date(date);
    }
    record
}

fn canonical(name: &str, date: Option<&str>, confidence: f32) -> vaxcheck::CanonicalVaccineRecord {
    canonicalize(&raw(name, date, confidence))
}

#[test]
fn normalization_is_idempotent_over_the_vocabulary() {
    for id in VaccineId::VOCABULARY {
        assert_eq!(normalize(id.display_name()), id);
        // A second pass over the canonical display form changes nothing.
        assert_eq!(normalize(normalize(id.display_name()).display_name()), id);
    }
}

#[test]
fn identical_raw_records_canonicalize_identically() {
    let input = raw("Chiken Pox", Some("05/01/2020"), 0.8);
    let first = canonicalize(&input);
    for _ in 0..5 {
        let again = canonicalize(&input);
        assert_eq!(again.vaccine_id, first.vaccine_id);
        assert_eq!(again.date_administered, first.date_administered);
        assert_eq!(again.confidence, first.confidence);
        assert_eq!(again.original_text, first.original_text);
    }
}

#[test]
fn adding_a_missing_required_dose_never_hurts_compliance() {
    let engine = ComplianceEngine::default();

    let partial = vec![canonical("MMR", Some("2021-01-01"), 0.9)];
    let before = engine.evaluate(partial.clone(), "us_cdc").unwrap();
    assert!(!before.is_compliant);

    let mut extended = partial.clone();
    extended.push(canonical("Tetanus", Some("2022-06-01"), 0.9));
    let after = engine.evaluate(extended.clone(), "us_cdc").unwrap();

    // missing_vaccines can only shrink, never grow.
    for vaccine in &after.missing_vaccines {
        assert!(
            before.missing_vaccines.contains(vaccine),
            "{vaccine} appeared in missing after adding a dose"
        );
    }
    assert!(after.missing_vaccines.len() < before.missing_vaccines.len());

    extended.push(canonical("Hepatitis B", Some("2020-02-01"), 0.9));
    let complete = engine.evaluate(extended, "us_cdc").unwrap();
    assert!(complete.is_compliant);
    assert!(complete.missing_vaccines.is_empty());
}

#[test]
fn exact_duplicates_never_change_the_compliance_outcome() {
    let engine = ComplianceEngine::default();
    let base = vec![
        canonical("MMR", Some("2021-01-01"), 0.9),
        canonical("Tetanus", Some("2022-06-01"), 0.85),
    ];
    let mut with_duplicate = base.clone();
    with_duplicate.push(canonical("MMR", Some("2021-01-01"), 0.9));

    let without = engine.aggregate_and_evaluate(base, "us_cdc").unwrap();
    let with = engine.aggregate_and_evaluate(with_duplicate, "us_cdc").unwrap();

    assert_eq!(without.is_compliant, with.is_compliant);
    assert_eq!(without.missing_vaccines, with.missing_vaccines);
    assert_eq!(without.records.len(), with.records.len());
}

#[test]
fn unrecognized_input_is_contained_but_never_vanishes() {
    let engine = ComplianceEngine::default();
    let noise = canonical("Zzyxx Serum", None, 0.9);
    assert_eq!(noise.vaccine_id, VaccineId::Unrecognized);

    for standard_id in ["us_cdc", "cornell_tech", "uk_nhs", "canada_health"] {
        let result = engine
            .aggregate_and_evaluate(vec![noise.clone()], standard_id)
            .unwrap();
        assert!(
            !result.missing_vaccines.contains(&VaccineId::Unrecognized),
            "{standard_id} leaked the sentinel into missing_vaccines"
        );
        assert_eq!(result.records.len(), 1, "{standard_id} dropped the record");
        assert_eq!(result.records[0].original_text, noise.original_text);
    }
}

#[test]
fn aggregation_is_deterministic_for_a_fixed_snapshot() {
    let snapshot = vec![
        canonical("Tetanus", Some("2013-04-01"), 0.7),
        canonical("MMR", None, 0.9),
        canonical("Tetanus", Some("2013-04-01"), 0.9),
        canonical("Polio", Some("2001-09-10"), 1.0),
    ];
    let first = aggregate(snapshot.clone());
    let second = aggregate(snapshot);
    let keys = |records: &[vaxcheck::CanonicalVaccineRecord]| {
        records
            .iter()
            .map(|r| (r.vaccine_id, r.date_administered, r.original_text.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&first), keys(&second));
    // Higher-confidence Tetanus duplicate won; three records remain.
    assert_eq!(first.len(), 3);
    assert!((first
        .iter()
        .find(|r| r.vaccine_id == VaccineId::Tetanus)
        .unwrap()
        .confidence
        - 0.9)
        .abs()
        < 1e-6);
}
