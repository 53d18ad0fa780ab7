//! Engine façade: the three operations exposed to transport layers.
//!
//! Each operation is a pure function over its inputs. The registry is
//! read-only after construction, so an engine value can serve concurrent
//! requests without locking; handlers may call it directly.

use crate::canonical;
use crate::data::{CanonicalVaccineRecord, ComplianceResult, RawFieldRecord};
use crate::errors::ComplianceError;
use crate::evaluate;
use crate::registry::StandardRegistry;
use crate::session;

/// Standardization and compliance engine over a fixed standard registry.
#[derive(Clone, Debug)]
pub struct ComplianceEngine {
    registry: StandardRegistry,
}

impl Default for ComplianceEngine {
    /// Engine over the built-in standards.
    fn default() -> Self {
        Self::new(StandardRegistry::builtin())
    }
}

impl ComplianceEngine {
    /// Engine over a caller-assembled registry.
    pub fn new(registry: StandardRegistry) -> Self {
        Self { registry }
    }

    /// The registry this engine evaluates against.
    pub fn registry(&self) -> &StandardRegistry {
        &self.registry
    }

    /// Canonicalize one raw extracted record. Infallible; see
    /// [`canonical::canonicalize`].
    pub fn canonicalize(&self, raw: &RawFieldRecord) -> CanonicalVaccineRecord {
        canonical::canonicalize(raw)
    }

    /// Evaluate records against a named standard.
    ///
    /// Fails only with [`ComplianceError::UnknownStandard`]; degraded records
    /// are data, not errors.
    pub fn evaluate(
        &self,
        records: Vec<CanonicalVaccineRecord>,
        standard_id: &str,
    ) -> Result<ComplianceResult, ComplianceError> {
        let standard = self.registry.get(standard_id)?;
        Ok(evaluate::evaluate(records, standard))
    }

    /// Merge a session's records into a deduplicated timeline, then evaluate
    /// the merged timeline against a named standard.
    pub fn aggregate_and_evaluate(
        &self,
        session_records: Vec<CanonicalVaccineRecord>,
        standard_id: &str,
    ) -> Result<ComplianceResult, ComplianceError> {
        let standard = self.registry.get(standard_id)?;
        Ok(evaluate::evaluate(
            session::aggregate(session_records),
            standard,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Requirement, StandardDefinition};
    use crate::vocab::VaccineId;

    #[test]
    fn default_engine_serves_the_builtin_standards() {
        let engine = ComplianceEngine::default();
        assert_eq!(engine.registry().len(), 4);
        let raw = RawFieldRecord::new("MMR - 2021-01-01", "MMR").with_date("2021-01-01");
        let record = engine.canonicalize(&raw);
        let result = engine.evaluate(vec![record], "uk_nhs").unwrap();
        assert_eq!(result.standard_id, "uk_nhs");
    }

    #[test]
    fn unknown_standard_surfaces_verbatim_from_both_entry_points() {
        let engine = ComplianceEngine::default();
        assert_eq!(
            engine.evaluate(Vec::new(), "missing_std").unwrap_err(),
            ComplianceError::UnknownStandard("missing_std".into())
        );
        assert_eq!(
            engine
                .aggregate_and_evaluate(Vec::new(), "missing_std")
                .unwrap_err(),
            ComplianceError::UnknownStandard("missing_std".into())
        );
    }

    #[test]
    fn custom_registry_drives_evaluation() {
        let mut registry = StandardRegistry::new();
        registry
            .register(StandardDefinition::new(
                "flu_only",
                vec![Requirement::new(VaccineId::Influenza, 1)],
            ))
            .unwrap();
        let engine = ComplianceEngine::new(registry);
        let record = engine.canonicalize(
            &RawFieldRecord::new("Flu shot - 2024-10-01", "Flu shot").with_date("2024-10-01"),
        );
        let result = engine.evaluate(vec![record], "flu_only").unwrap();
        assert!(result.is_compliant);
        assert!(engine.evaluate(Vec::new(), "us_cdc").is_err());
    }
}
