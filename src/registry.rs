//! Compliance standard definitions and the standard registry.
//!
//! A standard is a declarative requirement set: which vaccines, how many
//! doses. Requirement content is deployment policy; the registry only fixes
//! the shape and validates it at registration. The built-in registry is
//! process-wide and read-only after first use.

use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::registry::{
    STANDARD_CANADA_HEALTH, STANDARD_CORNELL_TECH, STANDARD_UK_NHS, STANDARD_US_CDC,
};
use crate::errors::ComplianceError;
use crate::types::StandardId;
use crate::vocab::VaccineId;

/// One rule within a standard: a vaccine and its minimum dose count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Required vaccine; must be a vocabulary member.
    pub vaccine_id: VaccineId,
    /// Minimum number of administered doses; at least 1.
    pub minimum_dose_count: u32,
    /// Maximum spacing between doses, in days. Data-model extension point:
    /// carried and serialized, not yet enforced by the evaluator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_interval_days: Option<u32>,
}

impl Requirement {
    /// Single-vaccine requirement with no interval constraint.
    pub fn new(vaccine_id: VaccineId, minimum_dose_count: u32) -> Self {
        Self {
            vaccine_id,
            minimum_dose_count,
            max_interval_days: None,
        }
    }
}

/// A named, immutable requirement set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardDefinition {
    /// Registry key for this standard.
    pub standard_id: StandardId,
    requirements: Vec<Requirement>,
}

impl StandardDefinition {
    /// Build a definition; requirement order is preserved and drives the
    /// order of `missing_vaccines` in evaluation results.
    pub fn new(standard_id: impl Into<StandardId>, requirements: Vec<Requirement>) -> Self {
        Self {
            standard_id: standard_id.into(),
            requirements,
        }
    }

    /// The ordered requirement list.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }
}

/// Registry of named standards. Assembled once at startup, read-only
/// afterwards; lookups borrow, nothing mutates.
#[derive(Clone, Debug, Default)]
pub struct StandardRegistry {
    standards: IndexMap<StandardId, StandardDefinition>,
}

impl StandardRegistry {
    /// Empty registry for deployments that configure their own standards.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in standards: `us_cdc`,
    /// `cornell_tech`, `uk_nhs`, and `canada_health`.
    pub fn builtin() -> Self {
        let single_dose = |ids: &[VaccineId]| {
            ids.iter()
                .map(|&vaccine_id| Requirement::new(vaccine_id, 1))
                .collect()
        };
        let mut registry = Self::new();
        let definitions = [
            StandardDefinition::new(
                STANDARD_US_CDC,
                single_dose(&[VaccineId::Mmr, VaccineId::Tetanus, VaccineId::HepatitisB]),
            ),
            StandardDefinition::new(
                STANDARD_CORNELL_TECH,
                single_dose(&[
                    VaccineId::Mmr,
                    VaccineId::Tetanus,
                    VaccineId::HepatitisB,
                    VaccineId::Meningococcal,
                    VaccineId::TbTest,
                ]),
            ),
            StandardDefinition::new(
                STANDARD_UK_NHS,
                single_dose(&[VaccineId::Mmr, VaccineId::Tetanus, VaccineId::Meningococcal]),
            ),
            StandardDefinition::new(
                STANDARD_CANADA_HEALTH,
                single_dose(&[
                    VaccineId::Mmr,
                    VaccineId::Tetanus,
                    VaccineId::HepatitisB,
                    VaccineId::Varicella,
                ]),
            ),
        ];
        for definition in definitions {
            registry
                .register(definition)
                .expect("built-in standards are valid");
        }
        registry
    }

    /// Register a standard, validating its requirement set.
    pub fn register(&mut self, definition: StandardDefinition) -> Result<(), ComplianceError> {
        let standard_id = definition.standard_id.clone();
        if self.standards.contains_key(&standard_id) {
            return Err(ComplianceError::DuplicateStandard(standard_id));
        }
        validate(&definition)?;
        self.standards.insert(standard_id, definition);
        Ok(())
    }

    /// Look up a standard by id.
    pub fn get(&self, standard_id: &str) -> Result<&StandardDefinition, ComplianceError> {
        self.standards
            .get(standard_id)
            .ok_or_else(|| ComplianceError::UnknownStandard(standard_id.to_string()))
    }

    /// Registered standard ids, in registration order.
    pub fn standard_ids(&self) -> impl Iterator<Item = &str> {
        self.standards.keys().map(String::as_str)
    }

    /// Number of registered standards.
    pub fn len(&self) -> usize {
        self.standards.len()
    }

    /// True when no standard is registered.
    pub fn is_empty(&self) -> bool {
        self.standards.is_empty()
    }
}

fn validate(definition: &StandardDefinition) -> Result<(), ComplianceError> {
    let invalid = |detail: &str| ComplianceError::InvalidStandard {
        standard_id: definition.standard_id.clone(),
        detail: detail.to_string(),
    };
    if definition.requirements.is_empty() {
        return Err(invalid("requirement list is empty"));
    }
    let mut seen: Vec<VaccineId> = Vec::new();
    for requirement in &definition.requirements {
        if !requirement.vaccine_id.is_recognized() {
            return Err(invalid("requirements must reference the fixed vocabulary"));
        }
        if requirement.minimum_dose_count == 0 {
            return Err(invalid("minimum dose count must be at least 1"));
        }
        if seen.contains(&requirement.vaccine_id) {
            return Err(invalid("duplicate vaccine in requirement list"));
        }
        seen.push(requirement.vaccine_id);
    }
    Ok(())
}

/// Shared read-only registry holding the built-in standards, built on first
/// access.
pub fn builtin_registry() -> &'static StandardRegistry {
    static REGISTRY: OnceLock<StandardRegistry> = OnceLock::new();
    REGISTRY.get_or_init(StandardRegistry::builtin)
}
