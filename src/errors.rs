use thiserror::Error;

use crate::types::StandardId;

/// Error type for standard-registry lookups and registry assembly.
///
/// Degraded input (an unrecognized vaccine name, an unparsable date) is never
/// an error; it is carried through results as `Unrecognized`/`Unknown` values
/// with a lowered confidence score.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComplianceError {
    /// The requested standard id is not registered.
    #[error("unknown compliance standard '{0}'")]
    UnknownStandard(StandardId),
    /// A standard with this id is already registered.
    #[error("compliance standard '{0}' is already registered")]
    DuplicateStandard(StandardId),
    /// A standard was registered with an invalid requirement set.
    #[error("invalid requirement set for standard '{standard_id}': {detail}")]
    InvalidStandard {
        /// Id of the standard that failed validation.
        standard_id: StandardId,
        /// Description of the violated rule.
        detail: String,
    },
}
