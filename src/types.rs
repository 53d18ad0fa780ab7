/// Identifier for a registered compliance standard.
/// Examples: `us_cdc`, `cornell_tech`, `uk_nhs`
pub type StandardId = String;
/// Caller-defined grouping key for multi-upload sessions.
/// Example: `sess_7f3a`
pub type SessionId = String;
/// Language tag reported by the upstream extractor.
/// Examples: `en`, `es`, `zh`
pub type LanguageTag = String;
/// Verbatim document text preserved for audit trails.
/// Example: `MMR Vaccine - 05/15/2023, Lot: ABC123`
pub type OriginalText = String;
/// Free-text vaccine name as claimed by the extractor.
/// Examples: `MMR II`, `Chicken Pox`, `Td`
pub type ClaimedName = String;
