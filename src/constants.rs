/// Constants used by the vocabulary normalizer.
pub mod vocab {
    /// Minimum normalized Levenshtein similarity for a fuzzy alias match.
    pub const SIMILARITY_THRESHOLD: f64 = 0.8;
    /// Queries shorter than this skip the fuzzy tier; short tokens like `Td`
    /// must hit the exact tiers or stay unrecognized.
    pub const FUZZY_MIN_QUERY_CHARS: usize = 4;
}

/// Constants used by record canonicalization.
pub mod canonicalize {
    /// Confidence multiplier applied once per degraded field (unrecognized
    /// vaccine name, unknown administration date).
    pub const DEGRADED_FIELD_PENALTY: f32 = 0.5;

    /// Accepted administration-date formats, tried in order; first parse wins.
    /// ISO-8601 leads, regional variants follow.
    pub const DATE_FORMATS: &[&str] = &[
        "%Y-%m-%d",   // 2024-10-15 (ISO)
        "%Y/%m/%d",   // 2024/10/15
        "%m/%d/%Y",   // 10/15/2024
        "%d.%m.%Y",   // 15.10.2024
        "%d/%m/%Y",   // 25/10/2024 (reachable only when the month slot is invalid)
        "%B %d, %Y",  // October 15, 2024
        "%b %d, %Y",  // Oct 15, 2024
        "%b. %d, %Y", // Oct. 15, 2024
    ];
}

/// Identifiers for the built-in compliance standards.
pub mod registry {
    /// General US CDC guidelines.
    pub const STANDARD_US_CDC: &str = "us_cdc";
    /// Cornell Tech enrollment requirements.
    pub const STANDARD_CORNELL_TECH: &str = "cornell_tech";
    /// UK NHS requirements.
    pub const STANDARD_UK_NHS: &str = "uk_nhs";
    /// Canada Health requirements.
    pub const STANDARD_CANADA_HEALTH: &str = "canada_health";
}
