//! Canonical vaccine vocabulary and name normalization.
//!
//! Extracted vaccine names arrive in arbitrary language, spelling, and
//! casing. [`normalize`] maps them onto the closed [`VaccineId`] vocabulary
//! through three tiers (exact canonical name, exact alias, fuzzy alias) and
//! returns [`VaccineId::Unrecognized`] when nothing clears the similarity
//! threshold. The lookup tables are built once per process and never mutated.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::vocab::{FUZZY_MIN_QUERY_CHARS, SIMILARITY_THRESHOLD};
use crate::utils::fold_name;

/// Canonical vaccine identifiers. The closed set prevents upstream AI output
/// from introducing invented vaccine names: anything outside this vocabulary
/// canonicalizes to [`VaccineId::Unrecognized`] with the original text kept
/// for audit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VaccineId {
    /// Measles, mumps, and rubella combination vaccine.
    #[serde(rename = "MMR")]
    Mmr,
    /// Measles (standalone).
    #[serde(rename = "Measles")]
    Measles,
    /// Mumps (standalone).
    #[serde(rename = "Mumps")]
    Mumps,
    /// Rubella (standalone).
    #[serde(rename = "Rubella")]
    Rubella,
    /// Tetanus, including Td boosters.
    #[serde(rename = "Tetanus")]
    Tetanus,
    /// Diphtheria (standalone).
    #[serde(rename = "Diphtheria")]
    Diphtheria,
    /// Pertussis (whooping cough).
    #[serde(rename = "Pertussis")]
    Pertussis,
    /// Tetanus, diphtheria, and pertussis combination vaccine.
    #[serde(rename = "Tdap")]
    Tdap,
    /// Hepatitis A.
    #[serde(rename = "Hepatitis A")]
    HepatitisA,
    /// Hepatitis B.
    #[serde(rename = "Hepatitis B")]
    HepatitisB,
    /// Varicella (chickenpox).
    #[serde(rename = "Varicella")]
    Varicella,
    /// Meningococcal disease.
    #[serde(rename = "Meningococcal")]
    Meningococcal,
    /// COVID-19.
    #[serde(rename = "COVID-19")]
    Covid19,
    /// Seasonal influenza.
    #[serde(rename = "Influenza")]
    Influenza,
    /// Human papillomavirus.
    #[serde(rename = "HPV")]
    Hpv,
    /// Poliomyelitis (IPV/OPV).
    #[serde(rename = "Polio")]
    Polio,
    /// Tuberculosis screening test (PPD/Mantoux).
    #[serde(rename = "TB Test")]
    TbTest,
    /// Sentinel for names that map to nothing in the vocabulary.
    #[serde(rename = "Unrecognized")]
    Unrecognized,
}

impl VaccineId {
    /// The full canonical vocabulary in insertion order, excluding the
    /// [`VaccineId::Unrecognized`] sentinel. Fuzzy-match ties resolve by this
    /// order.
    pub const VOCABULARY: [VaccineId; 17] = [
        VaccineId::Mmr,
        VaccineId::Measles,
        VaccineId::Mumps,
        VaccineId::Rubella,
        VaccineId::Tetanus,
        VaccineId::Diphtheria,
        VaccineId::Pertussis,
        VaccineId::Tdap,
        VaccineId::HepatitisA,
        VaccineId::HepatitisB,
        VaccineId::Varicella,
        VaccineId::Meningococcal,
        VaccineId::Covid19,
        VaccineId::Influenza,
        VaccineId::Hpv,
        VaccineId::Polio,
        VaccineId::TbTest,
    ];

    /// Canonical display name, matching the serialized wire form.
    pub const fn display_name(self) -> &'static str {
        match self {
            VaccineId::Mmr => "MMR",
            VaccineId::Measles => "Measles",
            VaccineId::Mumps => "Mumps",
            VaccineId::Rubella => "Rubella",
            VaccineId::Tetanus => "Tetanus",
            VaccineId::Diphtheria => "Diphtheria",
            VaccineId::Pertussis => "Pertussis",
            VaccineId::Tdap => "Tdap",
            VaccineId::HepatitisA => "Hepatitis A",
            VaccineId::HepatitisB => "Hepatitis B",
            VaccineId::Varicella => "Varicella",
            VaccineId::Meningococcal => "Meningococcal",
            VaccineId::Covid19 => "COVID-19",
            VaccineId::Influenza => "Influenza",
            VaccineId::Hpv => "HPV",
            VaccineId::Polio => "Polio",
            VaccineId::TbTest => "TB Test",
            VaccineId::Unrecognized => "Unrecognized",
        }
    }

    /// True for every vocabulary member, false for the sentinel.
    pub const fn is_recognized(self) -> bool {
        !matches!(self, VaccineId::Unrecognized)
    }
}

impl fmt::Display for VaccineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Maintained alias table, folded form to canonical id. Seeded from the
/// mappings the production extractor most often needs; extending it is a data
/// change, not a code change.
const ALIASES: &[(&str, VaccineId)] = &[
    ("mmr ii", VaccineId::Mmr),
    ("mmr vaccine", VaccineId::Mmr),
    ("measles mumps rubella", VaccineId::Mmr),
    ("measles, mumps and rubella", VaccineId::Mmr),
    ("td", VaccineId::Tetanus),
    ("tetanus toxoid", VaccineId::Tetanus),
    ("dtap", VaccineId::Tdap),
    ("whooping cough", VaccineId::Pertussis),
    ("hep a", VaccineId::HepatitisA),
    ("hep b", VaccineId::HepatitisB),
    ("hepb", VaccineId::HepatitisB),
    ("varicella zoster", VaccineId::Varicella),
    ("chicken pox", VaccineId::Varicella),
    ("chickenpox", VaccineId::Varicella),
    ("meningitis", VaccineId::Meningococcal),
    ("covid", VaccineId::Covid19),
    ("coronavirus", VaccineId::Covid19),
    ("sars-cov-2", VaccineId::Covid19),
    ("flu", VaccineId::Influenza),
    ("flu shot", VaccineId::Influenza),
    ("human papillomavirus", VaccineId::Hpv),
    ("ipv", VaccineId::Polio),
    ("opv", VaccineId::Polio),
    ("poliomyelitis", VaccineId::Polio),
    ("ppd", VaccineId::TbTest),
    ("mantoux", VaccineId::TbTest),
    ("tuberculin", VaccineId::TbTest),
];

/// Folded lookup terms: canonical names first (vocabulary order), then the
/// alias table. `vocab_rank` is the target id's vocabulary position, used for
/// deterministic fuzzy tie-breaks.
struct LookupTerm {
    folded: String,
    target: VaccineId,
    vocab_rank: usize,
}

fn lookup_terms() -> &'static [LookupTerm] {
    static TERMS: OnceLock<Vec<LookupTerm>> = OnceLock::new();
    TERMS.get_or_init(|| {
        let rank_of = |id: VaccineId| {
            VaccineId::VOCABULARY
                .iter()
                .position(|member| *member == id)
                .expect("alias targets are vocabulary members")
        };
        let canonical = VaccineId::VOCABULARY.iter().map(|&id| LookupTerm {
            folded: fold_name(id.display_name()),
            target: id,
            vocab_rank: rank_of(id),
        });
        let aliases = ALIASES.iter().map(|&(alias, id)| LookupTerm {
            folded: alias.to_string(),
            target: id,
            vocab_rank: rank_of(id),
        });
        canonical.chain(aliases).collect()
    })
}

/// Map a free-text vaccine name onto the canonical vocabulary.
///
/// Lookup tiers, first match wins:
/// 1. exact match against a canonical display name,
/// 2. exact match against the alias table,
/// 3. fuzzy match (normalized Levenshtein similarity) against both, with ties
///    resolved by smaller edit distance, then vocabulary order.
///
/// Total and deterministic: every input yields a result, identical inputs
/// yield identical results.
pub fn normalize(claimed_name: &str) -> VaccineId {
    let folded = fold_name(claimed_name);
    if folded.is_empty() {
        return VaccineId::Unrecognized;
    }

    // Canonical names precede aliases in the term list, so a single ordered
    // scan preserves tier precedence for exact matches.
    for term in lookup_terms() {
        if term.folded == folded {
            return term.target;
        }
    }

    if folded.chars().count() < FUZZY_MIN_QUERY_CHARS {
        return VaccineId::Unrecognized;
    }

    let query_chars = folded.chars().count();
    let mut best: Option<(usize, usize, VaccineId)> = None;
    for term in lookup_terms() {
        let distance = strsim::levenshtein(&folded, &term.folded);
        let span = query_chars.max(term.folded.chars().count());
        let similarity = 1.0 - distance as f64 / span as f64;
        if similarity < SIMILARITY_THRESHOLD {
            continue;
        }
        let candidate = (distance, term.vocab_rank, term.target);
        if best.map_or(true, |(d, r, _)| (distance, term.vocab_rank) < (d, r)) {
            best = Some(candidate);
        }
    }

    match best {
        Some((_, _, id)) => id,
        None => {
            debug!(claimed = claimed_name, "vaccine name did not clear the similarity threshold");
            VaccineId::Unrecognized
        }
    }
}
