use std::collections::HashMap;

use shared::domain::{SectorKey, SectorReference};
use thiserror::Error;
use tracing::{debug, warn};

const BUNDLED_SECTORS_JSON: &str = include_str!("../../../data/sectores-cct.json");

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("malformed sector reference data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("sector {sector} has invalid average agreement wage {value}")]
    InvalidAverageWage { sector: String, value: f64 },
    #[error("sector reference data has no `otros` fallback entry")]
    MissingFallback,
}

/// Read-only sector table keyed by sector id.
///
/// Every entry is validated on load so the severance cap is never derived
/// from a zero or missing average wage.
#[derive(Debug, Clone)]
pub struct SectorTable {
    entries: HashMap<SectorKey, SectorReference>,
    fallback: SectorReference,
}

impl SectorTable {
    pub fn from_json(raw: &str) -> Result<Self, ReferenceError> {
        let parsed: HashMap<String, SectorReference> = serde_json::from_str(raw)?;
        let mut entries = HashMap::with_capacity(parsed.len());

        for (raw_key, reference) in parsed {
            let wage = reference.average_agreement_wage;
            if !wage.is_finite() || wage <= 0.0 {
                return Err(ReferenceError::InvalidAverageWage {
                    sector: raw_key,
                    value: wage,
                });
            }

            let key = SectorKey::parse_lenient(&raw_key);
            if key == SectorKey::Otros && !raw_key.trim().eq_ignore_ascii_case("otros") {
                warn!(sector = %raw_key, "ignoring unknown sector in reference data");
                continue;
            }
            entries.insert(key, reference);
        }

        let fallback = entries
            .get(&SectorKey::Otros)
            .cloned()
            .ok_or(ReferenceError::MissingFallback)?;

        debug!(sectors = entries.len(), "loaded sector reference data");
        Ok(Self { entries, fallback })
    }

    /// The reference table shipped with the guide.
    pub fn bundled() -> Result<Self, ReferenceError> {
        Self::from_json(BUNDLED_SECTORS_JSON)
    }

    /// Resolves a sector, falling back to the general `otros` entry.
    pub fn lookup(&self, sector: SectorKey) -> &SectorReference {
        self.entries.get(&sector).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, sector: SectorKey) -> bool {
        self.entries.contains_key(&sector)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectorKey, &SectorReference)> {
        SectorKey::ALL
            .into_iter()
            .filter_map(|key| self.entries.get(&key).map(|reference| (key, reference)))
    }
}
