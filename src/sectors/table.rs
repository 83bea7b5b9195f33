// SectorKeywordTable: which trigger phrases tag a document with a sector.
//
// The table is an ordered list, not a map: classification walks it top to
// bottom and the first sector with a matching phrase wins. Reordering entries
// changes results for documents that mention more than one sector.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::UNKNOWN_SECTOR;
use crate::error::PipelineError;

/// One sector and the phrases that trigger it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRule {
    pub sector: String,
    pub keywords: Vec<String>,
}

/// Ordered sector rules, loaded once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorKeywordTable {
    rules: Vec<SectorRule>,
}

impl Default for SectorKeywordTable {
    fn default() -> Self {
        let rule = |sector: &str, keywords: &[&str]| SectorRule {
            sector: sector.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        };
        Self {
            rules: vec![
                rule(
                    "energy",
                    &[
                        "energy",
                        "renewable",
                        "solar",
                        "wind power",
                        "coal",
                        "electricity",
                        "power plant",
                        "grid",
                    ],
                ),
                rule(
                    "transport",
                    &[
                        "transport",
                        "vehicle",
                        "railway",
                        "metro",
                        "electric mobility",
                        "fuel efficiency",
                        "traffic",
                    ],
                ),
                rule(
                    "urban_development",
                    &[
                        "urban",
                        "city",
                        "cities",
                        "housing",
                        "smart city",
                        "building code",
                        "municipal",
                    ],
                ),
            ],
        }
    }
}

impl SectorKeywordTable {
    /// Build a table from rules, lowercasing phrases so matching is
    /// case-insensitive against tokenized text.
    pub fn new(rules: Vec<SectorRule>) -> Result<Self, PipelineError> {
        let mut seen = std::collections::HashSet::new();
        let mut normalized = Vec::with_capacity(rules.len());
        for rule in rules {
            let sector = rule.sector.trim().to_lowercase();
            if sector.is_empty() || sector == UNKNOWN_SECTOR {
                return Err(PipelineError::InvalidConfig(format!(
                    "sector name '{}' is reserved or empty",
                    rule.sector
                )));
            }
            if !seen.insert(sector.clone()) {
                return Err(PipelineError::InvalidConfig(format!(
                    "sector '{sector}' is listed twice"
                )));
            }
            let keywords = rule
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            normalized.push(SectorRule { sector, keywords });
        }
        Ok(Self { rules: normalized })
    }

    /// Load rules from a JSON file: `[{"sector": "...", "keywords": [...]}]`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read sector table {}", path.display()))?;
        let rules: Vec<SectorRule> = serde_json::from_str(&json)
            .with_context(|| format!("Invalid sector table JSON in {}", path.display()))?;
        Ok(Self::new(rules)?)
    }

    /// Rules in classification order.
    pub fn rules(&self) -> &[SectorRule] {
        &self.rules
    }

    /// Every selectable sector: the table's sectors in order, then "unknown".
    pub fn sector_names(&self) -> Vec<String> {
        self.rules
            .iter()
            .map(|r| r.sector.clone())
            .chain(std::iter::once(UNKNOWN_SECTOR.to_string()))
            .collect()
    }

    /// Normalize a user-entered sector name and check it against the table.
    pub fn resolve(&self, input: &str) -> Result<String, PipelineError> {
        let sector = input.trim().to_lowercase();
        let valid = self.sector_names();
        if valid.contains(&sector) {
            Ok(sector)
        } else {
            Err(PipelineError::InvalidSector {
                sector: input.trim().to_string(),
                valid,
            })
        }
    }
}
