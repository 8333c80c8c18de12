//! Drug preparation catalogue.
//!
//! A catalogue maps display names to preparations. It is built once, validated,
//! and never mutated afterwards; lookups hand out shared references only.

mod search;
mod standard;

pub use search::*;
pub use standard::*;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::Preparation;

/// Catalogue errors.
#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalogue entry has an empty name")]
    EmptyName,

    #[error("Duplicate catalogue entry: {0}")]
    DuplicateName(String),

    #[error("Invalid amount for {0}")]
    InvalidAmount(String),

    #[error("Invalid volume for {0}")]
    InvalidVolume(String),

    #[error("Invalid reference value for {0}")]
    InvalidReference(String),
}

pub type CatalogueResult<T> = Result<T, CatalogueError>;

/// A named catalogue preparation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogueEntry {
    /// Display name, unique within a catalogue
    pub name: String,
    #[serde(flatten)]
    pub preparation: Preparation,
}

impl CatalogueEntry {
    pub fn new(name: &str, preparation: Preparation) -> Self {
        Self {
            name: name.to_string(),
            preparation,
        }
    }
}

/// Immutable, ordered table of named preparations.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
    index: HashMap<String, usize>,
}

impl Catalogue {
    /// Build a catalogue, validating every entry.
    pub fn new(entries: Vec<CatalogueEntry>) -> CatalogueResult<Self> {
        for entry in &entries {
            if let Err(e) = validate_entry(entry) {
                warn!(name = %entry.name, error = %e, "rejected catalogue entry");
                return Err(e);
            }
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), i).is_some() {
                warn!(name = %entry.name, "duplicate catalogue entry");
                return Err(CatalogueError::DuplicateName(entry.name.clone()));
            }
        }

        info!(entries = entries.len(), "catalogue loaded");
        Ok(Self { entries, index })
    }

    /// Load a hospital-specific table from a JSON array of entries.
    pub fn from_json(json: &str) -> CatalogueResult<Self> {
        let entries: Vec<CatalogueEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Serialize the table back to JSON.
    pub fn to_json(&self) -> CatalogueResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Look up a preparation by exact display name.
    pub fn get(&self, name: &str) -> Option<&Preparation> {
        self.index.get(name).map(|&i| &self.entries[i].preparation)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Display names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Check a table entry's definition. Reference values are only checked for
/// being well-formed numbers, never against a dose.
fn validate_entry(entry: &CatalogueEntry) -> CatalogueResult<()> {
    if entry.name.trim().is_empty() {
        return Err(CatalogueError::EmptyName);
    }

    let prep = &entry.preparation;
    match prep.amount {
        Some(a) if a.is_finite() && a >= 0.0 => {}
        _ => return Err(CatalogueError::InvalidAmount(entry.name.clone())),
    }
    match prep.volume_ml {
        Some(v) if v.is_finite() && v > 0.0 => {}
        _ => return Err(CatalogueError::InvalidVolume(entry.name.clone())),
    }

    let bad_reference = [prep.reference_start, prep.reference_max]
        .into_iter()
        .flatten()
        .any(|r| !r.is_finite() || r < 0.0);
    if bad_reference {
        return Err(CatalogueError::InvalidReference(entry.name.clone()));
    }

    Ok(())
}
