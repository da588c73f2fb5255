//! Unit catalog loaded from TOML
//!
//! The catalog is the single source of unit stats, class tags and roles.
//! It is built once and only read afterwards.

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{BattleError, Result};
use crate::core::types::UnitId;
use crate::units::class::{UnitClass, UnitRole};

const STANDARD_UNITS: &str = include_str!("../../data/units.toml");

/// Stats for one unit type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStat {
    pub offense: f64,
    /// Defense against infantry
    pub defense_general: f64,
    pub defense_cavalry: f64,
    /// Defense against archers; falls back to `defense_general` when absent
    #[serde(default)]
    pub defense_archer: Option<f64>,
    pub population: u32,
    pub carry_capacity: u32,
    #[serde(default)]
    pub class: UnitClass,
    #[serde(default)]
    pub role: UnitRole,
}

impl UnitStat {
    /// Defense value against attackers of the given class
    pub fn defense_against(&self, class: UnitClass) -> f64 {
        match class {
            UnitClass::Infantry => self.defense_general,
            UnitClass::Cavalry => self.defense_cavalry,
            UnitClass::Archer => self.defense_archer.unwrap_or(self.defense_general),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UnitEntry {
    id: UnitId,
    #[serde(flatten)]
    stat: UnitStat,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    unit: Vec<UnitEntry>,
}

/// Read-only table of unit stats keyed by unit identifier
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    units: AHashMap<UnitId, UnitStat>,
}

impl UnitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled standard catalog
    pub fn standard() -> Self {
        Self::parse_or_empty(STANDARD_UNITS)
    }

    /// Parse a catalog, logging and falling back to an empty one on error
    fn parse_or_empty(content: &str) -> Self {
        match Self::from_toml_str(content) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(error = %e, "Bundled unit catalog is invalid; no unit has any power");
                Self::default()
            }
        }
    }

    /// Parse a catalog from `[[unit]]` TOML tables
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| BattleError::Config(format!("Failed to parse unit catalog TOML: {}", e)))?;

        let mut catalog = Self::new();
        for entry in file.unit {
            if catalog.units.contains_key(&entry.id) {
                return Err(BattleError::Config(format!("Duplicate unit id: {}", entry.id)));
            }
            catalog.units.insert(entry.id, entry.stat);
        }
        Ok(catalog)
    }

    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Builder-style insert, mostly for tests and tools
    pub fn with_unit(mut self, id: impl Into<UnitId>, stat: UnitStat) -> Self {
        self.units.insert(id.into(), stat);
        self
    }

    pub fn get(&self, id: &str) -> Option<&UnitStat> {
        self.units.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.units.contains_key(id)
    }

    /// Class of a unit; unknown units count as infantry
    pub fn class_of(&self, id: &str) -> UnitClass {
        self.get(id).map(|stat| stat.class).unwrap_or_default()
    }

    pub fn role_of(&self, id: &str) -> Option<UnitRole> {
        self.get(id).map(|stat| stat.role)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
