//! Design Catalog - the engine's configuration
//!
//! Palettes and variants are loaded once, validated, and never mutated.
//! Selection borrows them read-only, so no locking is ever needed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::hashing::catalog_fingerprint;
use crate::palettes::{PaletteCatalog, PaletteKey, PalettePack, DEFAULT_PALETTE_KEY};
use crate::validation::Validator;
use crate::variants::{VariantCatalog, VariantSet};
use crate::{ENGINE_VERSION, MIN_ENGINE_VERSION};

pub const BUILTIN_CATALOG_VERSION: &str = "1.0.0";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid version string: {0}")]
    InvalidVersion(String),

    #[error("Catalog {0} requires engine >= {1}, current is {2}")]
    EngineVersionMismatch(String, String, String),

    #[error("Invalid catalog: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("Variant catalog is empty")]
    EmptyVariantCatalog,

    #[error("Default palette not found: {0}")]
    MissingDefaultPalette(String),
}

/// On-disk catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSpec {
    #[serde(default = "default_catalog_version")]
    pub catalog_version: String,
    #[serde(default = "default_engine_min_version")]
    pub engine_min_version: String,
    #[serde(default = "default_palette_key")]
    pub default_palette: PaletteKey,
    pub palettes: BTreeMap<PaletteKey, PalettePack>,
    /// Order is significant.
    pub variants: Vec<VariantSet>,
}

fn default_catalog_version() -> String { BUILTIN_CATALOG_VERSION.to_string() }
fn default_engine_min_version() -> String { MIN_ENGINE_VERSION.to_string() }
fn default_palette_key() -> PaletteKey { DEFAULT_PALETTE_KEY.to_string() }

impl CatalogSpec {
    pub fn builtin() -> Self {
        DesignCatalog::builtin().to_spec()
    }
}

/// Validated palettes + variants.
#[derive(Debug, Clone)]
pub struct DesignCatalog {
    catalog_version: String,
    engine_min_version: String,
    palettes: PaletteCatalog,
    variants: VariantCatalog,
}

impl DesignCatalog {
    /// The reference catalog compiled into the engine.
    pub fn builtin() -> Self {
        Self {
            catalog_version: BUILTIN_CATALOG_VERSION.to_string(),
            engine_min_version: MIN_ENGINE_VERSION.to_string(),
            palettes: PaletteCatalog::builtin(),
            variants: VariantCatalog::builtin(),
        }
    }

    /// Assemble a catalog from already-built parts.
    pub fn new(palettes: PaletteCatalog, variants: VariantCatalog) -> Self {
        Self {
            catalog_version: BUILTIN_CATALOG_VERSION.to_string(),
            engine_min_version: MIN_ENGINE_VERSION.to_string(),
            palettes,
            variants,
        }
    }

    /// Validate a document and build the catalog from it.
    ///
    /// Error-level violations are fatal. Warnings (e.g. a variant naming an
    /// unknown palette) are logged; those variants render with the default.
    pub fn from_spec(spec: CatalogSpec) -> Result<Self, CatalogError> {
        check_engine_version(&spec)?;

        let report = Validator::new().validate(&spec);
        for warning in report.warnings() {
            tracing::warn!(
                rule = %warning.rule,
                subject = ?warning.subject,
                "{}", warning.message
            );
        }
        if !report.valid {
            let messages = report.errors()
                .map(|v| format!("{}: {}", v.rule, v.message))
                .collect();
            return Err(CatalogError::Invalid(messages));
        }

        Ok(Self {
            catalog_version: spec.catalog_version,
            engine_min_version: spec.engine_min_version,
            palettes: PaletteCatalog::new(spec.palettes, spec.default_palette)?,
            variants: VariantCatalog::new(spec.variants)?,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let spec: CatalogSpec = serde_json::from_str(json)?;
        Self::from_spec(spec)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            version = %catalog.catalog_version,
            variants = catalog.variants.size(),
            palettes = catalog.palettes.len(),
            fingerprint = %catalog.fingerprint().unwrap_or_default(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn palettes(&self) -> &PaletteCatalog {
        &self.palettes
    }

    pub fn variants(&self) -> &VariantCatalog {
        &self.variants
    }

    pub fn catalog_version(&self) -> &str {
        &self.catalog_version
    }

    pub fn to_spec(&self) -> CatalogSpec {
        CatalogSpec {
            catalog_version: self.catalog_version.clone(),
            engine_min_version: self.engine_min_version.clone(),
            default_palette: self.palettes.default_key().to_string(),
            palettes: self.palettes.packs().clone(),
            variants: self.variants.as_slice().to_vec(),
        }
    }

    /// SHA-256 over the canonical catalog document.
    ///
    /// Two catalogs with the same fingerprint map every seed identically.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        catalog_fingerprint(&self.to_spec())
    }
}

impl Default for DesignCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_engine_version(spec: &CatalogSpec) -> Result<(), CatalogError> {
    let engine_ver = semver::Version::parse(ENGINE_VERSION)
        .map_err(|_| CatalogError::InvalidVersion(ENGINE_VERSION.to_string()))?;
    let min_ver = semver::Version::parse(&spec.engine_min_version)
        .map_err(|_| CatalogError::InvalidVersion(spec.engine_min_version.clone()))?;

    if engine_ver < min_ver {
        return Err(CatalogError::EngineVersionMismatch(
            spec.catalog_version.clone(),
            spec.engine_min_version.clone(),
            ENGINE_VERSION.to_string(),
        ));
    }

    Ok(())
}
