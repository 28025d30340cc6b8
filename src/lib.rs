//! Variant Engine Core - Deterministic Brochure Design Selection
//!
//! # Guarantees
//! 1. Same identity, same design
//! 2. Hints bias, the seed decides
//! 3. Catalog order is the tie-break
//! 4. Regenerate steps through every design in a full cycle
//! 5. Unknown palettes fall back, never fail
//! 6. Catalogs are immutable after startup

pub mod hashing;
pub mod palettes;
pub mod variants;
pub mod validation;
pub mod catalog;
pub mod selection;
pub mod pipeline;

pub use hashing::{generate_seed, catalog_fingerprint, canonical_json};
pub use palettes::{PaletteCatalog, PalettePack, PaletteKey, DEFAULT_PALETTE_KEY};
pub use variants::{VariantCatalog, VariantSet, HeroLayout};
pub use validation::{Validator, ValidationReport, CatalogViolation, ViolationSeverity};
pub use catalog::{CatalogError, CatalogSpec, DesignCatalog};
pub use selection::{select_variant, top_tier, match_score, StyleHints};
pub use pipeline::{
    ConfigRecord, EngineError, PaletteRecord, RegenerateRequest, VariantEngine, VariantRequest,
};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MIN_ENGINE_VERSION: &str = "1.0.0";
