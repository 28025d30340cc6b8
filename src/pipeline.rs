//! Variant Engine - Single Entry Point
//!
//! identity -> seed -> variant -> palette -> config record.
//! Both paths are pure: same arguments, same record, on any machine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CatalogError, DesignCatalog};
use crate::hashing::generate_seed;
use crate::palettes::PalettePack;
use crate::selection::{select_variant, StyleHints};
use crate::variants::{
    CardCorners, CtaBand, FeatureCardStyle, FeatureIconTreatment, HeaderEmphasis, HeroLayout,
    LogoPositioning, MicroTexture, Separators, TypographicScale, VariantSet,
};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Primary selection input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantRequest {
    pub project_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub style_hints: Option<StyleHints>,
}

/// "Regenerate look" input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegenerateRequest {
    pub project_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default = "default_increment")]
    pub increment: i64,
}

fn default_increment() -> i64 { 1 }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteRecord {
    pub name: String,
    pub primary: String,
    pub accent: String,
    pub light: String,
    pub description: String,
}

impl From<&PalettePack> for PaletteRecord {
    fn from(pack: &PalettePack) -> Self {
        Self {
            name: pack.name.clone(),
            primary: pack.primary.clone(),
            accent: pack.accent.clone(),
            light: pack.light.clone(),
            description: pack.description.clone(),
        }
    }
}

/// The design configuration handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub variant_name: String,
    /// Identity seed. On the regenerate path this is the base seed; the
    /// applied offset is in `increment`.
    pub seed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment: Option<i64>,
    pub hero_layout: HeroLayout,
    pub header_emphasis: HeaderEmphasis,
    pub feature_card_style: FeatureCardStyle,
    pub feature_icon_treatment: FeatureIconTreatment,
    pub cta_band: CtaBand,
    pub logo_positioning: LogoPositioning,
    pub card_corners: CardCorners,
    pub separators: Separators,
    pub typographic_scale: TypographicScale,
    pub micro_texture: MicroTexture,
    pub palette: PaletteRecord,
}

impl ConfigRecord {
    fn assemble(variant: &VariantSet, palette: &PalettePack, seed: u32, increment: Option<i64>) -> Self {
        Self {
            variant_name: variant.name.clone(),
            seed,
            increment,
            hero_layout: variant.hero_layout,
            header_emphasis: variant.header_emphasis,
            feature_card_style: variant.feature_card_style,
            feature_icon_treatment: variant.feature_icon_treatment,
            cta_band: variant.cta_band,
            logo_positioning: variant.logo_positioning,
            card_corners: variant.card_corners,
            separators: variant.separators,
            typographic_scale: variant.typographic_scale,
            micro_texture: variant.micro_texture,
            palette: PaletteRecord::from(palette),
        }
    }
}

/// Catalog index reached by stepping `increment` away from `base_seed`.
///
/// Exact integer arithmetic, then a non-negative modulo, so any run of
/// `size` consecutive increments visits every entry once.
pub fn regenerate_index(base_seed: u32, increment: i64, size: usize) -> usize {
    let stepped = i128::from(base_seed) + i128::from(increment);
    // size comes from a non-empty catalog
    stepped.rem_euclid(size as i128) as usize
}

/// The engine - owns the catalog for the life of the process
pub struct VariantEngine {
    catalog: DesignCatalog,
}

impl VariantEngine {
    pub fn new(catalog: DesignCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &DesignCatalog {
        &self.catalog
    }

    /// Seed for an identity. See [`generate_seed`].
    pub fn seed(&self, project_id: &str, user_id: &str, created_at: &str) -> u32 {
        generate_seed(project_id, user_id, created_at)
    }

    /// Select and resolve the design for an identity.
    pub fn build(
        &self,
        project_id: &str,
        user_id: &str,
        created_at: &str,
        hints: Option<&StyleHints>,
    ) -> ConfigRecord {
        let seed = generate_seed(project_id, user_id, created_at);
        let variant = select_variant(self.catalog.variants(), seed, hints);
        let palette = self.catalog.palettes().resolve(&variant.palette_key);

        tracing::debug!(project_id, seed, variant = %variant.name, "variant config built");
        ConfigRecord::assemble(variant, palette, seed, None)
    }

    /// Step to another design for the "regenerate look" action.
    ///
    /// Style hints are deliberately not consulted here.
    pub fn regenerate(
        &self,
        project_id: &str,
        user_id: &str,
        created_at: &str,
        increment: i64,
    ) -> ConfigRecord {
        let base_seed = generate_seed(project_id, user_id, created_at);
        let variants = self.catalog.variants();
        let index = regenerate_index(base_seed, increment, variants.size());
        let variant = &variants.as_slice()[index];
        let palette = self.catalog.palettes().resolve(&variant.palette_key);

        tracing::debug!(
            project_id,
            base_seed,
            increment,
            index,
            variant = %variant.name,
            "variant regenerated"
        );
        ConfigRecord::assemble(variant, palette, base_seed, Some(increment))
    }

    pub fn build_from_request(&self, request: &VariantRequest) -> ConfigRecord {
        self.build(
            &request.project_id,
            &request.user_id,
            &request.created_at,
            request.style_hints.as_ref(),
        )
    }

    pub fn regenerate_from_request(&self, request: &RegenerateRequest) -> ConfigRecord {
        self.regenerate(
            &request.project_id,
            &request.user_id,
            &request.created_at,
            request.increment,
        )
    }

    /// JSON in, JSON out. Used by the CLI bridge.
    pub fn build_json(&self, payload: &str) -> Result<ConfigRecord, EngineError> {
        let request: VariantRequest = serde_json::from_str(payload)?;
        Ok(self.build_from_request(&request))
    }

    pub fn regenerate_json(&self, payload: &str) -> Result<ConfigRecord, EngineError> {
        let request: RegenerateRequest = serde_json::from_str(payload)?;
        Ok(self.regenerate_from_request(&request))
    }
}

impl Default for VariantEngine {
    fn default() -> Self {
        Self::new(DesignCatalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_regenerate_index_negative_wraps() {
        assert_eq!(regenerate_index(0, -1, 6), 5);
        assert_eq!(regenerate_index(3, -9, 6), 0);
    }

    #[test]
    fn test_regenerate_index_no_u32_wraparound() {
        // u32::MAX mod 6 = 3; stepping past it must keep counting, not wrap at 2^32.
        assert_eq!(regenerate_index(u32::MAX, 0, 6), 3);
        assert_eq!(regenerate_index(u32::MAX, 1, 6), 4);
        assert_eq!(regenerate_index(u32::MAX, 3, 6), 0);
    }

    #[test]
    fn test_regenerate_index_extreme_increments() {
        assert!(regenerate_index(7, i64::MAX, 6) < 6);
        assert!(regenerate_index(7, i64::MIN, 6) < 6);
    }

    #[test]
    fn test_build_record_shape() {
        let engine = VariantEngine::default();
        let record = engine.build("proj-42", "", "", None);
        let value = serde_json::to_value(&record).unwrap();

        for key in [
            "variant_name", "seed", "hero_layout", "header_emphasis", "feature_card_style",
            "feature_icon_treatment", "cta_band", "logo_positioning", "card_corners",
            "separators", "typographic_scale", "micro_texture", "palette",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert!(value.get("increment").is_none());
        assert_eq!(value["seed"], json!(record.seed));
        assert!(value["palette"]["primary"].as_str().unwrap().starts_with('#'));
    }

    #[test]
    fn test_regenerate_record_reports_increment() {
        let engine = VariantEngine::default();
        let record = engine.regenerate("proj-42", "", "", 3);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["increment"], json!(3));
        assert_eq!(record.seed, engine.seed("proj-42", "", ""));
    }

    #[test]
    fn test_build_json_defaults() {
        let engine = VariantEngine::default();
        let record = engine.build_json(r#"{"project_id": "proj-42"}"#).unwrap();
        assert_eq!(record, engine.build("proj-42", "", "", None));
    }

    #[test]
    fn test_regenerate_json_default_increment() {
        let engine = VariantEngine::default();
        let record = engine.regenerate_json(r#"{"project_id": "proj-42"}"#).unwrap();
        assert_eq!(record.increment, Some(1));
    }

    #[test]
    fn test_build_json_rejects_missing_project() {
        let engine = VariantEngine::default();
        let err = engine.build_json(r#"{"user_id": "u"}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid payload"));
    }
}
