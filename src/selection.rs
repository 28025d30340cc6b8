//! Variant Selection - seeded choice with optional style bias
//!
//! Without hints the seed indexes the whole catalog. With hints, variants are
//! scored and the seed indexes the top-scoring tier instead, so same-hint
//! requests still spread across every on-brand design.

use serde::{Deserialize, Serialize};

use crate::variants::{VariantCatalog, VariantSet};

/// Points awarded per matching hint.
pub const HINT_WEIGHT: u32 = 2;

/// Caller preferences that bias, but do not dictate, the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleHints {
    /// Substring matched against a variant's palette key (e.g. "copper").
    #[serde(default, alias = "variantBias")]
    pub variant_bias: String,
    /// Exact hero layout wire name (e.g. "hero-left").
    #[serde(default, alias = "layoutBias")]
    pub layout_bias: String,
}

impl StyleHints {
    pub fn new(variant_bias: impl Into<String>, layout_bias: impl Into<String>) -> Self {
        Self {
            variant_bias: variant_bias.into(),
            layout_bias: layout_bias.into(),
        }
    }

    /// Empty hints select exactly like no hints.
    pub fn is_empty(&self) -> bool {
        self.variant_bias.is_empty() && self.layout_bias.is_empty()
    }
}

/// Score one variant against the hints.
///
/// The palette bias is a substring test while the layout bias is an exact
/// match. Callers rely on that asymmetry; keep it.
pub fn match_score(variant: &VariantSet, hints: &StyleHints) -> u32 {
    let mut score = 0;
    if !hints.variant_bias.is_empty() && variant.palette_key.contains(hints.variant_bias.as_str()) {
        score += HINT_WEIGHT;
    }
    if !hints.layout_bias.is_empty() && hints.layout_bias == variant.hero_layout.as_str() {
        score += HINT_WEIGHT;
    }
    score
}

/// Variants sharing the highest positive score, in catalog order.
///
/// Empty when nothing matches.
pub fn top_tier<'a>(catalog: &'a VariantCatalog, hints: &StyleHints) -> Vec<&'a VariantSet> {
    let scored: Vec<(&VariantSet, u32)> = catalog
        .iter()
        .map(|v| (v, match_score(v, hints)))
        .filter(|&(_, score)| score > 0)
        .collect();

    let Some(best) = scored.iter().map(|&(_, score)| score).max() else {
        return vec![];
    };

    scored
        .into_iter()
        .filter(|&(_, score)| score == best)
        .map(|(v, _)| v)
        .collect()
}

/// Pick the variant for `seed`.
pub fn select_variant<'a>(
    catalog: &'a VariantCatalog,
    seed: u32,
    hints: Option<&StyleHints>,
) -> &'a VariantSet {
    if let Some(hints) = hints.filter(|h| !h.is_empty()) {
        let tier = top_tier(catalog, hints);
        if !tier.is_empty() {
            let variant = tier[seed as usize % tier.len()];
            tracing::debug!(
                seed,
                tier_size = tier.len(),
                variant = %variant.name,
                "selected from hinted tier"
            );
            return variant;
        }
        tracing::debug!(
            variant_bias = %hints.variant_bias,
            layout_bias = %hints.layout_bias,
            "no variant matched hints"
        );
    }

    let variant = catalog.at_seed(seed);
    tracing::debug!(seed, variant = %variant.name, "selected by seed");
    variant
}
