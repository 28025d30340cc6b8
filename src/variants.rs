//! Variant Catalog - pre-approved design combinations
//!
//! The catalog is an ordered sequence. Position is part of the contract:
//! seeds index into it and hint ties are broken by it, so entries are never
//! re-sorted. Adding, removing or reordering entries re-maps every existing
//! seed and must ship as a breaking catalog change.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::CatalogError;
use crate::palettes::PaletteKey;

/// Declares a closed style axis with kebab-case wire names.
macro_rules! style_axis {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

style_axis! {
    /// Where the hero image sits relative to the headline.
    HeroLayout {
        HeroRight => "hero-right",
        HeroLeft => "hero-left",
        HeroFull => "hero-full",
    }
}

style_axis! {
    HeaderEmphasis {
        Underline => "underline",
        AccentBar => "accent-bar",
        None => "none",
    }
}

style_axis! {
    FeatureCardStyle {
        Outline => "outline",
        Soft => "soft",
        Divided => "divided",
    }
}

style_axis! {
    FeatureIconTreatment {
        NumberBadges => "number-badges",
        CheckIcons => "check-icons",
        NoIcons => "no-icons",
    }
}

style_axis! {
    /// Call-to-action band style.
    CtaBand {
        FilledSteel => "filled-steel",
        CopperOutline => "copper-outline",
        LightPanel => "light-panel",
    }
}

style_axis! {
    LogoPositioning {
        HeaderLeft => "header-left",
        HeaderRight => "header-right",
        HeroOverlay => "hero-overlay",
    }
}

style_axis! {
    CardCorners {
        RoundedMd => "rounded-md",
        RoundedLg => "rounded-lg",
    }
}

style_axis! {
    Separators {
        None => "none",
        Subtle => "subtle",
        Dotted => "dotted",
    }
}

style_axis! {
    TypographicScale {
        TypeNormal => "type-normal",
        TypeCompact => "type-compact",
        TypeComfort => "type-comfort",
    }
}

style_axis! {
    /// Background paper texture.
    MicroTexture {
        PaperNone => "paper-none",
        PaperSubtle => "paper-subtle",
        PaperGrid => "paper-grid",
    }
}

/// One selectable design: a full set of style-axis choices plus a palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSet {
    pub name: String,
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
    #[serde(alias = "palette_pack")]
    pub palette_key: PaletteKey,
}

/// Ordered, non-empty, immutable list of variants.
#[derive(Debug, Clone)]
pub struct VariantCatalog {
    variants: Vec<VariantSet>,
}

impl VariantCatalog {
    pub fn new(variants: Vec<VariantSet>) -> Result<Self, CatalogError> {
        if variants.is_empty() {
            return Err(CatalogError::EmptyVariantCatalog);
        }
        Ok(Self { variants })
    }

    /// The six reference designs, in their canonical order.
    pub fn builtin() -> Self {
        use CardCorners::*;
        use CtaBand::*;
        use FeatureCardStyle::*;
        use FeatureIconTreatment::*;
        use HeroLayout::*;
        use LogoPositioning::*;
        use MicroTexture::*;
        use TypographicScale::*;

        let variants = vec![
            VariantSet {
                name: "Minimal Steel".to_string(),
                hero_layout: HeroRight,
                header_emphasis: HeaderEmphasis::Underline,
                feature_card_style: Outline,
                feature_icon_treatment: NumberBadges,
                cta_band: CopperOutline,
                logo_positioning: HeaderLeft,
                card_corners: RoundedMd,
                separators: Separators::None,
                typographic_scale: TypeNormal,
                micro_texture: PaperNone,
                palette_key: "classic_graphite".to_string(),
            },
            VariantSet {
                name: "Agency Copper".to_string(),
                hero_layout: HeroLeft,
                header_emphasis: HeaderEmphasis::AccentBar,
                feature_card_style: Soft,
                feature_icon_treatment: CheckIcons,
                cta_band: FilledSteel,
                logo_positioning: HeaderRight,
                card_corners: RoundedLg,
                separators: Separators::Subtle,
                typographic_scale: TypeComfort,
                micro_texture: PaperSubtle,
                palette_key: "slate_copper".to_string(),
            },
            VariantSet {
                name: "Editorial Nickel".to_string(),
                hero_layout: HeroFull,
                header_emphasis: HeaderEmphasis::None,
                feature_card_style: Divided,
                feature_icon_treatment: NoIcons,
                cta_band: LightPanel,
                logo_positioning: HeroOverlay,
                card_corners: RoundedMd,
                separators: Separators::Dotted,
                typographic_scale: TypeCompact,
                micro_texture: PaperGrid,
                palette_key: "polished_nickel".to_string(),
            },
            VariantSet {
                name: "Executive Tungsten".to_string(),
                hero_layout: HeroRight,
                header_emphasis: HeaderEmphasis::AccentBar,
                feature_card_style: Soft,
                feature_icon_treatment: NumberBadges,
                cta_band: FilledSteel,
                logo_positioning: HeaderLeft,
                card_corners: RoundedLg,
                separators: Separators::Subtle,
                typographic_scale: TypeNormal,
                micro_texture: PaperSubtle,
                palette_key: "soft_tungsten".to_string(),
            },
            VariantSet {
                name: "Bold Charcoal".to_string(),
                hero_layout: HeroLeft,
                header_emphasis: HeaderEmphasis::Underline,
                feature_card_style: Outline,
                feature_icon_treatment: CheckIcons,
                cta_band: CopperOutline,
                logo_positioning: HeaderRight,
                card_corners: RoundedMd,
                separators: Separators::None,
                typographic_scale: TypeComfort,
                micro_texture: PaperNone,
                palette_key: "charcoal_bronze".to_string(),
            },
            VariantSet {
                name: "Classic Pewter".to_string(),
                hero_layout: HeroFull,
                header_emphasis: HeaderEmphasis::AccentBar,
                feature_card_style: Divided,
                feature_icon_treatment: NoIcons,
                cta_band: LightPanel,
                logo_positioning: HeroOverlay,
                card_corners: RoundedLg,
                separators: Separators::Dotted,
                typographic_scale: TypeCompact,
                micro_texture: PaperGrid,
                palette_key: "pewter_gold".to_string(),
            },
        ];

        Self { variants }
    }

    pub fn get(&self, index: usize) -> Option<&VariantSet> {
        self.variants.get(index)
    }

    /// Entry at `value mod size()`. Always in range.
    pub fn at_seed(&self, value: u32) -> &VariantSet {
        &self.variants[value as usize % self.variants.len()]
    }

    pub fn size(&self) -> usize {
        self.variants.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariantSet> {
        self.variants.iter()
    }

    pub fn as_slice(&self) -> &[VariantSet] {
        &self.variants
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name == name)
    }
}

impl Default for VariantCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a VariantCatalog {
    type Item = &'a VariantSet;
    type IntoIter = std::slice::Iter<'a, VariantSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
