//! Palette Catalog - named, print-safe color packs
//!
//! Lookups never fail: an unknown key resolves to the default pack.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::CatalogError;

pub type PaletteKey = String;

/// Key of the pack used when a variant names a palette we don't have.
pub const DEFAULT_PALETTE_KEY: &str = "classic_graphite";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalettePack {
    pub name: String,
    /// Steel / main color
    pub primary: String,
    /// Copper / accent color
    pub accent: String,
    /// Light panel color
    pub light: String,
    pub description: String,
}

impl PalettePack {
    fn new(name: &str, primary: &str, accent: &str, light: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            primary: primary.to_string(),
            accent: accent.to_string(),
            light: light.to_string(),
            description: description.to_string(),
        }
    }

    /// The three colors in (primary, accent, light) order.
    pub fn colors(&self) -> [&str; 3] {
        [&self.primary, &self.accent, &self.light]
    }
}

/// Immutable key -> pack table with a guaranteed default.
#[derive(Debug, Clone)]
pub struct PaletteCatalog {
    packs: BTreeMap<PaletteKey, PalettePack>,
    default_key: PaletteKey,
    default_pack: PalettePack,
}

impl PaletteCatalog {
    /// Build a catalog. The default key must name one of `packs`.
    pub fn new(
        packs: BTreeMap<PaletteKey, PalettePack>,
        default_key: impl Into<PaletteKey>,
    ) -> Result<Self, CatalogError> {
        let default_key = default_key.into();
        let default_pack = packs
            .get(&default_key)
            .cloned()
            .ok_or_else(|| CatalogError::MissingDefaultPalette(default_key.clone()))?;

        Ok(Self { packs, default_key, default_pack })
    }

    /// The reference metallic palettes.
    pub fn builtin() -> Self {
        let packs: BTreeMap<PaletteKey, PalettePack> = [
            ("classic_graphite", PalettePack::new(
                "Classic Graphite", "#6C757D", "#8D7A67", "#F3F4F6",
                "Professional steel with warm copper accents",
            )),
            ("polished_nickel", PalettePack::new(
                "Polished Nickel", "#7A8087", "#A18C7A", "#F5F6F8",
                "Modern nickel with sophisticated warmth",
            )),
            ("slate_copper", PalettePack::new(
                "Slate & Copper", "#5B636B", "#8C715E", "#EEF1F4",
                "Bold slate with rich copper highlights",
            )),
            ("soft_tungsten", PalettePack::new(
                "Soft Tungsten", "#6E6E72", "#9B8676", "#F2F3F5",
                "Subtle tungsten with earthy accents",
            )),
            ("charcoal_bronze", PalettePack::new(
                "Charcoal Bronze", "#4A5568", "#A0785C", "#F7FAFC",
                "Deep charcoal with bronze sophistication",
            )),
            ("pewter_gold", PalettePack::new(
                "Pewter Gold", "#718096", "#B7956D", "#F9FAFB",
                "Classic pewter with elegant gold touches",
            )),
        ]
        .into_iter()
        .map(|(key, pack)| (key.to_string(), pack))
        .collect();

        let default_pack = packs[DEFAULT_PALETTE_KEY].clone();
        Self {
            packs,
            default_key: DEFAULT_PALETTE_KEY.to_string(),
            default_pack,
        }
    }

    pub fn get(&self, key: &str) -> Option<&PalettePack> {
        self.packs.get(key)
    }

    /// Look up a pack, falling back to the default pack for unknown keys.
    pub fn resolve(&self, key: &str) -> &PalettePack {
        match self.packs.get(key) {
            Some(pack) => pack,
            None => {
                tracing::warn!(
                    palette_key = key,
                    default = %self.default_key,
                    "unknown palette key, using default palette"
                );
                &self.default_pack
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.packs.contains_key(key)
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    pub fn default_pack(&self) -> &PalettePack {
        &self.default_pack
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.packs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PalettePack)> {
        self.packs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn packs(&self) -> &BTreeMap<PaletteKey, PalettePack> {
        &self.packs
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

impl Default for PaletteCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_six_packs() {
        let catalog = PaletteCatalog::builtin();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.default_key(), DEFAULT_PALETTE_KEY);
    }

    #[test]
    fn test_resolve_known_key() {
        let catalog = PaletteCatalog::builtin();
        let pack = catalog.resolve("slate_copper");
        assert_eq!(pack.name, "Slate & Copper");
        assert_eq!(pack.colors(), ["#5B636B", "#8C715E", "#EEF1F4"]);
    }

    #[test]
    fn test_resolve_unknown_key_falls_back() {
        let catalog = PaletteCatalog::builtin();
        let pack = catalog.resolve("does_not_exist");
        assert_eq!(pack, catalog.default_pack());
        assert_eq!(pack.name, "Classic Graphite");
        assert_eq!(pack.primary, "#6C757D");
        assert_eq!(pack.accent, "#8D7A67");
        assert_eq!(pack.light, "#F3F4F6");
        assert!(!pack.description.is_empty());
    }

    #[test]
    fn test_resolve_empty_key_falls_back() {
        let catalog = PaletteCatalog::builtin();
        assert_eq!(catalog.resolve("").name, "Classic Graphite");
    }

    #[test]
    fn test_new_requires_default() {
        let mut packs = BTreeMap::new();
        packs.insert("only".to_string(), PaletteCatalog::builtin().default_pack().clone());
        let err = PaletteCatalog::new(packs, "missing").unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_new_with_custom_default() {
        let builtin = PaletteCatalog::builtin();
        let catalog = PaletteCatalog::new(builtin.packs().clone(), "pewter_gold").unwrap();
        assert_eq!(catalog.resolve("nope").name, "Pewter Gold");
    }
}
