//! Catalog Validation - Rule/Policy Separation
//!
//! Rules produce structured violations against a catalog document.
//! Errors refuse the catalog at startup; warnings are logged and tolerated.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::CatalogSpec;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    /// Variant name or palette key the violation is about
    pub subject: Option<String>,
}

impl CatalogViolation {
    fn error(rule: &str, subject: Option<String>, message: String) -> Self {
        Self { rule: rule.to_string(), severity: ViolationSeverity::Error, message, subject }
    }

    fn warning(rule: &str, subject: Option<String>, message: String) -> Self {
        Self { rule: rule.to_string(), severity: ViolationSeverity::Warning, message, subject }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<CatalogViolation>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &CatalogViolation> {
        self.violations.iter().filter(|v| v.severity == ViolationSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &CatalogViolation> {
        self.violations.iter().filter(|v| v.severity == ViolationSeverity::Warning)
    }
}

/// Catalog rule trait - produces violations
pub trait CatalogRule {
    fn name(&self) -> &'static str;
    fn check(&self, spec: &CatalogSpec) -> Vec<CatalogViolation>;
}

// --- Concrete Rules ---

pub struct NonEmptyVariantsRule;

impl CatalogRule for NonEmptyVariantsRule {
    fn name(&self) -> &'static str { "non_empty_variants" }

    fn check(&self, spec: &CatalogSpec) -> Vec<CatalogViolation> {
        if spec.variants.is_empty() {
            vec![CatalogViolation::error(
                self.name(),
                None,
                "Variant catalog is empty".to_string(),
            )]
        } else {
            vec![]
        }
    }
}

pub struct DefaultPaletteRule;

impl CatalogRule for DefaultPaletteRule {
    fn name(&self) -> &'static str { "default_palette" }

    fn check(&self, spec: &CatalogSpec) -> Vec<CatalogViolation> {
        if spec.palettes.contains_key(&spec.default_palette) {
            return vec![];
        }
        vec![CatalogViolation::error(
            self.name(),
            Some(spec.default_palette.clone()),
            format!("Default palette '{}' is not defined", spec.default_palette),
        )]
    }
}

pub struct HexColorRule;

impl CatalogRule for HexColorRule {
    fn name(&self) -> &'static str { "hex_colors" }

    fn check(&self, spec: &CatalogSpec) -> Vec<CatalogViolation> {
        let mut violations = vec![];
        for (key, pack) in &spec.palettes {
            for color in pack.colors() {
                if !is_hex_color(color) {
                    violations.push(CatalogViolation::error(
                        self.name(),
                        Some(key.clone()),
                        format!("Color '{}' is not #RRGGBB", color),
                    ));
                }
            }
        }
        violations
    }
}

pub struct PaletteReferenceRule;

impl CatalogRule for PaletteReferenceRule {
    fn name(&self) -> &'static str { "palette_reference" }

    fn check(&self, spec: &CatalogSpec) -> Vec<CatalogViolation> {
        spec.variants
            .iter()
            .filter(|v| !spec.palettes.contains_key(&v.palette_key))
            .map(|v| CatalogViolation::warning(
                self.name(),
                Some(v.name.clone()),
                format!(
                    "Palette '{}' not found, '{}' will be used",
                    v.palette_key, spec.default_palette
                ),
            ))
            .collect()
    }
}

pub struct DuplicateNameRule;

impl CatalogRule for DuplicateNameRule {
    fn name(&self) -> &'static str { "duplicate_variant_name" }

    fn check(&self, spec: &CatalogSpec) -> Vec<CatalogViolation> {
        let mut seen = HashSet::new();
        spec.variants
            .iter()
            .filter(|v| !seen.insert(v.name.as_str()))
            .map(|v| CatalogViolation::warning(
                self.name(),
                Some(v.name.clone()),
                "Variant name used more than once".to_string(),
            ))
            .collect()
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Validator runs every rule over a catalog document
pub struct Validator {
    rules: Vec<Box<dyn CatalogRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(NonEmptyVariantsRule),
                Box::new(DefaultPaletteRule),
                Box::new(HexColorRule),
                Box::new(PaletteReferenceRule),
                Box::new(DuplicateNameRule),
            ],
        }
    }

    pub fn validate(&self, spec: &CatalogSpec) -> ValidationReport {
        let violations: Vec<_> = self.rules
            .iter()
            .flat_map(|rule| rule.check(spec))
            .collect();

        let valid = !violations.iter().any(|v| v.severity == ViolationSeverity::Error);
        ValidationReport { valid, violations }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_spec() -> CatalogSpec {
        CatalogSpec::builtin()
    }

    #[test]
    fn test_builtin_catalog_is_clean() {
        let report = Validator::new().validate(&builtin_spec());
        assert!(report.valid);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn test_empty_variants_is_error() {
        let mut spec = builtin_spec();
        spec.variants.clear();
        let report = Validator::new().validate(&spec);
        assert!(!report.valid);
        assert_eq!(report.errors().next().unwrap().rule, "non_empty_variants");
    }

    #[test]
    fn test_missing_default_is_error() {
        let mut spec = builtin_spec();
        spec.default_palette = "gone".to_string();
        let report = Validator::new().validate(&spec);
        assert!(!report.valid);
        assert!(report.errors().any(|v| v.rule == "default_palette"));
    }

    #[test]
    fn test_bad_hex_is_error() {
        let mut spec = builtin_spec();
        spec.palettes.get_mut("pewter_gold").unwrap().accent = "gold".to_string();
        let report = Validator::new().validate(&spec);
        assert!(!report.valid);
        let v = report.errors().next().unwrap();
        assert_eq!(v.rule, "hex_colors");
        assert_eq!(v.subject.as_deref(), Some("pewter_gold"));
    }

    #[test]
    fn test_unknown_palette_is_warning_only() {
        let mut spec = builtin_spec();
        spec.variants[2].palette_key = "mystery".to_string();
        let report = Validator::new().validate(&spec);
        assert!(report.valid);
        let warnings: Vec<_> = report.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].subject.as_deref(), Some("Editorial Nickel"));
    }

    #[test]
    fn test_duplicate_name_is_warning() {
        let mut spec = builtin_spec();
        spec.variants[1].name = spec.variants[0].name.clone();
        let report = Validator::new().validate(&spec);
        assert!(report.valid);
        assert!(report.warnings().any(|v| v.rule == "duplicate_variant_name"));
    }

    #[test]
    fn test_hex_color_check() {
        assert!(is_hex_color("#A0785C"));
        assert!(is_hex_color("#a0785c"));
        assert!(!is_hex_color("A0785C"));
        assert!(!is_hex_color("#A0785"));
        assert!(!is_hex_color("#G0785C"));
    }
}
