//! Hashing System - SHA-256 seeds and fingerprints
//!
//! The seed is the only source of variation in the engine. It must never
//! depend on anything but the caller-supplied identity strings.

use sha2::{Sha256, Digest};
use serde::Serialize;
use serde_json::{Value, to_string};

/// Separator between identity fields, so `("ab", "c")` and `("a", "bc")` differ.
pub const SEED_SEPARATOR: char = '_';

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Derive the design seed for an entity.
///
/// `sha256("{project_id}_{user_id}_{created_at}")`, first 4 bytes, big-endian.
/// Total over all inputs, including empty strings.
pub fn generate_seed(project_id: &str, user_id: &str, created_at: &str) -> u32 {
    let seed_string = format!(
        "{}{sep}{}{sep}{}",
        project_id, user_id, created_at,
        sep = SEED_SEPARATOR
    );
    let digest = Sha256::digest(seed_string.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    let sorted = sort_value(&v);
    to_string(&sorted)
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            let sorted_map: serde_json::Map<String, Value> = sorted
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_value(v)))
                .collect();
            Value::Object(sorted_map)
        }
        // Array order is meaningful (variant order is the tie-break).
        Value::Array(arr) => {
            Value::Array(arr.iter().map(sort_value).collect())
        }
        _ => v.clone()
    }
}

/// Fingerprint a catalog: sha256 of its canonical JSON.
///
/// Any change to the catalog re-maps existing seeds, so a changed
/// fingerprint marks a breaking compatibility event.
pub fn catalog_fingerprint<T: Serialize>(catalog: &T) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(catalog)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_json_sorted() {
        let obj = json!({"z": 1, "a": 2, "m": 3});
        let canonical = canonical_json(&obj).unwrap();
        assert_eq!(canonical, r#"{"a":2,"m":3,"z":1}"#);
    }

    #[test]
    fn test_canonical_json_keeps_array_order() {
        let obj = json!({"variants": ["b", "a"]});
        let canonical = canonical_json(&obj).unwrap();
        assert_eq!(canonical, r#"{"variants":["b","a"]}"#);
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_seed_is_prefix_of_digest() {
        let hex = sha256_hex("proj-42__".as_bytes());
        let expected = u32::from_str_radix(&hex[..8], 16).unwrap();
        assert_eq!(generate_seed("proj-42", "", ""), expected);
    }

    #[test]
    fn test_seed_deterministic() {
        let a = generate_seed("proj-42", "user-7", "2024-05-01T10:00:00Z");
        let b = generate_seed("proj-42", "user-7", "2024-05-01T10:00:00Z");
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_separator_disambiguates() {
        assert_ne!(generate_seed("ab", "c", ""), generate_seed("a", "bc", ""));
    }

    #[test]
    fn test_seed_accepts_empty_and_unicode() {
        let _ = generate_seed("", "", "");
        let a = generate_seed("café-ünïcødé", "用户", "🕰");
        assert_eq!(a, generate_seed("café-ünïcødé", "用户", "🕰"));
    }

    #[test]
    fn test_fingerprint_ignores_key_order() {
        let a = json!({"default_palette": "x", "palettes": {"b": 1, "a": 2}});
        let b = json!({"palettes": {"a": 2, "b": 1}, "default_palette": "x"});
        assert_eq!(catalog_fingerprint(&a).unwrap(), catalog_fingerprint(&b).unwrap());
    }
}
