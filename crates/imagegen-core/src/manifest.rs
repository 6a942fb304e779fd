//! The `public.json` variant manifest.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// File name of the manifest inside a release directory.
pub const MANIFEST_FILE: &str = "public.json";

/// Per-variant entry of `public.json`.
///
/// All fields are optional in the JSON document:
///
/// | field            | default              |
/// |------------------|----------------------|
/// | `from`           | the variant's name   |
/// | `is_third_party` | `false`              |
/// | `qd_code`        | `""`                 |
/// | `description`    | `""`                 |
///
/// # Examples
///
/// ```
/// use imagegen_core::VariantSpec;
///
/// let spec: VariantSpec = serde_json::from_str(r#"{"qd_code": "QDPY"}"#).unwrap();
/// assert_eq!(spec.base_fragment("python"), "python");
/// assert!(!spec.is_third_party);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    /// Base fragment to inherit from (defaults to the variant name)
    #[serde(default)]
    pub from: Option<String>,
    /// Selects the third-party trailer template instead of the IntelliJ one
    #[serde(default)]
    pub is_third_party: bool,
    #[serde(default)]
    pub qd_code: String,
    #[serde(default)]
    pub description: String,
}

impl VariantSpec {
    /// Identifier of the base fragment this variant is composed from.
    pub fn base_fragment<'a>(&'a self, variant: &'a str) -> &'a str {
        self.from.as_deref().unwrap_or(variant)
    }
}

/// Variant name → [`VariantSpec`], iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantManifest {
    pub variants: BTreeMap<String, VariantSpec>,
}

impl VariantManifest {
    /// Load `public.json` from a release directory.
    ///
    /// Unlike `matrix.toml`, a missing manifest is an error: there is
    /// nothing to generate without it.
    pub fn load(release_dir: &Path) -> crate::Result<Self> {
        let path = release_dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(crate::Error::ManifestMissing(path));
        }
        let content = std::fs::read_to_string(&path).map_err(|e| crate::Error::ManifestRead {
            path: path.clone(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| crate::Error::ManifestParse { path, source: e })
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariantSpec)> {
        self.variants.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_overrides_variant_name() {
        let spec = VariantSpec {
            from: Some("jvm".to_owned()),
            ..Default::default()
        };
        assert_eq!(spec.base_fragment("jvm-community"), "jvm");
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        let manifest = VariantManifest::parse(r#"{"go": {"qd_code": "QDGO", "eap": true}}"#).unwrap();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.variants["go"].qd_code, "QDGO");
    }

    #[test]
    fn parse_rejects_non_object_entries() {
        assert!(VariantManifest::parse(r#"{"go": "QDGO"}"#).is_err());
        assert!(VariantManifest::parse(r#"["go"]"#).is_err());
    }

    #[test]
    fn iter_is_sorted_by_name() {
        let manifest =
            VariantManifest::parse(r#"{"python": {}, "cpp": {}, "js": {}}"#).unwrap();
        let names: Vec<_> = manifest.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["cpp", "js", "python"]);
    }
}
