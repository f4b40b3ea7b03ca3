//! Key/value metadata read from the content repository's YAML documents.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;

use crate::context::ServiceContext;
use crate::error::{MetadataError, ScanWarning};

/// Per-error-key content descriptor; its presence marks a content leaf.
pub const METADATA_FILE: &str = "metadata.yaml";

/// Optional plugin-level descriptor in the directory above a content leaf.
pub const PLUGIN_METADATA_FILE: &str = "plugin.yaml";

const PRODUCT_CODE_KEY: &str = "product_code";
const ROLE_KEY: &str = "role";

/// Flattened top-level values of a YAML mapping.
///
/// Keys whose value is null or not a scalar are kept without a value, so they
/// still override on merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    values: BTreeMap<String, Option<String>>,
}

impl Metadata {
    /// Parses a YAML document into its top-level values.
    ///
    /// An empty document yields empty metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not YAML or its top level is not a mapping.
    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let mapping = match serde_yaml::from_str::<Value>(text)? {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(Self::default()),
            _ => return Err(MetadataError::NotMapping),
        };

        let values = mapping
            .into_iter()
            .filter_map(|(key, value)| Some((scalar_to_string(key)?, scalar_to_string(value))))
            .collect();
        Ok(Self { values })
    }

    /// Overlays `other` on top of `self`; `other` wins on key collisions.
    pub fn merge(&mut self, other: Metadata) {
        self.values.extend(other.values);
    }

    /// Looks up a scalar value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key)?.as_deref()
    }

    /// Returns `true` if the key is present, with or without a scalar value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Synthesized role tag `<product_code>_<role>`, when both are set and non-empty.
    #[must_use]
    pub fn role_tag(&self) -> Option<String> {
        let product_code = self.get(PRODUCT_CODE_KEY).filter(|v| !v.is_empty())?;
        let role = self.get(ROLE_KEY).filter(|v| !v.is_empty())?;
        Some(format!("{product_code}_{role}"))
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Loads the merged metadata for a content leaf directory.
///
/// Reads `plugin.yaml` from the parent directory when it exists, then the
/// leaf's own `metadata.yaml`, whose values take precedence.
///
/// # Errors
///
/// Returns a [`ScanWarning::BadMetadata`] naming the first document that
/// could not be read or parsed.
pub fn load_leaf_metadata(ctx: &ServiceContext, leaf: &Path) -> Result<Metadata, ScanWarning> {
    let mut merged = Metadata::default();

    if let Some(plugin_dir) = leaf.parent() {
        let plugin_yaml = plugin_dir.join(PLUGIN_METADATA_FILE);
        if ctx.fs.exists(&plugin_yaml) {
            merged.merge(load_document(ctx, &plugin_yaml)?);
        }
    }

    merged.merge(load_document(ctx, &leaf.join(METADATA_FILE))?);
    Ok(merged)
}

fn load_document(ctx: &ServiceContext, path: &Path) -> Result<Metadata, ScanWarning> {
    ctx.fs
        .read_to_string(path)
        .map_err(|e| MetadataError::Read(e.to_string()))
        .and_then(|text| Metadata::parse(&text))
        .map_err(|e| ScanWarning::BadMetadata { path: path.to_path_buf(), reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::testing::MemFs;

    #[test]
    fn parse_reads_scalar_values() {
        let meta = Metadata::parse("product_code: rhel\nrole: host\nseverity: 3\nresolution_risk:\n  - a\n")
            .unwrap();
        assert_eq!(meta.get("product_code"), Some("rhel"));
        assert_eq!(meta.get("severity"), Some("3"));
        assert_eq!(meta.get("resolution_risk"), None);
        assert!(meta.contains_key("resolution_risk"));
    }

    #[test]
    fn parse_empty_document_is_empty() {
        assert_eq!(Metadata::parse("").unwrap(), Metadata::default());
    }

    #[test]
    fn parse_rejects_non_mapping() {
        assert!(matches!(Metadata::parse("- a\n- b\n"), Err(MetadataError::NotMapping)));
    }

    #[test]
    fn parse_rejects_invalid_yaml() {
        assert!(matches!(Metadata::parse("key: [unclosed"), Err(MetadataError::Parse(_))));
    }

    #[test]
    fn role_tag_requires_both_values() {
        let mut meta = Metadata::parse("product_code: osp\n").unwrap();
        assert_eq!(meta.role_tag(), None);
        meta.merge(Metadata::parse("role: controller\n").unwrap());
        assert_eq!(meta.role_tag().as_deref(), Some("osp_controller"));
    }

    #[test]
    fn role_tag_ignores_empty_values() {
        let meta = Metadata::parse("product_code: ''\nrole: controller\n").unwrap();
        assert_eq!(meta.role_tag(), None);
    }

    #[test]
    fn leaf_metadata_overrides_plugin_metadata() {
        let ctx = MemFs::new()
            .file("/content/osp/plug/plugin.yaml", "product_code: osp\nrole: compute\n")
            .file("/content/osp/plug/KEY/metadata.yaml", "role: controller\n")
            .into_context();
        let meta = load_leaf_metadata(&ctx, Path::new("/content/osp/plug/KEY")).unwrap();
        assert_eq!(meta.role_tag().as_deref(), Some("osp_controller"));
    }

    #[test]
    fn null_leaf_role_clears_plugin_role() {
        for leaf in ["role:\n", "role: ~\n", "role:\n  - compute\n"] {
            let ctx = MemFs::new()
                .file("/content/osp/plug/plugin.yaml", "product_code: osp\nrole: compute\n")
                .file("/content/osp/plug/KEY/metadata.yaml", leaf)
                .into_context();
            let meta = load_leaf_metadata(&ctx, Path::new("/content/osp/plug/KEY")).unwrap();
            assert!(meta.contains_key("role"), "{leaf:?}");
            assert_eq!(meta.role_tag(), None, "{leaf:?}");
        }
    }

    #[test]
    fn broken_plugin_metadata_is_reported() {
        let ctx = MemFs::new()
            .file("/content/osp/plug/plugin.yaml", "product_code: [osp\n")
            .file("/content/osp/plug/KEY/metadata.yaml", "role: controller\n")
            .into_context();
        let err = load_leaf_metadata(&ctx, Path::new("/content/osp/plug/KEY")).unwrap_err();
        assert!(matches!(
            err,
            ScanWarning::BadMetadata { ref path, .. } if path.ends_with("plugin.yaml")
        ));
    }
}
