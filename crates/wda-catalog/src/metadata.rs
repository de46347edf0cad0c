//! Raw metadata document
//!
//! Mirrors the on-disk JSON/YAML layout one-to-one. Values that may be
//! mode-split (`${offline:online}`) or that need a located error message are
//! kept as strings here and compiled by [`crate::AliasCatalog`].

use crate::types::{FolderCategory, InstanceKind, ModelSection, PasswordForm, PreferredModelType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Schema marker every catalog document must carry
pub const SCHEMA_VERSION: &str = "alias_catalog_v1";

/// Default native-name suffix of dual passwords
pub const DEFAULT_SECRET_SUFFIX: &str = "Encrypted";

/// Top-level catalog document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Schema marker, must equal [`SCHEMA_VERSION`]
    pub schema_version: String,

    /// Suffix marking the encrypted half of a dual password
    #[serde(default = "default_secret_suffix")]
    pub secret_suffix: String,

    /// Value prefixes identifying an already-encrypted secret
    #[serde(default = "default_encrypted_prefixes")]
    pub encrypted_prefixes: Vec<String>,

    /// Root folder; its children are the top-level model folders
    pub root: FolderSpec,
}

fn default_secret_suffix() -> String {
    DEFAULT_SECRET_SUFFIX.to_string()
}

fn default_encrypted_prefixes() -> Vec<String> {
    vec!["{AES}".to_string(), "{AES256}".to_string()]
}

/// One folder entry and its subtree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderSpec {
    /// Native MBean type, possibly `${offline:online}`
    pub wlst_type: Option<String>,
    /// Single or multiple instances
    pub instance: InstanceKind,
    /// Token holding the instance name
    pub name_token: Option<String>,
    /// Instance name used when the model does not give one
    pub default_name: Option<String>,
    /// Version range text; absent means every version
    pub version: Option<String>,
    /// `offline`, `online` or `both`
    pub wlst_mode: Option<String>,
    /// Behavioural category
    pub category: FolderCategory,
    /// Model file section, top-level folders only
    pub section: Option<ModelSection>,
    /// Intermediate native level hidden from the model
    pub flattened: Option<FlattenedSpec>,
    /// Child folders keyed by model name
    pub folders: IndexMap<String, FolderSpec>,
    /// Attributes keyed by model name
    pub attributes: IndexMap<String, VariantList>,
}

/// Flattened intermediate level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlattenedSpec {
    /// Native type of the intermediate folder
    pub wlst_type: String,
    /// Default intermediate instance name, may reference `%TOKEN%`s and
    /// may be mode-split
    pub name: String,
    /// Token that overrides the intermediate name when bound
    pub path_token: String,
}

/// One variant or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantList {
    /// Several version/mode variants
    Many(Vec<AttributeVariantSpec>),
    /// A single variant
    One(AttributeVariantSpec),
}

impl VariantList {
    /// Flatten into a vector
    #[must_use]
    pub fn into_vec(self) -> Vec<AttributeVariantSpec> {
        match self {
            Self::Many(v) => v,
            Self::One(v) => vec![v],
        }
    }
}

/// Attribute variant as written in metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeVariantSpec {
    /// Version range text
    pub version: Option<String>,
    /// Mode mask text
    pub wlst_mode: Option<String>,
    /// Native name; defaults to the model name
    pub wlst_name: Option<String>,
    /// Native type; defaults to `string`
    pub wlst_type: Option<String>,
    /// `RW`, `RO` or `IGNORED`, possibly mode-split
    pub access: Option<String>,
    /// Default value
    pub default: Option<serde_json::Value>,
    /// Shape of list values read back into the model
    pub preferred_model_type: Option<PreferredModelType>,
    /// Setting the attribute requires a server restart
    pub restart_required: bool,
    /// Values may contain `@@PWD@@`-style path tokens
    pub uses_path_tokens: bool,
    /// Accepted online value form for single-name passwords
    pub password_form: Option<PasswordForm>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_defaults() {
        let doc: CatalogDocument =
            serde_json::from_str(r#"{"schema_version": "alias_catalog_v1", "root": {}}"#).unwrap();
        assert_eq!(doc.secret_suffix, "Encrypted");
        assert_eq!(doc.encrypted_prefixes, vec!["{AES}", "{AES256}"]);
        assert!(doc.root.folders.is_empty());
        assert_eq!(doc.root.instance, InstanceKind::Single);
    }

    #[test]
    fn variant_list_accepts_object_or_array() {
        let one: VariantList = serde_json::from_str(r#"{"wlst_type": "integer"}"#).unwrap();
        assert_eq!(one.into_vec().len(), 1);

        let many: VariantList =
            serde_json::from_str(r#"[{"version": "[12.1.2,)"}, {"version": "[,12.1.2)"}]"#).unwrap();
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn folder_order_is_preserved() {
        let yaml = "folders:\n  Zeta: {}\n  Alpha: {}\n  Mid: {}\n";
        let spec: FolderSpec = serde_yaml::from_str(yaml).unwrap();
        let names: Vec<_> = spec.folders.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }
}
