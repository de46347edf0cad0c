//! Per-folder snapshots for one version/mode pair

use crate::definition::FolderDefinition;
use indexmap::IndexMap;
use wda_version::{Version, WlstMode};

/// What a folder looks like at one version in one mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FolderView {
    /// Child folders present, in declaration order
    pub subfolders: Vec<String>,
    /// Usable attributes and their native type names, in declaration order
    pub attributes: IndexMap<String, String>,
    /// Native names that must never be read back
    pub skip_names: Vec<String>,
}

impl FolderView {
    /// Compute the view of `folder` from its definitions
    ///
    /// Children are looked up through `child_active`, which answers whether
    /// the child at the given path exists at this version/mode.
    pub(crate) fn compute(
        folder: &FolderDefinition,
        version: &Version,
        mode: WlstMode,
        secret_suffix: &str,
        child_active: impl Fn(&str) -> bool,
    ) -> Self {
        let subfolders = folder
            .children()
            .iter()
            .filter(|child| child_active(child))
            .cloned()
            .collect();

        let mut attributes = IndexMap::new();
        let mut skip_names = Vec::new();
        for attribute in folder.attributes() {
            let Some(variant) = attribute.variant_for(version, mode) else {
                continue;
            };
            if variant.ignored(mode) {
                continue;
            }
            attributes.insert(
                attribute.name().to_string(),
                variant.native_type(mode).to_string(),
            );
            if mode == WlstMode::Online && variant.is_password(mode) {
                if let Some(stripped) = strip_secret_suffix(variant.native_name(mode), secret_suffix) {
                    skip_names.push(stripped.to_string());
                }
            }
        }

        Self {
            subfolders,
            attributes,
            skip_names,
        }
    }

    /// Whether the view has `name` as a subfolder
    #[must_use]
    pub fn has_subfolder(&self, name: &str) -> bool {
        self.subfolders.iter().any(|s| s == name)
    }
}

/// Native name with the secret suffix removed, when it carries one
#[must_use]
pub fn strip_secret_suffix<'a>(native_name: &'a str, secret_suffix: &str) -> Option<&'a str> {
    if secret_suffix.is_empty() {
        return None;
    }
    native_name
        .strip_suffix(secret_suffix)
        .filter(|base| !base.is_empty())
}
