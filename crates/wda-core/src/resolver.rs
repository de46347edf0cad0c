//! Folder resolution
//!
//! Walks a [`LocationContext`] from the root, checking every step against the
//! catalog at the session version and mode, and synthesizes the token
//! bindings the native tree needs but the model leaves implicit:
//!
//! - single-instance folders take their `default_name` when unbound
//! - flattened folders get the intermediate `/<type>/<name>` level, named by
//!   the explicit path-token binding or the metadata default
//!
//! Resolution is pure. The same location always yields the same bindings.

use crate::error::{AliasError, Result};
use crate::verdict::Resolution;
use indexmap::IndexMap;
use wda_catalog::{tokens, AliasCatalog, FlattenedFolderSpec, FolderDefinition, LocationContext};
use wda_version::{Version, WlstMode};

/// Resolves locations for one version/mode pair
#[derive(Debug, Clone, Copy)]
pub struct FolderResolver<'a> {
    catalog: &'a AliasCatalog,
    version: &'a Version,
    mode: WlstMode,
}

impl<'a> FolderResolver<'a> {
    /// Create a resolver
    #[inline]
    #[must_use]
    pub fn new(catalog: &'a AliasCatalog, version: &'a Version, mode: WlstMode) -> Self {
        Self {
            catalog,
            version,
            mode,
        }
    }

    /// Resolve `location` to its folder definition and bindings
    ///
    /// A folder not declared under its parent is `Invalid`; one declared but
    /// absent at the session version or mode is `VersionInvalid`.
    #[must_use]
    pub fn resolve(&self, location: &LocationContext) -> Resolution<ResolvedFolder<'a>> {
        let Some(root) = self.catalog.find_folder("/") else {
            return Resolution::invalid("catalog has no root folder");
        };

        let mut bindings = location.name_tokens().clone();
        let mut chain = Vec::with_capacity(location.depth());
        let mut parent = root;

        for folder in location.folders() {
            if !parent.has_child(folder) {
                return Resolution::invalid(format!(
                    "{folder} is not a valid folder type in {}",
                    parent.path()
                ));
            }
            let child_path = AliasCatalog::child_path(parent.path(), folder);
            let Some(definition) = self.catalog.find_folder(&child_path) else {
                return Resolution::invalid(format!("{child_path} is not a known folder type"));
            };
            if !definition.wlst_mode().includes(self.mode) {
                return Resolution::version_invalid(format!(
                    "{child_path} is not supported in {} mode",
                    self.mode
                ));
            }
            if !definition.version_range().contains(self.version) {
                return Resolution::version_invalid(format!(
                    "{child_path} is valid for versions {}, not {}",
                    definition.version_range(),
                    self.version
                ));
            }

            if let Some(flat) = definition.flattened() {
                if !bindings.contains_key(&flat.path_token) {
                    let name = tokens::substitute(flat.default_name.get(self.mode), &bindings);
                    bindings.insert(flat.path_token.clone(), name);
                }
            }
            if !definition.is_multiple() {
                if let (Some(token), Some(default)) = (definition.name_token(), definition.default_name()) {
                    if !bindings.contains_key(token) {
                        let name = tokens::substitute(default, &bindings);
                        bindings.insert(token.to_string(), name);
                    }
                }
            }

            chain.push(definition);
            parent = definition;
        }

        tracing::debug!(
            "Resolved {} to {} ({} bindings) at {} {}",
            location,
            parent.path(),
            bindings.len(),
            self.version,
            self.mode
        );
        Resolution::Found(ResolvedFolder {
            definition: parent,
            chain,
            bindings,
            mode: self.mode,
            location: location.to_string(),
        })
    }
}

/// A location resolved against the catalog
#[derive(Debug, Clone)]
pub struct ResolvedFolder<'a> {
    definition: &'a FolderDefinition,
    chain: Vec<&'a FolderDefinition>,
    bindings: IndexMap<String, String>,
    mode: WlstMode,
    location: String,
}

impl<'a> ResolvedFolder<'a> {
    /// Definition of the innermost folder
    #[inline]
    #[must_use]
    pub fn definition(&self) -> &'a FolderDefinition {
        self.definition
    }

    /// Definitions walked, top-level folder first; empty at the root
    #[inline]
    #[must_use]
    pub fn chain(&self) -> &[&'a FolderDefinition] {
        &self.chain
    }

    /// Explicit and synthesized token bindings
    #[inline]
    #[must_use]
    pub fn bindings(&self) -> &IndexMap<String, String> {
        &self.bindings
    }

    /// Value bound to `token`
    #[must_use]
    pub fn binding(&self, token: &str) -> Option<&str> {
        self.bindings.get(token).map(String::as_str)
    }

    /// Display form of the location this came from
    #[inline]
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Top-level folder of the chain
    #[inline]
    #[must_use]
    pub fn top_level(&self) -> Option<&'a FolderDefinition> {
        self.chain.first().copied()
    }

    /// Native folder types walked, flattened levels included
    #[must_use]
    pub fn native_segments(&self) -> Vec<String> {
        let mut segments = Vec::with_capacity(self.chain.len() * 2);
        for definition in &self.chain {
            if let Some(flat) = definition.flattened() {
                segments.push(flat.wlst_type.get(self.mode).clone());
            }
            segments.push(definition.wlst_type(self.mode).to_string());
        }
        segments
    }

    /// Instance name of the flattened level of the innermost folder
    #[must_use]
    pub fn flattened_name(&self) -> Option<&str> {
        let flat = self.definition.flattened()?;
        self.binding(&flat.path_token)
    }

    /// Native path of the innermost folder instance
    ///
    /// # Errors
    /// Returns [`AliasError::MissingInstanceName`] if a level has no name
    pub fn attributes_path(&self) -> Result<String> {
        self.instance_path(self.chain.len())
    }

    /// Native path listing the innermost folder's instances
    ///
    /// # Errors
    /// Returns [`AliasError::MissingInstanceName`] if a parent level has no name
    pub fn list_path(&self) -> Result<String> {
        let Some(current) = self.chain.last() else {
            return Ok("/".to_string());
        };
        let mut path = self.create_path()?;
        push_segment(&mut path, current.wlst_type(self.mode));
        Ok(path)
    }

    /// Native path in which the innermost folder instance is created
    ///
    /// # Errors
    /// Returns [`AliasError::MissingInstanceName`] if a parent level has no name
    pub fn create_path(&self) -> Result<String> {
        let Some(current) = self.chain.last() else {
            return Ok("/".to_string());
        };
        let mut path = self.instance_path(self.chain.len() - 1)?;
        if let Some(flat) = current.flattened() {
            let name = self.flattened_level_name(current, flat)?;
            push_segment(&mut path, flat.wlst_type.get(self.mode));
            push_segment(&mut path, &name);
        }
        Ok(path)
    }

    /// Native path holding the innermost folder's child types
    ///
    /// # Errors
    /// Returns [`AliasError::MissingInstanceName`] if a level has no name
    pub fn subfolders_path(&self) -> Result<String> {
        self.attributes_path()
    }

    fn instance_path(&self, depth: usize) -> Result<String> {
        let mut path = String::from("/");
        for definition in &self.chain[..depth] {
            if let Some(flat) = definition.flattened() {
                let name = self.flattened_level_name(definition, flat)?;
                push_segment(&mut path, flat.wlst_type.get(self.mode));
                push_segment(&mut path, &name);
            }
            let name = self.instance_name(definition)?;
            push_segment(&mut path, definition.wlst_type(self.mode));
            push_segment(&mut path, &name);
        }
        Ok(path)
    }

    fn instance_name(&self, definition: &FolderDefinition) -> Result<String> {
        let bound = definition
            .name_token()
            .and_then(|token| self.bindings.get(token).cloned());
        let name = match bound {
            Some(name) => Some(name),
            None if definition.is_multiple() => None,
            None => definition
                .default_name()
                .map(|default| tokens::substitute(default, &self.bindings)),
        };
        name.filter(|n| !n.is_empty() && !tokens::has_tokens(n))
            .ok_or_else(|| AliasError::MissingInstanceName {
                location: self.location.clone(),
                folder: definition.path().to_string(),
            })
    }

    fn flattened_level_name(&self, definition: &FolderDefinition, flat: &FlattenedFolderSpec) -> Result<String> {
        self.bindings
            .get(&flat.path_token)
            .filter(|n| !n.is_empty() && !tokens::has_tokens(n))
            .cloned()
            .ok_or_else(|| AliasError::MissingInstanceName {
                location: self.location.clone(),
                folder: format!("{} ({})", definition.path(), flat.wlst_type.get(self.mode)),
            })
    }
}

fn push_segment(path: &mut String, segment: &str) {
    if !path.ends_with('/') {
        path.push('/');
    }
    path.push_str(segment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::ValidationVerdict;
    use std::sync::Arc;

    const DOC: &str = r#"{
        "schema_version": "alias_catalog_v1",
        "root": {"folders": {
            "Partition": {
                "wlst_type": "${Partition:Partitions}",
                "instance": "multiple",
                "name_token": "PARTITION",
                "version": "[12.2.1,)",
                "folders": {
                    "SelfTuning": {
                        "wlst_type": "SelfTuning",
                        "name_token": "SELFTUNING",
                        "default_name": "%PARTITION%",
                        "folders": {
                            "WorkManager": {
                                "wlst_type": "WorkManager",
                                "instance": "multiple",
                                "name_token": "WORKMANAGER",
                                "flattened": {"wlst_type": "WorkManagers", "name": "%PARTITION%-wm", "path_token": "WMS"}
                            }
                        }
                    },
                    "Orphan": {"wlst_type": "Orphan"}
                }
            }
        }}
    }"#;

    fn setup() -> (Arc<AliasCatalog>, Version) {
        (Arc::new(AliasCatalog::from_json_str(DOC).unwrap()), "14.1.1".parse().unwrap())
    }

    #[test]
    fn resolves_with_synthesized_bindings() {
        let (catalog, version) = setup();
        let resolver = FolderResolver::new(&catalog, &version, WlstMode::Online);
        let location =
            LocationContext::from_model_path(Arc::clone(&catalog), "/Partition/p1/SelfTuning/WorkManager/wm1").unwrap();

        let resolved = resolver.resolve(&location).found().unwrap();
        assert_eq!(resolved.binding("SELFTUNING"), Some("p1"));
        assert_eq!(resolved.binding("WMS"), Some("p1-wm"));
        assert_eq!(
            resolved.native_segments(),
            vec!["Partitions", "SelfTuning", "WorkManagers", "WorkManager"]
        );
        assert_eq!(
            resolved.attributes_path().unwrap(),
            "/Partitions/p1/SelfTuning/p1/WorkManagers/p1-wm/WorkManager/wm1"
        );
        assert_eq!(
            resolved.list_path().unwrap(),
            "/Partitions/p1/SelfTuning/p1/WorkManagers/p1-wm/WorkManager"
        );
        assert_eq!(
            resolved.create_path().unwrap(),
            "/Partitions/p1/SelfTuning/p1/WorkManagers/p1-wm"
        );
    }

    #[test]
    fn explicit_path_token_wins() {
        let (catalog, version) = setup();
        let resolver = FolderResolver::new(&catalog, &version, WlstMode::Offline);
        let mut location =
            LocationContext::from_model_path(Arc::clone(&catalog), "/Partition/p1/SelfTuning/WorkManager").unwrap();
        location.add_name_token("WMS", "custom").unwrap();

        let resolved = resolver.resolve(&location).found().unwrap();
        assert_eq!(resolved.flattened_name(), Some("custom"));
        assert_eq!(resolved.create_path().unwrap(), "/Partition/p1/SelfTuning/p1/WorkManagers/custom");
        assert!(matches!(
            resolved.attributes_path(),
            Err(AliasError::MissingInstanceName { .. })
        ));
    }

    #[test]
    fn unknown_and_version_invalid_steps() {
        let (catalog, version) = setup();
        let resolver = FolderResolver::new(&catalog, &version, WlstMode::Online);
        let bad = LocationContext::from_model_path(Arc::clone(&catalog), "/Partition/p1/Nope").unwrap();
        assert_eq!(resolver.resolve(&bad).verdict(), ValidationVerdict::Invalid);

        let old: Version = "12.1.3".parse().unwrap();
        let old_resolver = FolderResolver::new(&catalog, &old, WlstMode::Online);
        let location = LocationContext::from_model_path(Arc::clone(&catalog), "/Partition/p1").unwrap();
        assert_eq!(old_resolver.resolve(&location).verdict(), ValidationVerdict::VersionInvalid);
    }

    #[test]
    fn single_folder_without_default_needs_binding() {
        let (catalog, version) = setup();
        let resolver = FolderResolver::new(&catalog, &version, WlstMode::Online);
        let location = LocationContext::from_model_path(Arc::clone(&catalog), "/Partition/p1/Orphan").unwrap();
        let resolved = resolver.resolve(&location).found().unwrap();
        let err = resolved.attributes_path().unwrap_err();
        assert!(err.is_contract_violation());
        assert_eq!(resolved.create_path().unwrap(), "/Partitions/p1");
    }

    #[test]
    fn root_paths() {
        let (catalog, version) = setup();
        let resolver = FolderResolver::new(&catalog, &version, WlstMode::Online);
        let resolved = resolver.resolve(&LocationContext::new(Arc::clone(&catalog))).found().unwrap();
        assert!(resolved.definition().is_root());
        assert_eq!(resolved.attributes_path().unwrap(), "/");
        assert_eq!(resolved.list_path().unwrap(), "/");
        assert!(resolved.native_segments().is_empty());
    }
}
