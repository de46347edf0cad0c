//! The alias catalog
//!
//! Compiles a [`CatalogDocument`] into [`FolderDefinition`]s keyed by their
//! normalized model folder path. Every defect in the metadata is reported at
//! load time; after that the catalog is read-only apart from the lazily
//! filled [`FolderView`] cache.

use crate::definition::{AttributeDefinition, AttributeVariant, FlattenedFolderSpec, FolderDefinition, ResolvedVariant};
use crate::error::CatalogError;
use crate::metadata::{AttributeVariantSpec, CatalogDocument, FolderSpec, VariantList, SCHEMA_VERSION};
use crate::tokens;
use crate::types::{Access, AttributeType, InstanceKind, ModeSplit};
use crate::view::{strip_secret_suffix, FolderView};
use dashmap::DashMap;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use wda_version::{ModeMask, Version, VersionRange, WlstMode};

/// Cache key of a folder view
type ViewKey = (String, Version, WlstMode);

/// Versioned catalog of model folders and attributes
///
/// Shared read-only behind an [`Arc`]; lookups by folder path and by
/// attribute name are hash lookups.
#[derive(Debug)]
pub struct AliasCatalog {
    folders: HashMap<String, FolderDefinition>,
    secret_suffix: String,
    encrypted_prefixes: Vec<String>,
    views: DashMap<ViewKey, Arc<FolderView>>,
}

impl AliasCatalog {
    /// Compile a parsed metadata document
    ///
    /// # Errors
    /// Returns [`CatalogError::UnsupportedSchema`] or a
    /// [`CatalogError::ConfigurationDefect`] for bad metadata
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        if document.schema_version != SCHEMA_VERSION {
            return Err(CatalogError::UnsupportedSchema {
                found: document.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        if document.encrypted_prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err(CatalogError::defect("encrypted_prefixes", "empty prefix"));
        }

        let mut compiler = Compiler::default();
        compiler.compile_folder("/".to_string(), "", document.root, &[], 0)?;

        Ok(Self {
            folders: compiler.folders,
            secret_suffix: document.secret_suffix,
            encrypted_prefixes: document.encrypted_prefixes,
            views: DashMap::new(),
        })
    }

    /// Parse and compile a JSON document
    ///
    /// # Errors
    /// Returns [`CatalogError::Parse`] for malformed JSON, otherwise as
    /// [`AliasCatalog::from_document`]
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let document = serde_json::from_str(json).map_err(|e| CatalogError::Parse {
            origin: "json input".to_string(),
            message: e.to_string(),
        })?;
        Self::from_document(document)
    }

    /// Parse and compile a YAML document
    ///
    /// # Errors
    /// Returns [`CatalogError::Parse`] for malformed YAML, otherwise as
    /// [`AliasCatalog::from_document`]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let document = serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse {
            origin: "yaml input".to_string(),
            message: e.to_string(),
        })?;
        Self::from_document(document)
    }

    /// Load a catalog file, choosing the format by extension
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] if the file cannot be read,
    /// [`CatalogError::UnsupportedFormat`] for other extensions, and parse or
    /// defect errors as the string loaders do
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let is_yaml = match extension.as_deref() {
            Some("json") => false,
            Some("yaml" | "yml") => true,
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };

        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
        let origin = path.display().to_string();
        let document: CatalogDocument = if is_yaml {
            serde_yaml::from_str(&text).map_err(|e| CatalogError::Parse {
                origin: origin.clone(),
                message: e.to_string(),
            })?
        } else {
            serde_json::from_str(&text).map_err(|e| CatalogError::Parse {
                origin: origin.clone(),
                message: e.to_string(),
            })?
        };

        let catalog = Self::from_document(document)?;
        tracing::info!("Loaded alias catalog from {}: {} folders", origin, catalog.folder_count());
        Ok(catalog)
    }

    /// Normalize a model folder path: `JDBCSystemResource/` becomes
    /// `/JDBCSystemResource`, and the empty path becomes `/`
    #[must_use]
    pub fn normalize_path(path: &str) -> String {
        let joined = path
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        format!("/{joined}")
    }

    /// Path of `child` below `parent`
    #[must_use]
    pub fn child_path(parent: &str, child: &str) -> String {
        if parent == "/" {
            format!("/{child}")
        } else {
            format!("{parent}/{child}")
        }
    }

    /// Folder definition at a model folder path
    ///
    /// A folder that exists, but not at the version a caller is working
    /// with, is still returned.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] if no version declares it
    pub fn get_folder(&self, path: &str) -> Result<&FolderDefinition, CatalogError> {
        self.find_folder(path)
            .ok_or_else(|| CatalogError::UnknownFolderType(Self::normalize_path(path)))
    }

    /// Folder definition at a model folder path, if declared
    #[must_use]
    pub fn find_folder(&self, path: &str) -> Option<&FolderDefinition> {
        match self.folders.get(path) {
            Some(folder) => Some(folder),
            None => self.folders.get(&Self::normalize_path(path)),
        }
    }

    /// The root folder
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] if the root is missing
    pub fn root(&self) -> Result<&FolderDefinition, CatalogError> {
        self.get_folder("/")
    }

    /// Attribute variant active at `version` in `mode`
    ///
    /// `name` is matched against model names first and native names second.
    /// Returns `None` for an unknown folder, an unknown name, or a name with
    /// no variant at this version/mode.
    #[must_use]
    pub fn get_attribute(
        &self,
        path: &str,
        name: &str,
        version: &Version,
        mode: WlstMode,
    ) -> Option<ResolvedVariant<'_>> {
        let folder = self.find_folder(path)?;
        if let Some(definition) = folder.attribute(name) {
            if let Some(variant) = definition.variant_for(version, mode) {
                return Some(ResolvedVariant::new(definition, variant, mode));
            }
        }
        Self::native_lookup(folder, name, version, mode)
    }

    /// Attribute variant whose native name in `mode` is `native_name`
    #[must_use]
    pub fn get_attribute_by_native(
        &self,
        path: &str,
        native_name: &str,
        version: &Version,
        mode: WlstMode,
    ) -> Option<ResolvedVariant<'_>> {
        let folder = self.find_folder(path)?;
        Self::native_lookup(folder, native_name, version, mode)
    }

    fn native_lookup<'a>(
        folder: &'a FolderDefinition,
        native_name: &str,
        version: &Version,
        mode: WlstMode,
    ) -> Option<ResolvedVariant<'a>> {
        folder
            .model_names_for_native(native_name)
            .iter()
            .filter_map(|model_name| folder.attribute(model_name))
            .find_map(|definition| {
                definition
                    .variant_for(version, mode)
                    .filter(|variant| variant.native_name(mode) == native_name)
                    .map(|variant| ResolvedVariant::new(definition, variant, mode))
            })
    }

    /// Snapshot of a folder at `version` in `mode`, computed on first use
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn folder_view(
        &self,
        path: &str,
        version: &Version,
        mode: WlstMode,
    ) -> Result<Arc<FolderView>, CatalogError> {
        let folder = self.get_folder(path)?;
        let key = (folder.path().to_string(), version.clone(), mode);
        if let Some(view) = self.views.get(&key) {
            return Ok(Arc::clone(view.value()));
        }

        tracing::debug!("Computing {} view of {} at {}", mode, folder.path(), version);
        let view = Arc::new(FolderView::compute(
            folder,
            version,
            mode,
            &self.secret_suffix,
            |child| {
                self.folders
                    .get(&Self::child_path(folder.path(), child))
                    .is_some_and(|def| def.is_active(version, mode))
            },
        ));
        let cached = self.views.entry(key).or_insert(view);
        Ok(Arc::clone(cached.value()))
    }

    /// Number of cached folder views
    #[inline]
    #[must_use]
    pub fn cached_view_count(&self) -> usize {
        self.views.len()
    }

    /// Suffix marking the encrypted half of a dual password
    #[inline]
    #[must_use]
    pub fn secret_suffix(&self) -> &str {
        &self.secret_suffix
    }

    /// Prefixes identifying encrypted values
    #[inline]
    #[must_use]
    pub fn encrypted_prefixes(&self) -> &[String] {
        &self.encrypted_prefixes
    }

    /// Whether `value` is already encrypted
    #[must_use]
    pub fn is_encrypted(&self, value: &str) -> bool {
        self.encrypted_prefixes.iter().any(|p| value.starts_with(p.as_str()))
    }

    /// Plaintext native name of a dual password, if `native_name` is one
    #[must_use]
    pub fn plaintext_password_name<'a>(&self, native_name: &'a str) -> Option<&'a str> {
        strip_secret_suffix(native_name, &self.secret_suffix)
    }

    /// Names of top-level model folders in declaration order
    #[must_use]
    pub fn top_level_folder_names(&self) -> &[String] {
        self.folders.get("/").map(FolderDefinition::children).unwrap_or_default()
    }

    /// Number of declared folders, the root included
    #[inline]
    #[must_use]
    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// Iterate over every folder definition, in no particular order
    pub fn folders(&self) -> impl Iterator<Item = &FolderDefinition> {
        self.folders.values()
    }
}

#[derive(Default)]
struct Compiler {
    folders: HashMap<String, FolderDefinition>,
}

impl Compiler {
    fn compile_folder(
        &mut self,
        path: String,
        name: &str,
        spec: FolderSpec,
        scope: &[String],
        depth: usize,
    ) -> Result<(), CatalogError> {
        let is_root = depth == 0;
        let version = parse_range(&path, spec.version.as_deref())?;
        let wlst_mode = parse_mask(&path, spec.wlst_mode.as_deref())?;

        let wlst_type = match spec.wlst_type.as_deref() {
            Some(raw) => ModeSplit::parse(raw),
            None if is_root => ModeSplit::uniform(String::new()),
            None => return Err(CatalogError::defect(&path, "missing wlst_type")),
        };
        if !is_root {
            require_per_mode(&path, "wlst_type", &wlst_type, wlst_mode)?;
        }

        let name_token = match spec.name_token {
            Some(token) if token.trim().is_empty() => {
                return Err(CatalogError::defect(&path, "empty name_token"));
            }
            other => other.map(|t| t.trim().to_string()),
        };
        if spec.instance == InstanceKind::Multiple && name_token.is_none() {
            return Err(CatalogError::defect(&path, "multiple-instance folder has no name_token"));
        }

        if let Some(default_name) = &spec.default_name {
            check_token_scope(&path, "default_name", default_name, scope)?;
        }

        let flattened = match spec.flattened {
            Some(flat) => {
                if flat.path_token.trim().is_empty() {
                    return Err(CatalogError::defect(&path, "flattened folder has empty path_token"));
                }
                let flat_name = ModeSplit::parse(&flat.name);
                require_per_mode(&path, "flattened name", &flat_name, wlst_mode)?;
                for name in flat_name.iter() {
                    check_token_scope(&path, "flattened name", name, scope)?;
                }
                let flat_type = ModeSplit::parse(&flat.wlst_type);
                require_per_mode(&path, "flattened wlst_type", &flat_type, wlst_mode)?;
                Some(FlattenedFolderSpec {
                    wlst_type: flat_type,
                    default_name: flat_name,
                    path_token: flat.path_token.trim().to_string(),
                })
            }
            None => None,
        };

        if spec.section.is_some() && depth != 1 {
            return Err(CatalogError::defect(&path, "section is only allowed on top-level folders"));
        }

        let mut child_scope = scope.to_vec();
        child_scope.extend(flattened.as_ref().map(|f| f.path_token.clone()));
        child_scope.extend(name_token.clone());

        let mut attributes = IndexMap::with_capacity(spec.attributes.len());
        let mut native_index: HashMap<String, Vec<String>> = HashMap::new();
        for (attr_name, variants) in spec.attributes {
            let attribute = compile_attribute(&path, &attr_name, variants)?;
            for variant in &attribute.variants {
                for native in variant.wlst_name.iter() {
                    let bucket = native_index.entry(native.clone()).or_default();
                    if !bucket.contains(&attr_name) {
                        bucket.push(attr_name.clone());
                    }
                }
            }
            attributes.insert(attr_name, attribute);
        }
        check_native_ambiguity(&path, &attributes, &native_index)?;

        let mut children = Vec::with_capacity(spec.folders.len());
        for (child_name, child_spec) in spec.folders {
            if child_name.trim().is_empty() || child_name.contains('/') {
                return Err(CatalogError::defect(
                    &path,
                    format!("invalid child folder name '{child_name}'"),
                ));
            }
            let child_path = AliasCatalog::child_path(&path, &child_name);
            self.compile_folder(child_path, &child_name, child_spec, &child_scope, depth + 1)?;
            children.push(child_name);
        }

        self.folders.insert(
            path.clone(),
            FolderDefinition {
                path,
                name: name.to_string(),
                wlst_type,
                instance: spec.instance,
                name_token,
                default_name: spec.default_name,
                version,
                wlst_mode,
                category: spec.category,
                section: spec.section,
                flattened,
                children,
                attributes,
                native_index,
            },
        );
        Ok(())
    }
}

fn compile_attribute(
    folder_path: &str,
    name: &str,
    variants: VariantList,
) -> Result<AttributeDefinition, CatalogError> {
    let location = format!("{folder_path}@{name}");
    if name.trim().is_empty() {
        return Err(CatalogError::defect(folder_path, "empty attribute name"));
    }
    let specs = variants.into_vec();
    if specs.is_empty() {
        return Err(CatalogError::defect(&location, "attribute declares no variants"));
    }

    let variants = specs
        .into_iter()
        .map(|spec| compile_variant(&location, name, spec))
        .collect::<Result<Vec<_>, _>>()?;

    for (i, a) in variants.iter().enumerate() {
        for (j, b) in variants.iter().enumerate().skip(i + 1) {
            if a.wlst_mode.intersects(b.wlst_mode) && a.version.overlaps(&b.version) {
                return Err(CatalogError::defect(
                    &location,
                    format!(
                        "variants {i} ({} {}) and {j} ({} {}) overlap",
                        a.version, a.wlst_mode, b.version, b.wlst_mode
                    ),
                ));
            }
        }
    }

    Ok(AttributeDefinition {
        name: name.to_string(),
        variants,
    })
}

fn compile_variant(
    location: &str,
    model_name: &str,
    spec: AttributeVariantSpec,
) -> Result<AttributeVariant, CatalogError> {
    let version = parse_range(location, spec.version.as_deref())?;
    let wlst_mode = parse_mask(location, spec.wlst_mode.as_deref())?;

    let wlst_name = ModeSplit::parse(spec.wlst_name.as_deref().unwrap_or(model_name));
    require_per_mode(location, "wlst_name", &wlst_name, wlst_mode)?;

    let wlst_type = ModeSplit::parse(spec.wlst_type.as_deref().unwrap_or("string")).try_map(|raw| {
        if raw.is_empty() {
            Ok(AttributeType::String)
        } else {
            raw.parse::<AttributeType>()
                .map_err(|_| CatalogError::defect(location, format!("unknown attribute type '{raw}'")))
        }
    })?;

    let access = ModeSplit::parse(spec.access.as_deref().unwrap_or("RW")).try_map(|raw| {
        raw.parse::<Access>()
            .map_err(|_| CatalogError::defect(location, format!("unknown access code '{raw}'")))
    })?;

    let default = match spec.default {
        Some(Value::String(raw)) => {
            let split = ModeSplit::parse(&raw);
            if split.is_split() {
                split.try_map(|s| Ok::<_, CatalogError>(Value::String(s)))?
            } else {
                ModeSplit::uniform(Value::String(raw))
            }
        }
        Some(value) => ModeSplit::uniform(value),
        None => ModeSplit::uniform(Value::Null),
    };

    if spec.password_form.is_some() && !wlst_type.iter().any(|t| t.is_password()) {
        return Err(CatalogError::defect(location, "password_form on a non-password attribute"));
    }

    Ok(AttributeVariant {
        version,
        wlst_mode,
        wlst_name,
        wlst_type,
        access,
        default,
        preferred_model_type: spec.preferred_model_type,
        restart_required: spec.restart_required,
        uses_path_tokens: spec.uses_path_tokens,
        password_form: spec.password_form,
    })
}

/// Two model attributes may share a native name only where their variants
/// never apply to the same mode at overlapping versions
fn check_native_ambiguity(
    folder_path: &str,
    attributes: &IndexMap<String, AttributeDefinition>,
    native_index: &HashMap<String, Vec<String>>,
) -> Result<(), CatalogError> {
    for (native, model_names) in native_index.iter().filter(|(_, names)| names.len() > 1) {
        for (i, first) in model_names.iter().enumerate() {
            for second in &model_names[i + 1..] {
                let (Some(a), Some(b)) = (attributes.get(first), attributes.get(second)) else {
                    continue;
                };
                for left in &a.variants {
                    for right in &b.variants {
                        let shared_mode = WlstMode::ALL.into_iter().find(|&mode| {
                            left.wlst_mode.includes(mode)
                                && right.wlst_mode.includes(mode)
                                && left.native_name(mode) == native
                                && right.native_name(mode) == native
                        });
                        if let Some(mode) = shared_mode.filter(|_| left.version.overlaps(&right.version)) {
                            return Err(CatalogError::defect(
                                format!("{folder_path}@{native}"),
                                format!(
                                    "'{first}' ({}) and '{second}' ({}) share native name '{native}' in {mode} mode",
                                    left.version, right.version
                                ),
                            ));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn parse_range(location: &str, raw: Option<&str>) -> Result<VersionRange, CatalogError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(VersionRange::unbounded()),
        Some(text) => text
            .parse()
            .map_err(|e| CatalogError::defect(location, format!("bad version range: {e}"))),
    }
}

fn parse_mask(location: &str, raw: Option<&str>) -> Result<ModeMask, CatalogError> {
    raw.map_or(Ok(ModeMask::Both), |text| {
        text.parse()
            .map_err(|e| CatalogError::defect(location, format!("bad wlst_mode: {e}")))
    })
}

fn require_per_mode(
    location: &str,
    what: &str,
    value: &ModeSplit<String>,
    mask: ModeMask,
) -> Result<(), CatalogError> {
    for mode in WlstMode::ALL {
        if mask.includes(mode) && value.get(mode).is_empty() {
            return Err(CatalogError::defect(location, format!("empty {mode} {what}")));
        }
    }
    Ok(())
}

fn check_token_scope(
    location: &str,
    what: &str,
    template: &str,
    scope: &[String],
) -> Result<(), CatalogError> {
    match tokens::referenced_tokens(template)
        .into_iter()
        .find(|token| !scope.iter().any(|s| s == token))
    {
        Some(token) => Err(CatalogError::defect(
            location,
            format!("{what} references undefined token %{token}%"),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FolderCategory;
    use pretty_assertions::assert_eq;

    const SMALL: &str = r#"{
        "schema_version": "alias_catalog_v1",
        "root": {
            "folders": {
                "Server": {
                    "wlst_type": "${Server:Servers}",
                    "instance": "multiple",
                    "name_token": "SERVER",
                    "category": "server",
                    "section": "topology",
                    "attributes": {
                        "ListenPort": {"wlst_type": "integer", "default": 7001},
                        "Notes": [
                            {"version": "[10,12.2.1)", "wlst_name": "Notes"},
                            {"version": "[12.2.1,)", "wlst_name": "${Notes:Description}"}
                        ]
                    },
                    "folders": {
                        "SSL": {"wlst_type": "SSL", "default_name": "%SERVER%"},
                        "Legacy": {"wlst_type": "Legacy", "version": "[,12.1.2)"}
                    }
                }
            }
        }
    }"#;

    fn v(text: &str) -> Version {
        text.parse().unwrap()
    }

    #[test]
    fn loads_and_indexes_folders() {
        let catalog = AliasCatalog::from_json_str(SMALL).unwrap();
        assert_eq!(catalog.folder_count(), 4);
        assert_eq!(catalog.top_level_folder_names(), &["Server".to_string()]);

        let server = catalog.get_folder("Server/").unwrap();
        assert_eq!(server.path(), "/Server");
        assert!(server.is_multiple());
        assert_eq!(server.name_token(), Some("SERVER"));
        assert_eq!(server.category(), FolderCategory::Server);
        assert_eq!(server.wlst_type(WlstMode::Online), "Servers");
        assert_eq!(server.children(), &["SSL".to_string(), "Legacy".to_string()]);
    }

    #[test]
    fn unknown_folder_is_error() {
        let catalog = AliasCatalog::from_json_str(SMALL).unwrap();
        let err = catalog.get_folder("/Sever").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownFolderType(p) if p == "/Sever"));
    }

    #[test]
    fn get_attribute_by_model_and_native_name() {
        let catalog = AliasCatalog::from_json_str(SMALL).unwrap();
        let hit = catalog
            .get_attribute("/Server", "Notes", &v("14.1.1"), WlstMode::Online)
            .unwrap();
        assert_eq!(hit.native_name(), "Description");

        let by_native = catalog
            .get_attribute("/Server", "Description", &v("14.1.1"), WlstMode::Online)
            .unwrap();
        assert_eq!(by_native.model_name(), "Notes");

        assert!(catalog
            .get_attribute_by_native("/Server", "Notes", &v("14.1.1"), WlstMode::Online)
            .is_none());
        assert!(catalog
            .get_attribute_by_native("/Server", "Notes", &v("14.1.1"), WlstMode::Offline)
            .is_some());

        assert!(catalog
            .get_attribute("/Server", "Description", &v("12.1.3"), WlstMode::Online)
            .is_none());
        assert!(catalog
            .get_attribute("/Server", "Description", &v("14.1.1"), WlstMode::Offline)
            .is_none());
    }

    #[test]
    fn folder_view_filters_and_caches() {
        let catalog = AliasCatalog::from_json_str(SMALL).unwrap();
        let view = catalog.folder_view("/Server", &v("12.2.1.3"), WlstMode::Online).unwrap();
        assert_eq!(view.subfolders, vec!["SSL".to_string()]);
        assert_eq!(view.attributes.get("ListenPort").map(String::as_str), Some("integer"));

        let old = catalog.folder_view("/Server", &v("12.1.1"), WlstMode::Online).unwrap();
        assert!(old.has_subfolder("Legacy"));

        let again = catalog.folder_view("/Server", &v("12.2.1.3.0"), WlstMode::Online).unwrap();
        assert!(Arc::ptr_eq(&view, &again));
        assert_eq!(catalog.cached_view_count(), 2);
    }

    #[test]
    fn rejects_wrong_schema() {
        let err = AliasCatalog::from_json_str(r#"{"schema_version": "v0", "root": {}}"#).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedSchema { .. }));
    }

    #[test]
    fn rejects_ambiguous_native_name() {
        let doc = r#"{
            "schema_version": "alias_catalog_v1",
            "root": {"folders": {"A": {"wlst_type": "A", "attributes": {
                "First": {"wlst_name": "Shared"},
                "Second": {"wlst_name": "Shared"}
            }}}}
        }"#;
        let err = AliasCatalog::from_json_str(doc).unwrap_err();
        assert!(err.is_defect());
        let message = err.to_string();
        assert!(message.contains("/A@Shared"), "{message}");
        assert!(message.contains("First") && message.contains("Second"), "{message}");
    }

    #[test]
    fn shared_native_name_needs_overlap_in_one_mode() {
        let doc = r#"{
            "schema_version": "alias_catalog_v1",
            "root": {"folders": {"A": {"wlst_type": "A", "attributes": {
                "Old": {"version": "[,12.2.1)", "wlst_name": "Shared"},
                "New": {"version": "[12.2.1,)", "wlst_name": "Shared"},
                "Offline": {"wlst_mode": "offline", "wlst_name": "Split"},
                "Online": {"wlst_mode": "online", "wlst_name": "Split"},
                "Notes": {"wlst_name": "${Notes:Description}"},
                "Description": {"wlst_name": "${Description:Notes}"}
            }}}}
        }"#;
        let catalog = AliasCatalog::from_json_str(doc).unwrap();
        let old = catalog
            .get_attribute_by_native("/A", "Shared", &v("12.1.3"), WlstMode::Offline)
            .unwrap();
        assert_eq!(old.model_name(), "Old");
        let new = catalog
            .get_attribute_by_native("/A", "Shared", &v("14.1.1"), WlstMode::Offline)
            .unwrap();
        assert_eq!(new.model_name(), "New");
        let online = catalog
            .get_attribute_by_native("/A", "Split", &v("14.1.1"), WlstMode::Online)
            .unwrap();
        assert_eq!(online.model_name(), "Online");
        let swapped = catalog
            .get_attribute_by_native("/A", "Notes", &v("14.1.1"), WlstMode::Online)
            .unwrap();
        assert_eq!(swapped.model_name(), "Description");
    }

    #[test]
    fn rejects_overlapping_variants() {
        let doc = r#"{
            "schema_version": "alias_catalog_v1",
            "root": {"folders": {"A": {"wlst_type": "A", "attributes": {
                "X": [{"version": "[10,12.2.1]"}, {"version": "[12.2.1,)"}]
            }}}}
        }"#;
        let err = AliasCatalog::from_json_str(doc).unwrap_err();
        assert!(err.is_defect());
        assert!(err.to_string().contains("/A@X"));
    }

    #[test]
    fn same_range_in_disjoint_modes_is_allowed() {
        let doc = r#"{
            "schema_version": "alias_catalog_v1",
            "root": {"folders": {"A": {"wlst_type": "A", "attributes": {
                "X": [{"wlst_mode": "offline"}, {"wlst_mode": "online", "wlst_name": "Y"}]
            }}}}
        }"#;
        assert!(AliasCatalog::from_json_str(doc).is_ok());
    }

    #[test]
    fn rejects_multiple_folder_without_token() {
        let doc = r#"{
            "schema_version": "alias_catalog_v1",
            "root": {"folders": {"A": {"wlst_type": "A", "instance": "multiple"}}}
        }"#;
        assert!(AliasCatalog::from_json_str(doc).unwrap_err().is_defect());
    }

    #[test]
    fn rejects_undefined_token_reference() {
        let doc = r#"{
            "schema_version": "alias_catalog_v1",
            "root": {"folders": {"A": {"wlst_type": "A", "default_name": "%NOPE%"}}}
        }"#;
        let err = AliasCatalog::from_json_str(doc).unwrap_err();
        assert!(err.to_string().contains("%NOPE%"));
    }

    #[test]
    fn rejects_bad_type_and_access() {
        let bad_type = r#"{
            "schema_version": "alias_catalog_v1",
            "root": {"folders": {"A": {"wlst_type": "A", "attributes": {"X": {"wlst_type": "blob"}}}}}
        }"#;
        assert!(AliasCatalog::from_json_str(bad_type).unwrap_err().is_defect());

        let bad_access = r#"{
            "schema_version": "alias_catalog_v1",
            "root": {"folders": {"A": {"wlst_type": "A", "attributes": {"X": {"access": "${RW:WO}"}}}}}
        }"#;
        assert!(AliasCatalog::from_json_str(bad_access).unwrap_err().is_defect());
    }

    #[test]
    fn rejects_missing_wlst_type_and_bad_range() {
        let missing = r#"{"schema_version": "alias_catalog_v1", "root": {"folders": {"A": {}}}}"#;
        assert!(AliasCatalog::from_json_str(missing).unwrap_err().is_defect());

        let range = r#"{
            "schema_version": "alias_catalog_v1",
            "root": {"folders": {"A": {"wlst_type": "A", "version": "[12,"}}}
        }"#;
        assert!(AliasCatalog::from_json_str(range).unwrap_err().is_defect());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = AliasCatalog::from_json_str("{").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn encrypted_prefix_detection() {
        let catalog = AliasCatalog::from_json_str(SMALL).unwrap();
        assert!(catalog.is_encrypted("{AES}abc"));
        assert!(catalog.is_encrypted("{AES256}abc"));
        assert!(!catalog.is_encrypted("welcome1"));
        assert_eq!(catalog.plaintext_password_name("PasswordEncrypted"), Some("Password"));
    }

    #[test]
    fn normalize_paths() {
        assert_eq!(AliasCatalog::normalize_path(""), "/");
        assert_eq!(AliasCatalog::normalize_path("/"), "/");
        assert_eq!(AliasCatalog::normalize_path("A/B/"), "/A/B");
        assert_eq!(AliasCatalog::child_path("/", "A"), "/A");
        assert_eq!(AliasCatalog::child_path("/A", "B"), "/A/B");
    }
}
