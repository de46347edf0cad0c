//! Alias sessions
//!
//! [`Aliases`] binds a shared catalog to one target version and WLST mode and
//! answers every alias query for that pair. Sessions are cheap to create and
//! hold no mutable state of their own; any number of them may share one
//! catalog across threads.

use crate::classifier::ValidationClassifier;
use crate::config::SessionConfig;
use crate::convert;
use crate::error::{AliasError, Result};
use crate::resolver::{FolderResolver, ResolvedFolder};
use crate::translator::AttributeTranslator;
use crate::verdict::{Resolution, Translation, ValidationVerdict};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use wda_catalog::{
    Access, AliasCatalog, CatalogError, FlattenedFolderSpec, FolderCategory, FolderView, LocationContext,
    ModelSection, ResolvedVariant, TargetPlatform,
};
use wda_version::{Version, WlstMode};

/// Native shape of a flattened folder's hidden level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenedFolderInfo {
    /// Native type of the hidden level
    pub wlst_type: String,
    /// Instance name of the hidden level
    pub name: String,
    /// Token the hidden level's name is bound to
    pub path_token: String,
}

/// Alias queries for one version and mode
#[derive(Debug, Clone)]
pub struct Aliases {
    catalog: Arc<AliasCatalog>,
    version: Version,
    mode: WlstMode,
    platform: TargetPlatform,
}

impl Aliases {
    /// Bind a session to `config`
    #[must_use]
    pub fn new(catalog: Arc<AliasCatalog>, config: &SessionConfig) -> Self {
        tracing::debug!(
            "Opening alias session for {} in {} mode on {}",
            config.target_version,
            config.mode,
            config.target_platform
        );
        Self {
            catalog,
            version: config.target_version.clone(),
            mode: config.mode,
            platform: config.target_platform,
        }
    }

    /// Shared catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Arc<AliasCatalog> {
        &self.catalog
    }

    /// Target version
    #[inline]
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// WLST mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> WlstMode {
        self.mode
    }

    /// Platform of the target server
    #[inline]
    #[must_use]
    pub fn target_platform(&self) -> TargetPlatform {
        self.platform
    }

    /// Folder resolver for this session
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> FolderResolver<'_> {
        FolderResolver::new(&self.catalog, &self.version, self.mode)
    }

    /// Attribute translator for this session
    #[inline]
    #[must_use]
    pub fn translator(&self) -> AttributeTranslator<'_> {
        AttributeTranslator::new(&self.catalog, &self.version, self.mode).with_platform(self.platform)
    }

    /// Validation classifier for this session
    #[inline]
    #[must_use]
    pub fn classifier(&self) -> ValidationClassifier<'_> {
        ValidationClassifier::new(&self.catalog, &self.version, self.mode)
    }

    /// Location at a model folder path, bound to this session's catalog
    ///
    /// # Errors
    /// Returns [`AliasError::Location`] for an empty path segment
    pub fn location(&self, model_path: &str) -> Result<LocationContext> {
        Ok(LocationContext::from_model_path(Arc::clone(&self.catalog), model_path)?)
    }

    // ------------------------------------------------------------------
    // Folders
    // ------------------------------------------------------------------

    /// Native type of the folder at `location`; `None` at the root or when
    /// the folder is absent at this version/mode
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn get_wlst_mbean_type(&self, location: &LocationContext) -> Result<Option<String>> {
        Ok(self.resolve_present(location)?.and_then(|resolved| {
            let definition = resolved.definition();
            (!definition.is_root()).then(|| definition.wlst_type(self.mode).to_string())
        }))
    }

    /// Child folders present at this version/mode, in declaration order
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn get_model_subfolder_names(&self, location: &LocationContext) -> Result<Vec<String>> {
        Ok(self
            .view(location)?
            .map(|view| view.subfolders.clone())
            .unwrap_or_default())
    }

    /// Top-level model folders present at this version/mode
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] if the catalog has no root
    pub fn get_model_top_level_folder_names(&self) -> Result<Vec<String>> {
        let view = self.catalog.folder_view("/", &self.version, self.mode)?;
        Ok(view.subfolders.clone())
    }

    /// Name token of the folder at `location`
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn get_name_token(&self, location: &LocationContext) -> Result<Option<String>> {
        let folder = self.catalog.get_folder(&location.get_folder_path())?;
        Ok(folder.name_token().map(str::to_string))
    }

    /// Whether the folder at `location` holds named instances
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn supports_multiple_mbean_instances(&self, location: &LocationContext) -> Result<bool> {
        Ok(self.catalog.get_folder(&location.get_folder_path())?.is_multiple())
    }

    /// Behavioural category of the folder at `location`
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn get_folder_category(&self, location: &LocationContext) -> Result<FolderCategory> {
        Ok(self.catalog.get_folder(&location.get_folder_path())?.category())
    }

    /// Model section the location lives in
    ///
    /// The root and top-level folders without a declared section belong to
    /// `topology`.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared top-level folder
    pub fn get_model_section(&self, location: &LocationContext) -> Result<ModelSection> {
        let Some(top) = location.folders().first() else {
            return Ok(ModelSection::Topology);
        };
        let path = AliasCatalog::child_path("/", top);
        let folder = self.catalog.get_folder(&path)?;
        Ok(folder.section().unwrap_or(ModelSection::Topology))
    }

    /// Model path including the section, e.g.
    /// `resources:/JDBCSystemResource/ds1/JdbcResource`
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared top-level folder
    pub fn get_model_folder_path(&self, location: &LocationContext) -> Result<String> {
        let section = self.get_model_section(location)?;
        Ok(format!("{section}:{location}"))
    }

    /// Flattened-level spec of the folder at `location`; `None` when the
    /// folder is not flattened or is absent at this version/mode
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn is_flattened(&self, location: &LocationContext) -> Result<Option<&FlattenedFolderSpec>> {
        Ok(self
            .resolve_present(location)?
            .and_then(|resolved| resolved.definition().flattened()))
    }

    /// Hidden level of a flattened folder, resolved for this session
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn get_wlst_flattened_folder_info(&self, location: &LocationContext) -> Result<Option<FlattenedFolderInfo>> {
        let Some(resolved) = self.resolve_present(location)? else {
            return Ok(None);
        };
        let Some(flat) = resolved.definition().flattened() else {
            return Ok(None);
        };
        Ok(resolved.flattened_name().map(|name| FlattenedFolderInfo {
            wlst_type: flat.wlst_type.get(self.mode).clone(),
            name: name.to_string(),
            path_token: flat.path_token.clone(),
        }))
    }

    /// Native path of the folder instance's attributes
    ///
    /// # Errors
    /// - [`CatalogError::UnknownFolderType`] for an undeclared folder
    /// - [`AliasError::MissingInstanceName`] if a level has no name
    pub fn get_wlst_attributes_path(&self, location: &LocationContext) -> Result<Option<String>> {
        self.native_path(location, ResolvedFolder::attributes_path)
    }

    /// Native path listing the folder's instances
    ///
    /// # Errors
    /// - [`CatalogError::UnknownFolderType`] for an undeclared folder
    /// - [`AliasError::MissingInstanceName`] if a parent level has no name
    pub fn get_wlst_list_path(&self, location: &LocationContext) -> Result<Option<String>> {
        self.native_path(location, ResolvedFolder::list_path)
    }

    /// Native path in which the folder instance is created
    ///
    /// # Errors
    /// - [`CatalogError::UnknownFolderType`] for an undeclared folder
    /// - [`AliasError::MissingInstanceName`] if a parent level has no name
    pub fn get_wlst_create_path(&self, location: &LocationContext) -> Result<Option<String>> {
        self.native_path(location, ResolvedFolder::create_path)
    }

    /// Native path holding the folder instance's child types
    ///
    /// # Errors
    /// - [`CatalogError::UnknownFolderType`] for an undeclared folder
    /// - [`AliasError::MissingInstanceName`] if a level has no name
    pub fn get_wlst_subfolders_path(&self, location: &LocationContext) -> Result<Option<String>> {
        self.native_path(location, ResolvedFolder::subfolders_path)
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Usable attributes and their native type names
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn get_model_attribute_names_and_types(&self, location: &LocationContext) -> Result<IndexMap<String, String>> {
        Ok(self
            .view(location)?
            .map(|view| view.attributes.clone())
            .unwrap_or_default())
    }

    /// Usable attribute names
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn get_model_attribute_names(&self, location: &LocationContext) -> Result<Vec<String>> {
        Ok(self
            .view(location)?
            .map(|view| view.attributes.keys().cloned().collect())
            .unwrap_or_default())
    }

    /// Password attributes
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn get_model_password_type_attribute_names(&self, location: &LocationContext) -> Result<Vec<String>> {
        self.attribute_names_where(location, ResolvedVariant::is_password)
    }

    /// Attributes whose change requires a restart
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn get_model_restart_required_attribute_names(&self, location: &LocationContext) -> Result<Vec<String>> {
        self.attribute_names_where(location, |attribute| attribute.variant().restart_required)
    }

    /// Attributes whose values may contain path tokens
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn get_model_uses_path_tokens_attribute_names(&self, location: &LocationContext) -> Result<Vec<String>> {
        self.attribute_names_where(location, |attribute| attribute.variant().uses_path_tokens)
    }

    /// Read-only attributes
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn get_model_read_only_attribute_names(&self, location: &LocationContext) -> Result<Vec<String>> {
        self.attribute_names_where(location, ResolvedVariant::read_only)
    }

    /// Native names that must never be read back
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownFolderType`] for an undeclared folder
    pub fn get_wlst_skip_names(&self, location: &LocationContext) -> Result<Vec<String>> {
        Ok(self
            .view(location)?
            .map(|view| view.skip_names.clone())
            .unwrap_or_default())
    }

    /// Native name of a model attribute; `None` when it cannot be set in
    /// this session
    ///
    /// # Errors
    /// See [`AttributeTranslator::to_native`]
    pub fn get_wlst_attribute_name(&self, location: &LocationContext, model_name: &str) -> Result<Option<String>> {
        let translation = self.translator().to_native(location, model_name, &Value::Null)?;
        Ok(translation.into_attribute().map(|attribute| attribute.native_name))
    }

    /// Native name and value of a model attribute
    ///
    /// Both are `None` when the attribute is skipped in this session.
    ///
    /// # Errors
    /// See [`AttributeTranslator::to_native`]
    pub fn get_wlst_attribute_name_and_value(
        &self,
        location: &LocationContext,
        model_name: &str,
        value: &Value,
    ) -> Result<(Option<String>, Option<Value>)> {
        Ok(match self.translator().to_native(location, model_name, value)? {
            Translation::Set(attribute) => (
                Some(attribute.native_name),
                Some(attribute.native_value).filter(|v| !v.is_null()),
            ),
            Translation::Skip(reason) => {
                tracing::debug!("Skipping {} in {}: {}", model_name, location, reason);
                (None, None)
            }
        })
    }

    /// Model name and value of a native attribute read back
    ///
    /// # Errors
    /// See [`AttributeTranslator::to_model`]
    pub fn get_model_attribute_name_and_value(
        &self,
        location: &LocationContext,
        native_name: &str,
        native_value: &Value,
    ) -> Result<(Option<String>, Option<Value>)> {
        Ok(match self.translator().to_model(location, native_name, native_value)? {
            Some((name, value)) => (Some(name), Some(value).filter(|v| !v.is_null())),
            None => (None, None),
        })
    }

    /// Default value of a model attribute at this version/mode
    ///
    /// # Errors
    /// - [`AliasError::MalformedInput`] for an empty name
    /// - [`AliasError::AttributeNotFound`] if the folder never declares it
    pub fn get_model_attribute_default_value(
        &self,
        location: &LocationContext,
        model_name: &str,
    ) -> Result<Option<Value>> {
        Ok(self
            .active_attribute(location, model_name)?
            .and_then(|attribute| attribute.default_value().cloned()))
    }

    /// Whether `value` equals the attribute's default once both are in
    /// native form; a `null` value matches an attribute without a default
    ///
    /// # Errors
    /// - [`AliasError::MalformedInput`] for an empty name
    /// - [`AliasError::AttributeNotFound`] if the folder never declares it
    pub fn is_model_default_value(&self, location: &LocationContext, model_name: &str, value: &Value) -> Result<bool> {
        let Some(attribute) = self.active_attribute(location, model_name)? else {
            return Ok(false);
        };
        let Some(default) = attribute.default_value() else {
            return Ok(value.is_null());
        };
        if value == default {
            return Ok(true);
        }
        let native_type = attribute.native_type();
        let converted = (
            convert::to_native(native_type, value, self.platform),
            convert::to_native(native_type, default, self.platform),
        );
        Ok(match converted {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        })
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Verdict for the folder at `location`
    #[must_use]
    pub fn is_version_valid_location(&self, location: &LocationContext) -> (ValidationVerdict, String) {
        self.classifier().classify_folder(location)
    }

    /// Verdict for a model attribute name at `location`
    ///
    /// # Errors
    /// Returns [`AliasError::MalformedInput`] for an empty name
    pub fn is_valid_model_attribute_name(
        &self,
        location: &LocationContext,
        model_name: &str,
    ) -> Result<(ValidationVerdict, String)> {
        self.classifier().classify_attribute(location, model_name)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Resolve `location`, erroring only when it is not declared at all
    fn resolve_present(&self, location: &LocationContext) -> Result<Option<ResolvedFolder<'_>>> {
        match self.resolver().resolve(location) {
            Resolution::Found(resolved) => Ok(Some(resolved)),
            Resolution::Unresolved {
                verdict: ValidationVerdict::Invalid,
                message,
            } => {
                tracing::debug!("Unknown folder {}: {}", location, message);
                Err(CatalogError::UnknownFolderType(location.get_folder_path()).into())
            }
            Resolution::Unresolved { .. } => Ok(None),
        }
    }

    fn view(&self, location: &LocationContext) -> Result<Option<Arc<FolderView>>> {
        let Some(resolved) = self.resolve_present(location)? else {
            return Ok(None);
        };
        let view = self
            .catalog
            .folder_view(resolved.definition().path(), &self.version, self.mode)?;
        Ok(Some(view))
    }

    fn native_path<'s>(
        &'s self,
        location: &LocationContext,
        build: impl Fn(&ResolvedFolder<'s>) -> Result<String>,
    ) -> Result<Option<String>> {
        self.resolve_present(location)?
            .map(|resolved| build(&resolved))
            .transpose()
    }

    fn attribute_names_where<'s>(
        &'s self,
        location: &LocationContext,
        predicate: impl Fn(&ResolvedVariant<'s>) -> bool,
    ) -> Result<Vec<String>> {
        let Some(resolved) = self.resolve_present(location)? else {
            return Ok(Vec::new());
        };
        Ok(resolved
            .definition()
            .attributes()
            .filter_map(|definition| {
                definition
                    .variant_for(&self.version, self.mode)
                    .map(|variant| ResolvedVariant::new(definition, variant, self.mode))
            })
            .filter(|attribute| attribute.access() != Access::Ignored && predicate(attribute))
            .map(|attribute| attribute.model_name().to_string())
            .collect())
    }

    fn active_attribute(&self, location: &LocationContext, model_name: &str) -> Result<Option<ResolvedVariant<'_>>> {
        if model_name.trim().is_empty() {
            return Err(AliasError::MalformedInput("empty attribute name".to_string()));
        }
        let Some(resolved) = self.resolve_present(location)? else {
            return Ok(None);
        };
        let Some(definition) = resolved.definition().attribute(model_name) else {
            return Err(AliasError::AttributeNotFound {
                location: location.to_string(),
                name: model_name.to_string(),
            });
        };
        Ok(definition
            .variant_for(&self.version, self.mode)
            .map(|variant| ResolvedVariant::new(definition, variant, self.mode)))
    }
}
