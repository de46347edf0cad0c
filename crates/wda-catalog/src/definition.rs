//! Compiled folder and attribute definitions
//!
//! Built once from the metadata document by [`crate::AliasCatalog`] and
//! never mutated afterwards.

use crate::types::{
    Access, AttributeType, FolderCategory, InstanceKind, ModeSplit, ModelSection, PasswordForm,
    PreferredModelType,
};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use wda_version::{ModeMask, Version, VersionRange, WlstMode};

/// Intermediate native level a flattened folder hides from the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedFolderSpec {
    /// Native type of the intermediate folder
    pub wlst_type: ModeSplit<String>,
    /// Default intermediate name per mode, may reference `%TOKEN%`s
    pub default_name: ModeSplit<String>,
    /// Token whose binding overrides the default name
    pub path_token: String,
}

/// A model folder type
#[derive(Debug, Clone)]
pub struct FolderDefinition {
    pub(crate) path: String,
    pub(crate) name: String,
    pub(crate) wlst_type: ModeSplit<String>,
    pub(crate) instance: InstanceKind,
    pub(crate) name_token: Option<String>,
    pub(crate) default_name: Option<String>,
    pub(crate) version: VersionRange,
    pub(crate) wlst_mode: ModeMask,
    pub(crate) category: FolderCategory,
    pub(crate) section: Option<ModelSection>,
    pub(crate) flattened: Option<FlattenedFolderSpec>,
    pub(crate) children: Vec<String>,
    pub(crate) attributes: IndexMap<String, AttributeDefinition>,
    /// native name -> model names carrying it in some variant
    pub(crate) native_index: HashMap<String, Vec<String>>,
}

impl FolderDefinition {
    /// Normalized model folder path, `/` for the root
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Model folder name, empty for the root
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the root folder
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }

    /// Native MBean type in `mode`
    #[inline]
    #[must_use]
    pub fn wlst_type(&self, mode: WlstMode) -> &str {
        self.wlst_type.get(mode)
    }

    /// Single or multiple instances
    #[inline]
    #[must_use]
    pub fn instance(&self) -> InstanceKind {
        self.instance
    }

    /// Whether the folder holds many named instances
    #[inline]
    #[must_use]
    pub fn is_multiple(&self) -> bool {
        self.instance == InstanceKind::Multiple
    }

    /// Token holding the instance name
    #[inline]
    #[must_use]
    pub fn name_token(&self) -> Option<&str> {
        self.name_token.as_deref()
    }

    /// Instance name template used when none is bound
    #[inline]
    #[must_use]
    pub fn default_name(&self) -> Option<&str> {
        self.default_name.as_deref()
    }

    /// Versions the folder exists at
    #[inline]
    #[must_use]
    pub fn version_range(&self) -> &VersionRange {
        &self.version
    }

    /// Modes the folder exists in
    #[inline]
    #[must_use]
    pub fn wlst_mode(&self) -> ModeMask {
        self.wlst_mode
    }

    /// Behavioural category
    #[inline]
    #[must_use]
    pub fn category(&self) -> FolderCategory {
        self.category
    }

    /// Model file section of a top-level folder
    #[inline]
    #[must_use]
    pub fn section(&self) -> Option<ModelSection> {
        self.section
    }

    /// Flattened intermediate level, if any
    #[inline]
    #[must_use]
    pub fn flattened(&self) -> Option<&FlattenedFolderSpec> {
        self.flattened.as_ref()
    }

    /// Child folder names in declaration order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// Whether `name` is a declared child at any version
    #[must_use]
    pub fn has_child(&self, name: &str) -> bool {
        self.children.iter().any(|c| c == name)
    }

    /// Attribute definitions in declaration order
    #[inline]
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.attributes.values()
    }

    /// Attribute by model name, at any version
    #[inline]
    #[must_use]
    pub fn attribute(&self, model_name: &str) -> Option<&AttributeDefinition> {
        self.attributes.get(model_name)
    }

    /// Model names whose variants use `native_name`
    #[must_use]
    pub fn model_names_for_native(&self, native_name: &str) -> &[String] {
        self.native_index
            .get(native_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the folder exists at `version` in `mode`
    #[inline]
    #[must_use]
    pub fn is_active(&self, version: &Version, mode: WlstMode) -> bool {
        self.wlst_mode.includes(mode) && self.version.contains(version)
    }
}

/// A model attribute and its version/mode variants
#[derive(Debug, Clone)]
pub struct AttributeDefinition {
    pub(crate) name: String,
    pub(crate) variants: Vec<AttributeVariant>,
}

/// How an attribute relates to a version/mode pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantMatch<'a> {
    /// A variant applies
    Active(&'a AttributeVariant),
    /// Declared in this mode, but not at this version
    WrongVersion,
    /// Not declared in this mode at all
    WrongMode,
}

impl AttributeDefinition {
    /// Model name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All variants
    #[inline]
    #[must_use]
    pub fn variants(&self) -> &[AttributeVariant] {
        &self.variants
    }

    /// Variant active at `version` in `mode`
    ///
    /// Variant ranges never overlap within a mode, so at most one matches.
    #[must_use]
    pub fn variant_for(&self, version: &Version, mode: WlstMode) -> Option<&AttributeVariant> {
        self.variants.iter().find(|v| v.is_active(version, mode))
    }

    /// Classify the attribute against a version/mode pair
    #[must_use]
    pub fn match_variant(&self, version: &Version, mode: WlstMode) -> VariantMatch<'_> {
        if let Some(variant) = self.variant_for(version, mode) {
            return VariantMatch::Active(variant);
        }
        if self.variants.iter().any(|v| v.wlst_mode.includes(mode)) {
            VariantMatch::WrongVersion
        } else {
            VariantMatch::WrongMode
        }
    }
}

/// One version/mode slice of an attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeVariant {
    /// Versions this variant applies to
    pub version: VersionRange,
    /// Modes this variant applies to
    pub wlst_mode: ModeMask,
    /// Native attribute name
    pub wlst_name: ModeSplit<String>,
    /// Native type
    pub wlst_type: ModeSplit<AttributeType>,
    /// Write access
    pub access: ModeSplit<Access>,
    /// Default value, `Null` when none
    pub default: ModeSplit<Value>,
    /// Shape of list values read back into the model
    pub preferred_model_type: Option<PreferredModelType>,
    /// Setting it requires a restart
    pub restart_required: bool,
    /// Values may contain path tokens
    pub uses_path_tokens: bool,
    /// Online value form for single-name passwords
    pub password_form: Option<PasswordForm>,
}

impl AttributeVariant {
    /// Whether the variant applies at `version` in `mode`
    #[inline]
    #[must_use]
    pub fn is_active(&self, version: &Version, mode: WlstMode) -> bool {
        self.wlst_mode.includes(mode) && self.version.contains(version)
    }

    /// Native name in `mode`
    #[inline]
    #[must_use]
    pub fn native_name(&self, mode: WlstMode) -> &str {
        self.wlst_name.get(mode)
    }

    /// Native type in `mode`
    #[inline]
    #[must_use]
    pub fn native_type(&self, mode: WlstMode) -> AttributeType {
        *self.wlst_type.get(mode)
    }

    /// Access in `mode`
    #[inline]
    #[must_use]
    pub fn access(&self, mode: WlstMode) -> Access {
        *self.access.get(mode)
    }

    /// Default value in `mode`
    #[must_use]
    pub fn default_value(&self, mode: WlstMode) -> Option<&Value> {
        match self.default.get(mode) {
            Value::Null => None,
            value => Some(value),
        }
    }

    /// Whether values are secrets
    #[inline]
    #[must_use]
    pub fn is_password(&self, mode: WlstMode) -> bool {
        self.native_type(mode).is_password()
    }

    /// Whether values are lists
    #[inline]
    #[must_use]
    pub fn is_list(&self, mode: WlstMode) -> bool {
        self.native_type(mode).is_list()
    }

    /// Whether the attribute is read-only in `mode`
    #[inline]
    #[must_use]
    pub fn read_only(&self, mode: WlstMode) -> bool {
        self.access(mode) == Access::ReadOnly
    }

    /// Whether the attribute is ignored in `mode`
    #[inline]
    #[must_use]
    pub fn ignored(&self, mode: WlstMode) -> bool {
        self.access(mode) == Access::Ignored
    }
}

/// An attribute variant selected for one version/mode
#[derive(Debug, Clone, Copy)]
pub struct ResolvedVariant<'a> {
    definition: &'a AttributeDefinition,
    variant: &'a AttributeVariant,
    mode: WlstMode,
}

impl<'a> ResolvedVariant<'a> {
    /// Create a resolved variant
    #[inline]
    #[must_use]
    pub fn new(definition: &'a AttributeDefinition, variant: &'a AttributeVariant, mode: WlstMode) -> Self {
        Self {
            definition,
            variant,
            mode,
        }
    }

    /// Owning attribute definition
    #[inline]
    #[must_use]
    pub fn definition(&self) -> &'a AttributeDefinition {
        self.definition
    }

    /// Selected variant
    #[inline]
    #[must_use]
    pub fn variant(&self) -> &'a AttributeVariant {
        self.variant
    }

    /// Mode the variant was selected for
    #[inline]
    #[must_use]
    pub fn mode(&self) -> WlstMode {
        self.mode
    }

    /// Model name
    #[inline]
    #[must_use]
    pub fn model_name(&self) -> &'a str {
        &self.definition.name
    }

    /// Native name
    #[inline]
    #[must_use]
    pub fn native_name(&self) -> &'a str {
        self.variant.native_name(self.mode)
    }

    /// Native type
    #[inline]
    #[must_use]
    pub fn native_type(&self) -> AttributeType {
        self.variant.native_type(self.mode)
    }

    /// Access
    #[inline]
    #[must_use]
    pub fn access(&self) -> Access {
        self.variant.access(self.mode)
    }

    /// Default value
    #[inline]
    #[must_use]
    pub fn default_value(&self) -> Option<&'a Value> {
        self.variant.default_value(self.mode)
    }

    /// Whether values are secrets
    #[inline]
    #[must_use]
    pub fn is_password(&self) -> bool {
        self.native_type().is_password()
    }

    /// Whether values are lists
    #[inline]
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.native_type().is_list()
    }

    /// Whether the attribute is read-only
    #[inline]
    #[must_use]
    pub fn read_only(&self) -> bool {
        self.access() == Access::ReadOnly
    }
}
