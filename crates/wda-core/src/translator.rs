//! Attribute translation between model and native forms
//!
//! Writes go model → native through [`AttributeTranslator::to_native`], which
//! picks the native name (dual passwords included) and converts the value to
//! the native type. Reads go the other way through
//! [`AttributeTranslator::to_model`]. Attributes that exist but cannot be
//! written in this session are skipped, never failed.

use crate::convert;
use crate::error::{AliasError, Result};
use crate::password::PasswordHandler;
use crate::resolver::FolderResolver;
use crate::verdict::{Resolution, ResolvedAttribute, SkipReason, Translation, ValidationVerdict};
use serde_json::Value;
use wda_catalog::{
    Access, AliasCatalog, CatalogError, LocationContext, ResolvedVariant, TargetPlatform, VariantMatch,
};
use wda_version::{Version, WlstMode};

/// Translates attribute names and values for one version/mode pair
#[derive(Debug, Clone, Copy)]
pub struct AttributeTranslator<'a> {
    catalog: &'a AliasCatalog,
    version: &'a Version,
    mode: WlstMode,
    platform: TargetPlatform,
}

impl<'a> AttributeTranslator<'a> {
    /// Create a translator for a Unix target server
    #[inline]
    #[must_use]
    pub fn new(catalog: &'a AliasCatalog, version: &'a Version, mode: WlstMode) -> Self {
        Self {
            catalog,
            version,
            mode,
            platform: TargetPlatform::Unix,
        }
    }

    /// With the target server's platform
    #[inline]
    #[must_use]
    pub fn with_platform(mut self, platform: TargetPlatform) -> Self {
        self.platform = platform;
        self
    }

    /// Translate a model attribute for writing
    ///
    /// # Errors
    /// - [`AliasError::MalformedInput`] for an empty attribute name
    /// - [`CatalogError::UnknownFolderType`] if the location is not declared
    /// - [`AliasError::AttributeNotFound`] if the folder never declares it
    /// - [`AliasError::InvalidValue`] if the value does not fit the native type
    /// - [`AliasError::PasswordModeMismatch`] for a contradicting password form
    pub fn to_native(&self, location: &LocationContext, model_name: &str, value: &Value) -> Result<Translation> {
        if model_name.is_empty() {
            return Err(AliasError::MalformedInput("empty attribute name".to_string()));
        }
        let folder_path = location.get_folder_path();
        if let Some(reason) = self.folder_skip(location)? {
            tracing::debug!("Skipping {} in {}: folder {}", model_name, location, reason);
            return Ok(Translation::Skip(reason));
        }

        let folder = self.catalog.get_folder(&folder_path)?;
        let Some(definition) = folder.attribute(model_name) else {
            return Err(AliasError::AttributeNotFound {
                location: location.to_string(),
                name: model_name.to_string(),
            });
        };
        let variant = match definition.match_variant(self.version, self.mode) {
            VariantMatch::Active(variant) => variant,
            VariantMatch::WrongVersion => return Ok(Translation::Skip(SkipReason::VersionUnsupported)),
            VariantMatch::WrongMode => return Ok(Translation::Skip(SkipReason::ModeUnsupported)),
        };
        let attribute = ResolvedVariant::new(definition, variant, self.mode);
        match attribute.access() {
            Access::Ignored => return Ok(Translation::Skip(SkipReason::Ignored)),
            Access::ReadOnly => return Ok(Translation::Skip(SkipReason::ReadOnly)),
            Access::ReadWrite => {}
        }

        let location_text = location.to_string();
        let native_name = if attribute.is_password() {
            PasswordHandler::new(self.catalog, self.mode).native_name_for_write(&attribute, value, &location_text)?
        } else {
            attribute.native_name()
        };
        let native_value = convert::to_native(attribute.native_type(), value, self.platform)
            .map_err(|reason| AliasError::invalid_value(&location_text, model_name, reason))?;

        Ok(Translation::Set(ResolvedAttribute {
            native_name: native_name.to_string(),
            native_value,
            verdict: ValidationVerdict::Valid,
        }))
    }

    /// Translate a native attribute read back into the model
    ///
    /// Returns `None` for names the model does not carry: unknown or ignored
    /// attributes, and the plaintext half of a dual password online.
    ///
    /// # Errors
    /// - [`AliasError::MalformedInput`] for an empty attribute name
    /// - [`CatalogError::UnknownFolderType`] if the location is not declared
    pub fn to_model(
        &self,
        location: &LocationContext,
        native_name: &str,
        value: &Value,
    ) -> Result<Option<(String, Value)>> {
        if native_name.is_empty() {
            return Err(AliasError::MalformedInput("empty attribute name".to_string()));
        }
        if self.folder_skip(location)?.is_some() {
            return Ok(None);
        }
        let folder_path = location.get_folder_path();
        if PasswordHandler::new(self.catalog, self.mode).is_write_only_name(&folder_path, native_name, self.version) {
            tracing::debug!("Not reading back write-only password {} in {}", native_name, location);
            return Ok(None);
        }

        let Some(attribute) = self
            .catalog
            .get_attribute_by_native(&folder_path, native_name, self.version, self.mode)
        else {
            return Ok(None);
        };
        if attribute.access() == Access::Ignored {
            return Ok(None);
        }

        let model_value = if attribute.is_password() {
            value.clone()
        } else {
            convert::to_model(
                attribute.native_type(),
                attribute.variant().preferred_model_type,
                value,
                native_name,
                self.platform,
            )
        };
        Ok(Some((attribute.model_name().to_string(), model_value)))
    }

    /// Skip reason for attributes of a folder missing from this session
    fn folder_skip(&self, location: &LocationContext) -> Result<Option<SkipReason>> {
        let resolution = FolderResolver::new(self.catalog, self.version, self.mode).resolve(location);
        match resolution {
            Resolution::Found(_) => Ok(None),
            Resolution::Unresolved {
                verdict: ValidationVerdict::VersionInvalid,
                ..
            } => {
                let mode_excluded = location
                    .current_folder()
                    .is_some_and(|folder| !folder.wlst_mode().includes(self.mode));
                Ok(Some(if mode_excluded {
                    SkipReason::ModeUnsupported
                } else {
                    SkipReason::VersionUnsupported
                }))
            }
            Resolution::Unresolved { .. } => {
                Err(CatalogError::UnknownFolderType(location.get_folder_path()).into())
            }
        }
    }
}
