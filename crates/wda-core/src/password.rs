//! Dual-password handling
//!
//! Offline, a password attribute whose native name carries the catalog's
//! secret suffix (`PasswordEncrypted`) is the only name, and its values are
//! always encrypted. Online the same attribute splits in two: the suffixed
//! name takes encrypted values and the stripped name (`Password`) takes
//! plaintext. The stripped name can never be read back.

use crate::error::{AliasError, Result};
use serde_json::Value;
use wda_catalog::{AliasCatalog, PasswordForm, ResolvedVariant};
use wda_version::{Version, WlstMode};

/// Mode-aware password name selection
#[derive(Debug, Clone, Copy)]
pub struct PasswordHandler<'a> {
    catalog: &'a AliasCatalog,
    mode: WlstMode,
}

impl<'a> PasswordHandler<'a> {
    /// Create a handler for `mode`
    #[inline]
    #[must_use]
    pub fn new(catalog: &'a AliasCatalog, mode: WlstMode) -> Self {
        Self { catalog, mode }
    }

    /// Whether `value` is already encrypted
    #[must_use]
    pub fn is_encrypted(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| self.catalog.is_encrypted(s))
    }

    /// Whether the attribute splits into two native names in this mode
    #[must_use]
    pub fn is_dual(&self, attribute: &ResolvedVariant<'_>) -> bool {
        self.mode == WlstMode::Online
            && attribute.is_password()
            && self.catalog.plaintext_password_name(attribute.native_name()).is_some()
    }

    /// Native name a write of `value` must use
    ///
    /// # Errors
    /// - [`AliasError::InvalidValue`] if `value` is not a string
    /// - [`AliasError::PasswordModeMismatch`] online, when a single-name
    ///   attribute declares a `password_form` that `value` contradicts
    pub fn native_name_for_write(
        &self,
        attribute: &ResolvedVariant<'a>,
        value: &Value,
        location: &str,
    ) -> Result<&'a str> {
        if !value.is_null() && !value.is_string() {
            return Err(AliasError::invalid_value(
                location,
                attribute.model_name(),
                "password values must be strings",
            ));
        }
        let native = attribute.native_name();
        if self.mode == WlstMode::Offline {
            return Ok(native);
        }

        let encrypted = self.is_encrypted(value);
        if let Some(plaintext_name) = self.catalog.plaintext_password_name(native) {
            return Ok(if encrypted || value.is_null() {
                native
            } else {
                plaintext_name
            });
        }

        let expected = attribute.variant().password_form.unwrap_or_default();
        let contradicts = match expected {
            PasswordForm::Either => false,
            PasswordForm::Encrypted => !encrypted,
            PasswordForm::Plaintext => encrypted,
        };
        if contradicts && !value.is_null() {
            return Err(AliasError::PasswordModeMismatch {
                location: location.to_string(),
                name: attribute.model_name().to_string(),
                expected,
            });
        }
        Ok(native)
    }

    /// Whether `native_name` is the plaintext half of a dual password in
    /// `folder_path`, which must never be read back
    #[must_use]
    pub fn is_write_only_name(&self, folder_path: &str, native_name: &str, version: &Version) -> bool {
        if self.mode == WlstMode::Offline {
            return false;
        }
        let suffixed = format!("{native_name}{}", self.catalog.secret_suffix());
        self.catalog
            .get_attribute_by_native(folder_path, &suffixed, version, self.mode)
            .is_some_and(|attribute| attribute.is_password())
    }
}
