//! Validation verdicts for folders and attributes
//!
//! "Not found" is a verdict here, never an error. The only error is a
//! structurally malformed query.

use crate::error::{AliasError, Result};
use crate::resolver::FolderResolver;
use crate::verdict::{Resolution, ValidationVerdict};
use wda_catalog::{AliasCatalog, LocationContext, VariantMatch};
use wda_version::{Version, WlstMode};

/// Classifies model paths for one version/mode pair
#[derive(Debug, Clone, Copy)]
pub struct ValidationClassifier<'a> {
    catalog: &'a AliasCatalog,
    version: &'a Version,
    mode: WlstMode,
}

impl<'a> ValidationClassifier<'a> {
    /// Create a classifier
    #[inline]
    #[must_use]
    pub fn new(catalog: &'a AliasCatalog, version: &'a Version, mode: WlstMode) -> Self {
        Self {
            catalog,
            version,
            mode,
        }
    }

    /// Classify the folder at `location`
    #[must_use]
    pub fn classify_folder(&self, location: &LocationContext) -> (ValidationVerdict, String) {
        match FolderResolver::new(self.catalog, self.version, self.mode).resolve(location) {
            Resolution::Found(resolved) => (
                ValidationVerdict::Valid,
                format!("{} is valid at {} in {} mode", resolved.location(), self.version, self.mode),
            ),
            Resolution::Unresolved { verdict, message } => (verdict, message),
        }
    }

    /// Classify `model_name` in the folder at `location`
    ///
    /// An attribute is only `Valid` if its folder is. `IGNORED` attributes are
    /// declared, so they classify as `Valid`.
    ///
    /// # Errors
    /// Returns [`AliasError::MalformedInput`] for an empty name
    pub fn classify_attribute(
        &self,
        location: &LocationContext,
        model_name: &str,
    ) -> Result<(ValidationVerdict, String)> {
        if model_name.trim().is_empty() {
            return Err(AliasError::MalformedInput("empty attribute name".to_string()));
        }
        let (verdict, message) = self.classify_folder(location);
        if !verdict.is_valid() {
            return Ok((verdict, message));
        }

        let Some(definition) = location.current_folder().and_then(|f| f.attribute(model_name)) else {
            return Ok((
                ValidationVerdict::Invalid,
                format!("{model_name} is not a valid attribute in {location}"),
            ));
        };
        Ok(match definition.match_variant(self.version, self.mode) {
            VariantMatch::Active(_) => (
                ValidationVerdict::Valid,
                format!("{model_name} is valid in {location} at {}", self.version),
            ),
            VariantMatch::WrongVersion => {
                let ranges = definition
                    .variants()
                    .iter()
                    .filter(|v| v.wlst_mode.includes(self.mode))
                    .map(|v| v.version.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                (
                    ValidationVerdict::VersionInvalid,
                    format!("{model_name} in {location} is valid for versions {ranges}, not {}", self.version),
                )
            }
            VariantMatch::WrongMode => (
                ValidationVerdict::VersionInvalid,
                format!("{model_name} in {location} is not supported in {} mode", self.mode),
            ),
        })
    }
}
