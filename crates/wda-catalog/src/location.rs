//! Location contexts
//!
//! A [`LocationContext`] is a cursor into a model: the folder types walked
//! from the root plus the name tokens bound so far. It carries a handle to the
//! catalog so `append` can refuse to descend below a multi-instance folder
//! whose instance name is still unknown.

use crate::catalog::AliasCatalog;
use crate::definition::FolderDefinition;
use crate::error::LocationError;
use indexmap::IndexMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

/// Path into a model instance
///
/// Equality ignores the catalog handle: two contexts are equal when their
/// folder sequences and token bindings are.
#[derive(Clone)]
pub struct LocationContext {
    catalog: Arc<AliasCatalog>,
    folders: Vec<String>,
    name_tokens: IndexMap<String, String>,
}

impl LocationContext {
    /// Create a root location
    #[inline]
    #[must_use]
    pub fn new(catalog: Arc<AliasCatalog>) -> Self {
        Self {
            catalog,
            folders: Vec::new(),
            name_tokens: IndexMap::new(),
        }
    }

    /// Build a location from a model folder path
    ///
    /// The segment after a multi-instance folder is taken as its instance
    /// name, so `/JDBCSystemResource/ds1/JdbcResource` binds
    /// `JDBCSYSTEMRESOURCE=ds1`. A leading `section:` prefix is ignored.
    ///
    /// # Errors
    /// Returns a [`LocationError`] if a segment is empty
    pub fn from_model_path(catalog: Arc<AliasCatalog>, path: &str) -> Result<Self, LocationError> {
        let path = path.split_once(":/").map_or(path, |(_, rest)| rest);
        let mut location = Self::new(catalog);
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        while let Some(folder) = segments.next() {
            location.append(folder)?;
            let Some(token) = location.current_name_token().map(str::to_string) else {
                continue;
            };
            let multiple = location.current_folder().is_some_and(FolderDefinition::is_multiple);
            if multiple {
                if let Some(name) = segments.next() {
                    location.add_name_token(token, name)?;
                }
            }
        }
        Ok(location)
    }

    /// Catalog this location resolves against
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Arc<AliasCatalog> {
        &self.catalog
    }

    /// Descend into `folder_type`
    ///
    /// # Errors
    /// - [`LocationError::EmptyName`] for an empty folder type
    /// - [`LocationError::NameTokenUnset`] if the current folder is
    ///   multi-instance and its name token is not bound
    pub fn append(&mut self, folder_type: impl Into<String>) -> Result<(), LocationError> {
        let folder_type = folder_type.into();
        if folder_type.trim().is_empty() {
            return Err(LocationError::EmptyName { what: "folder type" });
        }
        if let Some(current) = self.current_folder() {
            if current.is_multiple() {
                if let Some(token) = current.name_token() {
                    if !self.name_tokens.contains_key(token) {
                        return Err(LocationError::NameTokenUnset {
                            folder_path: self.get_folder_path(),
                            token: token.to_string(),
                        });
                    }
                }
            }
        }
        self.folders.push(folder_type);
        Ok(())
    }

    /// Leave the current folder, dropping its token bindings
    ///
    /// # Errors
    /// Returns [`LocationError::PopBelowRoot`] at the root
    pub fn pop(&mut self) -> Result<String, LocationError> {
        let (tokens, flat_token) = match self.current_folder() {
            Some(folder) => (
                folder.name_token().map(str::to_string),
                folder.flattened().map(|f| f.path_token.clone()),
            ),
            None => (None, None),
        };
        let popped = self.folders.pop().ok_or(LocationError::PopBelowRoot)?;
        for token in tokens.into_iter().chain(flat_token) {
            self.name_tokens.shift_remove(&token);
        }
        Ok(popped)
    }

    /// Bind `token` to an instance name
    ///
    /// # Errors
    /// Returns [`LocationError::EmptyName`] if either side is empty
    pub fn add_name_token(
        &mut self,
        token: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), LocationError> {
        let token = token.into();
        let value = value.into();
        if token.trim().is_empty() {
            return Err(LocationError::EmptyName { what: "name token" });
        }
        if value.trim().is_empty() {
            return Err(LocationError::EmptyName {
                what: "name token value",
            });
        }
        self.name_tokens.insert(token, value);
        Ok(())
    }

    /// Unbind `token`, returning its previous value
    pub fn remove_name_token(&mut self, token: &str) -> Option<String> {
        self.name_tokens.shift_remove(token)
    }

    /// Value bound to `token`
    #[must_use]
    pub fn get_name_token_value(&self, token: &str) -> Option<&str> {
        self.name_tokens.get(token).map(String::as_str)
    }

    /// All token bindings in binding order
    #[inline]
    #[must_use]
    pub fn name_tokens(&self) -> &IndexMap<String, String> {
        &self.name_tokens
    }

    /// `/`-joined folder types without instance names; `/` at the root
    #[must_use]
    pub fn get_folder_path(&self) -> String {
        format!("/{}", self.folders.join("/"))
    }

    /// Folder types from the root down
    #[inline]
    #[must_use]
    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    /// Innermost folder type, `None` at the root
    #[inline]
    #[must_use]
    pub fn current_folder_type(&self) -> Option<&str> {
        self.folders.last().map(String::as_str)
    }

    /// Catalog definition of the innermost folder, when declared
    #[must_use]
    pub fn current_folder(&self) -> Option<&FolderDefinition> {
        self.catalog.find_folder(&self.get_folder_path())
    }

    /// Name token of the innermost folder
    #[must_use]
    pub fn current_name_token(&self) -> Option<&str> {
        self.current_folder().and_then(FolderDefinition::name_token)
    }

    /// Number of folders below the root
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.folders.len()
    }

    /// Whether this is the root location
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.folders.is_empty()
    }

    /// Independent deep copy
    #[inline]
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl PartialEq for LocationContext {
    fn eq(&self, other: &Self) -> bool {
        self.folders == other.folders && self.name_tokens == other.name_tokens
    }
}

impl Eq for LocationContext {}

impl Debug for LocationContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationContext")
            .field("folders", &self.folders)
            .field("name_tokens", &self.name_tokens)
            .finish_non_exhaustive()
    }
}

impl Display for LocationContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.folders.is_empty() {
            return f.write_str("/");
        }
        let mut path = String::from("/");
        for folder in &self.folders {
            path = AliasCatalog::child_path(&path, folder);
            write!(f, "/{folder}")?;
            let bound = self
                .catalog
                .find_folder(&path)
                .filter(|def| def.is_multiple())
                .and_then(FolderDefinition::name_token)
                .and_then(|token| self.name_tokens.get(token));
            if let Some(name) = bound {
                write!(f, "/{name}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "schema_version": "alias_catalog_v1",
        "root": {
            "folders": {
                "JDBCSystemResource": {
                    "wlst_type": "JDBCSystemResource",
                    "instance": "multiple",
                    "name_token": "DATASOURCE",
                    "section": "resources",
                    "folders": {
                        "JdbcResource": {
                            "wlst_type": "JDBCResource",
                            "name_token": "JDBCRESOURCE",
                            "default_name": "%DATASOURCE%"
                        }
                    }
                },
                "SecurityConfiguration": {"wlst_type": "SecurityConfiguration"}
            }
        }
    }"#;

    fn catalog() -> Arc<AliasCatalog> {
        Arc::new(AliasCatalog::from_json_str(DOC).unwrap())
    }

    #[test]
    fn append_requires_token_below_multiple() {
        let mut location = LocationContext::new(catalog());
        location.append("JDBCSystemResource").unwrap();
        let err = location.append("JdbcResource").unwrap_err();
        assert_eq!(
            err,
            LocationError::NameTokenUnset {
                folder_path: "/JDBCSystemResource".into(),
                token: "DATASOURCE".into(),
            }
        );

        location.add_name_token("DATASOURCE", "ds1").unwrap();
        location.append("JdbcResource").unwrap();
        assert_eq!(location.get_folder_path(), "/JDBCSystemResource/JdbcResource");
        assert_eq!(location.to_string(), "/JDBCSystemResource/ds1/JdbcResource");
        assert_eq!(location.depth(), 2);
    }

    #[test]
    fn single_folder_needs_no_token() {
        let mut location = LocationContext::new(catalog());
        location.append("SecurityConfiguration").unwrap();
        location.append("Realm").unwrap();
        assert_eq!(location.current_folder_type(), Some("Realm"));
    }

    #[test]
    fn pop_removes_one_level_and_its_token() {
        let mut location = LocationContext::new(catalog());
        location.append("JDBCSystemResource").unwrap();
        location.add_name_token("DATASOURCE", "ds1").unwrap();
        assert_eq!(location.pop().unwrap(), "JDBCSystemResource");
        assert!(location.is_root());
        assert_eq!(location.get_name_token_value("DATASOURCE"), None);
        assert_eq!(location.pop().unwrap_err(), LocationError::PopBelowRoot);
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut location = LocationContext::new(catalog());
        assert!(matches!(location.append(""), Err(LocationError::EmptyName { .. })));
        assert!(matches!(
            location.add_name_token("", "x"),
            Err(LocationError::EmptyName { .. })
        ));
        assert!(matches!(
            location.add_name_token("X", " "),
            Err(LocationError::EmptyName { .. })
        ));
    }

    #[test]
    fn copy_is_independent() {
        let mut original = LocationContext::new(catalog());
        original.append("JDBCSystemResource").unwrap();
        original.add_name_token("DATASOURCE", "ds1").unwrap();

        let mut branch = original.copy();
        assert_eq!(branch, original);
        branch.append("JdbcResource").unwrap();
        assert_ne!(branch, original);
        assert_eq!(original.depth(), 1);
    }

    #[test]
    fn from_model_path_binds_instance_names() {
        let location =
            LocationContext::from_model_path(catalog(), "resources:/JDBCSystemResource/ds1/JdbcResource")
                .unwrap();
        assert_eq!(location.get_folder_path(), "/JDBCSystemResource/JdbcResource");
        assert_eq!(location.get_name_token_value("DATASOURCE"), Some("ds1"));
        assert_eq!(location.current_name_token(), Some("JDBCRESOURCE"));
    }

    #[test]
    fn root_display() {
        let location = LocationContext::new(catalog());
        assert_eq!(location.to_string(), "/");
        assert_eq!(location.get_folder_path(), "/");
        assert!(location.current_folder().is_some_and(FolderDefinition::is_root));
    }
}
