//! `%TOKEN%` references inside metadata values
//!
//! Default instance names and flattened-folder names may be written in terms
//! of ancestor name tokens, e.g. `%JDBCSYSTEMRESOURCE%`.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TOKEN_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%([A-Za-z0-9_]+)%").unwrap_or_else(|e| panic!("invalid token pattern: {e}"))
});

/// Token names referenced by `template`, in order of appearance
#[must_use]
pub fn referenced_tokens(template: &str) -> Vec<&str> {
    TOKEN_REF
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Whether `template` references any token
#[inline]
#[must_use]
pub fn has_tokens(template: &str) -> bool {
    TOKEN_REF.is_match(template)
}

/// Replace every bound `%TOKEN%` with its value
///
/// Unbound references are left in place so the caller can report them.
#[must_use]
pub fn substitute(template: &str, bindings: &IndexMap<String, String>) -> String {
    TOKEN_REF
        .replace_all(template, |caps: &Captures<'_>| {
            bindings
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_references() {
        assert_eq!(
            referenced_tokens("%DOMAIN%-%SERVER%"),
            vec!["DOMAIN", "SERVER"]
        );
        assert!(referenced_tokens("NO_TOKENS").is_empty());
        assert!(!has_tokens("plain"));
        assert!(has_tokens("%A%"));
    }

    #[test]
    fn substitutes_bound_tokens_only() {
        let mut bindings = IndexMap::new();
        bindings.insert("SERVER".to_string(), "ms1".to_string());
        assert_eq!(substitute("%SERVER%", &bindings), "ms1");
        assert_eq!(substitute("%SERVER%-%CLUSTER%", &bindings), "ms1-%CLUSTER%");
    }
}
