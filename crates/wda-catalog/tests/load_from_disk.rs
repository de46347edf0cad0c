use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::Write;
use std::sync::Arc;
use wda_catalog::{AliasCatalog, CatalogError, LocationContext, ModelSection};
use wda_version::WlstMode;

const YAML: &str = r#"
schema_version: alias_catalog_v1
secret_suffix: Crypted
root:
  folders:
    MailSession:
      wlst_type: MailSession
      instance: multiple
      name_token: MAILSESSION
      section: resources
      attributes:
        SessionPasswordCrypted:
          wlst_type: password
        Properties:
          wlst_type: properties
"#;

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_yaml_file() {
    let file = write_temp(".yaml", YAML);
    let catalog = AliasCatalog::load(file.path()).unwrap();
    assert_eq!(catalog.secret_suffix(), "Crypted");
    let folder = catalog.get_folder("/MailSession").unwrap();
    assert_eq!(folder.section(), Some(ModelSection::Resources));
    assert_eq!(
        catalog.plaintext_password_name("SessionPasswordCrypted"),
        Some("SessionPassword")
    );
}

#[test]
fn test_load_json_file_matches_yaml() {
    let value: serde_yaml::Value = serde_yaml::from_str(YAML).unwrap();
    let json = serde_json::to_string(&value).unwrap();
    let file = write_temp(".json", &json);
    let from_json = AliasCatalog::load(file.path()).unwrap();
    let from_yaml = AliasCatalog::from_yaml_str(YAML).unwrap();
    assert_eq!(from_json.folder_count(), from_yaml.folder_count());
    assert_eq!(from_json.top_level_folder_names(), from_yaml.top_level_folder_names());
}

#[test]
fn test_load_unsupported_extension() {
    let file = write_temp(".toml", YAML);
    let err = AliasCatalog::load(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::UnsupportedFormat(_)));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = AliasCatalog::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn test_parse_error_names_file() {
    let file = write_temp(".yml", "root: [unclosed");
    let err = AliasCatalog::load(file.path()).unwrap_err();
    match err {
        CatalogError::Parse { origin, .. } => assert!(origin.ends_with(".yml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_catalog_shared_across_threads() {
    let catalog = Arc::new(AliasCatalog::from_yaml_str(YAML).unwrap());
    let version: wda_version::Version = "14.1.1".parse().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let catalog = Arc::clone(&catalog);
            let version = version.clone();
            std::thread::spawn(move || {
                let mode = if i % 2 == 0 { WlstMode::Offline } else { WlstMode::Online };
                let view = catalog.folder_view("/MailSession", &version, mode).unwrap();
                let mut location = LocationContext::new(catalog);
                location.append("MailSession").unwrap();
                location.add_name_token("MAILSESSION", format!("mail{i}")).unwrap();
                (mode, view.attributes.len(), location.to_string())
            })
        })
        .collect();

    for handle in handles {
        let (mode, attribute_count, display) = handle.join().unwrap();
        assert_eq!(attribute_count, 2, "{mode}");
        assert!(display.starts_with("/MailSession/mail"));
    }
    assert_eq!(catalog.cached_view_count(), 2);
}

proptest! {
    #[test]
    fn prop_normalize_path_is_idempotent(segments in prop::collection::vec("[A-Za-z]{1,8}", 0..5), trailing in any::<bool>()) {
        let mut raw = segments.join("/");
        if trailing {
            raw.push('/');
        }
        let once = AliasCatalog::normalize_path(&raw);
        prop_assert_eq!(AliasCatalog::normalize_path(&once), once.clone());
        prop_assert!(once.starts_with('/'));
    }
}
