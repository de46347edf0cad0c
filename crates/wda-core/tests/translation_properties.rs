use proptest::prelude::*;
use serde_json::{json, Value};
use wda_catalog::LocationContext;
use wda_core::{Aliases, ValidationVerdict};
use wda_test_utils::{location, offline, online, session};
use wda_version::{Version, WlstMode};

fn mode_strategy() -> impl Strategy<Value = WlstMode> {
    prop_oneof![Just(WlstMode::Offline), Just(WlstMode::Online)]
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}"
}

/// Versions at or above 12.2.1.3, where no fixture range on `Server` has a boundary
fn recent_version_strategy() -> impl Strategy<Value = Version> {
    (12u32..16, 0u32..5, 0u32..5, 0u32..10)
        .prop_map(|(a, b, c, d)| Version::from_segments(vec![a, b, c, d]).unwrap())
        .prop_filter("below 12.2.1.3", |v| *v >= "12.2.1.3".parse::<Version>().unwrap())
}

fn round_trip(aliases: &Aliases, location: &LocationContext, model_name: &str, value: &Value) -> (Option<String>, Option<Value>) {
    let (native_name, native_value) = aliases
        .get_wlst_attribute_name_and_value(location, model_name, value)
        .unwrap();
    let native_name = native_name.unwrap();
    aliases
        .get_model_attribute_name_and_value(location, &native_name, &native_value.unwrap_or(Value::Null))
        .unwrap()
}

proptest! {
    #[test]
    fn prop_integer_round_trip(port in 1i64..65536, mode in mode_strategy()) {
        let aliases = session("14.1.1", mode);
        let server = location("/Server/ms1");
        let value = json!(port);
        prop_assert_eq!(round_trip(&aliases, &server, "ListenPort", &value), (Some("ListenPort".to_string()), Some(value)));
    }

    #[test]
    fn prop_long_and_double_round_trip(seconds in any::<i64>(), size in 0.0f64..1.0e6, mode in mode_strategy()) {
        let aliases = session("14.1.1", mode);
        let pool = location("/JDBCSystemResource/ds1/JdbcResource/JDBCConnectionPoolParams");
        let value = json!(seconds);
        prop_assert_eq!(
            round_trip(&aliases, &pool, "SecondsToTrustAnIdlePoolConnection", &value),
            (Some("SecondsToTrustAnIdlePoolConnection".to_string()), Some(value))
        );

        let mail = location("/MailSession/mail1");
        let value = json!(size);
        prop_assert_eq!(round_trip(&aliases, &mail, "MaxPoolSize", &value), (Some("MaxPoolSize".to_string()), Some(value)));
    }

    #[test]
    fn prop_string_and_boolean_round_trip(text in "[A-Za-z0-9._-]{1,24}", flag in any::<bool>(), mode in mode_strategy()) {
        let aliases = session("12.2.1.3", mode);
        let server = location("/Server/ms1");

        let value = json!(text);
        prop_assert_eq!(round_trip(&aliases, &server, "Notes", &value), (Some("Notes".to_string()), Some(value)));

        let value = json!(flag);
        prop_assert_eq!(round_trip(&aliases, &server, "AutoRestart", &value), (Some("AutoRestart".to_string()), Some(value)));
    }

    #[test]
    fn prop_list_round_trip(items in prop::collection::vec(name_strategy(), 1..6), mode in mode_strategy()) {
        let aliases = session("14.1.1", mode);
        let value = json!(items);

        let cluster = location("/Cluster/c1");
        prop_assert_eq!(
            round_trip(&aliases, &cluster, "CandidateMachinesForMigratableServers", &value),
            (Some("CandidateMachinesForMigratableServers".to_string()), Some(value.clone()))
        );

        let params = location("/JDBCSystemResource/ds1/JdbcResource/JDBCDataSourceParams");
        prop_assert_eq!(round_trip(&aliases, &params, "JNDIName", &value), (Some("JNDIName".to_string()), Some(value)));
    }

    #[test]
    fn prop_semicolon_list_keeps_commas_inside_items(
        items in prop::collection::vec("[a-z0-9]{1,6}(,[a-z0-9]{1,6})?", 1..6),
        mode in mode_strategy(),
    ) {
        let aliases = session("14.1.1", mode);
        let cluster = location("/Cluster/c1");
        let value = json!(items);
        prop_assert_eq!(
            round_trip(&aliases, &cluster, "RemoteClusterAddress", &value),
            (Some("RemoteClusterAddress".to_string()), Some(value))
        );
    }

    #[test]
    fn prop_preferred_delimited_string_round_trip(items in prop::collection::vec(name_strategy(), 1..6), mode in mode_strategy()) {
        let aliases = session("14.1.1", mode);
        let app = location("/AppDeployment/app1");
        let value = json!(items.join(","));
        prop_assert_eq!(round_trip(&aliases, &app, "Target", &value), (Some("Target".to_string()), Some(value)));
    }

    #[test]
    fn prop_delimiter_normalization_is_idempotent(raw in "[a-z0-9 ,;]{0,40}", mode in mode_strategy()) {
        let aliases = session("14.1.1", mode);
        let cluster = location("/Cluster/c1");
        let translate = |value: &Value| {
            aliases
                .get_wlst_attribute_name_and_value(&cluster, "CandidateMachinesForMigratableServers", value)
                .unwrap()
                .1
                .unwrap()
        };
        let once = translate(&json!(raw));
        let twice = translate(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_password_mode_separation(secret in "[a-z0-9]{1,16}") {
        let params = location("/JDBCSystemResource/ds1/JdbcResource/JDBCDriverParams");
        let encrypted = json!(format!("{{AES}}{secret}"));
        let plaintext = json!(secret);

        let name = |aliases: &Aliases, value: &Value| {
            aliases.get_wlst_attribute_name_and_value(&params, "PasswordEncrypted", value).unwrap().0.unwrap()
        };
        prop_assert_eq!(name(&online("12.2.1.3"), &encrypted), "PasswordEncrypted");
        prop_assert_eq!(name(&online("12.2.1.3"), &plaintext), "Password");
        prop_assert_eq!(name(&offline("12.2.1.3"), &encrypted), "PasswordEncrypted");
        prop_assert_eq!(name(&offline("12.2.1.3"), &plaintext), "PasswordEncrypted");
    }

    #[test]
    fn prop_flattened_resolution_is_idempotent(datasource in name_strategy(), property in name_strategy(), mode in mode_strategy()) {
        let aliases = session("14.1.1", mode);
        let path = format!("/JDBCSystemResource/{datasource}/JdbcResource/JDBCDriverParams/Properties/{property}");
        let property_location = location(&path);

        let first = aliases.get_wlst_attributes_path(&property_location).unwrap().unwrap();
        let second = aliases.get_wlst_attributes_path(&property_location).unwrap().unwrap();
        prop_assert_eq!(&first, &second);

        let flat_name = match mode {
            WlstMode::Offline => "NO_NAME_0".to_string(),
            WlstMode::Online => datasource.clone(),
        };
        let expected_tail = format!("/Properties/{flat_name}/Property/{property}");
        prop_assert!(first.ends_with(&expected_tail), "{} does not end with {}", first, expected_tail);
    }

    #[test]
    fn prop_validity_is_monotonic_above_last_boundary(
        v1 in recent_version_strategy(),
        v2 in recent_version_strategy(),
        mode in mode_strategy(),
    ) {
        let (low, high) = if v1 <= v2 { (v1, v2) } else { (v2, v1) };
        let server = location("/Server/ms1");
        let low_session = session(&low.to_string(), mode);
        let high_session = session(&high.to_string(), mode);
        for name in low_session.get_model_attribute_names(&server).unwrap() {
            let (verdict, message) = high_session.is_valid_model_attribute_name(&server, &name).unwrap();
            prop_assert_eq!(verdict, ValidationVerdict::Valid, "{}", message);
        }
    }
}
