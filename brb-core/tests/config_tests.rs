// tests/config_tests.rs

use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

use brb_core::config::{self, ConfigMap, Settings};
use brb_core::Error;

const FULL_CONFIG: &str = r#"
TwitchClientID: cid
twitchclientsecret: secret
twitchappaccesstoken: apptoken
twitchuserid: 123456
twitterbearertoken: bearer
twitterusername: streamer
message: "back in {{ .Countdown }}"
"#;

#[test]
fn test_yaml_keys_are_case_insensitive_and_scalars_stringified() -> Result<(), Error> {
    let map = ConfigMap::from_yaml_str(FULL_CONFIG)?;
    assert_eq!(map.get(config::TWITCH_CLIENT_ID), "cid");
    assert_eq!(map.get("TWITCHCLIENTID"), "cid");
    assert_eq!(map.get(config::TWITCH_USER_ID), "123456");
    assert_eq!(map.get("not-a-key"), "");
    Ok(())
}

#[test]
fn test_settings_from_full_config() -> Result<(), Error> {
    let settings = Settings::from_config(&ConfigMap::from_yaml_str(FULL_CONFIG)?);
    assert!(settings.twitch.is_enabled());
    assert!(settings.twitter.is_enabled());
    assert_eq!(settings.twitch.user_id, "123456");
    assert_eq!(settings.twitter.username, "streamer");
    assert_eq!(settings.message.as_deref(), Some("back in {{ .Countdown }}"));
    Ok(())
}

#[test]
fn test_empty_config_disables_everything() -> Result<(), Error> {
    let settings = Settings::from_config(&ConfigMap::from_yaml_str("")?);
    assert_eq!(settings, Settings::default());
    assert!(!settings.twitch.is_enabled());
    assert!(!settings.twitter.is_enabled());
    Ok(())
}

#[test]
fn test_nested_values_are_skipped() -> Result<(), Error> {
    let map = ConfigMap::from_yaml_str("twitterusername: streamer\nextra:\n  nested: 1\n")?;
    assert_eq!(map.get(config::TWITTER_USERNAME), "streamer");
    assert_eq!(map.get("extra"), "");
    assert_eq!(map.len(), 1);
    Ok(())
}

#[test]
fn test_bad_documents_are_config_errors() {
    for doc in ["- just\n- a list\n", "key: [unterminated"] {
        match ConfigMap::from_yaml_str(doc) {
            Err(Error::ConfigRead(_)) => {}
            other => panic!("expected ConfigRead for {doc:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_environment_overrides_file() -> Result<(), Error> {
    let mut map = ConfigMap::from_yaml_str("twitterusername: fromfile\ntwitterbearertoken: filetoken\n")?;
    let env: HashMap<&str, &str> = HashMap::from([
        ("TWITTERUSERNAME", "fromenv"),
        ("TWITTERBEARERTOKEN", ""),
        ("TWITCHUSERID", "42"),
    ]);
    map.merge_env(|name| env.get(name).map(|v| v.to_string()));

    assert_eq!(map.get(config::TWITTER_USERNAME), "fromenv");
    // Empty variables do not clear file values.
    assert_eq!(map.get(config::TWITTER_BEARER_TOKEN), "filetoken");
    assert_eq!(map.get(config::TWITCH_USER_ID), "42");
    Ok(())
}

#[test]
fn test_load_explicit_file() -> anyhow::Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(FULL_CONFIG.as_bytes())?;

    let map = config::load_config_file(Some(file.path()))?;
    assert_eq!(map.get(config::TWITTER_BEARER_TOKEN), "bearer");
    Ok(())
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.yaml");
    match config::load_config_file(Some(&missing)) {
        Err(Error::ConfigRead(msg)) => assert!(msg.contains("nope.yaml"), "{msg}"),
        other => panic!("expected ConfigRead, got {other:?}"),
    }
}

#[test]
fn test_default_path_is_in_home() {
    if let Some(path) = config::default_config_path() {
        assert!(path.ends_with(config::CONFIG_FILE_NAME));
    }
}
