use super::*;

#[test]
fn defaults_match_plugin_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.input.mode, Mode::Simple);
    assert_eq!(settings.input.simple_key, "address");
    assert_eq!(settings.input.template, "{address}, {city}, {state}");
    assert!(!settings.input.use_nested_paths);
    assert_eq!(settings.output.mode, Mode::Simple);
    assert_eq!(settings.output.simple_lat_key, "latitude");
    assert_eq!(settings.output.simple_lon_key, "longitude");
    assert_eq!(settings.output.template_key, "coordinates");
    assert_eq!(settings.output.template_value, "{latitude}, {longitude}");
    assert!(!settings.output.use_nested_paths);
}

#[test]
fn partial_nested_settings_are_backfilled() {
    let settings = Settings::from_persisted_str(
        "outputFormat:\n  mode: template\n  template:\n    key: geo.coords\n",
    );
    assert_eq!(settings.output.mode, Mode::Template);
    assert_eq!(settings.output.template_key, "geo.coords");
    // Sibling field inside the same nested object keeps its default.
    assert_eq!(settings.output.template_value, "{latitude}, {longitude}");
    assert_eq!(settings.output.simple_lat_key, "latitude");
    assert_eq!(settings.input, ResolutionConfig::default());
}

#[test]
fn reads_plugin_data_json() {
    let json = r#"{
        "inputKeys": {
            "mode": "template",
            "simpleKey": "location",
            "template": "{street}, {city}",
            "object": true
        },
        "outputFormat": {
            "object": true,
            "mode": "simple",
            "simpleKey": { "latitude": "geo.lat", "longitude": "geo.lon" },
            "template": { "key": "coordinates", "value": "{latitude}, {longitude}" }
        }
    }"#;
    let settings = Settings::from_persisted_str(json);
    assert_eq!(settings.input.mode, Mode::Template);
    assert_eq!(settings.input.simple_key, "location");
    assert_eq!(settings.input.template, "{street}, {city}");
    assert!(settings.input.use_nested_paths);
    assert!(settings.output.use_nested_paths);
    assert_eq!(settings.output.simple_lat_key, "geo.lat");
    assert_eq!(settings.output.simple_lon_key, "geo.lon");
}

#[test]
fn wrong_types_keep_defaults() {
    let settings = Settings::from_persisted_str(
        "inputKeys:\n  mode: 3\n  object: \"yes\"\n  simpleKey: place\noutputFormat: nope\n",
    );
    assert_eq!(settings.input.mode, Mode::Simple);
    assert!(!settings.input.use_nested_paths);
    assert_eq!(settings.input.simple_key, "place");
    assert_eq!(settings.output, OutputConfig::default());
}

#[test]
fn unknown_mode_keeps_default() {
    let settings = Settings::from_persisted_str("inputKeys:\n  mode: fancy\n");
    assert_eq!(settings.input.mode, Mode::Simple);
}

#[test]
fn unknown_fields_are_ignored() {
    let settings =
        Settings::from_persisted_str("extra: 1\ninputKeys:\n  simpleKey: where\n  bogus: true\n");
    assert_eq!(settings.input.simple_key, "where");
}

#[test]
fn null_fields_count_as_missing() {
    let settings = Settings::from_persisted_str("inputKeys:\n  simpleKey: null\n");
    assert_eq!(settings.input.simple_key, "address");
}

#[test]
fn malformed_text_yields_defaults() {
    assert_eq!(Settings::from_persisted_str("inputKeys: [oops"), Settings::default());
    assert_eq!(Settings::from_persisted_str("- a list\n"), Settings::default());
    assert_eq!(Settings::from_persisted_str(""), Settings::default());
}

#[test]
fn to_mapping_round_trips_through_merge() {
    let mut settings = Settings::default();
    settings.input.mode = Mode::Template;
    settings.input.template = "{place.city}".to_owned();
    settings.output.use_nested_paths = true;
    settings.output.simple_lon_key = "geo.lng".to_owned();

    let restored = Settings::merged_over_defaults(&settings.to_mapping());
    assert_eq!(restored, settings);
}

#[test]
fn load_settings_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = load_settings(&dir.path().join("absent.yaml")).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn load_settings_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_settings(dir.path());
    assert!(
        matches!(result, Err(ConfigError::SettingsIo { .. })),
        "expected SettingsIo, got: {result:?}"
    );
}

#[test]
fn save_then_load_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("geotag.yaml");
    let mut settings = Settings::default();
    settings.output.mode = Mode::Template;

    save_settings(&path, &settings).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("inputKeys:\n"), "unexpected yaml: {text}");
    assert_eq!(load_settings(&path).unwrap(), settings);
}

#[test]
fn save_then_load_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let mut settings = Settings::default();
    settings.input.use_nested_paths = true;

    save_settings(&path, &settings).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["inputKeys"]["object"], serde_json::Value::Bool(true));
    assert_eq!(parsed["outputFormat"]["simpleKey"]["latitude"], "latitude");
    assert_eq!(load_settings(&path).unwrap(), settings);
}
