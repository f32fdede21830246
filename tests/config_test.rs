use optionform::config::Settings;
use optionform::domain::PluginId;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_external_configs() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::create_dir_all(root.join("config/plugins"))?;

    let optionform_toml = r#"
[render]
is_admin = true

[[plugins]]
folder_name = "twitter"
id = 1

[[plugins.fields]]
type = "text_element"
name = "email"

[[plugins.options]]
id = 7
option_name = "email"
option_value = "a@b.com"

[[plugins]]
folder_name = "facebook"
id = 2
"#;
    fs::write(root.join("optionform.toml"), optionform_toml)?;

    // Plugin in JSON replaces the inline facebook definition
    let facebook_json = r#"
{
    "folder_name": "facebook",
    "id": 2,
    "fields": [
        {"type": "text_element", "name": "app_id", "validation_regex": "^\\d+$"},
        {"type": "text_element", "name": "Bio", "required": false}
    ]
}
"#;
    fs::write(root.join("config/plugins/facebook.json"), facebook_json)?;

    let flickr_yaml = r#"
folder_name: flickr
id: 3
fields:
  - type: radio_element
    name: Gender
    values:
      - value: F
      - value: M
      - value: O
        default_selection: true
"#;
    fs::write(root.join("config/plugins/flickr.yaml"), flickr_yaml)?;

    // Ignored extension
    fs::write(root.join("config/plugins/notes.txt"), "not a plugin")?;

    let settings = Settings::from_root(root.to_str().unwrap())?;

    assert!(settings.render.is_admin);
    assert_eq!(settings.plugins.len(), 3);

    let twitter = settings.plugin("twitter").unwrap();
    assert_eq!(twitter.fields.len(), 1);
    assert_eq!(twitter.options.len(), 1);

    let facebook = settings.plugin("facebook").unwrap();
    assert_eq!(facebook.fields.len(), 2);
    assert!(!facebook.fields[1].required);

    let flickr = settings.plugin("flickr").unwrap();
    assert_eq!(flickr.id, PluginId(3));
    let builder = flickr.build_schema()?;
    assert_eq!(
        builder
            .field("Gender")
            .and_then(|f| f.default_selection())
            .map(|v| v.value.clone()),
        Some("O".to_string())
    );

    Ok(())
}

#[test]
fn test_missing_config_yields_defaults() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;

    let settings = Settings::from_root(temp_dir.path().to_str().unwrap())?;

    assert!(!settings.render.is_admin);
    assert!(settings.plugins.is_empty());
    Ok(())
}

#[test]
fn test_invalid_plugin_definition_fails_validation() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("config/plugins"))?;

    let broken_yaml = r#"
folder_name: broken
id: 9
fields:
  - type: select_element
    name: City
"#;
    fs::write(root.join("config/plugins/broken.yaml"), broken_yaml)?;

    let err = Settings::from_root(root.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("plugins[0].fields[0].values"));
    Ok(())
}
