use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod schema;
pub mod validator;

pub use schema::{FieldDefinition, PluginConfig};

use crate::cli::Cli;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub plugins: Vec<PluginConfig>,
}

/// Settings passed through to the form renderer
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct RenderSettings {
    /// Whether the current viewer is an administrator
    #[serde(default)]
    pub is_admin: bool,
}

impl Settings {
    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let config_path = &cli.config;
        let root = config_path
            .parent()
            .and_then(|p| p.to_str())
            .filter(|p| !p.is_empty())
            .unwrap_or(".");

        let s = Config::builder()
            .add_source(File::from(config_path.clone()).required(false))
            .set_default("render.is_admin", false)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.load_external_configs(root)?;
        settings.validate()?;

        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(is_admin) = cli.admin {
            self.render.is_admin = is_admin;
        }
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("optionform");
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .set_default("render.is_admin", false)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        settings.load_external_configs(root)?;
        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Find a plugin by its folder name
    pub fn plugin(&self, folder_name: &str) -> Option<&PluginConfig> {
        self.plugins.iter().find(|p| p.folder_name == folder_name)
    }

    fn load_external_configs(&mut self, root: &str) -> Result<(), anyhow::Error> {
        self.load_plugins_from_dir(&format!("{}/config/plugins", root))
    }

    /// Plugin files override inline definitions with the same folder name
    fn load_plugins_from_dir(&mut self, path: &str) -> Result<(), anyhow::Error> {
        let pattern = format!("{}/*", path);
        let mut loaded = Vec::new();
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => {
                    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                        if matches!(ext, "json" | "yaml" | "yml") {
                            let content = std::fs::read_to_string(&path)?;
                            let plugin: PluginConfig = if ext == "json" {
                                serde_json::from_str(&content)?
                            } else {
                                serde_yaml::from_str(&content)?
                            };
                            tracing::debug!(
                                "Loaded plugin '{}' from {}",
                                plugin.folder_name,
                                path.display()
                            );
                            loaded.push(plugin);
                        }
                    }
                }
                Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
            }
        }
        Self::merge_vec_by_key(&mut self.plugins, loaded, |p| p.folder_name.clone());
        Ok(())
    }

    /// Items from `other` replace items in `base` with the same key and are
    /// appended otherwise.
    fn merge_vec_by_key<T, K, F>(base: &mut Vec<T>, other: Vec<T>, key_fn: F)
    where
        K: Eq + std::hash::Hash,
        F: Fn(&T) -> K,
    {
        use std::collections::HashMap;

        let mut key_to_index: HashMap<K, usize> = HashMap::new();
        for (i, item) in base.iter().enumerate() {
            key_to_index.insert(key_fn(item), i);
        }

        for item in other {
            let key = key_fn(&item);
            if let Some(&idx) = key_to_index.get(&key) {
                base[idx] = item;
            } else {
                key_to_index.insert(key, base.len());
                base.push(item);
            }
        }
    }
}
