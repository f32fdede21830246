use crate::config::Settings;
use crate::domain::{OptionStore, PersistedOption, PluginId, PluginLookup};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory plugin registry and option store, seeded from configuration.
#[derive(Clone, Default)]
pub struct InMemoryPluginStore {
    plugins: Arc<RwLock<HashMap<String, PluginId>>>,
    options: Arc<RwLock<HashMap<PluginId, Vec<PersistedOption>>>>,
}

impl InMemoryPluginStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every configured plugin along with its stored option values
    pub async fn from_settings(settings: &Settings) -> Self {
        let store = Self::new();
        for plugin in &settings.plugins {
            store.register_plugin(&plugin.folder_name, plugin.id).await;
            for option in &plugin.options {
                store.set_option(plugin.id, option.clone()).await;
            }
        }
        tracing::debug!("Seeded option store with {} plugins", settings.plugins.len());
        store
    }

    pub async fn register_plugin(&self, folder_name: &str, plugin_id: PluginId) {
        let mut plugins = self.plugins.write().await;
        plugins.insert(folder_name.to_string(), plugin_id);
    }

    /// Insert or replace the option with the same name
    pub async fn set_option(&self, plugin_id: PluginId, option: PersistedOption) {
        let mut options = self.options.write().await;
        let entries = options.entry(plugin_id).or_default();
        match entries.iter_mut().find(|o| o.option_name == option.option_name) {
            Some(existing) => *existing = option,
            None => entries.push(option),
        }
    }
}

#[async_trait]
impl PluginLookup for InMemoryPluginStore {
    async fn get_plugin_id(&self, folder_name: &str) -> anyhow::Result<Option<PluginId>> {
        let plugins = self.plugins.read().await;
        Ok(plugins.get(folder_name).copied())
    }
}

#[async_trait]
impl OptionStore for InMemoryPluginStore {
    async fn get_options(&self, plugin_id: PluginId) -> anyhow::Result<Vec<PersistedOption>> {
        let options = self.options.read().await;
        Ok(options.get(&plugin_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_and_options() {
        let store = InMemoryPluginStore::new();
        store.register_plugin("twitter", PluginId(1)).await;
        store
            .set_option(PluginId(1), PersistedOption::new(7, "email", "a@b.com"))
            .await;
        store
            .set_option(PluginId(1), PersistedOption::new(7, "email", "c@d.com"))
            .await;

        assert_eq!(store.get_plugin_id("twitter").await.unwrap(), Some(PluginId(1)));
        assert_eq!(store.get_plugin_id("facebook").await.unwrap(), None);

        let options = store.get_options(PluginId(1)).await.unwrap();
        assert_eq!(options, vec![PersistedOption::new(7, "email", "c@d.com")]);
        assert!(store.get_options(PluginId(2)).await.unwrap().is_empty());
    }
}
