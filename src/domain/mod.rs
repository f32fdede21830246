use async_trait::async_trait;

pub mod field;

pub use field::{
    ChoiceField, FieldCommon, FieldKind, FieldMetadata, FieldValue, OptionField, PersistedOption,
    PluginId, TextField,
};

/// Resolves a plugin's folder name to its registered identifier.
#[async_trait]
pub trait PluginLookup: Send + Sync {
    /// Returns `None` when no plugin is registered under `folder_name`
    async fn get_plugin_id(&self, folder_name: &str) -> anyhow::Result<Option<PluginId>>;
}

/// Key-value store of persisted option values, keyed by plugin and option name.
#[async_trait]
pub trait OptionStore: Send + Sync {
    async fn get_options(&self, plugin_id: PluginId) -> anyhow::Result<Vec<PersistedOption>>;
}
