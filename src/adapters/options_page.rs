//! Plugin options page.
//!
//! Performs the external lookups for one render (plugin id, then stored
//! options) and hands the results to the synchronous schema builder.

use crate::domain::{OptionStore, PluginLookup};
use crate::schema::{FormDescription, OptionSchemaBuilder};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Plugin not found: '{folder_name}'")]
    PluginNotFound { folder_name: String },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub struct OptionsPage {
    folder_name: String,
    lookup: Arc<dyn PluginLookup>,
    store: Arc<dyn OptionStore>,
}

impl OptionsPage {
    pub fn new(
        folder_name: impl Into<String>,
        lookup: Arc<dyn PluginLookup>,
        store: Arc<dyn OptionStore>,
    ) -> Self {
        Self {
            folder_name: folder_name.into(),
            lookup,
            store,
        }
    }

    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    /// Resolve the builder's fields and describe the form.
    ///
    /// Returns `Ok(None)` without touching the collaborators when no fields
    /// were declared.
    pub async fn render(
        &self,
        builder: &mut OptionSchemaBuilder,
        is_admin: bool,
    ) -> Result<Option<FormDescription>, PageError> {
        if builder.is_empty() {
            tracing::debug!("No option fields declared for plugin '{}'", self.folder_name);
            return Ok(None);
        }

        let plugin_id = self
            .lookup
            .get_plugin_id(&self.folder_name)
            .await?
            .ok_or_else(|| PageError::PluginNotFound {
                folder_name: self.folder_name.clone(),
            })?;

        let options = self.store.get_options(plugin_id).await?;
        tracing::info!(
            "Rendering {} option fields for plugin '{}' ({} stored values)",
            builder.len(),
            self.folder_name,
            options.len()
        );

        builder.resolve_values(options, plugin_id);
        Ok(Some(builder.build_description(is_admin)))
    }
}
