//! Plugin option definitions.
//!
//! Plugins declare their option fields in configuration, either inline in the
//! main settings file or as standalone files under `config/plugins/`.
//!
//! ## Example Plugin Definition
//!
//! ```yaml
//! folder_name: twitter
//! id: 1
//! fields:
//!   - type: text_element
//!     name: email
//!     header: Where should we send reports?
//!     required_message: You must enter an email
//!   - type: text_element
//!     name: service_id
//!     validation_regex: '^\d+$'
//!   - type: select_element
//!     name: City
//!     multiple: true
//!     visible_rows: 3
//!     values:
//!       - value: NYC
//!         display_value: New York
//!         default_selection: true
//!       - value: LA
//! options:
//!   - id: 7
//!     option_name: email
//!     option_value: a@b.com
//! ```

use crate::domain::{FieldKind, FieldValue, PersistedOption, PluginId};
use crate::schema::{FieldArgs, OptionSchemaBuilder, SchemaError};
use serde::{Deserialize, Serialize};

/// Option schema and stored values for one plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Folder the plugin is installed under, used to look up its id
    pub folder_name: String,
    pub id: PluginId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,
    /// Values already persisted for this plugin
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PersistedOption>,
}

/// Declaration of a single field plus its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<FieldValue>>,
    #[serde(default, alias = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_message: Option<String>,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default = "default_visible_rows")]
    pub visible_rows: u32,
}

fn default_required() -> bool {
    true
}

fn default_visible_rows() -> u32 {
    1
}

impl FieldDefinition {
    fn args(&self) -> FieldArgs {
        FieldArgs {
            name: self.name.clone(),
            values: self.values.clone(),
            default_value: self.default_value.clone(),
            label: self.label.clone(),
            id: None,
            value: None,
            validation_regex: self.validation_regex.clone(),
        }
    }

    /// Declare this field and its metadata on `builder`
    pub fn apply(&self, builder: &mut OptionSchemaBuilder) -> Result<(), SchemaError> {
        let name = builder.add_field(self.kind, self.args())?.name().to_string();
        if let Some(header) = &self.header {
            builder.add_field_header(&name, header.clone());
        }
        builder.set_field_required(&name, self.required);
        if let Some(message) = &self.required_message {
            builder.add_required_message(&name, message.clone());
        }
        if self.multiple || self.visible_rows != 1 {
            builder.set_select_multiple(&name, self.multiple, self.visible_rows);
        }
        Ok(())
    }
}

impl PluginConfig {
    /// Build the option schema declared by this plugin
    pub fn build_schema(&self) -> Result<OptionSchemaBuilder, SchemaError> {
        let mut builder = OptionSchemaBuilder::new();
        for field in &self.fields {
            field.apply(&mut builder)?;
        }
        Ok(builder)
    }
}
