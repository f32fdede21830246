//! Serializable form description handed to the renderer

use crate::domain::{FieldValue, OptionField, PluginId};
use crate::schema::builder::default_required_message;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Everything a renderer needs to draw and validate a plugin option form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDescription {
    /// Fields in declaration order
    pub fields: Vec<OptionField>,
    pub headers: BTreeMap<String, String>,
    /// Names of fields that may be left empty
    pub not_required: BTreeSet<String>,
    /// Custom messages for required fields left empty
    pub required_messages: BTreeMap<String, String>,
    pub select_multiple: BTreeMap<String, bool>,
    pub select_visible: BTreeMap<String, u32>,
    pub plugin_id: Option<PluginId>,
    pub is_admin: bool,
}

/// JSON mirrors of the description used by client-side scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientMirror {
    /// Field map keyed by field name
    pub fields_json: String,
    /// `{name: true}` for every optional field
    pub not_required_json: String,
    pub required_messages_json: String,
}

impl FormDescription {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&OptionField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        !self.not_required.contains(name)
    }

    pub fn required_message(&self, name: &str) -> String {
        self.required_messages
            .get(name)
            .cloned()
            .unwrap_or_else(|| default_required_message(name))
    }

    pub fn is_multiple(&self, name: &str) -> bool {
        self.select_multiple.get(name).copied().unwrap_or(false)
    }

    pub fn visible_rows(&self, name: &str) -> u32 {
        self.select_visible.get(name).copied().unwrap_or(1)
    }

    /// The value entry pre-selected for a radio or select field
    pub fn default_selection(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).and_then(OptionField::default_selection)
    }

    /// The field map keeps declaration order.
    pub fn client_mirror(&self) -> Result<ClientMirror, serde_json::Error> {
        let mut fields = serde_json::Map::new();
        for field in &self.fields {
            fields.insert(field.name().to_string(), serde_json::to_value(field)?);
        }
        let not_required: BTreeMap<&str, bool> =
            self.not_required.iter().map(|name| (name.as_str(), true)).collect();

        Ok(ClientMirror {
            fields_json: serde_json::to_string(&fields)?,
            not_required_json: serde_json::to_string(&not_required)?,
            required_messages_json: serde_json::to_string(&self.required_messages)?,
        })
    }
}
