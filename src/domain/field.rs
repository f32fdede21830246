//! Typed option field model.
//!
//! Every field shares a [`FieldCommon`] identity (name, label, default and
//! resolved values). Text fields carry an optional validation pattern, while
//! radio and select fields carry an ordered list of [`FieldValue`] choices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a plugin as assigned by the plugin registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginId(pub i64);

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of form element used to render a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "text_element", alias = "text")]
    Text,
    #[serde(rename = "radio_element", alias = "radio")]
    Radio,
    #[serde(rename = "select_element", alias = "select")]
    Select,
}

impl FieldKind {
    /// Radio and select fields choose from a declared list of values
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Radio | Self::Select)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Radio => write!(f, "radio"),
            Self::Select => write!(f, "select"),
        }
    }
}

/// One selectable entry of a radio or select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    /// Value stored when this entry is chosen
    pub value: String,
    /// Text shown to the user, falls back to `value`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    /// Whether this entry is pre-selected when nothing has been stored
    #[serde(default, alias = "default_selection")]
    pub is_default: bool,
}

impl FieldValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display_value: None,
            is_default: false,
        }
    }

    pub fn with_display(mut self, display_value: impl Into<String>) -> Self {
        self.display_value = Some(display_value.into());
        self
    }

    pub fn selected_by_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Text to render for this entry
    pub fn display(&self) -> &str {
        self.display_value.as_deref().unwrap_or(&self.value)
    }
}

/// Attributes shared by every field kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCommon {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Identifier of the persisted option backing this field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Effective value, set when persisted values are resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextField {
    #[serde(flatten)]
    pub common: FieldCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_regex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceField {
    #[serde(flatten)]
    pub common: FieldCommon,
    pub values: Vec<FieldValue>,
}

impl ChoiceField {
    /// The first entry flagged as the default selection
    pub fn default_selection(&self) -> Option<&FieldValue> {
        self.values.iter().find(|v| v.is_default)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.value == value)
    }
}

/// A declared plugin option field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum OptionField {
    #[serde(rename = "text_element")]
    Text(TextField),
    #[serde(rename = "radio_element")]
    Radio(ChoiceField),
    #[serde(rename = "select_element")]
    Select(ChoiceField),
}

impl OptionField {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Radio(_) => FieldKind::Radio,
            Self::Select(_) => FieldKind::Select,
        }
    }

    pub fn common(&self) -> &FieldCommon {
        match self {
            Self::Text(text) => &text.common,
            Self::Radio(choice) | Self::Select(choice) => &choice.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut FieldCommon {
        match self {
            Self::Text(text) => &mut text.common,
            Self::Radio(choice) | Self::Select(choice) => &mut choice.common,
        }
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }

    pub fn label(&self) -> Option<&str> {
        self.common().label.as_deref()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.common().default_value.as_deref()
    }

    pub fn id(&self) -> Option<i64> {
        self.common().id
    }

    pub fn value(&self) -> Option<&str> {
        self.common().value.as_deref()
    }

    /// Declared choices; empty for text fields
    pub fn values(&self) -> &[FieldValue] {
        match self {
            Self::Text(_) => &[],
            Self::Radio(choice) | Self::Select(choice) => &choice.values,
        }
    }

    pub fn as_choice(&self) -> Option<&ChoiceField> {
        match self {
            Self::Text(_) => None,
            Self::Radio(choice) | Self::Select(choice) => Some(choice),
        }
    }

    pub fn default_selection(&self) -> Option<&FieldValue> {
        self.as_choice().and_then(ChoiceField::default_selection)
    }

    pub fn validation_regex(&self) -> Option<&str> {
        match self {
            Self::Text(text) => text.validation_regex.as_deref(),
            _ => None,
        }
    }
}

/// Presentation and validation metadata attached to a field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMetadata {
    pub header: Option<String>,
    pub required_message: Option<String>,
    pub required: bool,
    pub multiple: bool,
    pub visible_rows: u32,
}

impl Default for FieldMetadata {
    fn default() -> Self {
        Self {
            header: None,
            required_message: None,
            required: true,
            multiple: false,
            visible_rows: 1,
        }
    }
}

/// Option value as stored for a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedOption {
    pub id: i64,
    pub option_name: String,
    pub option_value: String,
}

impl PersistedOption {
    pub fn new(id: i64, option_name: impl Into<String>, option_value: impl Into<String>) -> Self {
        Self {
            id,
            option_name: option_name.into(),
            option_value: option_value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gender() -> OptionField {
        OptionField::Radio(ChoiceField {
            common: FieldCommon {
                name: "Gender".to_string(),
                label: None,
                default_value: None,
                id: None,
                value: None,
            },
            values: vec![
                FieldValue::new("F").with_display("Female"),
                FieldValue::new("M").with_display("Male"),
                FieldValue::new("O").with_display("Other").selected_by_default(),
            ],
        })
    }

    #[test]
    fn test_default_selection_is_explicit() {
        let field = gender();
        assert_eq!(field.kind(), FieldKind::Radio);
        assert_eq!(field.default_selection().map(|v| v.value.as_str()), Some("O"));
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let json = serde_json::to_value(gender()).unwrap();
        assert_eq!(json["type"], "radio_element");
        assert_eq!(json["name"], "Gender");
        assert_eq!(json["values"][2]["is_default"], true);
        assert!(json.get("value").is_none());
    }

    #[test]
    fn test_field_value_accepts_default_selection_key() {
        let value: FieldValue =
            serde_json::from_str(r#"{"value": "NYC", "display_value": "New York", "default_selection": true}"#)
                .unwrap();
        assert!(value.is_default);
        assert_eq!(value.display(), "New York");
        assert_eq!(FieldValue::new("LA").display(), "LA");
    }

    #[test]
    fn test_kind_parses_short_names() {
        let kind: FieldKind = serde_json::from_str("\"select\"").unwrap();
        assert_eq!(kind, FieldKind::Select);
        let kind: FieldKind = serde_json::from_str("\"text_element\"").unwrap();
        assert_eq!(kind, FieldKind::Text);
        assert!(!kind.is_choice());
    }

    #[test]
    fn test_metadata_defaults() {
        let meta = FieldMetadata::default();
        assert!(meta.required);
        assert!(!meta.multiple);
        assert_eq!(meta.visible_rows, 1);
    }
}
