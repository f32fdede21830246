//! Option schema builder.
//!
//! Fields and their metadata are accumulated in any order, then merged with
//! the persisted values of a plugin:
//!
//! ```rust
//! use optionform::domain::{FieldKind, PersistedOption, PluginId};
//! use optionform::schema::{FieldArgs, OptionSchemaBuilder};
//!
//! let mut builder = OptionSchemaBuilder::new();
//! builder.add_field(FieldKind::Text, FieldArgs::named("email")).unwrap();
//! builder.add_field_header("email", "Where should we send reports?");
//! builder
//!     .add_field(FieldKind::Text, FieldArgs::named("Location").with_default("New York"))
//!     .unwrap();
//!
//! builder.resolve_values(vec![PersistedOption::new(7, "email", "a@b.com")], PluginId(1));
//!
//! assert_eq!(builder.field("email").unwrap().value(), Some("a@b.com"));
//! assert_eq!(builder.field("Location").unwrap().value(), Some("New York"));
//! ```

use crate::domain::{
    ChoiceField, FieldCommon, FieldKind, FieldMetadata, FieldValue, OptionField, PersistedOption,
    PluginId, TextField,
};
use crate::schema::description::FormDescription;
use crate::schema::error::SchemaError;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Message shown when a required field is left empty and no custom message was set
pub fn default_required_message(name: &str) -> String {
    format!("Please enter a value for the field '{}'", name)
}

/// Arguments for declaring a field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldArgs {
    pub name: Option<String>,
    /// Required for radio and select fields
    pub values: Option<Vec<FieldValue>>,
    pub default_value: Option<String>,
    pub label: Option<String>,
    pub id: Option<i64>,
    pub value: Option<String>,
    /// Text fields only
    pub validation_regex: Option<String>,
}

impl FieldArgs {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_values(mut self, values: Vec<FieldValue>) -> Self {
        self.values = Some(values);
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_validation_regex(mut self, pattern: impl Into<String>) -> Self {
        self.validation_regex = Some(pattern.into());
        self
    }
}

#[derive(Debug, Clone)]
struct Resolution {
    plugin_id: PluginId,
    persisted: HashMap<String, PersistedOption>,
    fields: Vec<OptionField>,
}

/// Accumulates option fields and metadata for one plugin form.
#[derive(Debug, Clone, Default)]
pub struct OptionSchemaBuilder {
    /// Declared fields in insertion order
    fields: Vec<OptionField>,
    positions: HashMap<String, usize>,
    metadata: BTreeMap<String, FieldMetadata>,
    resolution: Option<Resolution>,
}

impl OptionSchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field, replacing any earlier declaration with the same name.
    ///
    /// Returns the registered field, resolved if values were already merged.
    pub fn add_field(&mut self, kind: FieldKind, args: FieldArgs) -> Result<&OptionField, SchemaError> {
        let name = args
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(SchemaError::MissingName { kind })?;

        let common = FieldCommon {
            name: name.clone(),
            label: args.label,
            default_value: args.default_value,
            id: args.id,
            value: args.value,
        };

        let field = match kind {
            FieldKind::Text => {
                if let Some(pattern) = &args.validation_regex {
                    Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
                        field: name.clone(),
                        reason: e.to_string(),
                    })?;
                }
                OptionField::Text(TextField {
                    common,
                    validation_regex: args.validation_regex,
                })
            }
            FieldKind::Radio | FieldKind::Select => {
                if args.validation_regex.is_some() {
                    return Err(SchemaError::UnsupportedPattern { field: name, kind });
                }
                let values = args.values.ok_or_else(|| SchemaError::MissingValues {
                    field: name.clone(),
                    kind,
                })?;
                let choice = ChoiceField { common, values };
                if kind == FieldKind::Radio {
                    OptionField::Radio(choice)
                } else {
                    OptionField::Select(choice)
                }
            }
        };

        let idx = match self.positions.get(&name).copied() {
            Some(idx) => {
                tracing::debug!("Replacing earlier declaration of option field '{}'", name);
                self.fields[idx] = field;
                idx
            }
            None => {
                let idx = self.fields.len();
                self.positions.insert(name, idx);
                self.fields.push(field);
                idx
            }
        };

        if let Some(resolution) = &mut self.resolution {
            tracing::warn!("Option field declared after values were resolved, re-applying persisted values");
            resolution.fields = merge_fields(&self.fields, &resolution.persisted);
        }

        Ok(&self.fields()[idx])
    }

    pub fn add_field_header(&mut self, name: &str, text: impl Into<String>) {
        self.metadata_mut(name).header = Some(text.into());
    }

    pub fn set_field_optional(&mut self, name: &str) {
        self.set_field_required(name, false);
    }

    pub fn set_field_required(&mut self, name: &str, required: bool) {
        self.metadata_mut(name).required = required;
    }

    pub fn add_required_message(&mut self, name: &str, text: impl Into<String>) {
        self.metadata_mut(name).required_message = Some(text.into());
    }

    /// Configure select cardinality. A `visible_rows` of zero is treated as one.
    pub fn set_select_multiple(&mut self, name: &str, enabled: bool, visible_rows: u32) {
        let meta = self.metadata_mut(name);
        meta.multiple = enabled;
        meta.visible_rows = visible_rows.max(1);
    }

    /// Merge persisted values into the declared fields.
    ///
    /// A persisted entry sets both `id` and `value`; otherwise a declared
    /// `default_value` becomes the value; otherwise the field is left as
    /// declared. Duplicate option names keep the last entry. Resolution always
    /// starts from the declared fields, so repeating it with the same input
    /// yields the same result.
    pub fn resolve_values<I>(&mut self, persisted_options: I, plugin_id: PluginId)
    where
        I: IntoIterator<Item = PersistedOption>,
    {
        let persisted: HashMap<String, PersistedOption> = persisted_options
            .into_iter()
            .map(|option| (option.option_name.clone(), option))
            .collect();

        let fields = merge_fields(&self.fields, &persisted);
        tracing::debug!(
            "Resolved {} option fields for plugin {} against {} persisted values",
            fields.len(),
            plugin_id,
            persisted.len()
        );

        self.resolution = Some(Resolution {
            plugin_id,
            persisted,
            fields,
        });
    }

    /// Resolved fields after [`resolve_values`](Self::resolve_values), declared fields before.
    pub fn fields(&self) -> &[OptionField] {
        self.resolution
            .as_ref()
            .map(|r| r.fields.as_slice())
            .unwrap_or(&self.fields)
    }

    pub fn field(&self, name: &str) -> Option<&OptionField> {
        self.positions.get(name).map(|&idx| &self.fields()[idx])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    pub fn plugin_id(&self) -> Option<PluginId> {
        self.resolution.as_ref().map(|r| r.plugin_id)
    }

    pub fn metadata(&self, name: &str) -> Option<&FieldMetadata> {
        self.metadata.get(name)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.metadata.get(name).and_then(|m| m.header.as_deref())
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.metadata.get(name).map_or(true, |m| m.required)
    }

    pub fn required_message(&self, name: &str) -> String {
        self.metadata
            .get(name)
            .and_then(|m| m.required_message.clone())
            .unwrap_or_else(|| default_required_message(name))
    }

    pub fn is_multiple(&self, name: &str) -> bool {
        self.metadata.get(name).map_or(false, |m| m.multiple)
    }

    pub fn visible_rows(&self, name: &str) -> u32 {
        self.metadata.get(name).map_or(1, |m| m.visible_rows)
    }

    /// Snapshot the schema for rendering. `is_admin` is passed through untouched.
    pub fn build_description(&self, is_admin: bool) -> FormDescription {
        let mut headers = BTreeMap::new();
        let mut not_required = BTreeSet::new();
        let mut required_messages = BTreeMap::new();
        let mut select_multiple = BTreeMap::new();
        let mut select_visible = BTreeMap::new();

        for (name, meta) in &self.metadata {
            if let Some(header) = &meta.header {
                headers.insert(name.clone(), header.clone());
            }
            if !meta.required {
                not_required.insert(name.clone());
            }
            if let Some(message) = &meta.required_message {
                required_messages.insert(name.clone(), message.clone());
            }
            if meta.multiple {
                select_multiple.insert(name.clone(), true);
            }
            if meta.visible_rows != 1 {
                select_visible.insert(name.clone(), meta.visible_rows);
            }
        }

        FormDescription {
            fields: self.fields().to_vec(),
            headers,
            not_required,
            required_messages,
            select_multiple,
            select_visible,
            plugin_id: self.plugin_id(),
            is_admin,
        }
    }

    fn metadata_mut(&mut self, name: &str) -> &mut FieldMetadata {
        self.metadata.entry(name.to_string()).or_default()
    }
}

fn merge_fields(
    declared: &[OptionField],
    persisted: &HashMap<String, PersistedOption>,
) -> Vec<OptionField> {
    declared
        .iter()
        .cloned()
        .map(|mut field| {
            let common = field.common_mut();
            if let Some(option) = persisted.get(&common.name) {
                common.id = Some(option.id);
                common.value = Some(option.option_value.clone());
            } else if let Some(default_value) = common.default_value.clone() {
                common.value = Some(default_value);
            }
            field
        })
        .collect()
}
