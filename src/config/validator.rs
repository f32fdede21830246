use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::config::{FieldDefinition, PluginConfig, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_plugins(&settings.plugins) {
            errors.extend(e);
        }

        for (idx, plugin) in settings.plugins.iter().enumerate() {
            if let Err(e) = Self::validate_fields(idx, plugin) {
                errors.extend(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_plugins(plugins: &[PluginConfig]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_folders = HashMap::new();
        let mut seen_ids = HashMap::new();

        for (idx, plugin) in plugins.iter().enumerate() {
            if plugin.folder_name.trim().is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "plugins[{}].folder_name",
                    idx
                )));
            } else if let Some(prev_idx) = seen_folders.insert(&plugin.folder_name, idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Plugin folder '{}' appears at indices {} and {}",
                    plugin.folder_name, prev_idx, idx
                )));
            }

            if let Some(prev_idx) = seen_ids.insert(plugin.id, idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Plugin id {} appears at indices {} and {}",
                    plugin.id, prev_idx, idx
                )));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_fields(plugin_idx: usize, plugin: &PluginConfig) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_names = HashSet::new();

        for (idx, field) in plugin.fields.iter().enumerate() {
            let path = format!("plugins[{}].fields[{}]", plugin_idx, idx);
            Self::validate_field(&path, field, &mut errors);

            // Redeclaring a field replaces the earlier one
            if let Some(name) = &field.name {
                if !seen_names.insert(name.as_str()) {
                    tracing::warn!(
                        "Field '{}' of plugin '{}' is declared more than once, the last declaration wins",
                        name,
                        plugin.folder_name
                    );
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_field(path: &str, field: &FieldDefinition, errors: &mut Vec<ValidationError>) {
        if field.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            errors.push(ValidationError::MissingField(format!("{}.name", path)));
        }

        if field.kind.is_choice() {
            match &field.values {
                None => errors.push(ValidationError::MissingField(format!("{}.values", path))),
                Some(values) if values.is_empty() => errors.push(ValidationError::InvalidValue {
                    field: format!("{}.values", path),
                    reason: "At least one value must be declared".to_string(),
                }),
                Some(_) => {}
            }
            if field.validation_regex.is_some() {
                errors.push(ValidationError::InvalidValue {
                    field: format!("{}.validation_regex", path),
                    reason: format!("Not supported on {} fields", field.kind),
                });
            }
        } else if let Some(pattern) = &field.validation_regex {
            if let Err(e) = regex::Regex::new(pattern) {
                errors.push(ValidationError::InvalidValue {
                    field: format!("{}.validation_regex", path),
                    reason: e.to_string(),
                });
            }
        }

        if field.visible_rows == 0 {
            errors.push(ValidationError::InvalidValue {
                field: format!("{}.visible_rows", path),
                reason: "Visible rows must be greater than 0".to_string(),
            });
        }
    }
}
