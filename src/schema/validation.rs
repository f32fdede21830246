//! Validation of submitted option values against a form description

use crate::domain::OptionField;
use crate::schema::description::FormDescription;
use crate::schema::error::SubmissionError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value submitted for one field: a single string or a list for multi-selects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmittedValue {
    Single(String),
    Multiple(Vec<String>),
}

/// Submitted form values keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission(HashMap<String, SubmittedValue>);

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), SubmittedValue::Single(value.into()));
    }

    pub fn insert_many<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.0.insert(name.into(), SubmittedValue::Multiple(values));
    }

    /// Submitted values for `name`, skipping blank entries. Values are not trimmed.
    pub fn values(&self, name: &str) -> Vec<&str> {
        let raw: Vec<&str> = match self.0.get(name) {
            Some(SubmittedValue::Single(value)) => vec![value.as_str()],
            Some(SubmittedValue::Multiple(values)) => values.iter().map(String::as_str).collect(),
            None => Vec::new(),
        };
        raw.into_iter().filter(|v| !v.trim().is_empty()).collect()
    }
}

impl FormDescription {
    /// Check a submission, collecting every problem found.
    ///
    /// Names that are not declared fields are ignored.
    pub fn validate_submission(&self, submission: &Submission) -> Result<(), Vec<SubmissionError>> {
        let mut errors = Vec::new();

        for field in &self.fields {
            let name = field.name();
            let submitted = submission.values(name);

            if submitted.is_empty() {
                if self.is_required(name) {
                    errors.push(SubmissionError::Required {
                        field: name.to_string(),
                        message: self.required_message(name),
                    });
                }
                continue;
            }

            let multiple = matches!(field, OptionField::Select(_)) && self.is_multiple(name);
            if submitted.len() > 1 && !multiple {
                errors.push(SubmissionError::TooManyValues {
                    field: name.to_string(),
                    count: submitted.len(),
                });
            }

            match field {
                OptionField::Text(text) => {
                    if let Some(pattern) = &text.validation_regex {
                        Self::check_pattern(name, pattern, &submitted, &mut errors);
                    }
                }
                OptionField::Radio(choice) | OptionField::Select(choice) => {
                    for value in &submitted {
                        if !choice.contains(value) {
                            errors.push(SubmissionError::UnknownChoice {
                                field: name.to_string(),
                                value: value.to_string(),
                            });
                        }
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check_pattern(name: &str, pattern: &str, submitted: &[&str], errors: &mut Vec<SubmissionError>) {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => {
                tracing::warn!("Skipping invalid validation pattern for field '{}': {}", name, e);
                return;
            }
        };
        for value in submitted {
            if !re.is_match(value) {
                errors.push(SubmissionError::Pattern {
                    field: name.to_string(),
                    pattern: pattern.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldKind, FieldValue};
    use crate::schema::{FieldArgs, OptionSchemaBuilder};

    fn description() -> FormDescription {
        let mut builder = OptionSchemaBuilder::new();
        builder
            .add_field(
                FieldKind::Text,
                FieldArgs::named("service_id").with_validation_regex(r"^\d+$"),
            )
            .unwrap();
        builder.add_field(FieldKind::Text, FieldArgs::named("email")).unwrap();
        builder.add_required_message("email", "You must enter an email");
        builder.add_field(FieldKind::Text, FieldArgs::named("Bio")).unwrap();
        builder.set_field_optional("Bio");
        builder
            .add_field(
                FieldKind::Radio,
                FieldArgs::named("Gender")
                    .with_values(vec![FieldValue::new("F"), FieldValue::new("M"), FieldValue::new("O")]),
            )
            .unwrap();
        builder
            .add_field(
                FieldKind::Select,
                FieldArgs::named("City")
                    .with_values(vec![FieldValue::new("NYC"), FieldValue::new("LA"), FieldValue::new("MSP")]),
            )
            .unwrap();
        builder.set_select_multiple("City", true, 3);
        builder.build_description(false)
    }

    fn valid_submission() -> Submission {
        let mut submission = Submission::new();
        submission.insert("service_id", "42");
        submission.insert("email", "a@b.com");
        submission.insert("Gender", "O");
        submission.insert_many("City", ["NYC", "LA"]);
        submission
    }

    #[test]
    fn test_valid_submission() {
        assert!(description().validate_submission(&valid_submission()).is_ok());
    }

    #[test]
    fn test_missing_required_uses_custom_message() {
        let mut submission = valid_submission();
        submission.insert("email", "   ");

        let errors = description().validate_submission(&submission).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "email");
        assert_eq!(errors[0].to_string(), "You must enter an email");
    }

    #[test]
    fn test_missing_required_uses_default_message() {
        let mut submission = valid_submission();
        submission.insert("Gender", "");

        let errors = description().validate_submission(&submission).unwrap_err();
        assert_eq!(
            errors,
            vec![SubmissionError::Required {
                field: "Gender".to_string(),
                message: "Please enter a value for the field 'Gender'".to_string(),
            }]
        );
    }

    #[test]
    fn test_choice_checks() {
        let mut submission = valid_submission();
        submission.insert_many("Gender", ["F", "M"]);
        submission.insert_many("City", ["NYC", "Paris"]);

        let errors = description().validate_submission(&submission).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&SubmissionError::TooManyValues {
            field: "Gender".to_string(),
            count: 2,
        }));
        assert!(errors.contains(&SubmissionError::UnknownChoice {
            field: "City".to_string(),
            value: "Paris".to_string(),
        }));
    }

    #[test]
    fn test_pattern_mismatch() {
        let mut submission = valid_submission();
        submission.insert("service_id", "abc");

        let errors = description().validate_submission(&submission).unwrap_err();
        assert!(matches!(&errors[0], SubmissionError::Pattern { field, .. } if field == "service_id"));
    }

    #[test]
    fn test_surrounding_whitespace_is_not_ignored() {
        let mut submission = valid_submission();
        submission.insert("service_id", " 42 ");
        submission.insert("Gender", "O  ");

        let errors = description().validate_submission(&submission).unwrap_err();
        assert_eq!(
            errors,
            vec![
                SubmissionError::Pattern {
                    field: "service_id".to_string(),
                    pattern: r"^\d+$".to_string(),
                },
                SubmissionError::UnknownChoice {
                    field: "Gender".to_string(),
                    value: "O  ".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_submission_parses_single_and_multiple_values() {
        let submission: Submission =
            serde_json::from_str(r#"{"email": "a@b.com", "City": ["NYC", " ", "LA"]}"#).unwrap();
        assert_eq!(submission.values("email"), vec!["a@b.com"]);
        assert_eq!(submission.values("City"), vec!["NYC", "LA"]);
        assert!(submission.values("unknown").is_empty());
    }
}
