//! Option schema: field declarations, value resolution and form descriptions.

pub mod builder;
pub mod description;
pub mod error;
pub mod validation;

pub use builder::{default_required_message, FieldArgs, OptionSchemaBuilder};
pub use description::{ClientMirror, FormDescription};
pub use error::{SchemaError, SubmissionError};
pub use validation::{Submission, SubmittedValue};
