//! # optionform - Plugin Option Forms
//!
//! optionform lets a plugin declare its configuration fields (text, radio and
//! select), merges those declarations with the values already persisted for
//! the plugin, and produces a serializable form description for a renderer
//! together with the metadata needed to validate submissions.
//!
//! ## Quick Start
//!
//! ```rust
//! use optionform::domain::{FieldKind, FieldValue, PluginId};
//! use optionform::schema::{FieldArgs, OptionSchemaBuilder};
//!
//! let mut builder = OptionSchemaBuilder::new();
//! builder.add_field(FieldKind::Text, FieldArgs::named("email")).unwrap();
//! builder
//!     .add_field(
//!         FieldKind::Radio,
//!         FieldArgs::named("Gender").with_values(vec![
//!             FieldValue::new("F").with_display("Female"),
//!             FieldValue::new("O").with_display("Other").selected_by_default(),
//!         ]),
//!     )
//!     .unwrap();
//! builder.set_field_optional("Gender");
//!
//! builder.resolve_values(Vec::new(), PluginId(1));
//! let description = builder.build_description(false);
//! assert_eq!(description.default_selection("Gender").unwrap().value, "O");
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: typed field model and the plugin lookup / option store ports
//! - **Schema**: the builder, form descriptions and submission validation
//! - **Adapters**: in-memory store and the options page that drives a render
//! - **Config**: settings and plugin definitions loaded from files

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod schema;
