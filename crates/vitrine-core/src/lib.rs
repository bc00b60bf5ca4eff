//! # vitrine-core
//!
//! Foundational types shared by every Vitrine crate.
//!
//! This crate defines the contract between the entity engine and the host data
//! model, without knowing anything about how the host stores or fetches data:
//!
//! - **Records**: the [`Record`] trait exposes plain attributes and currently
//!   loaded relations, [`LoadRelations`] materializes missing relations
//! - **Relation paths**: dot-joined [`RelationPath`]s such as `address.city`
//! - **Errors**: the [`EntityError`] taxonomy shared by representation and
//!   presentation
//! - **Settings**: [`EntitySettings`], loadable from TOML
//!
//! ## Examples
//!
//! ```rust
//! use vitrine_core::{JsonRecord, Record};
//! use serde_json::json;
//!
//! let record = JsonRecord::from_value(json!({"id": 1, "name": "Alice"})).unwrap();
//! assert_eq!(record.attributes()["name"], json!("Alice"));
//! assert!(record.loaded_relations().is_empty());
//! ```

pub mod error;
pub mod path;
pub mod record;
pub mod settings;

pub use error::{EntityError, EntityResult, LoadError};
pub use path::RelationPath;
pub use record::{Attributes, JsonRecord, LoadRelations, Record, Related, is_present};
pub use settings::{EntitySettings, SettingsError};
