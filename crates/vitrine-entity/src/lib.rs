//! # vitrine-entity
//!
//! Declarative, whitelist-based entities for exposing data objects.
//!
//! An [`Entity`] lists the properties of a record that may leave the system
//! and how each one is shaped. Anything not listed is never emitted, so a new
//! column on a database row cannot leak by accident.
//!
//! ## Features
//!
//! - **Property rules**: plain inclusion, renaming, conditional inclusion,
//!   nested entities for relations, computed values
//! - **Composition**: derive entities from others with [`Entity::extend`]
//! - **Relation safety check**: a loaded relation exposed without a nested
//!   entity is an error, not a silent dump of the related object
//! - **Auto-loading**: [`present`] loads the relations an entity needs
//!   before representing the record
//!
//! ## Examples
//!
//! ```rust
//! use vitrine_entity::{Entity, Options, PropertyRule};
//! use vitrine_core::JsonRecord;
//! use serde_json::{Value, json};
//!
//! let address = Entity::builder().expose("city").build();
//! let user = Entity::builder()
//!     .expose("id")
//!     .expose_as("full_name", "name")
//!     .property(PropertyRule::new("address").using(&address))
//!     .property(PropertyRule::new("is_admin").value(|record, _| {
//!         Value::Bool(record.attributes().get("role") == Some(&json!("admin")))
//!     }))
//!     .build();
//!
//! let record = JsonRecord::from_value(json!({
//!     "id": 1,
//!     "full_name": "Ann Smith",
//!     "password_hash": "...",
//!     "role": "admin",
//!     "address": {"city": "Paris", "street": "Rue 1"},
//! }))
//! .unwrap();
//!
//! let output = user.represent(&record, &Options::new()).unwrap();
//! assert_eq!(
//!     Value::Object(output),
//!     json!({
//!         "id": 1,
//!         "name": "Ann Smith",
//!         "address": {"city": "Paris"},
//!         "is_admin": true,
//!     })
//! );
//! ```

pub mod autoload;
pub mod entity;
mod evaluator;
pub mod expose;
pub mod options;
pub mod present;
pub mod registry;
pub mod represent;
pub mod rule;
pub mod safety;
mod scope;

pub use autoload::detect_missing;
pub use entity::{Entity, EntityBuilder};
pub use expose::{Exposable, to_json_many};
pub use options::Options;
pub use present::{load_missing, present, present_many};
pub use registry::EntityRegistry;
pub use represent::{represent, represent_many};
pub use rule::{ComputeFn, ConditionFn, EntityRef, PropertyRule, RuleKind, ValueSource};
pub use safety::check_relations;
