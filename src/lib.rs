//! # Vitrine
//!
//! Declarative, whitelist-based entities for exposing data objects through
//! APIs, inspired by Grape::Entity.
//!
//! An entity names exactly which properties of a record leave the system,
//! under which keys, under which conditions and with which nested entities
//! for related records. Anything the entity does not name is never emitted.
//!
//! ## Crates
//!
//! - [`vitrine_core`]: host record contract, relation paths, errors, settings
//! - `vitrine_entity`: entities, representation, safety check, auto-loading
//! - `vitrine_test`: in-memory records and fixtures (feature `test`)
//!
//! ## Feature Flags
//!
//! - `entity` (default) - The entity engine
//! - `test` - Testing utilities
//! - `full` - All features enabled
//!
//! ## Quick Example
//!
//! ```rust
//! use vitrine::prelude::*;
//! use serde_json::json;
//!
//! let address = Entity::builder().expose("city").build();
//! let user = Entity::builder()
//!     .expose("id")
//!     .property(PropertyRule::new("address").using(&address))
//!     .build();
//!
//! let record = JsonRecord::from_value(json!({
//!     "id": 1,
//!     "password_hash": "...",
//!     "address": {"city": "Paris", "street": "Rue 1"},
//! }))
//! .unwrap();
//!
//! let output = user.represent(&record, &Options::new()).unwrap();
//! assert_eq!(serde_json::Value::Object(output), json!({"id": 1, "address": {"city": "Paris"}}));
//! ```

pub use vitrine_core as core;
pub use vitrine_core::{
	Attributes, EntityError, EntityResult, EntitySettings, JsonRecord, LoadError, LoadRelations,
	Record, Related, RelationPath, SettingsError, is_present,
};

#[cfg(feature = "entity")]
pub use vitrine_entity as entity;
#[cfg(feature = "entity")]
pub use vitrine_entity::{
	Entity, EntityBuilder, EntityRef, EntityRegistry, Exposable, Options, PropertyRule, RuleKind,
	ValueSource, check_relations, detect_missing, load_missing, present, present_many, represent,
	represent_many, to_json_many,
};

#[cfg(feature = "test")]
pub use vitrine_test as test;

/// Common imports for hosts exposing records through entities
pub mod prelude {
	pub use crate::{
		Attributes, EntityError, EntityResult, EntitySettings, JsonRecord, LoadRelations, Record,
		Related, RelationPath,
	};

	#[cfg(feature = "entity")]
	pub use crate::{Entity, EntityRegistry, Exposable, Options, PropertyRule, present, represent};

	// External
	pub use async_trait::async_trait;
	pub use serde_json::{Value, json};
}
