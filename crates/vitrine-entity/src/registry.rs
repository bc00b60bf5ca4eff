//! Named entity registry
//!
//! Nested rules normally hold their entity directly. When a specification
//! needs to refer to itself (a user's `friends` are users too) or to an
//! entity defined later, the rule names the entity instead and the name is
//! resolved through an [`EntityRegistry`] carried by the call's options.

use crate::entity::Entity;
use std::collections::HashMap;

/// Entities by name
///
/// # Examples
///
/// ```
/// use vitrine_entity::{Entity, EntityRegistry, Options, PropertyRule, represent};
/// use vitrine_core::JsonRecord;
/// use serde_json::json;
///
/// let user = Entity::builder()
///     .expose("name")
///     .property(PropertyRule::new("manager").using_named("User"))
///     .build();
///
/// let mut registry = EntityRegistry::new();
/// registry.register("User", user.clone());
///
/// let record = JsonRecord::from_value(json!({
///     "name": "Ann",
///     "salary": 100,
///     "manager": {"name": "Bob", "salary": 200},
/// })).unwrap();
///
/// let output = represent(Some(&user), &record, &Options::new().registry(registry)).unwrap();
/// assert_eq!(
///     serde_json::Value::Object(output.unwrap()),
///     json!({"name": "Ann", "manager": {"name": "Bob"}})
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
	entities: HashMap<String, Entity>,
}

impl EntityRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an entity, replacing any entity already registered under `name`
	pub fn register(&mut self, name: impl Into<String>, entity: Entity) {
		self.entities.insert(name.into(), entity);
	}

	/// Register an entity under its own name.
	///
	/// Returns `false` and does nothing when the entity is unnamed.
	pub fn register_named(&mut self, entity: Entity) -> bool {
		match entity.name().map(str::to_string) {
			Some(name) => {
				self.register(name, entity);
				true
			}
			None => false,
		}
	}

	pub fn get(&self, name: &str) -> Option<&Entity> {
		self.entities.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entities.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}
}
