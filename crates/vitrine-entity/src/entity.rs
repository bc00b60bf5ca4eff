//! Entity specifications
//!
//! An [`Entity`] is the ordered whitelist of properties exposed for one
//! object shape. It is immutable once built and cheap to clone, so a single
//! specification can be shared by any number of concurrent calls.

use crate::rule::PropertyRule;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

#[derive(Default)]
struct EntityInner {
	name: Option<String>,
	properties: IndexMap<String, PropertyRule>,
}

/// Declarative whitelist-and-transform rule set
///
/// # Examples
///
/// ```
/// use vitrine_entity::{Entity, PropertyRule};
///
/// let address = Entity::builder().expose("city").build();
/// let user = Entity::builder()
///     .name("User")
///     .expose("id")
///     .expose_as("location", "hometown")
///     .property(PropertyRule::new("address").using(&address))
///     .build();
///
/// assert_eq!(user.name(), Some("User"));
/// assert_eq!(user.keys().collect::<Vec<_>>(), vec!["id", "location", "address"]);
/// ```
#[derive(Clone, Default)]
pub struct Entity {
	inner: Arc<EntityInner>,
}

impl Entity {
	pub fn builder() -> EntityBuilder {
		EntityBuilder::new()
	}

	pub fn name(&self) -> Option<&str> {
		self.inner.name.as_deref()
	}

	pub fn len(&self) -> usize {
		self.inner.properties.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.properties.is_empty()
	}

	/// Property keys in declaration order
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.inner.properties.keys().map(String::as_str)
	}

	/// Property rules in declaration order
	pub fn properties(&self) -> impl Iterator<Item = &PropertyRule> {
		self.inner.properties.values()
	}

	pub fn property(&self, key: &str) -> Option<&PropertyRule> {
		self.inner.properties.get(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.inner.properties.contains_key(key)
	}

	/// Builder pre-filled with this entity's name and properties
	pub fn to_builder(&self) -> EntityBuilder {
		EntityBuilder {
			name: self.inner.name.clone(),
			properties: self.inner.properties.clone(),
		}
	}

	/// Derive a new entity with `patch` merged in by key.
	///
	/// Existing keys are replaced in place, new keys are appended, and the
	/// receiver is left untouched.
	///
	/// # Examples
	///
	/// ```
	/// use vitrine_entity::{Entity, PropertyRule};
	///
	/// let base = Entity::builder().expose("id").expose("name").build();
	/// let public = base.extend([
	///     PropertyRule::new("id").alias("uid"),
	///     PropertyRule::new("email"),
	/// ]);
	///
	/// assert_eq!(public.keys().collect::<Vec<_>>(), vec!["id", "name", "email"]);
	/// assert_eq!(public.property("id").unwrap().output_key(), "uid");
	/// assert_eq!(base.len(), 2);
	/// ```
	pub fn extend<I>(&self, patch: I) -> Entity
	where
		I: IntoIterator<Item = PropertyRule>,
	{
		self.to_builder().properties(patch).build()
	}

	/// Derive a new entity by applying `configure` to a pre-filled builder
	pub fn extend_with<F>(&self, configure: F) -> Entity
	where
		F: FnOnce(EntityBuilder) -> EntityBuilder,
	{
		configure(self.to_builder()).build()
	}

	/// Derive a new entity without the given keys, keeping the order of the rest
	pub fn except(&self, keys: &[&str]) -> Entity {
		let mut builder = self.to_builder();
		for key in keys {
			builder.properties.shift_remove(*key);
		}
		builder.build()
	}

	/// Whether both handles point to the same specification
	pub fn ptr_eq(&self, other: &Entity) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl fmt::Debug for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Entity")
			.field("name", &self.inner.name)
			.field("properties", &self.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Builder for [`Entity`]
///
/// Adding a rule whose key is already declared replaces that rule without
/// moving it.
#[derive(Clone, Default)]
pub struct EntityBuilder {
	name: Option<String>,
	properties: IndexMap<String, PropertyRule>,
}

impl EntityBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Expose an attribute verbatim
	pub fn expose(self, key: impl Into<String>) -> Self {
		self.property(PropertyRule::new(key))
	}

	/// Expose several attributes verbatim, in order
	pub fn expose_all<I, K>(self, keys: I) -> Self
	where
		I: IntoIterator<Item = K>,
		K: Into<String>,
	{
		self.properties(keys.into_iter().map(PropertyRule::new))
	}

	/// Expose an attribute under another name
	pub fn expose_as(self, key: impl Into<String>, alias: impl Into<String>) -> Self {
		self.property(PropertyRule::new(key).alias(alias))
	}

	pub fn property(mut self, rule: PropertyRule) -> Self {
		self.properties.insert(rule.key().to_string(), rule);
		self
	}

	pub fn properties<I>(self, rules: I) -> Self
	where
		I: IntoIterator<Item = PropertyRule>,
	{
		rules.into_iter().fold(self, EntityBuilder::property)
	}

	pub fn build(self) -> Entity {
		Entity {
			inner: Arc::new(EntityInner {
				name: self.name,
				properties: self.properties,
			}),
		}
	}
}

impl fmt::Debug for EntityBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EntityBuilder")
			.field("name", &self.name)
			.field("properties", &self.properties.keys().collect::<Vec<_>>())
			.finish()
	}
}
