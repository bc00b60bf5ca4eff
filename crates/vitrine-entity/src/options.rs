//! Per-call options
//!
//! Options are created for one representation or presentation call and are
//! handed, unchanged, to every condition and computed value down the tree.

use crate::entity::Entity;
use crate::registry::EntityRegistry;
use serde_json::Value;
use std::sync::Arc;
use vitrine_core::{Attributes, EntitySettings, is_present};

/// Options recognized by the engine, plus arbitrary user flags
///
/// # Examples
///
/// ```
/// use vitrine_entity::{Entity, Options};
///
/// let summary = Entity::builder().expose("id").build();
/// let options = Options::new()
///     .with(summary)
///     .shallow(true)
///     .flag("include_location", true);
///
/// assert!(options.resolved_entity().is_some());
/// assert!(!options.safety_enabled());
/// assert!(options.is_set("include_location"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
	entity: Option<Entity>,
	with: Option<Entity>,
	using: Option<Entity>,
	shallow: bool,
	safe: Option<bool>,
	flags: Attributes,
	registry: Option<Arc<EntityRegistry>>,
	settings: Arc<EntitySettings>,
}

impl Options {
	pub fn new() -> Self {
		Self::default()
	}

	/// Entity override, checked first
	pub fn entity(mut self, entity: Entity) -> Self {
		self.entity = Some(entity);
		self
	}

	/// Entity override, checked after `entity`
	pub fn with(mut self, entity: Entity) -> Self {
		self.with = Some(entity);
		self
	}

	/// Entity override, checked after `entity` and `with`
	pub fn using(mut self, entity: Entity) -> Self {
		self.using = Some(entity);
		self
	}

	/// Skip the relation safety check unless `safe` says otherwise
	pub fn shallow(mut self, shallow: bool) -> Self {
		self.shallow = shallow;
		self
	}

	/// Explicitly enable or disable the relation safety check
	pub fn safe(mut self, safe: bool) -> Self {
		self.safe = Some(safe);
		self
	}

	/// Set a user-defined flag for conditions and computed values
	pub fn flag(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.flags.insert(name.into(), value.into());
		self
	}

	/// Registry used to resolve named nested entities
	pub fn registry(mut self, registry: impl Into<Arc<EntityRegistry>>) -> Self {
		self.registry = Some(registry.into());
		self
	}

	pub fn settings(mut self, settings: impl Into<Arc<EntitySettings>>) -> Self {
		self.settings = settings.into();
		self
	}

	/// First entity override among `entity`, `with` and `using`
	pub fn resolved_entity(&self) -> Option<&Entity> {
		self.entity
			.as_ref()
			.or(self.with.as_ref())
			.or(self.using.as_ref())
	}

	pub fn is_shallow(&self) -> bool {
		self.shallow
	}

	/// Whether the relation safety check runs.
	///
	/// An explicit `safe` wins; otherwise `shallow` disables the check and
	/// the settings decide.
	pub fn safety_enabled(&self) -> bool {
		match self.safe {
			Some(safe) => safe,
			None => !self.shallow && self.settings.safe,
		}
	}

	pub fn get_flag(&self, name: &str) -> Option<&Value> {
		self.flags.get(name)
	}

	/// Whether a flag is set to a present value (see [`is_present`]).
	///
	/// Only `null`, `false`, `""` and a missing flag are unset: `0`, `[]` and
	/// `{}` all count as set.
	pub fn is_set(&self, name: &str) -> bool {
		self.flags.get(name).is_some_and(is_present)
	}

	pub fn flags(&self) -> &Attributes {
		&self.flags
	}

	pub fn get_registry(&self) -> Option<&EntityRegistry> {
		self.registry.as_deref()
	}

	pub fn get_settings(&self) -> &EntitySettings {
		&self.settings
	}
}
