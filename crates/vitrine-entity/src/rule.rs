//! Property rules
//!
//! A [`PropertyRule`] describes how one key of an entity is exposed: whether
//! it is included at all (an optional condition), where its value comes from
//! (a plain attribute, a nested entity, or a computed function) and under
//! which name it is emitted.

use crate::entity::Entity;
use crate::options::Options;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use vitrine_core::{EntityError, EntityResult, Record};

/// Predicate deciding at evaluation time whether a property is included
pub type ConditionFn = Arc<dyn Fn(&dyn Record, &Options) -> bool + Send + Sync>;

/// Function computing a property value from the source record.
///
/// `None` omits the property, the same way a missing attribute does.
pub type ComputeFn = Arc<dyn Fn(&dyn Record, &Options) -> Option<Value> + Send + Sync>;

/// Reference to the entity used for a nested property
#[derive(Clone)]
pub enum EntityRef {
	/// The entity itself
	Inline(Entity),
	/// An entity registered under this name in the options' registry
	Named(String),
}

impl EntityRef {
	/// Resolve to a usable entity.
	///
	/// Named references are looked up in the registry carried by `options`;
	/// a missing registry or an unknown name is an invalid specification for
	/// `property`.
	pub fn resolve(&self, property: &str, options: &Options) -> EntityResult<Entity> {
		match self {
			EntityRef::Inline(entity) => Ok(entity.clone()),
			EntityRef::Named(name) => {
				let registry = options.get_registry().ok_or_else(|| {
					EntityError::invalid_specification(
						property,
						format!("no entity registry available to resolve '{}'", name),
					)
				})?;
				registry.get(name).cloned().ok_or_else(|| {
					EntityError::invalid_specification(
						property,
						format!("entity '{}' is not registered", name),
					)
				})
			}
		}
	}
}

impl From<Entity> for EntityRef {
	fn from(entity: Entity) -> Self {
		EntityRef::Inline(entity)
	}
}

impl From<&Entity> for EntityRef {
	fn from(entity: &Entity) -> Self {
		EntityRef::Inline(entity.clone())
	}
}

impl fmt::Debug for EntityRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EntityRef::Inline(entity) => f.debug_tuple("Inline").field(entity).finish(),
			EntityRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
		}
	}
}

/// Where a property's value comes from
#[derive(Clone)]
pub enum ValueSource {
	/// The attribute named by the rule key
	Attribute,
	/// The relation named by the rule key, represented with a nested entity
	Nested(EntityRef),
	/// The return value of a function
	Computed(ComputeFn),
}

impl fmt::Debug for ValueSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ValueSource::Attribute => f.write_str("Attribute"),
			ValueSource::Nested(reference) => f.debug_tuple("Nested").field(reference).finish(),
			ValueSource::Computed(_) => f.write_str("Computed(<fn>)"),
		}
	}
}

/// Classification of a rule by its most significant feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
	/// Attribute exposed verbatim under its own name
	Flag,
	/// Attribute exposed under another name
	Rename,
	/// Attribute exposed only when a condition holds
	Conditional,
	/// Relation represented with a nested entity
	Nested,
	/// Value produced by a function
	Computed,
}

/// One exposed property of an entity
///
/// # Examples
///
/// ```
/// use vitrine_entity::{PropertyRule, RuleKind};
///
/// let rule = PropertyRule::new("location")
///     .alias("hometown")
///     .when_flag("include_location");
///
/// assert_eq!(rule.key(), "location");
/// assert_eq!(rule.output_key(), "hometown");
/// assert_eq!(rule.kind(), RuleKind::Conditional);
/// ```
#[derive(Clone)]
pub struct PropertyRule {
	key: String,
	alias: Option<String>,
	condition: Option<ConditionFn>,
	source: ValueSource,
}

impl PropertyRule {
	/// Expose the attribute `key` verbatim
	pub fn new(key: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			alias: None,
			condition: None,
			source: ValueSource::Attribute,
		}
	}

	/// Emit the property under `alias` instead of its key
	pub fn alias(mut self, alias: impl Into<String>) -> Self {
		self.alias = Some(alias.into());
		self
	}

	/// Include the property only when `condition` holds
	pub fn when<F>(mut self, condition: F) -> Self
	where
		F: Fn(&dyn Record, &Options) -> bool + Send + Sync + 'static,
	{
		self.condition = Some(Arc::new(condition));
		self
	}

	/// Include the property only when the option flag `flag` is truthy
	pub fn when_flag(self, flag: impl Into<String>) -> Self {
		let flag = flag.into();
		self.when(move |_, options| options.is_set(&flag))
	}

	/// Represent the relation `key` with a nested entity
	pub fn using(mut self, entity: impl Into<EntityRef>) -> Self {
		self.source = ValueSource::Nested(entity.into());
		self
	}

	/// Represent the relation `key` with the entity registered as `name`
	pub fn using_named(self, name: impl Into<String>) -> Self {
		self.using(EntityRef::Named(name.into()))
	}

	/// Emit the return value of `compute` instead of the attribute.
	///
	/// `compute` may return a [`Value`] or an `Option<Value>`; `None` omits
	/// the property rather than emitting `null`.
	///
	/// A nested entity takes priority: calling this on a rule that already
	/// has one leaves the rule nested.
	///
	/// # Examples
	///
	/// ```
	/// use vitrine_entity::{Entity, Options, PropertyRule};
	/// use vitrine_core::JsonRecord;
	/// use serde_json::{Value, json};
	///
	/// let entity = Entity::builder()
	///     .property(PropertyRule::new("initial").value(|record, _| {
	///         let name = record.attributes().get("name")?.as_str()?.chars().next()?;
	///         Some(json!(name.to_string()))
	///     }))
	///     .build();
	///
	/// let named = JsonRecord::from_value(json!({"name": "Ann"})).unwrap();
	/// let anonymous = JsonRecord::from_value(json!({})).unwrap();
	/// let options = Options::new();
	/// assert_eq!(Value::Object(entity.represent(&named, &options).unwrap()), json!({"initial": "A"}));
	/// assert!(entity.represent(&anonymous, &options).unwrap().is_empty());
	/// ```
	pub fn value<F, V>(mut self, compute: F) -> Self
	where
		F: Fn(&dyn Record, &Options) -> V + Send + Sync + 'static,
		V: Into<Option<Value>>,
	{
		if matches!(self.source, ValueSource::Nested(_)) {
			tracing::debug!(property = %self.key, "ignoring computed value on nested property");
			return self;
		}
		self.source = ValueSource::Computed(Arc::new(move |record, options| compute(record, options).into()));
		self
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn alias_name(&self) -> Option<&str> {
		self.alias.as_deref()
	}

	/// Name the property is emitted under
	pub fn output_key(&self) -> &str {
		self.alias.as_deref().unwrap_or(&self.key)
	}

	pub fn source(&self) -> &ValueSource {
		&self.source
	}

	/// Nested entity reference, if the rule delegates to one
	pub fn nested(&self) -> Option<&EntityRef> {
		match &self.source {
			ValueSource::Nested(reference) => Some(reference),
			_ => None,
		}
	}

	pub fn is_nested(&self) -> bool {
		self.nested().is_some()
	}

	pub fn is_conditional(&self) -> bool {
		self.condition.is_some()
	}

	pub fn kind(&self) -> RuleKind {
		match (&self.source, &self.condition, &self.alias) {
			(ValueSource::Nested(_), _, _) => RuleKind::Nested,
			(ValueSource::Computed(_), _, _) => RuleKind::Computed,
			(ValueSource::Attribute, Some(_), _) => RuleKind::Conditional,
			(ValueSource::Attribute, None, Some(_)) => RuleKind::Rename,
			(ValueSource::Attribute, None, None) => RuleKind::Flag,
		}
	}

	/// Evaluate the condition; rules without one always apply
	pub fn applies(&self, record: &dyn Record, options: &Options) -> bool {
		self.condition
			.as_ref()
			.is_none_or(|condition| condition(record, options))
	}
}

impl fmt::Debug for PropertyRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PropertyRule")
			.field("key", &self.key)
			.field("alias", &self.alias)
			.field("conditional", &self.condition.is_some())
			.field("source", &self.source)
			.finish()
	}
}
