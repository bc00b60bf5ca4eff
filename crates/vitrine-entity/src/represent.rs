//! Representation engine
//!
//! Applies every rule of an entity, in declaration order, to a record or a
//! list of records. Representation is synchronous and pure: it only reads
//! data that is already in memory.
//!
//! Without an entity nothing is exposed: a single record represents as
//! `None` and a list as an empty list.

use crate::entity::Entity;
use crate::evaluator::evaluate;
use crate::options::Options;
use crate::safety::check_relations;
use crate::scope::Scope;
use serde_json::Value;
use vitrine_core::{Attributes, EntityResult, Record};

/// Represent one record, or `None` when no entity is given
///
/// # Examples
///
/// ```
/// use vitrine_entity::{Entity, Options, PropertyRule, represent};
/// use vitrine_core::JsonRecord;
/// use serde_json::{Value, json};
///
/// let entity = Entity::builder()
///     .expose("id")
///     .property(
///         PropertyRule::new("location")
///             .alias("hometown")
///             .when_flag("include_location"),
///     )
///     .build();
/// let record = JsonRecord::from_value(json!({"id": 1, "location": "SF"})).unwrap();
///
/// let plain = represent(Some(&entity), &record, &Options::new()).unwrap().unwrap();
/// assert_eq!(Value::Object(plain), json!({"id": 1}));
///
/// let options = Options::new().flag("include_location", true);
/// let detailed = represent(Some(&entity), &record, &options).unwrap().unwrap();
/// assert_eq!(Value::Object(detailed), json!({"id": 1, "hometown": "SF"}));
///
/// assert!(represent(None, &record, &Options::new()).unwrap().is_none());
/// ```
pub fn represent(
	entity: Option<&Entity>,
	record: &dyn Record,
	options: &Options,
) -> EntityResult<Option<Attributes>> {
	match entity {
		Some(entity) => entity.represent(record, options).map(Some),
		None => Ok(None),
	}
}

/// Represent a list of records, or an empty list when no entity is given
pub fn represent_many<R: Record>(
	entity: Option<&Entity>,
	records: &[R],
	options: &Options,
) -> EntityResult<Vec<Value>> {
	match entity {
		Some(entity) => entity.represent_many(records, options),
		None => Ok(Vec::new()),
	}
}

impl Entity {
	/// Represent one record with this entity.
	///
	/// The relation safety check runs first, over the whole loaded graph,
	/// unless the options disable it. Nested representation is driven only
	/// by the entity's nested rules.
	pub fn represent(&self, record: &dyn Record, options: &Options) -> EntityResult<Attributes> {
		check_relations(self, record, options)?;
		represent_record(self, record, options, Scope::entry(options))
	}

	/// Represent a list of records with this entity.
	///
	/// Elements whose representation is empty are removed rather than kept
	/// as placeholders, so the output may be shorter than the input.
	pub fn represent_many<R: Record>(&self, records: &[R], options: &Options) -> EntityResult<Vec<Value>> {
		let records: Vec<&dyn Record> = records.iter().map(|record| record as &dyn Record).collect();
		for record in &records {
			check_relations(self, *record, options)?;
		}
		represent_records(self, &records, options, Scope::entry(options))
	}
}

pub(crate) fn represent_record(
	entity: &Entity,
	record: &dyn Record,
	options: &Options,
	scope: Scope,
) -> EntityResult<Attributes> {
	let attributes = record.attributes();
	let mut output = Attributes::new();
	for rule in entity.properties() {
		if let Some((key, value)) = evaluate(rule, record, &attributes, options, scope)? {
			output.insert(key, value);
		}
	}
	Ok(output)
}

pub(crate) fn represent_records(
	entity: &Entity,
	records: &[&dyn Record],
	options: &Options,
	scope: Scope,
) -> EntityResult<Vec<Value>> {
	let mut output = Vec::with_capacity(records.len());
	for (index, record) in records.iter().enumerate() {
		let represented = represent_record(entity, *record, options, scope)?;
		if represented.is_empty() {
			tracing::trace!(index, depth = scope.depth(), "dropping element with empty representation");
			continue;
		}
		output.push(Value::Object(represented));
	}
	Ok(output)
}
