//! Property rule evaluation
//!
//! Evaluation order for one rule:
//!
//! 1. a failing condition omits the property
//! 2. the value comes from the nested entity, the computed function, or the
//!    attribute with the same key, in that order
//! 3. the output key is the alias if there is one, the key otherwise
//!
//! An absent value omits the property; it is never emitted as `null`.

use crate::options::Options;
use crate::represent::{represent_record, represent_records};
use crate::rule::{EntityRef, PropertyRule, ValueSource};
use crate::scope::Scope;
use serde_json::Value;
use vitrine_core::{Attributes, EntityError, EntityResult, JsonRecord, Record, Related};

/// Evaluate one rule against a record.
///
/// `attributes` is the record's attribute snapshot, taken once per record.
/// Returns `None` when the property is omitted.
pub(crate) fn evaluate(
	rule: &PropertyRule,
	record: &dyn Record,
	attributes: &Attributes,
	options: &Options,
	scope: Scope,
) -> EntityResult<Option<(String, Value)>> {
	if !rule.applies(record, options) {
		tracing::trace!(property = rule.key(), "condition not met, omitting");
		return Ok(None);
	}

	let value = match rule.source() {
		ValueSource::Nested(reference) => {
			evaluate_nested(rule, reference, record, attributes, options, scope)?
		}
		ValueSource::Computed(compute) => compute(record, options),
		ValueSource::Attribute => attributes.get(rule.key()).cloned(),
	};

	Ok(value.map(|value| (rule.output_key().to_string(), value)))
}

/// Represent the relation behind a nested rule.
///
/// Loaded relations win over attributes. A to-many relation keeps only
/// elements with a non-empty representation, a to-one relation is always
/// emitted as a mapping, and a missing relation yields no value at all.
fn evaluate_nested(
	rule: &PropertyRule,
	reference: &EntityRef,
	record: &dyn Record,
	attributes: &Attributes,
	options: &Options,
	scope: Scope,
) -> EntityResult<Option<Value>> {
	let entity = reference.resolve(rule.key(), options)?;

	if let Some(related) = record.relation(rule.key()) {
		let scope = scope.child()?;
		return match related {
			Related::One(child) => {
				represent_record(&entity, child, options, scope).map(|output| Some(Value::Object(output)))
			}
			Related::Many(children) => {
				represent_records(&entity, &children, options, scope).map(|output| Some(Value::Array(output)))
			}
		};
	}

	match attributes.get(rule.key()) {
		None | Some(Value::Null) => Ok(None),
		Some(Value::Object(object)) => {
			let child = JsonRecord::new(object.clone());
			represent_record(&entity, &child, options, scope.child()?)
				.map(|output| Some(Value::Object(output)))
		}
		Some(Value::Array(items)) => {
			let children = items
				.iter()
				.map(|item| {
					JsonRecord::from_value(item.clone()).ok_or_else(|| {
						EntityError::invalid_specification(
							rule.key(),
							format!("nested entity cannot represent list element {}", item),
						)
					})
				})
				.collect::<EntityResult<Vec<_>>>()?;
			let children: Vec<&dyn Record> = children.iter().map(|child| child as &dyn Record).collect();
			represent_records(&entity, &children, options, scope.child()?)
				.map(|output| Some(Value::Array(output)))
		}
		Some(other) => Err(EntityError::invalid_specification(
			rule.key(),
			format!("nested entity cannot represent {} value", value_kind(other)),
		)),
	}
}

fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "a list",
		Value::Object(_) => "an object",
	}
}
