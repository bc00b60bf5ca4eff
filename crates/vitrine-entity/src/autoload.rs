//! Relation auto-loading
//!
//! Works out which relations a record still needs before an entity can be
//! represented. A nested property needs loading when its relation is not
//! loaded yet but the record carries a present attribute of the same name.
//! Loaded relations are walked recursively, producing dotted paths such as
//! `address.city`.

use crate::entity::Entity;
use crate::options::Options;
use indexmap::IndexSet;
use vitrine_core::{EntityError, EntityResult, Record, RelationPath, is_present};

/// Relation paths missing on `record`, deduplicated, in declaration order.
///
/// Without a record nothing can be missing.
///
/// # Examples
///
/// ```
/// use vitrine_entity::{Entity, Options, PropertyRule, detect_missing};
/// use vitrine_core::{JsonRecord, RelationPath};
/// use serde_json::json;
///
/// let address = Entity::builder().expose("city").build();
/// let user = Entity::builder()
///     .expose("id")
///     .property(PropertyRule::new("address").using(&address))
///     .property(PropertyRule::new("company").using(&address))
///     .build();
///
/// let record = JsonRecord::from_value(json!({"id": 1, "address": 10, "company": null})).unwrap();
/// let missing = detect_missing(&user, Some(&record), &Options::new()).unwrap();
/// assert_eq!(missing, vec![RelationPath::new("address")]);
/// ```
pub fn detect_missing(
	entity: &Entity,
	record: Option<&dyn Record>,
	options: &Options,
) -> EntityResult<Vec<RelationPath>> {
	let mut missing = IndexSet::new();
	if let Some(record) = record {
		collect_missing(entity, record, options, None, 0, &mut missing)?;
	}
	Ok(missing.into_iter().collect())
}

fn collect_missing(
	entity: &Entity,
	record: &dyn Record,
	options: &Options,
	prefix: Option<&RelationPath>,
	depth: usize,
	missing: &mut IndexSet<RelationPath>,
) -> EntityResult<()> {
	let attributes = record.attributes();
	for rule in entity.properties() {
		let Some(reference) = rule.nested() else {
			continue;
		};
		let path = RelationPath::join(prefix, rule.key());
		let nested = reference.resolve(rule.key(), options)?;

		let Some(related) = record.relation(rule.key()) else {
			if attributes.get(rule.key()).is_some_and(is_present) {
				missing.insert(path);
			}
			continue;
		};

		let max_depth = options.get_settings().max_depth;
		if depth + 1 > max_depth {
			return Err(EntityError::MaxDepthExceeded {
				current_depth: depth + 1,
				max_depth,
			});
		}
		for child in related.records() {
			collect_missing(&nested, child, options, Some(&path), depth + 1, missing)?;
		}
	}
	Ok(())
}
