//! Relation safety check
//!
//! A relation that is loaded on a record and shares its name with an exposed
//! property must be exposed through a nested entity. Otherwise the property
//! would carry the whole related object, defeating the whitelist. The check
//! turns that silent leak into an [`EntityError::UnsafeRelationExposure`].
//!
//! Loaded relations that no rule mentions are fine: nothing exposes them.

use crate::entity::Entity;
use crate::options::Options;
use vitrine_core::{EntityError, EntityResult, Record, RelationPath};

/// Check every loaded relation of `record`, recursively, against `entity`.
///
/// Does nothing when the options disable the check (`shallow`, `safe(false)`).
///
/// # Examples
///
/// ```
/// use vitrine_entity::{Entity, Options, check_relations};
/// use vitrine_core::{Attributes, JsonRecord, Record, Related};
///
/// struct User {
///     address: JsonRecord,
/// }
///
/// impl Record for User {
///     fn attributes(&self) -> Attributes {
///         Attributes::new()
///     }
///
///     fn loaded_relations(&self) -> Vec<(String, Related<'_>)> {
///         vec![("address".to_string(), Related::One(&self.address))]
///     }
/// }
///
/// let user = User { address: JsonRecord::default() };
/// let leaky = Entity::builder().expose("address").build();
///
/// let error = check_relations(&leaky, &user, &Options::new()).unwrap_err();
/// assert_eq!(error.relation().unwrap().as_str(), "address");
/// assert!(check_relations(&leaky, &user, &Options::new().shallow(true)).is_ok());
/// ```
pub fn check_relations(entity: &Entity, record: &dyn Record, options: &Options) -> EntityResult<()> {
	if !options.safety_enabled() {
		return Ok(());
	}
	check_record(entity, record, options, None, 0)
}

fn check_record(
	entity: &Entity,
	record: &dyn Record,
	options: &Options,
	prefix: Option<&RelationPath>,
	depth: usize,
) -> EntityResult<()> {
	for (name, related) in record.loaded_relations() {
		let Some(rule) = entity.property(&name) else {
			continue;
		};
		let path = RelationPath::join(prefix, &name);
		let Some(reference) = rule.nested() else {
			return Err(EntityError::unsafe_relation(path));
		};

		let max_depth = options.get_settings().max_depth;
		if depth + 1 > max_depth {
			return Err(EntityError::MaxDepthExceeded {
				current_depth: depth + 1,
				max_depth,
			});
		}

		let nested = reference.resolve(rule.key(), options)?;
		for child in related.records() {
			check_record(&nested, child, options, Some(&path), depth + 1)?;
		}
	}
	Ok(())
}
