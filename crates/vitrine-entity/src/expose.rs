//! Default serialization hook
//!
//! Host types implement [`Exposable`] to get a `to_json` that always goes
//! through an entity: the one passed in the options, else the type's
//! default entity, else nothing at all.

use crate::entity::Entity;
use crate::options::Options;
use crate::represent::{represent, represent_many};
use serde_json::Value;
use vitrine_core::{EntityResult, Record};

/// Records with a default entity and an entity-aware `to_json`
///
/// # Examples
///
/// ```
/// use vitrine_entity::{Entity, Exposable, Options};
/// use vitrine_core::{Attributes, Record, Related};
/// use serde_json::json;
///
/// struct Account {
///     attributes: Attributes,
/// }
///
/// impl Record for Account {
///     fn attributes(&self) -> Attributes {
///         self.attributes.clone()
///     }
///
///     fn loaded_relations(&self) -> Vec<(String, Related<'_>)> {
///         Vec::new()
///     }
/// }
///
/// impl Exposable for Account {
///     fn default_entity(&self) -> Option<Entity> {
///         Some(Entity::builder().expose("login").build())
///     }
/// }
///
/// let json = json!({"login": "ann", "password": "secret"});
/// let account = Account { attributes: json.as_object().unwrap().clone() };
///
/// assert_eq!(account.to_json(&Options::new()).unwrap(), json!({"login": "ann"}));
/// ```
pub trait Exposable: Record {
	/// Entity used when the options do not name one
	fn default_entity(&self) -> Option<Entity> {
		None
	}

	/// Serialize through the effective entity.
	///
	/// Resolution order: the options' entity override, then
	/// [`default_entity`](Exposable::default_entity). Without either the
	/// result is `null`; the plain attributes are never returned.
	fn to_json(&self, options: &Options) -> EntityResult<Value>
	where
		Self: Sized,
	{
		let entity = options.resolved_entity().cloned().or_else(|| self.default_entity());
		let output = represent(entity.as_ref(), self, options)?;
		Ok(output.map_or(Value::Null, Value::Object))
	}
}

/// Serialize a list of records through the effective entity.
///
/// The default entity is taken from the first record. Without any entity
/// the result is an empty list.
pub fn to_json_many<R: Exposable>(records: &[R], options: &Options) -> EntityResult<Value> {
	let entity = options
		.resolved_entity()
		.cloned()
		.or_else(|| records.first().and_then(|record| record.default_entity()));
	represent_many(entity.as_ref(), records, options).map(Value::Array)
}
