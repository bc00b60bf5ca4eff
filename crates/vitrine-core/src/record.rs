//! Host object contract
//!
//! The entity engine only ever sees a host object through three operations:
//! reading its plain attributes, enumerating its currently loaded relations,
//! and (asynchronously) loading relations that are still missing.

use crate::error::LoadError;
use crate::path::RelationPath;
use async_trait::async_trait;
use serde_json::Value;

/// Plain attribute mapping of a record, in insertion order
pub type Attributes = serde_json::Map<String, Value>;

/// A relation that is currently materialized in memory
#[derive(Clone)]
pub enum Related<'a> {
	/// To-one relation
	One(&'a dyn Record),
	/// To-many relation
	Many(Vec<&'a dyn Record>),
}

impl<'a> Related<'a> {
	/// Iterate over the related records, whatever the cardinality
	pub fn records(&self) -> Vec<&'a dyn Record> {
		match self {
			Related::One(record) => vec![*record],
			Related::Many(records) => records.clone(),
		}
	}

	pub fn is_many(&self) -> bool {
		matches!(self, Related::Many(_))
	}
}

impl std::fmt::Debug for Related<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Related::One(_) => f.write_str("Related::One"),
			Related::Many(records) => write!(f, "Related::Many({})", records.len()),
		}
	}
}

/// A host data object that can be shaped by an entity.
///
/// # Examples
///
/// ```
/// use vitrine_core::{Attributes, Record, Related};
/// use serde_json::json;
///
/// struct Address {
///     attributes: Attributes,
/// }
///
/// impl Record for Address {
///     fn attributes(&self) -> Attributes {
///         self.attributes.clone()
///     }
///
///     fn loaded_relations(&self) -> Vec<(String, Related<'_>)> {
///         Vec::new()
///     }
/// }
///
/// let mut attributes = Attributes::new();
/// attributes.insert("city".to_string(), json!("Paris"));
/// let address = Address { attributes };
/// assert!(!address.is_relation_loaded("country"));
/// ```
pub trait Record: Send + Sync {
	/// Flattened own attributes. Relations are never part of this mapping.
	fn attributes(&self) -> Attributes;

	/// Relations currently materialized in memory, by name
	fn loaded_relations(&self) -> Vec<(String, Related<'_>)>;

	/// Look up one loaded relation by name
	fn relation(&self, name: &str) -> Option<Related<'_>> {
		self.loaded_relations()
			.into_iter()
			.find(|(relation, _)| relation == name)
			.map(|(_, related)| related)
	}

	fn is_relation_loaded(&self, name: &str) -> bool {
		self.relation(name).is_some()
	}
}

impl<T: Record + ?Sized> Record for &T {
	fn attributes(&self) -> Attributes {
		(**self).attributes()
	}

	fn loaded_relations(&self) -> Vec<(String, Related<'_>)> {
		(**self).loaded_relations()
	}

	fn relation(&self, name: &str) -> Option<Related<'_>> {
		(**self).relation(name)
	}
}

/// Records whose missing relations can be fetched by the host.
#[async_trait]
pub trait LoadRelations: Record {
	/// Materialize the given (possibly dotted) relation paths in place.
	///
	/// Fails with a host-defined error when a path is invalid; the error is
	/// propagated unchanged to the caller of the presentation pipeline.
	async fn load_relations(&mut self, paths: &[RelationPath]) -> Result<(), LoadError>;
}

/// Whether an attribute value counts as present.
///
/// `null`, `false` and the empty string are absent; everything else,
/// including `0` and empty containers, is present.
pub fn is_present(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::String(text) => !text.is_empty(),
		_ => true,
	}
}

/// A [`Record`] over a plain JSON object.
///
/// It has no relations: nested objects stay plain attributes. The evaluator
/// uses it to represent nested values that live in the attribute mapping
/// rather than in a loaded relation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonRecord {
	attributes: Attributes,
}

impl JsonRecord {
	pub fn new(attributes: Attributes) -> Self {
		Self { attributes }
	}

	/// Wrap a JSON value, returning `None` unless it is an object
	pub fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Object(attributes) => Some(Self::new(attributes)),
			_ => None,
		}
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.attributes.get(key)
	}

	pub fn into_attributes(self) -> Attributes {
		self.attributes
	}
}

impl From<Attributes> for JsonRecord {
	fn from(attributes: Attributes) -> Self {
		Self::new(attributes)
	}
}

impl Record for JsonRecord {
	fn attributes(&self) -> Attributes {
		self.attributes.clone()
	}

	fn loaded_relations(&self) -> Vec<(String, Related<'_>)> {
		Vec::new()
	}
}
