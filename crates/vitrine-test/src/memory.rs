//! In-memory host records
//!
//! [`MemoryRecord`] plays the part of an ORM row: it has plain attributes,
//! relations that are already loaded, and lazy relations that only become
//! visible after [`LoadRelations::load_relations`] asks for them. Every load
//! call is recorded so tests can assert on what the pipeline fetched.

use async_trait::async_trait;
use serde_json::Value;
use vitrine_core::{Attributes, LoadError, LoadRelations, Record, Related, RelationPath};

/// Errors raised by [`MemoryRecord`] when asked to load a relation it does not have
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum MemoryLoadError {
	#[error("Unknown relation path '{path}'")]
	UnknownRelation { path: RelationPath },
}

#[derive(Debug, Clone)]
enum Relation {
	One(Box<MemoryRecord>),
	Many(Vec<MemoryRecord>),
}

impl Relation {
	fn related(&self) -> Related<'_> {
		match self {
			Relation::One(record) => Related::One(record.as_ref()),
			Relation::Many(records) => {
				Related::Many(records.iter().map(|record| record as &dyn Record).collect())
			}
		}
	}

	fn records_mut(&mut self) -> Vec<&mut MemoryRecord> {
		match self {
			Relation::One(record) => vec![record.as_mut()],
			Relation::Many(records) => records.iter_mut().collect(),
		}
	}
}

/// A host record kept entirely in memory
///
/// # Examples
///
/// ```
/// use vitrine_core::{LoadRelations, Record, RelationPath};
/// use vitrine_test::MemoryRecord;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let mut user = MemoryRecord::from_json(json!({"id": 1, "address": 7}))
///     .lazy_one("address", MemoryRecord::from_json(json!({"city": "Paris"})));
/// assert!(!user.is_relation_loaded("address"));
///
/// user.load_relations(&[RelationPath::new("address")]).await.unwrap();
/// assert!(user.is_relation_loaded("address"));
/// assert_eq!(user.load_calls().len(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRecord {
	attributes: Attributes,
	loaded: Vec<(String, Relation)>,
	lazy: Vec<(String, Relation)>,
	inert: Vec<String>,
	load_calls: Vec<Vec<RelationPath>>,
}

impl MemoryRecord {
	pub fn new(attributes: Attributes) -> Self {
		Self {
			attributes,
			..Self::default()
		}
	}

	/// Build a record from a JSON object. Any other value gives a record
	/// without attributes.
	pub fn from_json(value: Value) -> Self {
		match value {
			Value::Object(attributes) => Self::new(attributes),
			_ => Self::default(),
		}
	}

	/// Set one attribute, replacing any previous value
	pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.attributes.insert(key.into(), value.into());
		self
	}

	/// Add a loaded to-one relation
	pub fn with_one(mut self, name: impl Into<String>, record: MemoryRecord) -> Self {
		self.loaded.push((name.into(), Relation::One(Box::new(record))));
		self
	}

	/// Add a loaded to-many relation
	pub fn with_many(mut self, name: impl Into<String>, records: Vec<MemoryRecord>) -> Self {
		self.loaded.push((name.into(), Relation::Many(records)));
		self
	}

	/// Add a to-one relation that stays hidden until loaded
	pub fn lazy_one(mut self, name: impl Into<String>, record: MemoryRecord) -> Self {
		self.lazy.push((name.into(), Relation::One(Box::new(record))));
		self
	}

	/// Add a to-many relation that stays hidden until loaded
	pub fn lazy_many(mut self, name: impl Into<String>, records: Vec<MemoryRecord>) -> Self {
		self.lazy.push((name.into(), Relation::Many(records)));
		self
	}

	/// Declare a relation whose loads succeed without ever materializing it
	pub fn inert(mut self, name: impl Into<String>) -> Self {
		self.inert.push(name.into());
		self
	}

	/// Paths passed to each `load_relations` call on this record, in call order
	pub fn load_calls(&self) -> &[Vec<RelationPath>] {
		&self.load_calls
	}

	/// Whether the record knows a relation under any state
	pub fn knows(&self, name: &str) -> bool {
		self.loaded.iter().any(|(relation, _)| relation == name)
			|| self.lazy.iter().any(|(relation, _)| relation == name)
			|| self.inert.iter().any(|relation| relation == name)
	}

	fn load_path(&mut self, path: &RelationPath) -> Result<(), MemoryLoadError> {
		let unknown = || MemoryLoadError::UnknownRelation { path: path.clone() };
		let head = path.head();

		if self.inert.iter().any(|relation| relation == head) {
			return Ok(());
		}
		if let Some(index) = self.lazy.iter().position(|(relation, _)| relation == head) {
			let relation = self.lazy.remove(index);
			self.loaded.push(relation);
		}

		let Some((_, relation)) = self.loaded.iter_mut().find(|(relation, _)| relation == head) else {
			return Err(unknown());
		};
		let Some(tail) = path.tail() else {
			return Ok(());
		};

		let mut children = relation.records_mut();
		if children.is_empty() {
			return Ok(());
		}
		if !children.iter().any(|child| child.knows(tail.head())) {
			return Err(unknown());
		}
		for child in children.iter_mut().filter(|child| child.knows(tail.head())) {
			child.load_path(&tail).map_err(|_| unknown())?;
		}
		Ok(())
	}
}

impl Record for MemoryRecord {
	fn attributes(&self) -> Attributes {
		self.attributes.clone()
	}

	fn loaded_relations(&self) -> Vec<(String, Related<'_>)> {
		self.loaded
			.iter()
			.map(|(name, relation)| (name.clone(), relation.related()))
			.collect()
	}
}

#[async_trait]
impl LoadRelations for MemoryRecord {
	async fn load_relations(&mut self, paths: &[RelationPath]) -> Result<(), LoadError> {
		self.load_calls.push(paths.to_vec());
		for path in paths {
			self.load_path(path)?;
		}
		Ok(())
	}
}
