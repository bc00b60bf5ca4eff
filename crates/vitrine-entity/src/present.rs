//! Presentation pipeline
//!
//! `present` is `represent` preceded by relation auto-loading: detect the
//! relations the entity needs, ask the host to load them, and repeat until
//! nothing is missing. Awaiting the host is the only suspension point; the
//! detection and the final representation are synchronous.
//!
//! A pass that detects exactly the same paths as the previous one means the
//! host did not materialize them, so the pipeline stops loading and lets the
//! representation decide what to do with the record as it is.

use crate::autoload::detect_missing;
use crate::entity::Entity;
use crate::options::Options;
use serde_json::Value;
use vitrine_core::{Attributes, EntityError, EntityResult, LoadRelations, RelationPath};

/// Load whatever `entity` needs on `record`, then represent it.
///
/// Without an entity nothing is loaded and the result is `None`.
///
/// # Examples
///
/// ```
/// use vitrine_entity::{Entity, Options, PropertyRule, present};
/// use vitrine_test::MemoryRecord;
/// use serde_json::{Value, json};
///
/// # tokio_test::block_on(async {
/// let address = Entity::builder().expose("city").build();
/// let entity = Entity::builder()
///     .expose("id")
///     .property(PropertyRule::new("address").using(&address))
///     .build();
/// let mut user = MemoryRecord::from_json(json!({"id": 1, "address": 7}))
///     .lazy_one("address", MemoryRecord::from_json(json!({"city": "Paris", "zip": "75001"})));
///
/// let output = present(Some(&entity), &mut user, &Options::new()).await.unwrap();
/// assert_eq!(output.map(Value::Object), Some(json!({"id": 1, "address": {"city": "Paris"}})));
/// assert_eq!(user.load_calls().len(), 1);
///
/// assert_eq!(present(None, &mut user, &Options::new()).await.unwrap(), None);
/// # });
/// ```
pub async fn present<R: LoadRelations>(
	entity: Option<&Entity>,
	record: &mut R,
	options: &Options,
) -> EntityResult<Option<Attributes>> {
	match entity {
		Some(entity) => entity.present(record, options).await.map(Some),
		None => Ok(None),
	}
}

/// Load whatever `entity` needs on each record, then represent the list.
///
/// Without an entity nothing is loaded and the result is empty.
pub async fn present_many<R: LoadRelations>(
	entity: Option<&Entity>,
	records: &mut [R],
	options: &Options,
) -> EntityResult<Vec<Value>> {
	match entity {
		Some(entity) => entity.present_many(records, options).await,
		None => Ok(Vec::new()),
	}
}

/// Detect and load missing relations until the record is complete.
///
/// Returns every path handed to the host, in loading order. Host errors are
/// returned as [`EntityError::Load`] with the original error as source.
pub async fn load_missing<R: LoadRelations>(
	entity: &Entity,
	record: &mut R,
	options: &Options,
) -> EntityResult<Vec<RelationPath>> {
	let max_passes = options.get_settings().max_load_passes;
	let mut loaded = Vec::new();
	let mut previous: Option<Vec<RelationPath>> = None;

	for pass in 0..max_passes {
		let missing = detect_missing(entity, Some(&*record), options)?;
		if missing.is_empty() {
			break;
		}
		if previous.as_ref() == Some(&missing) {
			tracing::debug!(pass, paths = ?missing, "relations still missing after load, stopping");
			break;
		}

		tracing::debug!(pass, paths = ?missing, "loading missing relations");
		record
			.load_relations(&missing)
			.await
			.map_err(EntityError::Load)?;
		loaded.extend(missing.iter().cloned());
		previous = Some(missing);
	}

	Ok(loaded)
}

impl Entity {
	/// Load the relations this entity needs on `record`, then represent it
	pub async fn present<R: LoadRelations>(&self, record: &mut R, options: &Options) -> EntityResult<Attributes> {
		load_missing(self, record, options).await?;
		self.represent(&*record, options)
	}

	/// Load the relations this entity needs on every record, then represent the list
	pub async fn present_many<R: LoadRelations>(
		&self,
		records: &mut [R],
		options: &Options,
	) -> EntityResult<Vec<Value>> {
		for record in records.iter_mut() {
			load_missing(self, record, options).await?;
		}
		self.represent_many(records, options)
	}
}
