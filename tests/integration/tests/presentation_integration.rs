//! Presentation Integration Tests
//!
//! Auto-loading of missing relations before representation, against both
//! the in-memory test record and a host type with its own load error.

use vitrine_integration_tests::user_entity;

use async_trait::async_trait;
use rstest::rstest;
use serde_json::{Value, json};
use vitrine::test::MemoryRecord;
use vitrine::test::fixtures::{address_record, city_record, user_record};
use vitrine::{
	Attributes, Entity, LoadError, LoadRelations, Options, PropertyRule, Record, Related,
	RelationPath, detect_missing, present, present_many,
};

fn paths(paths: &[&str]) -> Vec<RelationPath> {
	paths.iter().map(|path| RelationPath::new(*path)).collect()
}

#[rstest]
fn test_detection_walks_one_level_per_pass(user_record: MemoryRecord) {
	let missing = detect_missing(&user_entity(), Some(&user_record), &Options::new()).unwrap();
	assert_eq!(missing, paths(&["address"]));
}

#[rstest]
#[tokio::test]
async fn test_present_loads_then_represents(mut user_record: MemoryRecord) {
	let output = present(Some(&user_entity()), &mut user_record, &Options::new())
		.await
		.unwrap()
		.unwrap();

	assert_eq!(
		Value::Object(output),
		json!({
			"id": 1,
			"name": "Ann Smith",
			"address": {"street": "Rue de Rivoli", "city": {"name": "Paris"}},
			"is_admin": true,
		})
	);
	assert_eq!(user_record.load_calls(), &[paths(&["address"]), paths(&["address.city"])]);
	assert!(detect_missing(&user_entity(), Some(&user_record), &Options::new()).unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_present_many(user_record: MemoryRecord) {
	let mut records = vec![user_record.clone(), user_record];

	let output = present_many(Some(&user_entity()), &mut records, &Options::new())
		.await
		.unwrap();

	assert_eq!(output.len(), 2);
	assert_eq!(output[0], output[1]);
	assert!(records.iter().all(|record| record.load_calls().len() == 2));
}

#[rstest]
#[tokio::test]
async fn test_concurrent_presentations_share_one_entity() {
	let entity = user_entity();
	let handles: Vec<_> = (0..4)
		.map(|index| {
			let entity = entity.clone();
			let options = Options::new().flag("index", index);
			tokio::spawn(async move {
				let mut record = user_record(address_record(city_record())).set("id", index);
				entity.present(&mut record, &options).await
			})
		})
		.collect();

	for (index, handle) in handles.into_iter().enumerate() {
		let output = handle.await.unwrap().unwrap();
		assert_eq!(output["id"], json!(index));
		assert_eq!(output["address"]["city"]["name"], json!("Paris"));
	}
}

#[derive(Debug, thiserror::Error)]
#[error("connection reset while loading {0}")]
struct ConnectionReset(String);

/// Host row whose relation loading always fails
struct FlakyRow {
	attributes: Attributes,
}

impl Record for FlakyRow {
	fn attributes(&self) -> Attributes {
		self.attributes.clone()
	}

	fn loaded_relations(&self) -> Vec<(String, Related<'_>)> {
		Vec::new()
	}
}

#[async_trait]
impl LoadRelations for FlakyRow {
	async fn load_relations(&mut self, paths: &[RelationPath]) -> Result<(), LoadError> {
		let joined: Vec<&str> = paths.iter().map(RelationPath::as_str).collect();
		Err(Box::new(ConnectionReset(joined.join(","))))
	}
}

#[rstest]
#[tokio::test]
async fn test_host_load_error_propagates_unchanged() {
	let entity = Entity::builder()
		.property(PropertyRule::new("address").using(Entity::builder().expose("city").build()))
		.build();
	let mut row = FlakyRow {
		attributes: json!({"address": 7}).as_object().unwrap().clone(),
	};

	let error = entity.present(&mut row, &Options::new()).await.unwrap_err();

	assert!(error.is_load_error());
	let source = std::error::Error::source(&error).unwrap();
	let reset = source.downcast_ref::<ConnectionReset>().unwrap();
	assert_eq!(reset.0, "address");
}

#[rstest]
#[tokio::test]
async fn test_nothing_to_load_never_calls_host() {
	let entity = Entity::builder().expose("id").build();
	let mut row = FlakyRow {
		attributes: json!({"id": 1, "address": 7}).as_object().unwrap().clone(),
	};

	let output = entity.present(&mut row, &Options::new()).await.unwrap();
	assert_eq!(Value::Object(output), json!({"id": 1}));
}
