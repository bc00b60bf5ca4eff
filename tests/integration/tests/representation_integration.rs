//! Representation Integration Tests
//!
//! Whitelisting, conditional inclusion, key order and collection filtering
//! through the public `vitrine` facade.

use vitrine_integration_tests::{author_entity, user_entity};

use rstest::rstest;
use serde_json::{Value, json};
use vitrine::test::MemoryRecord;
use vitrine::test::fixtures::{author_record, loaded_user_record};
use vitrine::{
	Attributes, Entity, EntityError, Exposable, JsonRecord, Options, PropertyRule, Record, Related,
	represent, represent_many, to_json_many,
};

fn record(value: Value) -> JsonRecord {
	JsonRecord::from_value(value).unwrap()
}

#[rstest]
fn test_missing_entity_exposes_nothing(loaded_user_record: MemoryRecord) {
	assert!(represent(None, &loaded_user_record, &Options::new()).unwrap().is_none());
	assert!(represent_many(None, &[loaded_user_record], &Options::new()).unwrap().is_empty());
}

#[rstest]
fn test_conditional_inclusion() {
	// Test: a renamed property shown only when the caller asks for it
	let entity = Entity::builder()
		.expose("id")
		.property(
			PropertyRule::new("location")
				.alias("hometown")
				.when(|_, options| options.is_set("include_location")),
		)
		.build();
	let source = record(json!({"id": 1, "location": "SF"}));

	let plain = entity.represent(&source, &Options::new()).unwrap();
	assert_eq!(Value::Object(plain), json!({"id": 1}));

	let options = Options::new().flag("include_location", true);
	let detailed = entity.represent(&source, &options).unwrap();
	assert_eq!(Value::Object(detailed), json!({"id": 1, "hometown": "SF"}));
}

#[rstest]
fn test_user_graph_is_whitelisted(loaded_user_record: MemoryRecord) {
	let output = user_entity().represent(&loaded_user_record, &Options::new()).unwrap();

	assert_eq!(
		Value::Object(output),
		json!({
			"id": 1,
			"name": "Ann Smith",
			"address": {"street": "Rue de Rivoli", "city": {"name": "Paris"}},
			"is_admin": false,
		})
	);
}

#[rstest]
fn test_output_follows_declaration_order() {
	let entity = Entity::builder()
		.expose("zeta")
		.expose("alpha")
		.property(PropertyRule::new("computed").value(|_, _| json!(0)))
		.expose("mid")
		.build();
	let source = record(json!({"mid": 3, "alpha": 2, "zeta": 1}));

	let output = entity.represent(&source, &Options::new()).unwrap();
	let keys: Vec<&str> = output.keys().map(String::as_str).collect();
	assert_eq!(keys, vec!["zeta", "alpha", "computed", "mid"]);
}

#[rstest]
fn test_representation_is_idempotent(loaded_user_record: MemoryRecord) {
	let options = Options::new().flag("verbose", true);
	let first = user_entity().represent(&loaded_user_record, &options).unwrap();
	let second = user_entity().represent(&loaded_user_record, &options).unwrap();
	assert_eq!(first, second);
}

#[rstest]
fn test_absent_attributes_are_omitted_not_null() {
	let entity = Entity::builder().expose("id").expose("nickname").build();
	let output = entity.represent(&record(json!({"id": 1})), &Options::new()).unwrap();
	assert_eq!(Value::Object(output), json!({"id": 1}));
}

#[rstest]
fn test_collection_drops_fully_omitted_elements(author_record: MemoryRecord) {
	let output = author_entity().represent(&author_record, &Options::new()).unwrap();

	assert_eq!(
		output["posts"],
		json!([{
			"id": 100,
			"title": "Dune",
			"comments": [{"id": 1000, "body": "great"}, {"id": 1001, "body": "long"}],
		}])
	);
}

#[rstest]
fn test_flags_reach_nested_entities(author_record: MemoryRecord) {
	let options = Options::new().flag("drafts", true);
	let output = author_entity().represent(&author_record, &options).unwrap();

	let posts = output["posts"].as_array().unwrap();
	assert_eq!(posts.len(), 2);
	assert_eq!(posts[1], json!({"id": 101, "title": "Draft", "comments": []}));
}

#[rstest]
fn test_top_level_collection_filtering() {
	let entity = Entity::builder()
		.property(PropertyRule::new("name").when(|record, _| record.attributes().contains_key("public")))
		.build();
	let records = vec![
		record(json!({"name": "a", "public": true})),
		record(json!({"name": "b"})),
		record(json!({"name": "c", "public": true})),
	];

	let output = entity.represent_many(&records, &Options::new()).unwrap();
	assert_eq!(output, vec![json!({"name": "a"}), json!({"name": "c"})]);
}

#[rstest]
fn test_nested_rule_over_scalar_is_invalid() {
	let entity = Entity::builder()
		.property(PropertyRule::new("address").using(Entity::builder().expose("city").build()))
		.build();

	let result = entity.represent(&record(json!({"address": 42})), &Options::new());
	assert!(matches!(
		result,
		Err(EntityError::InvalidSpecification { ref property, .. }) if property == "address"
	));
}

struct Account {
	attributes: Attributes,
}

impl Record for Account {
	fn attributes(&self) -> Attributes {
		self.attributes.clone()
	}

	fn loaded_relations(&self) -> Vec<(String, Related<'_>)> {
		Vec::new()
	}
}

impl Exposable for Account {
	fn default_entity(&self) -> Option<Entity> {
		Some(Entity::builder().expose("login").build())
	}
}

fn account(login: &str) -> Account {
	Account {
		attributes: record(json!({"login": login, "password": "secret"})).into_attributes(),
	}
}

#[rstest]
fn test_to_json_uses_default_entity() {
	assert_eq!(account("ann").to_json(&Options::new()).unwrap(), json!({"login": "ann"}));
}

#[rstest]
fn test_to_json_entity_override() {
	let options = Options::new().using(Entity::builder().expose("password").build());
	assert_eq!(account("ann").to_json(&options).unwrap(), json!({"password": "secret"}));
}

#[rstest]
fn test_to_json_many() {
	let accounts = vec![account("ann"), account("bob")];
	assert_eq!(
		to_json_many(&accounts, &Options::new()).unwrap(),
		json!([{"login": "ann"}, {"login": "bob"}])
	);
}
