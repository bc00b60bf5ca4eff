//! Relation Safety Integration Tests
//!
//! A loaded relation must never be exposed without a nested entity.

use vitrine_integration_tests::{address_entity, user_entity};

use rstest::rstest;
use serde_json::json;
use vitrine::test::MemoryRecord;
use vitrine::test::fixtures::{author_record, loaded_user_record};
use vitrine::{
	Attributes, Entity, EntityError, EntitySettings, Exposable, Options, PropertyRule, Record, Related,
	RelationPath, check_relations, to_json_many,
};

#[rstest]
fn test_plain_exposed_relation_fails(loaded_user_record: MemoryRecord) {
	let leaky = Entity::builder().expose("id").expose("address").build();

	let error = leaky.represent(&loaded_user_record, &Options::new()).unwrap_err();
	assert!(error.is_unsafe_relation());
	assert_eq!(error.relation(), Some(&RelationPath::new("address")));
	assert_eq!(
		error.to_string(),
		"Relation 'address' is loaded and exposed without a nested entity"
	);
}

#[rstest]
fn test_nested_entity_passes(loaded_user_record: MemoryRecord) {
	assert!(check_relations(&user_entity(), &loaded_user_record, &Options::new()).is_ok());
}

#[rstest]
fn test_violation_deep_in_graph_reports_dotted_path(loaded_user_record: MemoryRecord) {
	let address = address_entity().extend([PropertyRule::new("city")]);
	let entity = user_entity().extend([PropertyRule::new("address").using(address)]);

	let error = entity.represent(&loaded_user_record, &Options::new()).unwrap_err();
	assert_eq!(error.relation(), Some(&RelationPath::new("address.city")));
}

#[rstest]
fn test_violation_inside_collection(author_record: MemoryRecord) {
	let post = Entity::builder().expose("title").expose("comments").build();
	let entity = Entity::builder().property(PropertyRule::new("posts").using(post)).build();

	let result = entity.represent_many(&[author_record], &Options::new());
	assert!(matches!(
		result,
		Err(EntityError::UnsafeRelationExposure { ref relation }) if relation.as_str() == "posts.comments"
	));
}

#[rstest]
fn test_undeclared_relations_are_ignored(loaded_user_record: MemoryRecord) {
	let entity = Entity::builder().expose("id").build();
	let output = entity.represent(&loaded_user_record, &Options::new()).unwrap();
	assert_eq!(serde_json::Value::Object(output), json!({"id": 1}));
}

#[rstest]
#[case::shallow(Options::new().shallow(true))]
#[case::unsafe_call(Options::new().safe(false))]
#[case::unsafe_settings(Options::new().settings(EntitySettings::default().with_safe(false)))]
fn test_check_can_be_disabled(loaded_user_record: MemoryRecord, #[case] options: Options) {
	let entity = Entity::builder().expose("id").expose("address").build();
	assert!(entity.represent(&loaded_user_record, &options).is_ok());
}

#[rstest]
fn test_explicit_safe_wins_over_settings(loaded_user_record: MemoryRecord) {
	let entity = Entity::builder().expose("address").build();
	let options = Options::new()
		.settings(EntitySettings::default().with_safe(false))
		.safe(true);
	assert!(entity.represent(&loaded_user_record, &options).is_err());
}

/// Host type whose default entity forgets to nest `address`
struct LeakyUser(MemoryRecord);

impl Record for LeakyUser {
	fn attributes(&self) -> Attributes {
		self.0.attributes()
	}

	fn loaded_relations(&self) -> Vec<(String, Related<'_>)> {
		self.0.loaded_relations()
	}
}

impl Exposable for LeakyUser {
	fn default_entity(&self) -> Option<Entity> {
		Some(Entity::builder().expose("id").expose("address").build())
	}
}

#[rstest]
fn test_serialization_hook_runs_the_check(loaded_user_record: MemoryRecord) {
	let user = LeakyUser(loaded_user_record);

	let error = user.to_json(&Options::new()).unwrap_err();
	assert_eq!(error.relation(), Some(&RelationPath::new("address")));
	assert!(to_json_many(&[user], &Options::new()).is_err());
}
