//! rstest fixtures
//!
//! Record graphs shared by the entity tests. Relations that the fixtures
//! mark lazy are only visible after loading.

use crate::memory::MemoryRecord;
use rstest::fixture;
use serde_json::json;

/// City record, no relations
#[fixture]
pub fn city_record() -> MemoryRecord {
	MemoryRecord::from_json(json!({"id": 3, "name": "Paris", "country": "FR"}))
}

/// Address with a lazy `city` relation
#[fixture]
pub fn address_record(city_record: MemoryRecord) -> MemoryRecord {
	MemoryRecord::from_json(json!({"id": 7, "street": "Rue de Rivoli", "city": 3})).lazy_one("city", city_record)
}

/// User with private attributes and a lazy `address` relation
///
/// Loading `address` and then `address.city` materializes the whole graph.
#[fixture]
pub fn user_record(address_record: MemoryRecord) -> MemoryRecord {
	MemoryRecord::from_json(json!({
		"id": 1,
		"full_name": "Ann Smith",
		"email": "ann@example.com",
		"password_hash": "pbkdf2$...",
		"role": "admin",
		"address": 7,
	}))
	.lazy_one("address", address_record)
}

/// User whose `address` relation is already loaded, `city` included
#[fixture]
pub fn loaded_user_record() -> MemoryRecord {
	let address = MemoryRecord::from_json(json!({"id": 7, "street": "Rue de Rivoli", "city": 3}))
		.with_one("city", city_record());
	MemoryRecord::from_json(json!({"id": 1, "full_name": "Ann Smith", "role": "member", "address": 7}))
		.with_one("address", address)
}

/// Author with loaded posts, each post with loaded comments
#[fixture]
pub fn author_record() -> MemoryRecord {
	let comment = |id: u64, body: &str| MemoryRecord::from_json(json!({"id": id, "body": body}));
	MemoryRecord::from_json(json!({"id": 10, "name": "Frank"})).with_many(
		"posts",
		vec![
			MemoryRecord::from_json(json!({"id": 100, "title": "Dune", "published": true}))
				.with_many("comments", vec![comment(1000, "great"), comment(1001, "long")]),
			MemoryRecord::from_json(json!({"id": 101, "title": "Draft", "published": false}))
				.with_many("comments", Vec::new()),
		],
	)
}
