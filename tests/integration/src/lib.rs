//! Integration test utilities for Vitrine
//!
//! Entities shared by the integration tests. They describe a small user
//! graph: a user with an address, an address with a city, and an author
//! with posts and comments.

use vitrine::{Entity, PropertyRule};
use serde_json::{Value, json};

pub fn city_entity() -> Entity {
	Entity::builder().name("City").expose("name").build()
}

pub fn address_entity() -> Entity {
	Entity::builder()
		.name("Address")
		.expose("street")
		.property(PropertyRule::new("city").using(city_entity()))
		.build()
}

/// Public user entity: no email, no password hash, admin flag computed
pub fn user_entity() -> Entity {
	Entity::builder()
		.name("User")
		.expose("id")
		.expose_as("full_name", "name")
		.property(PropertyRule::new("address").using(address_entity()))
		.property(PropertyRule::new("is_admin").value(|record, _| {
			Value::Bool(record.attributes().get("role") == Some(&json!("admin")))
		}))
		.build()
}

pub fn comment_entity() -> Entity {
	Entity::builder().name("Comment").expose("id").expose("body").build()
}

/// Post entity; unpublished posts only show up with the `drafts` flag
pub fn post_entity() -> Entity {
	let published = |record: &dyn vitrine::Record, options: &vitrine::Options| {
		record.attributes().get("published") == Some(&json!(true)) || options.is_set("drafts")
	};
	Entity::builder()
		.name("Post")
		.property(PropertyRule::new("id").when(published))
		.property(PropertyRule::new("title").when(published))
		.property(PropertyRule::new("comments").using(comment_entity()).when(published))
		.build()
}

pub fn author_entity() -> Entity {
	Entity::builder()
		.name("Author")
		.expose("id")
		.expose("name")
		.property(PropertyRule::new("posts").using(post_entity()))
		.build()
}
