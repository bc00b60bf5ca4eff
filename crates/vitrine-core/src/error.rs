//! Error taxonomy for representation and presentation

use crate::path::RelationPath;

/// Error raised by a host [`LoadRelations`](crate::LoadRelations) implementation.
///
/// The engine never inspects or rewraps it beyond carrying it in
/// [`EntityError::Load`].
pub type LoadError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for entity operations
pub type EntityResult<T> = Result<T, EntityError>;

/// Errors that abort a representation or presentation call.
///
/// A single failing property aborts the whole call: omitting just that
/// property would be indistinguishable from intentional filtering.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
	/// A loaded relation matches an exposed property that has no nested entity
	#[error("Relation '{relation}' is loaded and exposed without a nested entity")]
	UnsafeRelationExposure { relation: RelationPath },

	/// A property rule cannot be evaluated as declared
	#[error("Invalid entity specification for property '{property}': {message}")]
	InvalidSpecification { property: String, message: String },

	/// Nested entities went deeper than the configured limit
	#[error("Maximum nesting depth exceeded: current={current_depth}, max={max_depth}")]
	MaxDepthExceeded {
		current_depth: usize,
		max_depth: usize,
	},

	/// The host failed to load relations
	#[error("Failed to load relations: {0}")]
	Load(#[source] LoadError),
}

impl EntityError {
	/// Create an unsafe relation exposure error
	pub fn unsafe_relation(relation: impl Into<RelationPath>) -> Self {
		Self::UnsafeRelationExposure {
			relation: relation.into(),
		}
	}

	/// Create an invalid specification error
	pub fn invalid_specification(property: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidSpecification {
			property: property.into(),
			message: message.into(),
		}
	}

	/// Check if this error comes from the relation safety check
	pub fn is_unsafe_relation(&self) -> bool {
		matches!(self, EntityError::UnsafeRelationExposure { .. })
	}

	/// Check if this error was raised by the host load operation
	pub fn is_load_error(&self) -> bool {
		matches!(self, EntityError::Load(_))
	}

	/// The offending relation, for safety check failures
	pub fn relation(&self) -> Option<&RelationPath> {
		match self {
			EntityError::UnsafeRelationExposure { relation } => Some(relation),
			_ => None,
		}
	}
}

impl From<LoadError> for EntityError {
	fn from(error: LoadError) -> Self {
		Self::Load(error)
	}
}
