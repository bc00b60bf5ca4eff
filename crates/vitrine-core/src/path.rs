//! Dot-joined relation paths

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path to a relation, possibly nested (`"address"`, `"address.city"`).
///
/// Paths are what the auto-loader hands to [`LoadRelations`](crate::LoadRelations)
/// and what [`EntityError::UnsafeRelationExposure`](crate::EntityError) reports.
///
/// # Examples
///
/// ```
/// use vitrine_core::RelationPath;
///
/// let address = RelationPath::new("address");
/// let city = address.child("city");
/// assert_eq!(city.as_str(), "address.city");
/// assert_eq!(city.segments().collect::<Vec<_>>(), vec!["address", "city"]);
/// assert_eq!(city.head(), "address");
/// assert_eq!(city.tail(), Some(RelationPath::new("city")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationPath(String);

impl RelationPath {
	/// Separator between path segments
	pub const SEPARATOR: char = '.';

	pub fn new(path: impl Into<String>) -> Self {
		Self(path.into())
	}

	/// Extend an optional prefix with one more segment.
	///
	/// This is how nested paths are built while walking a specification:
	/// a root-level relation has no prefix.
	pub fn join(prefix: Option<&RelationPath>, segment: &str) -> Self {
		match prefix {
			Some(prefix) => prefix.child(segment),
			None => Self::new(segment),
		}
	}

	/// Path one level deeper
	pub fn child(&self, segment: &str) -> Self {
		Self(format!("{}{}{}", self.0, Self::SEPARATOR, segment))
	}

	pub fn segments(&self) -> impl Iterator<Item = &str> {
		self.0.split(Self::SEPARATOR)
	}

	/// First segment of the path
	pub fn head(&self) -> &str {
		self.segments().next().unwrap_or_default()
	}

	/// Everything after the first segment, `None` for single-segment paths
	pub fn tail(&self) -> Option<RelationPath> {
		self.0
			.split_once(Self::SEPARATOR)
			.map(|(_, rest)| Self::new(rest))
	}

	pub fn depth(&self) -> usize {
		self.segments().count()
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for RelationPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for RelationPath {
	fn from(path: &str) -> Self {
		Self::new(path)
	}
}

impl From<String> for RelationPath {
	fn from(path: String) -> Self {
		Self(path)
	}
}

impl AsRef<str> for RelationPath {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
