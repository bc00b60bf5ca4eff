//! Engine settings
//!
//! Defaults that apply when a call's options do not say otherwise. Settings
//! can be built in code or read from a TOML document:
//!
//! ```toml
//! safe = true
//! max_depth = 16
//! max_load_passes = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors that can occur while loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to read settings file: {0}")]
	Io(#[from] std::io::Error),

	#[error("Failed to parse settings: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Engine-wide defaults
///
/// # Examples
///
/// ```
/// use vitrine_core::EntitySettings;
///
/// let settings = EntitySettings::from_toml_str("max_depth = 4").unwrap();
/// assert_eq!(settings.max_depth, 4);
/// // Unspecified keys keep their defaults
/// assert!(settings.safe);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySettings {
	/// Run the relation safety check when a call passes neither `safe` nor `shallow`
	pub safe: bool,
	/// Maximum depth of nested entities
	pub max_depth: usize,
	/// Maximum number of detect-then-load passes in the presentation pipeline
	pub max_load_passes: usize,
}

impl EntitySettings {
	pub const DEFAULT_MAX_DEPTH: usize = 32;
	pub const DEFAULT_MAX_LOAD_PASSES: usize = 4;

	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let source = std::fs::read_to_string(path)?;
		Self::from_toml_str(&source)
	}

	pub fn with_safe(mut self, safe: bool) -> Self {
		self.safe = safe;
		self
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn with_max_load_passes(mut self, passes: usize) -> Self {
		self.max_load_passes = passes;
		self
	}
}

impl Default for EntitySettings {
	fn default() -> Self {
		Self {
			safe: true,
			max_depth: Self::DEFAULT_MAX_DEPTH,
			max_load_passes: Self::DEFAULT_MAX_LOAD_PASSES,
		}
	}
}
