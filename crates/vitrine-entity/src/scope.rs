//! Recursion scope
//!
//! Tracks how deep the engine is inside nested entities. Only the public
//! entry points create a scope; nested entities get a child of it. The scope
//! is `Copy` and travels by value down the call tree, so sibling properties
//! and concurrent calls never observe each other's state.

use crate::options::Options;
use vitrine_core::{EntityError, EntityResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scope {
	depth: usize,
	max_depth: usize,
}

impl Scope {
	/// Scope for the entry point of a public call
	pub(crate) fn entry(options: &Options) -> Self {
		Self {
			depth: 0,
			max_depth: options.get_settings().max_depth,
		}
	}

	/// Scope one nested entity deeper
	pub(crate) fn child(self) -> EntityResult<Self> {
		let depth = self.depth + 1;
		if depth > self.max_depth {
			return Err(EntityError::MaxDepthExceeded {
				current_depth: depth,
				max_depth: self.max_depth,
			});
		}
		Ok(Self {
			depth,
			max_depth: self.max_depth,
		})
	}

	pub(crate) fn depth(self) -> usize {
		self.depth
	}
}
