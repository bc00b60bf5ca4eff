//! # Vitrine Test
//!
//! Testing utilities for Vitrine entities.
//!
//! ## Features
//!
//! - **[`MemoryRecord`]**: in-memory host record with loaded and lazy relations
//! - **Fixtures**: rstest fixtures for common record graphs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vitrine_test::fixtures::user_record;
//! use rstest::rstest;
//!
//! #[rstest]
//! #[tokio::test]
//! async fn test_present_user(mut user_record: MemoryRecord) {
//!     let output = user_entity().present(&mut user_record, &Options::new()).await.unwrap();
//!     assert_eq!(user_record.load_calls().len(), 2);
//! }
//! ```

pub mod fixtures;
pub mod memory;

pub use memory::{MemoryLoadError, MemoryRecord};
