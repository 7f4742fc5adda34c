//! Cloud storage access.
//!
//! The provisioner only sees the [`StorageBackend`] trait; query-language
//! details such as literal escaping stay inside the adapters.

mod backend;
mod drive;
mod types;

pub use backend::{StorageBackend, StorageError};
pub use drive::{escape_query_literal, DriveConfig, DriveStorage};
pub use types::*;
