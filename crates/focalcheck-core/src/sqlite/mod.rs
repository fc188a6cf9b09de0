//! SQLite b-tree layer entry points.

pub mod btree;

pub use btree::{BtreeHandle, SQLITE_OK, set_cache_size};
