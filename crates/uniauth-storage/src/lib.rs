//! # uniauth-storage
//!
//! Storage abstraction layer for uniauth using RocksDB.
//!
//! Records are addressed by column family and a bincode-encoded key. The
//! account core builds its repositories on the [`Storage`] trait so tests and
//! alternative backends can be swapped in.

#![warn(clippy::all)]

pub mod column_families;
pub mod errors;
pub mod rocksdb_impl;
pub mod traits;

pub use column_families::*;
pub use errors::{Result, StorageError};
pub use rocksdb_impl::RocksDbStorage;
pub use traits::{Batch, BatchExt, Storage};
