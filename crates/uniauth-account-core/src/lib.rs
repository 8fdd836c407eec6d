//! # uniauth-account-core
//!
//! Account lifecycle management for the uniauth identity service.
//!
//! This subsystem is responsible for:
//! - Provisioning accounts with generated, salted credentials
//! - Administrative actions on existing accounts (lock, unlock, password
//!   reset, status change, profile update) under status and uniqueness rules
//! - Building the per-user, per-domain role view
//!
//! Persistence and credential algorithms are injected through the traits in
//! [`traits`]; [`repository::StorageRepository`] provides the RocksDB-backed
//! repositories.

#![warn(clippy::all)]

pub mod credentials;
pub mod errors;
pub mod repository;
pub mod service;
pub mod traits;
pub mod types;

pub use errors::{AccountError, ErrorKind, Result};
pub use repository::StorageRepository;
pub use service::AccountLifecycleService;
pub use traits::{
    AccountLifecycle, AccountRepository, CredentialProvider, RoleRepository, UserRoleRepository,
};
pub use types::*;
