//! # lfs-core
//!
//! Core types, collaborator traits, and error types for lfs-update.
//!
//! This crate provides the foundational pieces shared across the workspace:
//! - `ConfigEntry`, byte-exact `ConfigKey`, and the `lfs.<scope>.access` key grammar
//! - `AccessLevel` with its deprecated `private` alias
//! - Collaborator traits for the configuration store and the hook file
//! - In-memory store implementations for tests and dry runs

pub mod access;
pub mod errors;
pub mod memory;
pub mod store;

pub use access::{AccessLevel, ConfigEntry, ConfigKey, access_scope};
pub use errors::StoreError;
pub use store::{ConfigStore, HookStore};
