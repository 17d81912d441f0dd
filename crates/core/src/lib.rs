//! Core upload relay logic for FileSync.
//!
//! This crate contains the request semantics with ZERO web framework dependencies.
//! Handlers in the api crate decode HTTP and delegate here.
//!
//! # Modules
//!
//! - `provider` - Media storage provider abstraction and the ImageKit client
//! - `files` - Upload, delete and lookup operations on top of a provider
//! - `testing` - Recording mock provider (tests and the `test-utils` feature)

pub mod files;
pub mod provider;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
