//! Shared configuration and errors for FileSync.
//!
//! This crate provides the pieces every other crate agrees on:
//! - Layered application configuration and the startup credential gate
//! - The application-wide error taxonomy

pub mod config;
pub mod error;

pub use config::{AppConfig, CredentialStatus, ImageKitConfig, ImageKitCredentials};
pub use error::AppError;
