//! Shared types, errors, and configuration for Eventra.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Auth claims and token validation (the identity provider is external)
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod types;

pub use auth::{Claims, JwtError, JwtService, Role};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
