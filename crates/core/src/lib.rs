//! Core business logic for Eventra.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, derivation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `status` - Automatic event lifecycle status derivation
//! - `finance` - Per-event finance aggregation
//! - `clock` - Injectable clock capability for deterministic dates

pub mod clock;
pub mod finance;
pub mod status;
