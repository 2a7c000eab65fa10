//! Automatic event lifecycle status derivation.

pub mod derive;

#[cfg(test)]
mod tests;

pub use derive::{EventStatus, StatusDecision, derive_status};
