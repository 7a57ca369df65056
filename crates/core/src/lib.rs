//! `pme360-core` — shared building blocks for the 360 PME client core.
//!
//! This crate contains **pure** primitives (no storage or transport concerns).

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::SessionId;
