//! mythos-core: Shared types, configuration, and error handling for the Mythos backend.
//!
//! This crate provides the foundational pieces used across all Mythos components:
//! - Domain types (Character, Ability) persisted as nodes in the graph
//! - Input/update shapes for creation, filtering, and partial mutation
//! - Graph connection settings
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use error::MythosError;
pub use types::{
    Ability, AbilityInput, AbilityUpdate, Character, CharacterInput, CharacterUpdate, Gender,
    NodeId,
};
