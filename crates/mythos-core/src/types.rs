//! Core domain types for the Mythos graph.
//!
//! These types represent the nodes persisted in the Neo4j store, plus the
//! input shapes (creation / exact-match filtering) and update shapes
//! (partial mutation) that travel through the data access layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MythosError;

// ── Identity ──────────────────────────────────────────────────────

/// Store-native node identity, assigned by Neo4j on creation.
///
/// Not a property of the node: it is the engine's own integer handle and is
/// immutable once assigned. Entities hydrated from the store carry it as
/// `Some`; freshly built values that never touched the store carry `None`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ── Enums ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// String form stored as the node property.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = MythosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(MythosError::Validation(format!("Unknown gender: {s}"))),
        }
    }
}

// ── Character ─────────────────────────────────────────────────────

/// A playable character node (label `Character`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: Option<NodeId>,
    pub character_name: String,
    pub gender: Gender,
    pub alive: bool,
    pub level: i64,
    pub xp: i64,
    pub money: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Properties required to create a character, or to exact-match one.
///
/// Never carries identity. Every field participates in property filters,
/// including ones that are legitimately `false` or zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterInput {
    pub character_name: String,
    pub gender: Gender,
    pub alive: bool,
    pub level: i64,
    pub xp: i64,
    pub money: i64,
}

impl CharacterInput {
    /// New character with starting stats.
    pub fn new(character_name: impl Into<String>, gender: Gender) -> Self {
        Self {
            character_name: character_name.into(),
            gender,
            alive: true,
            level: 1,
            xp: 1,
            money: 1,
        }
    }

    pub fn validate(&self) -> Result<(), MythosError> {
        if self.character_name.is_empty() || self.character_name.len() > 50 {
            return Err(MythosError::Validation(
                "character_name must be 1..=50 characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update for a character. Only `Some` fields are applied;
/// absent is not the same as set-to-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterUpdate {
    pub character_name: Option<String>,
    pub gender: Option<Gender>,
    pub alive: Option<bool>,
    pub level: Option<i64>,
    pub xp: Option<i64>,
    pub money: Option<i64>,
}

impl CharacterUpdate {
    pub fn validate(&self) -> Result<(), MythosError> {
        if let Some(name) = &self.character_name {
            if name.is_empty() || name.len() > 50 {
                return Err(MythosError::Validation(
                    "character_name must be 1..=50 characters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// ── Ability ───────────────────────────────────────────────────────

/// A learnable ability node (label `Ability`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ability {
    pub id: Option<NodeId>,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityInput {
    pub name: String,
    pub description: Option<String>,
}

impl AbilityInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn validate(&self) -> Result<(), MythosError> {
        if self.name.is_empty() {
            return Err(MythosError::Validation(
                "ability name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilityUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
