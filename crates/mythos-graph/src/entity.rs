//! Entity schema traits and the property-set shape used to build queries.
//!
//! A node label is bound to three shapes: the entity itself (what reads
//! hydrate into), an input shape (all fields required to create or to
//! exact-match), and an update shape (optional fields for partial mutation).
//! Labels and property keys are schema-fixed identifiers trusted in query
//! text; property values always travel as named parameters.

use chrono::{DateTime, Utc};
use neo4rs::Query;

use mythos_core::types::{
    Ability, AbilityInput, AbilityUpdate, Character, CharacterInput, CharacterUpdate, Gender,
    NodeId,
};

use crate::client::GraphError;
use crate::hydrate::{bool_prop, int_prop, opt_string_prop, string_prop, temporal_prop};

// ── Property sets ─────────────────────────────────────────────────

/// A scalar or temporal property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Temporal(DateTime<Utc>),
}

/// An ordered set of named properties destined for query parameters.
///
/// Presence is what counts: a `false` or `0` entry is included in match
/// and patch clauses like any other value.
#[derive(Debug, Clone, Default)]
pub struct Props(Vec<(&'static str, PropValue)>);

impl Props {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, key: &'static str, value: PropValue) {
        self.0.push((key, value));
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.0.iter().map(|(k, _)| *k).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Bind every entry as a named parameter on the query.
    ///
    /// Temporal values are encoded as RFC 3339 strings, the same form the
    /// hydrator normalizes back to [`DateTime<Utc>`] on read.
    pub fn bind(self, query: Query) -> Query {
        self.0.into_iter().fold(query, |q, (key, value)| match value {
            PropValue::Str(v) => q.param(key, v),
            PropValue::Int(v) => q.param(key, v),
            PropValue::Float(v) => q.param(key, v),
            PropValue::Bool(v) => q.param(key, v),
            PropValue::Temporal(v) => q.param(key, v.to_rfc3339()),
        })
    }
}

/// Conversion from a typed shape to its property set.
pub trait NodeProps {
    /// Properties present in this shape. Input shapes emit every field;
    /// update shapes emit only the fields that are `Some`.
    fn props(&self) -> Props;
}

// ── Entity schema ─────────────────────────────────────────────────

/// Binds a node label to its entity, input, and update shapes.
///
/// The label is a compile-time constant from a closed set of schemas; it is
/// never derived from request input, which keeps the interpolated clause
/// text safe in an otherwise fully parameterized query design.
pub trait GraphEntity: Sized {
    const LABEL: &'static str;

    type Input: NodeProps;
    type Update: NodeProps;

    /// Build the entity from a raw node's property map.
    ///
    /// Validates properties only; the store-native identity is not part of
    /// the map, so the DAO re-attaches it afterwards via [`attach_id`].
    ///
    /// [`attach_id`]: GraphEntity::attach_id
    fn hydrate(node: &neo4rs::Node) -> Result<Self, GraphError>;

    fn attach_id(&mut self, id: NodeId);
}

// ── Character ─────────────────────────────────────────────────────

impl NodeProps for CharacterInput {
    fn props(&self) -> Props {
        let mut props = Props::new();
        props.push("character_name", PropValue::Str(self.character_name.clone()));
        props.push("gender", PropValue::Str(self.gender.as_str().to_string()));
        props.push("alive", PropValue::Bool(self.alive));
        props.push("level", PropValue::Int(self.level));
        props.push("xp", PropValue::Int(self.xp));
        props.push("money", PropValue::Int(self.money));
        props
    }
}

impl NodeProps for CharacterUpdate {
    fn props(&self) -> Props {
        let mut props = Props::new();
        if let Some(name) = &self.character_name {
            props.push("character_name", PropValue::Str(name.clone()));
        }
        if let Some(gender) = &self.gender {
            props.push("gender", PropValue::Str(gender.as_str().to_string()));
        }
        if let Some(alive) = self.alive {
            props.push("alive", PropValue::Bool(alive));
        }
        if let Some(level) = self.level {
            props.push("level", PropValue::Int(level));
        }
        if let Some(xp) = self.xp {
            props.push("xp", PropValue::Int(xp));
        }
        if let Some(money) = self.money {
            props.push("money", PropValue::Int(money));
        }
        props
    }
}

impl GraphEntity for Character {
    const LABEL: &'static str = "Character";

    type Input = CharacterInput;
    type Update = CharacterUpdate;

    fn hydrate(node: &neo4rs::Node) -> Result<Self, GraphError> {
        let gender: Gender = string_prop(node, "gender")?
            .parse()
            .map_err(|e| GraphError::Hydration(format!("gender: {e}")))?;

        Ok(Self {
            id: None,
            character_name: string_prop(node, "character_name")?,
            gender,
            alive: bool_prop(node, "alive")?,
            level: int_prop(node, "level")?,
            xp: int_prop(node, "xp")?,
            money: int_prop(node, "money")?,
            created_at: temporal_prop(node, "created_at")?,
            updated_at: temporal_prop(node, "updated_at")?,
        })
    }

    fn attach_id(&mut self, id: NodeId) {
        self.id = Some(id);
    }
}

// ── Ability ───────────────────────────────────────────────────────

impl NodeProps for AbilityInput {
    fn props(&self) -> Props {
        let mut props = Props::new();
        props.push("name", PropValue::Str(self.name.clone()));
        if let Some(description) = &self.description {
            props.push("description", PropValue::Str(description.clone()));
        }
        props
    }
}

impl NodeProps for AbilityUpdate {
    fn props(&self) -> Props {
        let mut props = Props::new();
        if let Some(name) = &self.name {
            props.push("name", PropValue::Str(name.clone()));
        }
        if let Some(description) = &self.description {
            props.push("description", PropValue::Str(description.clone()));
        }
        props
    }
}

impl GraphEntity for Ability {
    const LABEL: &'static str = "Ability";

    type Input = AbilityInput;
    type Update = AbilityUpdate;

    fn hydrate(node: &neo4rs::Node) -> Result<Self, GraphError> {
        Ok(Self {
            id: None,
            name: string_prop(node, "name")?,
            description: opt_string_prop(node, "description"),
            created_at: temporal_prop(node, "created_at")?,
            updated_at: temporal_prop(node, "updated_at")?,
        })
    }

    fn attach_id(&mut self, id: NodeId) {
        self.id = Some(id);
    }
}
