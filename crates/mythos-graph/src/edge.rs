//! Relationship creation between existing nodes.
//!
//! The DAO treats relationships as something discovered by traversal, not a
//! first-class entity; this helper exists so callers (seeding, tests, the
//! request layer) can wire nodes together inside the same transaction the
//! DAO operates in.

use neo4rs::{query, Txn};

use mythos_core::types::NodeId;

use crate::client::GraphError;

/// Create a directed relationship between two nodes by identity.
///
/// `rel_type` is a schema-fixed identifier (like a label) and must never
/// come from untrusted input; both endpoints are bound as parameters.
pub async fn create_relationship(
    txn: &mut Txn,
    from: NodeId,
    to: NodeId,
    rel_type: &str,
) -> Result<(), GraphError> {
    let text = format!(
        "MATCH (a) WHERE id(a) = $from \
         MATCH (b) WHERE id(b) = $to \
         CREATE (a)-[:{rel_type}]->(b)"
    );
    txn.run(query(&text).param("from", from.0).param("to", to.0))
        .await?;
    tracing::debug!(from = from.0, to = to.0, rel_type, "Created relationship");
    Ok(())
}
