//! Generic node DAO: label-parameterized CRUD inside a caller-owned transaction.
//!
//! Every operation takes an explicit `&mut neo4rs::Txn` and issues exactly
//! one query (guarded delete: two, sequentially). The DAO never begins,
//! commits, or rolls back the transaction, performs no retries, and consumes
//! at most one record per query. Isolation between the two guarded-delete
//! phases is the store's concern, not re-implemented here.

use std::marker::PhantomData;

use chrono::Utc;
use neo4rs::{query, Query, Row, Txn};

use mythos_core::types::NodeId;

use crate::client::GraphError;
use crate::entity::{GraphEntity, NodeProps, PropValue};

/// Data access for a single node label, bound at compile time through
/// [`GraphEntity`].
///
/// Stateless across calls apart from the label-filter switch; cheap to
/// construct per request.
#[derive(Debug, Clone)]
pub struct NodeDao<E> {
    strict_label_filter: bool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Default for NodeDao<E> {
    fn default() -> Self {
        Self {
            strict_label_filter: false,
            _entity: PhantomData,
        }
    }
}

impl<E: GraphEntity> NodeDao<E> {
    /// DAO with the historical lax id lookup: [`get_by_id`] matches on the
    /// engine-wide identity without a label filter, so an id that belongs to
    /// a node of another label resolves to that node (and then fails
    /// hydration). Prefer [`NodeDao::strict`] for new call sites.
    ///
    /// [`get_by_id`]: NodeDao::get_by_id
    pub fn new() -> Self {
        Self::default()
    }

    /// DAO whose id lookup also filters on the label, so foreign-label ids
    /// read as absent instead of mis-hydrating.
    pub fn strict() -> Self {
        Self {
            strict_label_filter: true,
            _entity: PhantomData,
        }
    }

    /// Create a node from the input shape and return its store-assigned
    /// identity.
    ///
    /// `created_at` and `updated_at` are stamped from a single instant, so
    /// both are identical on a fresh node.
    pub async fn create(&self, txn: &mut Txn, input: &E::Input) -> Result<NodeId, GraphError> {
        let now = Utc::now();
        let mut props = input.props();
        props.push("created_at", PropValue::Temporal(now));
        props.push("updated_at", PropValue::Temporal(now));

        let text = create_text(E::LABEL, &props.keys());
        let q = props.bind(query(&text));

        match single(txn, q).await? {
            Some(row) => {
                let id = row
                    .get::<i64>("node_id")
                    .map_err(|e| GraphError::Database(format!("missing created node id: {e}")))?;
                tracing::debug!(label = E::LABEL, id, "Created node");
                Ok(NodeId(id))
            }
            None => Err(GraphError::Database(format!(
                "{} node not created",
                E::LABEL
            ))),
        }
    }

    /// Look a node up by its store-native identity.
    ///
    /// Absence is a first-class result, not an error.
    pub async fn get_by_id(&self, txn: &mut Txn, id: NodeId) -> Result<Option<E>, GraphError> {
        let text = get_by_id_text(E::LABEL, self.strict_label_filter);
        let q = query(&text).param("id", id.0);

        match single(txn, q).await? {
            Some(row) => {
                let node: neo4rs::Node = row
                    .get("n")
                    .map_err(|e| GraphError::Hydration(format!("failed to read node: {e}")))?;
                let mut entity = E::hydrate(&node)?;
                entity.attach_id(NodeId(node.id()));
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    /// Find the first node matching every property the input shape emits.
    ///
    /// The filter is built from presence, not truthiness: `false` and `0`
    /// fields constrain the match like any other value. When several nodes
    /// match, the store decides which one comes back.
    pub async fn get_by_properties(
        &self,
        txn: &mut Txn,
        input: &E::Input,
    ) -> Result<Option<E>, GraphError> {
        let props = input.props();
        let text = get_by_props_text(E::LABEL, &props.keys());
        let q = props.bind(query(&text));

        match single(txn, q).await? {
            Some(row) => {
                let node: neo4rs::Node = row
                    .get("n")
                    .map_err(|e| GraphError::Hydration(format!("failed to read node: {e}")))?;
                let mut entity = E::hydrate(&node)?;
                entity.attach_id(NodeId(node.id()));
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    /// Apply a partial update and return the node as it now stands.
    ///
    /// Only fields present in the update shape are written; everything else
    /// keeps its prior value (merge, not replace). `updated_at` refreshes on
    /// every call, including one with no fields present. A missing or
    /// wrong-label id is a hard [`GraphError::NotFound`], never a silent
    /// no-op.
    pub async fn update(
        &self,
        txn: &mut Txn,
        id: NodeId,
        update: &E::Update,
    ) -> Result<E, GraphError> {
        let mut props = update.props();
        props.push("updated_at", PropValue::Temporal(Utc::now()));
        let field_count = props.len();

        let text = update_text(E::LABEL, &props.keys());
        let q = props.bind(query(&text)).param("id", id.0);

        match single(txn, q).await? {
            Some(row) => {
                let node: neo4rs::Node = row
                    .get("n")
                    .map_err(|e| GraphError::Hydration(format!("failed to read node: {e}")))?;
                let mut entity = E::hydrate(&node)?;
                // Hydration validates properties only; put the identity back.
                entity.attach_id(id);
                tracing::debug!(label = E::LABEL, id = id.0, fields = field_count, "Updated node");
                Ok(entity)
            }
            None => Err(GraphError::NotFound {
                label: E::LABEL,
                id: id.0,
            }),
        }
    }

    /// Delete the node and every relationship incident to it.
    pub async fn delete_cascading(&self, txn: &mut Txn, id: NodeId) -> Result<(), GraphError> {
        let q = query(&detach_delete_text(E::LABEL)).param("id", id.0);
        let deleted = scalar(txn, q, "deleted_count").await?;
        if deleted == 0 {
            return Err(GraphError::NotFound {
                label: E::LABEL,
                id: id.0,
            });
        }
        tracing::debug!(label = E::LABEL, id = id.0, "Deleted node and relationships");
        Ok(())
    }

    /// Delete the node only if nothing is related to it.
    ///
    /// Two sequential queries: an incident-relationship count, then the
    /// delete. A non-zero count refuses the whole operation with
    /// [`GraphError::Conflict`] and leaves the node untouched.
    pub async fn delete_guarded(&self, txn: &mut Txn, id: NodeId) -> Result<(), GraphError> {
        let q = query(&rel_count_text(E::LABEL)).param("id", id.0);
        let rel_count = scalar(txn, q, "rel_count").await?;
        if rel_count > 0 {
            return Err(GraphError::Conflict {
                label: E::LABEL,
                id: id.0,
                rel_count,
            });
        }

        let q = query(&detach_delete_text(E::LABEL)).param("id", id.0);
        let deleted = scalar(txn, q, "deleted_count").await?;
        if deleted == 0 {
            return Err(GraphError::NotFound {
                label: E::LABEL,
                id: id.0,
            });
        }
        tracing::debug!(label = E::LABEL, id = id.0, "Deleted node");
        Ok(())
    }
}

// ── Transaction-scoped execution ─────────────────────────────────

/// Run a query in the transaction and consume at most one record.
async fn single(txn: &mut Txn, q: Query) -> Result<Option<Row>, GraphError> {
    let mut stream = txn.execute(q).await?;
    Ok(stream.next(txn.handle()).await?)
}

/// Run a query in the transaction and reduce it to a single integer column.
async fn scalar(txn: &mut Txn, q: Query, column: &str) -> Result<i64, GraphError> {
    match single(txn, q).await? {
        Some(row) => Ok(row.get::<i64>(column).unwrap_or(0)),
        None => Ok(0),
    }
}

// ── Query text construction ──────────────────────────────────────
//
// Labels and property keys are schema-fixed identifiers; values are always
// bound as named parameters.

fn create_text(label: &str, keys: &[&str]) -> String {
    let pairs = keys
        .iter()
        .map(|k| format!("{k}: ${k}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE (n:{label} {{{pairs}}}) RETURN id(n) AS node_id")
}

fn get_by_id_text(label: &str, strict_label_filter: bool) -> String {
    if strict_label_filter {
        format!("MATCH (n:{label}) WHERE id(n) = $id RETURN n")
    } else {
        "MATCH (n) WHERE id(n) = $id RETURN n".to_string()
    }
}

fn get_by_props_text(label: &str, keys: &[&str]) -> String {
    if keys.is_empty() {
        return format!("MATCH (n:{label}) RETURN n LIMIT 1");
    }
    let clauses = keys
        .iter()
        .map(|k| format!("n.{k} = ${k}"))
        .collect::<Vec<_>>()
        .join(" AND ");
    format!("MATCH (n:{label}) WHERE {clauses} RETURN n LIMIT 1")
}

fn update_text(label: &str, keys: &[&str]) -> String {
    let sets = keys
        .iter()
        .map(|k| format!("n.{k} = ${k}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("MATCH (n:{label}) WHERE id(n) = $id SET {sets} RETURN n")
}

fn rel_count_text(label: &str) -> String {
    format!("MATCH (n:{label})-[r]-() WHERE id(n) = $id RETURN count(r) AS rel_count")
}

fn detach_delete_text(label: &str) -> String {
    format!("MATCH (n:{label}) WHERE id(n) = $id DETACH DELETE n RETURN count(n) AS deleted_count")
}
