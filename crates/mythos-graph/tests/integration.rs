//! Integration tests for mythos-graph against a live Neo4j instance.
//!
//! Run with: cargo test --package mythos-graph --test integration -- --ignored
//!
//! Every test runs inside a single transaction that is rolled back at the
//! end, so nothing persists between tests and no cleanup pass is needed.
//! Skipped automatically if Neo4j is not available.

use mythos_core::types::{Ability, Character, CharacterInput, CharacterUpdate, Gender, NodeId};
use mythos_graph::edge::create_relationship;
use mythos_graph::{GraphClient, GraphConfig, GraphError, NodeDao};

use neo4rs::Txn;
use uuid::Uuid;

async fn connect_or_skip() -> Option<GraphClient> {
    let config = GraphConfig::default();
    match GraphClient::connect(&config).await {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Skipping integration test (Neo4j not available): {e}");
            None
        }
    }
}

/// Unique name so property filters never collide with leftover data.
fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

fn make_input(name: &str) -> CharacterInput {
    CharacterInput::new(name.to_string(), Gender::Female)
}

/// Incident relationship count straight from the store, bypassing the DAO.
async fn raw_rel_count(txn: &mut Txn, id: NodeId) -> i64 {
    let q = neo4rs::query("MATCH (n)-[r]-() WHERE id(n) = $id RETURN count(r) AS c")
        .param("id", id.0);
    let mut stream = txn.execute(q).await.unwrap();
    let row = stream.next(txn.handle()).await.unwrap().unwrap();
    row.get::<i64>("c").unwrap()
}

// An identity no live store will have handed out.
const ABSENT_ID: NodeId = NodeId(0x7fff_ffff_ff00_0000);

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn create_then_get_by_id_roundtrip() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let mut txn = client.start_txn().await.unwrap();
    let dao = NodeDao::<Character>::new();

    let input = make_input(&unique_name("roundtrip"));
    let id = dao.create(&mut txn, &input).await.unwrap();

    let found = dao.get_by_id(&mut txn, id).await.unwrap().unwrap();
    assert_eq!(found.id, Some(id));
    assert_eq!(found.character_name, input.character_name);
    assert_eq!(found.gender, Gender::Female);
    assert!(found.alive);
    assert_eq!(found.level, 1);
    assert_eq!(found.created_at, found.updated_at);

    txn.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn absent_id_reads_none_but_mutations_fail() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let mut txn = client.start_txn().await.unwrap();
    let dao = NodeDao::<Character>::new();

    assert!(dao.get_by_id(&mut txn, ABSENT_ID).await.unwrap().is_none());

    let err = dao
        .update(&mut txn, ABSENT_ID, &CharacterUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::NotFound { .. }));

    let err = dao.delete_cascading(&mut txn, ABSENT_ID).await.unwrap_err();
    assert!(matches!(err, GraphError::NotFound { .. }));

    let err = dao.delete_guarded(&mut txn, ABSENT_ID).await.unwrap_err();
    assert!(matches!(err, GraphError::NotFound { .. }));

    txn.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn empty_update_refreshes_timestamp_only() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let mut txn = client.start_txn().await.unwrap();
    let dao = NodeDao::<Character>::new();

    let input = make_input(&unique_name("empty-update"));
    let id = dao.create(&mut txn, &input).await.unwrap();
    let before = dao.get_by_id(&mut txn, id).await.unwrap().unwrap();

    let after = dao
        .update(&mut txn, id, &CharacterUpdate::default())
        .await
        .unwrap();

    assert_eq!(after.id, Some(id));
    assert_eq!(after.character_name, before.character_name);
    assert_eq!(after.level, before.level);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);

    txn.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn partial_update_merges() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let mut txn = client.start_txn().await.unwrap();
    let dao = NodeDao::<Character>::new();

    let input = make_input(&unique_name("merge"));
    let id = dao.create(&mut txn, &input).await.unwrap();

    let update = CharacterUpdate {
        level: Some(5),
        money: Some(250),
        ..Default::default()
    };
    let after = dao.update(&mut txn, id, &update).await.unwrap();

    assert_eq!(after.level, 5);
    assert_eq!(after.money, 250);
    // Untouched fields keep their prior values.
    assert_eq!(after.character_name, input.character_name);
    assert_eq!(after.gender, input.gender);
    assert_eq!(after.xp, input.xp);

    txn.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn get_by_properties_matches_false_and_zero() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let mut txn = client.start_txn().await.unwrap();
    let dao = NodeDao::<Character>::new();

    let input = CharacterInput {
        character_name: unique_name("fallen"),
        gender: Gender::Other,
        alive: false,
        level: 0,
        xp: 0,
        money: 0,
    };
    let id = dao.create(&mut txn, &input).await.unwrap();

    let found = dao.get_by_properties(&mut txn, &input).await.unwrap();
    assert_eq!(found.unwrap().id, Some(id));

    // Same shape with one flipped field no longer matches.
    let mut miss = input.clone();
    miss.alive = true;
    assert!(dao.get_by_properties(&mut txn, &miss).await.unwrap().is_none());

    txn.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn guarded_delete_conflict_leaves_everything_intact() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let mut txn = client.start_txn().await.unwrap();
    let dao = NodeDao::<Character>::new();

    let a = dao
        .create(&mut txn, &make_input(&unique_name("guarded-a")))
        .await
        .unwrap();
    let b = dao
        .create(&mut txn, &make_input(&unique_name("guarded-b")))
        .await
        .unwrap();
    create_relationship(&mut txn, a, b, "KNOWS").await.unwrap();

    let err = dao.delete_guarded(&mut txn, a).await.unwrap_err();
    assert!(matches!(err, GraphError::Conflict { rel_count: 1, .. }));

    // Node and relationship untouched.
    assert!(dao.get_by_id(&mut txn, a).await.unwrap().is_some());
    assert_eq!(raw_rel_count(&mut txn, a).await, 1);
    assert_eq!(raw_rel_count(&mut txn, b).await, 1);

    txn.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn guarded_delete_removes_unrelated_node() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let mut txn = client.start_txn().await.unwrap();
    let dao = NodeDao::<Character>::new();

    let id = dao
        .create(&mut txn, &make_input(&unique_name("loner")))
        .await
        .unwrap();

    dao.delete_guarded(&mut txn, id).await.unwrap();
    assert!(dao.get_by_id(&mut txn, id).await.unwrap().is_none());

    txn.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn cascading_delete_removes_node_and_relationships() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let mut txn = client.start_txn().await.unwrap();
    let dao = NodeDao::<Character>::new();

    let a = dao
        .create(&mut txn, &make_input(&unique_name("cascade-a")))
        .await
        .unwrap();
    let b = dao
        .create(&mut txn, &make_input(&unique_name("cascade-b")))
        .await
        .unwrap();
    create_relationship(&mut txn, a, b, "KNOWS").await.unwrap();

    // Guarded refuses, cascading goes through.
    let err = dao.delete_guarded(&mut txn, a).await.unwrap_err();
    assert!(matches!(err, GraphError::Conflict { .. }));

    dao.delete_cascading(&mut txn, a).await.unwrap();

    assert!(dao.get_by_id(&mut txn, a).await.unwrap().is_none());
    // The relationship is no longer discoverable from the surviving endpoint.
    assert_eq!(raw_rel_count(&mut txn, b).await, 0);
    assert!(dao.get_by_id(&mut txn, b).await.unwrap().is_some());

    txn.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn strict_label_filter_hides_foreign_labels() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let mut txn = client.start_txn().await.unwrap();

    let characters = NodeDao::<Character>::new();
    let id = characters
        .create(&mut txn, &make_input(&unique_name("mislabel")))
        .await
        .unwrap();

    // A strict Ability DAO refuses to resolve a Character's identity.
    let abilities = NodeDao::<Ability>::strict();
    assert!(abilities.get_by_id(&mut txn, id).await.unwrap().is_none());

    txn.rollback().await.unwrap();
}
