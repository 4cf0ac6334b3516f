//! Mythos Graph — Neo4j client and generic node DAO.
//!
//! This crate is the single access point for the Neo4j store. All node
//! reads and writes flow through [`NodeDao`], which executes inside a
//! caller-supplied transaction: the request layer owns begin/commit/rollback,
//! the DAO only issues queries.

pub mod client;
pub mod dao;
pub mod edge;
pub mod entity;
pub mod hydrate;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use dao::NodeDao;
pub use entity::{GraphEntity, NodeProps, PropValue, Props};
