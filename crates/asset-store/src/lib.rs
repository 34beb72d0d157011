//! # asset-store
//!
//! Generic typed-asset state management over an external ledger key/value
//! store.
//!
//! ## Role in System
//!
//! - **Single CRUD engine**: every contract type (meters, readings, bridge
//!   links, generic info records) shares one create/read/update/delete and
//!   query implementation instead of reimplementing key construction,
//!   serialization, and existence checks per type
//! - **Composite-key namespacing**: asset types partition one shared
//!   keyspace; isolation between types is purely key-level
//! - **Dual storage path**: every operation targets either the public world
//!   state or a named private-data collection, selected by an explicit
//!   [`StorageLocation`](domain::StorageLocation)
//! - **Deterministic results**: writes go through canonical encoding and
//!   range/rich-query results are aggregated into a canonically-sorted
//!   collection, so logically equal state is byte-identical everywhere
//!
//! ## Boundaries
//!
//! Consensus, block validation, endorsement, private-data dissemination,
//! and the commit pipeline belong to the external ledger platform, reached
//! only through the [`LedgerStub`](ports::LedgerStub) port. This crate adds
//! no threading, locking, caching, or retries of its own; one transaction
//! context per invocation, with ordering and conflict detection supplied by
//! the platform.

pub mod adapters;
pub mod aggregate;
pub mod domain;
pub mod ports;
pub mod service;

pub use aggregate::aggregate;
pub use domain::*;
pub use ports::*;
pub use service::{AssetStore, Partition};
