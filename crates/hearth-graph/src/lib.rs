//! # Hearth Graph
//!
//! Neo4j synchronization layer for the Hearth family organizer.
//!
//! Mirrors upstream document writes into a property graph of people,
//! families, tasks, events, responsibilities and surveys, and maintains the
//! derived cognitive-load metrics on each person.

pub mod client;
pub mod schema;
pub mod sync;

pub use client::{GraphClient, GraphConfig, GraphCounts, DEFAULT_WRITE_RETRIES};
pub use sync::{SyncService, SyncOutcome};
