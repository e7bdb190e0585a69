//! Hearth Firestore Data Layer
//!
//! Read-only REST access to the upstream document store. The live sync
//! path never reads Firestore (it works from pushed change payloads); this
//! crate exists for the backfill utility, which replays whole collections.

pub mod client;
pub mod value;

pub use client::{FirestoreClient, FirestoreConfig, FirestoreDocument};
pub use value::{decode_document_fields, decode_value};

use thiserror::Error;

/// Error type for Firestore operations.
#[derive(Error, Debug)]
pub enum FirestoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

/// Result type for Firestore operations.
pub type FirestoreResult<T> = Result<T, FirestoreError>;
