//! Design snapshots: the JSON boundary of the engine.
//!
//! # Architecture
//!
//! ```text
//! JSON text
//!   ↓ serde (DTO layer)
//! dto types
//!   ↓ validate + convert
//! Document (closed model)
//!   ↓ to_dto()
//! JSON text
//! ```

pub mod dto;
pub mod loader;

use crate::element::Document;

pub use dto::{DocumentDto, ElementDto, PageDto};
pub use loader::{load, to_dto, LoadError, ModelError};

/// Errors from parsing and loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// JSON deserialization failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Model validation failed.
    #[error("{0}")]
    Load(#[from] LoadError),
}

/// Parses a JSON snapshot into a validated [`Document`].
///
/// # Errors
///
/// Returns an error if the JSON is malformed or fails model validation.
pub fn load_document(json: &str) -> Result<Document, SnapshotError> {
    let dto: DocumentDto = serde_json::from_str(json)?;
    Ok(load(dto)?)
}

/// Serializes a document to pretty-printed snapshot JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(document: &Document) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(&to_dto(document))?)
}
