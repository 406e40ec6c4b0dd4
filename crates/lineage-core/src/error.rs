//! Error types for Lineage Core

use crate::limits::ValidationError;
use crate::person::PersonId;
use crate::relation::Relation;
use thiserror::Error;

/// Result type alias using Lineage's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Lineage error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid gender: {0:?} (expected m or f)")]
    InvalidGender(String),

    #[error("Unknown relation name: {0:?}")]
    UnknownRelation(String),

    #[error("A person cannot be related to themselves")]
    SelfRelation,

    #[error("Person already has a recorded {0}")]
    DuplicateParent(Relation),

    #[error("Relation already present: {0}")]
    DuplicateRelation(Relation),

    #[error("Person already has a spouse")]
    DuplicateSpouse,

    #[error("A spousal link requires exactly one male and one female party")]
    GenderMismatch,

    #[error("No relation exists between the two persons")]
    RelationNotFound,

    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    #[error("Person id already in use: {0}")]
    DuplicateId(PersonId),

    #[error("No path found between the two persons")]
    NoPathFound,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}
