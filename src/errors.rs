use thiserror::Error;

use crate::model::EntityKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PostGraphError {
    #[error("email {0} is already in use")]
    DuplicateEmail(String),
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },
    #[error("invalid reference: {field} {id} does not match a live record")]
    InvalidReference { field: &'static str, id: String },
    #[error("integrity fault: {kind} {id} references missing {field} {target}")]
    IntegrityFault {
        kind: EntityKind,
        id: String,
        field: &'static str,
        target: String,
    },
    #[error("fixture error: {0}")]
    Fixture(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl PostGraphError {
    pub fn duplicate_email<T: Into<String>>(email: T) -> Self {
        PostGraphError::DuplicateEmail(email.into())
    }

    pub fn not_found<T: Into<String>>(kind: EntityKind, id: T) -> Self {
        PostGraphError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid_reference<T: Into<String>>(field: &'static str, id: T) -> Self {
        PostGraphError::InvalidReference {
            field,
            id: id.into(),
        }
    }

    pub fn integrity_fault<I: Into<String>, T: Into<String>>(
        kind: EntityKind,
        id: I,
        field: &'static str,
        target: T,
    ) -> Self {
        PostGraphError::IntegrityFault {
            kind,
            id: id.into(),
            field,
            target: target.into(),
        }
    }

    pub fn fixture<T: Into<String>>(msg: T) -> Self {
        PostGraphError::Fixture(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        PostGraphError::InvalidInput(msg.into())
    }

    /// Stable variant name, used when errors cross a serialization boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            PostGraphError::DuplicateEmail(_) => "DuplicateEmail",
            PostGraphError::NotFound { .. } => "NotFound",
            PostGraphError::InvalidReference { .. } => "InvalidReference",
            PostGraphError::IntegrityFault { .. } => "IntegrityFault",
            PostGraphError::Fixture(_) => "Fixture",
            PostGraphError::InvalidInput(_) => "InvalidInput",
        }
    }
}
