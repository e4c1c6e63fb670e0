//! Error types for TalentLink.
//!
//! TalentLink uses a hierarchical error system:
//! - `AssocError` is the top-level error returned by all public APIs
//! - `ValidationError` provides detail for rejected input
//!
//! There are no "not found" errors: reading an empty bucket yields an
//! empty sequence and removing an absent edge is a silent no-op.
//!
//! # Error Handling Pattern
//! ```rust,ignore
//! use talentlink::{AssociationStore, Config, EntityRef, RelationType, Result};
//!
//! fn example() -> Result<()> {
//!     let store = AssociationStore::new(Config::default())?;
//!     let relation: RelationType = "contacts".parse()?;
//!     store.add_association(&EntityRef::company("comp1"), relation, "contact1")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias for TalentLink operations.
pub type Result<T> = std::result::Result<T, AssocError>;

/// Top-level error enum for all TalentLink operations.
///
/// This is the only error type returned by public APIs. Errors are
/// raised before anything is mutated, so the store is unchanged; the one
/// exception is `AssociationStore::seed`, which keeps the edges applied
/// before the failing one.
#[derive(Debug, Error)]
pub enum AssocError {
    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A relation name that is not one of the recognized buckets.
    #[error("Unknown relation type: '{0}'")]
    UnknownRelationType(String),

    /// An entity kind tag that is not one of the recognized kinds.
    #[error("Unknown entity kind: '{0}'")]
    UnknownEntityKind(String),

    /// Seed or snapshot (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The store's internal lock was poisoned by a panicking writer.
    #[error("Lock error: {0}")]
    Lock(String),
}

impl AssocError {
    /// Creates an unknown relation type error for the given name.
    pub fn unknown_relation(name: impl Into<String>) -> Self {
        Self::UnknownRelationType(name.into())
    }

    /// Creates an unknown entity kind error for the given tag.
    pub fn unknown_kind(tag: impl Into<String>) -> Self {
        Self::UnknownEntityKind(tag.into())
    }

    /// Creates a lock error with the given message.
    pub fn lock(msg: impl Into<String>) -> Self {
        Self::Lock(msg.into())
    }

    /// Returns true if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an unknown relation type error.
    pub fn is_unknown_relation(&self) -> bool {
        matches!(self, Self::UnknownRelationType(_))
    }

    /// Returns true if this is an unknown entity kind error.
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, Self::UnknownEntityKind(_))
    }

    /// Returns true if this is a serialization error.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization(_))
    }
}

impl From<serde_json::Error> for AssocError {
    fn from(err: serde_json::Error) -> Self {
        AssocError::Serialization(err.to_string())
    }
}

/// Validation errors for input data.
///
/// These errors indicate problems with ids or relations provided by the caller.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A field has an invalid value.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Name of the invalid field.
        field: String,
        /// Why the value is invalid.
        reason: String,
    },

    /// A required field is missing or empty.
    #[error("Required field missing: {field}")]
    RequiredField {
        /// Name of the missing field.
        field: String,
    },

    /// The relation is not part of the configured schema for this entity kind.
    #[error("Relation '{relation}' is not allowed on {kind} records")]
    RelationNotAllowed {
        /// Entity kind tag of the bucket owner.
        kind: String,
        /// Relation (bucket) name.
        relation: String,
    },
}

impl ValidationError {
    /// Creates an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a required field error.
    pub fn required_field(field: impl Into<String>) -> Self {
        Self::RequiredField {
            field: field.into(),
        }
    }

    /// Creates a relation-not-allowed error.
    pub fn relation_not_allowed(kind: impl ToString, relation: impl ToString) -> Self {
        Self::RelationNotAllowed {
            kind: kind.to_string(),
            relation: relation.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: AssocError =
            ValidationError::invalid_field("watch_buffer_size", "must be greater than 0").into();
        assert_eq!(
            err.to_string(),
            "Validation error: Invalid field 'watch_buffer_size': must be greater than 0"
        );
    }

    #[test]
    fn test_unknown_relation_display() {
        let err = AssocError::unknown_relation("teams");
        assert_eq!(err.to_string(), "Unknown relation type: 'teams'");
        assert!(err.is_unknown_relation());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_relation_not_allowed_display() {
        let err = ValidationError::relation_not_allowed("deal", "candidates");
        assert_eq!(
            err.to_string(),
            "Relation 'candidates' is not allowed on deal records"
        );
    }

    #[test]
    fn test_is_validation() {
        let err: AssocError = ValidationError::required_field("target_id").into();
        assert!(err.is_validation());
        assert!(!err.is_unknown_kind());
    }

    #[test]
    fn test_serde_json_conversion() {
        fn inner() -> Result<Vec<u32>> {
            Ok(serde_json::from_str("[1, 2,")?)
        }

        let err = inner().unwrap_err();
        assert!(err.is_serialization());
    }
}
