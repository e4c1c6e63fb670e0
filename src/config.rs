//! Configuration types for TalentLink.
//!
//! The [`Config`] struct controls store behavior:
//! - Relation policy (permissive or schema-enforced)
//! - Watch channel capacity
//! - Optional id length guard
//!
//! # Example
//! ```rust
//! use talentlink::{Config, RelationPolicy};
//!
//! // Use defaults (permissive, 256-event watch buffers)
//! let config = Config::default();
//!
//! // Enforce the recruiting graph schema
//! let config = Config {
//!     relation_policy: RelationPolicy::Schema,
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::association::RelationType;
use crate::error::ValidationError;
use crate::types::EntityKind;

/// Upper bound for `max_id_length`.
pub const MAX_ID_LENGTH_LIMIT: usize = 4096;

/// Store configuration options.
///
/// All fields have sensible defaults. Use struct update syntax to override
/// specific settings:
///
/// ```rust
/// use talentlink::Config;
///
/// let config = Config {
///     watch_buffer_size: 1024,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    /// Which `(entity kind, relation)` pairs the store accepts.
    pub relation_policy: RelationPolicy,

    /// Capacity of each subscriber's bounded event queue.
    ///
    /// Events for a subscriber whose queue is full are dropped.
    /// Default: 256
    pub watch_buffer_size: usize,

    /// Optional id guard applied when links are added.
    ///
    /// With `Some(n)`, `add_association` and `seed` reject ids that are
    /// empty or longer than `n` bytes. Reads and removals accept any id.
    /// Default: `None` (every string is a valid id)
    pub max_id_length: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            relation_policy: RelationPolicy::Permissive,
            watch_buffer_size: 256,
            max_id_length: None,
        }
    }
}

impl Config {
    /// Creates a new Config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Config that enforces the recruiting graph schema.
    ///
    /// # Example
    /// ```rust
    /// use talentlink::Config;
    ///
    /// let config = Config::with_schema();
    /// assert!(config.relation_policy.is_schema());
    /// ```
    pub fn with_schema() -> Self {
        Self {
            relation_policy: RelationPolicy::Schema,
            ..Default::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Called automatically by `AssociationStore::new()`.
    ///
    /// # Errors
    /// Returns `ValidationError` if:
    /// - `watch_buffer_size` is 0
    /// - `max_id_length` is `Some(0)` or `Some(n)` with n > 4096
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.watch_buffer_size == 0 {
            return Err(ValidationError::invalid_field(
                "watch_buffer_size",
                "must be greater than 0",
            ));
        }

        match self.max_id_length {
            Some(0) => {
                return Err(ValidationError::invalid_field(
                    "max_id_length",
                    "must be greater than 0",
                ));
            }
            Some(limit) if limit > MAX_ID_LENGTH_LIMIT => {
                return Err(ValidationError::invalid_field(
                    "max_id_length",
                    format!("must not exceed {}", MAX_ID_LENGTH_LIMIT),
                ));
            }
            _ => {}
        }

        Ok(())
    }
}

/// Relation acceptance policy.
///
/// The reverse mapping is total in both modes; the policy only decides
/// which buckets a given kind of record may own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationPolicy {
    /// Any relation type on any kind of record.
    #[default]
    Permissive,

    /// Only the buckets of the recruiting graph (see [`RelationPolicy::allows`]).
    ///
    /// Both the forward bucket and its reverse bucket must be allowed.
    Schema,
}

impl RelationPolicy {
    /// Returns true if this policy enforces the schema.
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema)
    }

    /// Returns true if a record of `kind` may own a `relation` bucket.
    pub fn allows(&self, kind: EntityKind, relation: RelationType) -> bool {
        match self {
            Self::Permissive => true,
            Self::Schema => schema_relations(kind).contains(&relation),
        }
    }
}

/// Buckets each kind owns in the recruiting graph.
///
/// Symmetric: `r` is listed for `k` iff `k.relation()` is listed for
/// `r.target_kind()`.
pub const fn schema_relations(kind: EntityKind) -> &'static [RelationType] {
    use RelationType::*;
    match kind {
        EntityKind::Company => &[Contacts, Jobs, Deals, Applications],
        EntityKind::Contact => &[Companies, Deals, Applications],
        EntityKind::Job => &[Companies, Candidates, Applications],
        EntityKind::Application => &[Candidates, Jobs, Companies, Contacts],
        EntityKind::Deal => &[Companies, Contacts],
        EntityKind::Candidate => &[Applications, Jobs],
    }
}
