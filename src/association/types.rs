//! Data types for entity associations.
//!
//! An association is a directed edge stored in a bucket keyed by the
//! owning entity and a [`RelationType`]. Every edge has an inverse stored
//! in the target's bucket named after the source's kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssocError;
use crate::types::{EntityId, EntityKind, EntityRef};

/// A named bucket of outgoing links, one per target kind.
///
/// The bucket name says what it holds: a company's `Contacts` bucket holds
/// contact ids, a job's `Candidates` bucket holds candidate ids.
///
/// # Example
///
/// ```rust
/// use talentlink::{EntityKind, RelationType};
///
/// let rel: RelationType = "contacts".parse().unwrap();
/// assert_eq!(rel.target_kind(), EntityKind::Contact);
/// // A contact added to a company's contacts is mirrored into the
/// // contact's companies bucket.
/// assert_eq!(rel.reverse_from(EntityKind::Company), RelationType::Companies);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    /// Linked companies.
    Companies,
    /// Linked contacts.
    Contacts,
    /// Linked jobs.
    Jobs,
    /// Linked applications.
    Applications,
    /// Linked deals.
    Deals,
    /// Linked candidates.
    Candidates,
}

impl RelationType {
    /// Every relation type, in declaration order.
    pub const ALL: [RelationType; 6] = [
        RelationType::Companies,
        RelationType::Contacts,
        RelationType::Jobs,
        RelationType::Applications,
        RelationType::Deals,
        RelationType::Candidates,
    ];

    /// Returns the bucket name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Companies => "companies",
            Self::Contacts => "contacts",
            Self::Jobs => "jobs",
            Self::Applications => "applications",
            Self::Deals => "deals",
            Self::Candidates => "candidates",
        }
    }

    /// Returns the kind of entity this bucket holds.
    pub const fn target_kind(&self) -> EntityKind {
        match self {
            Self::Companies => EntityKind::Company,
            Self::Contacts => EntityKind::Contact,
            Self::Jobs => EntityKind::Job,
            Self::Applications => EntityKind::Application,
            Self::Deals => EntityKind::Deal,
            Self::Candidates => EntityKind::Candidate,
        }
    }

    /// Returns the bucket that holds the inverse edge when this bucket is
    /// owned by an entity of `source_kind`.
    ///
    /// Applying it twice returns the original relation:
    /// `r.reverse_from(k).reverse_from(r.target_kind()) == r`.
    #[inline]
    pub const fn reverse_from(&self, source_kind: EntityKind) -> RelationType {
        source_kind.relation()
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = AssocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationType::ALL
            .into_iter()
            .find(|rel| rel.as_str() == s)
            .ok_or_else(|| AssocError::unknown_relation(s))
    }
}

/// A directed edge `(source, relation, target)`.
///
/// The target's kind is implied by the relation.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// The entity owning the bucket.
    pub source: EntityRef,

    /// The bucket the target is stored in.
    pub relation: RelationType,

    /// The linked entity's id.
    pub target: EntityId,
}

impl Edge {
    /// Creates an edge.
    pub fn new(source: EntityRef, relation: RelationType, target: impl Into<EntityId>) -> Self {
        Self {
            source,
            relation,
            target: target.into(),
        }
    }

    /// Returns the typed reference of the target.
    pub fn target_ref(&self) -> EntityRef {
        EntityRef::new(self.relation.target_kind(), self.target.clone())
    }

    /// Returns the inverse edge, as stored in the target's reverse bucket.
    pub fn reversed(&self) -> Edge {
        Edge {
            source: self.target_ref(),
            relation: self.relation.reverse_from(self.source.kind),
            target: self.source.id.clone(),
        }
    }

    /// Returns true if either end of the edge is `entity`.
    pub fn touches(&self, entity: &EntityRef) -> bool {
        &self.source == entity
            || (self.relation.target_kind() == entity.kind && self.target == entity.id)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -[{}]-> {}:{}",
            self.source,
            self.relation,
            self.relation.target_kind(),
            self.target
        )
    }
}

/// Bucket and edge counts of a store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of non-empty buckets.
    pub bucket_count: usize,

    /// Number of stored edges, counting both directions.
    pub edge_count: usize,
}
