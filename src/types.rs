//! Core type definitions for TalentLink identifiers and timestamps.
//!
//! Entities are referenced by an opaque string id plus a kind tag. The
//! store never holds entity payloads, only these references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::association::RelationType;
use crate::error::AssocError;

/// Opaque entity identifier.
///
/// TalentLink doesn't own entity records - the hosting application does.
/// Ids are compared byte-for-byte and never interpreted.
///
/// # Example
/// ```
/// use talentlink::EntityId;
///
/// let id = EntityId::new("comp1");
/// assert_eq!(id.as_str(), "comp1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Creates a new EntityId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the entity ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&EntityId> for EntityId {
    fn from(id: &EntityId) -> Self {
        id.clone()
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The closed set of record kinds the association graph links together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A client or hiring company.
    Company,
    /// A person at a company.
    Contact,
    /// A job posting.
    Job,
    /// An application to a job.
    Application,
    /// A sales deal.
    Deal,
    /// A person in the hiring pipeline.
    Candidate,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Company,
        EntityKind::Contact,
        EntityKind::Job,
        EntityKind::Application,
        EntityKind::Deal,
        EntityKind::Candidate,
    ];

    /// Returns the lowercase tag for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Contact => "contact",
            Self::Job => "job",
            Self::Application => "application",
            Self::Deal => "deal",
            Self::Candidate => "candidate",
        }
    }

    /// Returns the bucket on *other* records that holds entities of this kind.
    ///
    /// Together with [`RelationType::target_kind`] this forms the reverse
    /// mapping: the inverse of an edge in bucket `r` from an entity of kind
    /// `k` is stored in bucket `k.relation()` of the target.
    pub const fn relation(&self) -> RelationType {
        match self {
            Self::Company => RelationType::Companies,
            Self::Contact => RelationType::Contacts,
            Self::Job => RelationType::Jobs,
            Self::Application => RelationType::Applications,
            Self::Deal => RelationType::Deals,
            Self::Candidate => RelationType::Candidates,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = AssocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AssocError::unknown_kind(s))
    }
}

/// A typed reference to an entity: its kind plus its opaque id.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Kind of the referenced record.
    pub kind: EntityKind,
    /// Id of the referenced record.
    pub id: EntityId,
}

impl EntityRef {
    /// Creates a reference from a kind and id.
    pub fn new(kind: EntityKind, id: impl Into<EntityId>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    /// Reference to a company.
    pub fn company(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::Company, id)
    }

    /// Reference to a contact.
    pub fn contact(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::Contact, id)
    }

    /// Reference to a job.
    pub fn job(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::Job, id)
    }

    /// Reference to an application.
    pub fn application(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::Application, id)
    }

    /// Reference to a deal.
    pub fn deal(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::Deal, id)
    }

    /// Reference to a candidate.
    pub fn candidate(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::Candidate, id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Unix timestamp in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    ///
    /// If the system clock is before the Unix epoch, returns 0 rather
    /// than panicking.
    #[inline]
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self(duration.as_millis() as i64)
    }

    /// Creates a timestamp from Unix milliseconds.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as Unix milliseconds.
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
