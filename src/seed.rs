//! JSON edge-list seeds.
//!
//! A seed file is a JSON array of edges in their flat form:
//!
//! ```json
//! [
//!   { "source_kind": "company", "source_id": "comp1", "relation": "contacts", "target_id": "contact1" }
//! ]
//! ```
//!
//! Kinds and relations are parsed by name so that unknown names surface as
//! [`AssocError::UnknownEntityKind`] / [`AssocError::UnknownRelationType`]
//! rather than a generic decoding failure.

use serde::{Deserialize, Serialize};

use crate::association::{Edge, RelationType};
use crate::error::{AssocError, Result};
use crate::types::{EntityId, EntityKind, EntityRef};

/// Flat, string-typed form of an [`Edge`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEdge {
    /// Kind tag of the bucket owner (`"company"`, `"job"`, ...).
    pub source_kind: String,
    /// Id of the bucket owner.
    pub source_id: String,
    /// Bucket name (`"contacts"`, `"candidates"`, ...).
    pub relation: String,
    /// Id of the linked record.
    pub target_id: String,
}

impl SeedEdge {
    /// Parses the names into a typed edge.
    pub fn to_edge(&self) -> Result<Edge> {
        let kind: EntityKind = self.source_kind.parse()?;
        let relation: RelationType = self.relation.parse()?;
        Ok(Edge::new(
            EntityRef::new(kind, self.source_id.as_str()),
            relation,
            EntityId::new(self.target_id.as_str()),
        ))
    }
}

impl From<&Edge> for SeedEdge {
    fn from(edge: &Edge) -> Self {
        Self {
            source_kind: edge.source.kind.to_string(),
            source_id: edge.source.id.to_string(),
            relation: edge.relation.to_string(),
            target_id: edge.target.to_string(),
        }
    }
}

/// Parses a JSON seed into typed edges.
///
/// # Errors
///
/// - [`AssocError::Serialization`] if the text is not a JSON array of seed edges
/// - [`AssocError::UnknownEntityKind`] / [`AssocError::UnknownRelationType`]
///   for unrecognized names
pub fn parse_seed_json(json: &str) -> Result<Vec<Edge>> {
    let raw: Vec<SeedEdge> = serde_json::from_str(json)?;
    raw.iter().map(SeedEdge::to_edge).collect()
}

/// Writes edges as a pretty-printed JSON seed.
pub fn to_seed_json(edges: &[Edge]) -> Result<String> {
    let raw: Vec<SeedEdge> = edges.iter().map(SeedEdge::from).collect();
    serde_json::to_string_pretty(&raw).map_err(AssocError::from)
}
