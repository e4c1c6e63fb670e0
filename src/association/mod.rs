//! Association management module.
//!
//! An **association** links two records (company, contact, job,
//! application, deal, candidate) so that each shows up in the other's
//! related-records panel.
//!
//! # Operations
//!
//! All association operations are available on
//! [`AssociationStore`](crate::AssociationStore):
//!
//! - [`get_associations(entity, relation)`](crate::AssociationStore::get_associations)
//! - [`add_association(entity, relation, target)`](crate::AssociationStore::add_association)
//! - [`remove_association(entity, relation, target)`](crate::AssociationStore::remove_association)
//! - [`detach_entity(entity)`](crate::AssociationStore::detach_entity)
//!
//! # Constraints
//!
//! - A bucket never holds the same id twice
//! - `target ∈ bucket(source, r)` iff `source ∈ bucket(target, r')`, where
//!   `r'` is [`RelationType::reverse_from`] the source kind
//! - Any string is an id; reads and removals never reject one
//! - Adds are checked against `Config::max_id_length` when it is set, and
//!   under [`RelationPolicy::Schema`](crate::RelationPolicy::Schema) both
//!   buckets must belong to the recruiting graph

pub(crate) mod graph;
pub mod types;

pub use types::{Edge, RelationType, StoreStats};

use crate::config::Config;
use crate::error::{AssocError, ValidationError};

/// Validates an edge before it is added.
///
/// Checks:
/// - With `max_id_length` set, source and target ids are non-empty and
///   within the limit
/// - The relation policy accepts both the forward and the reverse bucket
///
/// Entity existence is never checked; that belongs to the calling layer.
pub(crate) fn validate_edge(config: &Config, edge: &Edge) -> Result<(), AssocError> {
    if let Some(limit) = config.max_id_length {
        validate_id(limit, "source_id", edge.source.id.as_str())?;
        validate_id(limit, "target_id", edge.target.as_str())?;
    }

    let policy = config.relation_policy;
    if !policy.allows(edge.source.kind, edge.relation) {
        return Err(ValidationError::relation_not_allowed(edge.source.kind, edge.relation).into());
    }

    let reverse = edge.relation.reverse_from(edge.source.kind);
    if !policy.allows(edge.relation.target_kind(), reverse) {
        return Err(
            ValidationError::relation_not_allowed(edge.relation.target_kind(), reverse).into(),
        );
    }

    Ok(())
}

fn validate_id(limit: usize, field: &str, id: &str) -> Result<(), AssocError> {
    if id.is_empty() {
        return Err(ValidationError::required_field(field).into());
    }

    if id.len() > limit {
        return Err(ValidationError::invalid_field(
            field,
            format!("must be at most {} bytes, got {}", limit, id.len()),
        )
        .into());
    }

    Ok(())
}
