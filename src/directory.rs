//! Entity lookup and search collaborators.
//!
//! The store only holds ids. Display data comes from the hosting
//! application through these traits:
//!
//! - [`EntityRepository`] - read-only lookup of a record by reference
//! - [`SearchProvider`] - free-text search for records to link
//! - [`NameResolver`] - human-readable label for confirmation messages
//!
//! [`InMemoryDirectory`] implements all three over a fixed record set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{EntityKind, EntityRef};

/// Display-ready view of a record, as shown on a related-record tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Which record this is.
    pub entity: EntityRef,

    /// Primary label (company name, contact name, job title, ...).
    pub name: String,

    /// Secondary label (job title of a contact, location of a job, ...).
    pub subtitle: Option<String>,

    /// Navigation target for the record's detail page.
    pub route: String,
}

impl EntityRecord {
    /// Creates a record with the default route `/{kind}s/{id}`.
    pub fn new(entity: EntityRef, name: impl Into<String>) -> Self {
        let route = format!("/{}s/{}", entity.kind, entity.id);
        Self {
            entity,
            name: name.into(),
            subtitle: None,
            route,
        }
    }

    /// Sets the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Overrides the navigation route.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self
                .subtitle
                .as_ref()
                .is_some_and(|s| s.to_lowercase().contains(needle))
    }
}

/// Read-only lookup of records by reference.
pub trait EntityRepository: Send + Sync {
    /// Returns the record, or `None` if it doesn't exist (or no longer does).
    fn get(&self, entity: &EntityRef) -> Option<EntityRecord>;
}

/// Free-text search over linkable records.
pub trait SearchProvider: Send + Sync {
    /// Returns records matching `query`, optionally restricted to one kind.
    fn search(&self, query: &str, kind: Option<EntityKind>) -> Vec<EntityRecord>;
}

/// Human-readable labels for records.
pub trait NameResolver {
    /// Returns the label for `entity`, or `None` if unknown.
    fn display_name(&self, entity: &EntityRef) -> Option<String>;
}

impl<R: EntityRepository + ?Sized> NameResolver for R {
    fn display_name(&self, entity: &EntityRef) -> Option<String> {
        self.get(entity).map(|record| record.name)
    }
}

/// In-memory record set implementing every collaborator trait.
///
/// Search is a case-insensitive substring match on name and subtitle; an
/// empty (or whitespace) query matches everything. Results are sorted by
/// name, then id.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDirectory {
    records: HashMap<EntityRef, EntityRecord>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record.
    pub fn insert(&mut self, record: EntityRecord) {
        self.records.insert(record.entity.clone(), record);
    }

    /// Removes a record, returning it if present.
    pub fn remove(&mut self, entity: &EntityRef) -> Option<EntityRecord> {
        self.records.remove(entity)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the directory holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<EntityRecord> for InMemoryDirectory {
    fn from_iter<I: IntoIterator<Item = EntityRecord>>(iter: I) -> Self {
        let mut directory = Self::new();
        for record in iter {
            directory.insert(record);
        }
        directory
    }
}

impl EntityRepository for InMemoryDirectory {
    fn get(&self, entity: &EntityRef) -> Option<EntityRecord> {
        self.records.get(entity).cloned()
    }
}

impl SearchProvider for InMemoryDirectory {
    fn search(&self, query: &str, kind: Option<EntityKind>) -> Vec<EntityRecord> {
        let needle = query.trim().to_lowercase();
        let mut hits: Vec<EntityRecord> = self
            .records
            .values()
            .filter(|record| kind.is_none_or(|k| record.entity.kind == k))
            .filter(|record| record.matches(&needle))
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.entity.cmp(&b.entity)));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> InMemoryDirectory {
        [
            EntityRecord::new(EntityRef::company("comp1"), "Acme Corp").with_subtitle("Manufacturing"),
            EntityRecord::new(EntityRef::company("comp2"), "Globex"),
            EntityRecord::new(EntityRef::contact("contact1"), "Jane Doe")
                .with_subtitle("Head of Talent at Acme"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_default_route() {
        let record = EntityRecord::new(EntityRef::job("job1"), "Backend Engineer");
        assert_eq!(record.route, "/jobs/job1");
        let record = record.with_route("/careers/job1");
        assert_eq!(record.route, "/careers/job1");
    }

    #[test]
    fn test_get_and_name_resolution() {
        let dir = directory();
        assert_eq!(dir.len(), 3);
        assert_eq!(
            dir.display_name(&EntityRef::company("comp1")),
            Some("Acme Corp".to_string())
        );
        assert!(dir.display_name(&EntityRef::company("missing")).is_none());
    }

    #[test]
    fn test_search_is_case_insensitive_and_covers_subtitle() {
        let dir = directory();
        let hits = dir.search("ACME", None);
        let ids: Vec<&str> = hits.iter().map(|r| r.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["comp1", "contact1"]);
    }

    #[test]
    fn test_search_kind_filter() {
        let dir = directory();
        let hits = dir.search("acme", Some(EntityKind::Contact));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity, EntityRef::contact("contact1"));
    }

    #[test]
    fn test_empty_query_matches_all_sorted_by_name() {
        let dir = directory();
        let names: Vec<String> = dir
            .search("  ", Some(EntityKind::Company))
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Acme Corp", "Globex"]);
    }

    #[test]
    fn test_remove() {
        let mut dir = directory();
        assert!(dir.remove(&EntityRef::company("comp2")).is_some());
        assert!(dir.get(&EntityRef::company("comp2")).is_none());
        assert!(!dir.is_empty());
    }
}
