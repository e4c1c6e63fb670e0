//! Link/unlink workflow used by related-records panels.
//!
//! [`LinkService`] ties an [`AssociationStore`] to the record collaborators
//! from [`directory`](crate::directory): it performs the mutation, resolves
//! display names for the confirmation message, and produces the records a
//! panel renders.

use tracing::debug;

use crate::association::{Edge, RelationType};
use crate::directory::{EntityRecord, EntityRepository, NameResolver, SearchProvider};
use crate::error::Result;
use crate::store::AssociationStore;
use crate::types::{EntityId, EntityRef};
use crate::watch::ChangeKind;

/// Result of a link or unlink request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkOutcome {
    /// Whether the store changed.
    pub changed: bool,

    /// The source's bucket after the operation.
    pub associations: Vec<EntityId>,

    /// Confirmation text for a toast or status line.
    pub message: String,
}

/// Borrowing facade over a store and a record directory.
///
/// # Example
///
/// ```rust
/// use talentlink::{
///     AssociationStore, Config, EntityRecord, EntityRef, InMemoryDirectory, LinkService,
///     RelationType,
/// };
///
/// let store = AssociationStore::new(Config::default()).unwrap();
/// let directory: InMemoryDirectory = [
///     EntityRecord::new(EntityRef::company("comp1"), "Acme Corp"),
///     EntityRecord::new(EntityRef::contact("contact1"), "Jane Doe"),
/// ]
/// .into_iter()
/// .collect();
///
/// let links = LinkService::new(&store, &directory);
/// let outcome = links
///     .link(&EntityRef::company("comp1"), RelationType::Contacts, "contact1")
///     .unwrap();
/// assert_eq!(outcome.message, "Linked Jane Doe to Acme Corp");
/// ```
pub struct LinkService<'a, D: ?Sized> {
    store: &'a AssociationStore,
    directory: &'a D,
}

impl<'a, D> LinkService<'a, D>
where
    D: EntityRepository + SearchProvider + ?Sized,
{
    /// Creates a service over `store` and `directory`.
    pub fn new(store: &'a AssociationStore, directory: &'a D) -> Self {
        Self { store, directory }
    }

    /// Links `target` into `source`'s `relation` bucket.
    pub fn link(
        &self,
        source: &EntityRef,
        relation: RelationType,
        target: impl Into<EntityId>,
    ) -> Result<LinkOutcome> {
        let edge = Edge::new(source.clone(), relation, target);
        let (changed, associations) = self.store.apply(edge.clone(), ChangeKind::Linked)?;

        let (target_name, source_name) = (self.label(&edge.target_ref()), self.label(source));
        let message = if changed {
            format!("Linked {} to {}", target_name, source_name)
        } else {
            format!("{} is already linked to {}", target_name, source_name)
        };
        debug!(%edge, changed, "Link requested");

        Ok(LinkOutcome {
            changed,
            associations,
            message,
        })
    }

    /// Unlinks `target` from `source`'s `relation` bucket.
    pub fn unlink(
        &self,
        source: &EntityRef,
        relation: RelationType,
        target: impl Into<EntityId>,
    ) -> Result<LinkOutcome> {
        let edge = Edge::new(source.clone(), relation, target);
        let (changed, associations) = self.store.apply(edge.clone(), ChangeKind::Unlinked)?;

        let (target_name, source_name) = (self.label(&edge.target_ref()), self.label(source));
        let message = if changed {
            format!("Unlinked {} from {}", target_name, source_name)
        } else {
            format!("{} was not linked to {}", target_name, source_name)
        };
        debug!(%edge, changed, "Unlink requested");

        Ok(LinkOutcome {
            changed,
            associations,
            message,
        })
    }

    /// Resolves `source`'s `relation` bucket into display records.
    ///
    /// Ids the repository no longer knows are skipped, so records deleted
    /// elsewhere disappear from panels without touching the store.
    pub fn related_records(
        &self,
        source: &EntityRef,
        relation: RelationType,
    ) -> Result<Vec<EntityRecord>> {
        let kind = relation.target_kind();
        let records = self
            .store
            .get_associations(source, relation)?
            .into_iter()
            .filter_map(|id| self.directory.get(&EntityRef::new(kind, id)))
            .collect();
        Ok(records)
    }

    /// Searches for records that could be added to `source`'s `relation`
    /// bucket: right kind, matching `query`, not already linked, not
    /// `source` itself.
    pub fn available_to_link(
        &self,
        source: &EntityRef,
        relation: RelationType,
        query: &str,
    ) -> Result<Vec<EntityRecord>> {
        let linked = self.store.get_associations(source, relation)?;
        let candidates = self
            .directory
            .search(query, Some(relation.target_kind()))
            .into_iter()
            .filter(|record| &record.entity != source && !linked.contains(&record.entity.id))
            .collect();
        Ok(candidates)
    }

    fn label(&self, entity: &EntityRef) -> String {
        self.directory
            .display_name(entity)
            .unwrap_or_else(|| entity.id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::directory::InMemoryDirectory;

    fn fixtures() -> (AssociationStore, InMemoryDirectory) {
        let store = AssociationStore::new(Config::default()).unwrap();
        let directory = [
            EntityRecord::new(EntityRef::company("comp1"), "Acme Corp"),
            EntityRecord::new(EntityRef::contact("contact1"), "Jane Doe"),
            EntityRecord::new(EntityRef::contact("contact2"), "John Roe"),
        ]
        .into_iter()
        .collect();
        (store, directory)
    }

    #[test]
    fn test_link_twice_reports_already_linked() {
        let (store, directory) = fixtures();
        let links = LinkService::new(&store, &directory);
        let company = EntityRef::company("comp1");

        let first = links.link(&company, RelationType::Contacts, "contact1").unwrap();
        assert!(first.changed);

        let second = links.link(&company, RelationType::Contacts, "contact1").unwrap();
        assert!(!second.changed);
        assert_eq!(second.message, "Jane Doe is already linked to Acme Corp");
        assert_eq!(second.associations.len(), 1);
    }

    #[test]
    fn test_unlink_messages() {
        let (store, directory) = fixtures();
        let links = LinkService::new(&store, &directory);
        let company = EntityRef::company("comp1");
        links.link(&company, RelationType::Contacts, "contact1").unwrap();

        let outcome = links.unlink(&company, RelationType::Contacts, "contact1").unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.message, "Unlinked Jane Doe from Acme Corp");

        let outcome = links.unlink(&company, RelationType::Contacts, "contact1").unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.message, "Jane Doe was not linked to Acme Corp");
    }

    #[test]
    fn test_unknown_names_fall_back_to_ids() {
        let (store, directory) = fixtures();
        let links = LinkService::new(&store, &directory);
        let outcome = links
            .link(&EntityRef::job("job9"), RelationType::Candidates, "cand9")
            .unwrap();
        assert_eq!(outcome.message, "Linked cand9 to job9");
    }

    #[test]
    fn test_related_records_skip_dangling_ids() {
        let (store, mut directory) = fixtures();
        let company = EntityRef::company("comp1");
        store.add_association(&company, RelationType::Contacts, "contact1").unwrap();
        store.add_association(&company, RelationType::Contacts, "contact2").unwrap();

        directory.remove(&EntityRef::contact("contact2"));
        let links = LinkService::new(&store, &directory);
        let records = links.related_records(&company, RelationType::Contacts).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Jane Doe");
        // The store itself is untouched
        assert_eq!(
            store.get_associations(&company, RelationType::Contacts).unwrap().len(),
            2
        );
    }

    #[test]
    fn test_available_to_link_excludes_linked() {
        let (store, directory) = fixtures();
        let links = LinkService::new(&store, &directory);
        let company = EntityRef::company("comp1");
        links.link(&company, RelationType::Contacts, "contact1").unwrap();

        let available = links
            .available_to_link(&company, RelationType::Contacts, "")
            .unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].entity, EntityRef::contact("contact2"));
    }

    #[test]
    fn test_available_to_link_excludes_source() {
        let (store, mut directory) = fixtures();
        directory.insert(EntityRecord::new(EntityRef::company("comp2"), "Acme Labs"));
        let links = LinkService::new(&store, &directory);

        let available = links
            .available_to_link(&EntityRef::company("comp1"), RelationType::Companies, "acme")
            .unwrap();
        let ids: Vec<&str> = available.iter().map(|r| r.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["comp2"]);
    }
}
