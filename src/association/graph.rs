//! In-memory bucket graph behind [`AssociationStore`](crate::AssociationStore).
//!
//! Not synchronized; the store wraps it in a lock so that an edge and its
//! inverse always change together.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::types::{Edge, RelationType, StoreStats};
use crate::types::{EntityId, EntityRef};

/// Target ids of one `(entity, relation)` pair.
///
/// `order` keeps insertion order for presentation, `members` answers
/// membership in O(1). Both always hold the same ids.
#[derive(Debug, Default)]
struct Bucket {
    order: Vec<EntityId>,
    members: HashSet<EntityId>,
}

impl Bucket {
    fn insert(&mut self, id: &EntityId) -> bool {
        if !self.members.insert(id.clone()) {
            return false;
        }
        self.order.push(id.clone());
        true
    }

    fn remove(&mut self, id: &EntityId) -> bool {
        if !self.members.remove(id) {
            return false;
        }
        self.order.retain(|existing| existing != id);
        true
    }

    fn contains(&self, id: &EntityId) -> bool {
        self.members.contains(id)
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn ids(&self) -> Vec<EntityId> {
        self.order.clone()
    }
}

/// Buckets grouped by owning entity.
#[derive(Debug, Default)]
pub(crate) struct AssociationGraph {
    entities: HashMap<EntityRef, BTreeMap<RelationType, Bucket>>,
}

impl AssociationGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Ids in `(entity, relation)`, in insertion order. Missing buckets are empty.
    pub(crate) fn get(&self, entity: &EntityRef, relation: RelationType) -> Vec<EntityId> {
        self.entities
            .get(entity)
            .and_then(|buckets| buckets.get(&relation))
            .map(Bucket::ids)
            .unwrap_or_default()
    }

    pub(crate) fn contains(&self, edge: &Edge) -> bool {
        self.entities
            .get(&edge.source)
            .and_then(|buckets| buckets.get(&edge.relation))
            .is_some_and(|bucket| bucket.contains(&edge.target))
    }

    /// Inserts an edge and its inverse. Returns true if anything changed.
    pub(crate) fn insert(&mut self, edge: &Edge) -> bool {
        let forward = self.insert_one(edge);
        let reverse = self.insert_one(&edge.reversed());
        forward || reverse
    }

    /// Removes an edge and its inverse. Returns true if anything changed.
    pub(crate) fn remove(&mut self, edge: &Edge) -> bool {
        let forward = self.remove_one(edge);
        let reverse = self.remove_one(&edge.reversed());
        forward || reverse
    }

    /// All non-empty buckets of `entity`.
    pub(crate) fn buckets_of(&self, entity: &EntityRef) -> BTreeMap<RelationType, Vec<EntityId>> {
        self.entities
            .get(entity)
            .map(|buckets| {
                buckets
                    .iter()
                    .map(|(relation, bucket)| (*relation, bucket.ids()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Removes every bucket of `entity` and every inverse edge pointing at it.
    ///
    /// Returns the removed edges as seen from `entity`.
    pub(crate) fn detach(&mut self, entity: &EntityRef) -> Vec<Edge> {
        let Some(buckets) = self.entities.remove(entity) else {
            return Vec::new();
        };

        let mut removed = Vec::new();
        for (relation, bucket) in buckets {
            for target in bucket.order {
                let edge = Edge::new(entity.clone(), relation, target);
                // Self-links already vanished with the entity's own buckets.
                self.remove_one(&edge.reversed());
                removed.push(edge);
            }
        }
        removed
    }

    /// Every stored edge, both directions, grouped by owner and relation.
    pub(crate) fn edges(&self) -> Vec<Edge> {
        let mut owners: Vec<&EntityRef> = self.entities.keys().collect();
        owners.sort();

        let mut edges = Vec::new();
        for owner in owners {
            for (relation, bucket) in &self.entities[owner] {
                edges.extend(
                    bucket
                        .order
                        .iter()
                        .map(|target| Edge::new(owner.clone(), *relation, target)),
                );
            }
        }
        edges
    }

    pub(crate) fn stats(&self) -> StoreStats {
        self.entities
            .values()
            .flat_map(|buckets| buckets.values())
            .fold(StoreStats::default(), |mut stats, bucket| {
                stats.bucket_count += 1;
                stats.edge_count += bucket.order.len();
                stats
            })
    }

    fn insert_one(&mut self, edge: &Edge) -> bool {
        self.entities
            .entry(edge.source.clone())
            .or_default()
            .entry(edge.relation)
            .or_default()
            .insert(&edge.target)
    }

    fn remove_one(&mut self, edge: &Edge) -> bool {
        let Some(buckets) = self.entities.get_mut(&edge.source) else {
            return false;
        };
        let Some(bucket) = buckets.get_mut(&edge.relation) else {
            return false;
        };

        let removed = bucket.remove(&edge.target);
        if bucket.is_empty() {
            buckets.remove(&edge.relation);
        }
        if buckets.is_empty() {
            self.entities.remove(&edge.source);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(source: EntityRef, relation: RelationType, target: &str) -> Edge {
        Edge::new(source, relation, target)
    }

    #[test]
    fn test_empty_graph_reads_empty() {
        let graph = AssociationGraph::new();
        assert!(graph
            .get(&EntityRef::company("anything"), RelationType::Contacts)
            .is_empty());
        assert_eq!(graph.stats(), StoreStats::default());
    }

    #[test]
    fn test_insert_mirrors_inverse() {
        let mut graph = AssociationGraph::new();
        assert!(graph.insert(&edge(EntityRef::company("comp1"), RelationType::Contacts, "contact1")));

        assert_eq!(
            graph.get(&EntityRef::company("comp1"), RelationType::Contacts),
            vec![EntityId::new("contact1")]
        );
        assert_eq!(
            graph.get(&EntityRef::contact("contact1"), RelationType::Companies),
            vec![EntityId::new("comp1")]
        );
        assert_eq!(
            graph.stats(),
            StoreStats {
                bucket_count: 2,
                edge_count: 2
            }
        );
    }

    #[test]
    fn test_insert_twice_reports_no_change() {
        let mut graph = AssociationGraph::new();
        let e = edge(EntityRef::company("comp1"), RelationType::Contacts, "contact1");
        assert!(graph.insert(&e));
        assert!(!graph.insert(&e));
        assert_eq!(graph.stats().edge_count, 2);
    }

    #[test]
    fn test_remove_drops_empty_buckets() {
        let mut graph = AssociationGraph::new();
        let e = edge(EntityRef::company("comp1"), RelationType::Contacts, "contact1");
        graph.insert(&e);
        assert!(graph.remove(&e));
        assert!(!graph.remove(&e));
        assert_eq!(graph.stats(), StoreStats::default());
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_bucket_keeps_insertion_order() {
        let mut graph = AssociationGraph::new();
        let company = EntityRef::company("comp1");
        for id in ["c3", "c1", "c2"] {
            graph.insert(&edge(company.clone(), RelationType::Contacts, id));
        }
        graph.remove(&edge(company.clone(), RelationType::Contacts, "c1"));
        graph.insert(&edge(company.clone(), RelationType::Contacts, "c1"));

        let ids: Vec<String> = graph
            .get(&company, RelationType::Contacts)
            .into_iter()
            .map(|id| id.0)
            .collect();
        assert_eq!(ids, vec!["c3", "c2", "c1"]);
    }

    #[test]
    fn test_self_link_is_single_edge() {
        let mut graph = AssociationGraph::new();
        let e = edge(EntityRef::company("comp1"), RelationType::Companies, "comp1");
        assert!(graph.insert(&e));
        assert_eq!(graph.stats().edge_count, 1);

        let removed = graph.detach(&EntityRef::company("comp1"));
        assert_eq!(removed.len(), 1);
        assert_eq!(graph.stats(), StoreStats::default());
    }

    #[test]
    fn test_detach_removes_both_directions() {
        let mut graph = AssociationGraph::new();
        let company = EntityRef::company("comp1");
        graph.insert(&edge(company.clone(), RelationType::Contacts, "contact1"));
        graph.insert(&edge(company.clone(), RelationType::Jobs, "job1"));
        graph.insert(&edge(EntityRef::contact("contact1"), RelationType::Deals, "deal1"));

        let removed = graph.detach(&company);
        assert_eq!(removed.len(), 2);
        assert!(graph.get(&EntityRef::contact("contact1"), RelationType::Companies).is_empty());
        assert!(graph.get(&EntityRef::job("job1"), RelationType::Companies).is_empty());
        // Unrelated edges survive
        assert_eq!(
            graph.get(&EntityRef::contact("contact1"), RelationType::Deals),
            vec![EntityId::new("deal1")]
        );
    }

    #[test]
    fn test_edges_lists_both_directions() {
        let mut graph = AssociationGraph::new();
        let e = edge(EntityRef::job("job1"), RelationType::Applications, "app1");
        graph.insert(&e);

        let edges = graph.edges();
        assert_eq!(edges.len(), 2);
        assert!(edges.contains(&e));
        assert!(edges.contains(&e.reversed()));
    }
}
