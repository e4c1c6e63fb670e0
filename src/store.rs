//! AssociationStore main struct and operations.
//!
//! The [`AssociationStore`] owns the bidirectional edge set between
//! recruiting records. It provides methods for:
//!
//! - Reading a bucket of linked ids
//! - Linking and unlinking records with automatic inverse maintenance
//! - Sweeping all links of a removed record
//! - Subscribing to changes
//!
//! # Quick Start
//!
//! ```rust
//! use talentlink::{AssociationStore, Config, EntityId, EntityRef, RelationType};
//!
//! let store = AssociationStore::new(Config::default()).unwrap();
//!
//! let company = EntityRef::company("comp1");
//! store.add_association(&company, RelationType::Contacts, "contact1").unwrap();
//!
//! // The inverse edge is maintained automatically
//! let companies = store
//!     .get_associations(&EntityRef::contact("contact1"), RelationType::Companies)
//!     .unwrap();
//! assert_eq!(companies, vec![EntityId::new("comp1")]);
//! ```
//!
//! # Thread Safety
//!
//! `AssociationStore` is `Send + Sync` and can be shared across threads
//! using `Arc`. An edge and its inverse are updated under one write lock,
//! so readers never observe a half-applied link. Change events are
//! published before that lock is released, so every subscriber sees
//! changes in commit order.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, instrument};

use crate::association::graph::AssociationGraph;
use crate::association::{validate_edge, Edge, RelationType, StoreStats};
use crate::config::Config;
use crate::error::{AssocError, Result};
use crate::types::{EntityId, EntityRef};
use crate::watch::{AssociationEvent, AssociationWatch, ChangeKind, WatchRegistry};

/// The association store handle.
///
/// Create one with [`AssociationStore::new()`] at application startup (or
/// per test) and hand it to whatever needs it. There is no global instance.
///
/// # Contract
///
/// - Buckets are created on first write and dropped when emptied.
/// - Reading a bucket that was never written returns an empty sequence.
/// - Removing an edge that does not exist is a silent no-op.
/// - Entity existence is never checked.
pub struct AssociationStore {
    /// Bucket graph; one lock covers an edge and its inverse.
    graph: RwLock<AssociationGraph>,

    /// Change subscribers.
    watchers: WatchRegistry,

    /// Configuration used to create this store.
    config: Config,
}

impl std::fmt::Debug for AssociationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssociationStore")
            .field("config", &self.config)
            .field("subscribers", &self.watchers.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl AssociationStore {
    /// Creates an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid (see [`Config::validate`]).
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(AssocError::from)?;

        info!(
            policy = ?config.relation_policy,
            watch_buffer_size = config.watch_buffer_size,
            "AssociationStore created"
        );

        Ok(Self {
            graph: RwLock::new(AssociationGraph::new()),
            watchers: WatchRegistry::new(config.watch_buffer_size),
            config,
        })
    }

    /// Creates a store pre-populated with `edges`.
    ///
    /// Equivalent to [`new`](Self::new) followed by [`seed`](Self::seed).
    ///
    /// # Example
    ///
    /// ```rust
    /// use talentlink::{AssociationStore, Config, Edge, EntityRef, RelationType};
    ///
    /// let store = AssociationStore::with_seed(
    ///     Config::default(),
    ///     [Edge::new(EntityRef::company("comp1"), RelationType::Jobs, "job1")],
    /// )
    /// .unwrap();
    /// assert_eq!(store.stats().unwrap().edge_count, 2);
    /// ```
    pub fn with_seed(config: Config, edges: impl IntoIterator<Item = Edge>) -> Result<Self> {
        let store = Self::new(config)?;
        store.seed(edges)?;
        Ok(store)
    }

    /// Adds every edge in `edges`, returning how many were new.
    ///
    /// Stops at the first invalid edge; edges before it remain applied.
    #[instrument(skip_all)]
    pub fn seed(&self, edges: impl IntoIterator<Item = Edge>) -> Result<usize> {
        let mut events = Vec::new();
        let mut graph = self.write_graph()?;
        let outcome = edges.into_iter().try_for_each(|edge| {
            validate_edge(&self.config, &edge)?;
            if graph.insert(&edge) {
                events.push(AssociationEvent::new(ChangeKind::Linked, edge));
            }
            Ok::<(), AssocError>(())
        });

        // Edges applied before a failure are still announced.
        self.watchers.publish(&events);
        drop(graph);
        outcome?;

        let added = events.len();
        info!(added, "Seeded associations");
        Ok(added)
    }

    /// Returns the ids linked from `entity` under `relation`.
    ///
    /// Ids come back in insertion order. Any id is accepted; a bucket that
    /// was never populated yields an empty vector, not an error.
    pub fn get_associations(
        &self,
        entity: &EntityRef,
        relation: RelationType,
    ) -> Result<Vec<EntityId>> {
        Ok(self.read_graph()?.get(entity, relation))
    }

    /// Returns true if `target` is in `entity`'s `relation` bucket.
    pub fn has_association(
        &self,
        entity: &EntityRef,
        relation: RelationType,
        target: impl Into<EntityId>,
    ) -> Result<bool> {
        let edge = Edge::new(entity.clone(), relation, target);
        Ok(self.read_graph()?.contains(&edge))
    }

    /// Links `target` into `entity`'s `relation` bucket.
    ///
    /// The inverse edge is stored in the target's bucket named after
    /// `entity`'s kind (see [`RelationType::reverse_from`]). Adding an
    /// existing link changes nothing.
    ///
    /// Returns the updated `(entity, relation)` bucket.
    ///
    /// # Errors
    ///
    /// Returns a validation error (state unchanged) if the relation policy
    /// rejects the bucket, or if `Config::max_id_length` is set and an id is
    /// empty or too long.
    #[instrument(skip_all, fields(entity = %entity, relation = %relation))]
    pub fn add_association(
        &self,
        entity: &EntityRef,
        relation: RelationType,
        target: impl Into<EntityId>,
    ) -> Result<Vec<EntityId>> {
        let edge = Edge::new(entity.clone(), relation, target);
        let (_, bucket) = self.apply(edge, ChangeKind::Linked)?;
        Ok(bucket)
    }

    /// Unlinks `target` from `entity`'s `relation` bucket and removes the
    /// inverse edge.
    ///
    /// Removing a link that does not exist is a no-op, not an error. Ids
    /// and relations are not validated here.
    ///
    /// Returns the updated `(entity, relation)` bucket.
    #[instrument(skip_all, fields(entity = %entity, relation = %relation))]
    pub fn remove_association(
        &self,
        entity: &EntityRef,
        relation: RelationType,
        target: impl Into<EntityId>,
    ) -> Result<Vec<EntityId>> {
        let edge = Edge::new(entity.clone(), relation, target);
        let (_, bucket) = self.apply(edge, ChangeKind::Unlinked)?;
        Ok(bucket)
    }

    /// Returns every non-empty bucket of `entity`, keyed by relation.
    pub fn associations_of(
        &self,
        entity: &EntityRef,
    ) -> Result<BTreeMap<RelationType, Vec<EntityId>>> {
        Ok(self.read_graph()?.buckets_of(entity))
    }

    /// Removes every link touching `entity`, in both directions.
    ///
    /// Deleting a record elsewhere in the application does not cascade
    /// into the store; callers that want a clean graph call this
    /// explicitly. Returns the number of links removed.
    #[instrument(skip_all, fields(entity = %entity))]
    pub fn detach_entity(&self, entity: &EntityRef) -> Result<usize> {
        let mut graph = self.write_graph()?;
        let events: Vec<AssociationEvent> = graph
            .detach(entity)
            .into_iter()
            .map(|edge| AssociationEvent::new(ChangeKind::Unlinked, edge))
            .collect();
        self.watchers.publish(&events);
        drop(graph);

        let count = events.len();

        info!(removed = count, "Entity detached");
        Ok(count)
    }

    /// Returns a snapshot of every stored edge, both directions explicit.
    pub fn edges(&self) -> Result<Vec<Edge>> {
        Ok(self.read_graph()?.edges())
    }

    /// Returns bucket and edge counts.
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(self.read_graph()?.stats())
    }

    /// Subscribes to link/unlink events.
    pub fn subscribe(&self) -> Result<AssociationWatch> {
        self.watchers.subscribe()
    }

    /// Returns a reference to the store configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Links or unlinks `edge` and its inverse under one write lock.
    ///
    /// Only links are validated. The event is published before the lock is
    /// released, so subscribers see changes in commit order.
    ///
    /// Returns whether anything changed and the source bucket afterwards.
    pub(crate) fn apply(&self, edge: Edge, kind: ChangeKind) -> Result<(bool, Vec<EntityId>)> {
        if kind == ChangeKind::Linked {
            validate_edge(&self.config, &edge)?;
        }

        let mut graph = self.write_graph()?;
        let changed = match kind {
            ChangeKind::Linked => graph.insert(&edge),
            ChangeKind::Unlinked => graph.remove(&edge),
        };
        let bucket = graph.get(&edge.source, edge.relation);

        if changed {
            debug!(target_id = %edge.target, ?kind, "Association changed");
            self.watchers.publish(&[AssociationEvent::new(kind, edge)]);
        } else {
            debug!(target_id = %edge.target, ?kind, "Association unchanged");
        }
        drop(graph);

        Ok((changed, bucket))
    }

    fn read_graph(&self) -> Result<RwLockReadGuard<'_, AssociationGraph>> {
        self.graph
            .read()
            .map_err(|_| AssocError::lock("Association graph lock poisoned"))
    }

    fn write_graph(&self) -> Result<RwLockWriteGuard<'_, AssociationGraph>> {
        self.graph
            .write()
            .map_err(|_| AssocError::lock("Association graph lock poisoned"))
    }
}

// AssociationStore is auto Send + Sync: RwLock<AssociationGraph>,
// Mutex<Vec<Sender<_>>> and Config are all Send + Sync.
