//! # TalentLink
//!
//! Typed bidirectional association store for recruiting and CRM records.
//!
//! TalentLink keeps the links behind "related records" panels - which
//! contacts belong to a company, which candidates are on a job - and keeps
//! both sides of every link consistent.
//!
//! ## Quick Start
//!
//! ```rust
//! use talentlink::{AssociationStore, Config, EntityId, EntityRef, RelationType};
//!
//! let store = AssociationStore::new(Config::default())?;
//!
//! // Link a contact to a company
//! store.add_association(&EntityRef::company("comp1"), RelationType::Contacts, "contact1")?;
//!
//! // The contact now lists the company
//! let companies = store.get_associations(&EntityRef::contact("contact1"), RelationType::Companies)?;
//! assert_eq!(companies, vec![EntityId::new("comp1")]);
//!
//! // Unlink removes both sides
//! store.remove_association(&EntityRef::company("comp1"), RelationType::Contacts, "contact1")?;
//! assert!(store.get_associations(&EntityRef::contact("contact1"), RelationType::Companies)?.is_empty());
//! # Ok::<(), talentlink::AssocError>(())
//! ```
//!
//! ## Key Concepts
//!
//! ### Entity
//!
//! An **entity** is a record of one of six kinds (company, contact, job,
//! application, deal, candidate), referenced by an opaque id. The store
//! never holds record payloads.
//!
//! ### Bucket
//!
//! A **bucket** is the set of ids linked from one entity under one
//! [`RelationType`]. Buckets are named after the kind they hold.
//!
//! ### Reverse mapping
//!
//! Every link has an inverse: adding `contact1` to `comp1`'s `contacts`
//! bucket also adds `comp1` to `contact1`'s `companies` bucket. The mapping
//! is a pair of exhaustive matches, so every relation type has exactly one
//! inverse.
//!
//! ## Thread Safety
//!
//! `AssociationStore` is `Send + Sync` and can be shared across threads
//! using `Arc`. Each link and its inverse change under one write lock.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

// ============================================================================
// Module declarations
// ============================================================================

mod config;
mod error;
mod store;
mod types;

pub mod directory;
pub mod seed;

// Domain modules
mod association;
mod linking;
mod watch;

// ============================================================================
// Public API re-exports
// ============================================================================

// Main store interface
pub use store::AssociationStore;

// Configuration
pub use config::{schema_relations, Config, RelationPolicy, MAX_ID_LENGTH_LIMIT};

// Error handling
pub use error::{AssocError, Result, ValidationError};

// Core types
pub use types::{EntityId, EntityKind, EntityRef, Timestamp};

// Domain types
pub use association::{Edge, RelationType, StoreStats};
pub use directory::{EntityRecord, EntityRepository, InMemoryDirectory, NameResolver, SearchProvider};
pub use linking::{LinkOutcome, LinkService};
pub use watch::{AssociationEvent, AssociationWatch, ChangeKind};

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Convenient imports for common TalentLink usage.
///
/// ```rust
/// use talentlink::prelude::*;
/// ```
pub mod prelude {
    pub use crate::association::{Edge, RelationType};
    pub use crate::config::Config;
    pub use crate::error::{AssocError, Result};
    pub use crate::store::AssociationStore;
    pub use crate::types::{EntityId, EntityKind, EntityRef};
}
