//! Seedgraph Core -- builds the configuration graph for seed generation.
//!
//! A decoded [`schema::SchemaDocument`] declares resources (tables with
//! keys, indices, and foreign keys) and a hierarchy of entities, phases, and
//! tasks. [`builder::build_configuration`] turns it into an immutable
//! [`builder::Configuration`] in three steps:
//!
//! 1. **Resources** -- copied from their declarations.
//! 2. **Relationships** -- each foreign key becomes one [`resource::Relation`],
//!    indexed from both endpoints ([`relationship::derive_relationships`]).
//! 3. **Entities** -- each phase is resolved in two passes so that selection
//!    criteria can name sibling tasks declared later
//!    ([`resolver::resolve_phase`]).
//!
//! Any dangling name (foreign key target, task resource, sibling task, index)
//! aborts the build with a [`ConfigError`].
//!
//! ```rust,ignore
//! let config = ConfigurationBuilder::new(schema).build()?;
//! let rel = config.relationships().relation("orders", "customers");
//! ```

pub mod builder;
pub mod error;
pub mod relationship;
pub mod resolver;
pub mod resource;
pub mod schema;
pub mod task;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use builder::{Configuration, ConfigurationBuilder, build_configuration};
pub use error::ConfigError;
pub use relationship::{FromRelationship, Relations, Relationships, ToRelationship};
pub use resource::{ForeignKey, Relation, Resource};
pub use schema::SchemaDocument;
pub use task::{Entity, Phase, SelectionCriteria, Task};
