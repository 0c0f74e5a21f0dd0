//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-step operations that
//! carry invariants (version appends, re-parenting, cascading deletes) run
//! inside a transaction internally.

pub mod page_repo;
pub mod page_version_repo;
pub mod space_repo;

pub use page_repo::{MoveOutcome, PageRepo};
pub use page_version_repo::PageVersionRepo;
pub use space_repo::SpaceRepo;
