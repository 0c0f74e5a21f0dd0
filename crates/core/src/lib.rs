//! Quill domain core.
//!
//! Pure domain logic with zero internal dependencies: the error taxonomy,
//! shared id/timestamp types, the ranked role policy, page field validation,
//! the page-tree algorithms (cycle detection, hierarchy building), and the
//! line diff used for version comparison. Everything here is usable from the
//! repository layer, the API, and any future CLI tooling.

pub mod diff;
pub mod error;
pub mod page;
pub mod roles;
pub mod search;
pub mod tree;
pub mod types;
