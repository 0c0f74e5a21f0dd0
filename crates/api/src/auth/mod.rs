//! Authentication plumbing: JWT validation and claims.
//!
//! Token issuance belongs to the external identity provider; this API only
//! validates bearer tokens and extracts the `{user_id, role}` principal.

pub mod jwt;
