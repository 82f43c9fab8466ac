//! Service layer for the fleet back end.
//! - Separates business rules from data access (repository traits per aggregate).
//! - Reuses entity definitions and field validators from the `models` crate.
//! - Ships in-memory mock repositories for tests and doc examples.

pub mod errors;
pub mod vehicle;
pub mod maintenance;
#[cfg(test)]
pub mod test_support;
