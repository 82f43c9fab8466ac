//! Shared plumbing for the fleet back end: tracing setup and small wire types.

pub mod types;
pub mod utils;
