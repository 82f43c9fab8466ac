//! Persistence entities (sea-orm) for the fleet database plus field validators
//! shared by the service layer.

pub mod errors;
pub mod db;
pub mod vehicle;
pub mod maintenance;
