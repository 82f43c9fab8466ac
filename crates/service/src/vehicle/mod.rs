//! Vehicle aggregate: the store consumed by the maintenance subsystem plus a
//! thin service for listing and registering vehicles.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::VehicleService;
