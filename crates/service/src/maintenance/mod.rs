//! Maintenance records: domain, store abstraction, mileage-sync hook and the
//! service orchestrating them.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod mileage;
pub mod service;

pub use service::MaintenanceService;
