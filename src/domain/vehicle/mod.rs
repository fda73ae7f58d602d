//! Vehicle session aggregate
//!
//! Contains the VehicleSession entity and its repository port.

pub mod model;
pub mod repository;

pub use model::{SessionStatus, VehicleSession};
pub use repository::VehicleRepository;
