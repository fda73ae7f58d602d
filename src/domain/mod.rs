pub mod pricing;
pub mod vehicle;

// Re-export commonly used types
pub use pricing::{PricingPolicy, PricingRepository};
pub use vehicle::{SessionStatus, VehicleRepository, VehicleSession};

// Re-export error types from support for convenience
pub use crate::support::{DomainError, DomainResult};
