//! Pricing aggregate
//!
//! Contains the PricingPolicy entity, the fee calculation logic, and the
//! repository port.

pub mod model;
pub mod repository;

pub use model::PricingPolicy;
pub use repository::PricingRepository;
