//! # Parking Core
//!
//! Library for tracking vehicles in a parking facility and computing the fee
//! owed at departure under a tiered pricing schedule (grace period, initial
//! block, ceiling-rounded increment units).
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, fee calculation and repository ports
//! - **application**: Session lifecycle orchestration and status DTOs
//! - **infrastructure**: Storage implementations (in-memory)
//! - **support**: Error taxonomy shared across layers
//!
//! All billing arithmetic is done on integer seconds and integer minor
//! currency units; nothing in the fee path touches floating point.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod support;

pub use application::{ParkingService, VehicleStatus};
pub use domain::{
    PricingPolicy, PricingRepository, SessionStatus, VehicleRepository, VehicleSession,
};
pub use infrastructure::InMemoryStorage;
pub use support::{DomainError, DomainResult};
