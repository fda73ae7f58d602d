pub mod dto;
pub mod services;

pub use dto::VehicleStatus;
pub use services::ParkingService;
