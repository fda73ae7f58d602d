pub mod vehicle_status;

pub use vehicle_status::VehicleStatus;
