//! Modelos de datos
//!
//! Structs que mapean a las tablas PostgreSQL del garaje.

pub mod sector;
pub mod spot;
pub mod vehicle_entry;

pub use sector::GarageSector;
pub use spot::ParkingSpot;
pub use vehicle_entry::{VehicleEntry, VehicleStatus};
