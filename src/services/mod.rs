//! Services module
//!
//! Este módulo contiene la lógica de negocio: el directorio de plazas y
//! sectores, el motor de precios y el importador del layout.

pub mod garage_service;
pub mod parking_service;
pub mod price_service;

pub use garage_service::GarageService;
pub use parking_service::ParkingService;
pub use price_service::PriceCalculationService;
