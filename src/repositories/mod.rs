//! Repositorios de acceso a datos
//!
//! Contratos estrechos sobre el storage: el core nunca cachea ocupación
//! entre llamadas, siempre se lee fresca en el momento de decidir.

pub mod sector_repository;
pub mod spot_repository;
pub mod vehicle_entry_repository;

pub use sector_repository::SectorRepository;
pub use spot_repository::SpotRepository;
pub use vehicle_entry_repository::VehicleEntryRepository;
