//! Modelo de ParkingSpot
//!
//! Una plaza individual del garaje. Las coordenadas (lat, lng) son la
//! clave de búsqueda exacta; el flag occupied solo lo muta la máquina
//! de estados de eventos.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Plaza de parking - mapea a la tabla parking_spot
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParkingSpot {
    pub id: i32,
    pub sector: String,
    pub lat: f64,
    pub lng: f64,
    pub occupied: bool,
}
