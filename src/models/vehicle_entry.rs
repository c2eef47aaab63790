//! Modelo de VehicleEntry
//!
//! Una estancia: el registro de un vehículo desde su entrada hasta su
//! salida. Una estancia está "abierta" mientras no tenga exit_time.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estado del vehículo dentro de una estancia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    CheckedIn,
    Parked,
    Exited,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::CheckedIn => "CHECKED_IN",
            VehicleStatus::Parked => "PARKED",
            VehicleStatus::Exited => "EXITED",
        }
    }
}

/// Estancia de un vehículo - mapea a la tabla vehicle_entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleEntry {
    pub id: i64,
    pub plate: String,
    pub spot_id: Option<i32>,
    pub status: String,
    pub entry_time: NaiveDateTime,
    pub exit_time: Option<NaiveDateTime>,
    pub price: Option<Decimal>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(VehicleStatus::CheckedIn.as_str(), "CHECKED_IN");
        assert_eq!(VehicleStatus::Parked.as_str(), "PARKED");
        assert_eq!(VehicleStatus::Exited.as_str(), "EXITED");
    }
}
