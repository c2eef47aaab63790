//! Modelo de GarageSector
//!
//! Un sector agrupa plazas que comparten tarifa base, horario de
//! operación y capacidad. Inmutable salvo re-import del layout.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::AppError;

/// Sector del garaje - mapea a la tabla garage_sector
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GarageSector {
    pub sector: String,
    pub base_price: Decimal,
    pub max_capacity: i32,
    pub open_hour: String,
    pub close_hour: String,
    // Reservado para futuras reglas de precio, hoy sin uso
    pub duration_limit_minutes: i32,
}

impl GarageSector {
    /// Parsear la hora de apertura (HH:MM o HH:MM:SS)
    pub fn opening_time(&self) -> Result<NaiveTime, AppError> {
        parse_hour(&self.sector, &self.open_hour)
    }

    /// Parsear la hora de cierre (HH:MM o HH:MM:SS)
    pub fn closing_time(&self) -> Result<NaiveTime, AppError> {
        parse_hour(&self.sector, &self.close_hour)
    }
}

fn parse_hour(sector: &str, value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            AppError::SectorMisconfigured(format!(
                "{} (invalid operating hour: {})",
                sector, value
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sector(open: &str, close: &str) -> GarageSector {
        GarageSector {
            sector: "A".to_string(),
            base_price: Decimal::new(1000, 2),
            max_capacity: 100,
            open_hour: open.to_string(),
            close_hour: close.to_string(),
            duration_limit_minutes: 240,
        }
    }

    #[test]
    fn test_parse_operating_hours() {
        let s = sector("08:00", "22:00:00");
        assert_eq!(s.opening_time().unwrap().to_string(), "08:00:00");
        assert_eq!(s.closing_time().unwrap().to_string(), "22:00:00");
    }

    #[test]
    fn test_invalid_hour_is_misconfiguration() {
        let s = sector("not-an-hour", "22:00");
        assert!(matches!(
            s.opening_time(),
            Err(AppError::SectorMisconfigured(_))
        ));
    }
}
