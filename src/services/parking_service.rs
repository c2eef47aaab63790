//! Directorio de sectores y regla de horario de operación

use chrono::NaiveTime;

use crate::models::{GarageSector, ParkingSpot};
use crate::repositories::SectorRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;

pub struct ParkingService {
    sector_repository: SectorRepository,
}

impl ParkingService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            sector_repository: SectorRepository::new(pool),
        }
    }

    /// Cargar el sector de una plaza; una plaza que apunta a un sector
    /// inexistente es un layout mal importado
    pub async fn find_sector(&self, code: &str) -> Result<GarageSector, AppError> {
        self.sector_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::SectorMisconfigured(code.to_string()))
    }
}

/// Un sector está abierto si open_hour <= hora <= close_hour, ambos
/// extremos incluidos; no hay ventanas nocturnas con wraparound
pub fn is_sector_open(sector: &GarageSector, time: NaiveTime) -> Result<bool, AppError> {
    let open = sector.opening_time()?;
    let close = sector.closing_time()?;
    Ok(time >= open && time <= close)
}

/// Precondiciones para asignar una plaza, en orden fijo: plaza libre,
/// sector abierto, sector con hueco. El primer check que falla aborta.
pub fn validate_spot_assignment(
    spot: &ParkingSpot,
    sector: &GarageSector,
    time: NaiveTime,
    total_spots: i64,
    occupied_spots: i64,
) -> Result<(), AppError> {
    if spot.occupied {
        return Err(AppError::SpotOccupied);
    }
    if !is_sector_open(sector, time)? {
        return Err(AppError::SectorClosed(sector.sector.clone()));
    }
    if occupied_spots >= total_spots {
        return Err(AppError::SectorFull(sector.sector.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sector(open: &str, close: &str) -> GarageSector {
        GarageSector {
            sector: "A".to_string(),
            base_price: Decimal::new(1000, 2),
            max_capacity: 100,
            open_hour: open.to_string(),
            close_hour: close.to_string(),
            duration_limit_minutes: 0,
        }
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_sector_open_within_window() {
        let s = sector("08:00", "22:00");
        assert!(is_sector_open(&s, at(12, 30, 0)).unwrap());
    }

    #[test]
    fn test_sector_open_boundaries_inclusive() {
        let s = sector("08:00", "22:00");
        assert!(is_sector_open(&s, at(8, 0, 0)).unwrap());
        assert!(is_sector_open(&s, at(22, 0, 0)).unwrap());
    }

    #[test]
    fn test_sector_closed_outside_window() {
        let s = sector("08:00", "22:00");
        assert!(!is_sector_open(&s, at(7, 59, 59)).unwrap());
        assert!(!is_sector_open(&s, at(22, 0, 1)).unwrap());
        assert!(!is_sector_open(&s, at(3, 0, 0)).unwrap());
    }

    #[test]
    fn test_sector_with_bad_hours_fails() {
        let s = sector("no", "22:00");
        assert!(is_sector_open(&s, at(12, 0, 0)).is_err());
    }

    fn spot(occupied: bool) -> ParkingSpot {
        ParkingSpot {
            id: 1,
            sector: "A".to_string(),
            lat: -23.561684,
            lng: -46.655981,
            occupied,
        }
    }

    #[test]
    fn test_assignment_accepts_free_spot_in_open_sector() {
        let s = sector("08:00", "22:00");
        assert!(validate_spot_assignment(&spot(false), &s, at(12, 0, 0), 100, 50).is_ok());
    }

    #[test]
    fn test_assignment_rejects_occupied_spot() {
        let s = sector("08:00", "22:00");
        assert!(matches!(
            validate_spot_assignment(&spot(true), &s, at(12, 0, 0), 100, 50),
            Err(AppError::SpotOccupied)
        ));
    }

    #[test]
    fn test_assignment_rejects_closed_sector() {
        let s = sector("08:00", "22:00");
        assert!(matches!(
            validate_spot_assignment(&spot(false), &s, at(23, 0, 0), 100, 50),
            Err(AppError::SectorClosed(_))
        ));
    }

    #[test]
    fn test_assignment_rejects_full_sector() {
        let s = sector("08:00", "22:00");
        assert!(matches!(
            validate_spot_assignment(&spot(false), &s, at(12, 0, 0), 100, 100),
            Err(AppError::SectorFull(_))
        ));
        // La última plaza libre todavía se puede asignar
        assert!(validate_spot_assignment(&spot(false), &s, at(12, 0, 0), 100, 99).is_ok());
    }
}
