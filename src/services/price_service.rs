//! Motor de precios dinámicos
//!
//! El precio final depende del tiempo transcurrido y del ratio de
//! ocupación del sector en el momento del cálculo. Para estancias en
//! curso la cotización es dinámica: dos consultas separadas pueden
//! devolver importes distintos si otros vehículos entran o salen.

use chrono::Local;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::PgPool;

use crate::config::pricing::PriceConfig;
use crate::models::VehicleEntry;
use crate::repositories::{SectorRepository, SpotRepository};
use crate::utils::errors::AppError;

pub struct PriceCalculationService {
    spot_repository: SpotRepository,
    sector_repository: SectorRepository,
    config: PriceConfig,
}

impl PriceCalculationService {
    pub fn new(pool: PgPool, config: PriceConfig) -> Self {
        Self {
            spot_repository: SpotRepository::new(pool.clone()),
            sector_repository: SectorRepository::new(pool),
            config,
        }
    }

    /// Calcular el precio de una estancia, cerrada o en curso.
    ///
    /// Dentro de los minutos gratuitos el precio es cero y no se consulta
    /// la ocupación. Una estancia sin plaza asignada no genera cargo.
    pub async fn calculate_price(&self, entry: &VehicleEntry) -> Result<Decimal, AppError> {
        let minutes_parked = minutes_parked(entry);
        if minutes_parked <= self.config.free_minutes {
            return Ok(Decimal::ZERO);
        }

        let Some(spot_id) = entry.spot_id else {
            return Ok(Decimal::ZERO);
        };

        let spot = self
            .spot_repository
            .find_by_id(spot_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("spot {} not found for entry", spot_id)))?;

        let sector = self
            .sector_repository
            .find_by_code(&spot.sector)
            .await?
            .ok_or_else(|| AppError::SectorMisconfigured(spot.sector.clone()))?;

        let (total, occupied) = self.spot_repository.sector_occupancy(&spot.sector).await?;

        compute_price(
            &self.config,
            &spot.sector,
            sector.base_price,
            minutes_parked,
            total,
            occupied,
        )
    }
}

/// Minutos transcurridos (truncados) entre la entrada y la salida, o
/// hasta ahora para una estancia en curso
pub fn minutes_parked(entry: &VehicleEntry) -> i64 {
    let end = entry
        .exit_time
        .unwrap_or_else(|| Local::now().naive_local());
    (end - entry.entry_time).num_minutes()
}

/// Núcleo puro del cálculo de precio.
///
/// Los breakpoints de ocupación son estrictamente menores: un ratio
/// exactamente en el límite cae en el tramo siguiente, más caro.
pub fn compute_price(
    config: &PriceConfig,
    sector_code: &str,
    base_price: Decimal,
    minutes_parked: i64,
    total_spots: i64,
    occupied_spots: i64,
) -> Result<Decimal, AppError> {
    if minutes_parked <= config.free_minutes {
        return Ok(Decimal::ZERO);
    }

    if total_spots == 0 {
        return Err(AppError::SectorMisconfigured(sector_code.to_string()));
    }

    let occupancy_rate = occupied_spots as f64 / total_spots as f64;
    let multiplier = if occupancy_rate < config.occupancy.low {
        config.multiplier.low
    } else if occupancy_rate < config.occupancy.medium {
        config.multiplier.medium
    } else if occupancy_rate < config.occupancy.high {
        config.multiplier.high
    } else {
        config.multiplier.max
    };

    let adjusted_base = base_price * multiplier;

    if minutes_parked <= config.single_hour_limit {
        return Ok(round_half_up(adjusted_base));
    }

    let extra_minutes = minutes_parked - config.single_hour_limit;
    // Un intervalo configurado a cero se trata como prorrateo por minuto
    let interval_minutes = config.interval_minutes.max(1);
    let intervals = (extra_minutes + interval_minutes - 1) / interval_minutes;

    let interval_rate = round_half_up(adjusted_base / Decimal::from(4));
    let price = adjusted_base + interval_rate * Decimal::from(intervals);

    Ok(round_half_up(price))
}

fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PriceConfig {
        PriceConfig::default()
    }

    fn price(minutes: i64, total: i64, occupied: i64) -> Decimal {
        compute_price(
            &config(),
            "A",
            Decimal::new(1000, 2), // 10.00
            minutes,
            total,
            occupied,
        )
        .unwrap()
    }

    #[test]
    fn test_free_period_is_zero() {
        assert_eq!(price(10, 100, 50), Decimal::ZERO);
        // El límite de minutos gratuitos es inclusivo
        assert_eq!(price(15, 100, 50), Decimal::ZERO);
    }

    #[test]
    fn test_minute_sixteen_charges_base_branch() {
        // Un minuto por encima del período gratuito ya cobra la base ajustada
        assert_eq!(price(16, 100, 20), Decimal::new(900, 2)); // 10.00 * 0.90
    }

    #[test]
    fn test_low_occupancy_discount() {
        // r = 0.20 < 0.25 -> multiplicador 0.90
        assert_eq!(price(60, 100, 20), Decimal::new(900, 2));
    }

    #[test]
    fn test_medium_occupancy_keeps_base() {
        // r = 0.40 < 0.50 -> multiplicador 1.00
        assert_eq!(price(60, 100, 40), Decimal::new(1000, 2));
    }

    #[test]
    fn test_high_occupancy_surcharge() {
        // r = 0.70 < 0.75 -> multiplicador 1.10
        assert_eq!(price(60, 100, 70), Decimal::new(1100, 2));
    }

    #[test]
    fn test_max_occupancy_surcharge() {
        // r = 0.90 -> multiplicador 1.25
        assert_eq!(price(60, 100, 90), Decimal::new(1250, 2));
    }

    #[test]
    fn test_boundary_rate_falls_into_next_bracket() {
        // r exactamente 0.75 no es < 0.75: cae en el tramo máximo
        assert_eq!(price(60, 100, 75), Decimal::new(1250, 2));
        // r exactamente 0.25 cae en el tramo medio
        assert_eq!(price(60, 100, 25), Decimal::new(1000, 2));
        // r exactamente 0.50 cae en el tramo alto
        assert_eq!(price(60, 100, 50), Decimal::new(1100, 2));
    }

    #[test]
    fn test_prorated_example() {
        // base 10.00, r 0.20 -> ajustada 9.00; 70 min -> 10 extra ->
        // 1 intervalo de 15 -> 9.00 + 9.00/4 = 11.25
        assert_eq!(price(70, 100, 20), Decimal::new(1125, 2));
    }

    #[test]
    fn test_prorated_multiple_intervals() {
        // 120 min -> 60 extra -> 4 intervalos -> 9.00 + 2.25 * 4 = 18.00
        assert_eq!(price(120, 100, 20), Decimal::new(1800, 2));
        // 61 min -> 1 extra -> ceil(1/15) = 1 intervalo
        assert_eq!(price(61, 100, 20), Decimal::new(1125, 2));
    }

    #[test]
    fn test_price_is_idempotent() {
        let first = price(145, 80, 33);
        let second = price(145, 80, 33);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_interval_prorates_per_minute() {
        let mut cfg = config();
        cfg.interval_minutes = 0;
        // 70 min -> 10 extra -> 10 intervalos de 1 min -> 9.00 + 2.25 * 10
        let result = compute_price(&cfg, "A", Decimal::new(1000, 2), 70, 100, 20).unwrap();
        assert_eq!(result, Decimal::new(3150, 2));
    }

    #[test]
    fn test_sector_without_spots_fails() {
        let result = compute_price(&config(), "Z", Decimal::new(1000, 2), 60, 0, 0);
        assert!(matches!(result, Err(AppError::SectorMisconfigured(_))));
    }

    #[test]
    fn test_rounding_half_up() {
        // 10.125 -> 10.13
        assert_eq!(
            round_half_up(Decimal::new(10125, 3)),
            Decimal::new(1013, 2)
        );
        // intervalo de una base que no divide exacto: 10.10 / 4 = 2.525 -> 2.53
        assert_eq!(
            round_half_up(Decimal::new(1010, 2) / Decimal::from(4)),
            Decimal::new(253, 2)
        );
    }
}
