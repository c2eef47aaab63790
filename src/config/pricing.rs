//! Configuración de precios
//!
//! Umbrales de ocupación, multiplicadores y límites de tiempo del motor
//! de precios dinámicos. Todos los valores son configurables por entorno
//! con los defaults del negocio.

use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

/// Umbrales de ratio de ocupación (comparación estricta por debajo)
#[derive(Debug, Clone, Copy)]
pub struct OccupancyThresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

/// Multiplicadores por tramo de ocupación
#[derive(Debug, Clone, Copy)]
pub struct PriceMultipliers {
    pub low: Decimal,
    pub medium: Decimal,
    pub high: Decimal,
    pub max: Decimal,
}

/// Configuración del motor de precios
#[derive(Debug, Clone, Copy)]
pub struct PriceConfig {
    /// Minutos gratuitos al inicio de la estancia
    pub free_minutes: i64,
    /// Hasta este límite se cobra solo la tarifa base ajustada
    pub single_hour_limit: i64,
    /// Tamaño del intervalo de prorrateo en minutos
    pub interval_minutes: i64,
    pub occupancy: OccupancyThresholds,
    pub multiplier: PriceMultipliers,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            free_minutes: env_i64("PRICING_FREE_MINUTES", 15),
            single_hour_limit: env_i64("PRICING_SINGLE_HOUR_LIMIT", 60),
            interval_minutes: env_i64("PRICING_INTERVAL_MINUTES", 15),
            occupancy: OccupancyThresholds {
                low: env_f64("PRICING_OCCUPANCY_LOW", 0.25),
                medium: env_f64("PRICING_OCCUPANCY_MEDIUM", 0.5),
                high: env_f64("PRICING_OCCUPANCY_HIGH", 0.75),
            },
            multiplier: PriceMultipliers {
                low: env_decimal("PRICING_MULTIPLIER_LOW", Decimal::new(90, 2)),
                medium: env_decimal("PRICING_MULTIPLIER_MEDIUM", Decimal::new(100, 2)),
                high: env_decimal("PRICING_MULTIPLIER_HIGH", Decimal::new(110, 2)),
                max: env_decimal("PRICING_MULTIPLIER_MAX", Decimal::new(125, 2)),
            },
        }
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    env::var(name).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_f64(name: &str, default: f64) -> f64 {
    env::var(name).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_decimal(name: &str, default: Decimal) -> Decimal {
    env::var(name)
        .ok()
        .and_then(|v| Decimal::from_str(&v).ok())
        .unwrap_or(default)
}
