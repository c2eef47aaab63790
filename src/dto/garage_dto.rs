//! DTOs del layout de garaje importado al arranque

use rust_decimal::Decimal;
use serde::Deserialize;

/// Configuración completa del garaje entregada por el simulador
#[derive(Debug, Deserialize)]
pub struct GarageConfigDto {
    pub garage: Vec<SectorDto>,
    pub spots: Vec<SpotDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorDto {
    pub sector: String,
    pub base_price: Decimal,
    pub max_capacity: i32,
    pub open_hour: String,
    pub close_hour: String,
    #[serde(default)]
    pub duration_limit_minutes: i32,
}

#[derive(Debug, Deserialize)]
pub struct SpotDto {
    pub id: i32,
    pub sector: String,
    pub lat: f64,
    pub lng: f64,
    // El flag occupied del payload se ignora: las plazas arrancan libres
    #[serde(default)]
    pub occupied: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_garage_config() {
        let json = r#"{
            "garage": [
                {
                    "sector": "A",
                    "basePrice": 10.0,
                    "maxCapacity": 100,
                    "openHour": "08:00",
                    "closeHour": "22:00",
                    "durationLimitMinutes": 240
                }
            ],
            "spots": [
                { "id": 1, "sector": "A", "lat": -23.561684, "lng": -46.655981, "occupied": true }
            ]
        }"#;
        let dto: GarageConfigDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.garage.len(), 1);
        assert_eq!(dto.garage[0].base_price, Decimal::new(100, 1));
        assert_eq!(dto.spots[0].id, 1);
    }
}
