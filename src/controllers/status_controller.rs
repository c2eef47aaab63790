//! Consultas de estado de matrículas y plazas
//!
//! El precio de una estancia en curso es una cotización dinámica: se
//! recalcula contra la ocupación del momento, así que dos consultas
//! separadas pueden devolver importes distintos.

use chrono::Local;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::config::pricing::PriceConfig;
use crate::dto::api::PageResponse;
use crate::dto::status_dto::{
    PlateHistoryQuery, PlateHistoryResponse, PlateStatusResponse, SpotStatusResponse,
};
use crate::repositories::{SpotRepository, VehicleEntryRepository};
use crate::services::PriceCalculationService;
use crate::utils::errors::AppError;
use crate::utils::time::format_duration;

pub struct StatusController {
    entry_repository: VehicleEntryRepository,
    spot_repository: SpotRepository,
    price_service: PriceCalculationService,
}

impl StatusController {
    pub fn new(pool: PgPool, pricing: PriceConfig) -> Self {
        Self {
            entry_repository: VehicleEntryRepository::new(pool.clone()),
            spot_repository: SpotRepository::new(pool.clone()),
            price_service: PriceCalculationService::new(pool, pricing),
        }
    }

    /// Estado actual de una matrícula con estancia abierta
    pub async fn get_plate_status(&self, plate: &str) -> Result<PlateStatusResponse, AppError> {
        debug!("Checking status for plate {}", plate);

        let entry = self
            .entry_repository
            .find_open_by_plate(plate)
            .await?
            .ok_or_else(|| {
                warn!("No active entry found for license plate {}", plate);
                AppError::NotFound(format!("No active entry found for license plate {}", plate))
            })?;

        let price = if entry.spot_id.is_some() {
            self.price_service.calculate_price(&entry).await?
        } else {
            Decimal::ZERO
        };

        let end_time = entry
            .exit_time
            .unwrap_or_else(|| Local::now().naive_local());
        let time_parked = end_time - entry.entry_time;

        info!(
            "Plate {} parked for {} minutes, price so far: {}",
            plate,
            time_parked.num_minutes(),
            price
        );

        Ok(PlateStatusResponse {
            license_plate: plate.to_string(),
            price_until_now: price,
            entry_time: entry.entry_time,
            time_parked: format_duration(time_parked),
        })
    }

    /// Estado actual de una plaza por coordenadas
    pub async fn get_spot_status(&self, lat: f64, lng: f64) -> Result<SpotStatusResponse, AppError> {
        debug!("Checking spot status at lat={}, lng={}", lat, lng);

        let spot = self
            .spot_repository
            .find_by_lat_lng(lat, lng)
            .await?
            .ok_or_else(|| {
                warn!("No spot found at coordinates {}, {}", lat, lng);
                AppError::NotFound(format!(
                    "Parking spot not found for coordinates: {}, {}",
                    lat, lng
                ))
            })?;

        if !spot.occupied {
            info!("Spot at lat={}, lng={} is available", lat, lng);
            return Ok(SpotStatusResponse {
                occupied: false,
                entry_time: None,
                time_parked: None,
            });
        }

        match self.entry_repository.find_open_by_spot(spot.id).await? {
            Some(entry) => {
                let duration = Local::now().naive_local() - entry.entry_time;
                info!(
                    "Spot at lat={}, lng={} is occupied for {} minutes",
                    lat,
                    lng,
                    duration.num_minutes()
                );
                Ok(SpotStatusResponse {
                    occupied: true,
                    entry_time: Some(entry.entry_time),
                    time_parked: Some(format_duration(duration)),
                })
            }
            None => {
                warn!("Spot is marked occupied but no vehicle entry found for it");
                Ok(SpotStatusResponse {
                    occupied: true,
                    entry_time: None,
                    time_parked: None,
                })
            }
        }
    }

    /// Histórico paginado de estancias de una matrícula
    pub async fn get_plate_history(
        &self,
        query: PlateHistoryQuery,
    ) -> Result<PageResponse<PlateHistoryResponse>, AppError> {
        debug!("Fetching plate history: {}", query.license_plate);

        let (entries, total) = self
            .entry_repository
            .find_all_by_plate_paged(&query.license_plate, query.page, query.size)
            .await?;

        let mut content = Vec::with_capacity(entries.len());
        for entry in entries {
            let sector = match entry.spot_id {
                Some(spot_id) => self
                    .spot_repository
                    .find_by_id(spot_id)
                    .await?
                    .map(|s| s.sector),
                None => None,
            };

            let time_parked = entry
                .exit_time
                .map(|exit| format_duration(exit - entry.entry_time));

            content.push(PlateHistoryResponse {
                license_plate: entry.plate,
                entry_time: entry.entry_time,
                exit_time: entry.exit_time,
                price: entry.price,
                sector,
                time_parked,
            });
        }

        info!(
            "Retrieved {} records of plate history for {}",
            content.len(),
            query.license_plate
        );
        Ok(PageResponse::new(content, query.page, query.size, total))
    }
}
