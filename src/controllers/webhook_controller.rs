//! Máquina de estados de eventos de vehículos
//!
//! Valida y aplica eventos ENTRY, PARKED y EXIT contra el estado actual
//! de la estancia y de la plaza. Todas las precondiciones de un evento se
//! comprueban antes de escribir nada: el primer check que falla aborta el
//! evento completo sin mutación parcial.
//!
//! Ciclo de vida por matrícula:
//! sin estancia -> CHECKED_IN -> PARKED -> EXITED (terminal; un nuevo
//! ENTRY abre una estancia nueva).

use chrono::Local;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::config::pricing::PriceConfig;
use crate::dto::webhook_dto::{EventType, WebhookEventRequest};
use crate::repositories::{SpotRepository, VehicleEntryRepository};
use crate::services::parking_service::validate_spot_assignment;
use crate::services::{ParkingService, PriceCalculationService};
use crate::utils::errors::AppError;
use crate::utils::time::parse_datetime;
use crate::utils::validation::is_valid_plate;

pub struct WebhookController {
    pool: PgPool,
    entry_repository: VehicleEntryRepository,
    parking_service: ParkingService,
    price_service: PriceCalculationService,
}

impl WebhookController {
    pub fn new(pool: PgPool, pricing: PriceConfig) -> Self {
        Self {
            entry_repository: VehicleEntryRepository::new(pool.clone()),
            parking_service: ParkingService::new(pool.clone()),
            price_service: PriceCalculationService::new(pool.clone(), pricing),
            pool,
        }
    }

    /// Procesar un evento entrante. La matrícula se valida una sola vez,
    /// antes de despachar por tipo de evento.
    pub async fn process_event(&self, dto: WebhookEventRequest) -> Result<(), AppError> {
        debug!(
            "Received webhook event: plate={}, event_type={}",
            dto.license_plate, dto.event_type
        );

        if !is_valid_plate(&dto.license_plate) {
            warn!("Invalid license plate format: {}", dto.license_plate);
            return Err(AppError::InvalidPlateFormat(dto.license_plate));
        }

        let event_type = EventType::parse(&dto.event_type).ok_or_else(|| {
            warn!("Unsupported event type received: {}", dto.event_type);
            AppError::UnsupportedEventType(dto.event_type.clone())
        })?;

        match event_type {
            EventType::Entry => self.handle_entry(&dto).await,
            EventType::Parked => self.handle_parked(&dto).await,
            EventType::Exit => self.handle_exit(&dto).await,
        }
    }

    async fn handle_entry(&self, dto: &WebhookEventRequest) -> Result<(), AppError> {
        let raw_entry_time = dto
            .entry_time
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                warn!("Missing entry_time for ENTRY event on plate {}", dto.license_plate);
                AppError::MissingField("entry_time".to_string())
            })?;
        let entry_time = parse_datetime(raw_entry_time)?;

        let vehicle_inside = self
            .entry_repository
            .find_open_by_plate(&dto.license_plate)
            .await?
            .is_some();

        if vehicle_inside {
            warn!("Attempt to enter vehicle already inside: {}", dto.license_plate);
            return Err(AppError::VehicleAlreadyEntered(dto.license_plate.clone()));
        }

        // El índice único parcial respalda este insert: una carrera entre
        // dos ENTRY concurrentes se reporta como VehicleAlreadyEntered
        self.entry_repository
            .insert_checked_in(&dto.license_plate, entry_time)
            .await?;

        info!("Vehicle entry recorded for plate {}", dto.license_plate);
        Ok(())
    }

    async fn handle_parked(&self, dto: &WebhookEventRequest) -> Result<(), AppError> {
        let entry = self
            .entry_repository
            .find_open_by_plate(&dto.license_plate)
            .await?
            .ok_or_else(|| {
                warn!("No active entry found for plate {}", dto.license_plate);
                AppError::NoActiveEntry(dto.license_plate.clone())
            })?;

        // La plaza se asigna una sola vez por estancia
        if entry.spot_id.is_some() {
            warn!(
                "Plate {} already has a spot assigned for this stay",
                dto.license_plate
            );
            return Err(AppError::VehicleAlreadyParked(dto.license_plate.clone()));
        }

        let (lat, lng) = match (dto.lat, dto.lng) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => {
                warn!("Missing coordinates for PARKED event on plate {}", dto.license_plate);
                return Err(AppError::MissingField("lat/lng".to_string()));
            }
        };

        let now = Local::now().naive_local();

        // Check-then-write bajo exclusión por plaza: la fila de la plaza
        // queda bloqueada hasta el commit, y los cuatro checks van en orden
        // fijo (existencia, ocupada, horario, capacidad) antes de escribir
        let mut tx = self.pool.begin().await?;

        let spot = SpotRepository::find_by_lat_lng_for_update(&mut tx, lat, lng)
            .await?
            .ok_or_else(|| {
                warn!("Spot not found for coordinates lat={}, lng={}", lat, lng);
                AppError::SpotNotFound
            })?;

        let sector = self.parking_service.find_sector(&spot.sector).await?;
        let (total, occupied) = SpotRepository::sector_occupancy_tx(&mut tx, &spot.sector).await?;

        if let Err(e) = validate_spot_assignment(&spot, &sector, now.time(), total, occupied) {
            warn!(
                "Rejected PARKED for plate {} at lat={}, lng={}: {}",
                dto.license_plate, lat, lng, e
            );
            return Err(e);
        }

        if !SpotRepository::occupy_if_free(&mut tx, spot.id).await? {
            // Otra transacción ganó la plaza entre el check y el write
            warn!("Lost race for spot id {} at lat={}, lng={}", spot.id, lat, lng);
            return Err(AppError::SpotOccupied);
        }
        VehicleEntryRepository::assign_spot(&mut tx, entry.id, spot.id, lat, lng).await?;

        tx.commit().await?;

        info!(
            "Vehicle with plate {} parked at spot id {}",
            dto.license_plate, spot.id
        );
        Ok(())
    }

    async fn handle_exit(&self, dto: &WebhookEventRequest) -> Result<(), AppError> {
        let raw_exit_time = dto
            .exit_time
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                warn!("Missing exit_time for EXIT event on plate {}", dto.license_plate);
                AppError::MissingField("exit_time".to_string())
            })?;
        let exit_time = parse_datetime(raw_exit_time)?;

        let entry = self
            .entry_repository
            .find_open_by_plate(&dto.license_plate)
            .await?
            .ok_or_else(|| {
                warn!("No active entry found for plate {}", dto.license_plate);
                AppError::NoActiveEntry(dto.license_plate.clone())
            })?;

        if let Some(spot_id) = entry.spot_id {
            // El precio se fija antes de liberar la plaza: el vehículo que
            // sale cuenta todavía en la foto de ocupación del sector
            let mut settled = entry.clone();
            settled.exit_time = Some(exit_time);
            let price = self.price_service.calculate_price(&settled).await?;

            let mut tx = self.pool.begin().await?;
            VehicleEntryRepository::close_entry(&mut tx, entry.id, exit_time, price).await?;
            SpotRepository::release(&mut tx, spot_id).await?;
            tx.commit().await?;

            info!(
                "Vehicle {} exited from spot id {} with price {}",
                dto.license_plate, spot_id, price
            );
        } else {
            // Nunca llegó a aparcar: sin cargo y sin plaza que liberar
            let mut tx = self.pool.begin().await?;
            VehicleEntryRepository::close_entry(&mut tx, entry.id, exit_time, Decimal::ZERO)
                .await?;
            tx.commit().await?;

            info!(
                "Vehicle {} exited without occupying a spot. No charge applied",
                dto.license_plate
            );
        }

        info!("Vehicle exit recorded for plate {}", dto.license_plate);
        Ok(())
    }
}
