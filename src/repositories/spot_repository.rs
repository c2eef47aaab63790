//! Repositorio de plazas de parking
//!
//! Las mutaciones de ocupación son condicionales y corren dentro de la
//! transacción del evento: un check-then-write perdedor se detecta como
//! conflicto de dominio, nunca como éxito duplicado.

use sqlx::{PgPool, Postgres, Transaction};

use crate::dto::garage_dto::SpotDto;
use crate::models::ParkingSpot;
use crate::utils::errors::AppError;

pub struct SpotRepository {
    pool: PgPool,
}

impl SpotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ParkingSpot>, AppError> {
        let spot = sqlx::query_as::<_, ParkingSpot>("SELECT * FROM parking_spot WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(spot)
    }

    /// Buscar una plaza por coordenadas exactas (sin tolerancia)
    pub async fn find_by_lat_lng(&self, lat: f64, lng: f64) -> Result<Option<ParkingSpot>, AppError> {
        let spot = sqlx::query_as::<_, ParkingSpot>(
            "SELECT * FROM parking_spot WHERE lat = $1 AND lng = $2",
        )
        .bind(lat)
        .bind(lng)
        .fetch_optional(&self.pool)
        .await?;

        Ok(spot)
    }

    /// Buscar una plaza por coordenadas bloqueando su fila (exclusión por plaza)
    pub async fn find_by_lat_lng_for_update(
        tx: &mut Transaction<'_, Postgres>,
        lat: f64,
        lng: f64,
    ) -> Result<Option<ParkingSpot>, AppError> {
        let spot = sqlx::query_as::<_, ParkingSpot>(
            "SELECT * FROM parking_spot WHERE lat = $1 AND lng = $2 FOR UPDATE",
        )
        .bind(lat)
        .bind(lng)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(spot)
    }

    /// Ocupación de un sector: (plazas totales, plazas ocupadas)
    pub async fn sector_occupancy(&self, sector_code: &str) -> Result<(i64, i64), AppError> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE occupied)
            FROM parking_spot
            WHERE sector = $1
            "#,
        )
        .bind(sector_code)
        .fetch_one(&self.pool)
        .await?;

        if counts.0 == 0 {
            return Err(AppError::SectorMisconfigured(sector_code.to_string()));
        }

        Ok(counts)
    }

    /// Ocupación leída dentro de la transacción del evento
    pub async fn sector_occupancy_tx(
        tx: &mut Transaction<'_, Postgres>,
        sector_code: &str,
    ) -> Result<(i64, i64), AppError> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE occupied)
            FROM parking_spot
            WHERE sector = $1
            "#,
        )
        .bind(sector_code)
        .fetch_one(&mut **tx)
        .await?;

        if counts.0 == 0 {
            return Err(AppError::SectorMisconfigured(sector_code.to_string()));
        }

        Ok(counts)
    }

    /// Marcar la plaza como ocupada solo si sigue libre; false si otra
    /// transacción ganó la carrera
    pub async fn occupy_if_free(
        tx: &mut Transaction<'_, Postgres>,
        spot_id: i32,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE parking_spot SET occupied = TRUE WHERE id = $1 AND occupied = FALSE",
        )
        .bind(spot_id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Liberar la plaza al registrar la salida
    pub async fn release(
        tx: &mut Transaction<'_, Postgres>,
        spot_id: i32,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE parking_spot SET occupied = FALSE WHERE id = $1")
            .bind(spot_id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Borrar todas las plazas (antes de los sectores, por la FK)
    pub async fn delete_all(tx: &mut Transaction<'_, Postgres>) -> Result<(), AppError> {
        sqlx::query("DELETE FROM parking_spot")
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Insertar una plaza del layout; arranca siempre libre
    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        dto: &SpotDto,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO parking_spot (id, sector, lat, lng, occupied)
            VALUES ($1, $2, $3, $4, FALSE)
            "#,
        )
        .bind(dto.id)
        .bind(&dto.sector)
        .bind(dto.lat)
        .bind(dto.lng)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
