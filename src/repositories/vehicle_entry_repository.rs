//! Repositorio de estancias de vehículos
//!
//! La invariante "como máximo una estancia abierta por matrícula" está
//! respaldada por un índice único parcial; una violación al insertar se
//! reporta como el conflicto de dominio correspondiente.

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::dto::revenue_dto::RevenueHistoryResponse;
use crate::models::{VehicleEntry, VehicleStatus};
use crate::utils::errors::AppError;

pub struct VehicleEntryRepository {
    pool: PgPool,
}

impl VehicleEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Buscar la estancia abierta (sin exit_time) de una matrícula
    pub async fn find_open_by_plate(&self, plate: &str) -> Result<Option<VehicleEntry>, AppError> {
        let entry = sqlx::query_as::<_, VehicleEntry>(
            r#"
            SELECT * FROM vehicle_entry
            WHERE plate = $1 AND exit_time IS NULL
            ORDER BY entry_time DESC
            LIMIT 1
            "#,
        )
        .bind(plate)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Buscar la estancia abierta asociada a una plaza
    pub async fn find_open_by_spot(&self, spot_id: i32) -> Result<Option<VehicleEntry>, AppError> {
        let entry = sqlx::query_as::<_, VehicleEntry>(
            r#"
            SELECT * FROM vehicle_entry
            WHERE spot_id = $1 AND exit_time IS NULL
            ORDER BY entry_time DESC
            LIMIT 1
            "#,
        )
        .bind(spot_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Registrar una nueva estancia CHECKED_IN. Una carrera perdida contra
    /// el índice único parcial se reporta como VehicleAlreadyEntered.
    pub async fn insert_checked_in(
        &self,
        plate: &str,
        entry_time: NaiveDateTime,
    ) -> Result<VehicleEntry, AppError> {
        let entry = sqlx::query_as::<_, VehicleEntry>(
            r#"
            INSERT INTO vehicle_entry (plate, status, entry_time)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(plate)
        .bind(VehicleStatus::CheckedIn.as_str())
        .bind(entry_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AppError::VehicleAlreadyEntered(plate.to_string())
            }
            _ => AppError::from(e),
        })?;

        Ok(entry)
    }

    /// Asignar plaza y coordenadas a la estancia y pasarla a PARKED
    pub async fn assign_spot(
        tx: &mut Transaction<'_, Postgres>,
        entry_id: i64,
        spot_id: i32,
        lat: f64,
        lng: f64,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE vehicle_entry
            SET spot_id = $2, lat = $3, lng = $4, status = $5
            WHERE id = $1
            "#,
        )
        .bind(entry_id)
        .bind(spot_id)
        .bind(lat)
        .bind(lng)
        .bind(VehicleStatus::Parked.as_str())
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Cerrar la estancia: fijar salida, precio final y estado EXITED
    pub async fn close_entry(
        tx: &mut Transaction<'_, Postgres>,
        entry_id: i64,
        exit_time: NaiveDateTime,
        price: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE vehicle_entry
            SET exit_time = $2, price = $3, status = $4
            WHERE id = $1
            "#,
        )
        .bind(entry_id)
        .bind(exit_time)
        .bind(price)
        .bind(VehicleStatus::Exited.as_str())
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Histórico paginado de estancias de una matrícula, más recientes primero
    pub async fn find_all_by_plate_paged(
        &self,
        plate: &str,
        page: i64,
        size: i64,
    ) -> Result<(Vec<VehicleEntry>, i64), AppError> {
        let entries = sqlx::query_as::<_, VehicleEntry>(
            r#"
            SELECT * FROM vehicle_entry
            WHERE plate = $1
            ORDER BY entry_time DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(plate)
        .bind(size)
        .bind(page * size)
        .fetch_all(&self.pool)
        .await?;

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicle_entry WHERE plate = $1")
            .bind(plate)
            .fetch_one(&self.pool)
            .await?;

        Ok((entries, total.0))
    }

    /// Suma de precios de las salidas de un sector en un día
    pub async fn sum_price_by_date_and_sector(
        &self,
        date: chrono::NaiveDate,
        sector: &str,
    ) -> Result<Decimal, AppError> {
        let start = date.and_time(NaiveTime::MIN);
        let end = start + chrono::Duration::days(1);

        let total: (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(v.price), 0)
            FROM vehicle_entry v
            JOIN parking_spot p ON p.id = v.spot_id
            WHERE p.sector = $1
              AND v.exit_time >= $2 AND v.exit_time < $3
            "#,
        )
        .bind(sector)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.0)
    }

    /// Facturación agrupada por fecha de salida y sector, paginada
    pub async fn find_revenue_grouped(
        &self,
        sector: Option<&str>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        page: i64,
        size: i64,
    ) -> Result<(Vec<RevenueHistoryResponse>, i64), AppError> {
        let rows = sqlx::query_as::<_, RevenueHistoryResponse>(
            r#"
            SELECT CAST(v.exit_time AS DATE) AS date, p.sector AS sector, SUM(v.price) AS amount
            FROM vehicle_entry v
            JOIN parking_spot p ON p.id = v.spot_id
            WHERE ($1::text IS NULL OR p.sector = $1)
              AND v.exit_time >= $2 AND v.exit_time < $3
              AND v.price IS NOT NULL
            GROUP BY p.sector, CAST(v.exit_time AS DATE)
            ORDER BY date DESC, sector
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(sector)
        .bind(start)
        .bind(end)
        .bind(size)
        .bind(page * size)
        .fetch_all(&self.pool)
        .await?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM (
                SELECT 1
                FROM vehicle_entry v
                JOIN parking_spot p ON p.id = v.spot_id
                WHERE ($1::text IS NULL OR p.sector = $1)
                  AND v.exit_time >= $2 AND v.exit_time < $3
                  AND v.price IS NOT NULL
                GROUP BY p.sector, CAST(v.exit_time AS DATE)
            ) grouped
            "#,
        )
        .bind(sector)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows, total.0))
    }
}
