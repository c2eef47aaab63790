//! Repositorio de sectores del garaje

use sqlx::{PgPool, Postgres, Transaction};

use crate::dto::garage_dto::SectorDto;
use crate::models::GarageSector;
use crate::utils::errors::AppError;

pub struct SectorRepository {
    pool: PgPool,
}

impl SectorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<GarageSector>, AppError> {
        let sector =
            sqlx::query_as::<_, GarageSector>("SELECT * FROM garage_sector WHERE sector = $1")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;

        Ok(sector)
    }

    /// Borrar todos los sectores (el import es un overwrite, no un merge)
    pub async fn delete_all(tx: &mut Transaction<'_, Postgres>) -> Result<(), AppError> {
        sqlx::query("DELETE FROM garage_sector")
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        dto: &SectorDto,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO garage_sector (sector, base_price, max_capacity, open_hour, close_hour, duration_limit_minutes)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&dto.sector)
        .bind(dto.base_price)
        .bind(dto.max_capacity)
        .bind(&dto.open_hour)
        .bind(&dto.close_hour)
        .bind(dto.duration_limit_minutes)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
