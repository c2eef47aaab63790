//! Importador del layout de garaje
//!
//! Al arranque se descarga la configuración de sectores y plazas desde
//! el simulador externo. El import es un overwrite idempotente, no un
//! merge incremental, y todas las plazas arrancan libres.

use sqlx::PgPool;
use tracing::info;

use crate::dto::garage_dto::GarageConfigDto;
use crate::repositories::{SectorRepository, SpotRepository};
use crate::utils::errors::AppError;

pub struct GarageService {
    pool: PgPool,
    http_client: reqwest::Client,
    garage_url: String,
}

impl GarageService {
    pub fn new(pool: PgPool, garage_url: String) -> Self {
        Self {
            pool,
            http_client: reqwest::Client::new(),
            garage_url,
        }
    }

    /// Descargar el layout del garaje y reemplazar sectores y plazas
    pub async fn import_garage_data(&self) -> Result<(), AppError> {
        let config = self.fetch_garage_config().await?;
        self.replace_layout(&config).await?;

        info!(
            "Garage layout imported: {} sectors, {} spots",
            config.garage.len(),
            config.spots.len()
        );
        Ok(())
    }

    async fn fetch_garage_config(&self) -> Result<GarageConfigDto, AppError> {
        let response = self
            .http_client
            .get(&self.garage_url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("garage config request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "garage config returned status {}",
                response.status()
            )));
        }

        response
            .json::<GarageConfigDto>()
            .await
            .map_err(|e| AppError::ExternalApi(format!("invalid garage config payload: {}", e)))
    }

    async fn replace_layout(&self, config: &GarageConfigDto) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // Las plazas primero por la FK hacia sectores
        SpotRepository::delete_all(&mut tx).await?;
        SectorRepository::delete_all(&mut tx).await?;

        for sector in &config.garage {
            SectorRepository::insert(&mut tx, sector).await?;
        }
        for spot in &config.spots {
            SpotRepository::insert(&mut tx, spot).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
