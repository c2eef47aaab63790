//! Consultas de facturación por fecha y sector
//!
//! Lado de lectura puro: agrega precios ya fijados en EXIT, no produce
//! nueva lógica de negocio.

use chrono::{Local, NaiveTime};
use rust_decimal::RoundingStrategy;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::dto::api::PageResponse;
use crate::dto::revenue_dto::{
    RevenueHistoryQuery, RevenueHistoryResponse, RevenueQuery, RevenueResponse,
};
use crate::repositories::VehicleEntryRepository;
use crate::utils::errors::AppError;

pub struct RevenueController {
    entry_repository: VehicleEntryRepository,
}

impl RevenueController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            entry_repository: VehicleEntryRepository::new(pool),
        }
    }

    /// Facturación total de un sector en una fecha
    pub async fn get_revenue(&self, query: RevenueQuery) -> Result<RevenueResponse, AppError> {
        debug!("Calculating revenue for sector {} on {}", query.sector, query.date);

        let amount = self
            .entry_repository
            .sum_price_by_date_and_sector(query.date, &query.sector)
            .await?;

        info!(
            "Revenue for sector {} on {}: {}",
            query.sector, query.date, amount
        );

        Ok(RevenueResponse {
            amount: amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            currency: "BRL".to_string(),
            timestamp: Local::now().naive_local(),
        })
    }

    /// Histórico de facturación agrupado por fecha de salida y sector
    pub async fn get_revenue_history(
        &self,
        query: RevenueHistoryQuery,
    ) -> Result<PageResponse<RevenueHistoryResponse>, AppError> {
        debug!(
            "Fetching revenue history: sector={:?}, start={:?}, end={:?}",
            query.sector, query.start_date, query.end_date
        );

        let start = query
            .start_date
            .unwrap_or_else(|| Local::now().date_naive());
        let end = query.end_date.unwrap_or(start);

        let (rows, total) = self
            .entry_repository
            .find_revenue_grouped(
                query.sector.as_deref(),
                start.and_time(NaiveTime::MIN),
                (end + chrono::Duration::days(1)).and_time(NaiveTime::MIN),
                query.page,
                query.size,
            )
            .await?;

        info!(
            "Retrieved {} revenue records for sector {:?}",
            rows.len(),
            query.sector
        );
        Ok(PageResponse::new(rows, query.page, query.size, total))
    }
}
