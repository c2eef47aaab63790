//! DTOs de consultas de facturación

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Query de facturación de un sector en una fecha
#[derive(Debug, Deserialize)]
pub struct RevenueQuery {
    pub date: NaiveDate,
    pub sector: String,
}

/// Facturación total de un sector en una fecha
#[derive(Debug, Serialize)]
pub struct RevenueResponse {
    pub amount: Decimal,
    pub currency: String,
    pub timestamp: NaiveDateTime,
}

/// Query de histórico de facturación paginado
#[derive(Debug, Deserialize)]
pub struct RevenueHistoryQuery {
    pub sector: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page_size() -> i64 {
    10
}

/// Facturación agrupada por fecha de salida y sector
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct RevenueHistoryResponse {
    pub date: NaiveDate,
    pub sector: String,
    pub amount: Decimal,
}
