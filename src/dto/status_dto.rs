//! DTOs de consulta de estado de matrículas y plazas

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Query de estado por matrícula
#[derive(Debug, Deserialize)]
pub struct PlateStatusQuery {
    pub license_plate: String,
}

/// Estado actual de una matrícula con estancia abierta
#[derive(Debug, Serialize)]
pub struct PlateStatusResponse {
    pub license_plate: String,
    pub price_until_now: Decimal,
    pub entry_time: NaiveDateTime,
    pub time_parked: String,
}

/// Query de estado por coordenadas de plaza
#[derive(Debug, Deserialize)]
pub struct SpotStatusQuery {
    pub lat: f64,
    pub lng: f64,
}

/// Estado actual de una plaza
#[derive(Debug, Serialize)]
pub struct SpotStatusResponse {
    pub occupied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_parked: Option<String>,
}

/// Query de histórico paginado por matrícula
#[derive(Debug, Deserialize)]
pub struct PlateHistoryQuery {
    pub license_plate: String,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page_size() -> i64 {
    10
}

/// Una estancia del histórico de una matrícula
#[derive(Debug, Serialize)]
pub struct PlateHistoryResponse {
    pub license_plate: String,
    pub entry_time: NaiveDateTime,
    pub exit_time: Option<NaiveDateTime>,
    pub price: Option<Decimal>,
    pub sector: Option<String>,
    pub time_parked: Option<String>,
}
