use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::StatusController;
use crate::dto::api::{ApiResponse, PageResponse};
use crate::dto::status_dto::{
    PlateHistoryQuery, PlateHistoryResponse, PlateStatusQuery, PlateStatusResponse,
    SpotStatusQuery, SpotStatusResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_status_router() -> Router<AppState> {
    Router::new()
        .route("/plate", get(get_plate_status))
        .route("/spot", get(get_spot_status))
        .route("/plate-history", get(get_plate_history))
}

async fn get_plate_status(
    State(state): State<AppState>,
    Query(query): Query<PlateStatusQuery>,
) -> Result<Json<ApiResponse<PlateStatusResponse>>, AppError> {
    let controller = StatusController::new(state.pool.clone(), state.pricing);
    let response = controller.get_plate_status(&query.license_plate).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn get_spot_status(
    State(state): State<AppState>,
    Query(query): Query<SpotStatusQuery>,
) -> Result<Json<ApiResponse<SpotStatusResponse>>, AppError> {
    let controller = StatusController::new(state.pool.clone(), state.pricing);
    let response = controller.get_spot_status(query.lat, query.lng).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn get_plate_history(
    State(state): State<AppState>,
    Query(query): Query<PlateHistoryQuery>,
) -> Result<Json<ApiResponse<PageResponse<PlateHistoryResponse>>>, AppError> {
    let controller = StatusController::new(state.pool.clone(), state.pricing);
    let response = controller.get_plate_history(query).await?;
    Ok(Json(ApiResponse::success(response)))
}
