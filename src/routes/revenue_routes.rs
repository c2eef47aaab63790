use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::RevenueController;
use crate::dto::api::{ApiResponse, PageResponse};
use crate::dto::revenue_dto::{
    RevenueHistoryQuery, RevenueHistoryResponse, RevenueQuery, RevenueResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_revenue_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_revenue))
        .route("/revenue-history", get(get_revenue_history))
}

async fn get_revenue(
    State(state): State<AppState>,
    Query(query): Query<RevenueQuery>,
) -> Result<Json<ApiResponse<RevenueResponse>>, AppError> {
    let controller = RevenueController::new(state.pool.clone());
    let response = controller.get_revenue(query).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn get_revenue_history(
    State(state): State<AppState>,
    Query(query): Query<RevenueHistoryQuery>,
) -> Result<Json<ApiResponse<PageResponse<RevenueHistoryResponse>>>, AppError> {
    let controller = RevenueController::new(state.pool.clone());
    let response = controller.get_revenue_history(query).await?;
    Ok(Json(ApiResponse::success(response)))
}
