use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::WebhookController;
use crate::dto::api::ApiResponse;
use crate::dto::webhook_dto::WebhookEventRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_webhook_router() -> Router<AppState> {
    Router::new().route("/", post(receive_webhook))
}

async fn receive_webhook(
    State(state): State<AppState>,
    Json(request): Json<WebhookEventRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = WebhookController::new(state.pool.clone(), state.pricing);
    controller.process_event(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        None,
        "Event processed successfully.".to_string(),
    )))
}
