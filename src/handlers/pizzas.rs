use crate::error::{ApiError, ErrorResponse};
use crate::models::Pizza;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /pizzas handler - List every pizza
#[utoipa::path(
    get,
    path = routes::PIZZAS,
    responses(
        (status = 200, description = "All pizzas", body = Vec<Pizza>),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "pizzas"
)]
pub async fn list_pizzas_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<Pizza>>), ApiError> {
    let pizzas = state.db.list_pizzas().await?;

    tracing::info!("Listed {} pizzas", pizzas.len());
    Ok((StatusCode::OK, Json(pizzas)))
}
