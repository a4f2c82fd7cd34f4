use crate::error::{ApiError, ErrorResponse, ValidationErrorResponse};
use crate::models::{CreateRestaurantPizzaRequest, RestaurantPizzaCreated};
use crate::routes;
use crate::state::AppState;
use crate::validation::{NewRestaurantPizza, ValidationError};
use axum::{extract::State, http::StatusCode, Json};

/// POST /restaurant_pizzas handler - Add a pizza to a restaurant's menu
///
/// Both a missing restaurant/pizza and an out-of-range price answer with the
/// same 400 body; the actual cause is only logged.
#[utoipa::path(
    post,
    path = routes::RESTAURANT_PIZZAS,
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Restaurant pizza created", body = RestaurantPizzaCreated),
        (status = 400, description = "Unknown restaurant or pizza, or price out of range", body = ValidationErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "restaurant_pizzas"
)]
pub async fn create_restaurant_pizza_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateRestaurantPizzaRequest>,
) -> Result<(StatusCode, Json<RestaurantPizzaCreated>), ApiError> {
    let new = NewRestaurantPizza::new(request.restaurant_id, request.pizza_id, request.price)
        .inspect_err(|e| tracing::warn!("Rejected restaurant pizza: {}", e))?;

    match state.db.create_restaurant_pizza(new).await? {
        Some(created) => {
            tracing::info!(
                "Created restaurant pizza {} (restaurant: {}, pizza: {}, price: {})",
                created.id,
                created.restaurant_id,
                created.pizza_id,
                created.price
            );
            Ok((StatusCode::CREATED, Json(created)))
        }
        None => {
            let err = ValidationError::MissingReference {
                restaurant_id: request.restaurant_id,
                pizza_id: request.pizza_id,
            };
            tracing::warn!("Rejected restaurant pizza: {}", err);
            Err(err.into())
        }
    }
}
