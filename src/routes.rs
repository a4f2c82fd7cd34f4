// Route path constants - single source of truth for all API paths

use axum::{routing::get, routing::post, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

pub const INDEX: &str = "/";
pub const HEALTH: &str = "/health";
pub const RESTAURANTS: &str = "/restaurants";
pub const RESTAURANT_ITEM: &str = "/restaurants/{id}";
pub const PIZZAS: &str = "/pizzas";
pub const RESTAURANT_PIZZAS: &str = "/restaurant_pizzas";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Assemble every route onto one router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(INDEX, get(handlers::index_handler))
        .route(HEALTH, get(handlers::health_handler))
        .route(RESTAURANTS, get(handlers::list_restaurants_handler))
        .route(
            RESTAURANT_ITEM,
            get(handlers::get_restaurant_handler).delete(handlers::delete_restaurant_handler),
        )
        .route(PIZZAS, get(handlers::list_pizzas_handler))
        .route(RESTAURANT_PIZZAS, post(handlers::create_restaurant_pizza_handler))
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
