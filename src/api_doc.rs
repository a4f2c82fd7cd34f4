use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse, ValidationErrorResponse};
use crate::handlers;
use crate::models::{
    CreateRestaurantPizzaRequest, Pizza, Restaurant, RestaurantDetail, RestaurantPizzaCreated,
    RestaurantPizzaEntry,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "pizza-restaurants-api",
        version = "1.0.0",
        description = "Restaurants, pizzas and the prices restaurants charge for them, backed by SQLite"
    ),
    paths(
        handlers::index::index_handler,
        handlers::health::health_handler,
        handlers::restaurants::list_restaurants_handler,
        handlers::restaurants::get_restaurant_handler,
        handlers::restaurants::delete_restaurant_handler,
        handlers::pizzas::list_pizzas_handler,
        handlers::restaurant_pizzas::create_restaurant_pizza_handler
    ),
    components(
        schemas(
            Restaurant,
            RestaurantDetail,
            RestaurantPizzaEntry,
            Pizza,
            CreateRestaurantPizzaRequest,
            RestaurantPizzaCreated,
            ErrorResponse,
            ValidationErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "index", description = "Static landing page"),
        (name = "health", description = "Health check operations"),
        (name = "restaurants", description = "Restaurant operations"),
        (name = "pizzas", description = "Pizza operations"),
        (name = "restaurant_pizzas", description = "Restaurant menu entries with prices")
    )
)]
pub struct ApiDoc;
