use serde::{Deserialize, Serialize};

/// Restaurant as listed by GET /restaurants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema)]
pub struct Pizza {
    pub id: i64,
    pub name: String,
    pub ingredients: String,
}

/// A restaurant's menu entry with its pizza inlined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RestaurantPizzaEntry {
    pub id: i64,
    pub pizza: Pizza,
    pub pizza_id: i64,
    pub price: i64,
    pub restaurant_id: i64,
}

/// Response type for GET /restaurants/{id}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RestaurantDetail {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaEntry>,
}

/// Request body for POST /restaurant_pizzas
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    pub price: i64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
}

/// Response type for a created restaurant pizza, with both parents inlined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RestaurantPizzaCreated {
    pub id: i64,
    pub pizza: Pizza,
    pub pizza_id: i64,
    pub price: i64,
    pub restaurant: Restaurant,
    pub restaurant_id: i64,
}
