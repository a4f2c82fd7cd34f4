use crate::error::{ApiError, ErrorResponse};
use crate::models::{Restaurant, RestaurantDetail};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// GET /restaurants handler - List every restaurant
#[utoipa::path(
    get,
    path = routes::RESTAURANTS,
    responses(
        (status = 200, description = "All restaurants", body = Vec<Restaurant>),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "restaurants"
)]
pub async fn list_restaurants_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<Restaurant>>), ApiError> {
    let restaurants = state.db.list_restaurants().await?;

    tracing::info!("Listed {} restaurants", restaurants.len());
    Ok((StatusCode::OK, Json(restaurants)))
}

/// GET /restaurants/{id} handler - Retrieve a restaurant and its pizzas
#[utoipa::path(
    get,
    path = routes::RESTAURANT_ITEM,
    params(
        ("id" = i64, Path, description = "Restaurant id")
    ),
    responses(
        (status = 200, description = "Restaurant found", body = RestaurantDetail),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "restaurants"
)]
pub async fn get_restaurant_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<RestaurantDetail>), ApiError> {
    let id = parse_restaurant_id(&id_str)?;

    match state.db.get_restaurant(id).await? {
        Some(restaurant) => {
            tracing::info!("Successfully retrieved restaurant with id: {}", id);
            Ok((StatusCode::OK, Json(restaurant)))
        }
        None => {
            tracing::info!("Restaurant not found with id: {}", id);
            Err(ApiError::RestaurantNotFound(id_str))
        }
    }
}

/// DELETE /restaurants/{id} handler - Delete a restaurant and its pizzas
#[utoipa::path(
    delete,
    path = routes::RESTAURANT_ITEM,
    params(
        ("id" = i64, Path, description = "Restaurant id")
    ),
    responses(
        (status = 204, description = "Restaurant deleted"),
        (status = 404, description = "Restaurant not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "restaurants"
)]
pub async fn delete_restaurant_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_restaurant_id(&id_str)?;

    if state.db.delete_restaurant(id).await? {
        tracing::info!("Deleted restaurant with id: {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        tracing::info!("Restaurant not found with id: {}", id);
        Err(ApiError::RestaurantNotFound(id_str))
    }
}

/// Ids that do not fit a row id cannot match any restaurant
fn parse_restaurant_id(id_str: &str) -> Result<i64, ApiError> {
    id_str.parse::<i64>().map_err(|_| {
        tracing::info!("Restaurant not found with id: {}", id_str);
        ApiError::RestaurantNotFound(id_str.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_bytes, body_json, delete, get, send, test_state};
    use crate::validation::NewRestaurantPizza;

    #[tokio::test]
    async fn test_list_restaurants_empty() {
        let (state, _dir) = test_state().await;
        let app = routes::router(state);

        let response = send(&app, get("/restaurants")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_list_restaurants_matches_row_count() {
        let (state, _dir) = test_state().await;
        let db = state.db.clone();
        let app = routes::router(state);

        let karen = db.insert_restaurant("Karen's Pizza Shack", "address1").await.unwrap();
        let sanjay = db.insert_restaurant("Sanjay's Pizza", "address2").await.unwrap();

        let response = send(&app, get("/restaurants")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<Restaurant> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, vec![karen, sanjay]);
    }

    #[tokio::test]
    async fn test_list_restaurants_only_top_level_fields() {
        let (state, _dir) = test_state().await;
        let db = state.db.clone();
        let app = routes::router(state);

        let restaurant = db.insert_restaurant("Kiki's Pizza", "address3").await.unwrap();
        let pizza = db.insert_pizza("Emma", "Dough").await.unwrap();
        db.create_restaurant_pizza(NewRestaurantPizza::new(restaurant.id, pizza.id, 9).unwrap())
            .await
            .unwrap();

        let body = body_json(send(&app, get("/restaurants")).await).await;
        assert_eq!(
            body,
            serde_json::json!([{"id": restaurant.id, "name": "Kiki's Pizza", "address": "address3"}])
        );
    }

    #[tokio::test]
    async fn test_get_restaurant_success() {
        let (state, _dir) = test_state().await;
        let db = state.db.clone();
        let app = routes::router(state);

        let restaurant = db.insert_restaurant("Kiki's Pizza", "address3").await.unwrap();
        let emma = db.insert_pizza("Emma", "Dough, Tomato Sauce, Cheese").await.unwrap();
        let geri = db.insert_pizza("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni").await.unwrap();
        for (pizza, price) in [(&emma, 5), (&geri, 12)] {
            db.create_restaurant_pizza(NewRestaurantPizza::new(restaurant.id, pizza.id, price).unwrap())
                .await
                .unwrap();
        }

        let response = send(&app, get(&format!("/restaurants/{}", restaurant.id))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], restaurant.id);
        assert_eq!(body["name"], "Kiki's Pizza");
        assert_eq!(body["address"], "address3");

        let entries = body["restaurant_pizzas"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0]["pizza"],
            serde_json::json!({"id": emma.id, "name": "Emma", "ingredients": "Dough, Tomato Sauce, Cheese"})
        );
        assert_eq!(entries[0]["pizza_id"], emma.id);
        assert_eq!(entries[0]["price"], 5);
        assert_eq!(entries[0]["restaurant_id"], restaurant.id);
        assert_eq!(entries[1]["pizza"]["name"], "Geri");
        assert_eq!(entries[1]["price"], 12);
    }

    #[tokio::test]
    async fn test_get_restaurant_without_pizzas() {
        let (state, _dir) = test_state().await;
        let db = state.db.clone();
        let app = routes::router(state);

        let restaurant = db.insert_restaurant("Sanjay's Pizza", "address2").await.unwrap();

        let response = send(&app, get(&format!("/restaurants/{}", restaurant.id))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: RestaurantDetail = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(body.restaurant_pizzas.is_empty());
    }

    #[tokio::test]
    async fn test_get_restaurant_not_found() {
        let (state, _dir) = test_state().await;
        let app = routes::router(state);

        let response = send(&app, get("/restaurants/42")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Restaurant not found"})
        );
    }

    #[tokio::test]
    async fn test_delete_restaurant_not_found() {
        let (state, _dir) = test_state().await;
        let app = routes::router(state);

        let response = send(&app, delete("/restaurants/42")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Restaurant not found"})
        );
    }

    #[tokio::test]
    async fn test_delete_restaurant_then_get_is_404() {
        let (state, _dir) = test_state().await;
        let db = state.db.clone();
        let app = routes::router(state);

        let restaurant = db.insert_restaurant("Karen's Pizza Shack", "address1").await.unwrap();
        let pizza = db.insert_pizza("Emma", "Dough").await.unwrap();
        db.create_restaurant_pizza(NewRestaurantPizza::new(restaurant.id, pizza.id, 1).unwrap())
            .await
            .unwrap();

        let uri = format!("/restaurants/{}", restaurant.id);
        let response = send(&app, delete(&uri)).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(body_bytes(response).await.is_empty());

        let response = send(&app, get(&uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM restaurant_pizzas WHERE restaurant_id = ?")
            .bind(restaurant.id)
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(remaining, 0);

        // Pizzas survive the cascade
        let pizzas = body_json(send(&app, get("/pizzas")).await).await;
        assert_eq!(pizzas.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_ids_are_not_found() {
        let (state, _dir) = test_state().await;
        let app = routes::router(state);

        for uri in [
            "/restaurants/99999999999999999999",
            "/restaurants/-99999999999999999999",
            "/restaurants/not-a-number",
        ] {
            for request in [get(uri), delete(uri)] {
                let response = send(&app, request).await;

                assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
                assert_eq!(
                    body_json(response).await,
                    serde_json::json!({"error": "Restaurant not found"})
                );
            }
        }
    }
}
