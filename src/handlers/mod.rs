pub mod health;
pub mod index;
pub mod pizzas;
pub mod restaurant_pizzas;
pub mod restaurants;

pub use health::health_handler;
pub use index::index_handler;
pub use pizzas::list_pizzas_handler;
pub use restaurant_pizzas::create_restaurant_pizza_handler;
pub use restaurants::{delete_restaurant_handler, get_restaurant_handler, list_restaurants_handler};
