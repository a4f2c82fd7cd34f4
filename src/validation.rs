use std::ops::RangeInclusive;

/// Inclusive range a restaurant's pizza price must fall in
pub const PRICE_RANGE: RangeInclusive<i64> = 1..=30;

/// Reasons a restaurant pizza write is rejected
///
/// The HTTP layer collapses every variant into the same response body;
/// the variant only reaches the logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("price {price} is outside the allowed range {}..={}", PRICE_RANGE.start(), PRICE_RANGE.end())]
    PriceOutOfRange { price: i64 },
    #[error("restaurant {restaurant_id} or pizza {pizza_id} does not exist")]
    MissingReference { restaurant_id: i64, pizza_id: i64 },
}

/// A restaurant pizza row that passed the price check and may be inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRestaurantPizza {
    restaurant_id: i64,
    pizza_id: i64,
    price: i64,
}

impl NewRestaurantPizza {
    pub fn new(restaurant_id: i64, pizza_id: i64, price: i64) -> Result<Self, ValidationError> {
        validate_price(price)?;
        Ok(Self {
            restaurant_id,
            pizza_id,
            price,
        })
    }

    pub fn restaurant_id(&self) -> i64 {
        self.restaurant_id
    }

    pub fn pizza_id(&self) -> i64 {
        self.pizza_id
    }

    pub fn price(&self) -> i64 {
        self.price
    }
}

pub fn validate_price(price: i64) -> Result<(), ValidationError> {
    if PRICE_RANGE.contains(&price) {
        Ok(())
    } else {
        Err(ValidationError::PriceOutOfRange { price })
    }
}
