use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Row, Sqlite, Transaction};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;
use crate::models::{Pizza, Restaurant, RestaurantDetail, RestaurantPizzaCreated, RestaurantPizzaEntry};
use crate::validation::{NewRestaurantPizza, PRICE_RANGE};

/// Shareable handle on the SQLite pool for use across async handlers
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the pool described by `DB_URI` and provision the schema
    ///
    /// The database file is created when missing and every connection runs
    /// with foreign keys enforced, which the restaurant cascade relies on.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.db_uri)
            .with_context(|| format!("DB_URI is not a valid SQLite connection string: {}", config.db_uri))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_with(options)
            .await
            .context("Failed to open database")?;

        tracing::info!("Successfully connected to database: {}", config.db_uri);

        let db = Self { pool };
        db.auto_provision().await?;
        Ok(db)
    }

    /// Create the three tables when they do not exist yet
    async fn auto_provision(&self) -> Result<()> {
        let schema = format!(
            r#"
            CREATE TABLE IF NOT EXISTS restaurants (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                address TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS pizzas (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                ingredients TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS restaurant_pizzas (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                price INTEGER NOT NULL CHECK (price BETWEEN {min} AND {max}),
                restaurant_id INTEGER NOT NULL REFERENCES restaurants(id) ON DELETE CASCADE,
                pizza_id INTEGER NOT NULL REFERENCES pizzas(id)
            );
            CREATE INDEX IF NOT EXISTS idx_restaurant_pizzas_restaurant_id
                ON restaurant_pizzas (restaurant_id);
            "#,
            min = PRICE_RANGE.start(),
            max = PRICE_RANGE.end(),
        );

        sqlx::raw_sql(&schema)
            .execute(&self.pool)
            .await
            .context("Failed to provision schema")?;

        tracing::info!("Schema provisioning complete");
        Ok(())
    }

    /// Run `SELECT 1` to check the pool can reach the database
    pub async fn health_check(&self) -> Result<()> {
        let one: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Failed to execute health check query")?;

        if one == 1 {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned {}", one))
        }
    }

    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>> {
        let restaurants = sqlx::query_as::<_, Restaurant>(
            "SELECT id, name, address FROM restaurants ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list restaurants")?;

        tracing::debug!("Listed {} restaurants", restaurants.len());
        Ok(restaurants)
    }

    pub async fn list_pizzas(&self) -> Result<Vec<Pizza>> {
        let pizzas = sqlx::query_as::<_, Pizza>(
            "SELECT id, name, ingredients FROM pizzas ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list pizzas")?;

        tracing::debug!("Listed {} pizzas", pizzas.len());
        Ok(pizzas)
    }

    /// Read a restaurant together with its menu
    ///
    /// # Returns
    /// * `Ok(Some(detail))` - Restaurant found
    /// * `Ok(None)` - No restaurant with this id
    /// * `Err(_)` - Query failed
    pub async fn get_restaurant(&self, id: i64) -> Result<Option<RestaurantDetail>> {
        let mut tx = self.pool.begin().await.context("Failed to begin read transaction")?;

        let Some(restaurant) = fetch_restaurant(&mut tx, id).await? else {
            tracing::debug!("Restaurant not found with id: {}", id);
            return Ok(None);
        };

        let rows = sqlx::query(
            r#"
            SELECT rp.id, rp.price, rp.pizza_id, rp.restaurant_id,
                   p.name AS pizza_name, p.ingredients AS pizza_ingredients
            FROM restaurant_pizzas rp
            JOIN pizzas p ON p.id = rp.pizza_id
            WHERE rp.restaurant_id = ?
            ORDER BY rp.id
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await
        .context("Failed to query restaurant pizzas")?;

        let mut restaurant_pizzas = Vec::with_capacity(rows.len());
        for row in rows {
            let pizza_id: i64 = row.try_get("pizza_id")?;
            restaurant_pizzas.push(RestaurantPizzaEntry {
                id: row.try_get("id")?,
                pizza: Pizza {
                    id: pizza_id,
                    name: row.try_get("pizza_name")?,
                    ingredients: row.try_get("pizza_ingredients")?,
                },
                pizza_id,
                price: row.try_get("price")?,
                restaurant_id: row.try_get("restaurant_id")?,
            });
        }

        tx.commit().await.context("Failed to commit read transaction")?;

        tracing::debug!(
            "Read restaurant {} with {} pizzas",
            id,
            restaurant_pizzas.len()
        );
        Ok(Some(RestaurantDetail {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
            restaurant_pizzas,
        }))
    }

    /// Delete a restaurant and, through the foreign key cascade, its menu
    ///
    /// Returns `false` when no restaurant has this id.
    pub async fn delete_restaurant(&self, id: i64) -> Result<bool> {
        let mut tx = self.begin_write().await.context("Failed to begin delete transaction")?;

        let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete restaurant")?;

        if result.rows_affected() == 0 {
            tracing::debug!("Restaurant not found with id: {}", id);
            return Ok(false);
        }

        tx.commit().await.context("Failed to commit delete")?;

        tracing::debug!("Deleted restaurant with id: {}", id);
        Ok(true)
    }

    /// Insert a restaurant pizza after checking both parents exist
    ///
    /// Returns `Ok(None)` without writing anything when the restaurant or
    /// the pizza is missing.
    pub async fn create_restaurant_pizza(
        &self,
        new: NewRestaurantPizza,
    ) -> Result<Option<RestaurantPizzaCreated>> {
        let mut tx = self.begin_write().await.context("Failed to begin write transaction")?;

        let restaurant = fetch_restaurant(&mut tx, new.restaurant_id()).await?;
        let pizza = fetch_pizza(&mut tx, new.pizza_id()).await?;
        let (Some(restaurant), Some(pizza)) = (restaurant, pizza) else {
            tracing::debug!(
                "Missing parent for restaurant pizza (restaurant: {}, pizza: {})",
                new.restaurant_id(),
                new.pizza_id()
            );
            return Ok(None);
        };

        let id = insert_restaurant_pizza(&mut tx, &new).await?;
        tx.commit().await.context("Failed to commit restaurant pizza")?;

        tracing::debug!("Inserted restaurant pizza with id: {}", id);
        Ok(Some(RestaurantPizzaCreated {
            id,
            pizza_id: pizza.id,
            pizza,
            price: new.price(),
            restaurant_id: restaurant.id,
            restaurant,
        }))
    }

    pub async fn insert_restaurant(&self, name: &str, address: &str) -> Result<Restaurant> {
        let result = sqlx::query("INSERT INTO restaurants (name, address) VALUES (?, ?)")
            .bind(name)
            .bind(address)
            .execute(&self.pool)
            .await
            .context("Failed to insert restaurant")?;

        Ok(Restaurant {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            address: address.to_string(),
        })
    }

    pub async fn insert_pizza(&self, name: &str, ingredients: &str) -> Result<Pizza> {
        let result = sqlx::query("INSERT INTO pizzas (name, ingredients) VALUES (?, ?)")
            .bind(name)
            .bind(ingredients)
            .execute(&self.pool)
            .await
            .context("Failed to insert pizza")?;

        Ok(Pizza {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            ingredients: ingredients.to_string(),
        })
    }

    /// Fill an empty database with a few sample rows
    ///
    /// Does nothing when at least one restaurant already exists.
    pub async fn seed_if_empty(&self) -> Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM restaurants")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count restaurants")?;
        if count > 0 {
            tracing::info!("Database already holds {} restaurants, skipping seed", count);
            return Ok(());
        }

        let shack = self.insert_restaurant("Karen's Pizza Shack", "address1").await?;
        let sanjay = self.insert_restaurant("Sanjay's Pizza", "address2").await?;
        let kiki = self.insert_restaurant("Kiki's Pizza", "address3").await?;

        let emma = self.insert_pizza("Emma", "Dough, Tomato Sauce, Cheese").await?;
        let geri = self
            .insert_pizza("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni")
            .await?;
        let melanie = self
            .insert_pizza("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard")
            .await?;

        let mut tx = self.begin_write().await.context("Failed to begin seed transaction")?;
        for (restaurant, pizza, price) in [(&shack, &emma, 1), (&sanjay, &geri, 4), (&kiki, &melanie, 5)] {
            let new = NewRestaurantPizza::new(restaurant.id, pizza.id, price)?;
            insert_restaurant_pizza(&mut tx, &new).await?;
        }
        tx.commit().await.context("Failed to commit seed data")?;

        tracing::info!("Seeded 3 restaurants, 3 pizzas and 3 restaurant pizzas");
        Ok(())
    }

    /// Start a transaction that holds the write lock from its first statement
    ///
    /// A deferred transaction that reads before writing cannot wait on
    /// `busy_timeout` when it upgrades its lock; SQLite fails it with
    /// SQLITE_BUSY instead. `BEGIN IMMEDIATE` takes the lock up front, where
    /// the busy handler applies.
    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin_with("BEGIN IMMEDIATE").await
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(&self) {
        self.pool.close().await;
    }

    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn fetch_restaurant(tx: &mut Transaction<'_, Sqlite>, id: i64) -> Result<Option<Restaurant>> {
    sqlx::query_as::<_, Restaurant>("SELECT id, name, address FROM restaurants WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .context("Failed to query restaurant")
}

async fn fetch_pizza(tx: &mut Transaction<'_, Sqlite>, id: i64) -> Result<Option<Pizza>> {
    sqlx::query_as::<_, Pizza>("SELECT id, name, ingredients FROM pizzas WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .context("Failed to query pizza")
}

async fn insert_restaurant_pizza(
    tx: &mut Transaction<'_, Sqlite>,
    new: &NewRestaurantPizza,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO restaurant_pizzas (price, restaurant_id, pizza_id) VALUES (?, ?, ?)",
    )
    .bind(new.price())
    .bind(new.restaurant_id())
    .bind(new.pizza_id())
    .execute(&mut **tx)
    .await
    .context("Failed to insert restaurant pizza")?;

    Ok(result.last_insert_rowid())
}
