use crate::config::{MongoConfig, PostgresConfig};
use crate::error::{AppError, AppResult};
use mongodb::bson::doc;
use mongodb::{Client, Database};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Open a PostgreSQL pool and verify the connection with a ping
pub async fn connect_postgres(config: &PostgresConfig) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.url)
        .await
        .map_err(|e| AppError::Database(format!("Failed to connect to PostgreSQL: {}", e)))?;

    sqlx::query("SELECT 1")
        .fetch_one(&pool)
        .await
        .map_err(|e| AppError::Database(format!("PostgreSQL ping failed: {}", e)))?;

    println!("✅ Connected to PostgreSQL");

    Ok(pool)
}

/// Open a MongoDB database handle and verify the connection with a ping
pub async fn connect_mongo(config: &MongoConfig) -> AppResult<Database> {
    let client = Client::with_uri_str(&config.url).await?;
    let db = client.database(&config.database);

    db.run_command(doc! { "ping": 1 }).await?;

    println!("✅ Connected to MongoDB (database: {})", config.database);

    Ok(db)
}
