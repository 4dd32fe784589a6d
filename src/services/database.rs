use std::str::FromStr;

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use tracing::info;

use crate::utilities::{config::Config, errors::AppError};

#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let options = PgConnectOptions::from_str(&config.database_url)
            .map_err(|_| AppError::DatabaseParsingError)?
            .ssl_mode(config.pg_ssl_mode);

        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect_with(options)
            .await?;

        info!("Connected to database");

        if config.run_migrations {
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Database migrations applied");
        }

        Ok(Self { pool })
    }
}
