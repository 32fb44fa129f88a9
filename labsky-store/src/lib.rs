pub mod app_config;
pub mod database;
pub mod memory_repo;
pub mod passenger_repo;
pub mod seed;

use std::sync::Arc;

use labsky_core::repository::PassengerRepository;
use tracing::info;

pub use app_config::{Config, StoreBackend};
pub use database::DbClient;
pub use memory_repo::InMemoryPassengerRepository;
pub use passenger_repo::PostgresPassengerRepository;

#[derive(Debug, thiserror::Error)]
pub enum StoreInitError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Seed(#[from] seed::SeedError),

    #[error(transparent)]
    Store(#[from] labsky_core::StoreError),
}

/// Build the passenger store selected in the configuration
pub async fn open_repository(config: &Config) -> Result<Arc<dyn PassengerRepository>, StoreInitError> {
    let passengers = match &config.store.seed_file {
        Some(path) => seed::load_passengers(path).await?,
        None => Vec::new(),
    };

    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory passenger store with {} seeded passengers", passengers.len());
            Ok(Arc::new(InMemoryPassengerRepository::with_passengers(passengers)))
        }
        StoreBackend::Postgres => {
            let db = DbClient::new(config.database()?).await?;
            db.migrate().await?;

            let repo = PostgresPassengerRepository::new(db.pool.clone());
            let inserted = repo.seed(&passengers).await?;
            info!("Using PostgreSQL passenger store, {} passengers seeded", inserted);
            Ok(Arc::new(repo))
        }
    }
}
