use std::path::Path;

use labsky_shared::Passenger;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the passenger list from a JSON seed file
pub async fn load_passengers(path: impl AsRef<Path>) -> Result<Vec<Passenger>, SeedError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let raw = tokio::fs::read_to_string(path).await.map_err(|source| SeedError::Io {
        path: display.clone(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| SeedError::Parse { path: display, source })
}
