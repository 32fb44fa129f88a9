use async_trait::async_trait;
use labsky_shared::Passenger;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Seat {0} is already assigned")]
    SeatTaken(String),

    #[error("Passenger {0} already holds a confirmation")]
    AlreadyConfirmed(String),

    #[error("Passenger {0} does not exist")]
    PassengerMissing(String),

    #[error("Storage backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        StoreError::Backend(err.into())
    }
}

/// Repository trait for passenger data access
#[async_trait]
pub trait PassengerRepository: Send + Sync {
    async fn list_passengers(&self) -> Result<Vec<Passenger>, StoreError>;

    async fn find_passenger(&self, cpf: &str) -> Result<Option<Passenger>, StoreError>;

    /// Whether any passenger holds the given normalized seat code
    async fn is_seat_taken(&self, seat: &str) -> Result<bool, StoreError>;

    /// Persist a freshly confirmed passenger.
    ///
    /// Insert-or-fail: must return `AlreadyConfirmed` when the stored record
    /// already carries a confirmation and `SeatTaken` when another passenger
    /// holds the seat at write time. Nothing is written in either case.
    async fn commit_checkin(&self, passenger: &Passenger) -> Result<(), StoreError>;
}
