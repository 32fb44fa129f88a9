pub mod models;
pub mod pii;
pub mod wire;

pub use models::passenger::{CheckinStatus, Confirmation, LoyaltyTier, Passenger};
pub use pii::Masked;
