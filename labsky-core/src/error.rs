use serde::Serialize;
use std::fmt;

use crate::repository::StoreError;

/// Entities that a lookup can fail to find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Passenger,
    Seat,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Passenger => write!(f, "Passenger"),
            Entity::Seat => write!(f, "Seat"),
        }
    }
}

/// Check-in rules that apply to emergency rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessRule {
    UnderageEmergencyRow,
    BaggageRequired,
}

impl fmt::Display for BusinessRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusinessRule::UnderageEmergencyRow => {
                write!(f, "Passenger is underage and cannot sit in the emergency rows (5 and 6)")
            }
            BusinessRule::BaggageRequired => {
                write!(f, "Passenger must check baggage to sit in the emergency rows (5 and 6)")
            }
        }
    }
}

/// A structural problem with one request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(rename = "campo")]
    pub field: String,
    #[serde(rename = "mensagem")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0} not found")]
    NotFound(Entity),

    #[error("Passenger has already checked in")]
    AlreadyCheckedIn,

    #[error("Seat {0} is already occupied by another passenger")]
    SeatOccupied(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    ValidationFailed(Vec<FieldError>),

    #[error("{0}")]
    BusinessRule(BusinessRule),

    #[error(transparent)]
    Store(StoreError),
}

impl CoreError {
    /// Machine readable code, also used as a metrics label
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound(Entity::Passenger) => "PASSENGER_NOT_FOUND",
            CoreError::NotFound(Entity::Seat) => "SEAT_NOT_FOUND",
            CoreError::AlreadyCheckedIn => "ALREADY_CHECKED_IN",
            CoreError::SeatOccupied(_) => "SEAT_OCCUPIED",
            CoreError::ValidationFailed(_) => "VALIDATION_FAILED",
            CoreError::BusinessRule(BusinessRule::UnderageEmergencyRow) => "UNDERAGE_EMERGENCY_ROW",
            CoreError::BusinessRule(BusinessRule::BaggageRequired) => "BAGGAGE_REQUIRED",
            CoreError::Store(_) => "STORE_FAILURE",
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SeatTaken(seat) => CoreError::SeatOccupied(seat),
            StoreError::AlreadyConfirmed(_) => CoreError::AlreadyCheckedIn,
            StoreError::PassengerMissing(_) => CoreError::NotFound(Entity::Passenger),
            other => CoreError::Store(other),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
