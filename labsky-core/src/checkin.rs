use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use labsky_catalog::{normalize_seat_code, SeatCatalog};
use labsky_shared::{CheckinStatus, Confirmation, Passenger};

use crate::clock::Clock;
use crate::error::{BusinessRule, CoreError, CoreResult, Entity};
use crate::loyalty;
use crate::repository::PassengerRepository;
use crate::request::ConfirmationRequest;

pub const MIN_EMERGENCY_ROW_AGE: i32 = 18;

/// Result of a successful check-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationReceipt {
    pub ticket: String,
    pub confirmed_at: DateTime<Utc>,
}

/// Validates check-in requests and commits the resulting passenger state
pub struct CheckinService {
    repo: Arc<dyn PassengerRepository>,
    clock: Arc<dyn Clock>,
}

impl CheckinService {
    pub fn new(repo: Arc<dyn PassengerRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Check a passenger in.
    ///
    /// Rules run in a fixed order and the first failure wins:
    /// passenger exists, not yet checked in, seat free, seat in catalog,
    /// emergency-row age, emergency-row baggage. The record is written once,
    /// after every rule passed.
    pub async fn confirm(&self, cpf: &str, request: &ConfirmationRequest) -> CoreResult<ConfirmationReceipt> {
        let passenger = self
            .repo
            .find_passenger(cpf)
            .await?
            .ok_or(CoreError::NotFound(Entity::Passenger))?;

        if passenger.is_checked_in() {
            return Err(CoreError::AlreadyCheckedIn);
        }

        let seat_code = normalize_seat_code(&request.seat);
        if self.repo.is_seat_taken(&seat_code).await? {
            return Err(CoreError::SeatOccupied(seat_code));
        }

        // Computed on the candidate state only, committed with the confirmation
        let mileage = loyalty::accrue(passenger.mileage, passenger.tier);

        let seat = SeatCatalog::lookup(&seat_code).map_err(|err| {
            tracing::debug!(seat = %seat_code, error = %err, "Seat rejected by catalog");
            CoreError::NotFound(Entity::Seat)
        })?;

        let now = self.clock.now();
        if seat.is_emergency_row() {
            if passenger.age_in_year(now.year()) < MIN_EMERGENCY_ROW_AGE {
                return Err(CoreError::BusinessRule(BusinessRule::UnderageEmergencyRow));
            }
            if !request.baggage_checked {
                return Err(CoreError::BusinessRule(BusinessRule::BaggageRequired));
            }
        }

        if request.ticket.is_some() || request.requested_at.is_some() {
            tracing::debug!(cpf = %cpf, "Ignoring client supplied ticket or timestamp");
        }

        let confirmation = Confirmation::issue(seat.to_string(), request.baggage_checked, now);
        let receipt = ConfirmationReceipt {
            ticket: confirmation.ticket.clone(),
            confirmed_at: confirmation.confirmed_at,
        };

        let updated = Passenger {
            mileage,
            checkin: CheckinStatus::Confirmed(confirmation),
            ..passenger
        };
        self.repo.commit_checkin(&updated).await?;

        tracing::info!(
            cpf = %updated.cpf,
            ticket = %receipt.ticket,
            seat = %seat,
            mileage = updated.mileage,
            "Passenger checked in"
        );

        Ok(receipt)
    }
}
