use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use labsky_core::repository::{PassengerRepository, StoreError};
use labsky_shared::Passenger;

/// Process-local passenger store keyed by CPF
#[derive(Default)]
pub struct InMemoryPassengerRepository {
    passengers: RwLock<BTreeMap<String, Passenger>>,
}

impl InMemoryPassengerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_passengers(passengers: Vec<Passenger>) -> Self {
        let map = passengers.into_iter().map(|p| (p.cpf.clone(), p)).collect();
        Self {
            passengers: RwLock::new(map),
        }
    }

    pub async fn insert(&self, passenger: Passenger) {
        self.passengers.write().await.insert(passenger.cpf.clone(), passenger);
    }

    pub async fn len(&self) -> usize {
        self.passengers.read().await.len()
    }
}

fn holds_seat(passenger: &Passenger, seat: &str) -> bool {
    passenger.confirmation().is_some_and(|c| c.seat == seat)
}

#[async_trait]
impl PassengerRepository for InMemoryPassengerRepository {
    async fn list_passengers(&self) -> Result<Vec<Passenger>, StoreError> {
        Ok(self.passengers.read().await.values().cloned().collect())
    }

    async fn find_passenger(&self, cpf: &str) -> Result<Option<Passenger>, StoreError> {
        Ok(self.passengers.read().await.get(cpf).cloned())
    }

    async fn is_seat_taken(&self, seat: &str) -> Result<bool, StoreError> {
        Ok(self.passengers.read().await.values().any(|p| holds_seat(p, seat)))
    }

    async fn commit_checkin(&self, passenger: &Passenger) -> Result<(), StoreError> {
        let confirmation = passenger.confirmation().ok_or_else(|| {
            StoreError::backend(format!("no confirmation to commit for {}", passenger.cpf))
        })?;

        // Both conflict checks and the write happen under one lock
        let mut passengers = self.passengers.write().await;

        match passengers.get(&passenger.cpf) {
            None => return Err(StoreError::PassengerMissing(passenger.cpf.clone())),
            Some(stored) if stored.is_checked_in() => {
                return Err(StoreError::AlreadyConfirmed(passenger.cpf.clone()))
            }
            Some(_) => {}
        }

        if passengers
            .values()
            .any(|p| p.cpf != passenger.cpf && holds_seat(p, &confirmation.seat))
        {
            return Err(StoreError::SeatTaken(confirmation.seat.clone()));
        }

        passengers.insert(passenger.cpf.clone(), passenger.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use labsky_shared::{CheckinStatus, Confirmation, LoyaltyTier};

    fn passenger(cpf: &str) -> Passenger {
        Passenger::new(cpf, "Test", NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(), LoyaltyTier::Gold)
    }

    fn confirmed(cpf: &str, seat: &str) -> Passenger {
        let mut p = passenger(cpf);
        p.checkin = CheckinStatus::Confirmed(Confirmation::issue(seat.to_string(), true, Utc::now()));
        p
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_cpf() {
        let repo = InMemoryPassengerRepository::with_passengers(vec![passenger("222"), passenger("111")]);
        let cpfs: Vec<String> = repo.list_passengers().await.unwrap().into_iter().map(|p| p.cpf).collect();
        assert_eq!(cpfs, vec!["111", "222"]);
    }

    #[tokio::test]
    async fn test_commit_and_seat_lookup() {
        let repo = InMemoryPassengerRepository::with_passengers(vec![passenger("111")]);
        assert!(!repo.is_seat_taken("1A").await.unwrap());

        repo.commit_checkin(&confirmed("111", "1A")).await.unwrap();

        assert!(repo.is_seat_taken("1A").await.unwrap());
        assert!(repo.find_passenger("111").await.unwrap().unwrap().is_checked_in());
    }

    #[tokio::test]
    async fn test_commit_rejects_second_confirmation() {
        let repo = InMemoryPassengerRepository::with_passengers(vec![passenger("111")]);
        repo.commit_checkin(&confirmed("111", "1A")).await.unwrap();

        let err = repo.commit_checkin(&confirmed("111", "2A")).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyConfirmed(_)));
        assert!(!repo.is_seat_taken("2A").await.unwrap());
    }

    #[tokio::test]
    async fn test_commit_rejects_taken_seat() {
        let repo = InMemoryPassengerRepository::with_passengers(vec![passenger("111"), passenger("222")]);
        repo.commit_checkin(&confirmed("111", "1A")).await.unwrap();

        let err = repo.commit_checkin(&confirmed("222", "1A")).await.unwrap_err();
        assert!(matches!(err, StoreError::SeatTaken(ref seat) if seat == "1A"));
        assert!(!repo.find_passenger("222").await.unwrap().unwrap().is_checked_in());
    }

    #[tokio::test]
    async fn test_commit_unknown_passenger() {
        let repo = InMemoryPassengerRepository::new();
        let err = repo.commit_checkin(&confirmed("999", "1A")).await.unwrap_err();
        assert!(matches!(err, StoreError::PassengerMissing(_)));
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn test_commit_requires_confirmation() {
        let repo = InMemoryPassengerRepository::with_passengers(vec![passenger("111")]);
        let err = repo.commit_checkin(&passenger("111")).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
