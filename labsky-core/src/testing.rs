use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use labsky_shared::{LoyaltyTier, Passenger};
use tokio::sync::Mutex;

use crate::clock::Clock;
use crate::repository::{PassengerRepository, StoreError};

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn clock_2026() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap())
}

pub fn born(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 6, 15).unwrap()
}

pub fn adult(cpf: &str, tier: LoyaltyTier, mileage: u32) -> Passenger {
    Passenger::new(cpf, "Test Passenger", born(1990), tier).with_mileage(mileage)
}

/// Minimal repository double that counts writes
#[derive(Default)]
pub struct MockRepository {
    passengers: Mutex<HashMap<String, Passenger>>,
    pub commits: AtomicUsize,
}

impl MockRepository {
    pub fn with(passengers: Vec<Passenger>) -> Self {
        let map = passengers.into_iter().map(|p| (p.cpf.clone(), p)).collect();
        Self {
            passengers: Mutex::new(map),
            commits: AtomicUsize::new(0),
        }
    }

    pub async fn get(&self, cpf: &str) -> Passenger {
        self.passengers.lock().await.get(cpf).cloned().unwrap()
    }

    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PassengerRepository for MockRepository {
    async fn list_passengers(&self) -> Result<Vec<Passenger>, StoreError> {
        let mut all: Vec<Passenger> = self.passengers.lock().await.values().cloned().collect();
        all.sort_by(|a, b| a.cpf.cmp(&b.cpf));
        Ok(all)
    }

    async fn find_passenger(&self, cpf: &str) -> Result<Option<Passenger>, StoreError> {
        Ok(self.passengers.lock().await.get(cpf).cloned())
    }

    async fn is_seat_taken(&self, seat: &str) -> Result<bool, StoreError> {
        Ok(self
            .passengers
            .lock()
            .await
            .values()
            .any(|p| p.confirmation().is_some_and(|c| c.seat == seat)))
    }

    async fn commit_checkin(&self, passenger: &Passenger) -> Result<(), StoreError> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        self.passengers
            .lock()
            .await
            .insert(passenger.cpf.clone(), passenger.clone());
        Ok(())
    }
}
