use std::sync::Arc;

use chrono::NaiveDate;
use labsky_shared::{LoyaltyTier, Passenger};

use crate::error::{CoreError, CoreResult, Entity};
use crate::repository::PassengerRepository;

/// Read-only profile projection of a passenger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerProfile {
    pub cpf: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub tier: LoyaltyTier,
    pub mileage: u32,
}

impl From<Passenger> for PassengerProfile {
    fn from(passenger: Passenger) -> Self {
        Self {
            cpf: passenger.cpf,
            name: passenger.name.into_inner(),
            birth_date: passenger.birth_date,
            tier: passenger.tier,
            mileage: passenger.mileage,
        }
    }
}

pub struct PassengerService {
    repo: Arc<dyn PassengerRepository>,
}

impl PassengerService {
    pub fn new(repo: Arc<dyn PassengerRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> CoreResult<Vec<Passenger>> {
        Ok(self.repo.list_passengers().await?)
    }

    pub async fn get_by_id(&self, cpf: &str) -> CoreResult<Passenger> {
        self.repo
            .find_passenger(cpf)
            .await?
            .ok_or(CoreError::NotFound(Entity::Passenger))
    }

    pub async fn get_profile(&self, cpf: &str) -> CoreResult<PassengerProfile> {
        self.get_by_id(cpf).await.map(PassengerProfile::from)
    }
}
