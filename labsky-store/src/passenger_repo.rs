use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use labsky_core::repository::{PassengerRepository, StoreError};
use labsky_shared::{CheckinStatus, Confirmation, LoyaltyTier, Masked, Passenger};

/// Partial unique index that keeps one passenger per seat
const SEAT_UNIQUE_INDEX: &str = "passengers_seat_unique";

pub struct PostgresPassengerRepository {
    pool: PgPool,
}

impl PostgresPassengerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert seed passengers, leaving existing rows untouched
    pub async fn seed(&self, passengers: &[Passenger]) -> Result<u64, StoreError> {
        let mut inserted = 0;
        for passenger in passengers {
            let result = sqlx::query(
                r#"
                INSERT INTO passengers (cpf, name, birth_date, loyalty_tier, mileage)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (cpf) DO NOTHING
                "#,
            )
            .bind(&passenger.cpf)
            .bind(passenger.name.expose())
            .bind(passenger.birth_date)
            .bind(passenger.tier.as_str())
            .bind(i64::from(passenger.mileage))
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }
}

#[derive(sqlx::FromRow)]
struct PassengerRow {
    cpf: String,
    name: String,
    birth_date: NaiveDate,
    loyalty_tier: String,
    mileage: i64,
    eticket: Option<String>,
    seat: Option<String>,
    confirmed_at: Option<DateTime<Utc>>,
    baggage_checked: Option<bool>,
}

impl PassengerRow {
    fn into_passenger(self) -> Result<Passenger, StoreError> {
        let mileage = u32::try_from(self.mileage)
            .map_err(|_| StoreError::backend(format!("mileage out of range for {}", self.cpf)))?;

        let checkin = match (self.eticket, self.seat, self.confirmed_at) {
            (Some(ticket), Some(seat), Some(confirmed_at)) => CheckinStatus::Confirmed(Confirmation {
                ticket,
                seat,
                confirmed_at,
                baggage_checked: self.baggage_checked.unwrap_or(false),
            }),
            (None, None, None) => CheckinStatus::Unconfirmed,
            _ => {
                return Err(StoreError::backend(format!(
                    "partial confirmation stored for {}",
                    self.cpf
                )))
            }
        };

        Ok(Passenger {
            cpf: self.cpf,
            name: Masked(self.name),
            birth_date: self.birth_date,
            tier: LoyaltyTier::parse(&self.loyalty_tier),
            mileage,
            checkin,
        })
    }
}

const SELECT_PASSENGER: &str = r#"
    SELECT cpf, name, birth_date, loyalty_tier, mileage,
           eticket, seat, confirmed_at, baggage_checked
    FROM passengers
"#;

#[async_trait]
impl PassengerRepository for PostgresPassengerRepository {
    async fn list_passengers(&self) -> Result<Vec<Passenger>, StoreError> {
        let rows = sqlx::query_as::<_, PassengerRow>(&format!("{SELECT_PASSENGER} ORDER BY cpf"))
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        rows.into_iter().map(PassengerRow::into_passenger).collect()
    }

    async fn find_passenger(&self, cpf: &str) -> Result<Option<Passenger>, StoreError> {
        let row = sqlx::query_as::<_, PassengerRow>(&format!("{SELECT_PASSENGER} WHERE cpf = $1"))
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        row.map(PassengerRow::into_passenger).transpose()
    }

    async fn is_seat_taken(&self, seat: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM passengers WHERE seat = $1)")
            .bind(seat)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::backend)
    }

    async fn commit_checkin(&self, passenger: &Passenger) -> Result<(), StoreError> {
        let confirmation = passenger.confirmation().ok_or_else(|| {
            StoreError::backend(format!("no confirmation to commit for {}", passenger.cpf))
        })?;

        // Only an unconfirmed row is updated, the seat index rejects double booking
        let result = sqlx::query(
            r#"
            UPDATE passengers
            SET mileage = $2, eticket = $3, seat = $4, confirmed_at = $5, baggage_checked = $6
            WHERE cpf = $1 AND eticket IS NULL
            "#,
        )
        .bind(&passenger.cpf)
        .bind(i64::from(passenger.mileage))
        .bind(&confirmation.ticket)
        .bind(&confirmation.seat)
        .bind(confirmation.confirmed_at)
        .bind(confirmation.baggage_checked)
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db)
                if db.is_unique_violation() && db.constraint() == Some(SEAT_UNIQUE_INDEX) =>
            {
                StoreError::SeatTaken(confirmation.seat.clone())
            }
            other => StoreError::backend(other),
        })?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM passengers WHERE cpf = $1)")
            .bind(&passenger.cpf)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        if exists {
            Err(StoreError::AlreadyConfirmed(passenger.cpf.clone()))
        } else {
            Err(StoreError::PassengerMissing(passenger.cpf.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> PassengerRow {
        PassengerRow {
            cpf: "111.111.111-11".to_string(),
            name: "Phoebe Buffay".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1998, 7, 21).unwrap(),
            loyalty_tier: "VIP".to_string(),
            mileage: 100,
            eticket: None,
            seat: None,
            confirmed_at: None,
            baggage_checked: None,
        }
    }

    #[test]
    fn test_unconfirmed_row() {
        let p = row().into_passenger().unwrap();
        assert_eq!(p.tier, LoyaltyTier::Vip);
        assert_eq!(p.mileage, 100);
        assert!(!p.is_checked_in());
    }

    #[test]
    fn test_confirmed_row() {
        let mut r = row();
        r.eticket = Some("ticket-1".to_string());
        r.seat = Some("1A".to_string());
        r.confirmed_at = Some(Utc::now());
        r.baggage_checked = Some(true);

        let p = r.into_passenger().unwrap();
        let c = p.confirmation().unwrap();
        assert_eq!(c.ticket, "ticket-1");
        assert_eq!(c.seat, "1A");
        assert!(c.baggage_checked);
    }

    #[test]
    fn test_partial_confirmation_is_rejected() {
        let mut r = row();
        r.seat = Some("1A".to_string());
        assert!(matches!(r.into_passenger(), Err(StoreError::Backend(_))));
    }

    #[test]
    fn test_legacy_and_unknown_tiers() {
        let mut r = row();
        r.loyalty_tier = "OURO".to_string();
        assert_eq!(r.into_passenger().unwrap().tier, LoyaltyTier::Gold);

        let mut r = row();
        r.loyalty_tier = "PLATINA".to_string();
        assert_eq!(r.into_passenger().unwrap().tier, LoyaltyTier::Unrecognized);
    }

    #[test]
    fn test_negative_mileage_is_rejected() {
        let mut r = row();
        r.mileage = -1;
        assert!(r.into_passenger().is_err());
    }
}
