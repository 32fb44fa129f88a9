use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pii::Masked;

/// Loyalty programme rank, highest first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoyaltyTier {
    Vip,
    #[serde(alias = "OURO")]
    Gold,
    #[serde(alias = "PRATA")]
    Silver,
    Bronze,
    #[serde(alias = "ASSOCIADO")]
    Associate,
    /// Stored tier value that matches none of the ranks above
    #[serde(other)]
    Unrecognized,
}

impl LoyaltyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoyaltyTier::Vip => "VIP",
            LoyaltyTier::Gold => "GOLD",
            LoyaltyTier::Silver => "SILVER",
            LoyaltyTier::Bronze => "BRONZE",
            LoyaltyTier::Associate => "ASSOCIATE",
            LoyaltyTier::Unrecognized => "UNRECOGNIZED",
        }
    }

    /// Parse a stored tier column. Unknown values map to `Unrecognized`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "VIP" => LoyaltyTier::Vip,
            "GOLD" | "OURO" => LoyaltyTier::Gold,
            "SILVER" | "PRATA" => LoyaltyTier::Silver,
            "BRONZE" => LoyaltyTier::Bronze,
            "ASSOCIATE" | "ASSOCIADO" => LoyaltyTier::Associate,
            _ => LoyaltyTier::Unrecognized,
        }
    }
}

/// Seat assignment recorded when a passenger checks in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Confirmation {
    pub ticket: String,
    pub seat: String,
    pub confirmed_at: DateTime<Utc>,
    pub baggage_checked: bool,
}

impl Confirmation {
    /// Issue a new confirmation with a freshly generated ticket
    pub fn issue(seat: String, baggage_checked: bool, confirmed_at: DateTime<Utc>) -> Self {
        Self {
            ticket: Uuid::new_v4().to_string(),
            seat,
            confirmed_at,
            baggage_checked,
        }
    }
}

/// Check-in state of a passenger. Check-in is one-shot: `Confirmed` is never reverted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckinStatus {
    #[default]
    Unconfirmed,
    Confirmed(Confirmation),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Passenger {
    pub cpf: String,
    pub name: Masked<String>,
    pub birth_date: NaiveDate,
    pub tier: LoyaltyTier,
    #[serde(default)]
    pub mileage: u32,
    #[serde(default)]
    pub checkin: CheckinStatus,
}

impl Passenger {
    pub fn new(cpf: impl Into<String>, name: impl Into<String>, birth_date: NaiveDate, tier: LoyaltyTier) -> Self {
        Self {
            cpf: cpf.into(),
            name: Masked(name.into()),
            birth_date,
            tier,
            mileage: 0,
            checkin: CheckinStatus::Unconfirmed,
        }
    }

    pub fn with_mileage(mut self, mileage: u32) -> Self {
        self.mileage = mileage;
        self
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        match &self.checkin {
            CheckinStatus::Confirmed(confirmation) => Some(confirmation),
            CheckinStatus::Unconfirmed => None,
        }
    }

    pub fn is_checked_in(&self) -> bool {
        matches!(self.checkin, CheckinStatus::Confirmed(_))
    }

    /// Age as a plain difference of calendar years, birthdays are not considered
    pub fn age_in_year(&self, year: i32) -> i32 {
        year - self.birth_date.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger() -> Passenger {
        Passenger::new(
            "111.111.111-11",
            "Phoebe Buffay",
            NaiveDate::from_ymd_opt(1998, 7, 21).unwrap(),
            LoyaltyTier::Vip,
        )
    }

    #[test]
    fn test_new_passenger_is_unconfirmed() {
        let p = passenger();
        assert!(!p.is_checked_in());
        assert!(p.confirmation().is_none());
        assert_eq!(p.mileage, 0);
    }

    #[test]
    fn test_age_ignores_birthday() {
        let p = passenger();
        // Born in July, still counted as 28 on New Year's day 2026
        assert_eq!(p.age_in_year(2026), 28);
    }

    #[test]
    fn test_tier_wire_names_and_aliases() {
        let tier: LoyaltyTier = serde_json::from_str("\"VIP\"").unwrap();
        assert_eq!(tier, LoyaltyTier::Vip);

        let tier: LoyaltyTier = serde_json::from_str("\"OURO\"").unwrap();
        assert_eq!(tier, LoyaltyTier::Gold);

        let tier: LoyaltyTier = serde_json::from_str("\"PLATINUM\"").unwrap();
        assert_eq!(tier, LoyaltyTier::Unrecognized);

        assert_eq!(serde_json::to_string(&LoyaltyTier::Associate).unwrap(), "\"ASSOCIATE\"");
    }

    #[test]
    fn test_tier_parse_matches_as_str() {
        for tier in [
            LoyaltyTier::Vip,
            LoyaltyTier::Gold,
            LoyaltyTier::Silver,
            LoyaltyTier::Bronze,
            LoyaltyTier::Associate,
        ] {
            assert_eq!(LoyaltyTier::parse(tier.as_str()), tier);
        }
        assert_eq!(LoyaltyTier::parse("prata"), LoyaltyTier::Silver);
        assert_eq!(LoyaltyTier::parse("diamond"), LoyaltyTier::Unrecognized);
    }

    #[test]
    fn test_confirmed_status_serialization() {
        let mut p = passenger();
        let confirmation = Confirmation::issue("1A".to_string(), true, Utc::now());
        p.checkin = CheckinStatus::Confirmed(confirmation.clone());

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["checkin"]["status"], "CONFIRMED");
        assert_eq!(json["checkin"]["seat"], "1A");
        assert_eq!(json["name"], "Phoebe Buffay");

        let back: Passenger = serde_json::from_value(json).unwrap();
        assert_eq!(back.confirmation(), Some(&confirmation));
    }

    #[test]
    fn test_missing_checkin_defaults_to_unconfirmed() {
        let json = serde_json::json!({
            "cpf": "222.222.222-22",
            "name": "Ross Geller",
            "birth_date": "1967-10-18",
            "tier": "GOLD",
            "mileage": 40
        });
        let p: Passenger = serde_json::from_value(json).unwrap();
        assert_eq!(p.checkin, CheckinStatus::Unconfirmed);
        assert_eq!(p.mileage, 40);
    }

    #[test]
    fn test_issued_tickets_are_unique() {
        let now = Utc::now();
        let a = Confirmation::issue("1A".to_string(), true, now);
        let b = Confirmation::issue("1B".to_string(), true, now);
        assert_ne!(a.ticket, b.ticket);
    }
}
