use labsky_shared::LoyaltyTier;

/// Miles credited for one check-in
pub fn mileage_reward(tier: LoyaltyTier) -> u32 {
    match tier {
        LoyaltyTier::Vip => 100,
        LoyaltyTier::Gold => 80,
        LoyaltyTier::Silver => 50,
        LoyaltyTier::Bronze => 30,
        LoyaltyTier::Associate => 10,
        LoyaltyTier::Unrecognized => 0,
    }
}

/// Mileage after one check-in. Saturates instead of wrapping.
pub fn accrue(mileage: u32, tier: LoyaltyTier) -> u32 {
    mileage.saturating_add(mileage_reward(tier))
}
