use anchor_lang::prelude::*;

use crate::errors::SoulboundError;
use crate::state::attribute::{attribute_value_to_u128, Attribute, AttributeValue};
use crate::state::identity::SoulRegistry;

// =============================================================================
// REWARD ENGINE - Tiered compounding rewards on a held amount
// =============================================================================
//
// Every soul accrues rewards on the amount attribute `A` in whole 30-day
// periods. The tier (and so the rate) is picked once from `A`. Each period
// adds `(A + acc) * rate` to the accumulator, which starts at the soul's
// withholdings:
//
//   acc_0     = withholdings
//   acc_{n+1} = acc_n + (A + acc_n) * rate
//
// The interval runs from the last checkpoint (`claimed_at`), or from the last
// change of the amount attribute when the soul never checkpointed.
//
// All amounts carry 18 decimals. Divisions truncate. Claims pay lamports, one
// lamport per 1e9 amount units.
// =============================================================================

/// Length of one compounding period in seconds
pub const REWARD_PERIOD: i64 = 30 * 24 * 60 * 60;

/// Fixed point scale of rates (1e18 = 100%)
pub const RATE_SCALE: u128 = 1_000_000_000_000_000_000;

/// One whole unit of the amount attribute
pub const AMOUNT_UNIT: u128 = 1_000_000_000_000_000_000;

pub const MAX_REWARD_TIERS: usize = 16;

/// (minimum amount in whole units, rate per period)
const DEFAULT_TIERS: [(u128, u128); 11] = [
    (10, 13_169_733_810_000_000),
    (200, 13_169_856_490_000_000),
    (4_000, 13_174_518_090_000_000),
    (10_000, 13_181_878_040_000_000),
    (16_000, 13_190_463_900_000_000),
    (30_000, 13_212_538_160_000_000),
    (60_000, 13_267_700_670_000_000),
    (100_000, 13_353_443_420_000_000),
    (160_000, 13_475_794_780_000_000),
    (2_000_000, 14_388_288_750_000_000),
    (6_000_000, 16_778_385_130_000_000),
];

/// Amounts at or above `min_amount` (up to the next tier) earn `rate` per period
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardTier {
    pub min_amount: u128,
    pub rate: u128,
}

impl RewardTier {
    pub const SIZE: usize = 16 + 16;
}

pub fn default_reward_tiers() -> Vec<RewardTier> {
    DEFAULT_TIERS
        .iter()
        .map(|&(units, rate)| RewardTier {
            min_amount: units * AMOUNT_UNIT,
            rate,
        })
        .collect()
}

pub fn validate_reward_tiers(tiers: &[RewardTier]) -> Result<()> {
    require!(
        !tiers.is_empty() && tiers.len() <= MAX_REWARD_TIERS,
        SoulboundError::InvalidRewardTiers
    );
    require!(
        tiers.iter().all(|tier| tier.min_amount > 0 && tier.rate <= RATE_SCALE),
        SoulboundError::InvalidRewardTiers
    );
    require!(
        tiers.windows(2).all(|pair| pair[0].min_amount < pair[1].min_amount),
        SoulboundError::InvalidRewardTiers
    );
    Ok(())
}

/// Rate of the highest tier reached by `amount`, 0 below the first tier
pub fn rate_for_amount(tiers: &[RewardTier], amount: u128) -> u128 {
    tiers
        .iter()
        .rev()
        .find(|tier| amount >= tier.min_amount)
        .map_or(0, |tier| tier.rate)
}

/// `floor(value * rate / RATE_SCALE)` without a 256-bit intermediate
fn apply_rate(value: u128, rate: u128) -> Result<u128> {
    let whole = (value / RATE_SCALE)
        .checked_mul(rate)
        .ok_or(error!(SoulboundError::MathOverflow))?;
    // Both factors are below 1e18, the product fits
    let fraction = (value % RATE_SCALE) * rate / RATE_SCALE;

    whole
        .checked_add(fraction)
        .ok_or(error!(SoulboundError::MathOverflow))
}

/// Reward accrued on `amount` over `interval` seconds on top of `withholdings`
pub fn calculate_reward(
    tiers: &[RewardTier],
    interval: i64,
    amount: u128,
    withholdings: u128,
) -> Result<u128> {
    require!(interval >= 0, SoulboundError::FutureInterval);

    let periods = interval / REWARD_PERIOD;
    let rate = rate_for_amount(tiers, amount);
    if periods == 0 || rate == 0 {
        return Ok(withholdings);
    }

    let mut accrued = withholdings;
    for _ in 0..periods {
        let base = amount
            .checked_add(accrued)
            .ok_or(error!(SoulboundError::MathOverflow))?;
        accrued = accrued
            .checked_add(apply_rate(base, rate)?)
            .ok_or(error!(SoulboundError::MathOverflow))?;
    }

    Ok(accrued)
}

/// The verification attribute holds exactly the integer 1
pub fn is_verified_value(value: &AttributeValue) -> bool {
    matches!(attribute_value_to_u128(value), Ok(1))
}

/// Scale between the 18-decimal amount unit and lamports (9 decimals)
pub const AMOUNT_UNITS_PER_LAMPORT: u128 = 1_000_000_000;

/// Lamports paid for `reward`. The 9 lowest decimals are truncated.
pub fn reward_lamports(reward: u128) -> Result<u64> {
    u64::try_from(reward / AMOUNT_UNITS_PER_LAMPORT)
        .map_err(|_| error!(SoulboundError::PayoutFailed))
}

/// Per-soul checkpoint, `["reward", soul_id]`
#[account]
#[derive(Default)]
pub struct RewardAccount {
    pub soul_id: u64,
    /// Last withhold or claim, 0 if never checkpointed
    pub claimed_at: i64,
    /// Reward checkpointed but not paid out yet
    pub withholdings: u128,
    /// PDA bump seed
    pub bump: u8,
}

impl RewardAccount {
    pub const SIZE: usize = 8 + 8 + 8 + 16 + 1;

    fn checkpoint(&mut self, soul_id: u64, now: i64, withholdings: u128) {
        self.soul_id = soul_id;
        self.claimed_at = now;
        self.withholdings = withholdings;
    }
}

/// Settled claim
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub soul_id: u64,
    /// Reward in 18-decimal units
    pub reward: u128,
    /// What actually leaves the treasury
    pub lamports: u64,
}

#[account]
pub struct RewardEngine {
    /// Treasury administrator
    pub authority: Pubkey,
    pub soul_registry: Pubkey,
    pub attribute_registry: Pubkey,
    /// Attribute feature holding the rewarded amount
    pub amount_feature: Pubkey,
    /// Attribute feature holding the verification flag
    pub verification_feature: Pubkey,
    pub paused: bool,
    pub tiers: Vec<RewardTier>,
    /// PDA bump seed
    pub bump: u8,
}

impl RewardEngine {
    pub const SIZE: usize = 8 +  // discriminator
        32 * 5 +                 // authority, registries, features
        1 +                      // paused
        4 + MAX_REWARD_TIERS * RewardTier::SIZE +
        1;                       // bump

    /// Current reward of the soul of `account`, withholdings included.
    /// `amount` is the soul's attribute of `amount_feature`.
    pub fn reward(&self, account: &RewardAccount, amount: &Attribute, now: i64) -> Result<u128> {
        let held = attribute_value_to_u128(&amount.value)?;

        let since = if account.claimed_at != 0 {
            account.claimed_at
        } else {
            amount.updated_at
        };
        require!(since <= now, SoulboundError::FutureInterval);

        calculate_reward(&self.tiers, now - since, held, account.withholdings)
    }

    /// Checkpoint the reward of `soul_id` without paying it out
    pub fn withhold(
        &self,
        account: &mut RewardAccount,
        souls: &SoulRegistry,
        amount: &Attribute,
        soul_id: u64,
        now: i64,
    ) -> Result<u128> {
        require!(!self.paused, SoulboundError::EnginePaused);
        require!(souls.is_soul(soul_id), SoulboundError::SoulNotFound);

        let reward = self.reward(account, amount, now)?;
        require!(reward > 0, SoulboundError::NothingToWithhold);

        account.checkpoint(soul_id, now, reward);
        Ok(reward)
    }

    /// Settle the reward of `soul_id`, the soul owning the claimer (0 when the
    /// claimer owns none). The caller pays out `Payout::lamports`; a reward
    /// worth less than one lamport stays with the soul.
    pub fn claim(
        &self,
        account: &mut RewardAccount,
        soul_id: u64,
        verification: &Attribute,
        amount: &Attribute,
        now: i64,
    ) -> Result<Payout> {
        require!(!self.paused, SoulboundError::EnginePaused);
        require!(soul_id != 0, SoulboundError::NotASoul);
        require!(
            is_verified_value(&verification.value),
            SoulboundError::NotVerified
        );

        let reward = self.reward(account, amount, now)?;
        let lamports = reward_lamports(reward)?;
        require!(lamports > 0, SoulboundError::NothingToClaim);

        account.checkpoint(soul_id, now, 0);
        Ok(Payout {
            soul_id,
            reward,
            lamports,
        })
    }

    pub fn pause(&mut self) -> Result<()> {
        require!(!self.paused, SoulboundError::EnginePaused);
        self.paused = true;
        Ok(())
    }

    pub fn unpause(&mut self) -> Result<()> {
        require!(self.paused, SoulboundError::EngineNotPaused);
        self.paused = false;
        Ok(())
    }

    pub fn set_reward_tiers(&mut self, tiers: Vec<RewardTier>) -> Result<()> {
        validate_reward_tiers(&tiers)?;
        self.tiers = tiers;
        Ok(())
    }
}
