//! Integer fixed-point arithmetic for the reward accumulator.
//!
//! Every value here is an `i128`, matching the SEP-41 token amount type.
//! Nothing saturates: a result that does not fit is reported as
//! [`MathError::Overflow`] so the whole invocation is rolled back instead of
//! silently paying out a clamped amount.

/// Base number of fractional digits carried by `acc_reward_per_share`.
pub const ACC_PRECISION_DIGITS: u32 = 12;

/// Stellar asset contracts use 7 decimals. Stake tokens with fewer decimals
/// get one extra digit of accumulator precision per missing decimal.
pub const REFERENCE_DECIMALS: u32 = 7;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MathError {
    Overflow,
    /// The debt recorded for a position exceeds what it has accrued.
    NegativeOwed,
}

/// Accumulator scale for a stake token with `decimals` decimals.
///
/// ```text
/// precision = 10^(12 + (7 − min(decimals, 7)))
/// ```
///
/// The largest scale (`10^19`, for a 0-decimal token) still leaves
/// `stake × acc` well inside `i128` for realistic supplies.
pub fn precision_for_decimals(decimals: u32) -> i128 {
    let extra = REFERENCE_DECIMALS - decimals.min(REFERENCE_DECIMALS);
    10i128.pow(ACC_PRECISION_DIGITS + extra)
}

/// Reward emitted to one pool over `blocks` blocks.
///
/// ```text
/// reward = floor(blocks × rate × weight / total_weight)
/// ```
///
/// Multiplying before the single division keeps the sum over all pools at
/// or below `blocks × rate`.
pub fn pool_reward(
    blocks: u32,
    reward_rate: i128,
    alloc_weight: u32,
    total_weight: u32,
) -> Result<i128, MathError> {
    if blocks == 0 || total_weight == 0 || alloc_weight == 0 {
        return Ok(0);
    }
    let gross = i128::from(blocks)
        .checked_mul(reward_rate)
        .and_then(|r| r.checked_mul(i128::from(alloc_weight)))
        .ok_or(MathError::Overflow)?;
    Ok(gross / i128::from(total_weight))
}

/// Accumulator increment for distributing `reward` over `total_staked`.
///
/// ```text
/// Δacc = floor(reward × precision / total_staked)
/// ```
///
/// An empty pool yields zero: the reward for those blocks is forfeited, not
/// deferred to the next staker.
pub fn scaled_increment(
    reward: i128,
    total_staked: i128,
    precision: i128,
) -> Result<i128, MathError> {
    if total_staked <= 0 || reward <= 0 {
        return Ok(0);
    }
    let scaled = reward.checked_mul(precision).ok_or(MathError::Overflow)?;
    Ok(scaled / total_staked)
}

/// Reward attributable to `staked` at accumulator `acc`, still in scaled
/// units (not yet divided by the pool precision).
pub fn accrued(staked: i128, acc: i128) -> Result<i128, MathError> {
    staked.checked_mul(acc).ok_or(MathError::Overflow)
}

/// Lifts whole reward units back into the pool's scaled units, used to
/// charge a payout against a position's debt.
pub fn to_scaled(amount: i128, precision: i128) -> Result<i128, MathError> {
    amount.checked_mul(precision).ok_or(MathError::Overflow)
}

/// Converts scaled accrual minus scaled debt into whole reward units.
///
/// ```text
/// owed = floor((accrued − debt) / precision)
/// ```
///
/// Only the whole units are paid; the remainder stays in the difference and
/// is paid once it adds up. A negative difference can only come from broken
/// bookkeeping and is reported, never clamped.
pub fn owed(accrued: i128, reward_debt: i128, precision: i128) -> Result<i128, MathError> {
    let diff = accrued
        .checked_sub(reward_debt)
        .ok_or(MathError::Overflow)?;
    if diff < 0 {
        return Err(MathError::NegativeOwed);
    }
    Ok(diff / precision)
}
