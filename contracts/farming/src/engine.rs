//! Accumulator bookkeeping shared by every entry point.
//!
//! Each mutating operation follows the same order: roll the pool's
//! accumulator forward to the current ledger, then apply its own delta to
//! the position and the pool. Token movements are left to the caller so
//! that this module only ever touches storage.

use soroban_sdk::{log, panic_with_error, Address, Env};

use crate::{
    events,
    math::{self, MathError},
    period,
    pool::{self, Pool},
    position::{self, Position},
    ContractError,
};

// ── Accumulator ─────────────────────────────────────────────────────────────

/// Accumulator value `pool` would hold if synchronised at `now`.
///
/// Both [`synchronize`] and [`pending_reward`] go through this function, so
/// the mutating path and the read-only projection cannot drift apart.
pub fn projected_acc(env: &Env, pool: &Pool, now: u32) -> Result<i128, ContractError> {
    if now <= pool.last_sync_block || pool.total_staked <= 0 {
        return Ok(pool.acc_reward_per_share);
    }
    let Some(active) = period::current(env) else {
        return Ok(pool.acc_reward_per_share);
    };

    let blocks = period::blocks_elapsed_in_window(now, &active, pool.last_sync_block);
    let reward = math::pool_reward(
        blocks,
        active.reward_rate,
        pool.alloc_weight,
        pool::total_alloc_weight(env),
    )?;
    let increment = math::scaled_increment(reward, pool.total_staked, pool.precision)?;

    pool.acc_reward_per_share
        .checked_add(increment)
        .ok_or(ContractError::MathOverflow)
}

/// Rolls `pool` forward to the current ledger and persists it.
///
/// Idempotent within a ledger: a second call at the same sequence number
/// returns without writing.
pub fn synchronize(env: &Env, pool: &mut Pool) -> Result<(), ContractError> {
    let now = env.ledger().sequence();
    if now <= pool.last_sync_block {
        return Ok(());
    }

    pool.acc_reward_per_share = projected_acc(env, pool, now)?;
    pool.last_sync_block = now;
    pool::store(env, pool);

    events::publish_pool_updated(
        env,
        pool.id,
        now,
        pool.total_staked,
        pool.acc_reward_per_share,
    );
    Ok(())
}

/// Synchronises every registered pool. Required before anything that
/// changes how emission is split (weights, schedule).
pub fn synchronize_all(env: &Env) -> Result<(), ContractError> {
    for id in 0..pool::count(env) {
        let mut p = pool::load(env, id)?;
        synchronize(env, &mut p)?;
    }
    Ok(())
}

/// Moves every pool's sync point to `block`, so the gap between two
/// periods accrues nothing under the new rate.
pub fn rebase_all(env: &Env, block: u32) -> Result<(), ContractError> {
    for id in 0..pool::count(env) {
        let mut p = pool::load(env, id)?;
        p.last_sync_block = block;
        pool::store(env, &p);
    }
    Ok(())
}

// ── Owed reward ─────────────────────────────────────────────────────────────

/// Unsigned view of `accrued − debt`. A negative result means the debt
/// bookkeeping is broken; the invocation aborts instead of paying a
/// wrapped or clamped amount.
fn owed(env: &Env, pool: &Pool, accrued: i128, reward_debt: i128) -> Result<i128, ContractError> {
    match math::owed(accrued, reward_debt, pool.precision) {
        Ok(amount) => Ok(amount),
        Err(MathError::NegativeOwed) => {
            log!(
                env,
                "reward debt exceeds accrual",
                pool.id,
                accrued,
                reward_debt
            );
            panic_with_error!(env, ContractError::InvariantViolation)
        }
        Err(e) => Err(e.into()),
    }
}

/// Read-only projection of the reward `account` could claim right now.
pub fn pending_reward(env: &Env, pool_id: u32, account: &Address) -> Result<i128, ContractError> {
    let p = pool::load(env, pool_id)?;
    let acc = projected_acc(env, &p, env.ledger().sequence())?;
    let pos = position::load(env, pool_id, account);
    owed(env, &p, math::accrued(pos.staked, acc)?, pos.reward_debt)
}

// ── Stake changes ───────────────────────────────────────────────────────────

/// Credits `amount` to `account`'s position. The new stake starts with a
/// debt equal to its share of the current accumulator, so it earns nothing
/// retroactively.
pub fn on_stake_increase(
    env: &Env,
    pool_id: u32,
    account: &Address,
    amount: i128,
) -> Result<(Pool, Position), ContractError> {
    let mut p = pool::load(env, pool_id)?;
    synchronize(env, &mut p)?;

    let mut pos = position::load(env, pool_id, account);
    let added_debt = math::accrued(amount, p.acc_reward_per_share)?;

    pos.staked = pos
        .staked
        .checked_add(amount)
        .ok_or(ContractError::MathOverflow)?;
    pos.reward_debt = pos
        .reward_debt
        .checked_add(added_debt)
        .ok_or(ContractError::MathOverflow)?;
    p.total_staked = p
        .total_staked
        .checked_add(amount)
        .ok_or(ContractError::MathOverflow)?;

    position::store(env, pool_id, account, &pos);
    pool::store(env, &p);
    Ok((p, pos))
}

/// Debits `amount` from `account`'s position without paying reward. The
/// reward earned by the withdrawn stake stays claimable because the debt
/// drops by exactly that stake's share of the accumulator.
pub fn on_stake_decrease(
    env: &Env,
    pool_id: u32,
    account: &Address,
    amount: i128,
) -> Result<(Pool, Position), ContractError> {
    let mut p = pool::load(env, pool_id)?;
    let mut pos = position::load(env, pool_id, account);
    if amount > pos.staked {
        return Err(ContractError::InsufficientStake);
    }
    synchronize(env, &mut p)?;

    let removed_debt = math::accrued(amount, p.acc_reward_per_share)?;
    pos.reward_debt = pos
        .reward_debt
        .checked_sub(removed_debt)
        .ok_or(ContractError::MathOverflow)?;
    pos.staked = pos
        .staked
        .checked_sub(amount)
        .ok_or(ContractError::MathOverflow)?;
    p.total_staked = p
        .total_staked
        .checked_sub(amount)
        .ok_or(ContractError::MathOverflow)?;

    position::store(env, pool_id, account, &pos);
    pool::store(env, &p);
    Ok((p, pos))
}

/// Charges the whole units about to be paid out against `account`'s debt
/// and returns them. The sub-unit remainder stays on the position, so the
/// lifetime payout does not depend on how often the account claims.
pub fn settle(env: &Env, pool_id: u32, account: &Address) -> Result<i128, ContractError> {
    let mut p = pool::load(env, pool_id)?;
    synchronize(env, &mut p)?;

    let mut pos = position::load(env, pool_id, account);
    let accrued = math::accrued(pos.staked, p.acc_reward_per_share)?;
    let amount = owed(env, &p, accrued, pos.reward_debt)?;

    pos.reward_debt = pos
        .reward_debt
        .checked_add(math::to_scaled(amount, p.precision)?)
        .ok_or(ContractError::MathOverflow)?;
    position::store(env, pool_id, account, &pos);
    Ok(amount)
}

/// Withdraw-and-claim in one step: a single synchronisation, the owed
/// amount taken from the pre-withdrawal accrual, then the withdrawn share
/// and the payout both taken off the debt. The remainder carries over as in
/// [`settle`].
pub fn decrease_and_settle(
    env: &Env,
    pool_id: u32,
    account: &Address,
    amount: i128,
) -> Result<(Pool, i128), ContractError> {
    let mut p = pool::load(env, pool_id)?;
    let mut pos = position::load(env, pool_id, account);
    if amount > pos.staked {
        return Err(ContractError::InsufficientStake);
    }
    synchronize(env, &mut p)?;

    let accrued = math::accrued(pos.staked, p.acc_reward_per_share)?;
    let reward = owed(env, &p, accrued, pos.reward_debt)?;

    let removed_debt = math::accrued(amount, p.acc_reward_per_share)?;
    let paid_debt = math::to_scaled(reward, p.precision)?;
    pos.reward_debt = pos
        .reward_debt
        .checked_sub(removed_debt)
        .and_then(|d| d.checked_add(paid_debt))
        .ok_or(ContractError::MathOverflow)?;
    pos.staked = pos
        .staked
        .checked_sub(amount)
        .ok_or(ContractError::MathOverflow)?;
    p.total_staked = p
        .total_staked
        .checked_sub(amount)
        .ok_or(ContractError::MathOverflow)?;

    position::store(env, pool_id, account, &pos);
    pool::store(env, &p);
    Ok((p, reward))
}
