use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::ContractError;

// ── Storage key constants ───────────────────────────────────────────────────

const PERIOD: Symbol = symbol_short!("PERIOD");
const CURRENT_PERIOD: Symbol = symbol_short!("CUR_PER");
const PERIOD_CTR: Symbol = symbol_short!("PER_CTR");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 3_110_400;

// ── Types ───────────────────────────────────────────────────────────────────

/// A contiguous block range with a fixed emission rate.
///
/// Periods are written once and never mutated; creating the next one only
/// moves the `CUR_PER` pointer, so every past window stays readable.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Period {
    /// Sequential identifier, starting at 1.
    pub id: u32,
    pub start_block: u32,
    pub end_block: u32,
    /// Reward units emitted per block, shared by all pools by weight.
    pub reward_rate: i128,
}

/// Where the schedule stands relative to the current ledger.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ScheduleState {
    NoPeriod = 0,
    /// Created, but `start_block` has not been reached.
    Scheduled = 1,
    Active = 2,
    Expired = 3,
}

impl Period {
    /// Reward escrowed for the whole window.
    pub fn total_reward(&self) -> Option<i128> {
        let blocks = self.end_block.checked_sub(self.start_block)?;
        self.reward_rate.checked_mul(i128::from(blocks))
    }

    pub fn state_at(&self, now: u32) -> ScheduleState {
        if now < self.start_block {
            ScheduleState::Scheduled
        } else if now <= self.end_block {
            ScheduleState::Active
        } else {
            ScheduleState::Expired
        }
    }
}

// ── Window arithmetic ───────────────────────────────────────────────────────

/// Number of rewarded blocks between `last_sync` and `now`.
///
/// ```text
/// end   = min(now, period.end_block)
/// start = max(last_sync, period.start_block)
/// blocks = end > start ? end − start : 0
/// ```
///
/// Blocks before the window opens or after it closes contribute nothing, so
/// a late synchronisation catches up exactly once.
pub fn blocks_elapsed_in_window(now: u32, period: &Period, last_sync: u32) -> u32 {
    let end = now.min(period.end_block);
    let start = last_sync.max(period.start_block);
    if end > start {
        end - start
    } else {
        0
    }
}

/// Checks a proposed window against the schedule. Pure: callers run it
/// before touching any storage.
pub fn validate_new_period(
    now: u32,
    current: Option<&Period>,
    start_block: u32,
    end_block: u32,
    reward_rate: i128,
) -> Result<(), ContractError> {
    if end_block <= start_block || reward_rate <= 0 {
        return Err(ContractError::InvalidPeriod);
    }
    if let Some(current) = current {
        if start_block <= current.end_block {
            return Err(ContractError::PeriodOverlap);
        }
        if now <= current.end_block {
            return Err(ContractError::PeriodActive);
        }
    }
    Ok(())
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn period_key(id: u32) -> (Symbol, u32) {
    (PERIOD, id)
}

pub fn get(env: &Env, id: u32) -> Option<Period> {
    env.storage().persistent().get(&period_key(id))
}

/// The period the `CUR_PER` pointer refers to, expired or not.
pub fn current(env: &Env) -> Option<Period> {
    let id: u32 = env.storage().instance().get(&CURRENT_PERIOD)?;
    get(env, id)
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&PERIOD_CTR).unwrap_or(0)
}

pub fn schedule_state(env: &Env) -> ScheduleState {
    match current(env) {
        Some(p) => p.state_at(env.ledger().sequence()),
        None => ScheduleState::NoPeriod,
    }
}

/// Archives a new period and points the schedule at it.
pub fn append(env: &Env, start_block: u32, end_block: u32, reward_rate: i128) -> Period {
    let id = count(env).saturating_add(1);
    let period = Period {
        id,
        start_block,
        end_block,
        reward_rate,
    };

    let key = period_key(id);
    env.storage().persistent().set(&key, &period);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    env.storage().instance().set(&PERIOD_CTR, &id);
    env.storage().instance().set(&CURRENT_PERIOD, &id);

    period
}
