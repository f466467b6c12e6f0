#![allow(deprecated)] // events().publish migration tracked separately

use common::PauseScope;
use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_token: Address,
    pub block: u32,
}

/// Fired when a stake-token pool joins the farm.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRegisteredEvent {
    pub pool_id: u32,
    pub stake_token: Address,
    pub alloc_weight: u32,
    pub total_alloc_weight: u32,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocWeightSetEvent {
    pub pool_id: u32,
    pub old_weight: u32,
    pub new_weight: u32,
    pub total_alloc_weight: u32,
    pub block: u32,
}

/// Fired when a new emission window replaces the previous one.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeriodCreatedEvent {
    pub period_id: u32,
    pub funder: Address,
    pub start_block: u32,
    pub end_block: u32,
    pub reward_rate: i128,
    pub escrowed: i128,
}

/// Fired whenever a pool's accumulator moves forward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub pool_id: u32,
    pub block: u32,
    pub total_staked: i128,
    pub acc_reward_per_share: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub pool_id: u32,
    pub from: Address,
    pub beneficiary: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub block: u32,
}

/// Fired on `unstake` and on `unstake_and_claim`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub pool_id: u32,
    pub owner: Address,
    pub recipient: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub block: u32,
}

/// Fired on `claim` and on `unstake_and_claim`, including zero claims.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub pool_id: u32,
    pub owner: Address,
    pub recipient: Address,
    pub amount: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub caller: Address,
    pub scope: PauseScope,
    pub paused: bool,
    pub block: u32,
}

/// Fired once when custody is swept and the contract goes inert.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecommissionedEvent {
    pub caller: Address,
    pub recipient: Address,
    pub reward_swept: i128,
    pub pools_swept: u32,
    pub block: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, reward_token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_token,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_registered(
    env: &Env,
    pool_id: u32,
    stake_token: Address,
    alloc_weight: u32,
    total_alloc_weight: u32,
) {
    env.events().publish(
        (symbol_short!("POOL_REG"), pool_id),
        PoolRegisteredEvent {
            pool_id,
            stake_token,
            alloc_weight,
            total_alloc_weight,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_alloc_weight_set(
    env: &Env,
    pool_id: u32,
    old_weight: u32,
    new_weight: u32,
    total_alloc_weight: u32,
) {
    env.events().publish(
        (symbol_short!("WEIGHT"), pool_id),
        AllocWeightSetEvent {
            pool_id,
            old_weight,
            new_weight,
            total_alloc_weight,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_period_created(
    env: &Env,
    period_id: u32,
    funder: Address,
    start_block: u32,
    end_block: u32,
    reward_rate: i128,
    escrowed: i128,
) {
    env.events().publish(
        (symbol_short!("PERIOD"), period_id),
        PeriodCreatedEvent {
            period_id,
            funder,
            start_block,
            end_block,
            reward_rate,
            escrowed,
        },
    );
}

pub fn publish_pool_updated(
    env: &Env,
    pool_id: u32,
    block: u32,
    total_staked: i128,
    acc_reward_per_share: i128,
) {
    env.events().publish(
        (symbol_short!("POOL_UPD"), pool_id),
        PoolUpdatedEvent {
            pool_id,
            block,
            total_staked,
            acc_reward_per_share,
        },
    );
}

pub fn publish_staked(
    env: &Env,
    pool_id: u32,
    from: Address,
    beneficiary: Address,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), pool_id, beneficiary.clone()),
        StakedEvent {
            pool_id,
            from,
            beneficiary,
            amount,
            new_total_staked,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    pool_id: u32,
    owner: Address,
    recipient: Address,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), pool_id, owner.clone()),
        UnstakedEvent {
            pool_id,
            owner,
            recipient,
            amount,
            new_total_staked,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_claimed(
    env: &Env,
    pool_id: u32,
    owner: Address,
    recipient: Address,
    amount: i128,
) {
    env.events().publish(
        (symbol_short!("CLAIMED"), pool_id, owner.clone()),
        RewardClaimedEvent {
            pool_id,
            owner,
            recipient,
            amount,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pause_changed(env: &Env, caller: Address, scope: PauseScope, paused: bool) {
    let topic = if paused {
        symbol_short!("PAUSED")
    } else {
        symbol_short!("RESUMED")
    };
    env.events().publish(
        (topic, caller.clone()),
        PauseChangedEvent {
            caller,
            scope,
            paused,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_decommissioned(
    env: &Env,
    caller: Address,
    recipient: Address,
    reward_swept: i128,
    pools_swept: u32,
) {
    env.events().publish(
        (symbol_short!("DECOMM"),),
        DecommissionedEvent {
            caller,
            recipient,
            reward_swept,
            pools_swept,
            block: env.ledger().sequence(),
        },
    );
}
