use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage key constants ───────────────────────────────────────────────────

const POOL: Symbol = symbol_short!("POOL");
const POOL_BY_TOKEN: Symbol = symbol_short!("POOL_TOK");
const POOL_CTR: Symbol = symbol_short!("POOL_CTR");
const TOTAL_WEIGHT: Symbol = symbol_short!("TOT_WGT");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 3_110_400;

// ── Types ───────────────────────────────────────────────────────────────────

/// One stake-token pool. Pools live in an arena indexed by `id`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    pub stake_token: Address,
    pub total_staked: i128,
    /// Reward per staked unit since inception, scaled by `precision`.
    /// Never decreases.
    pub acc_reward_per_share: i128,
    pub last_sync_block: u32,
    /// Share of the global emission rate, relative to the sum of all weights.
    pub alloc_weight: u32,
    pub precision: i128,
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn pool_key(id: u32) -> (Symbol, u32) {
    (POOL, id)
}

fn token_key(token: &Address) -> (Symbol, Address) {
    (POOL_BY_TOKEN, token.clone())
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_CTR).unwrap_or(0)
}

pub fn total_alloc_weight(env: &Env) -> u32 {
    env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0)
}

pub fn set_total_alloc_weight(env: &Env, weight: u32) {
    env.storage().instance().set(&TOTAL_WEIGHT, &weight);
}

pub fn load(env: &Env, id: u32) -> Result<Pool, ContractError> {
    env.storage()
        .persistent()
        .get(&pool_key(id))
        .ok_or(ContractError::PoolNotFound)
}

pub fn store(env: &Env, pool: &Pool) {
    let key = pool_key(pool.id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn id_for_token(env: &Env, token: &Address) -> Option<u32> {
    env.storage().persistent().get(&token_key(token))
}

/// Appends a pool to the arena and indexes it by stake token.
///
/// Does not touch `TOT_WGT`; the caller synchronises every existing pool
/// before the total changes.
pub fn insert(
    env: &Env,
    stake_token: &Address,
    alloc_weight: u32,
    precision: i128,
    now: u32,
) -> Result<Pool, ContractError> {
    if id_for_token(env, stake_token).is_some() {
        return Err(ContractError::PoolExists);
    }

    let id = count(env);
    let pool = Pool {
        id,
        stake_token: stake_token.clone(),
        total_staked: 0,
        acc_reward_per_share: 0,
        last_sync_block: now,
        alloc_weight,
        precision,
    };
    store(env, &pool);

    let tkey = token_key(stake_token);
    env.storage().persistent().set(&tkey, &id);
    env.storage()
        .persistent()
        .extend_ttl(&tkey, TTL_THRESHOLD, TTL_EXTEND_TO);
    env.storage()
        .instance()
        .set(&POOL_CTR, &id.checked_add(1).ok_or(ContractError::MathOverflow)?);

    Ok(pool)
}
