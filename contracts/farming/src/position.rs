use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

const POSITION: Symbol = symbol_short!("POS");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 3_110_400;

/// An account's stake in one pool.
///
/// `reward_debt` is the reward already accounted for (`staked × acc /
/// precision` at the last touch), stored multiplied by the pool precision so
/// the unpaid fraction of a unit survives claims. It is signed because a
/// withdrawal lowers it by the withdrawn share, which can take it below zero
/// while reward is still unclaimed.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    pub staked: i128,
    pub reward_debt: i128,
}

fn position_key(pool_id: u32, account: &Address) -> (Symbol, u32, Address) {
    (POSITION, pool_id, account.clone())
}

/// Returns the stored position, or an empty one for accounts that never
/// staked in this pool.
pub fn load(env: &Env, pool_id: u32, account: &Address) -> Position {
    env.storage()
        .persistent()
        .get(&position_key(pool_id, account))
        .unwrap_or_default()
}

/// Zeroed positions are kept rather than removed so re-staking reuses the
/// same entry.
pub fn store(env: &Env, pool_id: u32, account: &Address, position: &Position) {
    let key = position_key(pool_id, account);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
