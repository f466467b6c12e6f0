#![no_std]

pub mod engine;
pub mod events;
pub mod math;
pub mod period;
pub mod pool;
pub mod position;

use common::{
    admin_tiers::{self, AdminTier},
    pause::{self, PauseScope},
    CommonError,
};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol, Vec,
};

use math::MathError;
pub use period::{Period, ScheduleState};
pub use pool::Pool;
pub use position::Position;

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const DECOMMISSIONED: Symbol = symbol_short!("DECOMM");

// Circuit-breaker scopes for the user-facing entry points.
pub const FN_STAKE: Symbol = symbol_short!("STAKE");
pub const FN_UNSTAKE: Symbol = symbol_short!("UNSTAKE");
pub const FN_CLAIM: Symbol = symbol_short!("CLAIM");
pub const FN_UNSTAKE_CLAIM: Symbol = symbol_short!("UNSTK_CLM");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InsufficientStake = 5,
    Paused = 6,
    Decommissioned = 7,
    PoolNotFound = 8,
    PoolExists = 9,
    TokensIdentical = 10,
    InvalidPeriod = 11,
    PeriodOverlap = 12,
    PeriodActive = 13,
    PeriodNotFound = 14,
    MathOverflow = 15,
    InvariantViolation = 16,
}

impl From<CommonError> for ContractError {
    fn from(e: CommonError) -> Self {
        match e {
            CommonError::AccessDenied => ContractError::Unauthorized,
            CommonError::Paused => ContractError::Paused,
        }
    }
}

impl From<MathError> for ContractError {
    fn from(e: MathError) -> Self {
        match e {
            MathError::Overflow => ContractError::MathOverflow,
            MathError::NegativeOwed => ContractError::InvariantViolation,
        }
    }
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Deployment configuration fixed at `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub reward_token: Address,
}

/// Snapshot of an account's position returned by `get_staker_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerInfo {
    pub staked: i128,
    pub pending_reward: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct FarmingContract;

#[contractimpl]
impl FarmingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the farm.
    ///
    /// * `admin`        – becomes `SuperAdmin` in the tier system.
    /// * `reward_token` – SAC address of the token paid out to stakers.
    pub fn initialize(env: Env, admin: Address, reward_token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        let config = Config {
            admin: admin.clone(),
            reward_token: reward_token.clone(),
        };
        env.storage().instance().set(&CONFIG, &config);
        admin_tiers::bootstrap(&env, &admin);

        events::publish_initialized(&env, admin, reward_token);

        Ok(())
    }

    // ── Pools ───────────────────────────────────────────────────────────────

    /// Add a pool for `stake_token` with the given share of emission.
    ///
    /// Every existing pool is synchronised first so that blocks already
    /// elapsed are split under the old total weight.
    ///
    /// Requires at least `ContractAdmin` tier.
    pub fn register_pool(
        env: Env,
        caller: Address,
        stake_token: Address,
        alloc_weight: u32,
    ) -> Result<u32, ContractError> {
        let config = Self::require_live(&env)?;
        caller.require_auth();
        admin_tiers::require_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        if stake_token == config.reward_token {
            return Err(ContractError::TokensIdentical);
        }
        if pool::id_for_token(&env, &stake_token).is_some() {
            return Err(ContractError::PoolExists);
        }
        let total = pool::total_alloc_weight(&env)
            .checked_add(alloc_weight)
            .ok_or(ContractError::MathOverflow)?;

        let decimals = token::Client::new(&env, &stake_token).decimals();
        let precision = math::precision_for_decimals(decimals);

        engine::synchronize_all(&env)?;
        let p = pool::insert(
            &env,
            &stake_token,
            alloc_weight,
            precision,
            env.ledger().sequence(),
        )?;
        pool::set_total_alloc_weight(&env, total);

        events::publish_pool_registered(&env, p.id, stake_token, alloc_weight, total);

        Ok(p.id)
    }

    /// Change a pool's allocation weight. Requires at least `ContractAdmin`.
    pub fn set_alloc_weight(
        env: Env,
        caller: Address,
        pool_id: u32,
        weight: u32,
    ) -> Result<(), ContractError> {
        Self::require_live(&env)?;
        caller.require_auth();
        admin_tiers::require_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        let old = pool::load(&env, pool_id)?.alloc_weight;
        let total = pool::total_alloc_weight(&env)
            .checked_sub(old)
            .and_then(|t| t.checked_add(weight))
            .ok_or(ContractError::MathOverflow)?;

        engine::synchronize_all(&env)?;

        // Reload: synchronize_all has just written the accumulator.
        let mut p = pool::load(&env, pool_id)?;
        p.alloc_weight = weight;
        pool::store(&env, &p);
        pool::set_total_alloc_weight(&env, total);

        events::publish_alloc_weight_set(&env, pool_id, old, weight, total);

        Ok(())
    }

    // ── Periods ─────────────────────────────────────────────────────────────

    /// Open a new emission window and escrow its full reward from `caller`.
    ///
    /// Rejected without side effects when the range is empty, when it starts
    /// at or before the end of the current period, or while the current
    /// period is still open. On success every pool is synchronised under the
    /// old schedule, the new window takes over, and every pool's sync point
    /// moves to `start_block`.
    ///
    /// Requires at least `ContractAdmin` tier.
    pub fn create_period(
        env: Env,
        caller: Address,
        start_block: u32,
        end_block: u32,
        reward_rate: i128,
    ) -> Result<u32, ContractError> {
        let config = Self::require_live(&env)?;
        caller.require_auth();
        admin_tiers::require_tier(&env, &caller, &AdminTier::ContractAdmin)?;

        let now = env.ledger().sequence();
        let current = period::current(&env);
        period::validate_new_period(now, current.as_ref(), start_block, end_block, reward_rate)?;

        engine::synchronize_all(&env)?;
        let created = period::append(&env, start_block, end_block, reward_rate);
        let escrow = created.total_reward().ok_or(ContractError::MathOverflow)?;
        engine::rebase_all(&env, start_block)?;

        token::Client::new(&env, &config.reward_token).transfer(
            &caller,
            &env.current_contract_address(),
            &escrow,
        );

        events::publish_period_created(
            &env,
            created.id,
            caller,
            start_block,
            end_block,
            reward_rate,
            escrow,
        );

        Ok(created.id)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the pool's stake token from `from`, credited to
    /// `beneficiary`.
    pub fn stake(
        env: Env,
        from: Address,
        pool_id: u32,
        amount: i128,
        beneficiary: Address,
    ) -> Result<(), ContractError> {
        Self::require_live(&env)?;
        pause::require_not_paused(&env, &FN_STAKE)?;
        from.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let (p, _) = engine::on_stake_increase(&env, pool_id, &beneficiary, amount)?;

        token::Client::new(&env, &p.stake_token).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        events::publish_staked(&env, pool_id, from, beneficiary, amount, p.total_staked);

        Ok(())
    }

    /// Withdraw `amount` of `owner`'s stake to `recipient`. Unclaimed
    /// reward stays claimable.
    pub fn unstake(
        env: Env,
        owner: Address,
        pool_id: u32,
        amount: i128,
        recipient: Address,
    ) -> Result<(), ContractError> {
        Self::require_live(&env)?;
        pause::require_not_paused(&env, &FN_UNSTAKE)?;
        owner.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let (p, _) = engine::on_stake_decrease(&env, pool_id, &owner, amount)?;

        token::Client::new(&env, &p.stake_token).transfer(
            &env.current_contract_address(),
            &recipient,
            &amount,
        );

        events::publish_unstaked(&env, pool_id, owner, recipient, amount, p.total_staked);

        Ok(())
    }

    /// Pay `owner`'s accumulated reward in `pool_id` to `recipient`.
    ///
    /// Returns the amount paid; a claim with nothing owed returns `0`
    /// without reverting.
    pub fn claim(
        env: Env,
        owner: Address,
        pool_id: u32,
        recipient: Address,
    ) -> Result<i128, ContractError> {
        let config = Self::require_live(&env)?;
        pause::require_not_paused(&env, &FN_CLAIM)?;
        owner.require_auth();

        let reward = engine::settle(&env, pool_id, &owner)?;
        Self::pay_reward(&env, &config, &recipient, reward);

        events::publish_reward_claimed(&env, pool_id, owner, recipient, reward);

        Ok(reward)
    }

    /// Withdraw `amount` and claim everything owed in one synchronisation.
    /// `amount` may be zero, which behaves like `claim`.
    pub fn unstake_and_claim(
        env: Env,
        owner: Address,
        pool_id: u32,
        amount: i128,
        recipient: Address,
    ) -> Result<i128, ContractError> {
        let config = Self::require_live(&env)?;
        pause::require_not_paused(&env, &FN_UNSTAKE_CLAIM)?;
        owner.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        let (p, reward) = engine::decrease_and_settle(&env, pool_id, &owner, amount)?;

        if amount > 0 {
            token::Client::new(&env, &p.stake_token).transfer(
                &env.current_contract_address(),
                &recipient,
                &amount,
            );
        }
        Self::pay_reward(&env, &config, &recipient, reward);

        events::publish_unstaked(
            &env,
            pool_id,
            owner.clone(),
            recipient.clone(),
            amount,
            p.total_staked,
        );
        events::publish_reward_claimed(&env, pool_id, owner, recipient, reward);

        Ok(reward)
    }

    /// Roll `pool_id`'s accumulator forward to the current ledger. Anyone
    /// may call this; repeated calls in one ledger change nothing.
    pub fn synchronize(env: Env, pool_id: u32) -> Result<(), ContractError> {
        Self::require_live(&env)?;
        let mut p = pool::load(&env, pool_id)?;
        engine::synchronize(&env, &mut p)
    }

    /// Synchronise every pool.
    pub fn synchronize_all(env: Env) -> Result<(), ContractError> {
        Self::require_live(&env)?;
        engine::synchronize_all(&env)
    }

    // ── Decommission ────────────────────────────────────────────────────────

    /// Sweep every custodied balance to `recipient` and make the contract
    /// permanently inert. Views keep working; every mutating call fails
    /// with `Decommissioned` afterwards.
    ///
    /// Requires `SuperAdmin` tier.
    pub fn decommission(
        env: Env,
        caller: Address,
        recipient: Address,
    ) -> Result<(), ContractError> {
        let config = Self::require_live(&env)?;
        caller.require_auth();
        admin_tiers::require_tier(&env, &caller, &AdminTier::SuperAdmin)?;

        let this = env.current_contract_address();

        let reward_client = token::Client::new(&env, &config.reward_token);
        let reward_swept = reward_client.balance(&this);
        if reward_swept > 0 {
            reward_client.transfer(&this, &recipient, &reward_swept);
        }

        let pools = pool::count(&env);
        for id in 0..pools {
            let p = pool::load(&env, id)?;
            let stake_client = token::Client::new(&env, &p.stake_token);
            let held = stake_client.balance(&this);
            if held > 0 {
                stake_client.transfer(&this, &recipient, &held);
            }
        }

        env.storage().instance().set(&DECOMMISSIONED, &true);

        events::publish_decommissioned(&env, caller, recipient, reward_swept, pools);

        Ok(())
    }

    // ── Circuit breaker ─────────────────────────────────────────────────────

    /// Suspend stake/unstake/claim globally or for one entry point.
    /// Requires at least `OperatorAdmin` tier.
    pub fn pause(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        Self::require_live(&env)?;
        caller.require_auth();
        pause::pause(&env, &caller, &scope)?;
        events::publish_pause_changed(&env, caller, scope, true);
        Ok(())
    }

    /// Lift a suspension set by `pause`. Requires at least `OperatorAdmin`.
    pub fn resume(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        Self::require_live(&env)?;
        caller.require_auth();
        pause::resume(&env, &caller, &scope)?;
        events::publish_pause_changed(&env, caller, scope, false);
        Ok(())
    }

    pub fn is_paused(env: Env, scope: PauseScope) -> bool {
        pause::is_paused(&env, &scope)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Reward `account` could claim from `pool_id` at the current ledger.
    /// Never mutates state.
    pub fn pending_reward(env: Env, pool_id: u32, account: Address) -> Result<i128, ContractError> {
        engine::pending_reward(&env, pool_id, &account)
    }

    /// Stake and pending reward in one call.
    pub fn get_staker_info(
        env: Env,
        pool_id: u32,
        account: Address,
    ) -> Result<StakerInfo, ContractError> {
        let pending_reward = engine::pending_reward(&env, pool_id, &account)?;
        Ok(StakerInfo {
            staked: position::load(&env, pool_id, &account).staked,
            pending_reward,
        })
    }

    pub fn get_position(env: Env, pool_id: u32, account: Address) -> Position {
        position::load(&env, pool_id, &account)
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        pool::load(&env, pool_id)
    }

    pub fn pool_count(env: Env) -> u32 {
        pool::count(&env)
    }

    pub fn pool_id_for_token(env: Env, stake_token: Address) -> Option<u32> {
        pool::id_for_token(&env, &stake_token)
    }

    pub fn total_alloc_weight(env: Env) -> u32 {
        pool::total_alloc_weight(&env)
    }

    pub fn get_current_period(env: Env) -> Option<Period> {
        period::current(&env)
    }

    pub fn get_period(env: Env, period_id: u32) -> Result<Period, ContractError> {
        period::get(&env, period_id).ok_or(ContractError::PeriodNotFound)
    }

    pub fn period_count(env: Env) -> u32 {
        period::count(&env)
    }

    pub fn get_schedule_state(env: Env) -> ScheduleState {
        period::schedule_state(&env)
    }

    pub fn get_config(env: Env) -> Result<Config, ContractError> {
        Self::load_config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&CONFIG)
    }

    pub fn is_decommissioned(env: Env) -> bool {
        env.storage()
            .instance()
            .get(&DECOMMISSIONED)
            .unwrap_or(false)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Assign `tier` to `target`. Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_live(&env)?;
        caller.require_auth();
        admin_tiers::promote_admin(&env, &caller, &target, tier)?;
        Ok(())
    }

    /// Remove `target`'s tier. Only a `SuperAdmin` may call this.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_live(&env)?;
        caller.require_auth();
        admin_tiers::demote_admin(&env, &caller, &target)?;
        Ok(())
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        admin_tiers::get_admin_tier(&env, &admin)
    }

    /// Every address currently holding a tier, in assignment order.
    pub fn list_admins(env: Env) -> Vec<Address> {
        admin_tiers::list_admins(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn load_config(env: &Env) -> Result<Config, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    /// Guard: the contract is initialised and has not been decommissioned.
    fn require_live(env: &Env) -> Result<Config, ContractError> {
        let config = Self::load_config(env)?;
        if Self::is_decommissioned(env.clone()) {
            return Err(ContractError::Decommissioned);
        }
        Ok(config)
    }

    fn pay_reward(env: &Env, config: &Config, recipient: &Address, amount: i128) {
        if amount > 0 {
            token::Client::new(env, &config.reward_token).transfer(
                &env.current_contract_address(),
                recipient,
                &amount,
            );
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_events;

#[cfg(test)]
mod test_periods;
