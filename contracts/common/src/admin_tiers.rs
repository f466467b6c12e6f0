use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::CommonError;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ADMIN_TIER_PREFIX: Symbol = symbol_short!("ADM_TIER");
const ADMIN_LIST: Symbol = symbol_short!("ADM_LIST");
const SUPER_ADMIN: Symbol = symbol_short!("S_ADMIN");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 3_110_400;

// ── Admin Tier Enum ──────────────────────────────────────────────────────────

/// Three-tier admin hierarchy for the farming contracts.
///
/// - `SuperAdmin`    – Manages the tier list and may decommission the farm.
/// - `ContractAdmin` – Registers pools, sets allocation weights and opens
///                     reward periods.
/// - `OperatorAdmin` – Can only pause and resume staking operations.
///
/// Higher tiers inherit every permission of the tiers below them.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    OperatorAdmin = 1,
    ContractAdmin = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        match self {
            AdminTier::OperatorAdmin => 1,
            AdminTier::ContractAdmin => 2,
            AdminTier::SuperAdmin => 3,
        }
    }

    /// Returns true if this tier is at least as high as `min_tier`.
    pub fn has_at_least(&self, min_tier: &AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn tier_key(admin: &Address) -> (Symbol, Address) {
    (ADMIN_TIER_PREFIX, admin.clone())
}

fn bump(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn load_list(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&ADMIN_LIST)
        .unwrap_or(Vec::new(env))
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// Retrieves the admin tier of a given address, if any.
pub fn get_admin_tier(env: &Env, admin: &Address) -> Option<AdminTier> {
    let key = tier_key(admin);
    let tier: Option<AdminTier> = env.storage().persistent().get(&key);
    if tier.is_some() {
        bump(env, &key);
    }
    tier
}

/// Guard used by every privileged entry point.
///
/// The caller must already have been authenticated via `require_auth()`.
pub fn require_tier(env: &Env, caller: &Address, min_tier: &AdminTier) -> Result<(), CommonError> {
    match get_admin_tier(env, caller) {
        Some(tier) if tier.has_at_least(min_tier) => Ok(()),
        _ => Err(CommonError::AccessDenied),
    }
}

/// Returns the bootstrap super admin, if the contract was initialised.
pub fn get_super_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&SUPER_ADMIN)
}

/// Returns every address currently holding a tier, in assignment order.
pub fn list_admins(env: &Env) -> Vec<Address> {
    load_list(env)
}

// ── Mutations ────────────────────────────────────────────────────────────────

fn set_admin_tier(env: &Env, admin: &Address, tier: AdminTier) {
    let key = tier_key(admin);
    env.storage().persistent().set(&key, &tier);
    bump(env, &key);

    let mut admins = load_list(env);
    if !admins.contains(admin) {
        admins.push_back(admin.clone());
        env.storage().persistent().set(&ADMIN_LIST, &admins);
    }
}

/// Records the initialising admin as `SuperAdmin`.
pub fn bootstrap(env: &Env, admin: &Address) {
    env.storage().instance().set(&SUPER_ADMIN, admin);
    set_admin_tier(env, admin, AdminTier::SuperAdmin);
}

/// Assigns `tier` to `target`. Only a `SuperAdmin` may call this.
pub fn promote_admin(
    env: &Env,
    caller: &Address,
    target: &Address,
    tier: AdminTier,
) -> Result<(), CommonError> {
    require_tier(env, caller, &AdminTier::SuperAdmin)?;
    set_admin_tier(env, target, tier);
    Ok(())
}

/// Removes `target`'s tier entirely. Only a `SuperAdmin` may call this.
///
/// The bootstrap super admin cannot be demoted, so the farm always keeps
/// at least one principal able to manage tiers.
pub fn demote_admin(env: &Env, caller: &Address, target: &Address) -> Result<(), CommonError> {
    require_tier(env, caller, &AdminTier::SuperAdmin)?;
    if get_super_admin(env).as_ref() == Some(target) {
        return Err(CommonError::AccessDenied);
    }

    env.storage().persistent().remove(&tier_key(target));

    let admins = load_list(env);
    let mut kept = Vec::new(env);
    for a in admins.iter() {
        if a != *target {
            kept.push_back(a);
        }
    }
    env.storage().persistent().set(&ADMIN_LIST, &kept);
    Ok(())
}
