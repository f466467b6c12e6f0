use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::admin_tiers::{self, AdminTier};
use crate::CommonError;

// ── Types ─────────────────────────────────────────────────────

/// Scope of a circuit breaker.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PauseScope {
    /// Halts every guarded entry point.
    Global,
    /// Halts only the entry point registered under this symbol.
    Function(Symbol),
}

// ── Storage Keys ─────────────────────────────────────────────

fn global_pause_key() -> Symbol {
    symbol_short!("P_GLOB")
}

fn function_pause_key(func: &Symbol) -> (Symbol, Symbol) {
    (symbol_short!("P_FUNC"), func.clone())
}

// ── Queries ──────────────────────────────────────────────────

/// Whether exactly this scope is halted. A function scope does not report
/// the global flag; use [`require_not_paused`] for the combined check.
pub fn is_paused(env: &Env, scope: &PauseScope) -> bool {
    match scope {
        PauseScope::Global => env
            .storage()
            .instance()
            .get(&global_pause_key())
            .unwrap_or(false),
        PauseScope::Function(func) => env
            .storage()
            .instance()
            .get(&function_pause_key(func))
            .unwrap_or(false),
    }
}

/// Fails when the global breaker or the breaker for `func` is engaged.
pub fn require_not_paused(env: &Env, func: &Symbol) -> Result<(), CommonError> {
    if is_paused(env, &PauseScope::Global) {
        return Err(CommonError::Paused);
    }
    if is_paused(env, &PauseScope::Function(func.clone())) {
        return Err(CommonError::Paused);
    }
    Ok(())
}

// ── Mutations ────────────────────────────────────────────────

fn set_flag(env: &Env, scope: &PauseScope, value: bool) {
    match scope {
        PauseScope::Global => env.storage().instance().set(&global_pause_key(), &value),
        PauseScope::Function(func) => env
            .storage()
            .instance()
            .set(&function_pause_key(func), &value),
    }
}

/// Engages the breaker for `scope`. Requires at least `OperatorAdmin`.
pub fn pause(env: &Env, caller: &Address, scope: &PauseScope) -> Result<(), CommonError> {
    admin_tiers::require_tier(env, caller, &AdminTier::OperatorAdmin)?;
    set_flag(env, scope, true);
    Ok(())
}

/// Releases the breaker for `scope`. Requires at least `OperatorAdmin`.
pub fn resume(env: &Env, caller: &Address, scope: &PauseScope) -> Result<(), CommonError> {
    admin_tiers::require_tier(env, caller, &AdminTier::OperatorAdmin)?;
    set_flag(env, scope, false);
    Ok(())
}
