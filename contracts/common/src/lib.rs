//! Shared access-control and error types for the farming contracts.
//!
//! This crate provides:
//! - [`CommonError`]: error codes returned by the shared helpers.
//! - [`admin_tiers`]: a three-tier admin hierarchy stored on-chain.
//! - [`pause`]: global and per-function circuit breakers.
//!
//! Contracts map `CommonError` into their own error enum.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod admin_tiers;
pub mod pause;

pub use admin_tiers::AdminTier;
pub use pause::PauseScope;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes shared by the helpers in this crate.
///
/// # Code ranges
/// | Range   | Purpose                       |
/// |---------|-------------------------------|
/// | 10 – 19 | Authentication & authorisation|
/// | 40 – 49 | Contract state                |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Auth (10–19) ─────────────────────────────────────────
    /// The caller does not hold the admin tier the operation requires.
    AccessDenied = 10,

    // ── Contract state (40–49) ───────────────────────────────
    /// The contract, or the targeted function, is paused.
    Paused = 40,
}
