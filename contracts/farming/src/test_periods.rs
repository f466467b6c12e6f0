extern crate std;

use soroban_sdk::{testutils::Address as _, Address};
use soroban_sdk::token::Client as TokenClient;

use crate::test::{at_block, funded_account, setup};
use crate::{ContractError, ScheduleState};

#[test]
fn test_schedule_starts_empty() {
    let f = setup();
    assert_eq!(f.client.get_schedule_state(), ScheduleState::NoPeriod);
    assert_eq!(f.client.get_current_period(), None);
    assert_eq!(f.client.period_count(), 0);
}

#[test]
fn test_create_period_escrows_reward() {
    let f = setup();
    let id = f.client.create_period(&f.admin, &12, &112, &10);
    assert_eq!(id, 1);

    let period = f.client.get_current_period().unwrap();
    assert_eq!(period.start_block, 12);
    assert_eq!(period.end_block, 112);
    assert_eq!(period.reward_rate, 10);
    assert_eq!(f.client.get_period(&1), period);

    let reward = TokenClient::new(&f.env, &f.reward_token);
    assert_eq!(reward.balance(&f.client.address), 1_000);
    assert_eq!(reward.balance(&f.admin), 1_000_000 - 1_000);

    // Pools wait for the window to open.
    assert_eq!(f.client.get_pool(&f.pool_id).last_sync_block, 12);
}

#[test]
fn test_schedule_state_machine() {
    let f = setup();
    f.client.create_period(&f.admin, &12, &112, &10);
    assert_eq!(f.client.get_schedule_state(), ScheduleState::Scheduled);

    at_block(&f.env, 12);
    assert_eq!(f.client.get_schedule_state(), ScheduleState::Active);
    at_block(&f.env, 112);
    assert_eq!(f.client.get_schedule_state(), ScheduleState::Active);
    at_block(&f.env, 113);
    assert_eq!(f.client.get_schedule_state(), ScheduleState::Expired);

    f.client.create_period(&f.admin, &200, &300, &5);
    assert_eq!(f.client.get_schedule_state(), ScheduleState::Scheduled);
    assert_eq!(f.client.period_count(), 2);
}

#[test]
fn test_invalid_range_rejected() {
    let f = setup();

    for (start, end, rate) in [(10u32, 10u32, 5i128), (10, 9, 5), (10, 20, 0), (10, 20, -4)] {
        let result = f.client.try_create_period(&f.admin, &start, &end, &rate);
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::InvalidPeriod),
            _ => unreachable!("Expected InvalidPeriod error"),
        }
    }
    assert_eq!(f.client.period_count(), 0);
}

#[test]
fn test_open_period_blocks_new_one() {
    let f = setup();
    f.client.create_period(&f.admin, &10, &110, &10);

    at_block(&f.env, 110);
    let result = f.client.try_create_period(&f.admin, &120, &220, &10);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::PeriodActive),
        _ => unreachable!("Expected PeriodActive error"),
    }
}

#[test]
fn test_overlapping_period_rejected() {
    let f = setup();
    f.client.create_period(&f.admin, &10, &110, &10);

    at_block(&f.env, 150);
    let result = f.client.try_create_period(&f.admin, &110, &220, &10);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::PeriodOverlap),
        _ => unreachable!("Expected PeriodOverlap error"),
    }

    // Rejection leaves the schedule and custody untouched.
    assert_eq!(f.client.period_count(), 1);
    let reward = TokenClient::new(&f.env, &f.reward_token);
    assert_eq!(reward.balance(&f.client.address), 1_000);
}

#[test]
fn test_rewards_stop_at_period_end() {
    let f = setup();
    f.client.create_period(&f.admin, &10, &110, &10);
    let staker = funded_account(&f.env, &f.stake_token, 1_000);
    f.client.stake(&staker, &f.pool_id, &1_000, &staker);

    // Nothing before the window opens.
    at_block(&f.env, 10);
    assert_eq!(f.client.pending_reward(&f.pool_id, &staker), 0);

    at_block(&f.env, 110);
    assert_eq!(f.client.pending_reward(&f.pool_id, &staker), 1_000);
    at_block(&f.env, 111);
    assert_eq!(f.client.pending_reward(&f.pool_id, &staker), 1_000);
    at_block(&f.env, 900);
    f.client.synchronize(&f.pool_id);
    assert_eq!(f.client.pending_reward(&f.pool_id, &staker), 1_000);
}

#[test]
fn test_gap_between_periods_accrues_nothing() {
    let f = setup();
    f.client.create_period(&f.admin, &10, &110, &10);
    let staker = funded_account(&f.env, &f.stake_token, 1_000);
    f.client.stake(&staker, &f.pool_id, &1_000, &staker);

    at_block(&f.env, 150);
    f.client.create_period(&f.admin, &200, &300, &20);
    assert_eq!(f.client.pending_reward(&f.pool_id, &staker), 1_000);
    assert_eq!(f.client.get_pool(&f.pool_id).last_sync_block, 200);

    // Blocks 150..200 fall between windows.
    at_block(&f.env, 199);
    assert_eq!(f.client.pending_reward(&f.pool_id, &staker), 1_000);

    at_block(&f.env, 250);
    assert_eq!(f.client.pending_reward(&f.pool_id, &staker), 1_000 + 50 * 20);

    at_block(&f.env, 400);
    assert_eq!(f.client.pending_reward(&f.pool_id, &staker), 1_000 + 100 * 20);
    assert_eq!(f.client.claim(&staker, &f.pool_id, &staker), 3_000);
}

#[test]
fn test_unsynced_pool_settles_old_rate_before_switch() {
    let f = setup();
    f.client.create_period(&f.admin, &10, &110, &10);
    let staker = funded_account(&f.env, &f.stake_token, 1_000);

    at_block(&f.env, 60);
    f.client.stake(&staker, &f.pool_id, &1_000, &staker);

    // No interaction between 60 and the next period: creating it must first
    // credit blocks 60..110 at the old rate.
    at_block(&f.env, 130);
    f.client.create_period(&f.admin, &131, &141, &1_000);
    assert_eq!(f.client.pending_reward(&f.pool_id, &staker), 500);

    at_block(&f.env, 141);
    assert_eq!(f.client.pending_reward(&f.pool_id, &staker), 500 + 10_000);
}

#[test]
fn test_unknown_period_id() {
    let f = setup();
    f.client.create_period(&f.admin, &10, &110, &10);

    for id in [0u32, 2] {
        let result = f.client.try_get_period(&id);
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::PeriodNotFound),
            _ => unreachable!("Expected PeriodNotFound error"),
        }
    }
}

#[test]
fn test_synchronize_all_rolls_every_pool() {
    let f = setup();
    let other = f
        .env
        .register_stellar_asset_contract_v2(Address::generate(&f.env))
        .address();
    let second = f.client.register_pool(&f.admin, &other, &1);
    f.client.create_period(&f.admin, &10, &110, &10);

    let a = funded_account(&f.env, &f.stake_token, 100);
    let b = funded_account(&f.env, &other, 100);
    f.client.stake(&a, &f.pool_id, &100, &a);
    f.client.stake(&b, &second, &100, &b);

    at_block(&f.env, 30);
    f.client.synchronize_all();
    assert_eq!(f.client.get_pool(&f.pool_id).last_sync_block, 30);
    assert_eq!(f.client.get_pool(&second).last_sync_block, 30);

    // 20 blocks at 10 per block, split evenly.
    assert_eq!(f.client.pending_reward(&f.pool_id, &a), 100);
    assert_eq!(f.client.pending_reward(&second, &b), 100);
}
