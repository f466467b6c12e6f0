extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    xdr::{ContractEventBody, ScVal},
    Address, Env, IntoVal, Symbol, TryFromVal, Val, Vec,
};

use crate::events::{
    DecommissionedEvent, PeriodCreatedEvent, PoolUpdatedEvent, RewardClaimedEvent, StakedEvent,
    UnstakedEvent,
};
use crate::test::{at_block, funded_account, setup};

const PRECISION: i128 = 1_000_000_000_000;

fn to_scval<T: IntoVal<Env, Val>>(env: &Env, value: T) -> ScVal {
    let val: Val = value.into_val(env);
    ScVal::try_from_val(env, &val).unwrap()
}

fn to_topics<T: IntoVal<Env, Vec<Val>>>(env: &Env, topics: T) -> std::vec::Vec<ScVal> {
    let topics: Vec<Val> = topics.into_val(env);
    topics
        .iter()
        .map(|t| ScVal::try_from_val(env, &t).unwrap())
        .collect()
}

/// Topics and payload of the most recent event whose first topic is `name`.
fn last_event(env: &Env, name: Symbol) -> (std::vec::Vec<ScVal>, ScVal) {
    let head = to_scval(env, name);
    let events = env.events().all();
    events
        .events()
        .iter()
        .rev()
        .find_map(|event| {
            let ContractEventBody::V0(body) = &event.body;
            if body.topics.first() == Some(&head) {
                Some((body.topics.as_slice().to_vec(), body.data.clone()))
            } else {
                None
            }
        })
        .unwrap()
}

#[test]
fn test_create_period_emits_period_event() {
    let f = setup();
    at_block(&f.env, 4);
    f.client.create_period(&f.admin, &10, &110, &10);

    let (topics, data) = last_event(&f.env, symbol_short!("PERIOD"));
    assert_eq!(topics, to_topics(&f.env, (symbol_short!("PERIOD"), 1u32)));
    let expected = PeriodCreatedEvent {
        period_id: 1,
        funder: f.admin.clone(),
        start_block: 10,
        end_block: 110,
        reward_rate: 10,
        escrowed: 1_000,
    };
    assert_eq!(data, to_scval(&f.env, expected));
}

#[test]
fn test_stake_emits_staked_event() {
    let f = setup();
    f.client.create_period(&f.admin, &0, &100, &10);
    let payer = funded_account(&f.env, &f.stake_token, 1_000);
    let beneficiary = Address::generate(&f.env);

    at_block(&f.env, 5);
    f.client.stake(&payer, &f.pool_id, &1_000, &beneficiary);

    let (topics, data) = last_event(&f.env, symbol_short!("STAKED"));
    assert_eq!(
        topics,
        to_topics(
            &f.env,
            (symbol_short!("STAKED"), f.pool_id, beneficiary.clone())
        )
    );
    let expected = StakedEvent {
        pool_id: f.pool_id,
        from: payer,
        beneficiary,
        amount: 1_000,
        new_total_staked: 1_000,
        block: 5,
    };
    assert_eq!(data, to_scval(&f.env, expected));
}

#[test]
fn test_synchronize_emits_pool_update() {
    let f = setup();
    f.client.create_period(&f.admin, &0, &100, &10);
    let staker = funded_account(&f.env, &f.stake_token, 1_000);
    f.client.stake(&staker, &f.pool_id, &1_000, &staker);

    at_block(&f.env, 20);
    f.client.synchronize(&f.pool_id);

    let (topics, data) = last_event(&f.env, symbol_short!("POOL_UPD"));
    assert_eq!(
        topics,
        to_topics(&f.env, (symbol_short!("POOL_UPD"), f.pool_id))
    );
    // 200 reward over 1_000 staked.
    let expected = PoolUpdatedEvent {
        pool_id: f.pool_id,
        block: 20,
        total_staked: 1_000,
        acc_reward_per_share: 200 * PRECISION / 1_000,
    };
    assert_eq!(data, to_scval(&f.env, expected));
}

#[test]
fn test_claim_emits_claimed_event() {
    let f = setup();
    f.client.create_period(&f.admin, &0, &100, &10);
    let staker = funded_account(&f.env, &f.stake_token, 1_000);
    let wallet = Address::generate(&f.env);
    f.client.stake(&staker, &f.pool_id, &1_000, &staker);

    at_block(&f.env, 30);
    f.client.claim(&staker, &f.pool_id, &wallet);

    let (topics, data) = last_event(&f.env, symbol_short!("CLAIMED"));
    assert_eq!(
        topics,
        to_topics(
            &f.env,
            (symbol_short!("CLAIMED"), f.pool_id, staker.clone())
        )
    );
    let expected = RewardClaimedEvent {
        pool_id: f.pool_id,
        owner: staker.clone(),
        recipient: wallet.clone(),
        amount: 300,
        block: 30,
    };
    assert_eq!(data, to_scval(&f.env, expected));

    // Nothing owed in the same ledger: still reported, with zero.
    f.client.claim(&staker, &f.pool_id, &wallet);
    let (_, data) = last_event(&f.env, symbol_short!("CLAIMED"));
    let expected = RewardClaimedEvent {
        pool_id: f.pool_id,
        owner: staker,
        recipient: wallet,
        amount: 0,
        block: 30,
    };
    assert_eq!(data, to_scval(&f.env, expected));
}

#[test]
fn test_unstake_and_claim_emits_both_events() {
    let f = setup();
    f.client.create_period(&f.admin, &0, &100, &10);
    let staker = funded_account(&f.env, &f.stake_token, 1_000);
    let wallet = Address::generate(&f.env);
    f.client.stake(&staker, &f.pool_id, &1_000, &staker);

    at_block(&f.env, 40);
    f.client
        .unstake_and_claim(&staker, &f.pool_id, &400, &wallet);

    let (topics, data) = last_event(&f.env, symbol_short!("UNSTAKED"));
    assert_eq!(
        topics,
        to_topics(
            &f.env,
            (symbol_short!("UNSTAKED"), f.pool_id, staker.clone())
        )
    );
    let expected = UnstakedEvent {
        pool_id: f.pool_id,
        owner: staker.clone(),
        recipient: wallet.clone(),
        amount: 400,
        new_total_staked: 600,
        block: 40,
    };
    assert_eq!(data, to_scval(&f.env, expected));

    let (topics, data) = last_event(&f.env, symbol_short!("CLAIMED"));
    assert_eq!(
        topics,
        to_topics(
            &f.env,
            (symbol_short!("CLAIMED"), f.pool_id, staker.clone())
        )
    );
    let expected = RewardClaimedEvent {
        pool_id: f.pool_id,
        owner: staker,
        recipient: wallet,
        amount: 400,
        block: 40,
    };
    assert_eq!(data, to_scval(&f.env, expected));
}

#[test]
fn test_decommission_emits_decomm_event() {
    let f = setup();
    f.client.create_period(&f.admin, &10, &110, &10);
    let treasury = Address::generate(&f.env);

    at_block(&f.env, 7);
    f.client.decommission(&f.admin, &treasury);

    let (topics, data) = last_event(&f.env, symbol_short!("DECOMM"));
    assert_eq!(topics, to_topics(&f.env, (symbol_short!("DECOMM"),)));
    let expected = DecommissionedEvent {
        caller: f.admin.clone(),
        recipient: treasury,
        reward_swept: 1_000,
        pools_swept: 1,
        block: 7,
    };
    assert_eq!(data, to_scval(&f.env, expected));
}
