extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env, IntoVal,
};

use crate::events::{AdminTransferAcceptedEvent, AdminTransferProposedEvent, SettingsChangedEvent};
use crate::{ContractError, PoolSettings, StakingPool, StakingPoolClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Deploys a funded pool with the default settings 10% / 600s / 600s / 1000.
fn setup() -> (Env, StakingPoolClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let staking_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingPool, ());
    let client = StakingPoolClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &staking_token, &reward_token, &10, &600, &600, &1_000);

    StellarAssetClient::new(&env, &reward_token)
        .mock_all_auths()
        .mint(&contract_id, &1_000_000_000i128);

    (env, client, admin, staking_token)
}

fn mint_stake(env: &Env, staking_token: &Address, recipient: &Address, amount: i128) {
    StellarAssetClient::new(env, staking_token).mint(recipient, &amount);
}

// ── Settings changes ──────────────────────────────────────────────────────────

#[test]
fn test_change_settings_by_admin() {
    let (_env, client, admin, _) = setup();

    client.change_staking_settings(&admin, &40, &5, &8, &2_000);

    assert_eq!(client.get_reward_percentage(), 40);
    assert_eq!(client.get_claim_frozen_time(), 5);
    assert_eq!(client.get_unstake_frozen_time(), 8);
    assert_eq!(client.get_boundary_supply(), 2_000);
    assert_eq!(
        client.get_settings(),
        PoolSettings {
            reward_percentage: 40,
            claim_frozen_time: 5,
            unstake_frozen_time: 8,
            boundary_supply: 2_000,
        }
    );
}

#[test]
fn test_change_settings_by_non_admin_fails() {
    let (env, client, _admin, _) = setup();

    let intruder = Address::generate(&env);
    let result = client.try_change_staking_settings(&intruder, &40, &5, &8, &2_000);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }

    // Nothing changed.
    assert_eq!(client.get_reward_percentage(), 10);
    assert_eq!(client.get_claim_frozen_time(), 600);
    assert_eq!(client.get_unstake_frozen_time(), 600);
    assert_eq!(client.get_boundary_supply(), 1_000);
}

#[test]
fn test_change_settings_rejects_non_positive_boundary() {
    let (_env, client, admin, _) = setup();

    for boundary in [0i128, -5] {
        let result = client.try_change_staking_settings(&admin, &40, &5, &8, &boundary);
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::InvalidAmount),
            _ => unreachable!("Expected InvalidAmount error"),
        }
    }

    // A rejected update leaves all four values in force, not just the
    // boundary.
    assert_eq!(
        client.get_settings(),
        PoolSettings {
            reward_percentage: 10,
            claim_frozen_time: 600,
            unstake_frozen_time: 600,
            boundary_supply: 1_000,
        }
    );
}

#[test]
fn test_change_settings_before_initialization_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(StakingPool, ());
    let client = StakingPoolClient::new(&env, &contract_id);

    let caller = Address::generate(&env);
    let result = client.try_change_staking_settings(&caller, &40, &5, &8, &2_000);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotInitialized),
        _ => unreachable!("Expected NotInitialized error"),
    }
}

#[test]
fn test_change_settings_affects_future_claims() {
    let (env, client, admin, staking_token) = setup();

    let staker = Address::generate(&env);
    mint_stake(&env, &staking_token, &staker, 500);

    env.ledger().set_timestamp(0);
    client.stake(&staker, &500);

    // Mid-window the admin quadruples the percentage and doubles the
    // boundary.
    env.ledger().set_timestamp(300);
    client.change_staking_settings(&admin, &40, &600, &600, &2_000);

    // The claim prices against the new settings:
    // 500 * 40% * 500/2000 = 50.
    env.ledger().set_timestamp(600);
    assert_eq!(client.claim(&staker), 50);
}

#[test]
fn test_shorter_freeze_applies_to_existing_positions() {
    let (env, client, admin, staking_token) = setup();

    let staker = Address::generate(&env);
    mint_stake(&env, &staking_token, &staker, 500);

    env.ledger().set_timestamp(0);
    client.stake(&staker, &500);

    // The position was frozen for 600s at stake time, but freezes are read
    // from the live settings, so shortening the window frees it sooner.
    env.ledger().set_timestamp(100);
    client.change_staking_settings(&admin, &10, &100, &600, &1_000);

    env.ledger().set_timestamp(200);
    assert_eq!(client.claim(&staker), 25);
}

#[test]
fn test_change_settings_emits_event() {
    let (env, client, admin, _) = setup();

    env.ledger().set_timestamp(42);
    client.change_staking_settings(&admin, &40, &5, &8, &2_000);

    assert_eq!(
        env.events().all().filter_by_contract(&client.address),
        vec![
            &env,
            (
                client.address.clone(),
                (symbol_short!("SET_CHGD"),).into_val(&env),
                SettingsChangedEvent {
                    reward_percentage: 40,
                    claim_frozen_time: 5,
                    unstake_frozen_time: 8,
                    boundary_supply: 2_000,
                    timestamp: 42,
                }
                .into_val(&env),
            ),
        ]
    );
}

// ── Admin transfer ────────────────────────────────────────────────────────────

#[test]
fn test_propose_and_accept_admin() {
    let (env, client, admin, _) = setup();

    let successor = Address::generate(&env);
    client.propose_admin(&admin, &successor);

    // Proposal alone changes nothing.
    assert_eq!(client.get_admin(), admin);
    assert_eq!(client.get_pending_admin(), Some(successor.clone()));

    client.accept_admin(&successor);

    assert_eq!(client.get_admin(), successor);
    assert_eq!(client.get_pending_admin(), None);

    // The old admin has lost its powers, the new one has them.
    let result = client.try_change_staking_settings(&admin, &40, &5, &8, &2_000);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    client.change_staking_settings(&successor, &40, &5, &8, &2_000);
    assert_eq!(client.get_reward_percentage(), 40);
}

#[test]
fn test_propose_admin_by_non_admin_fails() {
    let (env, client, _admin, _) = setup();

    let intruder = Address::generate(&env);
    let result = client.try_propose_admin(&intruder, &intruder);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
}

#[test]
fn test_accept_admin_without_proposal_fails() {
    let (env, client, _admin, _) = setup();

    let hopeful = Address::generate(&env);
    let result = client.try_accept_admin(&hopeful);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
}

#[test]
fn test_accept_admin_by_wrong_address_fails() {
    let (env, client, admin, _) = setup();

    let successor = Address::generate(&env);
    let impostor = Address::generate(&env);
    client.propose_admin(&admin, &successor);

    let result = client.try_accept_admin(&impostor);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    assert_eq!(client.get_admin(), admin);
}

#[test]
fn test_propose_admin_replaces_previous_proposal() {
    let (env, client, admin, _) = setup();

    let first = Address::generate(&env);
    let second = Address::generate(&env);
    client.propose_admin(&admin, &first);
    client.propose_admin(&admin, &second);

    let result = client.try_accept_admin(&first);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }

    client.accept_admin(&second);
    assert_eq!(client.get_admin(), second);
}

#[test]
fn test_admin_transfer_emits_events() {
    let (env, client, admin, _) = setup();

    env.ledger().set_timestamp(7);
    let successor = Address::generate(&env);
    client.propose_admin(&admin, &successor);

    assert_eq!(
        env.events().all().filter_by_contract(&client.address),
        vec![
            &env,
            (
                client.address.clone(),
                (symbol_short!("ADM_PROP"), admin.clone()).into_val(&env),
                AdminTransferProposedEvent {
                    current_admin: admin.clone(),
                    proposed_admin: successor.clone(),
                    timestamp: 7,
                }
                .into_val(&env),
            ),
        ]
    );

    client.accept_admin(&successor);

    assert_eq!(
        env.events().all().filter_by_contract(&client.address),
        vec![
            &env,
            (
                client.address.clone(),
                (symbol_short!("ADM_ACPT"), successor.clone()).into_val(&env),
                AdminTransferAcceptedEvent {
                    old_admin: admin.clone(),
                    new_admin: successor.clone(),
                    timestamp: 7,
                }
                .into_val(&env),
            ),
        ]
    );
}
