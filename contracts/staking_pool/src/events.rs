#![allow(deprecated)] // events().publish, pending a move to #[contractevent]

use soroban_sdk::{symbol_short, Address, Env};

use crate::PoolSettings;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub staking_token: Address,
    pub reward_token: Address,
    pub reward_percentage: u32,
    pub claim_frozen_time: u64,
    pub unstake_frozen_time: u64,
    pub boundary_supply: i128,
    pub timestamp: u64,
}

/// Fired when an account deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when an account withdraws its full position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when an account is paid a reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimedEvent {
    pub staker: Address,
    pub reward: i128,
    pub timestamp: u64,
}

/// Fired when the admin replaces the pool settings.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettingsChangedEvent {
    pub reward_percentage: u32,
    pub claim_frozen_time: u64,
    pub unstake_frozen_time: u64,
    pub boundary_supply: i128,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    staking_token: Address,
    reward_token: Address,
    settings: &PoolSettings,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            staking_token,
            reward_token,
            reward_percentage: settings.reward_percentage,
            claim_frozen_time: settings.claim_frozen_time,
            unstake_frozen_time: settings.unstake_frozen_time,
            boundary_supply: settings.boundary_supply,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        UnstakedEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claimed(env: &Env, staker: Address, reward: i128) {
    env.events().publish(
        (symbol_short!("CLAIMED"), staker.clone()),
        ClaimedEvent {
            staker,
            reward,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_settings_changed(env: &Env, settings: &PoolSettings) {
    env.events().publish(
        (symbol_short!("SET_CHGD"),),
        SettingsChangedEvent {
            reward_percentage: settings.reward_percentage,
            claim_frozen_time: settings.claim_frozen_time,
            unstake_frozen_time: settings.unstake_frozen_time,
            boundary_supply: settings.boundary_supply,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}
