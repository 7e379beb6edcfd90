//! Single-pool token staking with proportional rewards.
//!
//! Accounts deposit the staking token into a shared pool and later claim
//! rewards sized by their own deposit, the pool-wide total and an
//! admin-tuned boundary supply. Two contract points deserve emphasis:
//! topping up an existing position restarts both freeze windows for the
//! whole position, and unstaking pays back the principal only, forfeiting
//! any reward that was not claimed first.

#![no_std]

pub mod events;
pub mod rewards;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKING_TOKEN: Symbol = symbol_short!("STK_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const SETTINGS: Symbol = symbol_short!("SETTINGS");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

// Per-account positions live in persistent storage under (POSITION, address).
const POSITION: Symbol = symbol_short!("POS");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthorized = 3,
    InvalidAmount = 4,
    NothingStaked = 5,
    StillFrozen = 6,
    NoReward = 7,
    TransferFailed = 8,
    Overflow = 9,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// One account's stake in the pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    /// Tokens currently deposited.
    pub amount: i128,
    /// Ledger time of the most recent deposit. Gates `unstake`.
    pub staked_at: u64,
    /// Ledger time of the most recent claim or deposit. Gates `claim`.
    pub last_claimed_at: u64,
}

/// Admin-tuned pool parameters, always replaced as one unit.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSettings {
    /// Percent of a position paid out per claim, before pool scaling.
    pub reward_percentage: u32,
    /// Seconds an account must wait after staking or claiming before the
    /// next claim.
    pub claim_frozen_time: u64,
    /// Seconds an account must wait after staking before unstaking.
    pub unstake_frozen_time: u64,
    /// Reference supply the pool total is measured against when scaling
    /// rewards. Must stay positive.
    pub boundary_supply: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPool;

#[contractimpl]
impl StakingPool {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// One-time setup of admin, token addresses and the initial settings.
    pub fn initialize(
        env: Env,
        admin: Address,
        staking_token: Address,
        reward_token: Address,
        reward_percentage: u32,
        claim_frozen_time: u64,
        unstake_frozen_time: u64,
        boundary_supply: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if boundary_supply <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let settings = PoolSettings {
            reward_percentage,
            claim_frozen_time,
            unstake_frozen_time,
            boundary_supply,
        };

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&STAKING_TOKEN, &staking_token);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&SETTINGS, &settings);

        events::publish_initialized(&env, admin, staking_token, reward_token, &settings);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` staking tokens into the pool.
    ///
    /// Adds to any existing position and restarts both freeze windows for
    /// the combined amount. Fails with `InvalidAmount` for a non-positive
    /// amount and `TransferFailed` when the deposit cannot be pulled from
    /// the staker.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let staking_token = Self::staking_token(&env)?;
        let contract = env.current_contract_address();
        if token::Client::new(&env, &staking_token)
            .try_transfer(&staker, &contract, &amount)
            .is_err()
        {
            return Err(ContractError::TransferFailed);
        }

        let now = env.ledger().timestamp();
        let mut position = Self::load_position(&env, &staker);
        position.amount = position
            .amount
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        // A top-up restarts both timers for the whole position.
        position.staked_at = now;
        position.last_claimed_at = now;
        env.storage()
            .persistent()
            .set(&(POSITION, staker.clone()), &position);

        let new_total = Self::read_total(&env)
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        events::publish_staked(&env, staker, amount, new_total);

        Ok(())
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Withdraw the caller's entire position once the unstake freeze has
    /// passed. Returns the principal paid back. Rewards not claimed before
    /// this call are forfeited.
    pub fn unstake(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let position = Self::load_position(&env, &staker);
        if position.amount == 0 {
            return Err(ContractError::NothingStaked);
        }

        let settings = Self::settings(&env)?;
        let now = env.ledger().timestamp();
        if rewards::elapsed(now, position.staked_at) < settings.unstake_frozen_time {
            return Err(ContractError::StillFrozen);
        }

        let amount = position.amount;
        env.storage().persistent().remove(&(POSITION, staker.clone()));

        let new_total = Self::read_total(&env)
            .checked_sub(amount)
            .ok_or(ContractError::Overflow)?;
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        let staking_token = Self::staking_token(&env)?;
        let contract = env.current_contract_address();
        if token::Client::new(&env, &staking_token)
            .try_transfer(&contract, &staker, &amount)
            .is_err()
        {
            return Err(ContractError::TransferFailed);
        }

        events::publish_unstaked(&env, staker, amount, new_total);

        Ok(amount)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out the caller's current reward once the claim freeze has
    /// passed, and restart the claim timer. Returns the reward paid.
    ///
    /// The reward is `amount * reward_percentage% * total_staked /
    /// boundary_supply`, floored once after all multiplications so a pool
    /// below the boundary scales the payout down instead of zeroing it.
    pub fn claim(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut position = Self::load_position(&env, &staker);
        if position.amount == 0 {
            return Err(ContractError::NothingStaked);
        }

        let settings = Self::settings(&env)?;
        let now = env.ledger().timestamp();
        if rewards::elapsed(now, position.last_claimed_at) < settings.claim_frozen_time {
            return Err(ContractError::StillFrozen);
        }

        let reward = rewards::compute_reward(
            position.amount,
            settings.reward_percentage,
            Self::read_total(&env),
            settings.boundary_supply,
        )
        .ok_or(ContractError::Overflow)?;
        if reward == 0 {
            return Err(ContractError::NoReward);
        }

        position.last_claimed_at = now;
        env.storage()
            .persistent()
            .set(&(POSITION, staker.clone()), &position);

        let reward_token = Self::reward_token(&env)?;
        let contract = env.current_contract_address();
        if token::Client::new(&env, &reward_token)
            .try_transfer(&contract, &staker, &reward)
            .is_err()
        {
            return Err(ContractError::TransferFailed);
        }

        events::publish_claimed(&env, staker, reward);

        Ok(reward)
    }

    // ── Admin functions ─────────────────────────────────────────────────────

    /// Replace all four pool settings at once. Admin only. Rejects a
    /// non-positive `boundary_supply`; on any error the previous settings
    /// stay in force untouched.
    pub fn change_staking_settings(
        env: Env,
        caller: Address,
        reward_percentage: u32,
        claim_frozen_time: u64,
        unstake_frozen_time: u64,
        boundary_supply: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if boundary_supply <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let settings = PoolSettings {
            reward_percentage,
            claim_frozen_time,
            unstake_frozen_time,
            boundary_supply,
        };
        env.storage().instance().set(&SETTINGS, &settings);

        events::publish_settings_changed(&env, &settings);

        Ok(())
    }

    // ── Admin transfer (two-step) ────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this,
    /// and the proposed address must call `accept_admin` to complete the
    /// transfer. Proposing again replaces any earlier proposal.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed new admin can
    /// call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::NotAuthorized)?;
        if new_admin != pending {
            return Err(ContractError::NotAuthorized);
        }

        let old_admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    pub fn get_reward_percentage(env: Env) -> u32 {
        Self::settings_opt(&env).map_or(0, |s| s.reward_percentage)
    }

    pub fn get_claim_frozen_time(env: Env) -> u64 {
        Self::settings_opt(&env).map_or(0, |s| s.claim_frozen_time)
    }

    pub fn get_unstake_frozen_time(env: Env) -> u64 {
        Self::settings_opt(&env).map_or(0, |s| s.unstake_frozen_time)
    }

    pub fn get_boundary_supply(env: Env) -> i128 {
        Self::settings_opt(&env).map_or(0, |s| s.boundary_supply)
    }

    /// All four settings in one read.
    pub fn get_settings(env: Env) -> Result<PoolSettings, ContractError> {
        Self::settings(&env)
    }

    /// Sum of every account's staked amount.
    pub fn get_total_staked(env: Env) -> i128 {
        Self::read_total(&env)
    }

    /// An account's position; a zeroed record for accounts that never
    /// staked or fully unstaked.
    pub fn get_stake(env: Env, account: Address) -> StakePosition {
        Self::load_position(&env, &account)
    }

    /// The reward `claim` would pay `account` right now, ignoring the
    /// claim freeze. Zero for empty positions and on arithmetic overflow.
    pub fn preview_reward(env: Env, account: Address) -> i128 {
        let settings = match Self::settings_opt(&env) {
            Some(s) => s,
            None => return 0,
        };
        let position = Self::load_position(&env, &account);
        if position.amount == 0 {
            return 0;
        }
        rewards::compute_reward(
            position.amount,
            settings.reward_percentage,
            Self::read_total(&env),
            settings.boundary_supply,
        )
        .unwrap_or(0)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::NotAuthorized);
        }
        Ok(())
    }

    fn settings(env: &Env) -> Result<PoolSettings, ContractError> {
        Self::settings_opt(env).ok_or(ContractError::NotInitialized)
    }

    fn settings_opt(env: &Env) -> Option<PoolSettings> {
        env.storage().instance().get(&SETTINGS)
    }

    fn staking_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKING_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn reward_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn load_position(env: &Env, account: &Address) -> StakePosition {
        env.storage()
            .persistent()
            .get(&(POSITION, account.clone()))
            .unwrap_or(StakePosition {
                amount: 0,
                staked_at: 0,
                last_claimed_at: 0,
            })
    }

    fn read_total(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_settings;
