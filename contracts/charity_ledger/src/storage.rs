//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the ledger:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type      | Description                              |
//! |------------------|-----------|------------------------------------------|
//! | `Admin`          | `Address` | Administrator, fixed at `init`           |
//! | `CharityAddr`    | `Address` | Charity payout address                   |
//! | `DonationPct`    | `u32`     | Sale split percentage (default 20)       |
//! | `Paused`         | `bool`    | Global pause flag                        |
//! | `TotalDonations` | `i128`    | Accumulated charity splits from sales    |
//! | `NextAssetId`    | `u64`     | Auto-increment asset id counter          |
//! | `NextCampaignId` | `u64`     | Auto-increment campaign id counter       |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                        | Type               | Description                     |
//! |----------------------------|--------------------|---------------------------------|
//! | `Asset(id)`                | `Asset`            | One record per minted asset     |
//! | `Campaign(id)`             | `Campaign`         | One record per campaign         |
//! | `Milestone(camp, ms)`      | `Milestone`        | Milestone by composite key      |
//! | `UserStat(addr, camp)`     | `UserCampaignStat` | Per-donor asset-donation stats  |
//! | `Donation(addr, camp)`     | `DonationRecord`   | Latest cash-donation snapshot   |
//! | `Rewards(addr)`            | `Vec<u64>`         | Milestone reward asset ids      |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Lookups return `Option` and never panic; the entry points in `lib.rs` map
//! absence to the contract's numeric error codes.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Asset, Campaign, DonationRecord, Milestone, UserCampaignStat};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

/// Default sale split percentage seeded at `init`.
pub const DEFAULT_DONATION_PCT: u32 = 20;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Global configuration and the id counters live in instance storage and are
/// extended together. Per-entity records live in persistent storage with
/// independent TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Administrator address (Instance).
    Admin,
    /// Charity payout address (Instance).
    CharityAddr,
    /// Donation split percentage applied on sales (Instance).
    DonationPct,
    /// Global pause flag (Instance).
    Paused,
    /// Accumulator of charity splits collected from sales (Instance).
    TotalDonations,
    /// Next asset id to allocate (Instance).
    NextAssetId,
    /// Next campaign id to allocate (Instance).
    NextCampaignId,
    /// Asset record keyed by id (Persistent).
    Asset(u64),
    /// Campaign record keyed by id (Persistent).
    Campaign(u64),
    /// Milestone keyed by (campaign id, milestone id) (Persistent).
    Milestone(u64, u64),
    /// Per-donor, per-campaign asset-donation stats (Persistent).
    UserStat(Address, u64),
    /// Latest cash-donation snapshot per (donor, campaign) (Persistent).
    Donation(Address, u64),
    /// Milestone reward asset ids earned by an address (Persistent).
    Rewards(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// True once `init` has run.
pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

/// Seed all instance keys. Called exactly once from `init`.
pub fn init_config(env: &Env, admin: &Address, charity: &Address) {
    let storage = env.storage().instance();
    storage.set(&DataKey::Admin, admin);
    storage.set(&DataKey::CharityAddr, charity);
    storage.set(&DataKey::DonationPct, &DEFAULT_DONATION_PCT);
    storage.set(&DataKey::Paused, &false);
    storage.set(&DataKey::TotalDonations, &0i128);
    storage.set(&DataKey::NextAssetId, &1u64);
    storage.set(&DataKey::NextCampaignId, &1u64);
    bump_instance(env);
}

/// The administrator fixed at `init`.
/// Panics if the contract has not been initialized.
pub fn get_admin(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("contract not initialized")
}

pub fn get_charity_address(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::CharityAddr)
        .expect("contract not initialized")
}

pub fn set_charity_address(env: &Env, charity: &Address) {
    env.storage().instance().set(&DataKey::CharityAddr, charity);
    bump_instance(env);
}

pub fn get_donation_pct(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::DonationPct)
        .unwrap_or(DEFAULT_DONATION_PCT)
}

pub fn set_donation_pct(env: &Env, pct: u32) {
    env.storage().instance().set(&DataKey::DonationPct, &pct);
    bump_instance(env);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

/// Flip the pause flag; returns the new state.
pub fn toggle_paused(env: &Env) -> bool {
    let next = !is_paused(env);
    env.storage().instance().set(&DataKey::Paused, &next);
    bump_instance(env);
    next
}

pub fn get_total_donations(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::TotalDonations)
        .unwrap_or(0)
}

/// Add a sale's charity split to the global accumulator.
pub fn add_sale_donation(env: &Env, amount: i128) {
    let total = get_total_donations(env);
    env.storage()
        .instance()
        .set(&DataKey::TotalDonations, &(total + amount));
}

/// Atomically reads, increments, and stores the asset id counter.
/// Returns the id to use for the *current* asset (pre-increment value).
pub fn next_asset_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::NextAssetId)
        .unwrap_or(1);
    env.storage()
        .instance()
        .set(&DataKey::NextAssetId, &(current + 1));
    current
}

/// Atomically reads, increments, and stores the campaign id counter.
pub fn next_campaign_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::NextCampaignId)
        .unwrap_or(1);
    env.storage()
        .instance()
        .set(&DataKey::NextCampaignId, &(current + 1));
    current
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn save_asset(env: &Env, asset: &Asset) {
    let key = DataKey::Asset(asset.id);
    env.storage().persistent().set(&key, asset);
    bump_persistent(env, &key);
}

pub fn load_asset(env: &Env, id: u64) -> Option<Asset> {
    let key = DataKey::Asset(id);
    let asset: Option<Asset> = env.storage().persistent().get(&key);
    if asset.is_some() {
        bump_persistent(env, &key);
    }
    asset
}

pub fn save_campaign(env: &Env, campaign: &Campaign) {
    let key = DataKey::Campaign(campaign.id);
    env.storage().persistent().set(&key, campaign);
    bump_persistent(env, &key);
}

pub fn load_campaign(env: &Env, id: u64) -> Option<Campaign> {
    let key = DataKey::Campaign(id);
    let campaign: Option<Campaign> = env.storage().persistent().get(&key);
    if campaign.is_some() {
        bump_persistent(env, &key);
    }
    campaign
}

pub fn save_milestone(env: &Env, campaign_id: u64, milestone_id: u64, milestone: &Milestone) {
    let key = DataKey::Milestone(campaign_id, milestone_id);
    env.storage().persistent().set(&key, milestone);
    bump_persistent(env, &key);
}

pub fn load_milestone(env: &Env, campaign_id: u64, milestone_id: u64) -> Option<Milestone> {
    let key = DataKey::Milestone(campaign_id, milestone_id);
    let milestone: Option<Milestone> = env.storage().persistent().get(&key);
    if milestone.is_some() {
        bump_persistent(env, &key);
    }
    milestone
}

pub fn has_milestone(env: &Env, campaign_id: u64, milestone_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Milestone(campaign_id, milestone_id))
}

pub fn save_user_stat(env: &Env, user: &Address, campaign_id: u64, stat: &UserCampaignStat) {
    let key = DataKey::UserStat(user.clone(), campaign_id);
    env.storage().persistent().set(&key, stat);
    bump_persistent(env, &key);
}

pub fn load_user_stat(env: &Env, user: &Address, campaign_id: u64) -> Option<UserCampaignStat> {
    let key = DataKey::UserStat(user.clone(), campaign_id);
    let stat: Option<UserCampaignStat> = env.storage().persistent().get(&key);
    if stat.is_some() {
        bump_persistent(env, &key);
    }
    stat
}

pub fn save_donation(env: &Env, user: &Address, campaign_id: u64, record: &DonationRecord) {
    let key = DataKey::Donation(user.clone(), campaign_id);
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

pub fn load_donation(env: &Env, user: &Address, campaign_id: u64) -> Option<DonationRecord> {
    let key = DataKey::Donation(user.clone(), campaign_id);
    let record: Option<DonationRecord> = env.storage().persistent().get(&key);
    if record.is_some() {
        bump_persistent(env, &key);
    }
    record
}

/// Milestone reward asset ids earned by `user`; empty when none.
pub fn load_rewards(env: &Env, user: &Address) -> Vec<u64> {
    let key = DataKey::Rewards(user.clone());
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn push_reward(env: &Env, user: &Address, asset_id: u64) {
    let key = DataKey::Rewards(user.clone());
    let mut rewards = load_rewards(env, user);
    rewards.push_back(asset_id);
    env.storage().persistent().set(&key, &rewards);
    bump_persistent(env, &key);
}
