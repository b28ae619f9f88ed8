//! # Events
//!
//! Typed payloads published by every mutating entry point.
//!
//! Topic shape follows the contract-wide convention:
//! `(symbol_short!(<topic>), <subject id>)` with a `#[contracttype]` struct
//! as data, so off-chain consumers (the `backend/indexer` sidecar) can decode
//! payloads without guessing at field positions.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetMinted {
    pub asset_id: u64,
    pub owner: Address,
    pub uri: String,
    pub category: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetTransferred {
    pub asset_id: u64,
    pub from: Address,
    pub to: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetListed {
    pub asset_id: u64,
    pub owner: Address,
    pub price: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetSold {
    pub asset_id: u64,
    pub seller: Address,
    pub buyer: Address,
    pub price: i128,
    /// `floor(price * pct / 100)` routed to the charity accumulator.
    pub charity_split: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub campaign_id: u64,
    pub name: String,
    pub goal: i128,
    pub deadline: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationReceived {
    pub campaign_id: u64,
    pub donor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetDonated {
    pub campaign_id: u64,
    pub asset_id: u64,
    pub donor: Address,
    /// The asset's listed price, credited to the campaign.
    pub value: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignEnded {
    pub campaign_id: u64,
    pub raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneAdded {
    pub campaign_id: u64,
    pub milestone_id: u64,
    pub target: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneClaimed {
    pub campaign_id: u64,
    pub milestone_id: u64,
    pub claimer: Address,
    pub reward_asset_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharityAddressSet {
    pub charity: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PercentageSet {
    pub pct: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseToggled {
    pub paused: bool,
}

pub fn asset_minted(env: &Env, event: AssetMinted) {
    env.events()
        .publish((symbol_short!("minted"), event.asset_id), event);
}

pub fn asset_transferred(env: &Env, event: AssetTransferred) {
    env.events()
        .publish((symbol_short!("xfer"), event.asset_id), event);
}

pub fn asset_listed(env: &Env, event: AssetListed) {
    env.events()
        .publish((symbol_short!("listed"), event.asset_id), event);
}

pub fn asset_sold(env: &Env, event: AssetSold) {
    env.events()
        .publish((symbol_short!("sold"), event.asset_id), event);
}

pub fn campaign_created(env: &Env, event: CampaignCreated) {
    env.events()
        .publish((symbol_short!("camp_new"), event.campaign_id), event);
}

pub fn donation_received(env: &Env, event: DonationReceived) {
    env.events()
        .publish((symbol_short!("donated"), event.campaign_id), event);
}

pub fn asset_donated(env: &Env, event: AssetDonated) {
    env.events()
        .publish((symbol_short!("nft_don"), event.campaign_id), event);
}

pub fn campaign_ended(env: &Env, event: CampaignEnded) {
    env.events()
        .publish((symbol_short!("camp_end"), event.campaign_id), event);
}

pub fn milestone_added(env: &Env, event: MilestoneAdded) {
    env.events()
        .publish((symbol_short!("ms_added"), event.campaign_id), event);
}

pub fn milestone_claimed(env: &Env, event: MilestoneClaimed) {
    env.events()
        .publish((symbol_short!("claimed"), event.campaign_id), event);
}

pub fn charity_address_set(env: &Env, event: CharityAddressSet) {
    env.events().publish((symbol_short!("charity"),), event);
}

pub fn percentage_set(env: &Env, event: PercentageSet) {
    env.events().publish((symbol_short!("pct_set"),), event);
}

pub fn pause_toggled(env: &Env, event: PauseToggled) {
    env.events().publish((symbol_short!("paused"),), event);
}
