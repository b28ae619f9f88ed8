//! # Types
//!
//! Shared data structures used across all modules of the charity ledger.
//!
//! ## Design decisions
//!
//! ### Amounts and identifiers
//!
//! Amounts are `i128` (the Soroban token convention), identifiers are `u64`
//! allocated by monotonic counters starting at 1. Ids are never reused.
//!
//! ### Listing price as `Option`
//!
//! An [`Asset`] carries `price: Option<i128>` — `Some` only while the asset
//! is listed. Every ownership change (sale, transfer, donation) clears the
//! price so a stale listing can never survive into the next owner's hands.
//!
//! ### Milestones as separate entries
//!
//! Milestones are not embedded in [`Campaign`]; they live under their own
//! `(campaign_id, milestone_id)` storage key so that claiming one milestone
//! rewrites ~60 bytes instead of the whole campaign record.

use soroban_sdk::{contracttype, Address, String, Vec};

/// A non-fungible asset in the registry.
///
/// Invariant: exactly one owner at all times. Donated assets are owned by
/// the contract itself (custodian), so `owner` never reports a stale donor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Asset {
    /// Unique identifier (auto-incremented, starts at 1).
    pub id: u64,
    /// Current owner.
    pub owner: Address,
    /// Metadata URI (e.g. IPFS CID).
    pub uri: String,
    /// Free-form category tag.
    pub category: String,
    /// Listing price; `Some` only while listed for sale.
    pub price: Option<i128>,
}

/// A charity fundraising campaign.
///
/// `raised` is monotonically non-decreasing. `deadline` is informational —
/// nothing in the contract auto-expires a campaign; only an explicit
/// `end_campaign` flips `active`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    /// Unique identifier (auto-incremented, starts at 1).
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Fundraising target.
    pub goal: i128,
    /// Total raised so far (cash donations + donated asset values).
    pub raised: i128,
    /// Ledger sequence at creation plus the requested duration.
    pub deadline: u32,
    /// False once ended; inactive campaigns reject all donations.
    pub active: bool,
    /// Donated asset ids in donation order.
    pub nfts: Vec<u64>,
}

/// A milestone attached to a campaign, keyed by `(campaign_id, milestone_id)`.
///
/// `reached` flips to true at most once, on the first successful claim.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Milestone {
    pub description: String,
    /// Raised amount the campaign must hit before the reward can be claimed.
    pub target: i128,
    /// Metadata URI for the reward asset minted on claim.
    pub reward_uri: String,
    pub reached: bool,
}

/// Per-participant, per-campaign asset-donation statistics.
///
/// Created and updated only by asset donations; cash donations never touch
/// this record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserCampaignStat {
    /// Asset ids this participant donated to the campaign.
    pub nfts: Vec<u64>,
    /// Cumulative listed value of those assets.
    pub total_value: i128,
}

/// Latest cash-donation snapshot for a `(participant, campaign)` pair.
///
/// Overwritten by each donation — a snapshot, not an accumulator.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationRecord {
    pub amount: i128,
    /// Ledger sequence at which the donation was recorded.
    pub at: u32,
}

/// Read-only campaign progress summary returned by `generate_campaign_report`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignReport {
    pub campaign_id: u64,
    pub raised: i128,
    pub goal: i128,
    /// `floor(raised * 100 / goal)`.
    pub goal_percentage: i128,
    /// Number of donated assets.
    pub nft_count: u32,
    pub active: bool,
}
