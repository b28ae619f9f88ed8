//! # Charity NFT Ledger Contract
//!
//! This is the root crate of the **charity ledger**: a single Soroban
//! contract that jointly manages a non-fungible asset registry with
//! marketplace semantics and a charity-campaign fundraising ledger, tied
//! together by a percentage split on every sale and milestone-triggered
//! reward minting.
//!
//! | Concern        | Entry Point(s)                                            |
//! |----------------|-----------------------------------------------------------|
//! | Bootstrap      | [`CharityLedger::init`]                                   |
//! | Asset registry | `mint_asset`, `transfer_asset`, `list_for_sale`, `buy_asset` |
//! | Campaigns      | `create_campaign`, `donate_to_campaign`, `donate_asset_to_campaign`, `end_campaign` |
//! | Milestones     | `add_campaign_milestone`, `check_and_claim_milestone_reward` |
//! | Administration | `set_charity_address`, `set_donation_percentage`, `toggle_pause` |
//! | Queries        | `get_owner`, `get_price`, `get_campaign`, `generate_campaign_report`, … |
//!
//! ## Architecture
//!
//! Authorization is fully delegated to [`access`]. Storage access is fully
//! delegated to [`storage`]. Minting lives in [`registry`] so the milestone
//! engine reaches the registry through one explicit function instead of
//! touching asset storage itself. This file contains **only** the public
//! entry points and event emissions — no business logic lives here directly.
//!
//! Every mutating call is atomic: any `Err` carries a numeric [`Error`] code
//! and the host rolls back all pending writes of that call.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String, Vec};

pub mod access;
mod events;
mod registry;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_milestones;

pub use events::{
    AssetDonated, AssetListed, AssetMinted, AssetSold, AssetTransferred, CampaignCreated,
    CampaignEnded, CharityAddressSet, DonationReceived, MilestoneAdded, MilestoneClaimed,
    PauseToggled, PercentageSet,
};
pub use types::{Asset, Campaign, CampaignReport, DonationRecord, Milestone, UserCampaignStat};

/// Failure codes surfaced to callers. The numeric values are part of the
/// contract's wire interface and must not be renumbered.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Administrator-only operation invoked by another caller.
    OwnerOnly = 100,
    /// Asset operation invoked by a caller who does not own the asset.
    NotTokenOwner = 101,
    /// The asset has no listing price set.
    NotForSale = 102,
    /// Unknown asset id.
    AssetNotFound = 103,
    /// Unknown campaign id, **or** a campaign that has been ended.
    /// The two causes deliberately share one code.
    CampaignNotFound = 104,
    /// Unknown (campaign, milestone) key.
    MilestoneNotFound = 105,
    /// The campaign has not raised enough to claim this milestone.
    MilestoneNotReached = 106,
    /// Mutating operation while the contract is paused.
    ContractPaused = 107,
    /// A milestone with this id already exists for the campaign.
    MilestoneExists = 108,
    /// The milestone reward has already been claimed.
    MilestoneAlreadyClaimed = 109,
    /// Second call to `init`.
    AlreadyInitialized = 110,
    /// A donation amount or listing price that is not strictly positive.
    InvalidAmount = 111,
}

#[contract]
pub struct CharityLedger;

#[contractimpl]
impl CharityLedger {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Initialise the ledger: fix the administrator, set the charity payout
    /// address, and seed the configuration (donation percentage 20, unpaused,
    /// id counters at 1).
    ///
    /// Must be called exactly once immediately after deployment. Subsequent
    /// calls fail with [`Error::AlreadyInitialized`].
    pub fn init(env: Env, admin: Address, charity: Address) -> Result<(), Error> {
        admin.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::init_config(&env, &admin, &charity);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Asset registry
    // ─────────────────────────────────────────────────────────

    /// Mint a new asset owned by `caller`. Open to any caller.
    ///
    /// Returns the new asset id (monotonic, starting at 1).
    pub fn mint_asset(
        env: Env,
        caller: Address,
        uri: String,
        category: String,
    ) -> Result<u64, Error> {
        caller.require_auth();
        access::require_not_paused(&env)?;
        Ok(registry::mint(&env, &caller, uri, category))
    }

    /// Transfer an asset to `to`. Owner-only.
    ///
    /// Clears any listing price so a stale listing cannot survive the
    /// ownership change.
    pub fn transfer_asset(
        env: Env,
        caller: Address,
        asset_id: u64,
        to: Address,
    ) -> Result<bool, Error> {
        caller.require_auth();
        access::require_not_paused(&env)?;

        let mut asset = must_load_asset(&env, asset_id)?;
        access::require_asset_owner(&caller, &asset)?;

        asset.owner = to.clone();
        asset.price = None;
        storage::save_asset(&env, &asset);

        events::asset_transferred(
            &env,
            events::AssetTransferred {
                asset_id,
                from: caller,
                to,
            },
        );
        Ok(true)
    }

    /// List an asset for sale at `price`. Owner-only.
    ///
    /// The price must be strictly positive: it doubles as the asset's
    /// donation value, so a non-positive listing could shrink a campaign's
    /// raised total or the sale accumulator downstream.
    pub fn list_for_sale(
        env: Env,
        caller: Address,
        asset_id: u64,
        price: i128,
    ) -> Result<bool, Error> {
        caller.require_auth();
        access::require_not_paused(&env)?;

        let mut asset = must_load_asset(&env, asset_id)?;
        access::require_asset_owner(&caller, &asset)?;
        if price <= 0 {
            return Err(Error::InvalidAmount);
        }

        asset.price = Some(price);
        storage::save_asset(&env, &asset);

        events::asset_listed(
            &env,
            events::AssetListed {
                asset_id,
                owner: caller,
                price,
            },
        );
        Ok(true)
    }

    /// Buy a listed asset. Open to any caller, including the current owner.
    ///
    /// Ownership moves to the buyer, the listing is cleared, and
    /// `floor(price × donation_percentage / 100)` is added to the
    /// total-donations accumulator. Settling the remainder between buyer and
    /// seller is the payment collaborator's concern; the ledger records only
    /// the split bookkeeping and the ownership change.
    pub fn buy_asset(env: Env, buyer: Address, asset_id: u64) -> Result<bool, Error> {
        buyer.require_auth();
        access::require_not_paused(&env)?;

        let mut asset = must_load_asset(&env, asset_id)?;
        let price = asset.price.ok_or(Error::NotForSale)?;
        let seller = asset.owner.clone();

        let pct = storage::get_donation_pct(&env);
        let charity_split = price * pct as i128 / 100;
        storage::add_sale_donation(&env, charity_split);

        asset.owner = buyer.clone();
        asset.price = None;
        storage::save_asset(&env, &asset);

        events::asset_sold(
            &env,
            events::AssetSold {
                asset_id,
                seller,
                buyer,
                price,
                charity_split,
            },
        );
        Ok(true)
    }

    /// Current owner of an asset, or `None` for an unknown id.
    pub fn get_owner(env: Env, asset_id: u64) -> Option<Address> {
        storage::load_asset(&env, asset_id).map(|a| a.owner)
    }

    /// Listing price of an asset; `None` when unknown or not listed.
    pub fn get_price(env: Env, asset_id: u64) -> Option<i128> {
        storage::load_asset(&env, asset_id).and_then(|a| a.price)
    }

    /// The percentage of each sale routed to the charity accumulator.
    pub fn get_donation_percentage(env: Env) -> u32 {
        storage::get_donation_pct(&env)
    }

    /// Total charity splits accumulated from sales.
    pub fn get_total_donations(env: Env) -> i128 {
        storage::get_total_donations(&env)
    }

    /// The configured charity payout address.
    pub fn get_charity_address(env: Env) -> Address {
        storage::get_charity_address(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Campaign ledger
    // ─────────────────────────────────────────────────────────

    /// Create a fundraising campaign. Administrator-only.
    ///
    /// The deadline is recorded as the current ledger sequence plus
    /// `duration`; it is informational for reporting and never auto-expires
    /// the campaign.
    ///
    /// Returns the new campaign id (monotonic, starting at 1).
    pub fn create_campaign(
        env: Env,
        caller: Address,
        name: String,
        description: String,
        goal: i128,
        duration: u32,
    ) -> Result<u64, Error> {
        caller.require_auth();
        access::require_admin(&env, &caller)?;
        access::require_not_paused(&env)?;

        let id = storage::next_campaign_id(&env);
        let deadline = env.ledger().sequence() + duration;

        let campaign = Campaign {
            id,
            name: name.clone(),
            description,
            goal,
            raised: 0,
            deadline,
            active: true,
            nfts: Vec::new(&env),
        };
        storage::save_campaign(&env, &campaign);

        events::campaign_created(
            &env,
            events::CampaignCreated {
                campaign_id: id,
                name,
                goal,
                deadline,
            },
        );
        Ok(id)
    }

    /// Donate cash to an active campaign. Open to any caller.
    ///
    /// A non-positive amount fails with [`Error::InvalidAmount`]: the raised
    /// total is monotonically non-decreasing, so a negative donation must
    /// never slip through. A non-existent campaign and an ended one both
    /// fail with [`Error::CampaignNotFound`] — the collapse is deliberate.
    ///
    /// The caller's [`DonationRecord`] is overwritten with this donation
    /// (latest-snapshot semantics), while `raised` accumulates.
    pub fn donate_to_campaign(
        env: Env,
        caller: Address,
        campaign_id: u64,
        amount: i128,
    ) -> Result<bool, Error> {
        caller.require_auth();
        access::require_not_paused(&env)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let mut campaign = must_load_active_campaign(&env, campaign_id)?;
        campaign.raised += amount;
        storage::save_campaign(&env, &campaign);

        storage::save_donation(
            &env,
            &caller,
            campaign_id,
            &DonationRecord {
                amount,
                at: env.ledger().sequence(),
            },
        );

        events::donation_received(
            &env,
            events::DonationReceived {
                campaign_id,
                donor: caller,
                amount,
            },
        );
        Ok(true)
    }

    /// Donate an owned, listed asset to an active campaign.
    ///
    /// The asset's listed price is its donation value: it is added to the
    /// campaign's `raised` total and to the donor's per-campaign stats. The
    /// contract takes custody of the asset — `get_owner` no longer reports
    /// the donor — and the listing is cleared.
    pub fn donate_asset_to_campaign(
        env: Env,
        caller: Address,
        campaign_id: u64,
        asset_id: u64,
    ) -> Result<bool, Error> {
        caller.require_auth();
        access::require_not_paused(&env)?;

        let mut asset = must_load_asset(&env, asset_id)?;
        access::require_asset_owner(&caller, &asset)?;
        let value = asset.price.ok_or(Error::NotForSale)?;

        let mut campaign = must_load_active_campaign(&env, campaign_id)?;
        campaign.nfts.push_back(asset_id);
        campaign.raised += value;
        storage::save_campaign(&env, &campaign);

        let mut stat = storage::load_user_stat(&env, &caller, campaign_id).unwrap_or(
            UserCampaignStat {
                nfts: Vec::new(&env),
                total_value: 0,
            },
        );
        stat.nfts.push_back(asset_id);
        stat.total_value += value;
        storage::save_user_stat(&env, &caller, campaign_id, &stat);

        asset.owner = env.current_contract_address();
        asset.price = None;
        storage::save_asset(&env, &asset);

        events::asset_donated(
            &env,
            events::AssetDonated {
                campaign_id,
                asset_id,
                donor: caller,
                value,
            },
        );
        Ok(true)
    }

    /// End a campaign. Administrator-only.
    ///
    /// Re-ending an already-ended campaign fails with the same collapsed
    /// [`Error::CampaignNotFound`] code that donations to it would see.
    pub fn end_campaign(env: Env, caller: Address, campaign_id: u64) -> Result<bool, Error> {
        caller.require_auth();
        access::require_admin(&env, &caller)?;
        access::require_not_paused(&env)?;

        let mut campaign = must_load_active_campaign(&env, campaign_id)?;
        campaign.active = false;
        storage::save_campaign(&env, &campaign);

        events::campaign_ended(
            &env,
            events::CampaignEnded {
                campaign_id,
                raised: campaign.raised,
            },
        );
        Ok(true)
    }

    /// Progress summary for a campaign. Ended campaigns still report;
    /// unknown ids fail with [`Error::CampaignNotFound`].
    pub fn generate_campaign_report(env: Env, campaign_id: u64) -> Result<CampaignReport, Error> {
        let campaign = must_load_campaign(&env, campaign_id)?;
        let goal_percentage = if campaign.goal > 0 {
            campaign.raised * 100 / campaign.goal
        } else {
            0
        };
        Ok(CampaignReport {
            campaign_id,
            raised: campaign.raised,
            goal: campaign.goal,
            goal_percentage,
            nft_count: campaign.nfts.len(),
            active: campaign.active,
        })
    }

    /// Full campaign record. Unknown ids fail with [`Error::CampaignNotFound`].
    pub fn get_campaign(env: Env, campaign_id: u64) -> Result<Campaign, Error> {
        must_load_campaign(&env, campaign_id)
    }

    /// Latest cash-donation snapshot for `user` on `campaign_id`, if any.
    pub fn get_user_donation_history(
        env: Env,
        user: Address,
        campaign_id: u64,
    ) -> Option<DonationRecord> {
        storage::load_donation(&env, &user, campaign_id)
    }

    /// Donated asset ids of a campaign, in donation order.
    pub fn get_campaign_nfts(env: Env, campaign_id: u64) -> Result<Vec<u64>, Error> {
        Ok(must_load_campaign(&env, campaign_id)?.nfts)
    }

    /// Per-campaign asset-donation stats for `user`, if any.
    pub fn get_user_campaign_stats(
        env: Env,
        user: Address,
        campaign_id: u64,
    ) -> Option<UserCampaignStat> {
        storage::load_user_stat(&env, &user, campaign_id)
    }

    // ─────────────────────────────────────────────────────────
    // Milestone engine
    // ─────────────────────────────────────────────────────────

    /// Attach a milestone to a campaign. Administrator-only.
    ///
    /// The milestone id is caller-supplied; registering a duplicate
    /// (campaign, milestone) key fails with [`Error::MilestoneExists`] so a
    /// claimed milestone can never be re-armed by overwriting it.
    pub fn add_campaign_milestone(
        env: Env,
        caller: Address,
        campaign_id: u64,
        milestone_id: u64,
        description: String,
        target: i128,
        reward_uri: String,
    ) -> Result<bool, Error> {
        caller.require_auth();
        access::require_admin(&env, &caller)?;
        access::require_not_paused(&env)?;

        if storage::load_campaign(&env, campaign_id).is_none() {
            return Err(Error::CampaignNotFound);
        }
        if storage::has_milestone(&env, campaign_id, milestone_id) {
            return Err(Error::MilestoneExists);
        }

        storage::save_milestone(
            &env,
            campaign_id,
            milestone_id,
            &Milestone {
                description,
                target,
                reward_uri,
                reached: false,
            },
        );

        events::milestone_added(
            &env,
            events::MilestoneAdded {
                campaign_id,
                milestone_id,
                target,
            },
        );
        Ok(true)
    }

    /// Claim a milestone reward. Open to any caller.
    ///
    /// Succeeds iff the campaign has raised at least the milestone's target
    /// and the milestone has not been claimed before. On success the
    /// milestone is marked reached and a reward asset is minted through the
    /// registry (owner = caller, uri = the milestone's reward uri); the new
    /// id is appended to the caller's reward list and returned.
    pub fn check_and_claim_milestone_reward(
        env: Env,
        caller: Address,
        campaign_id: u64,
        milestone_id: u64,
    ) -> Result<u64, Error> {
        caller.require_auth();
        access::require_not_paused(&env)?;

        let mut milestone = storage::load_milestone(&env, campaign_id, milestone_id)
            .ok_or(Error::MilestoneNotFound)?;
        let campaign = must_load_campaign(&env, campaign_id)?;

        if campaign.raised < milestone.target {
            return Err(Error::MilestoneNotReached);
        }
        if milestone.reached {
            return Err(Error::MilestoneAlreadyClaimed);
        }

        milestone.reached = true;
        storage::save_milestone(&env, campaign_id, milestone_id, &milestone);

        let reward_asset_id = registry::mint(
            &env,
            &caller,
            milestone.reward_uri.clone(),
            String::from_str(&env, "reward"),
        );
        storage::push_reward(&env, &caller, reward_asset_id);

        events::milestone_claimed(
            &env,
            events::MilestoneClaimed {
                campaign_id,
                milestone_id,
                claimer: caller,
                reward_asset_id,
            },
        );
        Ok(reward_asset_id)
    }

    /// A campaign milestone, or `None` for an unknown key.
    pub fn get_campaign_milestone(
        env: Env,
        campaign_id: u64,
        milestone_id: u64,
    ) -> Option<Milestone> {
        storage::load_milestone(&env, campaign_id, milestone_id)
    }

    /// Asset ids `user` has earned through milestone claims.
    pub fn get_user_rewards(env: Env, user: Address) -> Vec<u64> {
        storage::load_rewards(&env, &user)
    }

    // ─────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────
    //
    // These three bypass the pause gate so the administrator can always
    // reconfigure and unpause.

    /// Replace the charity payout address. Administrator-only.
    pub fn set_charity_address(env: Env, caller: Address, charity: Address) -> Result<bool, Error> {
        caller.require_auth();
        access::require_admin(&env, &caller)?;

        storage::set_charity_address(&env, &charity);
        events::charity_address_set(&env, events::CharityAddressSet { charity });
        Ok(true)
    }

    /// Replace the sale split percentage. Administrator-only.
    ///
    /// The range is not bound-checked (0–100 assumed valid input).
    pub fn set_donation_percentage(env: Env, caller: Address, pct: u32) -> Result<bool, Error> {
        caller.require_auth();
        access::require_admin(&env, &caller)?;

        storage::set_donation_pct(&env, pct);
        events::percentage_set(&env, events::PercentageSet { pct });
        Ok(true)
    }

    /// Flip the global pause flag. Administrator-only.
    pub fn toggle_pause(env: Env, caller: Address) -> Result<bool, Error> {
        caller.require_auth();
        access::require_admin(&env, &caller)?;

        let paused = storage::toggle_paused(&env);
        events::pause_toggled(&env, events::PauseToggled { paused });
        Ok(true)
    }
}

// ── Load-or-fail helpers ─────────────────────────────────────────────

fn must_load_asset(env: &Env, asset_id: u64) -> Result<Asset, Error> {
    storage::load_asset(env, asset_id).ok_or(Error::AssetNotFound)
}

fn must_load_campaign(env: &Env, campaign_id: u64) -> Result<Campaign, Error> {
    storage::load_campaign(env, campaign_id).ok_or(Error::CampaignNotFound)
}

/// Absence and inactivity share `CampaignNotFound` on purpose.
fn must_load_active_campaign(env: &Env, campaign_id: u64) -> Result<Campaign, Error> {
    match storage::load_campaign(env, campaign_id) {
        Some(c) if c.active => Ok(c),
        _ => Err(Error::CampaignNotFound),
    }
}
