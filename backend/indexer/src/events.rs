//! Canonical event types emitted by the charity ledger contract.
//!
//! These mirror the Soroban events defined in
//! `contracts/charity_ledger/src/events.rs`: each event's first topic is a
//! short symbol, the second (where present) is the asset or campaign id the
//! event is scoped to.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the charity ledger contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// An asset was minted (`minted` topic) — by market mint or milestone reward.
    AssetMinted,
    /// An asset changed hands outside a sale (`xfer` topic).
    AssetTransferred,
    /// An asset was listed for sale (`listed` topic).
    AssetListed,
    /// A listed asset was bought (`sold` topic).
    AssetSold,
    /// A campaign was created (`camp_new` topic).
    CampaignCreated,
    /// A cash donation was received (`donated` topic).
    DonationReceived,
    /// An asset was donated to a campaign (`nft_don` topic).
    AssetDonated,
    /// A campaign was ended (`camp_end` topic).
    CampaignEnded,
    /// A milestone was registered (`ms_added` topic).
    MilestoneAdded,
    /// A milestone reward was claimed (`claimed` topic).
    MilestoneClaimed,
    /// The charity payout address changed (`charity` topic).
    CharitySet,
    /// The sale split percentage changed (`pct_set` topic).
    PercentageSet,
    /// The pause flag was toggled (`paused` topic).
    PauseToggled,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "minted" => Self::AssetMinted,
            "xfer" => Self::AssetTransferred,
            "listed" => Self::AssetListed,
            "sold" => Self::AssetSold,
            "camp_new" => Self::CampaignCreated,
            "donated" => Self::DonationReceived,
            "nft_don" => Self::AssetDonated,
            "camp_end" => Self::CampaignEnded,
            "ms_added" => Self::MilestoneAdded,
            "claimed" => Self::MilestoneClaimed,
            "charity" => Self::CharitySet,
            "pct_set" => Self::PercentageSet,
            "paused" => Self::PauseToggled,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssetMinted => "asset_minted",
            Self::AssetTransferred => "asset_transferred",
            Self::AssetListed => "asset_listed",
            Self::AssetSold => "asset_sold",
            Self::CampaignCreated => "campaign_created",
            Self::DonationReceived => "donation_received",
            Self::AssetDonated => "asset_donated",
            Self::CampaignEnded => "campaign_ended",
            Self::MilestoneAdded => "milestone_added",
            Self::MilestoneClaimed => "milestone_claimed",
            Self::CharitySet => "charity_set",
            Self::PercentageSet => "percentage_set",
            Self::PauseToggled => "pause_toggled",
            Self::Unknown => "unknown",
        }
    }

    /// True when the second topic element is the asset id rather than the
    /// campaign id.
    pub fn is_asset_scoped(&self) -> bool {
        matches!(
            self,
            Self::AssetMinted | Self::AssetTransferred | Self::AssetListed | Self::AssetSold
        )
    }
}

/// A fully decoded ledger event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub asset_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub asset_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
