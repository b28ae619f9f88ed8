#![allow(dead_code)]

extern crate std;

use crate::types::{Campaign, CampaignReport, Milestone};

/// INV-1: A campaign's raised total must never decrease.
pub fn assert_raised_monotonic(raised_before: i128, raised_after: i128) {
    assert!(
        raised_after >= raised_before,
        "INV-1 violated: raised decreased from {} to {}",
        raised_before,
        raised_after
    );
}

/// INV-2: After a donation of `amount`, raised must increase by exactly
/// `amount`.
pub fn assert_donation_invariant(raised_before: i128, raised_after: i128, amount: i128) {
    assert_eq!(
        raised_after,
        raised_before + amount,
        "INV-2 violated: donation invariant broken: {} + {} != {}",
        raised_before,
        amount,
        raised_after
    );
}

/// INV-3: A campaign's raised total must never be negative and its goal
/// must be positive.
pub fn assert_campaign_amounts_valid(campaign: &Campaign) {
    assert!(
        campaign.raised >= 0,
        "INV-3 violated: campaign {} has negative raised ({})",
        campaign.id,
        campaign.raised
    );
    assert!(
        campaign.goal > 0,
        "INV-3 violated: campaign {} has non-positive goal ({})",
        campaign.id,
        campaign.goal
    );
}

/// INV-4: A report must agree with the campaign record it summarizes,
/// including the floor goal-percentage arithmetic.
pub fn assert_report_consistent(campaign: &Campaign, report: &CampaignReport) {
    assert_eq!(report.campaign_id, campaign.id, "INV-4 violated: id mismatch");
    assert_eq!(
        report.raised, campaign.raised,
        "INV-4 violated: raised mismatch"
    );
    assert_eq!(
        report.nft_count,
        campaign.nfts.len(),
        "INV-4 violated: nft count mismatch"
    );
    assert_eq!(
        report.active, campaign.active,
        "INV-4 violated: active flag mismatch"
    );
    assert_eq!(
        report.goal_percentage,
        campaign.raised * 100 / campaign.goal,
        "INV-4 violated: goal percentage is not floor(raised * 100 / goal)"
    );
}

/// INV-5: A milestone's reached flag flips true at most once and never
/// flips back.
pub fn assert_milestone_reached_monotonic(before: &Milestone, after: &Milestone) {
    assert!(
        !before.reached || after.reached,
        "INV-5 violated: milestone reached flag flipped back to false"
    );
}

/// INV-6: Entity ids are sequential starting at 1.
pub fn assert_sequential_ids_from_one(ids: &[u64]) {
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(
            *id,
            i as u64 + 1,
            "INV-6 violated: expected id {}, got {}",
            i + 1,
            id
        );
    }
}

/// INV-7: The charity split of a sale is floor(price * pct / 100).
pub fn assert_sale_split(total_before: i128, total_after: i128, price: i128, pct: u32) {
    assert_eq!(
        total_after,
        total_before + price * pct as i128 / 100,
        "INV-7 violated: sale split accounting broken (price {}, pct {})",
        price,
        pct
    );
}
