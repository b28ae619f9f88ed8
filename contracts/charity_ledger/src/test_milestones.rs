extern crate std;

use soroban_sdk::{testutils::Address as _, Address, Env, String};

use crate::invariants;
use crate::{CharityLedger, CharityLedgerClient, Error};

fn setup() -> (Env, CharityLedgerClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CharityLedger, ());
    let client = CharityLedgerClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    let charity = Address::generate(&env);
    client.init(&admin, &charity);
    (env, client, admin)
}

fn s(env: &Env, text: &str) -> String {
    String::from_str(env, text)
}

fn create_campaign(env: &Env, client: &CharityLedgerClient, admin: &Address, goal: i128) -> u64 {
    client.create_campaign(
        admin,
        &s(env, "School Build"),
        &s(env, "Classrooms and books"),
        &goal,
        &5_000u32,
    )
}

fn add_milestone(
    env: &Env,
    client: &CharityLedgerClient,
    admin: &Address,
    campaign_id: u64,
    milestone_id: u64,
    target: i128,
) {
    client.add_campaign_milestone(
        admin,
        &campaign_id,
        &milestone_id,
        &s(env, "First funding tier"),
        &target,
        &s(env, "ipfs://reward"),
    );
}

#[test]
fn add_milestone_stores_record() {
    let (env, client, admin) = setup();

    let campaign_id = create_campaign(&env, &client, &admin, 10_000);
    add_milestone(&env, &client, &admin, campaign_id, 1, 2_500);

    let milestone = client.get_campaign_milestone(&campaign_id, &1).unwrap();
    assert_eq!(milestone.target, 2_500);
    assert_eq!(milestone.reward_uri, s(&env, "ipfs://reward"));
    assert!(!milestone.reached);
}

#[test]
fn add_milestone_by_non_admin_fails() {
    let (env, client, admin) = setup();
    let mallory = Address::generate(&env);

    let campaign_id = create_campaign(&env, &client, &admin, 10_000);

    assert_eq!(
        client.try_add_campaign_milestone(
            &mallory,
            &campaign_id,
            &1u64,
            &s(&env, "x"),
            &1i128,
            &s(&env, "ipfs://x")
        ),
        Err(Ok(Error::OwnerOnly))
    );
    assert_eq!(client.get_campaign_milestone(&campaign_id, &1), None);
}

#[test]
fn add_milestone_to_unknown_campaign_fails() {
    let (env, client, admin) = setup();

    assert_eq!(
        client.try_add_campaign_milestone(
            &admin,
            &999u64,
            &1u64,
            &s(&env, "x"),
            &1i128,
            &s(&env, "ipfs://x")
        ),
        Err(Ok(Error::CampaignNotFound))
    );
}

/// Re-registering an existing (campaign, milestone) key is rejected so a
/// claimed milestone can never be re-armed.
#[test]
fn add_duplicate_milestone_fails() {
    let (env, client, admin) = setup();

    let campaign_id = create_campaign(&env, &client, &admin, 10_000);
    add_milestone(&env, &client, &admin, campaign_id, 1, 2_500);

    assert_eq!(
        client.try_add_campaign_milestone(
            &admin,
            &campaign_id,
            &1u64,
            &s(&env, "again"),
            &9_999i128,
            &s(&env, "ipfs://other")
        ),
        Err(Ok(Error::MilestoneExists))
    );
    // The original registration is untouched.
    let milestone = client.get_campaign_milestone(&campaign_id, &1).unwrap();
    assert_eq!(milestone.target, 2_500);
}

#[test]
fn unknown_milestone_query_returns_none() {
    let (env, client, admin) = setup();

    let campaign_id = create_campaign(&env, &client, &admin, 10_000);
    assert_eq!(client.get_campaign_milestone(&campaign_id, &7), None);
}

#[test]
fn claim_before_target_fails() {
    let (env, client, admin) = setup();
    let donor = Address::generate(&env);

    let campaign_id = create_campaign(&env, &client, &admin, 10_000);
    add_milestone(&env, &client, &admin, campaign_id, 1, 2_500);
    client.donate_to_campaign(&donor, &campaign_id, &2_499);

    assert_eq!(
        client.try_check_and_claim_milestone_reward(&donor, &campaign_id, &1),
        Err(Ok(Error::MilestoneNotReached))
    );
    assert!(!client.get_campaign_milestone(&campaign_id, &1).unwrap().reached);
    assert_eq!(client.get_user_rewards(&donor).len(), 0);
}

#[test]
fn claim_unknown_milestone_fails() {
    let (env, client, admin) = setup();
    let donor = Address::generate(&env);

    let campaign_id = create_campaign(&env, &client, &admin, 10_000);

    assert_eq!(
        client.try_check_and_claim_milestone_reward(&donor, &campaign_id, &9),
        Err(Ok(Error::MilestoneNotFound))
    );
}

/// When the raised total meets the target, claiming flips the reached flag
/// and mints a reward asset owned by the claimer.
#[test]
fn claim_at_target_mints_reward() {
    let (env, client, admin) = setup();
    let donor = Address::generate(&env);

    let campaign_id = create_campaign(&env, &client, &admin, 10_000);
    add_milestone(&env, &client, &admin, campaign_id, 1, 2_500);

    let before = client.get_campaign_milestone(&campaign_id, &1).unwrap();
    client.donate_to_campaign(&donor, &campaign_id, &2_500);

    let reward_id = client.check_and_claim_milestone_reward(&donor, &campaign_id, &1);

    let after = client.get_campaign_milestone(&campaign_id, &1).unwrap();
    invariants::assert_milestone_reached_monotonic(&before, &after);
    assert!(after.reached);

    assert_eq!(client.get_owner(&reward_id), Some(donor.clone()));
    assert_eq!(client.get_price(&reward_id), None);

    let rewards = client.get_user_rewards(&donor);
    assert_eq!(rewards.len(), 1);
    assert_eq!(rewards.get(0), Some(reward_id));
}

/// The second claim must fail and must not mint: the asset id right after
/// the first reward stays unallocated and the reward list keeps length 1.
#[test]
fn second_claim_fails_and_mints_nothing() {
    let (env, client, admin) = setup();
    let donor = Address::generate(&env);

    let campaign_id = create_campaign(&env, &client, &admin, 10_000);
    add_milestone(&env, &client, &admin, campaign_id, 1, 1_000);
    client.donate_to_campaign(&donor, &campaign_id, &5_000);

    let reward_id = client.check_and_claim_milestone_reward(&donor, &campaign_id, &1);

    assert_eq!(
        client.try_check_and_claim_milestone_reward(&donor, &campaign_id, &1),
        Err(Ok(Error::MilestoneAlreadyClaimed))
    );
    assert_eq!(client.get_user_rewards(&donor).len(), 1);
    assert_eq!(client.get_owner(&(reward_id + 1)), None);

    // Nor can anyone else claim it.
    let other = Address::generate(&env);
    assert_eq!(
        client.try_check_and_claim_milestone_reward(&other, &campaign_id, &1),
        Err(Ok(Error::MilestoneAlreadyClaimed))
    );
}

/// Asset donations count toward milestone targets through the same raised
/// total as cash.
#[test]
fn nft_donation_value_reaches_milestone() {
    let (env, client, admin) = setup();
    let donor = Address::generate(&env);

    let campaign_id = create_campaign(&env, &client, &admin, 10_000);
    add_milestone(&env, &client, &admin, campaign_id, 1, 3_000);

    let asset_id = client.mint_asset(&donor, &s(&env, "ipfs://piece"), &s(&env, "art"));
    client.list_for_sale(&donor, &asset_id, &3_000);
    client.donate_asset_to_campaign(&donor, &campaign_id, &asset_id);

    let reward_id = client.check_and_claim_milestone_reward(&donor, &campaign_id, &1);
    assert_eq!(client.get_owner(&reward_id), Some(donor));
}

#[test]
fn milestones_claim_independently() {
    let (env, client, admin) = setup();
    let donor = Address::generate(&env);

    let campaign_id = create_campaign(&env, &client, &admin, 10_000);
    add_milestone(&env, &client, &admin, campaign_id, 1, 1_000);
    add_milestone(&env, &client, &admin, campaign_id, 2, 4_000);

    client.donate_to_campaign(&donor, &campaign_id, &1_500);

    let first = client.check_and_claim_milestone_reward(&donor, &campaign_id, &1);
    assert_eq!(
        client.try_check_and_claim_milestone_reward(&donor, &campaign_id, &2),
        Err(Ok(Error::MilestoneNotReached))
    );

    client.donate_to_campaign(&donor, &campaign_id, &3_000);
    let second = client.check_and_claim_milestone_reward(&donor, &campaign_id, &2);

    let rewards = client.get_user_rewards(&donor);
    assert_eq!(rewards.len(), 2);
    assert_eq!(rewards.get(0), Some(first));
    assert_eq!(rewards.get(1), Some(second));
}

/// Milestone rewards and market mints draw from the same id sequence —
/// the registry allocates ids globally, never per component.
#[test]
fn reward_ids_share_the_asset_sequence() {
    let (env, client, admin) = setup();
    let donor = Address::generate(&env);

    let market_id = client.mint_asset(&donor, &s(&env, "ipfs://a"), &s(&env, "art"));

    let campaign_id = create_campaign(&env, &client, &admin, 10_000);
    add_milestone(&env, &client, &admin, campaign_id, 1, 100);
    client.donate_to_campaign(&donor, &campaign_id, &100);
    let reward_id = client.check_and_claim_milestone_reward(&donor, &campaign_id, &1);

    assert_eq!(reward_id, market_id + 1);
}

/// Ending a campaign freezes donations but already-earned milestones stay
/// claimable — the raised total that unlocked them does not vanish.
#[test]
fn claim_still_works_after_campaign_ends() {
    let (env, client, admin) = setup();
    let donor = Address::generate(&env);

    let campaign_id = create_campaign(&env, &client, &admin, 10_000);
    add_milestone(&env, &client, &admin, campaign_id, 1, 500);
    client.donate_to_campaign(&donor, &campaign_id, &500);
    client.end_campaign(&admin, &campaign_id);

    let reward_id = client.check_and_claim_milestone_reward(&donor, &campaign_id, &1);
    assert_eq!(client.get_owner(&reward_id), Some(donor));
}

#[test]
fn rewards_accumulate_across_campaigns() {
    let (env, client, admin) = setup();
    let donor = Address::generate(&env);

    let camp_a = create_campaign(&env, &client, &admin, 1_000);
    let camp_b = create_campaign(&env, &client, &admin, 1_000);
    add_milestone(&env, &client, &admin, camp_a, 1, 100);
    add_milestone(&env, &client, &admin, camp_b, 1, 100);

    client.donate_to_campaign(&donor, &camp_a, &100);
    client.donate_to_campaign(&donor, &camp_b, &100);

    client.check_and_claim_milestone_reward(&donor, &camp_a, &1);
    client.check_and_claim_milestone_reward(&donor, &camp_b, &1);

    assert_eq!(client.get_user_rewards(&donor).len(), 2);
}

#[test]
fn rewards_list_is_empty_for_unknown_user() {
    let (env, client, _admin) = setup();
    let nobody = Address::generate(&env);

    assert_eq!(client.get_user_rewards(&nobody).len(), 0);
}

#[test]
fn claim_is_paused_with_the_rest_of_the_ledger() {
    let (env, client, admin) = setup();
    let donor = Address::generate(&env);

    let campaign_id = create_campaign(&env, &client, &admin, 10_000);
    add_milestone(&env, &client, &admin, campaign_id, 1, 100);
    client.donate_to_campaign(&donor, &campaign_id, &100);

    client.toggle_pause(&admin);
    assert_eq!(
        client.try_check_and_claim_milestone_reward(&donor, &campaign_id, &1),
        Err(Ok(Error::ContractPaused))
    );

    client.toggle_pause(&admin);
    let reward_id = client.check_and_claim_milestone_reward(&donor, &campaign_id, &1);
    assert_eq!(client.get_owner(&reward_id), Some(donor));
}
