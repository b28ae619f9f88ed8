//! # Asset Registry core
//!
//! The mint primitive shared by the public `mint_asset` entry point and the
//! Milestone Engine's reward issuance. The milestone code never touches
//! asset storage directly — it calls [`mint`] and trusts the returned id,
//! keeping the cross-component edge explicit and checkable at compile time.

use soroban_sdk::{Address, Env, String};

use crate::events::{self, AssetMinted};
use crate::storage;
use crate::types::Asset;

/// Allocate the next asset id, create the record owned by `owner` with no
/// listing price, and emit the `minted` event. Ids start at 1 and are never
/// reused.
pub fn mint(env: &Env, owner: &Address, uri: String, category: String) -> u64 {
    let id = storage::next_asset_id(env);

    let asset = Asset {
        id,
        owner: owner.clone(),
        uri: uri.clone(),
        category: category.clone(),
        price: None,
    };
    storage::save_asset(env, &asset);

    events::asset_minted(
        env,
        AssetMinted {
            asset_id: id,
            owner: owner.clone(),
            uri,
            category,
        },
    );

    id
}
