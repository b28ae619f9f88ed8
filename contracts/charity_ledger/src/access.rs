//! # Identity & Access
//!
//! Gate predicates applied at the top of every mutating entry point.
//!
//! Soroban's host authenticates the caller (`require_auth`); this module
//! authorizes the call against the ledger's configuration and the target
//! entity:
//!
//! * **admin gate** — administrator-only operations (campaign lifecycle,
//!   milestone registration, global configuration);
//! * **owner gate** — asset operations restricted to the current owner;
//! * **pause gate** — every mutating operation except administration, so the
//!   administrator can always unpause.
//!
//! Gates return the operation's numeric error code on refusal; entry points
//! propagate it with `?`, rolling the call back.

use soroban_sdk::{Address, Env};

use crate::storage;
use crate::types::Asset;
use crate::Error;

/// Fail with `OwnerOnly` (100) unless `caller` is the administrator.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    if *caller != storage::get_admin(env) {
        return Err(Error::OwnerOnly);
    }
    Ok(())
}

/// Fail with `NotTokenOwner` (101) unless `caller` owns `asset`.
pub fn require_asset_owner(caller: &Address, asset: &Asset) -> Result<(), Error> {
    if *caller != asset.owner {
        return Err(Error::NotTokenOwner);
    }
    Ok(())
}

/// Fail with `ContractPaused` (107) while the global pause flag is set.
///
/// Administration entry points skip this gate.
pub fn require_not_paused(env: &Env) -> Result<(), Error> {
    if storage::is_paused(env) {
        return Err(Error::ContractPaused);
    }
    Ok(())
}
