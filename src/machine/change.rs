//! Greedy change making over the machine's coin inventory.

use std::collections::HashMap;

use crate::Amount;
use crate::model::Coin;

use super::error::InsufficientChange;

/// Remove coins from `inventory` summing exactly to `owed`, largest
/// denomination first, and return them in the order taken.
///
/// The inventory is cloned up front; on failure the clone is written back so
/// the caller observes no mutation at all. On success the decrements stand
/// and the clone is dropped.
///
/// Greedy is deliberately not optimal: it never backtracks, so it can fail
/// even when some combination of held coins would work (e.g. owed 0.60 with
/// one fifty and three twenties takes the fifty first and then cannot cover
/// the remaining 0.10). Callers rely on this exact behavior.
pub(super) fn make_change(
    inventory: &mut HashMap<Coin, u32>,
    owed: Amount,
) -> Result<Vec<Coin>, InsufficientChange> {
    let snapshot = inventory.clone();

    let mut remaining = owed;
    let mut change = Vec::new();
    for coin in Coin::ALL.iter().rev() {
        while remaining >= coin.value() {
            let count = inventory.entry(*coin).or_default();
            if *count == 0 {
                break;
            }
            *count -= 1;
            remaining -= coin.value();
            change.push(*coin);
        }
        if remaining == Amount::ZERO {
            break;
        }
    }

    if remaining > Amount::ZERO {
        *inventory = snapshot;
        return Err(InsufficientChange {
            owed,
            short: remaining,
        });
    }
    Ok(change)
}
