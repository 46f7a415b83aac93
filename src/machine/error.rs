//! Error types for machine operations.

use thiserror::Error;

use crate::Amount;
use crate::model::{Coin, Product};

/// Top-level error returned by [`Machine::apply`](super::Machine::apply).
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("selection failed: {0}")]
    Select(#[from] SelectError),
}

/// Why a product selection did not dispense.
///
/// None of these leave the machine inconsistent: `OutOfStock` and
/// `InsufficientBalance` change nothing, and `ChangeUnavailable` is reported
/// only after the whole transaction has been rolled back.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("{0} is out of stock")]
    OutOfStock(Product),

    #[error("insufficient balance: {product} costs {price}, balance is {balance}")]
    InsufficientBalance {
        product: Product,
        price: Amount,
        balance: Amount,
    },

    #[error("cannot make exact change; transaction cancelled, {} coin(s) refunded", refunded.len())]
    ChangeUnavailable {
        /// The inserted coins handed back by the rollback.
        refunded: Vec<Coin>,
    },
}

/// Signal from the change algorithm that the inventory cannot zero out the
/// amount owed. Always absorbed by the dispense rollback, never surfaced
/// past [`SelectError::ChangeUnavailable`].
#[derive(Debug, Error)]
#[error("insufficient coins for change: owed {owed}, short by {short}")]
pub struct InsufficientChange {
    pub owed: Amount,
    pub short: Amount,
}
