//! The vending machine engine.
//!
//! The machine accepts coins toward a running balance, dispenses products
//! when the balance covers the price, returns change from its coin inventory,
//! and supports cancellation and operator reset/reporting.
//! Also supports an async stream of operations.

use std::collections::HashMap;

use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::Amount;
use crate::model::{Coin, Op, Product};

mod change;

mod state;
pub use state::MachineStats;

mod error;
pub use error::{InsufficientChange, MachineError, SelectError};

/// The vending machine engine.
///
/// Owns the coin inventory, the product stock and the state of the current
/// transaction. Every operation either completes or leaves the machine
/// exactly as it was.
pub struct Machine {
    /// Coins physically held, available to be returned as change.
    coins: HashMap<Coin, u32>,
    stock: HashMap<Product, u32>,
    /// Coins inserted since the last completed or cancelled transaction.
    inserted: Vec<Coin>,
    balance: Amount,
}

/// Public API
impl Machine {
    /// A machine stocked with the fixed initial coin and product quantities.
    pub fn new() -> Self {
        Self {
            coins: Coin::ALL.iter().map(|c| (*c, c.initial_count())).collect(),
            stock: Product::ALL
                .iter()
                .map(|p| (*p, p.initial_stock()))
                .collect(),
            inserted: Vec::new(),
            balance: Amount::ZERO,
        }
    }

    /// Run the machine over the given operation stream.
    pub async fn run(&mut self, mut stream: impl Stream<Item = Op> + Unpin) {
        while let Some(op) = stream.next().await {
            // a rejected selection should not stop the machine, so we just
            // ignore the application result
            let _ = self.apply(op);
        }
    }

    /// Apply a single operation on top of the current machine state,
    /// logging the outcome.
    pub fn apply(&mut self, op: Op) -> Result<(), MachineError> {
        match op {
            Op::InsertCoin(coin) => {
                let balance = self.insert_coin(coin);
                info!(coin = %coin, balance = %balance, "coin inserted");
            }
            Op::SelectProduct(product) => match self.select_product(product) {
                Ok(coins) => {
                    info!(product = %product, change = ?coins, "product dispensed");
                }
                Err(e) => {
                    info!(product = %product, reason = %e, "selection rejected");
                    return Err(e.into());
                }
            },
            Op::Cancel => {
                let returned = self.cancel();
                if returned.is_empty() {
                    info!("nothing to cancel");
                } else {
                    info!(returned = ?returned, "transaction cancelled");
                }
            }
            Op::AdminReset => {
                let held = self.admin_reset();
                info!(previous_total_cash = %held, "machine reset");
            }
            Op::Stats => {
                let stats = self.stats();
                info!(
                    coins = ?stats.coins,
                    products = ?stats.products,
                    total_cash = %stats.total_cash,
                    "machine stats"
                );
            }
        }
        Ok(())
    }

    /// Accept a coin into the current transaction and return the new balance.
    ///
    /// Every enumerated coin is accepted; this cannot fail.
    pub fn insert_coin(&mut self, coin: Coin) -> Amount {
        self.inserted.push(coin);
        *self.coins.entry(coin).or_default() += 1;
        self.balance += coin.value();
        self.balance
    }

    /// Attempt to buy `product` with the current balance.
    ///
    /// On success the change coins (empty on exact payment) are returned and
    /// the transaction is complete. On [`SelectError::OutOfStock`] and
    /// [`SelectError::InsufficientBalance`] nothing changes. On
    /// [`SelectError::ChangeUnavailable`] the product has been restocked and
    /// all inserted coins refunded before the error is returned.
    pub fn select_product(&mut self, product: Product) -> Result<Vec<Coin>, SelectError> {
        if self.stock.get(&product).copied().unwrap_or(0) == 0 {
            return Err(SelectError::OutOfStock(product));
        }
        if self.balance < product.price() {
            return Err(SelectError::InsufficientBalance {
                product,
                price: product.price(),
                balance: self.balance,
            });
        }
        self.dispense(product)
    }

    /// Abort the current transaction, handing back the inserted coins.
    ///
    /// Returns an empty list when there is nothing to cancel, so calling it
    /// twice in a row is harmless.
    pub fn cancel(&mut self) -> Vec<Coin> {
        if self.inserted.is_empty() {
            return Vec::new();
        }
        // Each inserted coin was counted into the inventory on insertion,
        // so these decrements cannot underflow.
        for coin in &self.inserted {
            *self.coins.entry(*coin).or_default() -= 1;
        }
        self.balance = Amount::ZERO;
        std::mem::take(&mut self.inserted)
    }

    /// Operator action: restore the fixed initial coin and product
    /// quantities, dropping any in-flight transaction. Returns the total
    /// cash held before the reset.
    pub fn admin_reset(&mut self) -> Amount {
        let held = self.total_cash();
        *self = Machine::new();
        held
    }

    /// Balance of the current transaction, in minor units.
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Total value of all coins held by the machine.
    pub fn total_cash(&self) -> Amount {
        Coin::ALL
            .iter()
            .map(|c| c.value() * self.coins.get(c).copied().unwrap_or(0))
            .sum()
    }

    /// Read-only snapshot of inventory, stock and total cash.
    pub fn stats(&self) -> MachineStats {
        MachineStats {
            coins: Coin::ALL
                .iter()
                .map(|c| (*c, self.coins.get(c).copied().unwrap_or(0)))
                .collect(),
            products: Product::ALL
                .iter()
                .map(|p| (*p, self.stock.get(p).copied().unwrap_or(0)))
                .collect(),
            total_cash: self.total_cash(),
        }
    }
}

/// Private API
impl Machine {
    /// Success path of [`Machine::select_product`]: stock and balance checks
    /// have already passed.
    fn dispense(&mut self, product: Product) -> Result<Vec<Coin>, SelectError> {
        *self.stock.entry(product).or_default() -= 1;
        let owed = self.balance - product.price();

        if owed == Amount::ZERO {
            // Exact payment: the inserted coins are simply kept.
            self.balance = Amount::ZERO;
            self.inserted.clear();
            return Ok(Vec::new());
        }

        match change::make_change(&mut self.coins, owed) {
            Ok(coins) => {
                self.balance = Amount::ZERO;
                self.inserted.clear();
                Ok(coins)
            }
            Err(e) => {
                warn!(
                    product = %product,
                    owed = %e.owed,
                    short = %e.short,
                    "cannot make exact change, rolling back dispense"
                );
                *self.stock.entry(product).or_default() += 1;
                let refunded = self.cancel();
                Err(SelectError::ChangeUnavailable { refunded })
            }
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
