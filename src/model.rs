//! Core domain types for the vending machine engine.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Amount;

/// An accepted coin denomination, totally ordered by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Coin {
    FiveCents,
    TenCents,
    TwentyCents,
    FiftyCents,
    OneDollar,
    TwoDollars,
}

impl Coin {
    /// Every denomination, in ascending value order.
    pub const ALL: [Coin; 6] = [
        Coin::FiveCents,
        Coin::TenCents,
        Coin::TwentyCents,
        Coin::FiftyCents,
        Coin::OneDollar,
        Coin::TwoDollars,
    ];

    /// Monetary value in minor units.
    pub const fn value(self) -> Amount {
        let minor = match self {
            Coin::FiveCents => 5,
            Coin::TenCents => 10,
            Coin::TwentyCents => 20,
            Coin::FiftyCents => 50,
            Coin::OneDollar => 100,
            Coin::TwoDollars => 200,
        };
        Amount::from_minor(minor)
    }

    /// How many of this denomination a freshly stocked machine holds.
    pub const fn initial_count(self) -> u32 {
        match self {
            Coin::FiveCents | Coin::TenCents | Coin::TwentyCents | Coin::FiftyCents => 10,
            Coin::OneDollar | Coin::TwoDollars => 5,
        }
    }

    /// Canonical selector name, as used in session files.
    pub const fn name(self) -> &'static str {
        match self {
            Coin::FiveCents => "five_cents",
            Coin::TenCents => "ten_cents",
            Coin::TwentyCents => "twenty_cents",
            Coin::FiftyCents => "fifty_cents",
            Coin::OneDollar => "one_dollar",
            Coin::TwoDollars => "two_dollars",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rejection of a coin selector that names no known denomination.
#[derive(Debug, Error)]
#[error("unrecognized coin '{0}'")]
pub struct ParseCoinError(pub String);

impl FromStr for Coin {
    type Err = ParseCoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "five_cents" => Ok(Coin::FiveCents),
            "ten_cents" => Ok(Coin::TenCents),
            "twenty_cents" => Ok(Coin::TwentyCents),
            "fifty_cents" => Ok(Coin::FiftyCents),
            "one_dollar" => Ok(Coin::OneDollar),
            "two_dollars" => Ok(Coin::TwoDollars),
            other => Err(ParseCoinError(other.to_string())),
        }
    }
}

/// A catalog entry: something the machine can sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    Coke,
    Pepsi,
    Water,
}

impl Product {
    /// The whole catalog, in display order.
    pub const ALL: [Product; 3] = [Product::Coke, Product::Pepsi, Product::Water];

    pub const fn price(self) -> Amount {
        let minor = match self {
            Product::Coke => 150,
            Product::Pepsi => 145,
            Product::Water => 90,
        };
        Amount::from_minor(minor)
    }

    /// How many units a freshly stocked machine holds.
    pub const fn initial_stock(self) -> u32 {
        5
    }

    pub const fn name(self) -> &'static str {
        match self {
            Product::Coke => "coke",
            Product::Pepsi => "pepsi",
            Product::Water => "water",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rejection of a product selector that names no catalog entry.
#[derive(Debug, Error)]
#[error("unrecognized product '{0}'")]
pub struct ParseProductError(pub String);

impl FromStr for Product {
    type Err = ParseProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coke" => Ok(Product::Coke),
            "pepsi" => Ok(Product::Pepsi),
            "water" => Ok(Product::Water),
            other => Err(ParseProductError(other.to_string())),
        }
    }
}

/// An operation representing the possible inputs of the machine.
#[derive(Debug, Clone)]
pub enum Op {
    /// Add a coin to the current transaction.
    InsertCoin(Coin),
    /// Attempt to buy a product with the current balance.
    SelectProduct(Product),
    /// Abort the current transaction and take the inserted coins back.
    Cancel,
    /// Operator action: empty and restock the machine.
    AdminReset,
    /// Operator action: report inventory, stock and total cash.
    Stats,
}
