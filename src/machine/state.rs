use crate::Amount;
use crate::model::{Coin, Product};

/// Read-only snapshot of what the machine currently holds.
///
/// Rows come back in a fixed order (coins ascending by value, products in
/// catalog order) so reports are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineStats {
    pub coins: Vec<(Coin, u32)>,
    pub products: Vec<(Product, u32)>,
    /// Sum over the coin inventory of count times denomination value.
    pub total_cash: Amount,
}
