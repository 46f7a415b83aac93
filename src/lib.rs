pub mod amount;
pub mod csv;
pub mod machine;
pub mod model;

pub use amount::Amount;
pub use machine::Machine;
pub use model::{Coin, Op, Product};
