pub mod buy_shares;
pub mod sell_shares;

pub use buy_shares::*;
pub use sell_shares::*;
