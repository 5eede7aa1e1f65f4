pub mod finalize_market;
pub mod claim_winnings;

pub use finalize_market::*;
pub use claim_winnings::*;
