pub mod open_dispute;
pub mod settle_dispute;

pub use open_dispute::*;
pub use settle_dispute::*;
