pub mod admin;
pub mod liquidity;
pub mod trading;
pub mod oracle;
pub mod dispute;
pub mod settlement;

pub use admin::*;
pub use liquidity::*;
pub use trading::*;
pub use oracle::*;
pub use dispute::*;
pub use settlement::*;
