pub mod platform;
pub mod market;
pub mod liquidity;
pub mod position;
pub mod dispute;

pub use platform::*;
pub use market::*;
pub use liquidity::*;
pub use position::*;
pub use dispute::*;
