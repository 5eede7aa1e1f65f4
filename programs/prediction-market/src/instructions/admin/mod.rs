pub mod initialize;
pub mod create_market;
pub mod pause;
pub mod update_config;

pub use initialize::*;
pub use create_market::*;
pub use pause::*;
pub use update_config::*;
