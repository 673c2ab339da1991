pub mod config_loader;
pub mod constants;

pub use config_loader::*;
pub use constants::*;
