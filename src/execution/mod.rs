/// Execution Layer
///
/// This layer is responsible for:
/// - Turning configuration into a ready pinger (startup sequence)
/// - Building, signing and submitting the epoch triggers
/// - Pacing ticks through an injectable clock

pub mod clock;
pub mod config;
pub mod epoch_pinger;


pub use clock::{Clock, TokioClock};
pub use config::{ContractConfig, PingerConfig, PingerConfigRoot};
pub use epoch_pinger::{EpochPinger, EpochPingerBuilder, EpochTick};
