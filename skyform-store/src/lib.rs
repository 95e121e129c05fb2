pub mod app_config;
pub mod airport_client;
pub mod clock;
pub mod directory;

pub use airport_client::HttpAirportSource;
pub use clock::{Clock, ManualClock, SystemClock};
pub use directory::{AirportDirectory, DirectoryError, LoadStatus};
