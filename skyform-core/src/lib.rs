pub mod airport;
pub mod destinations;
pub mod format;
pub mod source;

pub use airport::{
    normalize_airports, parse_airport_payload, Airport, AirportConnection, RawAirport,
    RawAirportConnection,
};
pub use destinations::{filter_destinations, DestinationFilter};
pub use source::{AirportSource, FetchError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid airport payload: {0}")]
    InvalidPayload(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
