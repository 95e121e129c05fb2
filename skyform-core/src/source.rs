use async_trait::async_trait;

use crate::airport::RawAirport;

/// Remote collaborator that supplies the airport directory.
#[async_trait]
pub trait AirportSource: Send + Sync {
    /// Fetch every origin airport together with its connections.
    async fn fetch_airports(&self) -> Result<Vec<RawAirport>, FetchError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Airport source unreachable: {0}")]
    Transport(String),

    #[error("Airport source timed out")]
    Timeout,

    #[error("Airport source responded with status {0}")]
    Status(u16),

    #[error("Airport source returned an invalid payload: {0}")]
    Decode(String),
}

impl From<crate::CoreError> for FetchError {
    fn from(err: crate::CoreError) -> Self {
        FetchError::Decode(err.to_string())
    }
}
