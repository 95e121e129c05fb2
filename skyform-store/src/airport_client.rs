use async_trait::async_trait;
use serde_json::Value;
use skyform_core::airport::parse_airport_payload;
use skyform_core::{AirportSource, FetchError, RawAirport};
use tracing::{error, info};

use crate::app_config::SourceConfig;

/// `AirportSource` backed by the origins-with-connections HTTP endpoint.
pub struct HttpAirportSource {
    client: reqwest::Client,
    url: String,
    tenant_identifier: String,
}

impl HttpAirportSource {
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: endpoint_url(&config.base_url, &config.locale),
            tenant_identifier: config.tenant_identifier.clone(),
        })
    }
}

fn endpoint_url(base_url: &str, locale: &str) -> String {
    format!(
        "{}/Airport/OriginsWithConnections/{}",
        base_url.trim_end_matches('/'),
        locale
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_decode() {
        FetchError::Decode(err.to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}

fn check_status(status: reqwest::StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status(status.as_u16()))
    }
}

fn decode_body(body: &[u8]) -> Result<Vec<RawAirport>, FetchError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(parse_airport_payload(value)?)
}

#[async_trait]
impl AirportSource for HttpAirportSource {
    async fn fetch_airports(&self) -> Result<Vec<RawAirport>, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header("Tenant-Identifier", &self.tenant_identifier)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if let Err(e) = check_status(status) {
            error!("Airport source {} responded with {}", self.url, status);
            return Err(e);
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let records = decode_body(&body)?;
        info!("Airport source returned {} airports", records.len());

        Ok(records)
    }
}
