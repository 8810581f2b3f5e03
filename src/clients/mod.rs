pub mod archive;
pub mod de;
pub mod wordpress;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::GeneralConfig;
use crate::error::SourceError;

/// Builds the HTTP client shared by every source.
pub fn build_http_client(general: &GeneralConfig) -> Result<Client, SourceError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(general.request_timeout_seconds))
        .user_agent(general.user_agent.as_str())
        .build()?;

    Ok(client)
}

/// Turns a non-2xx response into [`SourceError::Status`], keeping the body
/// for diagnostics.
pub async fn check_response(response: Response) -> Result<Response, SourceError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    Err(SourceError::Status { status, message })
}

/// Reads the body and decodes it; transport failures stay `Http`, decode
/// failures become `Shape`.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, SourceError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(SourceError::shape)
}
