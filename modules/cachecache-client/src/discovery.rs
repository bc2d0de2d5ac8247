//! Service discovery client.
//!
//! The discovery endpoint returns a JSON object of logical service name to
//! base URL. The result is a plain [`ServiceMap`] value handed to whoever
//! needs it — resolved locations are never cached in process-wide state.

use cachecache_common::ServiceMap;

use crate::error::{ClientError, Result};
use crate::http_client;

pub struct DiscoveryClient {
    client: reqwest::Client,
    base_url: String,
}

impl DiscoveryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch(&self) -> Result<ServiceMap> {
        let url = format!("{}/discovery", self.base_url);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api { status: status.as_u16(), message });
        }
        Ok(resp.json().await?)
    }
}
