//! Client for the game service's control endpoint.

use tracing::info;

use crate::error::{ClientError, Result};
use crate::http_client;

pub struct GameClient {
    client: reqwest::Client,
    base_url: String,
}

impl GameClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Ask the game service to start a new round of hide-and-seek. The
    /// resulting `NEW_GAME` arrives over the event stream, not this call.
    pub async fn start(&self) -> Result<()> {
        let url = format!("{}/games", self.base_url);
        let resp = self.client.post(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api { status: status.as_u16(), message });
        }
        info!("Requested a new game");
        Ok(())
    }
}
