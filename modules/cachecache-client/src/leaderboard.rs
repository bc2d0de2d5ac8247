//! Client for the leaderboard service: one-shot fetch plus a push stream of
//! full-board snapshots.

use async_stream::try_stream;
use futures::{pin_mut, Stream, StreamExt};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{ClientError, Result};
use crate::sse::SseDecoder;
use crate::{http_client, streaming_client};

/// One row of the board: player name and accumulated score.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeaderboardEntry {
    pub value: String,
    pub score: f64,
}

pub struct LeaderboardClient {
    client: reqwest::Client,
    base_url: String,
}

impl LeaderboardClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Current standings, best score first.
    pub async fn fetch(&self) -> Result<Vec<LeaderboardEntry>> {
        let url = format!("{}/leaderboard", self.base_url);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api { status: status.as_u16(), message });
        }
        Ok(resp.json().await?)
    }

    /// Push stream of board snapshots; the service sends the whole board on
    /// every score change. Ends when the connection drops.
    pub fn events(&self) -> impl Stream<Item = Result<Vec<LeaderboardEntry>>> + '_ {
        let client = streaming_client();
        let url = format!("{}/leaderboard/events", self.base_url);
        try_stream! {
            let response = client
                .get(&url)
                .header(reqwest::header::ACCEPT, "text/event-stream")
                .send()
                .await?;
            ClientError::ensure_success(response.status(), &format!("leaderboard stream refused for {url}"))?;
            info!(url = %url, "Connected to leaderboard stream");

            let mut decoder = SseDecoder::new();
            let body = response.bytes_stream();
            pin_mut!(body);
            while let Some(chunk) = body.next().await {
                let chunk = chunk?;
                for frame in decoder.feed(&chunk) {
                    match serde_json::from_str::<Vec<LeaderboardEntry>>(&frame) {
                        Ok(snapshot) => yield snapshot,
                        Err(e) => warn!(error = %e, "Dropping undecodable leaderboard frame"),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_matches_wire_shape() {
        let entries: Vec<LeaderboardEntry> =
            serde_json::from_str(r#"[{"value":"Fred","score":7.0},{"value":"alice","score":3.0}]"#)
                .unwrap();
        assert_eq!(entries[0].value, "Fred");
        assert!((entries[1].score - 3.0).abs() < f64::EPSILON);
    }
}
