//! Live game event subscription.
//!
//! Wraps the SSE transport into an ordered stream of parsed [`GameEvent`]s.
//! Keep-alive `PING` frames and frames that fail to parse are filtered here,
//! so consumers only ever see meaningful domain events in arrival order.
//! Reconnection is a transport concern and lives in [`GameEventSource::subscribe`];
//! the reducer downstream never knows a reconnect happened.

use std::time::Duration;

use async_stream::{stream, try_stream};
use futures::{pin_mut, Stream, StreamExt};
use tracing::{debug, info, warn};

use cachecache_common::GameEvent;

use crate::error::ClientError;
use crate::sse::SseDecoder;
use crate::streaming_client;

const RECONNECT_DELAY: Duration = Duration::from_secs(2);

pub struct GameEventSource {
    client: reqwest::Client,
    events_url: String,
}

impl GameEventSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: streaming_client(),
            events_url: format!("{}/games/events", base_url.trim_end_matches('/')),
        }
    }

    /// One SSE connection's worth of events. Ends when the server closes the
    /// connection or the transport fails.
    pub fn connect(&self) -> impl Stream<Item = Result<GameEvent, ClientError>> + '_ {
        let client = self.client.clone();
        let url = self.events_url.clone();
        try_stream! {
            let response = client
                .get(&url)
                .header(reqwest::header::ACCEPT, "text/event-stream")
                .send()
                .await?;
            ClientError::ensure_success(response.status(), &format!("event stream refused for {url}"))?;
            info!(url = %url, "Connected to game event stream");

            let mut decoder = SseDecoder::new();
            let body = response.bytes_stream();
            pin_mut!(body);
            while let Some(chunk) = body.next().await {
                let chunk = chunk?;
                for frame in decoder.feed(&chunk) {
                    match serde_json::from_str::<GameEvent>(&frame) {
                        Ok(event) if event.is_ping() => {
                            debug!("Game event stream keep-alive");
                        }
                        Ok(event) => yield event,
                        Err(e) => {
                            warn!(error = %e, frame = %frame, "Dropping undecodable event frame");
                        }
                    }
                }
            }
        }
    }

    /// Persistent subscription: reconnects with a fixed delay whenever the
    /// connection drops, forever. Dropping the stream closes the connection.
    pub fn subscribe(self) -> impl Stream<Item = GameEvent> {
        stream! {
            loop {
                let connection = self.connect();
                pin_mut!(connection);
                while let Some(item) = connection.next().await {
                    match item {
                        Ok(event) => yield event,
                        Err(e) => {
                            warn!(error = %e, "Game event stream failed");
                            break;
                        }
                    }
                }
                tokio::time::sleep(RECONNECT_DELAY).await;
                debug!("Reconnecting to game event stream");
            }
        }
    }
}
