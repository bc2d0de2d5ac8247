//! Clients for the backend collaborators: places registry, leaderboard, game
//! control, service discovery, and the live game event stream.
//!
//! Everything here is transport plumbing. The map core consumes the outputs
//! (parsed places, ordered domain events) and never sees HTTP or SSE details.

pub mod discovery;
pub mod error;
pub mod events;
pub mod game;
pub mod leaderboard;
pub mod places;
pub mod sse;

pub use discovery::DiscoveryClient;
pub use error::{ClientError, Result};
pub use events::GameEventSource;
pub use game::GameClient;
pub use leaderboard::{LeaderboardClient, LeaderboardEntry};
pub use places::PlacesClient;

use std::time::Duration;

/// Shared request client for the plain REST calls. Not used for event
/// streams: a whole-request timeout would cut a long-lived SSE connection.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build HTTP client")
}

/// Client for persistent event-stream connections: connect timeout only.
pub(crate) fn streaming_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to build HTTP client")
}
