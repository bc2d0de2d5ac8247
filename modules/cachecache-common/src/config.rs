use std::collections::HashMap;
use std::env;

use serde::Deserialize;

use crate::error::CacheCacheError;

/// Dashboard configuration loaded from environment variables.
///
/// Every value has a local-dev default matching the service ports the game
/// stack uses out of the box.
#[derive(Debug, Clone)]
pub struct Config {
    pub game_url: String,
    pub places_url: String,
    pub leaderboard_url: String,
    /// Base URL of the discovery endpoint. When set, resolved service
    /// locations override the three URLs above.
    pub discovery_url: Option<String>,

    pub map_width_px: u32,
    pub map_height_px: u32,

    /// Ask the game service for a fresh round on startup (the dashboard's
    /// equivalent of the start-game button).
    pub start_game: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            game_url: env_or("GAME_SERVICE_URL", "http://localhost:8091"),
            places_url: env_or("PLACE_SERVICE_URL", "http://localhost:8092"),
            leaderboard_url: env_or("LEADERBOARD_SERVICE_URL", "http://localhost:8093"),
            discovery_url: env::var("DISCOVERY_URL").ok(),
            map_width_px: env_u32("MAP_WIDTH_PX", 1000),
            map_height_px: env_u32("MAP_HEIGHT_PX", 650),
            start_game: env::var("START_GAME").map(|v| v == "1" || v == "true").unwrap_or(false),
        }
    }

    /// The service map to use when no discovery endpoint is configured.
    pub fn static_services(&self) -> ServiceMap {
        ServiceMap::new(HashMap::from([
            (ServiceMap::GAME.to_string(), self.game_url.clone()),
            (ServiceMap::PLACE.to_string(), self.places_url.clone()),
            (ServiceMap::LEADERBOARD.to_string(), self.leaderboard_url.clone()),
        ]))
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Resolved logical-service-name → base-URL map.
///
/// Plain data, passed explicitly to whoever needs it. The discovery endpoint
/// returns exactly this shape as a JSON object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ServiceMap {
    locations: HashMap<String, String>,
}

impl ServiceMap {
    pub const GAME: &'static str = "game";
    pub const PLACE: &'static str = "place";
    pub const LEADERBOARD: &'static str = "leaderboard";

    pub fn new(locations: HashMap<String, String>) -> Self {
        Self { locations }
    }

    pub fn resolve(&self, service: &str) -> Result<&str, CacheCacheError> {
        self.locations
            .get(service)
            .map(String::as_str)
            .ok_or_else(|| CacheCacheError::UnknownService(service.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_services() {
        let map: ServiceMap = serde_json::from_str(
            r#"{"game":"http://game:8091","place":"http://place:8092","leaderboard":"http://board:8093"}"#,
        )
        .unwrap();
        assert_eq!(map.resolve(ServiceMap::GAME).unwrap(), "http://game:8091");
        assert_eq!(map.resolve(ServiceMap::PLACE).unwrap(), "http://place:8092");
    }

    #[test]
    fn unknown_service_is_an_error() {
        let map = ServiceMap::default();
        assert!(map.resolve("soapbox").is_err());
    }

    #[test]
    fn static_services_cover_all_names() {
        let config = Config {
            game_url: "http://localhost:8091".into(),
            places_url: "http://localhost:8092".into(),
            leaderboard_url: "http://localhost:8093".into(),
            discovery_url: None,
            map_width_px: 1000,
            map_height_px: 650,
            start_game: false,
        };
        let map = config.static_services();
        for name in [ServiceMap::GAME, ServiceMap::PLACE, ServiceMap::LEADERBOARD] {
            assert!(map.resolve(name).is_ok(), "missing {name}");
        }
    }
}
