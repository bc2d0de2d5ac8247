use std::time::Duration;

use anyhow::Result;
use futures::{pin_mut, StreamExt};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cachecache_client::{
    DiscoveryClient, GameClient, GameEventSource, LeaderboardClient, LeaderboardEntry,
    PlacesClient,
};
use cachecache_common::{Config, GameEvent, ServiceMap, Viewport};
use cachecache_map::{ApplyResult, MapLens, MapState, PlaceDirectory, Projection};

mod ticker;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    info!("cache-cache dashboard starting...");

    let config = Config::from_env();
    let services = resolve_services(&config).await;
    let game_url = services.resolve(ServiceMap::GAME)?.to_string();
    let places_url = services.resolve(ServiceMap::PLACE)?.to_string();
    let leaderboard_url = services.resolve(ServiceMap::LEADERBOARD)?.to_string();

    let viewport = Viewport::new(config.map_width_px, config.map_height_px);
    let places_client = PlacesClient::new(&places_url);

    let mut directory = PlaceDirectory::new();
    match places_client.fetch_all().await {
        Ok(places) => {
            directory.extend(places);
            info!(places = directory.len(), "Loaded place registry");
        }
        // Not fatal: gameplay events trigger lookups for the places they name.
        Err(e) => warn!(error = %e, "Could not fetch map information"),
    }
    let mut projection = fit(&directory, viewport);

    tokio::spawn(watch_leaderboard(leaderboard_url));

    if config.start_game {
        if let Err(e) = GameClient::new(&game_url).start().await {
            warn!(error = %e, "Could not start a game");
        }
    }

    let mut state = MapState::new();
    let events = GameEventSource::new(&game_url).subscribe();
    pin_mut!(events);
    while let Some(event) = events.next().await {
        if let Some(line) = ticker::describe(&event) {
            info!("{line}");
        }

        // The event stream races the place fetches; look up any place the
        // event names that the registry has not returned yet, then refit.
        let added = ensure_places(&event, &places_client, &mut directory).await;
        if added > 0 || (projection.is_none() && !directory.is_empty()) {
            projection = fit(&directory, viewport);
            info!(places = directory.len(), "Projection refitted");
        }

        let Some(proj) = projection.as_ref() else {
            warn!("No places known yet; map update skipped");
            continue;
        };
        let lens = MapLens::new(proj, &directory);
        if state.apply(&event, &lens) == ApplyResult::Applied {
            debug!(
                phase = ?state.phase,
                markers = state.activity.len(),
                trail = state.trail.len(),
                hideouts = state.hideouts.len(),
                "Map state updated"
            );
        }
    }

    Ok(())
}

/// Resolve service base URLs through the discovery endpoint when one is
/// configured, falling back to the static configuration.
async fn resolve_services(config: &Config) -> ServiceMap {
    if let Some(url) = &config.discovery_url {
        match DiscoveryClient::new(url).fetch().await {
            Ok(map) if !map.is_empty() => {
                info!("Resolved service locations via discovery");
                return map;
            }
            Ok(_) => warn!("Discovery returned no services, using configured URLs"),
            Err(e) => warn!(error = %e, "Discovery failed, using configured URLs"),
        }
    }
    config.static_services()
}

/// A projection needs at least one point; until the registry returns any,
/// there is no map.
fn fit(directory: &PlaceDirectory, viewport: Viewport) -> Option<Projection> {
    if directory.is_empty() {
        None
    } else {
        Some(Projection::fit(&directory.points(), viewport))
    }
}

/// Fetch any place this event references that the directory does not know.
/// Returns the number of places added.
async fn ensure_places(
    event: &GameEvent,
    places: &PlacesClient,
    directory: &mut PlaceDirectory,
) -> usize {
    let mut added = 0;
    for name in event_places(event) {
        if directory.get(name).is_some() {
            continue;
        }
        match places.search(name).await {
            Ok(matches) => added += directory.extend(matches),
            Err(e) => warn!(place = %name, error = %e, "Place lookup failed"),
        }
    }
    added
}

fn event_places(event: &GameEvent) -> Vec<&str> {
    match event {
        GameEvent::NewGame { hiders, .. } => hiders.values().map(String::as_str).collect(),
        GameEvent::Hider { place, .. } => vec![place],
        GameEvent::SeekerMove { place, destination, .. } => vec![place, destination],
        GameEvent::PlayerDiscovered { place, .. } => vec![place],
        GameEvent::GameOver { .. } | GameEvent::Ping => Vec::new(),
    }
}

/// Follow the leaderboard: one snapshot at startup, then every push from the
/// service, reconnecting when the stream drops.
async fn watch_leaderboard(base_url: String) {
    let client = LeaderboardClient::new(&base_url);
    match client.fetch().await {
        Ok(board) => log_board(&board),
        Err(e) => warn!(error = %e, "Could not fetch leaderboard information"),
    }
    loop {
        let snapshots = client.events();
        pin_mut!(snapshots);
        while let Some(item) = snapshots.next().await {
            match item {
                Ok(board) => log_board(&board),
                Err(e) => {
                    warn!(error = %e, "Leaderboard stream failed");
                    break;
                }
            }
        }
        tokio::time::sleep(Duration::from_secs(2)).await;
        debug!("Reconnecting to leaderboard stream");
    }
}

fn log_board(board: &[LeaderboardEntry]) {
    let standings = board
        .iter()
        .map(|entry| format!("{}: {}", entry.value, entry.score))
        .collect::<Vec<_>>()
        .join(", ");
    info!(board = %standings, "Leaderboard");
}
