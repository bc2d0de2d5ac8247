//! Game event reducer — folds the ordered event stream into marker and trail
//! state for the map render.
//!
//! The reducer never does I/O, never panics on a partial payload, and applies
//! one event fully before the next. Place names it cannot resolve through the
//! [`MapLens`] make the event a skip, not a failure; the places client may
//! still be fetching when the first gameplay events arrive.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use cachecache_common::{GameEvent, ScreenPoint};

use crate::directory::PlaceDirectory;
use crate::projection::Projection;

/// What a place marker is currently doing. Serializes to the css class names
/// the view layer styles by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Seeker,
    Discovery,
    Hiding,
    Visited,
    #[default]
    Normal,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Seeker => "seeker",
            Activity::Discovery => "discovery",
            Activity::Hiding => "hiding",
            Activity::Visited => "visited",
            Activity::Normal => "normal",
        }
    }
}

/// One seeker movement, already projected to screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailSegment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
    pub duration_ms: f64,
}

/// A hider's starting place, established at `NEW_GAME`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hideout {
    pub place: String,
    pub screen: ScreenPoint,
    pub discovered: bool,
}

/// Session state machine. Gameplay events only mean something while
/// `Running`; anywhere else they are logged and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
    Finished,
}

/// Resolves place names to screen positions for the reducer: the place
/// directory supplies coordinates, the projection turns them into pixels.
#[derive(Debug, Clone, Copy)]
pub struct MapLens<'a> {
    projection: &'a Projection,
    places: &'a PlaceDirectory,
}

impl<'a> MapLens<'a> {
    pub fn new(projection: &'a Projection, places: &'a PlaceDirectory) -> Self {
        Self { projection, places }
    }

    /// Screen position of a named place, or `None` when the registry has not
    /// (yet) returned it. A sentinel, never an error.
    pub fn locate(&self, name: &str) -> Option<ScreenPoint> {
        self.places.geo(name).map(|geo| self.projection.project(geo))
    }
}

/// Result of applying a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    /// The event mutated the state.
    Applied,
    /// The event was a no-op in the current phase (or a keep-alive).
    Ignored,
    /// The event referenced a place the directory does not know; derived
    /// updates were skipped.
    UnknownPlace,
}

/// Marker, trail and hideout state for one game session.
///
/// Plain read-only data from the view layer's perspective; all mutation goes
/// through [`MapState::apply`]. The trail is kept in chronological order —
/// newest segment last.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MapState {
    pub phase: GamePhase,
    pub activity: HashMap<String, Activity>,
    pub trail: Vec<TrailSegment>,
    pub hideouts: Vec<Hideout>,
}

impl MapState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the state. Events must arrive in stream order;
    /// a repeated `NEW_GAME` simply resets again.
    pub fn apply(&mut self, event: &GameEvent, lens: &MapLens<'_>) -> ApplyResult {
        match event {
            GameEvent::NewGame { hiders, .. } => {
                self.reset();
                self.phase = GamePhase::Running;
                for place in hiders.values() {
                    if self.hideouts.iter().any(|h| h.place == *place) {
                        continue; // two hiders in one place share a hideout
                    }
                    match lens.locate(place) {
                        Some(screen) => self.hideouts.push(Hideout {
                            place: place.clone(),
                            screen,
                            discovered: false,
                        }),
                        None => {
                            warn!(place = %place, "Hideout at unknown place, marker skipped");
                        }
                    }
                }
                ApplyResult::Applied
            }

            GameEvent::Hider { place, .. } => {
                if self.phase != GamePhase::Running {
                    return self.out_of_phase(event);
                }
                if lens.locate(place).is_none() {
                    return self.unknown_place(event, place);
                }
                self.activity.insert(place.clone(), Activity::Hiding);
                ApplyResult::Applied
            }

            GameEvent::SeekerMove { place, destination, duration, .. } => {
                if self.phase != GamePhase::Running {
                    return self.out_of_phase(event);
                }
                let (Some(from), Some(to)) = (lens.locate(place), lens.locate(destination))
                else {
                    let missing = if lens.locate(place).is_none() { place } else { destination };
                    return self.unknown_place(event, missing);
                };
                self.trail.push(TrailSegment { from, to, duration_ms: *duration });
                self.activity.insert(destination.clone(), Activity::Seeker);
                // Discoveries are sticky: moving off a discovered place must
                // not downgrade it to visited.
                if self.activity.get(place.as_str()) != Some(&Activity::Discovery) {
                    self.activity.insert(place.clone(), Activity::Visited);
                }
                ApplyResult::Applied
            }

            GameEvent::PlayerDiscovered { place, .. } => {
                if self.phase != GamePhase::Running {
                    return self.out_of_phase(event);
                }
                if lens.locate(place).is_none() {
                    return self.unknown_place(event, place);
                }
                self.activity.insert(place.clone(), Activity::Discovery);
                for hideout in self.hideouts.iter_mut().filter(|h| h.place == *place) {
                    hideout.discovered = true;
                }
                ApplyResult::Applied
            }

            GameEvent::GameOver { .. } => {
                // Terminal signal only; markers and trail stay up for the
                // final render.
                self.phase = GamePhase::Finished;
                ApplyResult::Applied
            }

            // The transport filters keep-alives; tolerate one anyway.
            GameEvent::Ping => ApplyResult::Ignored,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    fn reset(&mut self) {
        self.activity.clear();
        self.trail.clear();
        self.hideouts.clear();
    }

    fn out_of_phase(&self, event: &GameEvent) -> ApplyResult {
        debug!(kind = event.kind(), phase = ?self.phase, "Dropping gameplay event outside a running game");
        ApplyResult::Ignored
    }

    fn unknown_place(&self, event: &GameEvent, place: &str) -> ApplyResult {
        warn!(kind = event.kind(), place = %place, "Event references a place the registry has not returned; skipped");
        ApplyResult::UnknownPlace
    }
}
