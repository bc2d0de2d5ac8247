//! The framework-independent core of the cache-cache dashboard: fitting an
//! equirectangular projection to an arbitrary set of places, and reducing the
//! live game event stream into marker/trail state for a map render.

pub mod directory;
pub mod projection;
pub mod reducer;

pub use directory::PlaceDirectory;
pub use projection::Projection;
pub use reducer::{Activity, ApplyResult, GamePhase, Hideout, MapLens, MapState, TrailSegment};
