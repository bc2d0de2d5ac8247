pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::{Config, ServiceMap};
pub use error::CacheCacheError;
pub use events::GameEvent;
pub use types::{GeoPoint, Place, ScreenPoint, Viewport, WirePlace};
