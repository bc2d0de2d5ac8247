//! Local read-model of the places registry.
//!
//! Place records are immutable for a game session; the registry only ever
//! adds. Names are the unique key, and the first record wins on a duplicate,
//! matching how the dashboard dedups concatenated search results.

use std::collections::HashMap;

use cachecache_common::{GeoPoint, Place};

#[derive(Debug, Clone, Default)]
pub struct PlaceDirectory {
    by_name: HashMap<String, Place>,
}

impl PlaceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a place unless one with the same name is already present.
    /// Returns true when the directory changed.
    pub fn insert(&mut self, place: Place) -> bool {
        if self.by_name.contains_key(&place.name) {
            return false;
        }
        self.by_name.insert(place.name.clone(), place);
        true
    }

    /// Insert many places; returns how many were new. A non-zero return means
    /// the caller should refit its projection.
    pub fn extend(&mut self, places: impl IntoIterator<Item = Place>) -> usize {
        places.into_iter().filter(|p| self.insert(p.clone())).count()
    }

    pub fn get(&self, name: &str) -> Option<&Place> {
        self.by_name.get(name)
    }

    pub fn geo(&self, name: &str) -> Option<GeoPoint> {
        self.by_name.get(name).map(|p| p.coordinates)
    }

    /// Every known coordinate, for fitting a projection.
    pub fn points(&self) -> Vec<GeoPoint> {
        self.by_name.values().map(|p| p.coordinates).collect()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
