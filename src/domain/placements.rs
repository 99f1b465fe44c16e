//! Product placements
//!
//! Maps a location key (a shelf or slot code on the floor plan) to the
//! ordered products assigned there. Keys iterate in sorted order so
//! flattened listings and lookups are reproducible across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placement map from location key to ordered product identifiers
///
/// Never keeps an empty product list under a key: clearing a location
/// removes its entry entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Placements(BTreeMap<String, Vec<String>>);

impl Placements {
    /// Creates an empty placement map
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the products placed at a location, empty if none
    pub fn at(&self, location: &str) -> &[String] {
        self.0.get(location).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the products at a location
    ///
    /// An empty product list removes the location entry instead of
    /// storing an empty list.
    pub fn set(&mut self, location: impl Into<String>, products: Vec<String>) {
        let location = location.into();
        if products.is_empty() {
            self.0.remove(&location);
        } else {
            self.0.insert(location, products);
        }
    }

    /// Returns true if a location has products placed
    pub fn contains(&self, location: &str) -> bool {
        self.0.contains_key(location)
    }

    /// Every placed product across all locations, in location key order
    ///
    /// Within a location the stored order is preserved. A product placed
    /// at several locations appears once per placement.
    pub fn all_products(&self) -> Vec<String> {
        self.0.values().flatten().cloned().collect()
    }

    /// First location (in key order) whose products contain the identifier
    pub fn find_location(&self, product: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, products)| products.iter().any(|p| p == product))
            .map(|(location, _)| location.as_str())
    }

    /// Returns true if no products are placed anywhere
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of locations with products
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over locations and their products, in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
