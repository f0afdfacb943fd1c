//! Per-account ordered set of saved city names.

use crate::models::FavoriteToggle;

/// Insertion-ordered list of distinct city names.
///
/// Names are compared exactly; "paris" and "Paris" are different entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FavoriteCityList {
    cities: Vec<String>,
}

impl FavoriteCityList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    /// Append `city` unless already present. Returns whether it was added.
    pub fn add(&mut self, city: &str) -> bool {
        if self.contains(city) {
            return false;
        }
        self.cities.push(city.to_string());
        true
    }

    /// Remove `city` if present. Returns whether anything was removed.
    pub fn remove(&mut self, city: &str) -> bool {
        let before = self.cities.len();
        self.cities.retain(|c| c != city);
        self.cities.len() != before
    }

    /// Remove when present, add otherwise
    pub fn toggle(&mut self, city: &str) -> FavoriteToggle {
        if self.remove(city) {
            FavoriteToggle::Removed
        } else {
            self.cities.push(city.to_string());
            FavoriteToggle::Added
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.cities
    }
}
