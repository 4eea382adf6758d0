//! Default locations for newly added clock slots

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use worldclock_core::LocationKey;
use worldclock_ports::LocationPicker;

use crate::catalog::CityCatalog;

/// Picks a uniformly random catalog city
pub struct RandomCityPicker {
    keys: Vec<LocationKey>,
    rng: StdRng,
}

impl RandomCityPicker {
    pub fn new(catalog: &CityCatalog) -> Self {
        Self {
            keys: collect_keys(catalog),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create with a specific seed for reproducible picks
    pub fn with_seed(catalog: &CityCatalog, seed: u64) -> Self {
        Self {
            keys: collect_keys(catalog),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl LocationPicker for RandomCityPicker {
    fn pick(&mut self) -> Option<LocationKey> {
        if self.keys.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.keys.len());
        self.keys.get(index).cloned()
    }
}

/// Walks the catalog in order, wrapping around at the end
pub struct SequentialPicker {
    keys: Vec<LocationKey>,
    next: usize,
}

impl SequentialPicker {
    pub fn new(catalog: &CityCatalog) -> Self {
        Self::starting_at(catalog, 0)
    }

    pub fn starting_at(catalog: &CityCatalog, start: usize) -> Self {
        Self {
            keys: collect_keys(catalog),
            next: start,
        }
    }
}

impl LocationPicker for SequentialPicker {
    fn pick(&mut self) -> Option<LocationKey> {
        if self.keys.is_empty() {
            return None;
        }
        let index = self.next % self.keys.len();
        self.next = index + 1;
        self.keys.get(index).cloned()
    }
}

fn collect_keys(catalog: &CityCatalog) -> Vec<LocationKey> {
    catalog.keys().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_picks_are_catalog_members() {
        let catalog = CityCatalog::embedded().unwrap();
        let mut picker = RandomCityPicker::new(&catalog);

        for _ in 0..100 {
            let key = picker.pick().unwrap();
            assert!(catalog.contains(&key), "{key} not in catalog");
        }
    }

    #[test]
    fn test_seeded_picker_is_reproducible() {
        let catalog = CityCatalog::embedded().unwrap();
        let mut first = RandomCityPicker::with_seed(&catalog, 42);
        let mut second = RandomCityPicker::with_seed(&catalog, 42);

        for _ in 0..10 {
            assert_eq!(first.pick(), second.pick());
        }
    }

    #[test]
    fn test_sequential_wraps() {
        let catalog = CityCatalog::embedded().unwrap();
        let mut picker = SequentialPicker::starting_at(&catalog, catalog.len() - 1);

        let last = picker.pick().unwrap();
        let wrapped = picker.pick().unwrap();

        assert_eq!(Some(last.as_str()), catalog.keys().last());
        assert_eq!(wrapped, "melbourne, australia");
    }
}
