//! Refrigerator stack: a bounded LIFO with shelf-life expiry and freshness
//! decay.
//!
//! Items pushed past capacity shove the oldest one out the back. Every item
//! carries its own storage tick and a freshness score (10 down to 0); each
//! successful lookup through [`RefrigeratorStack::find`] costs one point of
//! freshness, and lower freshness shortens the effective shelf life. Lookups
//! can also fail with the recoverable [`PantryError::Eaten`] fault, which the
//! caller is expected to retry.
//!
//! Time is an explicit tick counter advanced by the caller (or a
//! [`TickClock`](crate::clock::TickClock) callback), so expiry is fully
//! deterministic in tests.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::error::PantryError;

/// Freshness of a newly stored item; lookups decay it toward 0.
pub const MAX_FRESHNESS: u8 = 10;

/// Construction parameters for a [`RefrigeratorStack`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PantryConfig {
    /// Maximum number of stored items; pushing past this evicts the oldest.
    pub capacity: usize,
    /// Base shelf life in ticks at full freshness.
    pub shelf_life_ticks: u64,
    /// Probability that a lookup fails with the retryable `Eaten` fault.
    pub eaten_probability: f64,
    /// Random seed for reproducibility (None = entropy).
    pub seed: Option<u64>,
}

impl Default for PantryConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            shelf_life_ticks: 60,
            eaten_probability: 0.1,
            seed: None,
        }
    }
}

/// An item plus its embedded storage metadata. Composition instead of
/// identity-keyed side tables: the metadata travels with the record.
#[derive(Debug, Clone)]
struct Stored<T> {
    item: T,
    stored_at: u64,
    freshness: u8,
}

impl<T> Stored<T> {
    /// Effective shelf life, scaled down as freshness drops.
    fn adjusted_shelf_life(&self, base: u64) -> u64 {
        base * u64::from(self.freshness) / u64::from(MAX_FRESHNESS)
    }
}

/// Bounded stack with time-based expiry and freshness decay on lookups.
pub struct RefrigeratorStack<T> {
    config: PantryConfig,
    slots: Vec<Stored<T>>,
    clock: u64,
    rng: Mcg128Xsl64,
}

impl<T> RefrigeratorStack<T> {
    pub fn new() -> Self {
        Self::with_config(PantryConfig::default())
    }

    pub fn with_config(config: PantryConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self {
            config,
            slots: Vec::new(),
            clock: 0,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Advance simulated time by `ticks`.
    pub fn advance(&mut self, ticks: u64) {
        self.clock = self.clock.saturating_add(ticks);
    }

    /// Store an item at full freshness. At capacity the oldest item is pushed
    /// out the back and returned.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.slots.len() >= self.config.capacity {
            Some(self.slots.remove(0).item)
        } else {
            None
        };
        self.slots.push(Stored {
            item,
            stored_at: self.clock,
            freshness: MAX_FRESHNESS,
        });
        evicted
    }

    /// Take the most recently stored item.
    pub fn pop(&mut self) -> Result<T, PantryError> {
        self.slots.pop().map(|s| s.item).ok_or(PantryError::Empty)
    }

    /// Look at the most recently stored item without taking it.
    pub fn peek(&self) -> Result<&T, PantryError> {
        self.slots
            .last()
            .map(|s| &s.item)
            .ok_or(PantryError::Empty)
    }

    /// Search for an item, oldest first. A hit costs the item one point of
    /// freshness. May fail with the retryable `Eaten` fault before the scan
    /// even starts, or with `Expired` when the match is past its adjusted
    /// shelf life; the stack is untouched in either case.
    pub fn find<F>(&mut self, matches: F) -> Result<Option<&T>, PantryError>
    where
        F: Fn(&T) -> bool,
    {
        if self.rng.gen::<f64>() < self.config.eaten_probability {
            return Err(PantryError::Eaten);
        }
        match self.slots.iter().position(|s| matches(&s.item)) {
            Some(i) => {
                if self.is_expired(&self.slots[i]) {
                    return Err(PantryError::Expired);
                }
                self.slots[i].freshness = self.slots[i].freshness.saturating_sub(1);
                Ok(Some(&self.slots[i].item))
            }
            None => Ok(None),
        }
    }

    /// Current freshness of the first matching item.
    pub fn freshness_of<F>(&self, matches: F) -> Option<u8>
    where
        F: Fn(&T) -> bool,
    {
        self.slots
            .iter()
            .find(|s| matches(&s.item))
            .map(|s| s.freshness)
    }

    /// Ticks until the first matching item expires, at its current freshness.
    pub fn remaining_shelf_life<F>(&self, matches: F) -> Option<u64>
    where
        F: Fn(&T) -> bool,
    {
        self.slots.iter().find(|s| matches(&s.item)).map(|s| {
            let life = s.adjusted_shelf_life(self.config.shelf_life_ticks);
            let age = self.clock.saturating_sub(s.stored_at);
            life.saturating_sub(age)
        })
    }

    /// Remove and return every item whose adjusted shelf life has elapsed.
    pub fn sweep_expired(&mut self) -> Vec<T> {
        let drained: Vec<Stored<T>> = self.slots.drain(..).collect();
        let mut expired = Vec::new();
        for stored in drained {
            if self.is_expired(&stored) {
                expired.push(stored.item);
            } else {
                self.slots.push(stored);
            }
        }
        expired
    }

    fn is_expired(&self, stored: &Stored<T>) -> bool {
        let age = self.clock.saturating_sub(stored.stored_at);
        age > stored.adjusted_shelf_life(self.config.shelf_life_ticks)
    }
}

impl<T> Default for RefrigeratorStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fridge(capacity: usize, shelf_life: u64, eaten: f64) -> RefrigeratorStack<&'static str> {
        RefrigeratorStack::with_config(PantryConfig {
            capacity,
            shelf_life_ticks: shelf_life,
            eaten_probability: eaten,
            seed: Some(99),
        })
    }

    #[test]
    fn test_lifo_order() {
        let mut fridge = fridge(5, 60, 0.0);
        fridge.push("milk");
        fridge.push("eggs");
        assert_eq!(*fridge.peek().unwrap(), "eggs");
        assert_eq!(fridge.pop().unwrap(), "eggs");
        assert_eq!(fridge.pop().unwrap(), "milk");
        assert_eq!(fridge.pop().unwrap_err(), PantryError::Empty);
        assert_eq!(fridge.peek().unwrap_err(), PantryError::Empty);
    }

    #[test]
    fn test_push_past_capacity_evicts_oldest() {
        let mut fridge = fridge(2, 60, 0.0);
        assert_eq!(fridge.push("milk"), None);
        assert_eq!(fridge.push("eggs"), None);
        assert_eq!(fridge.push("jam"), Some("milk"));
        assert_eq!(fridge.len(), 2);
        assert!(fridge.freshness_of(|i| *i == "milk").is_none());
    }

    #[test]
    fn test_find_decays_freshness() {
        let mut fridge = fridge(5, 60, 0.0);
        fridge.push("kimchi");
        assert_eq!(fridge.freshness_of(|i| *i == "kimchi"), Some(10));
        for _ in 0..3 {
            let found = fridge.find(|i| *i == "kimchi").unwrap();
            assert_eq!(found, Some(&"kimchi"));
        }
        assert_eq!(fridge.freshness_of(|i| *i == "kimchi"), Some(7));
        assert_eq!(fridge.find(|i| *i == "butter").unwrap(), None);
    }

    #[test]
    fn test_eaten_fault_is_retryable() {
        let mut always = fridge(5, 60, 1.0);
        always.push("cake");
        assert_eq!(always.find(|i| *i == "cake").unwrap_err(), PantryError::Eaten);
        // The fault never mutates the stack.
        assert_eq!(always.len(), 1);
        assert_eq!(always.freshness_of(|i| *i == "cake"), Some(10));

        let mut never = fridge(5, 60, 0.0);
        never.push("cake");
        assert_eq!(never.find(|i| *i == "cake").unwrap(), Some(&"cake"));
    }

    #[test]
    fn test_expiry_sweep() {
        let mut fridge = fridge(5, 10, 0.0);
        fridge.push("old");
        fridge.advance(5);
        fridge.push("new");
        fridge.advance(6); // "old" is 11 ticks in, past a shelf life of 10
        assert_eq!(fridge.sweep_expired(), vec!["old"]);
        assert_eq!(fridge.len(), 1);
        assert_eq!(fridge.sweep_expired(), Vec::<&str>::new());
    }

    #[test]
    fn test_find_reports_expired_match() {
        let mut fridge = fridge(5, 10, 0.0);
        fridge.push("yogurt");
        fridge.advance(11);

        // The match is past its shelf life: reported, left in place, and no
        // freshness is spent on it.
        assert_eq!(
            fridge.find(|i| *i == "yogurt").unwrap_err(),
            PantryError::Expired
        );
        assert_eq!(fridge.len(), 1);
        assert_eq!(fridge.freshness_of(|i| *i == "yogurt"), Some(10));

        // The sweep clears it; afterwards the lookup is a plain miss.
        assert_eq!(fridge.sweep_expired(), vec!["yogurt"]);
        assert_eq!(fridge.find(|i| *i == "yogurt").unwrap(), None);
    }

    #[test]
    fn test_low_freshness_shortens_shelf_life() {
        let mut fridge = fridge(5, 10, 0.0);
        fridge.push("leftovers");
        // Five lookups leave freshness at 5, halving the shelf life.
        for _ in 0..5 {
            fridge.find(|i| *i == "leftovers").unwrap();
        }
        assert_eq!(fridge.remaining_shelf_life(|i| *i == "leftovers"), Some(5));
        fridge.advance(6);
        assert_eq!(fridge.sweep_expired(), vec!["leftovers"]);
    }
}
