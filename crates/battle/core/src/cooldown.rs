//! Hero skill cooldowns.
//!
//! Each hero owns one counter per skill slot, indexed like its skill list.
//! Counters tick down only when that hero's own turn begins, so a cooldown of
//! 3 spans three of the hero's turns no matter how many units act between
//! them. Enemies have no rows here.

use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CooldownTracker {
    heroes: HashMap<String, Vec<u32>>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a zeroed row for a hero with `slots` skills.
    pub fn register(&mut self, hero_id: &str, slots: usize) {
        self.heroes.insert(hero_id.to_owned(), vec![0; slots]);
    }

    /// Records skill use. Slots outside a registered row are ignored.
    pub fn set_cooldown(&mut self, hero_id: &str, slot: usize, turns: u32) {
        if let Some(counter) = self
            .heroes
            .get_mut(hero_id)
            .and_then(|row| row.get_mut(slot))
        {
            *counter = turns;
        }
    }

    /// Decrements every non-zero counter of one hero.
    pub fn tick_down(&mut self, hero_id: &str) {
        if let Some(row) = self.heroes.get_mut(hero_id) {
            for counter in row.iter_mut().filter(|counter| **counter > 0) {
                *counter -= 1;
            }
        }
    }

    /// Turns left before the slot is usable; zero for unknown heroes/slots.
    pub fn remaining(&self, hero_id: &str, slot: usize) -> u32 {
        self.heroes
            .get(hero_id)
            .and_then(|row| row.get(slot))
            .copied()
            .unwrap_or(0)
    }

    /// A skill is usable only when its counter is exactly zero.
    pub fn is_ready(&self, hero_id: &str, slot: usize) -> bool {
        self.remaining(hero_id, slot) == 0
    }

    pub fn row(&self, hero_id: &str) -> Option<&[u32]> {
        self.heroes.get(hero_id).map(Vec::as_slice)
    }
}
