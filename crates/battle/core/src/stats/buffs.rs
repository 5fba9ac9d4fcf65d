//! Temporary stat modifiers and their turn-based expiry.

use std::collections::HashMap;

use crate::state::{BuffStat, Side};

/// A temporary percentage adjustment to one stat.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub stat: BuffStat,
    /// Percentage of the base stat, e.g. 50 = +50%.
    pub amount: i32,
    /// Decays once per completed turn; removed at zero.
    pub remaining: i32,
}

/// Per-unit modifier lists for both sides of a battle.
///
/// Lists are keyed by side and unit instance id. Modifiers never merge: two
/// buffs on the same stat are stored side by side and both apply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuffTracker {
    heroes: HashMap<String, Vec<Modifier>>,
    enemies: HashMap<String, Vec<Modifier>>,
}

impl BuffTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, side: Side) -> &HashMap<String, Vec<Modifier>> {
        match side {
            Side::Hero => &self.heroes,
            Side::Enemy => &self.enemies,
        }
    }

    fn table_mut(&mut self, side: Side) -> &mut HashMap<String, Vec<Modifier>> {
        match side {
            Side::Hero => &mut self.heroes,
            Side::Enemy => &mut self.enemies,
        }
    }

    /// Appends a modifier to a unit's list.
    ///
    /// A modifier with `turns <= 0` would already be expired at the next stat
    /// read, so it is not stored.
    pub fn add_modifier(
        &mut self,
        side: Side,
        unit_id: &str,
        stat: impl Into<BuffStat>,
        amount: i32,
        turns: i32,
    ) {
        if turns <= 0 {
            return;
        }

        self.table_mut(side)
            .entry(unit_id.to_owned())
            .or_default()
            .push(Modifier {
                stat: stat.into(),
                amount,
                remaining: turns,
            });
    }

    /// Active modifiers on one unit, oldest first.
    pub fn modifiers(&self, side: Side, unit_id: &str) -> &[Modifier] {
        self.table(side)
            .get(unit_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Advances every modifier on both sides by one turn.
    ///
    /// Must run exactly once per completed turn regardless of who acted.
    /// Returns the number of modifiers that expired.
    pub fn decay_all(&mut self) -> usize {
        let mut expired = 0;

        for table in [&mut self.heroes, &mut self.enemies] {
            for list in table.values_mut() {
                let before = list.len();
                list.retain_mut(|modifier| {
                    modifier.remaining -= 1;
                    modifier.remaining > 0
                });
                expired += before - list.len();
            }
            table.retain(|_, list| !list.is_empty());
        }

        expired
    }

    /// Total number of active modifiers across both sides.
    pub fn len(&self) -> usize {
        self.heroes
            .values()
            .chain(self.enemies.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
