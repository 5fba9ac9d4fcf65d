//! Enemy definition table.

use std::collections::HashMap;

use battle_core::{EnemyOracle, UnitTemplate};

/// Enemy definitions indexed by id.
///
/// Keeps the file order for listing. When an id repeats, the first
/// definition wins, matching a front-to-back search of the source file.
#[derive(Clone, Debug, Default)]
pub struct EnemyTable {
    templates: Vec<UnitTemplate>,
    index: HashMap<String, usize>,
}

impl EnemyTable {
    pub fn new(templates: Vec<UnitTemplate>) -> Self {
        let mut index = HashMap::with_capacity(templates.len());
        for (position, template) in templates.iter().enumerate() {
            index.entry(template.id.clone()).or_insert(position);
        }
        Self { templates, index }
    }

    pub fn get(&self, id: &str) -> Option<&UnitTemplate> {
        self.index.get(id).map(|&position| &self.templates[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|template| template.id.as_str())
    }

    pub fn templates(&self) -> &[UnitTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl EnemyOracle for EnemyTable {
    fn template(&self, id: &str) -> Option<UnitTemplate> {
        self.get(id).cloned()
    }
}
