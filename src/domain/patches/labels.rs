use std::collections::BTreeMap;

use crate::domain::agentset::AgentId;
use crate::domain::color::Color;

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    /// Pixel offset from the patch center
    pub offset: (f64, f64),
    pub color: Color,
}

/// Sparse patch labels keyed by id, iterated in id order
#[derive(Clone, Debug, Default)]
pub struct Labels {
    entries: BTreeMap<AgentId, Label>,
    default_offset: (f64, f64),
    default_color: Color,
}

impl Labels {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            default_offset: (0.0, 0.0),
            default_color: Color::BLACK,
        }
    }

    /// Set or erase (`None`) a label
    pub fn set(&mut self, id: AgentId, text: Option<&str>) {
        match text {
            Some(text) => {
                let (offset, color) = (self.default_offset, self.default_color);
                self.entries
                    .entry(id)
                    .and_modify(|l| l.text = text.to_string())
                    .or_insert_with(|| Label { text: text.to_string(), offset, color });
            }
            None => {
                self.entries.remove(&id);
            }
        }
    }

    pub fn get(&self, id: AgentId) -> Option<&Label> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Label> {
        self.entries.get_mut(&id)
    }

    /// Offset and color used for labels created from now on
    pub fn set_defaults(&mut self, offset: (f64, f64), color: Color) {
        self.default_offset = offset;
        self.default_color = color;
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Label)> {
        self.entries.iter().map(|(&id, l)| (id, l))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
