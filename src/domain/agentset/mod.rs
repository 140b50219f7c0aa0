//! AgentSet - ordered agent collection, factory and breed registry
//!
//! Agents are plain ids. Every scalar own-variable lives in its own column
//! indexed by id (SoA), with a per-agent "set" flag so unset values fall back
//! to the owning set's defaults, then to 0.
//!
//! Breeds are named subsets sharing the base set's id counter. The base set
//! (breed 0) always lists every live agent; a breed lists the agents
//! currently assigned to it, kept in id order.

use std::collections::HashMap;

use crate::core::{EngineError, Result};

#[path = "queries.rs"]
mod queries;

/// Agent identity, dense from 0 in creation order
pub type AgentId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BreedId(usize);

impl BreedId {
    /// The base set itself
    pub const BASE: BreedId = BreedId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One own-variable across all agents
#[derive(Clone, Debug, Default)]
pub struct Column {
    values: Vec<f64>,
    set: Vec<bool>,
    /// Every live owner holds its own value, so `values` reads like `get`
    resolved: bool,
}

impl Column {
    fn with_len(len: usize) -> Self {
        Self { values: vec![0.0; len], set: vec![false; len], resolved: false }
    }

    fn grow(&mut self, len: usize) {
        if self.values.len() < len {
            self.values.resize(len, 0.0);
            self.set.resize(len, false);
        }
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// True if the agent holds its own value (not a default)
    #[inline]
    pub fn is_set(&self, id: AgentId) -> bool {
        self.set.get(id as usize).copied().unwrap_or(false)
    }

    #[inline]
    fn put(&mut self, id: AgentId, value: f64) {
        self.values[id as usize] = value;
        self.set[id as usize] = true;
    }

    #[inline]
    fn clear(&mut self, id: AgentId) {
        self.values[id as usize] = 0.0;
        self.set[id as usize] = false;
    }
}

#[derive(Clone, Debug)]
struct SetLayer {
    name: String,
    members: Vec<AgentId>,
    /// Own-variables declared on this layer only (breeds inherit the base list)
    own: Vec<String>,
    defaults: HashMap<String, f64>,
}

impl SetLayer {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
            own: Vec::new(),
            defaults: HashMap::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AgentSet {
    layers: Vec<SetLayer>,
    breed_index: HashMap<String, BreedId>,
    next_id: AgentId,
    /// Current set of each id, `None` once removed
    set_of: Vec<Option<BreedId>>,
    columns: HashMap<String, Column>,
}

impl AgentSet {
    pub fn new(name: &str) -> Self {
        let mut breed_index = HashMap::new();
        breed_index.insert(name.to_string(), BreedId::BASE);
        Self {
            layers: vec![SetLayer::new(name)],
            breed_index,
            next_id: 0,
            set_of: Vec::new(),
            columns: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.layers[0].name
    }

    // === Lifecycle ===

    /// Create a new agent in the base set
    pub fn add(&mut self) -> AgentId {
        let id = self.next_id;
        self.next_id += 1;
        self.set_of.push(Some(BreedId::BASE));
        self.layers[0].members.push(id);
        let len = self.set_of.len();
        for column in self.columns.values_mut() {
            column.grow(len);
            column.resolved = false;
        }
        id
    }

    /// Create a new agent directly in `breed`
    pub fn add_to(&mut self, breed: BreedId) -> Result<AgentId> {
        self.layer(breed)?;
        let id = self.add();
        if breed != BreedId::BASE {
            self.set_of[id as usize] = Some(breed);
            // Largest id so far: append keeps the breed sorted.
            self.layers[breed.0].members.push(id);
        }
        Ok(id)
    }

    /// Remove an agent from its breed and the base set
    pub fn remove(&mut self, id: AgentId) -> Result<()> {
        let breed = self.breed_of(id)?;
        if breed != BreedId::BASE {
            remove_sorted(&mut self.layers[breed.0].members, id);
        }
        remove_sorted(&mut self.layers[0].members, id);
        self.set_of[id as usize] = None;
        for column in self.columns.values_mut() {
            column.clear(id);
        }
        Ok(())
    }

    #[inline]
    pub fn is_alive(&self, id: AgentId) -> bool {
        matches!(self.set_of.get(id as usize), Some(Some(_)))
    }

    // === Breeds ===

    /// Get or create the breed called `name`
    pub fn breed(&mut self, name: &str) -> BreedId {
        if let Some(&id) = self.breed_index.get(name) {
            return id;
        }
        let id = BreedId(self.layers.len());
        self.layers.push(SetLayer::new(name));
        self.breed_index.insert(name.to_string(), id);
        id
    }

    pub fn breed_id(&self, name: &str) -> Option<BreedId> {
        self.breed_index.get(name).copied()
    }

    pub fn breed_name(&self, breed: BreedId) -> Result<&str> {
        Ok(&self.layer(breed)?.name)
    }

    /// Breeds in creation order, base set excluded
    pub fn breeds(&self) -> impl Iterator<Item = BreedId> + '_ {
        (1..self.layers.len()).map(BreedId)
    }

    pub fn breed_of(&self, id: AgentId) -> Result<BreedId> {
        self.set_of
            .get(id as usize)
            .copied()
            .flatten()
            .ok_or(EngineError::UnknownAgent(id))
    }

    /// Move `id` into `breed`. Variables the destination does not own are
    /// dropped, variables new to the agent start at 0, shared ones are kept.
    pub fn set_breed(&mut self, id: AgentId, breed: BreedId) -> Result<()> {
        self.layer(breed)?;
        let from = self.breed_of(id)?;
        if from == breed {
            return Ok(());
        }
        if from != BreedId::BASE {
            remove_sorted(&mut self.layers[from.0].members, id);
        }
        if breed != BreedId::BASE {
            insert_sorted(&mut self.layers[breed.0].members, id);
        }

        let old_vars = self.own_variables(from)?;
        let new_vars = self.own_variables(breed)?;
        for var in old_vars.iter().filter(|v| !new_vars.contains(v)) {
            if let Some(column) = self.columns.get_mut(var) {
                column.clear(id);
            }
        }
        for var in new_vars.iter().filter(|v| !old_vars.contains(v)) {
            if let Some(column) = self.columns.get_mut(var) {
                column.put(id, 0.0);
            }
        }
        self.set_of[id as usize] = Some(breed);
        Ok(())
    }

    /// Agent ids of `breed` in id order. The base set lists every agent.
    pub fn members(&self, breed: BreedId) -> Result<&[AgentId]> {
        Ok(&self.layer(breed)?.members)
    }

    pub fn len(&self) -> usize {
        self.layers[0].members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers[0].members.is_empty()
    }

    pub fn any(&self, breed: BreedId) -> Result<bool> {
        Ok(!self.layer(breed)?.members.is_empty())
    }

    // === Variables ===

    /// Declare space-separated own-variables on `breed`
    pub fn own(&mut self, breed: BreedId, names: &str) -> Result<()> {
        self.layer(breed)?;
        let len = self.set_of.len();
        for name in names.split_whitespace() {
            if self.own_variables(breed)?.iter().any(|v| v == name) {
                continue;
            }
            self.layers[breed.0].own.push(name.to_string());
            self.columns.entry(name.to_string()).or_insert_with(|| Column::with_len(len)).resolved = false;
        }
        Ok(())
    }

    /// Own-variables of `breed`; for breeds the base set's list comes first
    pub fn own_variables(&self, breed: BreedId) -> Result<Vec<String>> {
        let layer = self.layer(breed)?;
        let mut vars = Vec::new();
        if breed != BreedId::BASE {
            vars.extend(self.layers[0].own.iter().cloned());
        }
        for var in &layer.own {
            if !vars.contains(var) {
                vars.push(var.clone());
            }
        }
        Ok(vars)
    }

    pub fn owns(&self, breed: BreedId, var: &str) -> bool {
        let Some(layer) = self.layers.get(breed.0) else {
            return false;
        };
        layer.own.iter().any(|v| v == var)
            || (breed != BreedId::BASE && self.layers[0].own.iter().any(|v| v == var))
    }

    pub fn set_default(&mut self, breed: BreedId, var: &str, value: f64) -> Result<()> {
        self.layer(breed)?;
        self.layers[breed.0].defaults.insert(var.to_string(), value);
        Ok(())
    }

    pub fn get_default(&self, breed: BreedId, var: &str) -> Option<f64> {
        self.layers.get(breed.0)?.defaults.get(var).copied()
    }

    /// Value of `var` for agent `id`: own value, else the set's default, else 0
    pub fn get(&self, id: AgentId, var: &str) -> Result<f64> {
        let breed = self.breed_of(id)?;
        if let Some(column) = self.columns.get(var) {
            if column.is_set(id) {
                return Ok(column.values[id as usize]);
            }
        }
        if let Some(value) = self.get_default(breed, var) {
            return Ok(value);
        }
        if self.owns(breed, var) {
            return Ok(0.0);
        }
        Err(EngineError::UnknownVariable(var.to_string()))
    }

    pub fn set(&mut self, id: AgentId, var: &str, value: f64) -> Result<()> {
        let breed = self.breed_of(id)?;
        if !self.owns(breed, var) {
            return Err(EngineError::UnknownVariable(var.to_string()));
        }
        let column = self
            .columns
            .get_mut(var)
            .ok_or_else(|| EngineError::UnknownVariable(var.to_string()))?;
        column.put(id, value);
        Ok(())
    }

    /// Raw column (unset slots read 0)
    pub fn column(&self, var: &str) -> Option<&Column> {
        self.columns.get(var)
    }

    /// Mutable values of `var` indexed by id. Every live agent owning `var`
    /// gets its current value written into the column first, so the slice
    /// reads exactly what `get` would. Once written, later calls return the
    /// slice directly until an agent or an owner is added.
    pub fn column_mut(&mut self, var: &str) -> Result<&mut [f64]> {
        // Fallback for unset owners, per layer; `None` where the layer does not own `var`
        let fallback: Vec<Option<f64>> = (0..self.layers.len())
            .map(BreedId)
            .map(|b| self.owns(b, var).then(|| self.get_default(b, var).unwrap_or(0.0)))
            .collect();
        let column = self
            .columns
            .get_mut(var)
            .ok_or_else(|| EngineError::UnknownVariable(var.to_string()))?;
        if !column.resolved {
            for &id in &self.layers[0].members {
                let Some(Some(breed)) = self.set_of.get(id as usize) else {
                    continue;
                };
                if let Some(value) = fallback[breed.0] {
                    if !column.is_set(id) {
                        column.put(id, value);
                    }
                }
            }
            column.resolved = true;
        }
        Ok(&mut column.values)
    }

    fn layer(&self, breed: BreedId) -> Result<&SetLayer> {
        self.layers
            .get(breed.0)
            .ok_or_else(|| EngineError::UnknownBreed(format!("#{}", breed.0)))
    }
}

fn insert_sorted(list: &mut Vec<AgentId>, id: AgentId) {
    if let Err(pos) = list.binary_search(&id) {
        list.insert(pos, id);
    }
}

fn remove_sorted(list: &mut Vec<AgentId>, id: AgentId) {
    if let Ok(pos) = list.binary_search(&id) {
        list.remove(pos);
    }
}
