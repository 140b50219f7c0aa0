use std::cmp::Ordering;

use super::*;
use crate::core::utils::Xorshift32;

/// Collection queries over one breed (or the base set)
impl AgentSet {
    /// Agents for which `pred` holds, in set order
    pub fn with<F>(&self, breed: BreedId, mut pred: F) -> Result<Vec<AgentId>>
    where
        F: FnMut(AgentId) -> bool,
    {
        Ok(self.members(breed)?.iter().copied().filter(|&id| pred(id)).collect())
    }

    pub fn count<F>(&self, breed: BreedId, mut pred: F) -> Result<usize>
    where
        F: FnMut(AgentId) -> bool,
    {
        Ok(self.members(breed)?.iter().filter(|&&id| pred(id)).count())
    }

    pub fn all<F>(&self, breed: BreedId, mut pred: F) -> Result<bool>
    where
        F: FnMut(AgentId) -> bool,
    {
        Ok(self.members(breed)?.iter().all(|&id| pred(id)))
    }

    /// Values of `var` for every member
    pub fn props(&self, breed: BreedId, var: &str) -> Result<Vec<f64>> {
        self.members(breed)?.iter().map(|&id| self.get(id, var)).collect()
    }

    /// Members sorted by `key` (stable; NaN keys sort last ascending)
    pub fn sorted_by<F>(&self, breed: BreedId, mut key: F, ascending: bool) -> Result<Vec<AgentId>>
    where
        F: FnMut(AgentId) -> f64,
    {
        let mut keyed: Vec<(f64, AgentId)> =
            self.members(breed)?.iter().map(|&id| (key(id), id)).collect();
        keyed.sort_by(|a, b| cmp_f64(a.0, b.0));
        if !ascending {
            keyed.reverse();
        }
        Ok(keyed.into_iter().map(|(_, id)| id).collect())
    }

    pub fn one_of(&self, breed: BreedId, rng: &mut Xorshift32) -> Result<Option<AgentId>> {
        let members = self.members(breed)?;
        if members.is_empty() {
            return Ok(None);
        }
        Ok(Some(members[rng.below(members.len())]))
    }

    /// `n` distinct random members (partial Fisher-Yates)
    pub fn n_of(&self, breed: BreedId, n: usize, rng: &mut Xorshift32) -> Result<Vec<AgentId>> {
        let members = self.members(breed)?;
        if n > members.len() {
            return Err(EngineError::SampleTooLarge {
                op: "n_of",
                requested: n,
                available: members.len(),
            });
        }
        let mut pool = members.to_vec();
        for i in 0..n {
            let j = i + rng.below(pool.len() - i);
            pool.swap(i, j);
        }
        pool.truncate(n);
        Ok(pool)
    }

    /// First member with the smallest `key`
    pub fn min_one_of<F>(&self, breed: BreedId, key: F) -> Result<AgentId>
    where
        F: FnMut(AgentId) -> f64,
    {
        self.extreme_one_of(breed, key, "min_one_of", |v, best| v < best)
    }

    /// First member with the largest `key`
    pub fn max_one_of<F>(&self, breed: BreedId, key: F) -> Result<AgentId>
    where
        F: FnMut(AgentId) -> f64,
    {
        self.extreme_one_of(breed, key, "max_one_of", |v, best| v > best)
    }

    /// The `n` members with the smallest keys, ascending
    pub fn min_n_of<F>(&self, breed: BreedId, n: usize, key: F) -> Result<Vec<AgentId>>
    where
        F: FnMut(AgentId) -> f64,
    {
        let sorted = self.sorted_for_n(breed, n, key, "min_n_of")?;
        Ok(sorted[..n].to_vec())
    }

    /// The `n` members with the largest keys, ascending
    pub fn max_n_of<F>(&self, breed: BreedId, n: usize, key: F) -> Result<Vec<AgentId>>
    where
        F: FnMut(AgentId) -> f64,
    {
        let sorted = self.sorted_for_n(breed, n, key, "max_n_of")?;
        Ok(sorted[sorted.len() - n..].to_vec())
    }

    pub fn last(&self, breed: BreedId) -> Result<Option<AgentId>> {
        Ok(self.members(breed)?.last().copied())
    }

    fn extreme_one_of<F, B>(&self, breed: BreedId, mut key: F, op: &'static str, better: B) -> Result<AgentId>
    where
        F: FnMut(AgentId) -> f64,
        B: Fn(f64, f64) -> bool,
    {
        let members = self.members(breed)?;
        let Some(&first) = members.first() else {
            return Err(EngineError::EmptyAgentSet(op));
        };
        let mut best = (first, key(first));
        for &id in &members[1..] {
            let v = key(id);
            if better(v, best.1) {
                best = (id, v);
            }
        }
        Ok(best.0)
    }

    fn sorted_for_n<F>(&self, breed: BreedId, n: usize, key: F, op: &'static str) -> Result<Vec<AgentId>>
    where
        F: FnMut(AgentId) -> f64,
    {
        let available = self.members(breed)?.len();
        if n > available {
            return Err(EngineError::SampleTooLarge { op, requested: n, available });
        }
        self.sorted_by(breed, key, true)
    }
}

#[inline]
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}
