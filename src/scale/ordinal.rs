use crate::foundation::error::{GapminderError, GapminderResult};

/// Categorical mapping from keys to a cyclic output range.
///
/// Keys receive range values in the order they were added to the domain; the range repeats when
/// the domain outgrows it. Keys outside the domain have no value.
#[derive(Clone, Debug, PartialEq)]
pub struct OrdinalScale<K, V> {
    domain: Vec<K>,
    range: Vec<V>,
}

impl<K: PartialEq + Clone, V: Clone> OrdinalScale<K, V> {
    /// Build a scale with an empty domain; `range` must be non-empty.
    pub fn new(range: Vec<V>) -> GapminderResult<Self> {
        if range.is_empty() {
            return Err(GapminderError::validation("ordinal scale range must be non-empty"));
        }
        Ok(Self {
            domain: Vec::new(),
            range,
        })
    }

    /// Seed the domain, skipping repeated keys.
    pub fn with_domain(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        for k in keys {
            if !self.domain.contains(&k) {
                self.domain.push(k);
            }
        }
        self
    }

    /// Value for a key already in the domain.
    pub fn get(&self, key: &K) -> Option<V> {
        let i = self.domain.iter().position(|k| k == key)?;
        Some(self.range[i % self.range.len()].clone())
    }

    /// Keys in assignment order.
    pub fn domain(&self) -> &[K] {
        &self.domain
    }

    /// Output values.
    pub fn range(&self) -> &[V] {
        &self.range
    }
}
