use crate::error::Result;
use crate::formula::Formula;
use log::debug;
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Keeps recently built formulas keyed by their infix text, so repeated
/// evaluation of the same text skips lexing and conversion.
pub struct FormulaCache {
    formulas: LruCache<String, Arc<Formula>>,
}

impl FormulaCache {
    /// Creates a cache holding at most `capacity` formulas. A capacity of
    /// zero falls back to [`DEFAULT_CACHE_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_CACHE_CAPACITY
        } else {
            capacity
        };
        Self {
            formulas: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Returns the cached formula for `infix`, building it on a miss.
    /// Formulas that fail to build are not cached.
    pub fn get_or_compile(&mut self, infix: &str) -> Result<Arc<Formula>> {
        if let Some(formula) = self.formulas.get(infix) {
            debug!("Formula cache hit: {}", infix);
            return Ok(Arc::clone(formula));
        }

        debug!("Formula cache miss: {}", infix);
        let formula = Arc::new(Formula::new(infix)?);
        self.formulas.put(infix.to_string(), Arc::clone(&formula));
        Ok(formula)
    }

    pub fn evaluate(&mut self, infix: &str, bindings: &HashMap<char, f64>) -> Result<f64> {
        self.get_or_compile(infix)?.evaluate(bindings)
    }

    pub fn contains(&self, infix: &str) -> bool {
        self.formulas.contains(infix)
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.formulas.cap().get()
    }

    pub fn clear(&mut self) {
        self.formulas.clear();
    }
}

impl Default for FormulaCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
