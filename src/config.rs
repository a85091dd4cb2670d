//! Construction parameters and resize tuning.

use crate::error::ConfigError;

/// Capacity used by `Dictionary::new` and restored by `clear`.
pub const DEFAULT_CAPACITY: usize = 16;
/// Ratio of occupied slots (live + tombstoned) to capacity that triggers growth.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

pub(crate) const GROWTH_FACTOR: usize = 2;
/// A table shrinks once its occupancy drops below `load_factor * SHRINK_THRESHOLD`.
pub(crate) const SHRINK_THRESHOLD: f64 = 0.25;

/// Parameters fixed for the lifetime of a `Dictionary`.
///
/// `initial_capacity` doubles as the minimum capacity: shrinking never goes
/// below it and `clear` resets the table to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DictionaryConfig {
    pub initial_capacity: usize,
    pub load_factor: f64,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Check the parameters. A load factor of 1 or more could fill every slot,
    /// leaving linear probing without an empty slot to stop at.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let lf = self.load_factor;
        if !(lf.is_finite() && lf > 0.0 && lf < 1.0) {
            return Err(ConfigError::InvalidLoadFactor(lf));
        }
        Ok(())
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}
