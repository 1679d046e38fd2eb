//! Direct-Mapped Cache Simulator.
//!
//! This module models the hit/miss behavior of a direct-mapped cache that
//! shadows every data access. It performs the following:
//! 1. **Mapping:** 64-byte blocks; block number modulo the set count selects the line.
//! 2. **Tracking:** One tag and one validity bit per line — values are never stored.
//! 3. **Statistics:** Access and miss counters read out at the observation boundary.
//!
//! A miss unconditionally installs the new block's tag, evicting whatever tag
//! was resident with no other bookkeeping (no write-back, no victim storage).
//! Two addresses whose block numbers differ by a multiple of the set count map
//! to the same set and conflict-evict each other; this is the only place
//! aliasing behavior is modeled.

use serde::Serialize;

use crate::common::error::ConfigError;

/// Cache block size in bytes.
pub const BLOCK_BYTES: u64 = 64;

/// One cache line: a validity flag and the resident block number.
#[derive(Debug, Clone, Copy, Default)]
struct CacheLine {
    tag: u64,
    valid: bool,
}

/// Direct-mapped cache simulator: one line per set, tags only.
#[derive(Debug, Clone)]
pub struct CacheSim {
    lines: Vec<CacheLine>,
    num_sets: u64,
    accesses: u64,
    misses: u64,
}

/// Access and miss totals accumulated over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    /// Total number of cache accesses.
    pub accesses: u64,
    /// Total number of cache misses.
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of accesses that hit, in `[0.0, 1.0]`; 0 when no accesses occurred.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            (self.accesses - self.misses) as f64 / self.accesses as f64
        }
    }
}

impl CacheSim {
    /// Creates a direct-mapped cache with the given geometry.
    ///
    /// All lines start invalid.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] unless `total_lines == num_sets` and
    /// `num_sets > 0`.
    pub fn new(total_lines: u64, num_sets: u64) -> Result<Self, ConfigError> {
        if num_sets == 0 {
            return Err(ConfigError::EmptyCache);
        }
        if total_lines != num_sets {
            return Err(ConfigError::CacheGeometry {
                lines: total_lines,
                sets: num_sets,
            });
        }
        Ok(Self {
            lines: vec![CacheLine::default(); num_sets as usize],
            num_sets,
            accesses: 0,
            misses: 0,
        })
    }

    /// Records an access to `addr` and reports whether it hit.
    ///
    /// On a miss the accessed block's tag is installed unconditionally,
    /// evicting the previous resident. Every call counts as one access.
    pub fn access(&mut self, addr: u64) -> bool {
        self.accesses += 1;

        let block = addr / BLOCK_BYTES;
        let set = (block % self.num_sets) as usize;
        let line = &mut self.lines[set];

        if line.valid && line.tag == block {
            return true;
        }

        self.misses += 1;
        line.valid = true;
        line.tag = block;
        false
    }

    /// Number of sets (and lines) in the cache.
    pub const fn num_sets(&self) -> u64 {
        self.num_sets
    }

    /// Current access and miss totals.
    pub const fn statistics(&self) -> CacheStats {
        CacheStats {
            accesses: self.accesses,
            misses: self.misses,
        }
    }
}
