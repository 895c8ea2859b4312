//! Deterministic random number generation for fixture data.
//!
//! RULE: fixture generation never calls a platform RNG. Every fact table
//! draws from its own stream derived from the single master seed, so
//! adding a new table never perturbs the rows of the existing ones and
//! any table's rows are reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG stream for one fact table.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream from the master seed and a stable stream index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Integer uniform in [lo, hi], both ends inclusive.
    pub fn int_in(&mut self, lo: i64, hi: i64) -> i64 {
        debug_assert!(lo <= hi);
        lo + self.next_u64_below((hi - lo + 1) as u64) as i64
    }

    /// Float uniform in [lo, hi), rounded to 2 decimals.
    /// Used for currency and percentage measures.
    pub fn uniform_in(&mut self, lo: f64, hi: f64) -> f64 {
        let raw = lo + self.next_f64() * (hi - lo);
        (raw * 100.0).round() / 100.0
    }

    /// Pick one element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }
}

/// All fixture streams for a single dataset, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_stream(&self, slot: FactStream) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64).with_name(slot.table_name())
    }
}

/// Stable stream slot assignments, one per fact table.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every table's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum FactStream {
    AggregatedTransaction = 0,
    AggregatedUser = 1,
    AggregatedInsurance = 2,
    MapTransaction = 3,
    MapUser = 4,
    MapInsurance = 5,
    TopTransaction = 6,
    TopUser = 7,
    TopInsurance = 8,
}

impl FactStream {
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::AggregatedTransaction => "aggregated_transaction",
            Self::AggregatedUser => "aggregated_user",
            Self::AggregatedInsurance => "aggregated_insurance",
            Self::MapTransaction => "map_transaction",
            Self::MapUser => "map_user",
            Self::MapInsurance => "map_insurance",
            Self::TopTransaction => "top_transaction",
            Self::TopUser => "top_user",
            Self::TopInsurance => "top_insurance",
        }
    }
}
