//! Deterministic RNG wrapper using PCG32.
//!
//! The AO filter is the only stochastic stage. Feeding it this generator
//! makes a run reproducible from its seed.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Wrapper around PCG32 for deterministic random number generation.
#[derive(Clone)]
pub struct DeterministicRng {
    inner: Pcg32,
}

impl DeterministicRng {
    /// Create a new RNG from a 32-bit seed.
    ///
    /// The seed is expanded to 64 bits by duplicating it into the high word.
    pub fn new(seed: u32) -> Self {
        let seed64 = (seed as u64) | ((seed as u64) << 32);
        Self {
            inner: Pcg32::seed_from_u64(seed64),
        }
    }

    /// Derive a seed for a named stream using BLAKE3.
    pub fn derive_variant_seed(base_seed: u32, variant_id: &str) -> u32 {
        let mut input = Vec::with_capacity(4 + variant_id.len());
        input.extend_from_slice(&base_seed.to_le_bytes());
        input.extend_from_slice(variant_id.as_bytes());
        let hash = blake3::hash(&input);
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&hash.as_bytes()[..4]);
        u32::from_le_bytes(bytes)
    }
}

impl RngCore for DeterministicRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
