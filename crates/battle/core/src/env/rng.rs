//! Seeded randomness for enemy decisions.
//!
//! The engine never reads ambient entropy. Every random draw is derived from
//! the battle seed, the action nonce, and the acting unit, so a battle can be
//! replayed exactly from its seed and the hero inputs.

/// Source of deterministic random numbers.
pub trait RngOracle: Send + Sync {
    /// Produces a pseudo-random value for `seed`. Equal seeds give equal output.
    fn next_u32(&self, seed: u64) -> u32;

    /// Picks an index in `0..len`, or `None` when `len` is zero.
    ///
    /// Uses the high bits of a widening multiply, which spreads the draw over
    /// the range without a modulo.
    fn pick(&self, seed: u64, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let scaled = u64::from(self.next_u32(seed)) * len as u64;
        Some((scaled >> 32) as usize)
    }
}

impl<T: RngOracle + ?Sized> RngOracle for Box<T> {
    fn next_u32(&self, seed: u64) -> u32 {
        (**self).next_u32(seed)
    }

    fn pick(&self, seed: u64, len: usize) -> Option<usize> {
        (**self).pick(seed, len)
    }
}

/// PCG-XSH-RR generator over a 64-bit LCG state.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6_364_136_223_846_793_005;
    const INCREMENT: u64 = 1_442_695_040_888_963_407;
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = seed
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        xorshifted.rotate_right((state >> 59) as u32)
    }
}

/// Mixes the battle seed with per-draw context into a single seed.
///
/// `context` separates independent draws made for the same action
/// (0 = skill, 1 = target).
pub fn compute_seed(battle_seed: u64, nonce: u64, unit_index: u32, context: u32) -> u64 {
    let mut hash = battle_seed;
    hash ^= nonce.wrapping_mul(0x9e37_79b9_7f4a_7c15);
    hash ^= u64::from(unit_index).wrapping_mul(0x517c_c1b7_2722_0a95);
    hash ^= u64::from(context).wrapping_mul(0x85eb_ca6b);

    // murmur3 finalizer
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51_afd7_ed55_8ccd);
    hash ^= hash >> 33;
    hash
}
