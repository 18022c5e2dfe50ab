//! Pseudo-random generators used by the search.
//!
//! `Xoroshiro128Plus` drives every random decision of a playout: UCB1
//! tie-breaks, the choice among unexpanded columns and rollout moves.
//! `SplitMix64` only expands a 64-bit seed into its two state words.

use std::time::{SystemTime, UNIX_EPOCH};

use rand_core::{impls, Error, RngCore, SeedableRng};

/// SplitMix64 generator over a single 64-bit state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RngCore for SplitMix64 {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// xoroshiro128+ generator.
///
/// The all-zero state is a fixed point, so constructors never produce it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Xoroshiro128Plus {
    s: [u64; 2],
}

impl Xoroshiro128Plus {
    /// Creates a generator from raw state words.
    ///
    /// # Panics
    /// Panics if both words are zero.
    pub fn from_state(s: [u64; 2]) -> Self {
        assert!(s != [0, 0], "xoroshiro128+ state must not be all zero");
        Self { s }
    }

    /// Seeds from the wall clock, in whole seconds.
    pub fn from_clock() -> Self {
        Self::seed_from_u64(clock_seed())
    }

    /// Current state words.
    pub const fn state(&self) -> [u64; 2] {
        self.s
    }
}

impl RngCore for Xoroshiro128Plus {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let s0 = self.s[0];
        let mut s1 = self.s[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.s[0] = s0.rotate_left(55) ^ s1 ^ (s1 << 14);
        self.s[1] = s1.rotate_left(36);

        result
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xoroshiro128Plus {
    type Seed = [u8; 16];

    /// Reads the two state words little-endian. An all-zero seed is replaced
    /// by the state `seed_from_u64(0)` would produce.
    fn from_seed(seed: Self::Seed) -> Self {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&seed[..8]);
        hi.copy_from_slice(&seed[8..]);
        let s = [u64::from_le_bytes(lo), u64::from_le_bytes(hi)];
        if s == [0, 0] {
            Self::seed_from_u64(0)
        } else {
            Self { s }
        }
    }

    /// Draws both state words from `SplitMix64(state)`.
    fn seed_from_u64(state: u64) -> Self {
        let mut mixer = SplitMix64::new(state);
        let s = [mixer.next_u64(), mixer.next_u64()];
        // SplitMix64 is a bijection on its counter, so two consecutive
        // outputs are never both zero.
        Self { s }
    }
}

/// Seconds since the Unix epoch, or 0 if the clock is before it.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Picks an index in `0..n` uniformly by modulo reduction.
///
/// Draws nothing when there is only one option.
#[inline]
pub(crate) fn pick_index<R: RngCore>(rng: &mut R, n: usize) -> usize {
    debug_assert!(n > 0, "pick_index: no options");
    if n > 1 {
        (rng.next_u64() % n as u64) as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splitmix64_reference_vector() {
        let mut rng = SplitMix64::new(0);
        assert_eq!(rng.next_u64(), 0xE220_A839_7B1D_CDAF);
        assert_eq!(rng.next_u64(), 0x6E78_9E6A_A1B9_65F4);
        assert_eq!(rng.next_u64(), 0x06C4_5D18_8009_454F);
    }

    #[test]
    fn test_xoroshiro_reference_vector() {
        let mut rng = Xoroshiro128Plus::from_state([1, 2]);
        assert_eq!(rng.next_u64(), 3);
        assert_eq!(rng.next_u64(), 0x0080_0030_0000_C003);
        assert_eq!(rng.next_u64(), 0x0118_4060_3800_0363);
    }

    #[test]
    fn test_seed_from_u64_uses_splitmix() {
        let rng = Xoroshiro128Plus::seed_from_u64(0);
        assert_eq!(rng.state(), [0xE220_A839_7B1D_CDAF, 0x6E78_9E6A_A1B9_65F4]);
    }

    #[test]
    fn test_from_seed_little_endian() {
        let mut seed = [0u8; 16];
        seed[0] = 1;
        seed[8] = 2;
        let rng = Xoroshiro128Plus::from_seed(seed);
        assert_eq!(rng.state(), [1, 2]);
    }

    #[test]
    fn test_from_seed_zero_is_replaced() {
        let rng = Xoroshiro128Plus::from_seed([0; 16]);
        assert_eq!(rng, Xoroshiro128Plus::seed_from_u64(0));
    }

    #[test]
    #[should_panic(expected = "all zero")]
    fn test_from_state_rejects_zero() {
        Xoroshiro128Plus::from_state([0, 0]);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Xoroshiro128Plus::seed_from_u64(42);
        let mut b = Xoroshiro128Plus::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_pick_index_single_option_draws_nothing() {
        let mut rng = Xoroshiro128Plus::from_state([1, 2]);
        assert_eq!(pick_index(&mut rng, 1), 0);
        assert_eq!(rng.state(), [1, 2]);
    }

    #[test]
    fn test_pick_index_uses_modulo() {
        let mut rng = Xoroshiro128Plus::from_state([1, 2]);
        // First output is 3.
        assert_eq!(pick_index(&mut rng, 2), 1);
        let expected = (0x0080_0030_0000_C003u64 % 7) as usize;
        assert_eq!(pick_index(&mut rng, 7), expected);
    }

    #[test]
    fn test_fill_bytes() {
        let mut rng = Xoroshiro128Plus::from_state([1, 2]);
        let mut buf = [0u8; 8];
        rng.fill_bytes(&mut buf);
        assert_eq!(u64::from_le_bytes(buf), 3);
    }
}
