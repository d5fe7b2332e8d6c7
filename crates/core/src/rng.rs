//! RNG module - uniform random piece selection
//!
//! Pieces are drawn uniformly from the seven-entry catalog using a small LCG,
//! so a seed fully determines the piece sequence.

use crate::piece::ActivePiece;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Uniform sampler over the piece catalog.
#[derive(Debug, Clone)]
pub struct PieceCatalog {
    rng: SimpleRng,
}

impl PieceCatalog {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw a kind uniformly at random.
    pub fn sample_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Draw a fresh piece at its spawn position.
    pub fn sample(&mut self) -> ActivePiece {
        ActivePiece::spawn(self.sample_kind())
    }
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let mut a = SimpleRng::new(0);
        let mut b = SimpleRng::new(1);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_catalog_samples_every_kind() {
        let mut catalog = PieceCatalog::new(42);
        let mut seen = [0u32; 7];
        for _ in 0..7000 {
            seen[catalog.sample_kind().index()] += 1;
        }
        // Roughly uniform: each kind within a generous band around 1000.
        for (i, &n) in seen.iter().enumerate() {
            assert!((700..1300).contains(&n), "kind {} drawn {} times", i, n);
        }
    }

    #[test]
    fn test_sample_is_at_spawn() {
        let mut catalog = PieceCatalog::new(3);
        for _ in 0..20 {
            let piece = catalog.sample();
            assert_eq!(piece, ActivePiece::spawn(piece.kind));
        }
    }
}
