//! Dice helpers. Every random decision in the engine is one `f64` roll in
//! `[0, 1)`, so a forced `Rng` drives any outcome without touching the
//! probability tables.

use rand::Rng;

/// `true` with probability `p`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// Uniform integer in `lo..hi` (`hi` exclusive). Returns `lo` when the range
/// is empty.
pub fn roll_between<R: Rng + ?Sized>(rng: &mut R, lo: u32, hi: u32) -> u32 {
    if hi <= lo {
        return lo;
    }
    let span = (hi - lo) as f64;
    let offset = (rng.gen::<f64>() * span).floor() as u32;
    lo + offset.min(hi - lo - 1)
}

/// A uniformly chosen element, or `None` for an empty slice.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = roll_between(rng, 0, items.len() as u32) as usize;
    items.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_forced_rolls() {
        let mut low = StepRng::new(0, 0);
        let mut high = StepRng::new(u64::MAX, 0);
        assert!(chance(&mut low, 0.01));
        assert!(!chance(&mut high, 0.99));
        assert!(!chance(&mut low, 0.0));
        assert_eq!(roll_between(&mut low, 50, 100), 50);
        assert_eq!(roll_between(&mut high, 50, 100), 99);
    }

    #[test]
    fn test_roll_between_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = roll_between(&mut rng, 100, 300);
            assert!((100..300).contains(&v));
        }
        assert_eq!(roll_between(&mut rng, 7, 7), 7);
    }

    #[test]
    fn test_pick() {
        let mut rng = StdRng::seed_from_u64(42);
        let empty: [u8; 0] = [];
        assert_eq!(pick(&mut rng, &empty), None);
        let items = [1, 2, 3];
        for _ in 0..50 {
            assert!(items.contains(pick(&mut rng, &items).unwrap()));
        }
    }
}
