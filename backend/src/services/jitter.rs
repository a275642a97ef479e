//! Map-coordinate jitter.
//!
//! Only the displayed `ns`/`es` columns are perturbed; `northing`/`easting`
//! keep the original values so jitter can always be removed exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::api::ColumnSource;

/// Full width of the uniform offset, in meters (about ten miles).
pub const JITTER_WIDTH: f64 = 16_093.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterSettings {
    pub width: f64,
    /// Fixed seed for reproducible jitter; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl JitterSettings {
    pub fn with_seed(seed: Option<u64>) -> Self {
        Self {
            width: JITTER_WIDTH,
            seed,
        }
    }

    /// Random source for one session.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for JitterSettings {
    fn default() -> Self {
        Self::with_seed(None)
    }
}

/// `value + (u - 0.5) * width` with `u` uniform in `[0, 1)`.
pub fn jitter_value<R: Rng + ?Sized>(value: f64, width: f64, rng: &mut R) -> f64 {
    let u: f64 = rng.gen();
    value + (u - 0.5) * width
}

/// Replace the displayed map coordinates with jittered copies of the originals.
///
/// Re-applying starts again from the unperturbed coordinates, so offsets do
/// not accumulate.
pub fn apply_jitter<R: Rng + ?Sized>(source: &mut ColumnSource, width: f64, rng: &mut R) {
    source.ns = source
        .northing
        .iter()
        .map(|&v| jitter_value(v, width, rng))
        .collect();
    source.es = source
        .easting
        .iter()
        .map(|&v| jitter_value(v, width, rng))
        .collect();
}

/// Restore the displayed map coordinates to the unperturbed values.
pub fn remove_jitter(source: &mut ColumnSource) {
    source.ns = source.northing.clone();
    source.es = source.easting.clone();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dataset::Cell;

    fn source() -> ColumnSource {
        let northing = vec![1_000.0, 2_000.0, 15_000_000.0];
        let easting = vec![-500.0, 0.0, 0.0];
        ColumnSource {
            ns: northing.clone(),
            es: easting.clone(),
            xs: vec![Cell::Number(1.0), Cell::Number(2.0), Cell::Number(3.0)],
            ys: vec![Cell::Number(1.0), Cell::Number(2.0), Cell::Number(3.0)],
            northing,
            easting,
            color: vec!["#31AADE".to_string(); 3],
            size: vec![9; 3],
        }
    }

    #[test]
    fn test_jitter_stays_within_half_width() {
        let mut src = source();
        let mut rng = JitterSettings::with_seed(Some(7)).rng();
        apply_jitter(&mut src, JITTER_WIDTH, &mut rng);

        for (jittered, original) in src.ns.iter().zip(&src.northing) {
            assert!((jittered - original).abs() <= JITTER_WIDTH / 2.0);
        }
        for (jittered, original) in src.es.iter().zip(&src.easting) {
            assert!((jittered - original).abs() <= JITTER_WIDTH / 2.0);
        }
        assert_ne!(src.ns, src.northing);
    }

    #[test]
    fn test_jitter_leaves_other_columns_alone() {
        let mut src = source();
        let before = src.clone();
        let mut rng = JitterSettings::with_seed(Some(1)).rng();
        apply_jitter(&mut src, JITTER_WIDTH, &mut rng);

        assert_eq!(src.xs, before.xs);
        assert_eq!(src.color, before.color);
        assert_eq!(src.northing, before.northing);
        assert_eq!(src.easting, before.easting);
    }

    #[test]
    fn test_remove_restores_originals() {
        let mut src = source();
        let mut rng = JitterSettings::with_seed(Some(3)).rng();
        apply_jitter(&mut src, JITTER_WIDTH, &mut rng);
        apply_jitter(&mut src, JITTER_WIDTH, &mut rng);
        remove_jitter(&mut src);

        assert_eq!(src, source());
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let mut a = source();
        let mut b = source();
        apply_jitter(&mut a, JITTER_WIDTH, &mut JitterSettings::with_seed(Some(42)).rng());
        apply_jitter(&mut b, JITTER_WIDTH, &mut JitterSettings::with_seed(Some(42)).rng());
        assert_eq!(a.ns, b.ns);
        assert_eq!(a.es, b.es);
    }

    #[test]
    fn test_zero_width_is_identity() {
        let mut src = source();
        apply_jitter(&mut src, 0.0, &mut JitterSettings::with_seed(Some(9)).rng());
        assert_eq!(src.ns, src.northing);
    }
}
