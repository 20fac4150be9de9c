//! Heading selection with inertia
//!
//! The base table gives the weight of each heading relative to the ant's
//! previous one (index 0 = straight on). Rotating the table by the previous
//! heading turns it into absolute directions, so the mass for "straight on"
//! lands on the previous heading.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::core::config::validate_direction_weights;
use crate::core::error::{ColonyError, Result};
use crate::core::types::{Direction, NUM_DIRECTIONS};

/// Base weights rotated right by `prev`, so `rotated[prev] == weights[0]`
pub fn rotated_weights(weights: &[f64], prev: Direction) -> Vec<f64> {
    let mut shifted = weights.to_vec();
    if !shifted.is_empty() {
        let n = prev.index() % shifted.len();
        shifted.rotate_right(n);
    }
    shifted
}

/// One weighted distribution per previous heading, built once per ground
#[derive(Debug, Clone)]
pub struct DirectionSampler {
    tables: Vec<WeightedIndex<f64>>,
}

impl DirectionSampler {
    pub fn new(weights: &[f64]) -> Result<Self> {
        validate_direction_weights(weights)?;

        let tables = Direction::ALL
            .iter()
            .map(|&prev| {
                WeightedIndex::new(rotated_weights(weights, prev))
                    .map_err(|e| ColonyError::InvalidDirectionWeights(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { tables })
    }

    /// Draw the next heading given the previous one
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, prev: Direction, rng: &mut R) -> Direction {
        Direction::from_index(self.tables[prev.index() % NUM_DIRECTIONS].sample(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn reference_weights() -> Vec<f64> {
        let raw = [12.0, 5.0, 2.0, 1.0, 0.1, 1.0, 2.0, 5.0];
        let total: f64 = raw.iter().sum();
        raw.iter().map(|w| w / total).collect()
    }

    #[test]
    fn test_rotation_realigns_straight_on() {
        let weights: Vec<f64> = (0..8).map(|i| i as f64).collect();
        assert_eq!(rotated_weights(&weights, Direction::North), weights);

        let rotated = rotated_weights(&weights, Direction::SouthEast);
        assert_eq!(rotated[3], 0.0);
        assert_eq!(rotated[4], 1.0);
        assert_eq!(rotated[2], 7.0);
        assert_eq!(rotated, vec![5.0, 6.0, 7.0, 0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_most_frequent_heading_is_previous() {
        let sampler = DirectionSampler::new(&reference_weights()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for prev in Direction::ALL {
            let mut counts = [0usize; NUM_DIRECTIONS];
            for _ in 0..10_000 {
                counts[sampler.sample(prev, &mut rng).index()] += 1;
            }
            let most = (0..NUM_DIRECTIONS).max_by_key(|&i| counts[i]).unwrap();
            assert_eq!(most, prev.index(), "prev {:?}, counts {:?}", prev, counts);
        }
    }

    #[test]
    fn test_zero_weight_heading_never_drawn() {
        let mut weights = vec![1.0; 8];
        weights[4] = 0.0;
        let sampler = DirectionSampler::new(&weights).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..2_000 {
            // Turning back from East means heading West
            assert_ne!(sampler.sample(Direction::East, &mut rng), Direction::West);
        }
    }

    #[test]
    fn test_invalid_tables_rejected() {
        assert!(DirectionSampler::new(&[0.0; 8]).is_err());
        assert!(DirectionSampler::new(&[1.0; 4]).is_err());
        assert!(DirectionSampler::new(&[f64::NAN, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]).is_err());
    }
}
