use crate::model::{Bucket, BucketState, TrayId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub const DEFAULT_MAX_TICKS: u32 = 100;
pub const DEFAULT_STEP: u32 = 1;

// Seeding thresholds over a draw in [0, 100).
const SORTED_ABOVE: u32 = 60;
const FAILURE_BELOW: u32 = 10;
const REJECTED_BELOW: u32 = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    #[error("invalid argument: a ring needs at least one bucket")]
    Empty,
    #[error("invalid argument: tick step must be positive")]
    ZeroStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingConfig {
    pub size: usize,
    pub step: u32,
    pub max_ticks: u32,
}

impl RingConfig {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            step: DEFAULT_STEP,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

/// Result of a single [`RingSimulator::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Rotated { offset: usize },
    Stopped,
}

/// Fixed ring of buckets whose (id, state) pairs rotate by one step per tick.
///
/// Slot `i` receives the pair previously shown by slot `i - offset` (mod ring
/// size): `[A, B, C, D, E]` rotated by 1 becomes `[E, A, B, C, D]`.
#[derive(Debug, Clone)]
pub struct RingSimulator {
    slots: Vec<Bucket>,
    position: u32,
    previous_position: u32,
    step: u32,
    max_ticks: u32,
}

impl RingSimulator {
    pub fn new(config: RingConfig) -> Result<Self, RingError> {
        if config.size == 0 {
            return Err(RingError::Empty);
        }
        if config.step == 0 {
            return Err(RingError::ZeroStep);
        }

        let slots = (0..config.size)
            .map(|i| Bucket::new(TrayId::new(i as u32), BucketState::Empty))
            .collect();

        Ok(Self {
            slots,
            position: 1,
            previous_position: 0,
            step: config.step,
            max_ticks: config.max_ticks,
        })
    }

    /// Builds a ring already seeded with [`Self::initialize_random_state`].
    pub fn seeded(config: RingConfig, seed: u64) -> Result<Self, RingError> {
        let mut ring = Self::new(config)?;
        ring.initialize_random_state(seed);
        Ok(ring)
    }

    /// Assigns ids `0..N` in ring order and a pseudo-random state per slot.
    ///
    /// A draw `d` in `[0, 100)` maps to `Sorted` when `d > 60`, `Failure`
    /// when `d < 10`, `Rejected` when `10 <= d < 20` and `Empty` otherwise.
    pub fn initialize_random_state(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);

        for (i, slot) in self.slots.iter_mut().enumerate() {
            let draw: u32 = rng.gen_range(0..100);
            *slot = Bucket::new(TrayId::new(i as u32), Self::state_for_draw(draw));
        }
    }

    fn state_for_draw(draw: u32) -> BucketState {
        if draw > SORTED_ABOVE {
            BucketState::Sorted
        } else if draw < FAILURE_BELOW {
            BucketState::Failure
        } else if draw < REJECTED_BELOW {
            BucketState::Rejected
        } else {
            BucketState::Empty
        }
    }

    pub fn tick(&mut self) -> Motion {
        if self.is_finished() {
            return Motion::Stopped;
        }

        let offset = (self.position - self.previous_position) as usize;
        self.rotate(offset);

        self.previous_position = self.position;
        self.position = self.position.saturating_add(self.step);

        Motion::Rotated { offset }
    }

    /// Rewrites every slot from a snapshot, so no slot reads an already moved value.
    fn rotate(&mut self, offset: usize) {
        let len = self.slots.len() as isize;
        let shift = (offset as isize).rem_euclid(len);
        let snapshot = self.slots.clone();

        for (i, slot) in self.slots.iter_mut().enumerate() {
            let source = (i as isize - shift).rem_euclid(len) as usize;
            *slot = snapshot[source];
        }
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.max_ticks
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn previous_position(&self) -> u32 {
        self.previous_position
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Bucket] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Option<&Bucket> {
        self.slots.get(slot)
    }

    pub fn set_state(&mut self, slot: usize, state: BucketState) -> bool {
        self.slots
            .get_mut(slot)
            .map(|b| b.state = state)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ids(ring: &RingSimulator) -> Vec<u32> {
        ring.slots().iter().map(|b| *b.id).collect()
    }

    fn multiset(ring: &RingSimulator) -> HashMap<Bucket, usize> {
        ring.slots().iter().fold(HashMap::new(), |mut acc, b| {
            *acc.entry(*b).or_default() += 1;
            acc
        })
    }

    #[test]
    fn test_rotation_direction() {
        let mut ring = RingSimulator::new(RingConfig::new(5)).unwrap();
        assert_eq!(ids(&ring), vec![0, 1, 2, 3, 4]);

        assert_eq!(ring.tick(), Motion::Rotated { offset: 1 });
        assert_eq!(ids(&ring), vec![4, 0, 1, 2, 3]);

        ring.tick();
        assert_eq!(ids(&ring), vec![3, 4, 0, 1, 2]);
    }

    #[test]
    fn test_states_travel_with_ids() {
        let mut ring = RingSimulator::new(RingConfig::new(3)).unwrap();
        ring.set_state(0, BucketState::Sorted);
        ring.set_state(2, BucketState::Failure);

        ring.tick();

        assert_eq!(ring.get(1), Some(&Bucket::new(TrayId::new(0), BucketState::Sorted)));
        assert_eq!(ring.get(0), Some(&Bucket::new(TrayId::new(2), BucketState::Failure)));
        assert_eq!(ring.get(2), Some(&Bucket::new(TrayId::new(1), BucketState::Empty)));
    }

    #[test]
    fn test_offset_follows_step() {
        let config = RingConfig {
            size: 7,
            step: 3,
            max_ticks: 100,
        };
        let mut ring = RingSimulator::new(config).unwrap();

        // The first tick covers the initial gap between position and previous position.
        assert_eq!(ring.tick(), Motion::Rotated { offset: 1 });
        assert_eq!(ring.tick(), Motion::Rotated { offset: 3 });
        assert_eq!(ids(&ring), vec![3, 4, 5, 6, 0, 1, 2]);
    }

    #[test]
    fn test_offset_larger_than_ring_wraps() {
        let config = RingConfig {
            size: 4,
            step: 6,
            max_ticks: 100,
        };
        let mut ring = RingSimulator::new(config).unwrap();
        ring.tick();
        assert_eq!(ring.tick(), Motion::Rotated { offset: 6 });
        // 1 + 6 slots in total, i.e. 3 mod 4.
        assert_eq!(ids(&ring), vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_permutation_invariant() {
        let mut ring = RingSimulator::seeded(RingConfig::new(37), 7).unwrap();
        let before = multiset(&ring);

        for _ in 0..50 {
            ring.tick();
            assert_eq!(multiset(&ring), before);
        }
    }

    #[test]
    fn test_terminal_stability() {
        let config = RingConfig {
            size: 6,
            step: 1,
            max_ticks: 4,
        };
        let mut ring = RingSimulator::seeded(config, 3).unwrap();

        let mut rotations = 0;
        while ring.tick() != Motion::Stopped {
            rotations += 1;
        }
        assert_eq!(rotations, 3);
        assert_eq!(ring.position(), 4);
        assert!(ring.is_finished());

        let frozen = ring.slots().to_vec();
        for _ in 0..10 {
            assert_eq!(ring.tick(), Motion::Stopped);
        }
        assert_eq!(ring.slots(), frozen.as_slice());
        assert_eq!(ring.previous_position(), 3);
    }

    #[test]
    fn test_step_overshooting_max_ticks_stops() {
        let config = RingConfig {
            size: 3,
            step: 4,
            max_ticks: 6,
        };
        let mut ring = RingSimulator::new(config).unwrap();
        assert!(matches!(ring.tick(), Motion::Rotated { .. }));
        assert!(matches!(ring.tick(), Motion::Rotated { .. }));
        assert_eq!(ring.position(), 9);
        assert_eq!(ring.tick(), Motion::Stopped);
    }

    #[test]
    fn test_seeding_is_deterministic() {
        let a = RingSimulator::seeded(RingConfig::new(64), 42).unwrap();
        let b = RingSimulator::seeded(RingConfig::new(64), 42).unwrap();
        assert_eq!(a.slots(), b.slots());
        assert_eq!(ids(&a), (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_seeding_uses_documented_states() {
        let ring = RingSimulator::seeded(RingConfig::new(500), 11).unwrap();
        assert!(ring.slots().iter().all(|b| matches!(
            b.state,
            BucketState::Sorted | BucketState::Failure | BucketState::Rejected | BucketState::Empty
        )));
    }

    #[test]
    fn test_state_for_draw_thresholds() {
        assert_eq!(RingSimulator::state_for_draw(0), BucketState::Failure);
        assert_eq!(RingSimulator::state_for_draw(9), BucketState::Failure);
        assert_eq!(RingSimulator::state_for_draw(10), BucketState::Rejected);
        assert_eq!(RingSimulator::state_for_draw(19), BucketState::Rejected);
        assert_eq!(RingSimulator::state_for_draw(20), BucketState::Empty);
        assert_eq!(RingSimulator::state_for_draw(60), BucketState::Empty);
        assert_eq!(RingSimulator::state_for_draw(61), BucketState::Sorted);
        assert_eq!(RingSimulator::state_for_draw(99), BucketState::Sorted);
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert_eq!(
            RingSimulator::new(RingConfig::new(0)).unwrap_err(),
            RingError::Empty
        );
        let config = RingConfig {
            size: 3,
            step: 0,
            max_ticks: 10,
        };
        assert_eq!(RingSimulator::new(config).unwrap_err(), RingError::ZeroStep);
    }
}
