use rand::Rng;

/// Source of uniform draws in `[0, 1)` consumed by the generators.
///
/// Every `rand` generator is a source, so a seeded `StdRng` gives reproducible clouds.
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;
}

impl<R: Rng> RandomSource for R {
    fn next_f32(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Replays a fixed script of draws, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ReplaySource {
    draws: Vec<f32>,
    cursor: usize,
}

impl ReplaySource {
    /// Panics if `draws` is empty or contains a value outside `[0, 1)`.
    pub fn new(draws: impl Into<Vec<f32>>) -> Self {
        let draws = draws.into();
        assert!(!draws.is_empty(), "replay script must not be empty");
        assert!(
            draws.iter().all(|d| (0.0..1.0).contains(d)),
            "replay draws must lie in [0, 1)"
        );
        Self { draws, cursor: 0 }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ReplaySource {
    fn next_f32(&mut self) -> f32 {
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn replay_cycles_through_script() {
        let mut source = ReplaySource::new(vec![0.1, 0.2]);
        let drawn: Vec<f32> = (0..5).map(|_| source.next_f32()).collect();
        assert_eq!(drawn, vec![0.1, 0.2, 0.1, 0.2, 0.1]);
        assert_eq!(source.consumed(), 5);
    }

    #[test]
    #[should_panic]
    fn replay_rejects_out_of_range_draws() {
        ReplaySource::new(vec![1.0]);
    }

    #[test]
    fn seeded_rng_draws_are_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let d = rng.next_f32();
            assert!((0.0..1.0).contains(&d));
        }
    }
}
