use crate::cloud::PointCloud;
use crate::random::RandomSource;

/// Default half-width of the cube the backdrop stars are scattered through.
pub const DEFAULT_HALF_EXTENT: f32 = 50.0;

/// Buffer oversizing of the legacy layout, in floats per requested star.
const LEGACY_FLOATS_PER_STAR: usize = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StarfieldLayout {
    /// `count` stars drawn uniformly through the cube.
    #[default]
    Scattered,
    /// The old behavior: a buffer sized for `100 * count` floats that is never filled,
    /// leaving `100 * count / 3` points at the origin.
    Collapsed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarfieldSettings {
    pub layout: StarfieldLayout,
    pub half_extent: f32,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            layout: StarfieldLayout::default(),
            half_extent: DEFAULT_HALF_EXTENT,
        }
    }
}

/// Builds the backdrop. Positions only; the renderer tints every star with one color.
pub fn generate_starfield(
    count: u32,
    settings: &StarfieldSettings,
    rng: &mut impl RandomSource,
) -> PointCloud {
    match settings.layout {
        StarfieldLayout::Scattered => {
            let extent = settings.half_extent;
            let mut axis = || (rng.next_f32() - 0.5) * 2.0 * extent;
            let positions = (0..count).map(|_| [axis(), axis(), axis()]).collect();
            PointCloud::new(positions)
        }
        StarfieldLayout::Collapsed => {
            let points = count as usize * LEGACY_FLOATS_PER_STAR / 3;
            PointCloud::new(vec![[0.0; 3]; points])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ReplaySource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn scattered_stars_fill_the_cube() {
        let settings = StarfieldSettings::default();
        let cloud = generate_starfield(7000, &settings, &mut StdRng::seed_from_u64(5));
        assert_eq!(cloud.len(), 7000);
        assert!(cloud.colors().is_none());
        for p in cloud.positions() {
            for c in p {
                assert!((-DEFAULT_HALF_EXTENT..DEFAULT_HALF_EXTENT).contains(c));
            }
        }
        let at_origin = cloud.positions().iter().filter(|p| **p == [0.0; 3]).count();
        assert_eq!(at_origin, 0);
    }

    #[test]
    fn axes_use_independent_draws() {
        let mut source = ReplaySource::new(vec![0.0, 0.5, 0.75]);
        let settings = StarfieldSettings {
            half_extent: 10.0,
            ..Default::default()
        };
        let cloud = generate_starfield(1, &settings, &mut source);
        assert_eq!(cloud.positions(), &[[-10.0, 0.0, 5.0]]);
        assert_eq!(source.consumed(), 3);
    }

    #[test]
    fn collapsed_layout_reproduces_origin_cluster() {
        let settings = StarfieldSettings {
            layout: StarfieldLayout::Collapsed,
            ..Default::default()
        };
        let mut source = ReplaySource::new(vec![0.3]);
        let cloud = generate_starfield(9, &settings, &mut source);
        assert_eq!(cloud.len(), 300);
        assert!(cloud.positions().iter().all(|p| *p == [0.0; 3]));
        assert_eq!(source.consumed(), 0);
    }

    #[test]
    fn zero_stars() {
        let cloud = generate_starfield(0, &StarfieldSettings::default(), &mut StdRng::seed_from_u64(0));
        assert!(cloud.is_empty());
    }
}
