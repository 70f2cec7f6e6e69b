use crate::color::Rgb;
use thiserror::Error;

/// Everything the two generators read.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationParameters {
    pub count: u32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: Rgb,
    pub outside_color: Rgb,
    pub star_count: u32,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("branches must be at least 1, got {0}")]
    Branches(u32),
    #[error("radius must be a finite value greater than 0, got {0}")]
    Radius(f32),
    #[error("randomness power must be a finite value greater than 0, got {0}")]
    RandomnessPower(f32),
    #[error("randomness must be a finite value of at least 0, got {0}")]
    Randomness(f32),
    #[error("spin must be finite, got {0}")]
    Spin(f32),
    #[error("{field} color channels must lie in [0, 1], got {color:?}")]
    Color { field: &'static str, color: Rgb },
}

/// Which generators a parameter change invalidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Invalidated {
    pub galaxy: bool,
    pub starfield: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            count: 50_000,
            radius: 4.0,
            branches: 5,
            spin: -1.302,
            randomness: 0.4,
            randomness_power: 4.0,
            inside_color: Rgb::from_u8(0xaa, 0x0d, 0x0d),
            outside_color: Rgb::from_u8(0x07, 0x01, 0x59),
            star_count: 7_000,
        }
    }
}

impl GenerationParameters {
    /// Slider bounds for the tweak panel. Validation is looser than this, the panel is not.
    pub const MIN: Self = Self {
        count: 0,
        radius: 0.01,
        branches: 1,
        spin: -5.0,
        randomness: 0.0,
        randomness_power: 1.0,
        inside_color: Rgb::BLACK,
        outside_color: Rgb::BLACK,
        star_count: 0,
    };
    pub const MAX: Self = Self {
        count: 1_000_000,
        radius: 20.0,
        branches: 20,
        spin: 5.0,
        randomness: 2.0,
        randomness_power: 10.0,
        inside_color: Rgb::WHITE,
        outside_color: Rgb::WHITE,
        star_count: 100_000,
    };

    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.branches < 1 {
            return Err(ParameterError::Branches(self.branches));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ParameterError::Radius(self.radius));
        }
        if !(self.randomness_power.is_finite() && self.randomness_power > 0.0) {
            return Err(ParameterError::RandomnessPower(self.randomness_power));
        }
        if !(self.randomness.is_finite() && self.randomness >= 0.0) {
            return Err(ParameterError::Randomness(self.randomness));
        }
        if !self.spin.is_finite() {
            return Err(ParameterError::Spin(self.spin));
        }
        for (field, color) in [("inside", self.inside_color), ("outside", self.outside_color)] {
            if !color.is_valid() {
                return Err(ParameterError::Color { field, color });
            }
        }
        Ok(())
    }

    /// Compares against `previous` and reports which clouds need regenerating.
    pub fn invalidated_by(&self, previous: &Self) -> Invalidated {
        Invalidated {
            galaxy: self.count != previous.count
                || self.radius != previous.radius
                || self.branches != previous.branches
                || self.spin != previous.spin
                || self.randomness != previous.randomness
                || self.randomness_power != previous.randomness_power
                || self.inside_color != previous.inside_color
                || self.outside_color != previous.outside_color,
            starfield: self.star_count != previous.star_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_slider_bounds_are_valid() {
        assert_eq!(GenerationParameters::default().validate(), Ok(()));
        assert_eq!(GenerationParameters::MIN.validate(), Ok(()));
        assert_eq!(GenerationParameters::MAX.validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let base = GenerationParameters::default();

        let p = GenerationParameters { branches: 0, ..base.clone() };
        assert_eq!(p.validate(), Err(ParameterError::Branches(0)));

        let p = GenerationParameters { radius: 0.0, ..base.clone() };
        assert_eq!(p.validate(), Err(ParameterError::Radius(0.0)));

        let p = GenerationParameters { radius: -3.0, ..base.clone() };
        assert_eq!(p.validate(), Err(ParameterError::Radius(-3.0)));

        let p = GenerationParameters { randomness_power: 0.0, ..base.clone() };
        assert_eq!(p.validate(), Err(ParameterError::RandomnessPower(0.0)));

        let p = GenerationParameters { randomness: -0.1, ..base.clone() };
        assert_eq!(p.validate(), Err(ParameterError::Randomness(-0.1)));

        let p = GenerationParameters { spin: f32::INFINITY, ..base.clone() };
        assert_eq!(p.validate(), Err(ParameterError::Spin(f32::INFINITY)));

        let p = GenerationParameters { outside_color: Rgb::new(1.5, 0.0, 0.0), ..base };
        assert!(matches!(
            p.validate(),
            Err(ParameterError::Color { field: "outside", .. })
        ));
    }

    #[test]
    fn rejects_nan_radius() {
        let p = GenerationParameters {
            radius: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(ParameterError::Radius(_))));
    }

    #[test]
    fn zero_count_is_accepted() {
        let p = GenerationParameters {
            count: 0,
            star_count: 0,
            ..Default::default()
        };
        assert_eq!(p.validate(), Ok(()));
    }

    #[test]
    fn invalidation_follows_field_ownership() {
        let base = GenerationParameters::default();
        assert_eq!(base.invalidated_by(&base), Invalidated::default());

        let spun = GenerationParameters { spin: 1.0, ..base.clone() };
        assert_eq!(
            spun.invalidated_by(&base),
            Invalidated { galaxy: true, starfield: false }
        );

        let starry = GenerationParameters { star_count: 10, ..base.clone() };
        assert_eq!(
            starry.invalidated_by(&base),
            Invalidated { galaxy: false, starfield: true }
        );

        let recolored = GenerationParameters { inside_color: Rgb::WHITE, ..base.clone() };
        assert!(recolored.invalidated_by(&base).galaxy);
    }
}
