use bevy::log::Level;
use clap::Parser;
use point_cloud::{
    GenerationParameters, Rgb, StarfieldLayout, StarfieldSettings, DEFAULT_HALF_EXTENT,
};

use crate::galaxy::RenderSettings;

/// Procedural spiral galaxy with a starfield backdrop
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Seed for point generation, random when omitted
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of galaxy points
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(..=GenerationParameters::MAX.count as i64)
    )]
    pub count: Option<u32>,
    /// Number of backdrop stars
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(..=GenerationParameters::MAX.star_count as i64)
    )]
    pub stars: Option<u32>,
    /// Galaxy radius
    #[arg(long)]
    pub radius: Option<f32>,
    /// Number of spiral arms
    #[arg(long)]
    pub branches: Option<u32>,
    /// Spiral twist, radians per unit of distance
    #[arg(long, allow_negative_numbers = true)]
    pub spin: Option<f32>,
    /// Largest positional jitter
    #[arg(long)]
    pub randomness: Option<f32>,
    /// Jitter falloff exponent, higher keeps points closer to their arm
    #[arg(long)]
    pub randomness_power: Option<f32>,
    /// Core color as #rrggbb
    #[arg(long)]
    pub inside_color: Option<Rgb>,
    /// Rim color as #rrggbb
    #[arg(long)]
    pub outside_color: Option<Rgb>,
    /// Backdrop star color as #rrggbb
    #[arg(long)]
    pub star_color: Option<Rgb>,
    /// Point size in world units
    #[arg(long, value_parser = positive)]
    pub size: Option<f32>,
    /// Half-width of the cube the stars are scattered through
    #[arg(long, value_parser = positive, default_value_t = DEFAULT_HALF_EXTENT)]
    pub starfield_extent: f32,
    /// Reproduce the old starfield that collapsed every star onto the origin
    #[arg(long, default_value_t = false)]
    pub legacy_starfield: bool,
    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<Level>,
}

fn positive(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} is not a finite value greater than 0"))
    }
}

impl Args {
    /// Defaults with CLI overrides applied. Not validated.
    pub fn parameters(&self) -> GenerationParameters {
        let mut params = GenerationParameters::default();
        if let Some(count) = self.count {
            params.count = count;
        }
        if let Some(stars) = self.stars {
            params.star_count = stars;
        }
        if let Some(radius) = self.radius {
            params.radius = radius;
        }
        if let Some(branches) = self.branches {
            params.branches = branches;
        }
        if let Some(spin) = self.spin {
            params.spin = spin;
        }
        if let Some(randomness) = self.randomness {
            params.randomness = randomness;
        }
        if let Some(power) = self.randomness_power {
            params.randomness_power = power;
        }
        if let Some(color) = self.inside_color {
            params.inside_color = color;
        }
        if let Some(color) = self.outside_color {
            params.outside_color = color;
        }
        params
    }

    pub fn render_settings(&self) -> RenderSettings {
        let mut settings = RenderSettings::default();
        if let Some(size) = self.size {
            settings.size = size;
        }
        if let Some(color) = self.star_color {
            settings.star_color = color;
        }
        settings
    }

    pub fn starfield_settings(&self) -> StarfieldSettings {
        StarfieldSettings {
            layout: if self.legacy_starfield {
                StarfieldLayout::Collapsed
            } else {
                StarfieldLayout::Scattered
            },
            half_extent: self.starfield_extent,
        }
    }
}
