use crate::cloud::PointCloud;
use crate::params::GenerationParameters;
use crate::random::RandomSource;
use std::f32::consts::TAU;

/// Angle of the arm that point `index` belongs to.
pub fn branch_angle(index: u32, branches: u32) -> f32 {
    (index % branches) as f32 / branches as f32 * TAU
}

/// Signed offset along one axis, `magnitude^power * randomness` with a coin-flip sign.
/// Draws magnitude first, then the sign.
fn jitter(rng: &mut impl RandomSource, randomness: f32, power: f32) -> f32 {
    let magnitude = rng.next_f32().powf(power);
    let sign = if rng.next_f32() < 0.5 { 1.0 } else { -1.0 };
    sign * magnitude * randomness
}

/// Builds the spiral galaxy: `params.count` points with colors fading from the
/// inside color at the core to the outside color at `params.radius`.
///
/// Distance from the core is drawn uniformly over `[0, radius)`, so points crowd the
/// center. Per point the source is drawn 7 times: distance, then magnitude and sign
/// for x, y and z.
///
/// `params` must have passed [`GenerationParameters::validate`].
pub fn generate_galaxy(params: &GenerationParameters, rng: &mut impl RandomSource) -> PointCloud {
    debug_assert!(
        params.validate().is_ok(),
        "galaxy parameters must be validated first: {:?}",
        params.validate()
    );
    let count = params.count as usize;
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    for i in 0..params.count {
        let distance = rng.next_f32() * params.radius;
        let angle = branch_angle(i, params.branches) + distance * params.spin;

        let jitter_x = jitter(rng, params.randomness, params.randomness_power);
        let jitter_y = jitter(rng, params.randomness, params.randomness_power);
        let jitter_z = jitter(rng, params.randomness, params.randomness_power);

        positions.push([
            angle.sin() * distance + jitter_x,
            jitter_y,
            angle.cos() * distance + jitter_z,
        ]);
        colors.push(
            params
                .inside_color
                .lerp(params.outside_color, distance / params.radius),
        );
    }

    PointCloud::with_colors(positions, colors).expect("one color is pushed per position")
}
