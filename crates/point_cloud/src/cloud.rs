use crate::color::Rgb;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("color count {colors} does not match position count {positions}")]
pub struct LengthMismatch {
    pub positions: usize,
    pub colors: usize,
}

/// Ordered positions with optional index-aligned colors.
///
/// Immutable once built; regeneration produces a new cloud instead of editing one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    positions: Vec<[f32; 3]>,
    colors: Option<Vec<Rgb>>,
}

impl PointCloud {
    pub fn new(positions: Vec<[f32; 3]>) -> Self {
        Self {
            positions,
            colors: None,
        }
    }

    pub fn with_colors(positions: Vec<[f32; 3]>, colors: Vec<Rgb>) -> Result<Self, LengthMismatch> {
        if positions.len() != colors.len() {
            return Err(LengthMismatch {
                positions: positions.len(),
                colors: colors.len(),
            });
        }
        Ok(Self {
            positions,
            colors: Some(colors),
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> Option<&[Rgb]> {
        self.colors.as_deref()
    }

    /// Colors as raw channel triples, ready for a vertex buffer.
    pub fn color_channels(&self) -> Option<&[[f32; 3]]> {
        self.colors.as_deref().map(bytemuck::cast_slice)
    }
}
