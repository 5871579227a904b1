//! Screen-space bounds and position clamping
//!
//! The same clamp serves two purposes: keeping a sprite fully on screen, and
//! keeping a camera framed inside a level. Only the half-extent source differs.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Orthographic camera extents reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Orthographic size (half the visible world height)
    pub half_height: f32,
    /// Width / height
    pub aspect: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            half_height: 5.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Viewport {
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.half_height * self.aspect
    }

    /// Camera half-size in world units (used to frame the camera itself)
    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.half_width(), self.half_height)
    }

    /// Visible world rectangle, centered on the origin
    pub fn world_bounds(&self) -> WorldBounds {
        let half = self.half_extent();
        WorldBounds {
            min_x: -half.x,
            min_y: -half.y,
            max_x: half.x,
            max_y: half.y,
        }
    }
}

/// Axis-aligned world rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl WorldBounds {
    #[inline]
    pub fn half_width(&self) -> f32 {
        (self.max_x - self.min_x) / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        (self.max_y - self.min_y) / 2.0
    }
}

/// Region an entity's center may occupy so the whole entity stays inside
/// the bounds it was built from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClampRegion {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl ClampRegion {
    /// Shrink `bounds` inward by `half_extent` on each axis.
    ///
    /// An entity wider or taller than the bounds yields `min > max`; callers
    /// reject that at startup (see [`ClampRegion::is_degenerate`]).
    pub fn new(bounds: &WorldBounds, half_extent: Vec2) -> Self {
        Self {
            min_x: bounds.min_x + half_extent.x,
            min_y: bounds.min_y + half_extent.y,
            max_x: bounds.max_x - half_extent.x,
            max_y: bounds.max_y - half_extent.y,
        }
    }

    /// Region for a camera's center inside a larger level rectangle
    pub fn for_camera(level: &WorldBounds, viewport: &Viewport) -> Self {
        Self::new(level, viewport.half_extent())
    }

    pub fn is_degenerate(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Clamp x and y independently; z passes through
    #[inline]
    pub fn clamp(&self, pos: Vec3) -> Vec3 {
        Vec3::new(
            pos.x.max(self.min_x).min(self.max_x),
            pos.y.max(self.min_y).min(self.max_y),
            pos.z,
        )
    }

    pub fn contains(&self, pos: Vec3) -> bool {
        pos.x >= self.min_x && pos.x <= self.max_x && pos.y >= self.min_y && pos.y <= self.max_y
    }
}
