//! Jar geometry: the outer container and the two rectangles derived from it.

use crate::core::Vec2;

pub const DEFAULT_JAR_WIDTH: f32 = 300.0;
pub const DEFAULT_JAR_HEIGHT: f32 = 300.0;
/// Inset from the jar outline to where body centers may travel
pub const DEFAULT_WALL_MARGIN: f32 = 20.0;
/// Inset from the jar outline for the spawn span
pub const DEFAULT_SPAWN_PADDING: f32 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JarGeometry {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    pub wall_margin: f32,
    pub spawn_padding: f32,
}

impl JarGeometry {
    /// Default-sized jar around a center point
    pub fn centered(center_x: f32, center_y: f32) -> Self {
        Self {
            center_x,
            center_y,
            width: DEFAULT_JAR_WIDTH,
            height: DEFAULT_JAR_HEIGHT,
            wall_margin: DEFAULT_WALL_MARGIN,
            spawn_padding: DEFAULT_SPAWN_PADDING,
        }
    }

    /// Replace unusable numbers with defaults so derived rectangles are
    /// never inverted.
    pub fn sanitized(self) -> Self {
        let finite_or = |v: f32, d: f32| if v.is_finite() { v } else { d };
        let size_or = |v: f32, d: f32| if v.is_finite() && v > 0.0 { v } else { d };
        let inset_or = |v: f32, d: f32| if v.is_finite() && v >= 0.0 { v } else { d };
        Self {
            center_x: finite_or(self.center_x, 0.0),
            center_y: finite_or(self.center_y, 0.0),
            width: size_or(self.width, DEFAULT_JAR_WIDTH),
            height: size_or(self.height, DEFAULT_JAR_HEIGHT),
            wall_margin: inset_or(self.wall_margin, DEFAULT_WALL_MARGIN),
            spawn_padding: inset_or(self.spawn_padding, DEFAULT_SPAWN_PADDING),
        }
    }

    pub fn bounds(&self) -> Bounds {
        let (left, right, top, bottom) = self.inset(self.wall_margin);
        Bounds { left, right, top, bottom }
    }

    pub fn spawn_area(&self) -> SpawnArea {
        let (left, right, top, _) = self.inset(self.spawn_padding);
        SpawnArea { left, right, top }
    }

    fn inset(&self, by: f32) -> (f32, f32, f32, f32) {
        let half_w = self.width * 0.5;
        let half_h = self.height * 0.5;
        let dx = by.min(half_w);
        let dy = by.min(half_h);
        (
            self.center_x - half_w + dx,
            self.center_x + half_w - dx,
            self.center_y - half_h + dy,
            self.center_y + half_h - dy,
        )
    }
}

/// Region body centers are kept inside. Fixed for the whole run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }

    #[inline]
    pub fn floor_gap(&self, y: f32) -> f32 {
        (self.bottom - y).abs()
    }

    /// Clamp a point to the walls, the floor and the loose ceiling
    /// `top - top_margin`.
    #[inline]
    pub fn contain(&self, p: Vec2, top_margin: f32) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.left, self.right),
            p.y.clamp(self.top - top_margin, self.bottom),
        )
    }
}

/// Where new bodies appear: anywhere across `left..right`, above `top`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnArea {
    pub left: f32,
    pub right: f32,
    pub top: f32,
}
