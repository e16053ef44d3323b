//! Collision detection and response for axis-aligned boxes
//!
//! Everything in the world is a box with its origin at the top-left corner.
//! Overlap is strict: boxes that only share an edge do not collide.

use glam::Vec2;

/// Axis-aligned rectangle (top-left + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(
            self.pos.x,
            self.pos.y,
            self.size.x,
            self.size.y,
            other.pos.x,
            other.pos.y,
            other.size.x,
            other.size.y,
        )
    }

    /// Strict point containment
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.pos.x && p.x < self.right() && p.y > self.pos.y && p.y < self.bottom()
    }
}

/// True iff two rectangles intersect with positive area
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn overlaps(ax: f32, ay: f32, aw: f32, ah: f32, bx: f32, by: f32, bw: f32, bh: f32) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

/// True iff two circles (or a point-ish body and a circle) are closer than
/// the sum of their radii
#[inline]
pub fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    (a - b).length() < ra + rb
}

/// Which face of the static box the mover was pushed out through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Mover pushed back to the left of the box
    Left,
    /// Mover pushed out to the right of the box
    Right,
    /// Mover landed on top of the box
    Top,
    /// Mover bumped the underside of the box
    Bottom,
}

/// Penetration depths of a moving box into a static box, per face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Mover's right edge past the static box's left edge
    pub left: f32,
    /// Static box's right edge past the mover's left edge
    pub right: f32,
    /// Mover's bottom edge past the static box's top edge
    pub top: f32,
    /// Static box's bottom edge past the mover's top edge
    pub bottom: f32,
}

impl Penetration {
    pub fn between(mover: &Rect, solid: &Rect) -> Self {
        Self {
            left: mover.right() - solid.pos.x,
            right: solid.right() - mover.pos.x,
            top: mover.bottom() - solid.pos.y,
            bottom: solid.bottom() - mover.pos.y,
        }
    }

    pub fn min(&self) -> f32 {
        self.left.min(self.right).min(self.top).min(self.bottom)
    }
}

/// Result of resolving a mover against one solid box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub side: Side,
    /// Corrected mover position
    pub pos: Vec2,
}

/// Push a mover out of a solid box along the axis of least penetration
///
/// Top is only taken while falling and bottom only while rising; when the
/// smallest depth is vertical but the velocity points the other way the
/// side faces are still checked, and if none of them is the minimum there
/// is no correction at all. Returns `None` when the boxes don't overlap.
pub fn resolve_min_axis(mover: &Rect, vel: Vec2, solid: &Rect) -> Option<Resolution> {
    if !mover.overlaps(solid) {
        return None;
    }

    let pen = Penetration::between(mover, solid);
    let min = pen.min();

    if min == pen.top && vel.y > 0.0 {
        Some(Resolution {
            side: Side::Top,
            pos: Vec2::new(mover.pos.x, solid.pos.y - mover.size.y),
        })
    } else if min == pen.bottom && vel.y < 0.0 {
        Some(Resolution {
            side: Side::Bottom,
            pos: Vec2::new(mover.pos.x, solid.bottom()),
        })
    } else if min == pen.left {
        Some(Resolution {
            side: Side::Left,
            pos: Vec2::new(solid.pos.x - mover.size.x, mover.pos.y),
        })
    } else if min == pen.right {
        Some(Resolution {
            side: Side::Right,
            pos: Vec2::new(solid.right(), mover.pos.y),
        })
    } else {
        None
    }
}
