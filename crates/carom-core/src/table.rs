use serde::{Deserialize, Serialize};

use crate::vec2::Vec2;

/// Standard table width in pixels.
pub const TABLE_WIDTH: f32 = 900.0;
/// Standard table height in pixels.
pub const TABLE_HEIGHT: f32 = 500.0;

/// Rectangular playing surface. The cushions sit exactly on the edges, so
/// a ball center can travel within `[radius, width - radius]` on x and
/// `[radius, height - radius]` on y.
///
/// Dimensions must be positive and large enough to admit the ball
/// (`width, height >= 2 * radius`); a degenerate table is a caller bug,
/// not a handled condition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Table {
    pub width: f32,
    pub height: f32,
}

impl Table {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center of the table, where a new ball spawns.
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(TABLE_WIDTH, TABLE_HEIGHT)
    }
}
