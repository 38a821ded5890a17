use serde::{Deserialize, Serialize};

use crate::table::Table;
use crate::vec2::Vec2;

/// Fraction of velocity kept through a wall impact. Applied to the
/// reflected component and, as a sliding-friction stand-in, to the
/// parallel component of the same impact.
pub const RESTITUTION: f32 = 0.9;
/// Speed (px/s) below which the ball is considered at rest.
pub const STOP_SPEED: f32 = 0.01;

/// A single ball on the table.
///
/// `moving` latches to `false` once speed decays below [`STOP_SPEED`];
/// a settled ball never restarts on its own, a fresh launch replaces it.
/// While `moving` is `false` the velocity is always `(0, 0)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ball {
    /// Center position in table-local pixels.
    pub position: Vec2,
    /// Signed pixels/second along each axis.
    pub velocity: Vec2,
    /// Collision half-extent in pixels, fixed for the ball's lifetime.
    /// Must be positive.
    pub radius: f32,
    pub moving: bool,
}

impl Ball {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            moving: true,
        }
    }

    /// Current speed: the Euclidean norm of the velocity.
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Advance the ball by `dt` seconds and resolve wall contact against
    /// `table`.
    ///
    /// One explicit Euler step, then the four cushions are checked in
    /// fixed order: left, right, top, bottom. A cushion reacts only when
    /// the ball has crossed it while still heading into it; the position
    /// snaps back onto the contact line, the perpendicular velocity
    /// reflects at [`RESTITUTION`], and the parallel component is damped
    /// by the same factor. A corner contact runs two cushion passes, so
    /// both components end up damped twice. Afterwards the ball settles
    /// if its speed fell below [`STOP_SPEED`].
    ///
    /// All inputs are assumed finite; NaN or infinite components are a
    /// caller bug and propagate undetected.
    pub fn update(&mut self, dt: f32, table: Table) {
        if !self.moving {
            return;
        }

        self.position += self.velocity * dt;

        if self.position.x - self.radius <= 0.0 && self.velocity.x < 0.0 {
            self.position.x = self.radius;
            self.velocity.x = -self.velocity.x * RESTITUTION;
            self.velocity.y *= RESTITUTION;
        }
        if self.position.x + self.radius >= table.width && self.velocity.x > 0.0 {
            self.position.x = table.width - self.radius;
            self.velocity.x = -self.velocity.x * RESTITUTION;
            self.velocity.y *= RESTITUTION;
        }
        if self.position.y - self.radius <= 0.0 && self.velocity.y < 0.0 {
            self.position.y = self.radius;
            self.velocity.y = -self.velocity.y * RESTITUTION;
            self.velocity.x *= RESTITUTION;
        }
        if self.position.y + self.radius >= table.height && self.velocity.y > 0.0 {
            self.position.y = table.height - self.radius;
            self.velocity.y = -self.velocity.y * RESTITUTION;
            self.velocity.x *= RESTITUTION;
        }

        if self.speed() < STOP_SPEED {
            self.velocity = Vec2::ZERO;
            self.moving = false;
        }
    }
}

/// Build a velocity vector from a magnitude and an engine angle in
/// degrees: 0° along +x, increasing clockwise on screen (standard
/// cos/sin with y pointing down).
///
/// The angle is wrapped into `[0, 360)` first, so adding whole turns
/// lands on the same vector.
pub fn velocity_from_polar(speed: f32, angle_deg: f32) -> Vec2 {
    let rad = angle_deg.rem_euclid(360.0).to_radians();
    Vec2::new(speed * rad.cos(), speed * rad.sin())
}

/// Convert a user-facing angle (0° = straight up, clockwise-positive) to
/// the engine convention: `(270 + user) mod 360`.
pub fn user_to_engine_angle(user_deg: f32) -> f32 {
    (270.0 + user_deg).rem_euclid(360.0)
}
