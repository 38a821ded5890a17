pub mod config;
pub mod scheduler;
pub mod session;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use carom_core::physics::{self, Ball};
use carom_core::table::Table;

use crate::scheduler::{FrameRequest, FrameScheduler};

/// Longest simulated step in seconds; late frames clamp to this.
pub const MAX_STEP: f32 = 0.05;
/// Upper bound on launch speed in px/s.
pub const MAX_LAUNCH_SPEED: f32 = 10_000.0;
/// Smallest accepted ball radius in pixels.
pub const MIN_BALL_RADIUS: f32 = 1.0;
/// Largest accepted ball radius in pixels.
pub const MAX_BALL_RADIUS: f32 = 36.0;

/// Launch parameters for one shot.
///
/// Raw user input goes through [`ShotParams::sanitized`] at the edge;
/// [`Driver::start`] trusts the values it is handed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ShotParams {
    /// Launch speed in px/s.
    pub speed: f32,
    /// Aim angle in degrees: 0 points up the screen, growing clockwise.
    pub angle_deg: f32,
    /// Ball radius in pixels.
    pub radius: f32,
}

impl ShotParams {
    /// Clamp the parameters into their accepted ranges. The radius is
    /// rounded to a whole pixel before clamping.
    pub fn sanitized(self) -> Self {
        Self {
            speed: self.speed.clamp(0.0, MAX_LAUNCH_SPEED),
            angle_deg: self.angle_deg.clamp(0.0, 360.0),
            radius: self.radius.round().clamp(MIN_BALL_RADIUS, MAX_BALL_RADIUS),
        }
    }
}

impl Default for ShotParams {
    fn default() -> Self {
        Self {
            speed: 2400.0,
            angle_deg: 340.0,
            radius: 12.0,
        }
    }
}

/// Lifecycle of the animation loop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No shot taken yet, or the driver was reset.
    Ready,
    Running,
    /// Frozen mid-flight by the user; the ball keeps its velocity.
    Paused,
    /// The ball came to rest on its own.
    Settled,
}

impl Status {
    /// Stable lowercase tag, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ready => "ready",
            Status::Running => "running",
            Status::Paused => "paused",
            Status::Settled => "settled",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of the driver for rendering and logging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub status: Status,
    /// `None` until the first shot is taken.
    pub ball: Option<Ball>,
    pub table: Table,
    /// Current ball speed in px/s, `0.0` when no ball is live.
    pub speed: f32,
}

/// Frame-driven animation loop around a single [`Ball`].
///
/// The driver never sleeps and never reads a clock. It asks its
/// [`FrameScheduler`] for at most one upcoming frame at a time, and the
/// owner feeds that frame back through [`Driver::on_frame`] together
/// with a timestamp. Substituting a hand-cranked scheduler makes every
/// trajectory reproducible in tests.
#[derive(Debug)]
pub struct Driver<S: FrameScheduler> {
    scheduler: S,
    table: Table,
    ball: Option<Ball>,
    status: Status,
    pending: Option<FrameRequest>,
    last_frame_ms: Option<f64>,
}

impl<S: FrameScheduler> Driver<S> {
    pub fn new(scheduler: S, table: Table) -> Self {
        Self {
            scheduler,
            table,
            ball: None,
            status: Status::Ready,
            pending: None,
            last_frame_ms: None,
        }
    }

    /// Launch a fresh ball from the table center. Valid in every state;
    /// a shot already in flight is discarded along with its pending
    /// frame, and the elapsed-time baseline starts over.
    pub fn start(&mut self, params: ShotParams) {
        self.cancel_pending();

        let velocity = physics::velocity_from_polar(
            params.speed,
            physics::user_to_engine_angle(params.angle_deg),
        );
        self.ball = Some(Ball::new(self.table.center(), velocity, params.radius));
        self.last_frame_ms = None;
        self.status = Status::Running;
        self.pending = Some(self.scheduler.request_frame());
        info!(
            speed = params.speed,
            angle_deg = params.angle_deg,
            radius = params.radius,
            "shot started"
        );
    }

    /// Advance the simulation to `now_ms`, a millisecond timestamp from
    /// the scheduling facility. Deliveries without an outstanding frame
    /// request are ignored, so a frame that fires after [`Driver::pause`]
    /// or [`Driver::reset`] cannot move the ball.
    pub fn on_frame(&mut self, now_ms: f64) {
        if self.pending.take().is_none() {
            return;
        }
        let Some(ball) = self.ball.as_mut() else {
            return;
        };

        // First frame after a launch measures from itself.
        let last = self.last_frame_ms.unwrap_or(now_ms);
        let dt = (((now_ms - last) / 1000.0) as f32).min(MAX_STEP);
        self.last_frame_ms = Some(now_ms);

        ball.update(dt, self.table);

        if ball.moving {
            self.pending = Some(self.scheduler.request_frame());
        } else {
            self.status = Status::Settled;
            self.last_frame_ms = None;
            info!(x = ball.position.x, y = ball.position.y, "ball settled");
        }
    }

    /// Freeze a running shot, keeping the ball and its velocity as they
    /// are. Ignored in any other state.
    pub fn pause(&mut self) {
        if self.status != Status::Running {
            return;
        }
        self.cancel_pending();
        self.status = Status::Paused;
        debug!("shot paused");
    }

    /// Discard the ball and return to [`Status::Ready`]. Valid in every
    /// state.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.ball = None;
        self.last_frame_ms = None;
        self.status = Status::Ready;
        debug!("driver reset");
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Current ball speed in px/s, `0.0` when no ball is live.
    pub fn speed(&self) -> f32 {
        self.ball.as_ref().map_or(0.0, Ball::speed)
    }

    pub fn table(&self) -> Table {
        self.table
    }

    /// Whether a frame request is outstanding with the scheduler.
    pub fn frame_requested(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            ball: self.ball.clone(),
            table: self.table,
            speed: self.speed(),
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
        }
    }
}
