/// Identifier for one scheduled frame callback.
pub type FrameRequest = u64;

/// Source of "call me back before the next frame" notifications.
///
/// The driver holds at most one outstanding request at a time. Whoever
/// owns the scheduler decides when a requested frame fires and delivers
/// it through [`crate::Driver::on_frame`] with a timestamp; timestamps
/// across deliveries must be non-decreasing.
pub trait FrameScheduler {
    /// Ask for one future frame callback.
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a request that has not fired yet. Cancelling a request
    /// that already fired or was already cancelled is a no-op.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Frame bookkeeping without a clock: hands out sequential request ids
/// and tallies how they are spent. Firing is left to the owner, which
/// makes the animation loop fully deterministic under test.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CountedFrames {
    issued: u64,
    outstanding: Option<FrameRequest>,
    cancelled: u64,
}

impl CountedFrames {
    /// Total requests handed out so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Requests withdrawn before firing.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }

    /// Most recent request id not yet cancelled, if any. Delivery is
    /// owner-driven, so firing a frame does not clear this.
    pub fn outstanding(&self) -> Option<FrameRequest> {
        self.outstanding
    }
}

impl FrameScheduler for CountedFrames {
    fn request_frame(&mut self) -> FrameRequest {
        self.issued += 1;
        let request = self.issued;
        self.outstanding = Some(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.outstanding == Some(request) {
            self.outstanding = None;
            self.cancelled += 1;
        }
    }
}
