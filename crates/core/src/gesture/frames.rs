//! Animation frame scheduling.
//!
//! The host owns the real frame clock (`requestAnimationFrame` in a
//! browser, a ticker in a native shell). Controllers only ask for "one more
//! frame" and cancel a request when a new gesture takes over.

/// Token identifying one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Wrap a host-specific frame id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-specific frame id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Host frame clock.
pub trait FrameScheduler {
    /// Request a single callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a pending request. Cancelling an already-fired frame is harmless.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Frame scheduler driven by the caller.
///
/// Requests queue up until [`ManualFrames::take_pending`] drains them. Used by
/// headless hosts (the CLI swipe simulator) and tests.
#[derive(Debug, Default)]
pub struct ManualFrames {
    next_id: u64,
    pending: Vec<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl ManualFrames {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested and not yet delivered or cancelled.
    #[must_use]
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Every frame that was cancelled before delivery.
    #[must_use]
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }

    /// Drain pending frames for delivery.
    pub fn take_pending(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(pos) = self.pending.iter().position(|h| *h == handle) {
            self.pending.remove(pos);
            self.cancelled.push(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_cancel() {
        let mut frames = ManualFrames::new();
        let a = frames.request_frame();
        let b = frames.request_frame();
        assert_ne!(a, b);
        assert_eq!(frames.pending(), &[a, b]);

        frames.cancel_frame(a);
        assert_eq!(frames.pending(), &[b]);
        assert_eq!(frames.cancelled(), &[a]);

        assert_eq!(frames.take_pending(), vec![b]);
        assert!(frames.pending().is_empty());

        // Already delivered: nothing to cancel.
        frames.cancel_frame(b);
        assert_eq!(frames.cancelled(), &[a]);
    }
}
