use revealer::{FrameRequest, FrameScheduler};

/// A [`FrameScheduler`] that queues requests until the adapter's next frame.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    next: u64,
    pending: Vec<FrameRequest>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[FrameRequest] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every request made before this call, oldest first.
    ///
    /// Requests made while the returned batch is being handled wait for the next frame.
    pub fn take_due(&mut self) -> Vec<FrameRequest> {
        core::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameRequest {
        self.next += 1;
        let request = FrameRequest(self.next);
        self.pending.push(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending.retain(|r| *r != request);
    }
}
