use std::collections::VecDeque;

/// Opaque token for one requested frame. Only the scheduler mints them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopHandle(u64);

/// Host-side "call me on the next frame" facility.
pub trait FrameScheduler {
    /// Ask for one more frame callback.
    fn request_frame(&mut self) -> LoopHandle;

    /// Withdraw a request. Cancelling an already dispatched or unknown
    /// handle is a no-op.
    fn cancel_frame(&mut self, handle: LoopHandle);
}

/// FIFO of pending frame requests, drained by the host one frame at a time.
///
/// Headless hosts call [`FrameQueue::take_due`] in a loop; windowed hosts
/// call it when the window is ready to present.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: VecDeque<LoopHandle>,
    next_id: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the next frame to dispatch, if any.
    pub fn take_due(&mut self) -> Option<LoopHandle> {
        self.pending.pop_front()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> LoopHandle {
        let handle = LoopHandle(self.next_id);
        self.next_id += 1;
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: LoopHandle) {
        self.pending.retain(|h| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_dispatch_in_order() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();
        assert_ne!(a, b);
        assert_eq!(queue.take_due(), Some(a));
        assert_eq!(queue.take_due(), Some(b));
        assert_eq!(queue.take_due(), None);
    }

    #[test]
    fn cancel_removes_pending_request() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        queue.cancel_frame(a);
        assert!(queue.is_empty());
        // Already gone: harmless.
        queue.cancel_frame(a);
        assert_eq!(queue.take_due(), None);
    }
}
