//! Render Scheduler: Coalesces render requests into a single pass.
//!
//! Any number of mutations within one turn of the event loop produce exactly
//! one render. The pending flag stays raised while the render runs, so cell
//! writes made by the render itself cannot schedule another one.

use std::cell::Cell;
use std::rc::Rc;

/// Shared single-shot render flag.
///
/// Cloning yields another handle to the same flag; the cell buffer and the
/// renderer hold one each. The core is single-threaded, so this is `!Send`.
#[derive(Debug, Clone, Default)]
pub struct RenderScheduler {
    pending: Rc<Cell<bool>>,
}

impl RenderScheduler {
    /// Create a scheduler with no render pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a render unless one is already pending.
    ///
    /// Returns `true` if this call scheduled it.
    pub fn request(&self) -> bool {
        if self.pending.get() {
            false
        } else {
            self.pending.set(true);
            true
        }
    }

    /// Check if a render is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Run `render` if a render is pending, then clear the flag.
    ///
    /// Returns `None` when nothing was pending.
    pub fn run_pending<T>(&self, render: impl FnOnce() -> T) -> Option<T> {
        if !self.pending.get() {
            return None;
        }
        let result = render();
        self.pending.set(false);
        Some(result)
    }

    /// Drop any pending request without rendering.
    pub fn cancel(&self) {
        self.pending.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_coalesces() {
        let scheduler = RenderScheduler::new();
        assert!(scheduler.request());
        assert!(!scheduler.request());
        assert!(!scheduler.request());

        let mut runs = 0;
        scheduler.run_pending(|| runs += 1);
        scheduler.run_pending(|| runs += 1);
        assert_eq!(runs, 1);
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_requests_during_render_are_absorbed() {
        let scheduler = RenderScheduler::new();
        let handle = scheduler.clone();
        scheduler.request();

        let rescheduled = scheduler.run_pending(|| handle.request());
        assert_eq!(rescheduled, Some(false));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_cancel() {
        let scheduler = RenderScheduler::new();
        scheduler.request();
        scheduler.cancel();
        assert_eq!(scheduler.run_pending(|| ()), None);
    }
}
