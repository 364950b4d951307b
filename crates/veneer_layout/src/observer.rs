//! Content box observation
//!
//! Hosts forward every box-size notification for the content measurement
//! node; `BoxObserver` filters them down to genuine size changes so that
//! layout passes which do not move the box do not trigger recomputation.

use veneer_core::geometry::Size;

/// Sizes closer than this (in pixels) count as unchanged
pub const SIZE_EPSILON: f32 = 0.5;

/// Remembers the last observed box size
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxObserver {
    last: Option<Size>,
}

impl BoxObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last size accepted by `observe`
    pub fn last(&self) -> Option<Size> {
        self.last
    }

    /// Record an observation; returns true if the size genuinely changed
    ///
    /// The first observation always counts as a change. Non-finite sizes
    /// are ignored.
    pub fn observe(&mut self, size: Size) -> bool {
        if !size.width.is_finite() || !size.height.is_finite() {
            return false;
        }

        let changed = match self.last {
            None => true,
            Some(last) => {
                (last.width - size.width).abs() >= SIZE_EPSILON
                    || (last.height - size.height).abs() >= SIZE_EPSILON
            }
        };
        if changed {
            self.last = Some(size);
        }
        changed
    }

    /// Forget the last observation (element detached)
    pub fn disconnect(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_is_a_change() {
        let mut observer = BoxObserver::new();
        assert!(observer.observe(Size::new(300.0, 900.0)));
        assert_eq!(observer.last(), Some(Size::new(300.0, 900.0)));
    }

    #[test]
    fn test_subpixel_jitter_is_ignored() {
        let mut observer = BoxObserver::new();
        observer.observe(Size::new(300.0, 900.0));

        assert!(!observer.observe(Size::new(300.2, 900.0)));
        assert!(observer.observe(Size::new(300.0, 1_200.0)));
        assert!(!observer.observe(Size::new(300.0, 1_200.0)));
    }

    #[test]
    fn test_non_finite_sizes_are_ignored() {
        let mut observer = BoxObserver::new();
        assert!(!observer.observe(Size::new(f32::NAN, 10.0)));
        assert_eq!(observer.last(), None);
    }

    #[test]
    fn test_disconnect_resets() {
        let mut observer = BoxObserver::new();
        observer.observe(Size::new(10.0, 10.0));
        observer.disconnect();
        assert!(observer.observe(Size::new(10.0, 10.0)));
    }
}
