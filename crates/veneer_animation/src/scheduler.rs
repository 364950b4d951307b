//! Timer scheduler
//!
//! Holds pending timers and hands back the ones whose deadline has passed
//! each time the owner polls it. Nothing runs on its own: the owner calls
//! `drain_expired` from its tick, which keeps all state changes on the
//! UI thread.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::clock::Timestamp;

new_key_type! {
    pub struct TimerId;
}

struct Timer<A> {
    deadline: Timestamp,
    action: A,
}

/// Pending timers carrying an action payload of type `A`
pub struct TimerScheduler<A> {
    timers: SlotMap<TimerId, Timer<A>>,
}

impl<A> TimerScheduler<A> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
        }
    }

    /// Schedule `action` to expire `delay` after `now`
    pub fn schedule(&mut self, now: Timestamp, delay: Duration, action: A) -> TimerId {
        let deadline = now.saturating_add(delay);
        let id = self.timers.insert(Timer { deadline, action });
        tracing::trace!(?id, deadline_us = deadline.as_micros(), "timer scheduled");
        id
    }

    /// Cancel a pending timer, returning its action if it had not fired
    pub fn cancel(&mut self, id: TimerId) -> Option<A> {
        self.timers.remove(id).map(|timer| timer.action)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Earliest pending deadline, for hosts that sleep until the next timer
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timers.values().map(|timer| timer.deadline).min()
    }

    /// Remove and return every timer whose deadline is at or before `now`,
    /// earliest first
    pub fn drain_expired(&mut self, now: Timestamp) -> SmallVec<[(TimerId, A); 2]> {
        let mut expired: SmallVec<[(TimerId, Timestamp); 2]> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(id, timer)| (id, timer.deadline))
            .collect();
        expired.sort_by_key(|&(_, deadline)| deadline);

        expired
            .into_iter()
            .filter_map(|(id, _)| self.timers.remove(id).map(|timer| (id, timer.action)))
            .collect()
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<A> Default for TimerScheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Restartable timer handle
///
/// Each `trigger` cancels the pending timer (if any) and schedules a fresh
/// one, so a burst of triggers only fires once, `delay` after the last one.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    pending: Option<TimerId>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// (Re)start the countdown
    pub fn trigger<A>(
        &mut self,
        scheduler: &mut TimerScheduler<A>,
        now: Timestamp,
        action: A,
    ) -> TimerId {
        if let Some(previous) = self.pending.take() {
            scheduler.cancel(previous);
        }
        let id = scheduler.schedule(now, self.delay, action);
        self.pending = Some(id);
        id
    }

    /// Cancel the pending countdown, if any
    pub fn cancel<A>(&mut self, scheduler: &mut TimerScheduler<A>) {
        if let Some(previous) = self.pending.take() {
            scheduler.cancel(previous);
        }
    }

    /// Claim an expired timer
    ///
    /// Returns true if `id` is this handle's pending timer, clearing it.
    pub fn acknowledge(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Forget the pending timer without touching a scheduler
    ///
    /// For use after the scheduler itself has been cleared.
    pub fn reset(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Action {
        Hide,
        Fade,
    }

    fn ms(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    #[test]
    fn test_drain_expired_in_deadline_order() {
        let mut scheduler = TimerScheduler::new();
        scheduler.schedule(ms(0), Duration::from_millis(300), Action::Fade);
        scheduler.schedule(ms(0), Duration::from_millis(100), Action::Hide);

        assert_eq!(scheduler.next_deadline(), Some(ms(100)));
        assert!(scheduler.drain_expired(ms(99)).is_empty());

        let fired: Vec<Action> = scheduler
            .drain_expired(ms(300))
            .into_iter()
            .map(|(_, action)| action)
            .collect();
        assert_eq!(fired, vec![Action::Hide, Action::Fade]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = TimerScheduler::new();
        let id = scheduler.schedule(ms(0), Duration::from_millis(10), Action::Hide);

        assert!(scheduler.is_pending(id));
        assert_eq!(scheduler.cancel(id), Some(Action::Hide));
        assert_eq!(scheduler.cancel(id), None);
        assert!(scheduler.drain_expired(ms(100)).is_empty());
    }

    #[test]
    fn test_debounce_burst_fires_once_after_last_trigger() {
        let mut scheduler = TimerScheduler::new();
        let mut debounce = Debounce::new(Duration::from_millis(1_500));

        debounce.trigger(&mut scheduler, ms(0), Action::Hide);
        debounce.trigger(&mut scheduler, ms(1_000), Action::Hide);
        let last = debounce.trigger(&mut scheduler, ms(2_000), Action::Hide);

        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.drain_expired(ms(3_499)).is_empty());

        let fired = scheduler.drain_expired(ms(3_500));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].0, last);
        assert!(debounce.acknowledge(last));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_debounce_ignores_foreign_timers() {
        let mut scheduler = TimerScheduler::new();
        let mut debounce = Debounce::new(Duration::from_millis(50));

        let other = scheduler.schedule(ms(0), Duration::from_millis(10), Action::Fade);
        debounce.trigger(&mut scheduler, ms(0), Action::Hide);

        assert!(!debounce.acknowledge(other));
        assert!(debounce.is_pending());

        debounce.cancel(&mut scheduler);
        assert!(!debounce.is_pending());
        assert_eq!(scheduler.len(), 1);
    }
}
