//! Arbitration between the continuous redraw loop and the idle cache
//! expansion loop.
//!
//! The host owns the actual frame-pacing and timer primitives and exposes
//! them through [`LoopHost`]. Every loop started here is one-shot per tick:
//! the scheduler re-arms it after each accepted tick instead of recursing.

use std::time::Duration;

// ================================================================================
// Types
// ================================================================================

/// Which scheduling loop, if any, is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulingMode {
    /// No loop scheduled.
    #[default]
    Idle,
    /// Per-frame redraw while the user drags.
    Continuous,
    /// Timed incremental cache fill while the view is static.
    Expanding,
}

/// The host primitive a loop is paced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopKind {
    Frame,
    Timer,
}

/// Identity of one started loop. Ticks carrying any other token are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopToken(u64);

/// Host-side scheduling primitives.
pub trait LoopHost {
    /// Requests one tick for `token` on the next display frame.
    fn schedule_frame(&mut self, token: LoopToken);

    /// Requests one tick for `token` after `delay`.
    fn schedule_timer(&mut self, token: LoopToken, delay: Duration);

    /// Drops any pending tick for `token`.
    fn cancel(&mut self, token: LoopToken);
}

#[derive(Debug, Clone, Copy)]
struct ActiveLoop {
    kind: LoopKind,
    token: LoopToken,
    armed: bool,
}

// ================================================================================
// Scheduler
// ================================================================================

/// Owns the [`SchedulingMode`] and the single active loop.
#[derive(Debug)]
pub struct RenderScheduler {
    mode: SchedulingMode,
    active: Option<ActiveLoop>,
    next_token: u64,
    expansion_delay: Duration,
}

impl RenderScheduler {
    pub fn new(expansion_delay: Duration) -> Self {
        Self {
            mode: SchedulingMode::Idle,
            active: None,
            next_token: 0,
            expansion_delay,
        }
    }

    pub fn mode(&self) -> SchedulingMode {
        self.mode
    }

    /// The running loop's kind and token.
    pub fn active_loop(&self) -> Option<(LoopKind, LoopToken)> {
        self.active.map(|active| (active.kind, active.token))
    }

    /// Moves to `target`, cancelling the current loop before starting the
    /// next one. Returns `false` when already in `target`, in which case the
    /// running loop is left untouched.
    pub fn transition(&mut self, target: SchedulingMode, host: &mut impl LoopHost) -> bool {
        if self.mode == target {
            return false;
        }

        if let Some(active) = self.active.take() {
            host.cancel(active.token);
        }

        tracing::debug!(from = ?self.mode, to = ?target, "scheduling transition");
        self.mode = target;

        let kind = match target {
            SchedulingMode::Idle => return true,
            SchedulingMode::Continuous => LoopKind::Frame,
            SchedulingMode::Expanding => LoopKind::Timer,
        };

        let token = LoopToken(self.next_token);
        self.next_token += 1;
        self.active = Some(ActiveLoop {
            kind,
            token,
            armed: false,
        });
        self.rearm(host);
        true
    }

    /// Consumes a tick. Returns the loop kind only when `token` belongs to
    /// the active loop and a tick was pending for it.
    pub fn accept_tick(&mut self, token: LoopToken) -> Option<LoopKind> {
        match self.active.as_mut() {
            Some(active) if active.token == token && active.armed => {
                active.armed = false;
                Some(active.kind)
            }
            _ => {
                tracing::trace!(?token, "stale tick ignored");
                None
            }
        }
    }

    /// Schedules the next tick of the active loop, if it is not already
    /// pending.
    pub fn rearm(&mut self, host: &mut impl LoopHost) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.armed {
            return;
        }
        match active.kind {
            LoopKind::Frame => host.schedule_frame(active.token),
            LoopKind::Timer => host.schedule_timer(active.token, self.expansion_delay),
        }
        active.armed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Pending {
        ticks: Vec<(LoopKind, LoopToken)>,
    }

    impl LoopHost for Pending {
        fn schedule_frame(&mut self, token: LoopToken) {
            self.ticks.push((LoopKind::Frame, token));
        }
        fn schedule_timer(&mut self, token: LoopToken, _delay: Duration) {
            self.ticks.push((LoopKind::Timer, token));
        }
        fn cancel(&mut self, token: LoopToken) {
            self.ticks.retain(|(_, t)| *t != token);
        }
    }

    #[test]
    fn starts_idle() {
        let scheduler = RenderScheduler::new(Duration::ZERO);
        assert_eq!(scheduler.mode(), SchedulingMode::Idle);
        assert_eq!(scheduler.active_loop(), None);
    }

    #[test]
    fn switching_loops_cancels_the_previous_one() {
        let mut host = Pending::default();
        let mut scheduler = RenderScheduler::new(Duration::from_millis(5));

        assert!(scheduler.transition(SchedulingMode::Expanding, &mut host));
        let (_, expanding) = scheduler.active_loop().unwrap();
        assert_eq!(host.ticks, vec![(LoopKind::Timer, expanding)]);

        assert!(scheduler.transition(SchedulingMode::Continuous, &mut host));
        let (_, continuous) = scheduler.active_loop().unwrap();
        assert_eq!(host.ticks, vec![(LoopKind::Frame, continuous)]);
        assert_eq!(scheduler.accept_tick(expanding), None);
    }

    #[test]
    fn same_mode_is_a_no_op() {
        let mut host = Pending::default();
        let mut scheduler = RenderScheduler::new(Duration::ZERO);
        scheduler.transition(SchedulingMode::Expanding, &mut host);
        let before = scheduler.active_loop();

        assert!(!scheduler.transition(SchedulingMode::Expanding, &mut host));
        assert_eq!(scheduler.active_loop(), before);
        assert_eq!(host.ticks.len(), 1);
    }

    #[test]
    fn ticks_are_accepted_once_per_arm() {
        let mut host = Pending::default();
        let mut scheduler = RenderScheduler::new(Duration::ZERO);
        scheduler.transition(SchedulingMode::Continuous, &mut host);
        let (_, token) = scheduler.active_loop().unwrap();

        assert_eq!(scheduler.accept_tick(token), Some(LoopKind::Frame));
        assert_eq!(scheduler.accept_tick(token), None);

        scheduler.rearm(&mut host);
        scheduler.rearm(&mut host);
        assert_eq!(host.ticks.len(), 2);
        assert_eq!(scheduler.accept_tick(token), Some(LoopKind::Frame));
    }

    #[test]
    fn idle_cancels_without_starting() {
        let mut host = Pending::default();
        let mut scheduler = RenderScheduler::new(Duration::ZERO);
        scheduler.transition(SchedulingMode::Continuous, &mut host);
        scheduler.transition(SchedulingMode::Idle, &mut host);
        assert!(host.ticks.is_empty());
        assert_eq!(scheduler.active_loop(), None);
    }
}
