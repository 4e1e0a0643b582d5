//! A [`LoopHost`] for iced applications.
//!
//! iced has no imperative timers. Instead the application declares its
//! subscriptions after every update; this host remembers the single pending
//! tick and turns it into `window::frames` or `time::every`.

use std::time::Duration;

use iced::{time, window, Subscription};

use crate::scheduler::{LoopHost, LoopKind, LoopToken};

/// Shortest timer period handed to iced's interval.
const MIN_TIMER_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Frame(LoopToken),
    Timer(LoopToken, Duration),
}

impl Pending {
    fn token(self) -> LoopToken {
        match self {
            Pending::Frame(token) | Pending::Timer(token, _) => token,
        }
    }
}

/// Holds at most one pending tick and exposes it as a subscription.
#[derive(Debug, Default)]
pub struct SubscriptionHost {
    pending: Option<Pending>,
}

impl SubscriptionHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<(LoopKind, LoopToken)> {
        self.pending.map(|pending| match pending {
            Pending::Frame(token) => (LoopKind::Frame, token),
            Pending::Timer(token, _) => (LoopKind::Timer, token),
        })
    }

    /// Ticks for the pending loop, tagged with its token.
    ///
    /// The subscription identity only depends on the token, so re-arming the
    /// same loop keeps the underlying stream alive across ticks.
    pub fn subscription(&self) -> Subscription<LoopToken> {
        match self.pending {
            None => Subscription::none(),
            Some(Pending::Frame(token)) => window::frames().with(token).map(|(token, _)| token),
            Some(Pending::Timer(token, delay)) => time::every(delay.max(MIN_TIMER_PERIOD))
                .with(token)
                .map(|(token, _)| token),
        }
    }
}

impl LoopHost for SubscriptionHost {
    fn schedule_frame(&mut self, token: LoopToken) {
        self.pending = Some(Pending::Frame(token));
    }

    fn schedule_timer(&mut self, token: LoopToken, delay: Duration) {
        self.pending = Some(Pending::Timer(token, delay));
    }

    fn cancel(&mut self, token: LoopToken) {
        if self.pending.is_some_and(|pending| pending.token() == token) {
            self.pending = None;
        }
    }
}
