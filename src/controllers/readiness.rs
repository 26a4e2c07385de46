//! SDK readiness polling
//!
//! Third-party SDKs such as the Facebook JS SDK are injected with a script tag
//! and show up on `window` whenever the network gets around to it. There is no
//! load event we control, so the client probes for the global object on a
//! fixed interval until it appears.
//!
//! The poller is a small state machine. [`ReadinessPoller::step`] evaluates the
//! probe once and reports what to do next; [`ReadinessPoller::run`] drives the
//! steps with an injected sleep function (gloo timers in the browser, an
//! instant future in tests). Readiness is also published on a
//! `tokio::sync::watch` channel so other async code can await it instead of
//! polling on its own.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use tokio::sync::watch;

/// Lifecycle of an externally loaded dependency
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadinessState {
    /// Still waiting for the dependency
    Pending,
    /// Dependency is available; terminal
    Ready,
    /// Gave up after the configured number of probes; terminal
    TimedOut,
}

impl ReadinessState {
    pub fn is_ready(self) -> bool {
        matches!(self, ReadinessState::Ready)
    }

    pub fn is_settled(self) -> bool {
        !matches!(self, ReadinessState::Pending)
    }
}

/// Probe scheduling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between probes
    pub interval_ms: u32,
    /// Total number of probes before timing out (None = never time out)
    pub max_attempts: Option<u32>,
}

impl PollConfig {
    pub const DEFAULT_INTERVAL_MS: u32 = 100;
    /// 150 probes at 100ms is 15 seconds
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 150;
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: Self::DEFAULT_INTERVAL_MS,
            max_attempts: Some(Self::DEFAULT_MAX_ATTEMPTS),
        }
    }
}

/// Result of a single probe
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollStep {
    /// The probe succeeded just now; the caller owns the ready notification
    BecameReady,
    /// Probe again after this many milliseconds
    RetryAfter(u32),
    /// Attempt budget exhausted on this probe
    Exhausted,
    /// The poller was torn down
    Cancelled,
    /// A previous step already settled the poller; nothing was probed
    AlreadySettled(ReadinessState),
}

/// Polls a readiness probe until it succeeds, times out or is cancelled.
///
/// Cloning shares the underlying state, so a clone kept by a component's drop
/// hook can cancel the loop running in a spawned task.
#[derive(Clone, Debug)]
pub struct ReadinessPoller {
    config: PollConfig,
    attempts: Rc<Cell<u32>>,
    cancelled: Rc<Cell<bool>>,
    state: Rc<watch::Sender<ReadinessState>>,
}

impl ReadinessPoller {
    pub fn new(config: PollConfig) -> Self {
        let (state, _) = watch::channel(ReadinessState::Pending);
        Self {
            config,
            attempts: Rc::new(Cell::new(0)),
            cancelled: Rc::new(Cell::new(false)),
            state: Rc::new(state),
        }
    }

    pub fn state(&self) -> ReadinessState {
        *self.state.borrow()
    }

    /// Number of probes evaluated so far
    pub fn attempts(&self) -> u32 {
        self.attempts.get()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Stop polling. Pending re-checks become no-ops and no ready callback
    /// fires afterwards. Safe to call more than once.
    ///
    /// Waiters in [`settled`](Self::settled) are woken and see the state the
    /// poller stopped in.
    pub fn cancel(&self) {
        if !self.cancelled.replace(true) {
            log::debug!("Readiness poller cancelled after {} probes", self.attempts.get());
            self.state.send_modify(|_| {});
        }
    }

    /// Receiver that observes every state transition
    pub fn subscribe(&self) -> watch::Receiver<ReadinessState> {
        self.state.subscribe()
    }

    /// Resolve once the poller leaves `Pending` or is cancelled. A cancelled
    /// poller that never settled resolves to `Pending`.
    pub async fn settled(&self) -> ReadinessState {
        let mut rx = self.subscribe();
        let cancelled = self.cancelled.clone();
        let outcome = rx
            .wait_for(|state| state.is_settled() || cancelled.get())
            .await
            .map(|state| *state);
        // Sender lives as long as any clone of self, which we hold
        outcome.unwrap_or_else(|_| self.state())
    }

    /// Evaluate the probe once and transition state accordingly
    pub fn step<C>(&self, check: &mut C) -> PollStep
    where
        C: FnMut() -> bool,
    {
        if self.cancelled.get() {
            return PollStep::Cancelled;
        }

        let current = self.state();
        if current.is_settled() {
            return PollStep::AlreadySettled(current);
        }

        let attempt = self.attempts.get() + 1;
        self.attempts.set(attempt);

        if check() {
            self.state.send_replace(ReadinessState::Ready);
            log::debug!("Dependency ready after {} probe(s)", attempt);
            return PollStep::BecameReady;
        }

        match self.config.max_attempts {
            Some(max) if attempt >= max => {
                self.state.send_replace(ReadinessState::TimedOut);
                log::warn!("Dependency still missing after {} probes, giving up", attempt);
                PollStep::Exhausted
            }
            _ => PollStep::RetryAfter(self.config.interval_ms),
        }
    }

    /// Probe immediately, then every `interval_ms` until settled or cancelled.
    ///
    /// `on_ready` runs synchronously inside the step that observed readiness,
    /// at most once per poller no matter how many times `run` is called.
    pub async fn run<C, R, S, F>(&self, mut check: C, on_ready: R, mut sleep: S) -> ReadinessState
    where
        C: FnMut() -> bool,
        R: FnOnce(),
        S: FnMut(u32) -> F,
        F: Future<Output = ()>,
    {
        let mut on_ready = Some(on_ready);
        loop {
            match self.step(&mut check) {
                PollStep::BecameReady => {
                    if let Some(callback) = on_ready.take() {
                        callback();
                    }
                    return ReadinessState::Ready;
                }
                PollStep::RetryAfter(ms) => sleep(ms).await,
                PollStep::Exhausted => return ReadinessState::TimedOut,
                PollStep::Cancelled | PollStep::AlreadySettled(_) => return self.state(),
            }
        }
    }
}
