//! Recurring live counters for an open session.
//!
//! A `LiveTicker` runs a tokio task that samples a snapshot on every tick
//! and forwards it over a channel. The task is tied to a
//! `CancellationToken`; the returned `TickerHandle` cancels it when
//! dropped, so it never outlives the view that started it.

use crate::core::calculator::elapsed::{break_duration, open_break, worked_duration};
use crate::errors::AppResult;
use crate::models::{AttendanceSession, BreakRecord, BreakType};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Counters of one session at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSnapshot {
    pub at: DateTime<Utc>,
    pub session_id: i64,
    pub worked: Duration,
    pub open_break: Option<(BreakType, Duration)>,
    /// False once the session has been closed; the ticker stops after
    /// delivering such a snapshot.
    pub active: bool,
}

impl LiveSnapshot {
    pub fn capture(session: &AttendanceSession, breaks: &[BreakRecord], now: DateTime<Utc>) -> Self {
        Self {
            at: now,
            session_id: session.id,
            worked: worked_duration(session, breaks, now),
            open_break: open_break(breaks).map(|b| (b.break_type, break_duration(b, now))),
            active: session.status.is_active(),
        }
    }
}

pub struct LiveTicker {
    period: std::time::Duration,
}

impl LiveTicker {
    pub fn new(period: std::time::Duration) -> Self {
        Self {
            period: period.max(std::time::Duration::from_millis(10)),
        }
    }

    pub fn every_seconds(secs: u64) -> Self {
        Self::new(std::time::Duration::from_secs(secs.max(1)))
    }

    /// Start ticking. `produce` is called once per tick; an error or an
    /// inactive snapshot is delivered and then ends the task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(self, mut produce: F) -> TickerHandle
    where
        F: FnMut() -> AppResult<LiveSnapshot> + Send + 'static,
    {
        let token = CancellationToken::new();
        let child = token.child_token();
        let (tx, rx) = mpsc::channel(8);
        let period = self.period;

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = child.cancelled() => break,
                    _ = interval.tick() => {
                        let sample = produce();
                        let last = match &sample {
                            Ok(snapshot) => !snapshot.active,
                            Err(_) => true,
                        };
                        if tx.send(sample).await.is_err() || last {
                            break;
                        }
                    }
                }
            }
        });

        TickerHandle {
            token: token.clone(),
            _guard: token.drop_guard(),
            task: Some(task),
            rx,
        }
    }
}

pub struct TickerHandle {
    token: CancellationToken,
    _guard: DropGuard,
    task: Option<JoinHandle<()>>,
    rx: mpsc::Receiver<AppResult<LiveSnapshot>>,
}

impl TickerHandle {
    /// Next snapshot; `None` once the ticker has stopped.
    pub async fn next(&mut self) -> Option<AppResult<LiveSnapshot>> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled() || self.task.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Cancel and wait for the task to finish.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}
