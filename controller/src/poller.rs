use crate::{
    client::Controller,
    health::Sample,
    scale::{
        Percentages,
        ScaleTracker,
    },
};
use chrono::{
    DateTime,
    Local,
};
use std::{
    fmt,
    time::Duration,
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Time between the end of one poll cycle and the start of the next.
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// A successful poll, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub sample: Sample,
    pub percentages: Percentages,
    /// Bytes per second the percentages are relative to.
    pub peak_bps: f64,
    pub received_at: DateTime<Local>,
}

/// Latest outcome of the poll loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PollStatus {
    #[default]
    Connecting,
    Reading(Reading),
    Failed {
        error: String,
        at: DateTime<Local>,
    },
}

impl PollStatus {
    pub fn failed(error: impl fmt::Display) -> Self {
        Self::Failed {
            error: error.to_string(),
            at: Local::now(),
        }
    }
}

/// Drives fetch, validate and scale on a fixed cadence, logging in again whenever a cycle fails.
#[derive(Debug)]
pub struct Poller<C> {
    controller: C,
    scale: ScaleTracker,
    interval: Duration,
}

impl<C: Controller> Poller<C> {
    pub fn new(controller: C, scale: ScaleTracker) -> Self {
        Self {
            controller,
            scale,
            interval: POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// One fetch, followed by a login attempt if the fetch failed.
    pub async fn poll_once(&mut self) -> PollStatus {
        match self.controller.fetch_health().await {
            Ok(sample) => {
                let percentages = self.scale.observe(&sample);
                let peak_bps = self.scale.peak();
                debug!(
                    latency_ms = sample.latency_ms,
                    upload_bps = sample.upload_bps,
                    download_bps = sample.download_bps,
                    peak_bps,
                    "health sample"
                );
                PollStatus::Reading(Reading {
                    sample,
                    percentages,
                    peak_bps,
                    received_at: Local::now(),
                })
            }
            Err(err) => {
                // Most often the session cookie expired.
                warn!(%err, "poll failed, logging in again");
                if let Err(login_err) = self.controller.login().await {
                    warn!(err = %login_err, "login failed");
                }
                PollStatus::failed(err)
            }
        }
    }

    /// Logs in, then polls until cancelled or until nobody watches `status` anymore.
    pub async fn run(mut self, status: watch::Sender<PollStatus>, cancellation_token: CancellationToken) {
        info!(interval = ?self.interval, "starting poll loop");

        tokio::select! {
            biased;
            _ = cancellation_token.cancelled() => return,
            result = self.controller.login() => {
                if let Err(err) = result {
                    warn!(%err, "initial login failed");
                    status.send_replace(PollStatus::failed(err));
                }
            }
        }

        loop {
            let next = tokio::select! {
                biased;
                _ = cancellation_token.cancelled() => break,
                next = self.poll_once() => next,
            };

            if status.send(next).is_err() {
                debug!("status has no receivers left");
                break;
            }

            tokio::select! {
                biased;
                _ = cancellation_token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("poll loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{
        AuthError,
        FetchError,
        PollError,
        SchemaError,
    };
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use std::{
        collections::VecDeque,
        sync::{
            atomic::{
                AtomicUsize,
                Ordering,
            },
            Arc,
        },
    };

    const SAMPLE: Sample = Sample {
        latency_ms: 7.0,
        upload_bps: 2_097_152.0,
        download_bps: 1_048_576.0,
    };

    #[derive(Debug, Default)]
    struct ScriptedController {
        health: VecDeque<Result<Sample, PollError>>,
        login_fails: bool,
        logins: Arc<AtomicUsize>,
    }

    impl ScriptedController {
        fn new(health: impl IntoIterator<Item = Result<Sample, PollError>>) -> Self {
            Self {
                health: health.into_iter().collect(),
                ..Default::default()
            }
        }
    }

    impl Controller for ScriptedController {
        async fn login(&mut self) -> Result<(), AuthError> {
            self.logins.fetch_add(1, Ordering::SeqCst);
            if self.login_fails {
                Err(AuthError::Rejected(StatusCode::BAD_REQUEST))
            } else {
                Ok(())
            }
        }

        async fn fetch_health(&mut self) -> Result<Sample, PollError> {
            self.health
                .pop_front()
                .unwrap_or(Err(SchemaError::MissingData.into()))
        }
    }

    #[tokio::test]
    async fn success_is_scaled() {
        let controller = ScriptedController::new([Ok(SAMPLE)]);
        let logins = controller.logins.clone();
        let mut poller = Poller::new(controller, ScaleTracker::default());

        let PollStatus::Reading(reading) = poller.poll_once().await else {
            panic!("expected a reading");
        };
        assert_eq!(reading.sample, SAMPLE);
        assert_eq!(
            reading.percentages,
            Percentages {
                upload: 100.0,
                download: 50.0,
            }
        );
        assert_eq!(reading.peak_bps, 2_097_152.0);
        assert_eq!(logins.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_triggers_a_login() {
        let controller = ScriptedController::new([
            Err(FetchError::Status(StatusCode::UNAUTHORIZED).into()),
            Err(SchemaError::TooShort { len: 0 }.into()),
        ]);
        let logins = controller.logins.clone();
        let mut poller = Poller::new(controller, ScaleTracker::default());

        let PollStatus::Failed { error, .. } = poller.poll_once().await else {
            panic!("expected a failure");
        };
        assert!(error.contains("401"), "{error}");
        assert_eq!(logins.load(Ordering::SeqCst), 1);

        assert!(matches!(poller.poll_once().await, PollStatus::Failed { .. }));
        assert_eq!(logins.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_login_does_not_stop_polling() {
        let mut controller = ScriptedController::new([
            Err(SchemaError::MissingField("latency").into()),
            Ok(SAMPLE),
        ]);
        controller.login_fails = true;
        let mut poller = Poller::new(controller, ScaleTracker::default());

        assert!(matches!(poller.poll_once().await, PollStatus::Failed { .. }));
        assert!(matches!(poller.poll_once().await, PollStatus::Reading(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn run_retries_on_a_fixed_cadence() {
        let controller = ScriptedController::new([Err(SchemaError::NotAnArray.into()), Ok(SAMPLE)]);
        let logins = controller.logins.clone();
        let (status_tx, mut status_rx) = watch::channel(PollStatus::Connecting);
        let token = CancellationToken::new();
        let task = tokio::spawn(Poller::new(controller, ScaleTracker::default()).run(status_tx, token.clone()));

        status_rx.changed().await.unwrap();
        let failed_at = tokio::time::Instant::now();
        assert!(matches!(*status_rx.borrow_and_update(), PollStatus::Failed { .. }));
        // The initial login plus the one after the failed poll.
        assert_eq!(logins.load(Ordering::SeqCst), 2);

        status_rx.changed().await.unwrap();
        assert!(failed_at.elapsed() >= POLL_INTERVAL);
        assert!(matches!(*status_rx.borrow_and_update(), PollStatus::Reading(_)));

        token.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn run_stops_without_receivers() {
        let controller = ScriptedController::new([Ok(SAMPLE)]);
        let (status_tx, status_rx) = watch::channel(PollStatus::Connecting);
        drop(status_rx);

        let task = tokio::spawn(
            Poller::new(controller, ScaleTracker::default())
                .with_interval(Duration::from_millis(10))
                .run(status_tx, CancellationToken::new()),
        );
        task.await.unwrap();
    }

    #[tokio::test]
    async fn cancelled_before_start_leaves_status_untouched() {
        let mut controller = ScriptedController::new([]);
        controller.login_fails = true;
        let (status_tx, status_rx) = watch::channel(PollStatus::Connecting);
        let token = CancellationToken::new();
        token.cancel();

        Poller::new(controller, ScaleTracker::default())
            .run(status_tx, token)
            .await;
        assert_eq!(*status_rx.borrow(), PollStatus::Connecting);
    }
}
