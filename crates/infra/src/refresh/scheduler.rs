use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use stocksense_ai::PredictionProvider;
use stocksense_inventory::{CategoryInsight, HistoricalSeries, InventorySnapshot};

use super::cycle::CycleContext;
use super::{RefreshConfig, RefreshError, validate_interval};
use crate::store::InventoryStore;

/// Whether the scheduler currently has a timer armed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Control channels of a running worker task.
#[derive(Debug)]
struct Worker {
    shutdown: watch::Sender<bool>,
    interval: watch::Sender<Duration>,
    trigger: mpsc::Sender<()>,
    join: JoinHandle<StdRng>,
}

/// Owns the refresh timer and drives cycles into an [`InventoryStore`].
///
/// - `start` arms the timer and runs one cycle immediately.
/// - `set_interval` re-arms the timer (and runs one cycle immediately) without
///   interrupting an in-flight cycle.
/// - `stop` cancels the timer; a cycle already in flight finishes but its
///   result is discarded. Once `stop` returns nothing else is committed.
///
/// Cycles never overlap: the worker runs them one at a time, and ticks that
/// come due while a cycle is in flight are skipped rather than queued.
pub struct RefreshScheduler {
    config: RefreshConfig,
    store: Arc<InventoryStore>,
    context: CycleContext,
    /// Parked while idle; owned by the worker while running.
    rng: Option<StdRng>,
    worker: Option<Worker>,
}

impl core::fmt::Debug for RefreshScheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RefreshScheduler")
            .field("config", &self.config)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl RefreshScheduler {
    pub fn new(
        config: RefreshConfig,
        store: Arc<InventoryStore>,
        provider: Arc<dyn PredictionProvider>,
        history: HistoricalSeries,
        baseline_insights: Vec<CategoryInsight>,
    ) -> Result<Self, RefreshError> {
        validate_interval(config.interval)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let context = CycleContext {
            provider,
            history: Arc::new(history),
            baseline_insights: baseline_insights.into(),
            basis: config.insight_basis,
        };

        Ok(Self {
            config,
            store,
            context,
            rng: Some(rng),
            worker: None,
        })
    }

    pub fn state(&self) -> SchedulerState {
        if self.worker.is_some() {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    pub fn interval(&self) -> Duration {
        self.config.interval
    }

    pub fn store(&self) -> &Arc<InventoryStore> {
        &self.store
    }

    /// Latest committed snapshot.
    pub fn snapshot(&self) -> Arc<InventorySnapshot> {
        self.store.snapshot()
    }

    /// Arm the timer and run the first cycle immediately.
    ///
    /// Starting an already running scheduler is a no-op. Must be called from
    /// within a tokio runtime.
    pub fn start(&mut self) -> Result<(), RefreshError> {
        if self.worker.is_some() {
            debug!("refresh scheduler already running");
            return Ok(());
        }
        validate_interval(self.config.interval)?;
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(RefreshError::NoRuntime);
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (interval_tx, interval_rx) = watch::channel(self.config.interval);
        // Coalesce: capacity 1; extra triggers while one is pending are dropped.
        let (trigger_tx, trigger_rx) = mpsc::channel::<()>(1);

        let rng = self.rng.take().unwrap_or_else(StdRng::from_entropy);
        let join = tokio::spawn(refresh_loop(
            self.context.clone(),
            self.store.clone(),
            rng,
            interval_rx,
            shutdown_rx,
            trigger_rx,
        ));

        self.worker = Some(Worker {
            shutdown: shutdown_tx,
            interval: interval_tx,
            trigger: trigger_tx,
            join,
        });
        Ok(())
    }

    /// Change the cadence.
    ///
    /// Zero is rejected and leaves the current interval in place. While
    /// running, the timer is re-armed after any in-flight cycle completes.
    pub fn set_interval(&mut self, interval: Duration) -> Result<(), RefreshError> {
        let interval = validate_interval(interval)?;
        if interval == self.config.interval {
            return Ok(());
        }

        info!(
            from_ms = self.config.interval.as_millis() as u64,
            to_ms = interval.as_millis() as u64,
            "refresh interval changed"
        );
        self.config.interval = interval;

        if let Some(worker) = &self.worker {
            let _ = worker.interval.send(interval);
        }
        Ok(())
    }

    /// Request an extra cycle as soon as the worker is free.
    ///
    /// Returns `false` when idle. Triggers are coalesced: if one is already
    /// pending this is a no-op.
    pub fn refresh_now(&self) -> bool {
        match &self.worker {
            Some(worker) => {
                let _ = worker.trigger.try_send(());
                true
            }
            None => false,
        }
    }

    /// Cancel the timer and wait for the worker to exit.
    ///
    /// A cycle in flight at this point is allowed to finish, but its output is
    /// discarded.
    pub async fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        let _ = worker.shutdown.send(true);
        match worker.join.await {
            Ok(rng) => self.rng = Some(rng),
            Err(e) => {
                warn!(error = %e, "refresh worker did not exit cleanly");
                self.rng = Some(StdRng::from_entropy());
            }
        }
    }
}

fn stop_requested(shutdown_rx: &watch::Receiver<bool>) -> bool {
    // A dropped sender (scheduler dropped without `stop`) counts as a stop.
    *shutdown_rx.borrow() || shutdown_rx.has_changed().is_err()
}

async fn refresh_loop(
    context: CycleContext,
    store: Arc<InventoryStore>,
    mut rng: StdRng,
    mut interval_rx: watch::Receiver<Duration>,
    mut shutdown_rx: watch::Receiver<bool>,
    mut trigger_rx: mpsc::Receiver<()>,
) -> StdRng {
    let mut period = *interval_rx.borrow_and_update();
    info!(interval_ms = period.as_millis() as u64, "refresh scheduler started");

    'arm: loop {
        // First tick completes immediately: every (re-)arm runs a cycle at once.
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = shutdown_rx.changed() => break 'arm,

                changed = interval_rx.changed() => {
                    if changed.is_err() {
                        break 'arm;
                    }
                    period = *interval_rx.borrow_and_update();
                    debug!(interval_ms = period.as_millis() as u64, "re-arming refresh timer");
                    continue 'arm;
                }

                _ = ticker.tick() => {}

                Some(()) = trigger_rx.recv() => {
                    debug!("manual refresh requested");
                }
            }

            let previous = store.snapshot();
            let output = context
                .run(&previous, &mut rng, Utc::now().date_naive())
                .await;

            if stop_requested(&shutdown_rx) {
                debug!("scheduler stopped mid-cycle; discarding cycle output");
                break 'arm;
            }

            let committed = store.commit(output.products, output.category_insights, output.forecast);
            debug!(
                cycle = committed.cycle,
                products = committed.products.len(),
                fallbacks = output.fallbacks,
                "refresh cycle committed"
            );
        }
    }

    info!("refresh scheduler stopped");
    rng
}
