use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::providers::traits::DashboardApi;
use crate::state::coin_list::CoinListAction;

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Owns the two timers of an active coin list view.
///
/// - fetch task: fetches immediately, then once per `refresh_interval`,
///   whatever the previous outcome was
/// - countdown task: emits `Tick` every second
///
/// Both deliver `CoinListAction`s over the channel; the view applies them
/// through `CoinListState::update`. Dropping the scheduler (or calling
/// [`shutdown`](Self::shutdown)) aborts both tasks, including a fetch that
/// is still in flight.
pub struct RefreshScheduler {
    fetch_task: JoinHandle<()>,
    countdown_task: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Spawn both timers on the current tokio runtime.
    pub fn spawn(
        api: Arc<dyn DashboardApi>,
        refresh_interval: Duration,
        actions: UnboundedSender<CoinListAction>,
    ) -> Self {
        let refresh_interval = refresh_interval.max(COUNTDOWN_TICK);
        let fetch_actions = actions.clone();
        let fetch_task = tokio::spawn(async move {
            let mut ticker = interval(refresh_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // First tick completes immediately: that is the initial fetch.
                ticker.tick().await;
                let result = api.fetch_coins().await;
                if fetch_actions
                    .send(CoinListAction::FetchCompleted(result))
                    .is_err()
                {
                    break;
                }
            }
            tracing::debug!("refresh fetch task stopped");
        });

        let countdown_task = tokio::spawn(async move {
            let mut ticker = interval(COUNTDOWN_TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if actions.send(CoinListAction::Tick).is_err() {
                    break;
                }
            }
            tracing::debug!("countdown task stopped");
        });

        tracing::info!(interval_secs = refresh_interval.as_secs(), "refresh scheduler started");
        Self {
            fetch_task,
            countdown_task,
        }
    }

    /// Stop both timers now.
    pub fn shutdown(&self) {
        self.fetch_task.abort();
        self.countdown_task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.fetch_task.is_finished() && self.countdown_task.is_finished()
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
