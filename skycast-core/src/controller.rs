//! Resolution controller: turns query changes into geocode + forecast
//! lookups and publishes the resulting view state.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::{
    error::LookupError,
    forecast::ForecastClient,
    geocode::GeocodeClient,
    model::{ForecastDay, Place},
    store::LocationStore,
};

/// Queries shorter than this are treated as empty and trigger no lookup.
const MIN_QUERY_CHARS: usize = 2;

/// Whether a resolution sequence is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
}

/// Everything the presentation layer needs to render.
///
/// `place` and `days` are only ever replaced together, by the sequence that
/// produced both, so a forecast is never shown against the wrong location.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub query: String,
    pub load: LoadState,
    pub place: Option<Place>,
    pub days: Vec<ForecastDay>,
}

/// Orchestrates input changes into lookup sequences.
///
/// Each [`submit`](Controller::submit) call is one sequence and allocates a
/// fresh token from a monotonically increasing counter. State publications
/// are gated on the token still being the newest, so a superseded sequence
/// publishes nothing: the last submitted query wins even when an older
/// lookup completes later in wall-clock time.
#[derive(Debug)]
pub struct Controller {
    geocoder: GeocodeClient,
    forecaster: ForecastClient,
    store: LocationStore,
    state: watch::Sender<ViewState>,
    seq: AtomicU64,
}

impl Controller {
    pub fn new(geocoder: GeocodeClient, forecaster: ForecastClient, store: LocationStore) -> Self {
        let (state, _) = watch::channel(ViewState::default());

        Self {
            geocoder,
            forecaster,
            store,
            state,
            seq: AtomicU64::new(0),
        }
    }

    /// Subscribe to state updates.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Current state, cloned.
    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Run one resolution sequence for `query`.
    ///
    /// Short queries clear the display without any network activity; the
    /// token bump also makes every in-flight sequence stale, so the clear
    /// supersedes their eventual results. Failures are logged and swallowed,
    /// leaving the previously displayed state in place. On every path the
    /// load state ends `Idle` for the newest sequence.
    pub async fn submit(&self, query: &str) {
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        self.publish(token, |s| s.query = query.to_string());

        if query.chars().count() < MIN_QUERY_CHARS {
            self.publish(token, |s| {
                s.place = None;
                s.days.clear();
                s.load = LoadState::Idle;
            });
            return;
        }

        self.publish(token, |s| s.load = LoadState::Loading);

        match self.lookup(query).await {
            Ok((place, days)) => {
                let published = self.publish(token, move |s| {
                    s.place = Some(place);
                    s.days = days;
                });

                // Persist only what actually made it to the display.
                if published {
                    if let Err(e) = self.store.remember(query) {
                        tracing::warn!(error = %e, "failed to persist last location");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "lookup failed");
            }
        }

        self.publish(token, |s| s.load = LoadState::Idle);
    }

    /// The two-step sequence body: geocode, then fetch for the match.
    async fn lookup(&self, query: &str) -> Result<(Place, Vec<ForecastDay>), LookupError> {
        let place = self.geocoder.resolve(query).await?;
        tracing::debug!(name = %place.name, timezone = %place.timezone, "resolved location");

        let days = self.forecaster.daily(&place).await?;
        Ok((place, days))
    }

    /// Apply `update` and notify subscribers, unless a newer sequence has
    /// started since `token` was issued. Returns whether the update ran.
    fn publish(&self, token: u64, update: impl FnOnce(&mut ViewState)) -> bool {
        if self.seq.load(Ordering::SeqCst) != token {
            return false;
        }

        self.state.send_modify(update);
        true
    }
}
