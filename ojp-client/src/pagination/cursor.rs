//! Paginated trip search.
//!
//! Keeps the time window covered by the trips shown so far and a
//! fingerprint of every trip already surfaced. "Next" and "previous"
//! re-issue the last search anchored at the window edges and drop trips
//! that were already returned, so the union of all pages is duplicate free.

use std::collections::HashSet;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::{Timestamp, TripDelivery, TripFingerprint, TripResult};
use crate::ojp::{DepArrTime, NumberOfResults, OjpClient, OjpError, Transport, TripRequest};

/// Session state of a cursor.
#[derive(Debug, Default)]
struct CursorState {
    min_start: Option<Timestamp>,
    max_start: Option<Timestamp>,
    seen: HashSet<TripFingerprint>,
    last_request: Option<TripRequest>,
}

/// Outcome of filtering one page, not yet applied to the state.
struct Page {
    kept: Vec<TripResult>,
    fresh: Vec<TripFingerprint>,
    min_start: Option<Timestamp>,
    max_start: Option<Timestamp>,
}

/// Stateful trip search over an [`OjpClient`].
///
/// All operations lock the session state for their whole duration, so
/// concurrent calls on one loader run one after another. State is only
/// written once a page has been received and filtered; a failed or
/// cancelled load leaves it as it was.
pub struct PaginatedTripLoader<T> {
    client: OjpClient<T>,
    state: Mutex<CursorState>,
}

impl<T: Transport> PaginatedTripLoader<T> {
    pub fn new(client: OjpClient<T>) -> Self {
        Self {
            client,
            state: Mutex::new(CursorState::default()),
        }
    }

    pub fn client(&self) -> &OjpClient<T> {
        &self.client
    }

    /// Run `request` with the given result window and remember it for
    /// [`load_next`](Self::load_next) and [`load_previous`](Self::load_previous).
    ///
    /// Starts a new window: trips seen by earlier loads are forgotten and
    /// the boundaries come from this page alone. Trip summaries and
    /// duplicates within the page are removed from the delivery.
    pub async fn load_initial(
        &self,
        request: TripRequest,
        number_of_results: NumberOfResults,
    ) -> Result<TripDelivery, OjpError> {
        let mut state = self.state.lock().await;
        self.load(&mut state, request, number_of_results, Window::Restart)
            .await
    }

    /// Load up to `count` trips departing after the latest trip seen.
    ///
    /// Fails with [`OjpError::PreconditionFailed`] unless an earlier load
    /// returned at least one trip.
    pub async fn load_next(&self, count: u32) -> Result<TripDelivery, OjpError> {
        let mut state = self.state.lock().await;
        let (Some(request), Some(max_start)) = (state.last_request.clone(), state.max_start)
        else {
            return Err(OjpError::PreconditionFailed(
                "load_next requires a previous load that returned trips",
            ));
        };

        let request = TripRequest {
            at: DepArrTime::Departure(max_start),
            ..request
        };
        self.load(&mut state, request, NumberOfResults::After(count), Window::Extend)
            .await
    }

    /// Load up to `count` trips departing before the earliest trip seen.
    ///
    /// Fails with [`OjpError::PreconditionFailed`] unless an earlier load
    /// returned at least one trip.
    pub async fn load_previous(&self, count: u32) -> Result<TripDelivery, OjpError> {
        let mut state = self.state.lock().await;
        let (Some(request), Some(min_start)) = (state.last_request.clone(), state.min_start)
        else {
            return Err(OjpError::PreconditionFailed(
                "load_previous requires a previous load that returned trips",
            ));
        };

        let request = TripRequest {
            at: DepArrTime::Departure(min_start),
            ..request
        };
        self.load(&mut state, request, NumberOfResults::Before(count), Window::Extend)
            .await
    }

    /// Forget the window and the seen trips. The last request is kept.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.min_start = None;
        state.max_start = None;
        state.seen.clear();
        debug!("trip cursor reset");
    }

    /// Earliest start time among the trips returned so far.
    pub async fn min_start(&self) -> Option<Timestamp> {
        self.state.lock().await.min_start
    }

    /// Latest start time among the trips returned so far.
    pub async fn max_start(&self) -> Option<Timestamp> {
        self.state.lock().await.max_start
    }

    /// Number of distinct trips returned so far.
    pub async fn seen_count(&self) -> usize {
        self.state.lock().await.seen.len()
    }

    pub async fn last_request(&self) -> Option<TripRequest> {
        self.state.lock().await.last_request.clone()
    }

    async fn load(
        &self,
        state: &mut CursorState,
        request: TripRequest,
        number_of_results: NumberOfResults,
        window: Window,
    ) -> Result<TripDelivery, OjpError> {
        let mut issued = request.clone();
        issued.params.number_of_results = number_of_results;

        let mut delivery = self.client.request_trips(&issued).await?;

        let received = delivery.trip_results.len();
        let results = std::mem::take(&mut delivery.trip_results);
        let page = match window {
            Window::Restart => filter_page(&HashSet::new(), results),
            Window::Extend => filter_page(&state.seen, results),
        };

        // Nothing below may fail or suspend.
        match window {
            Window::Restart => {
                state.seen = page.fresh.into_iter().collect();
                state.min_start = page.min_start;
                state.max_start = page.max_start;
            }
            Window::Extend => {
                state.seen.extend(page.fresh);
                state.min_start = earliest(state.min_start, page.min_start);
                state.max_start = latest(state.max_start, page.max_start);
            }
        }
        state.last_request = Some(request);

        info!(
            received,
            kept = page.kept.len(),
            seen = state.seen.len(),
            "loaded trip page"
        );
        delivery.trip_results = page.kept;
        Ok(delivery)
    }
}

/// How a load combines with the current window.
#[derive(Debug, Clone, Copy)]
enum Window {
    Restart,
    Extend,
}

/// Keep full trips whose fingerprint is neither in `seen` nor earlier in
/// the same page, preserving order.
fn filter_page(seen: &HashSet<TripFingerprint>, results: Vec<TripResult>) -> Page {
    let mut page = Page {
        kept: Vec::with_capacity(results.len()),
        fresh: Vec::new(),
        min_start: None,
        max_start: None,
    };
    let mut in_page = HashSet::new();

    for result in results {
        let Some(trip) = result.trip() else {
            continue;
        };
        let fingerprint = trip.fingerprint();
        if seen.contains(&fingerprint) || !in_page.insert(fingerprint) {
            debug!(id = %result.id, %fingerprint, "dropping duplicate trip");
            continue;
        }

        page.min_start = earliest(page.min_start, Some(trip.start_time));
        page.max_start = latest(page.max_start, Some(trip.start_time));
        page.fresh.push(fingerprint);
        page.kept.push(result);
    }
    page
}

fn earliest(a: Option<Timestamp>, b: Option<Timestamp>) -> Option<Timestamp> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn latest(a: Option<Timestamp>, b: Option<Timestamp>) -> Option<Timestamp> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}
