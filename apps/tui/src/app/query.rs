use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::api::{AthleteQuery, AthleteSource, FetchError, QueryMode};
use crate::domain::{Athlete, MedalFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// What the panel should currently show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    pub mode: QueryMode,
    pub parameter: String,
    pub status: QueryStatus,
    pub results: Vec<Athlete>,
    pub error_message: Option<String>,
}

/// Result of a spawned request, tagged with the token it was issued under.
#[derive(Debug)]
pub struct QueryCompletion {
    pub token: u64,
    pub query: AthleteQuery,
    pub outcome: Result<Vec<Athlete>, FetchError>,
}

/// Single owner of the active query.
///
/// Every request gets a fresh token. Requests run as spawned tasks that only
/// report back through the completion channel; the event loop feeds those into
/// [`QueryController::complete`], which applies a completion only when its
/// token is still the latest one. Slower, older responses are dropped silently.
#[derive(Debug)]
pub struct QueryController<S> {
    source: S,
    state: QueryState,
    latest_token: u64,
    completions: UnboundedSender<QueryCompletion>,
}

impl<S: AthleteSource> QueryController<S> {
    pub fn new(source: S) -> (Self, UnboundedReceiver<QueryCompletion>) {
        let (completions, receiver) = unbounded_channel();
        let controller = Self {
            source,
            state: QueryState::default(),
            latest_token: 0,
            completions,
        };
        (controller, receiver)
    }

    pub const fn state(&self) -> &QueryState {
        &self.state
    }

    pub const fn latest_token(&self) -> u64 {
        self.latest_token
    }

    /// Start a query. Returns the token of the request sent, or `None` when
    /// the trigger resolved to nothing (a fallback with no city open).
    ///
    /// An empty search and the "all" medal filter fall back to re-querying
    /// `open_city`. A medal filter is global and ignores `open_city`.
    pub fn issue(
        &mut self,
        mode: QueryMode,
        parameter: &str,
        open_city: Option<&str>,
    ) -> Option<u64> {
        match mode {
            QueryMode::Search if parameter.trim().is_empty() => self.reissue_city(open_city),
            QueryMode::MedalFilter
                if parameter.eq_ignore_ascii_case(MedalFilter::All.as_str()) =>
            {
                self.reissue_city(open_city)
            }
            _ => Some(self.dispatch(AthleteQuery::new(mode, parameter))),
        }
    }

    /// Apply a finished request. Returns whether it was current.
    pub fn complete(&mut self, completion: QueryCompletion) -> bool {
        let QueryCompletion {
            token,
            query,
            outcome,
        } = completion;

        if token != self.latest_token {
            debug!(
                token,
                latest = self.latest_token,
                mode = query.mode.as_str(),
                "discarding stale athlete response"
            );
            return false;
        }

        match outcome {
            Ok(athletes) => {
                info!(
                    token,
                    mode = query.mode.as_str(),
                    count = athletes.len(),
                    "athlete query succeeded"
                );
                self.state.status = QueryStatus::Success;
                self.state.results = athletes;
                self.state.error_message = None;
            }
            Err(err) => {
                warn!(token, mode = query.mode.as_str(), error = %err, "athlete query failed");
                self.state.status = QueryStatus::Error;
                self.state.results.clear();
                self.state.error_message =
                    Some(format!("{}: {err}", query.mode.failure_prefix()));
            }
        }
        true
    }

    /// Drop all query context. Requests still in flight become stale.
    pub fn reset(&mut self) {
        self.latest_token += 1;
        self.state = QueryState::default();
    }

    fn reissue_city(&mut self, open_city: Option<&str>) -> Option<u64> {
        let Some(city) = open_city else {
            debug!("no city open, nothing to fall back to");
            return None;
        };
        Some(self.dispatch(AthleteQuery::city(city)))
    }

    fn dispatch(&mut self, query: AthleteQuery) -> u64 {
        self.latest_token += 1;
        let token = self.latest_token;

        self.state.mode = query.mode;
        self.state.parameter.clone_from(&query.parameter);
        self.state.status = QueryStatus::Loading;
        self.state.error_message = None;

        info!(
            token,
            mode = query.mode.as_str(),
            parameter = %query.parameter,
            "issuing athlete query"
        );

        let request = self.source.fetch(&query);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = request.await;
            // A closed channel means the app is shutting down
            let _ = completions.send(QueryCompletion {
                token,
                query,
                outcome,
            });
        });

        token
    }
}
