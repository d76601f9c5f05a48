use std::future::Future;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::debug;

use crate::api::FetchError;
use crate::domain::Athlete;

/// Which filter a query applies. Each mode has its own endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryMode {
    #[default]
    City,
    Search,
    MedalFilter,
}

impl QueryMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Search => "search",
            Self::MedalFilter => "medalFilter",
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Self::City => "/athletes/city",
            Self::Search => "/athletes/search",
            Self::MedalFilter => "/athletes/medal",
        }
    }

    pub const fn param(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Search => "name",
            Self::MedalFilter => "medal",
        }
    }

    /// Lead-in for the message shown when a query in this mode fails.
    pub const fn failure_prefix(self) -> &'static str {
        match self {
            Self::City => "Failed to load athletes",
            Self::Search => "Failed to search athletes",
            Self::MedalFilter => "Failed to filter athletes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AthleteQuery {
    pub mode: QueryMode,
    pub parameter: String,
}

impl AthleteQuery {
    pub fn new(mode: QueryMode, parameter: impl Into<String>) -> Self {
        Self {
            mode,
            parameter: parameter.into(),
        }
    }

    pub fn city(name: impl Into<String>) -> Self {
        Self::new(QueryMode::City, name)
    }

    pub fn search(text: impl Into<String>) -> Self {
        Self::new(QueryMode::Search, text)
    }

    pub fn medal(code: impl Into<String>) -> Self {
        Self::new(QueryMode::MedalFilter, code)
    }
}

/// Anything that can answer an athlete query.
///
/// The returned future must own everything it needs so the query controller can
/// spawn it and forget about it.
pub trait AthleteSource: Clone + Send + Sync + 'static {
    fn fetch(
        &self,
        query: &AthleteQuery,
    ) -> impl Future<Output = Result<Vec<Athlete>, FetchError>> + Send + 'static;
}

#[derive(Debug, Clone)]
pub struct HttpAthleteService {
    client: Client,
    base_url: String,
}

impl HttpAthleteService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, mode: QueryMode) -> String {
        format!("{}{}", self.base_url, mode.path())
    }
}

impl AthleteSource for HttpAthleteService {
    fn fetch(
        &self,
        query: &AthleteQuery,
    ) -> impl Future<Output = Result<Vec<Athlete>, FetchError>> + Send + 'static {
        fetch_athletes(self.client.clone(), self.endpoint(query.mode), query.clone())
    }
}

async fn fetch_athletes(
    client: Client,
    url: String,
    query: AthleteQuery,
) -> Result<Vec<Athlete>, FetchError> {
    debug!(%url, mode = query.mode.as_str(), parameter = %query.parameter, "requesting athletes");

    let response = client
        .get(&url)
        .query(&[(query.mode.param(), query.parameter.as_str())])
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    // Read as text first so error bodies can be surfaced and bad JSON maps to Decode
    let body = response.text().await?;

    if !status.is_success() {
        return Err(FetchError::Service {
            status: status.as_u16(),
            body: body.trim().to_string(),
        });
    }

    let athletes = serde_json::from_str::<Vec<Athlete>>(&body)?;
    debug!(count = athletes.len(), "athletes decoded");
    Ok(athletes)
}
