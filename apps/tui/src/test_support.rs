// Shared fixtures for unit tests: a scripted athlete source and record builders

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::{AthleteQuery, AthleteSource, FetchError, QueryMode};
use crate::domain::Athlete;

type Reply = (Duration, Result<Vec<Athlete>, FetchError>);

/// Answers queries from a script, after a per-query fake latency.
/// Unscripted queries succeed immediately with no athletes.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    replies: Arc<Mutex<HashMap<(QueryMode, String), Reply>>>,
    calls: Arc<Mutex<Vec<AthleteQuery>>>,
}

impl ScriptedSource {
    pub fn reply(
        self,
        query: &AthleteQuery,
        latency_ms: u64,
        outcome: Result<Vec<Athlete>, FetchError>,
    ) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.insert(
                (query.mode, query.parameter.clone()),
                (Duration::from_millis(latency_ms), outcome),
            );
        }
        self
    }

    pub fn calls(&self) -> Vec<AthleteQuery> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl AthleteSource for ScriptedSource {
    fn fetch(
        &self,
        query: &AthleteQuery,
    ) -> impl Future<Output = Result<Vec<Athlete>, FetchError>> + Send + 'static {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.clone());
        }
        let (latency, outcome) = self
            .replies
            .lock()
            .ok()
            .and_then(|replies| replies.get(&(query.mode, query.parameter.clone())).cloned())
            .unwrap_or((Duration::ZERO, Ok(Vec::new())));

        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            outcome
        }
    }
}

pub fn athlete(id: &str, name: &str, medal: &str, location: &str) -> Athlete {
    Athlete {
        id: id.to_string(),
        name: name.to_string(),
        nationality: "USA".to_string(),
        medal: medal.to_string(),
        sport: "Athletics".to_string(),
        year: "2000".to_string(),
        event: "100M Men".to_string(),
        gender: "M".to_string(),
        result: "9.87".to_string(),
        location: location.to_string(),
    }
}
