use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use serde::Serialize;
use std::io::Stdout;
use std::time::Duration;
use tracing::{debug, info};

use crate::api::{AthleteQuery, AthleteSource, HttpAthleteService, QueryMode};
use crate::app::presentation::{medal_label, render_rows, AthleteRow};
use crate::app::query::{QueryController, QueryState, QueryStatus};
use crate::app::{handle_input, handle_mouse, App};
use crate::cli::CliArgs;
use crate::config::AppConfig;
use crate::domain::{find_city, MedalFilter, HOST_CITIES};
use crate::ui;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Run the main application event loop
pub async fn run<S: AthleteSource>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    info!("entering interactive loop");

    while app.running {
        app.update();
        let applied = app.drain_completions();
        if applied > 0 {
            debug!(applied, "query results applied");
        }

        terminal
            .draw(|f| ui::ui(app, f))
            .map_err(|e| eyre!("Terminal draw error: {e}"))?;

        if !matches!(event::poll(EVENT_POLL_TIMEOUT), Ok(true)) {
            tokio::task::yield_now().await;
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => handle_input(app, key),
            Ok(Event::Mouse(mouse)) => {
                let size = terminal.size()?;
                handle_mouse(app, mouse, Rect::new(0, 0, size.width, size.height));
            }
            Ok(Event::Resize(width, height)) => {
                debug!(width, height, "terminal resized");
            }
            Ok(_) => {}
            Err(e) => return Err(eyre!("Failed to read terminal event: {e}")),
        }
    }

    info!("leaving interactive loop");
    Ok(())
}

#[derive(Debug, Serialize)]
struct HeadlessReport {
    mode: &'static str,
    parameter: String,
    count: usize,
    athletes: Vec<AthleteRow>,
}

/// Turn the headless selectors into a query. Without one, the first host city is used.
fn headless_query(args: &CliArgs) -> Result<AthleteQuery> {
    if let Some(city) = &args.city {
        let name = find_city(city).map_or_else(|| city.trim().to_string(), |c| c.name.to_string());
        return Ok(AthleteQuery::city(name));
    }

    if let Some(text) = &args.search {
        return Ok(AthleteQuery::search(text.as_str()));
    }

    if let Some(code) = &args.medal {
        let filter = MedalFilter::parse(code)
            .ok_or_else(|| eyre!("Unknown medal {code}; expected G, S or B"))?;
        return Ok(AthleteQuery::medal(filter.as_str()));
    }

    Ok(AthleteQuery::city(HOST_CITIES[0].name))
}

fn build_report(state: &QueryState) -> HeadlessReport {
    let athletes = render_rows(state);
    HeadlessReport {
        mode: state.mode.as_str(),
        parameter: state.parameter.clone(),
        count: athletes.len(),
        athletes,
    }
}

fn format_report(report: &HeadlessReport) -> String {
    let mut out = format!(
        "\nAthletes ({} = {})\n=================\n",
        report.mode, report.parameter
    );
    if report.athletes.is_empty() {
        out.push_str("No athletes found.\n");
        return out;
    }
    for row in &report.athletes {
        out.push_str(&format!(
            "- {} | {} | {} | {} ({}) | {}\n",
            row.name,
            row.nationality,
            medal_label(&row.medal),
            row.event,
            row.year,
            row.result
        ));
    }
    out.push_str(&format!("\nTotal: {}\n", report.count));
    out
}

/// Issue one query through a query controller and wait for it to settle.
async fn settle_query<S: AthleteSource>(source: S, query: &AthleteQuery) -> Result<QueryState> {
    let (mut controller, mut completions) = QueryController::new(source);
    let open_city = (query.mode == QueryMode::City).then_some(query.parameter.as_str());

    controller
        .issue(query.mode, &query.parameter, open_city)
        .ok_or_else(|| eyre!("{} needs a city; use --city instead", query.mode.as_str()))?;

    while controller.state().status == QueryStatus::Loading {
        let completion = completions
            .recv()
            .await
            .ok_or_else(|| eyre!("Query channel closed before a response arrived"))?;
        controller.complete(completion);
    }

    let state = controller.state().clone();
    match (&state.status, &state.error_message) {
        (QueryStatus::Error, Some(message)) => Err(eyre!("{message}")),
        _ => Ok(state),
    }
}

/// One query without a terminal: print the athletes and exit.
pub async fn run_headless(config: &AppConfig, args: &CliArgs) -> Result<()> {
    let query = headless_query(args)?;
    let service = HttpAthleteService::new(&config.api_base_url, config.request_timeout)?;
    info!(mode = query.mode.as_str(), parameter = %query.parameter, "headless query");

    let state = settle_query(service, &query).await?;
    let report = build_report(&state);

    if args.json {
        let json = serde_json::to_string_pretty(&report).wrap_err("Failed to encode report")?;
        println!("{json}");
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;
    use crate::test_support::{athlete, ScriptedSource};
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn args(extra: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(
            std::iter::once("host_city_explorer").chain(extra.iter().copied()),
        )
    }

    #[test]
    fn city_selector_uses_registry_spelling() -> TestResult {
        let query = headless_query(&args(&["--city", "  los angeles "])?)?;

        assert_eq!(query, AthleteQuery::city("Los Angeles"));
        Ok(())
    }

    #[test]
    fn selectors_map_to_queries() -> TestResult {
        assert_eq!(
            headless_query(&args(&["--medal", "bronze"])?)?,
            AthleteQuery::medal("B")
        );
        assert_eq!(
            headless_query(&args(&["--search", " bolt "])?)?,
            AthleteQuery::search(" bolt ")
        );
        assert_eq!(headless_query(&args(&[])?)?, AthleteQuery::city("Athens"));
        assert!(headless_query(&args(&["--medal", "platinum"])?).is_err());
        Ok(())
    }

    #[tokio::test]
    async fn settled_query_returns_results() -> TestResult {
        let source = ScriptedSource::default().reply(
            &AthleteQuery::medal("G"),
            0,
            Ok(vec![athlete("1", "usain bolt", "G", "Beijing")]),
        );

        let state = settle_query(source, &AthleteQuery::medal("G")).await?;

        assert_eq!(state.status, QueryStatus::Success);
        assert_eq!(state.results.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn fallbacks_without_a_city_are_rejected() {
        let source = ScriptedSource::default();

        assert!(settle_query(source.clone(), &AthleteQuery::search(""))
            .await
            .is_err());
        assert!(settle_query(source.clone(), &AthleteQuery::medal("all"))
            .await
            .is_err());
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_query_surfaces_the_prefixed_message() {
        let source = ScriptedSource::default().reply(
            &AthleteQuery::search("x"),
            0,
            Err(FetchError::Network("refused".to_string())),
        );

        let err = settle_query(source, &AthleteQuery::search("x"))
            .await
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();

        assert!(err.starts_with("Failed to search athletes:"));
    }

    #[test]
    fn report_uses_display_names_and_medal_labels() {
        let state = QueryState {
            mode: QueryMode::Search,
            parameter: "lewis".to_string(),
            results: vec![athlete("1", "CARL LEWIS", "G", "Los Angeles")],
            ..QueryState::default()
        };

        let report = build_report(&state);
        let text = format_report(&report);

        assert_eq!(report.mode, "search");
        assert_eq!(report.count, 1);
        assert!(text.contains("- Carl Lewis | USA | Gold | 100M Men (2000) | 9.87"));
        assert!(text.contains("Total: 1"));
    }

    #[test]
    fn empty_report_says_so() {
        let report = build_report(&QueryState::default());

        assert!(format_report(&report).contains("No athletes found."));
    }
}
