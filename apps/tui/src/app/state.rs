use std::sync::Mutex;
use std::time::{Duration, Instant};

use tachyonfx::{fx, Effect, Interpolation};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use crate::api::{AthleteSource, HttpAthleteService, QueryMode};
use crate::app::flight::{FlightScheduler, FlightTiming};
use crate::app::query::{QueryCompletion, QueryController, QueryState};
use crate::app::selection::Selection;
use crate::domain::{city_index, City, MedalFilter, HOST_CITIES};

/// Which part of the screen receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelFocus {
    #[default]
    Globe,
    Search,
}

pub struct App<S = HttpAthleteService> {
    pub running: bool,
    pub selection: Selection,
    pub flights: FlightScheduler,
    pub query: QueryController<S>,
    pub completions: UnboundedReceiver<QueryCompletion>,
    pub focus: PanelFocus,
    pub search_input: String,
    pub medal_filter: MedalFilter,
    pub highlighted_city: usize,
    pub result_scroll: usize,
    pub show_help: bool,
    pub status_message: String,
    /// Time since startup; the clock every flight timer runs on.
    pub elapsed: Duration,
    /// Duration of the previous frame, consumed by the panel effect.
    pub last_tick: Duration,
    pub animation_counter: f64,
    pub panel_fx: Mutex<Option<Effect>>,
    started: Instant,
    last_frame: Instant,
}

impl<S: AthleteSource> App<S> {
    pub fn new(source: S, timing: FlightTiming) -> Self {
        let (query, completions) = QueryController::new(source);
        let now = Instant::now();

        Self {
            running: true,
            selection: Selection::default(),
            flights: FlightScheduler::new(timing),
            query,
            completions,
            focus: PanelFocus::Globe,
            search_input: String::new(),
            medal_filter: MedalFilter::All,
            highlighted_city: 0,
            result_scroll: 0,
            show_help: false,
            status_message: String::new(),
            elapsed: Duration::ZERO,
            last_tick: Duration::ZERO,
            animation_counter: 0.0,
            panel_fx: Mutex::new(None),
            started: now,
            last_frame: now,
        }
    }

    /// Per-frame tick: advance the clock and run due flight timers.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_tick = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Cursor blink phase, cycles between 0 and 2*PI
        self.animation_counter += self.last_tick.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }

        self.advance_to(now.duration_since(self.started));
    }

    pub fn advance_to(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
        self.flights.advance(elapsed);

        if let Ok(mut slot) = self.panel_fx.lock() {
            if slot.as_ref().is_some_and(Effect::done) {
                *slot = None;
            }
        }
    }

    /// Apply every finished request waiting on the channel. Returns how many
    /// were current.
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions.try_recv() {
            if self.query.complete(completion) {
                self.result_scroll = 0;
                applied += 1;
            }
        }
        applied
    }

    pub const fn query_state(&self) -> &QueryState {
        self.query.state()
    }

    pub fn open_city(&self) -> Option<&str> {
        self.selection.open_city()
    }

    /// A city point was clicked: open its panel, fly there and load its athletes.
    pub fn click_city(&mut self, city: &City) {
        let was_open = self.selection.is_open();

        self.selection.select(city.name);
        self.flights
            .trigger(&mut self.selection, city.coordinate(), self.elapsed);

        if let Some(index) = city_index(city.name) {
            self.highlighted_city = index;
        }
        self.search_input.clear();
        self.medal_filter = MedalFilter::All;
        self.result_scroll = 0;

        self.query
            .issue(QueryMode::City, city.name, self.selection.open_city());

        if !was_open {
            self.start_panel_fx();
        }
        info!(city = city.name, "city selected");
    }

    pub fn click_highlighted(&mut self) {
        if let Some(city) = HOST_CITIES.get(self.highlighted_city) {
            self.click_city(city);
        }
    }

    /// Close the panel and discard all query context. The last flight
    /// position is kept for the next flight.
    pub fn close_panel(&mut self) {
        self.selection.clear();
        self.query.reset();
        self.search_input.clear();
        self.medal_filter = MedalFilter::All;
        self.focus = PanelFocus::Globe;
        self.result_scroll = 0;
        if let Ok(mut slot) = self.panel_fx.lock() {
            *slot = None;
        }
        info!("panel closed");
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search_input.push(ch);
        self.search_changed();
    }

    pub fn pop_search_char(&mut self) {
        if self.search_input.pop().is_some() {
            self.search_changed();
        }
    }

    pub fn set_medal_filter(&mut self, filter: MedalFilter) {
        self.medal_filter = filter;
        self.result_scroll = 0;
        self.query.issue(
            QueryMode::MedalFilter,
            filter.as_str(),
            self.selection.open_city(),
        );
    }

    pub fn cycle_highlight(&mut self, forward: bool) {
        let len = HOST_CITIES.len();
        self.highlighted_city = if forward {
            (self.highlighted_city + 1) % len
        } else {
            (self.highlighted_city + len - 1) % len
        };
    }

    pub fn highlighted(&self) -> Option<&'static City> {
        HOST_CITIES.get(self.highlighted_city)
    }

    pub fn scroll_results(&mut self, down: bool, step: usize) {
        let max = self.query.state().results.len().saturating_sub(1);
        self.result_scroll = if down {
            (self.result_scroll + step).min(max)
        } else {
            self.result_scroll.saturating_sub(step)
        };
    }

    fn search_changed(&mut self) {
        self.result_scroll = 0;
        self.query.issue(
            QueryMode::Search,
            &self.search_input,
            self.selection.open_city(),
        );
    }

    fn start_panel_fx(&self) {
        if let Ok(mut slot) = self.panel_fx.lock() {
            *slot = Some(fx::coalesce((350, Interpolation::QuadOut)));
        }
    }
}
