use std::time::Duration;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::api::AthleteSource;
use crate::app::flight::{FlightArc, FlightTiming, PulseRing};
use crate::app::App;
use crate::domain::{City, Coordinate, HOST_CITIES};

pub const NUM_RINGS: u32 = 3;
/// Degrees of arc.
pub const RING_MAX_RADIUS: f64 = 5.0;
/// Degrees per second.
pub const RING_PROPAGATION_SPEED: f64 = 5.0;

/// Below this inner width only the highlighted and open cities are labelled.
const FULL_LABEL_WIDTH: u16 = 120;
/// How far from a point, in cells, a click still counts.
const HIT_TOLERANCE: f64 = 1.5;

const POINT_COLOR: Color = Color::Rgb(0xE9, 0xDD, 0x9B);
const ARC_COLOR: Color = Color::Rgb(255, 140, 0);
const RING_COLOR: Color = Color::Rgb(255, 100, 50);

/// Everything the globe draws for one frame.
pub struct GlobeScene<'a> {
    pub points: &'a [City],
    pub arcs: &'a [FlightArc],
    pub rings: &'a [PulseRing],
    pub timing: FlightTiming,
    pub now: Duration,
    pub highlighted: Option<&'static City>,
    pub open_city: Option<&'a str>,
}

impl<'a> GlobeScene<'a> {
    pub fn from_app<S: AthleteSource>(app: &'a App<S>) -> Self {
        Self {
            points: &HOST_CITIES,
            arcs: app.flights.arcs(),
            rings: app.flights.rings(),
            timing: app.flights.timing(),
            now: app.elapsed,
            highlighted: app.highlighted(),
            open_city: app.open_city(),
        }
    }

    fn labels(&self, inner_width: u16) -> impl Iterator<Item = &City> + '_ {
        let show_all = inner_width >= FULL_LABEL_WIDTH;
        self.points.iter().filter(move |city| {
            show_all
                || self.highlighted.is_some_and(|h| h.name == city.name)
                || self.open_city == Some(city.name)
        })
    }
}

/// A click that landed on a city point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeClick {
    pub city: &'static City,
    pub coordinate: Coordinate,
}

#[allow(clippy::cast_precision_loss)]
fn elapsed_fraction(elapsed: Duration, span: Duration) -> f64 {
    if span.is_zero() {
        return 1.0;
    }
    elapsed.as_secs_f64() / span.as_secs_f64()
}

/// The visible stretch of a flight arc at `now`.
///
/// The dash head leaves the start when the arc is emitted and reaches the end
/// one flight time later; the tail follows `arc_rel_len` behind it.
pub fn arc_dash(arc: &FlightArc, timing: FlightTiming, now: Duration) -> Option<(Coordinate, Coordinate)> {
    let age = now.checked_sub(arc.emitted_at)?;
    let head = elapsed_fraction(age, timing.flight_time);
    let tail = head - timing.arc_rel_len;

    if tail >= 1.0 || head <= 0.0 {
        return None;
    }

    let from = arc.start.lerp(arc.end, tail.clamp(0.0, 1.0));
    let to = arc.start.lerp(arc.end, head.clamp(0.0, 1.0));
    Some((from, to))
}

/// Radii of the ripples around a ring at `now`, newest last.
pub fn ring_radii(ring: &PulseRing, timing: FlightTiming, now: Duration) -> Vec<f64> {
    let Some(age) = now.checked_sub(ring.emitted_at) else {
        return Vec::new();
    };
    let period = timing.ring_lifetime() / NUM_RINGS;

    (0..NUM_RINGS)
        .filter_map(|k| age.checked_sub(period * k))
        .map(|local| (local.as_secs_f64() * RING_PROPAGATION_SPEED).min(RING_MAX_RADIUS))
        .filter(|radius| *radius > 0.0)
        .collect()
}

fn inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Fractional cell position of a coordinate inside the canvas.
fn coordinate_to_cell(inner: Rect, coordinate: Coordinate) -> (f64, f64) {
    let x = (coordinate.lng + 180.0) / 360.0 * f64::from(inner.width);
    let y = (90.0 - coordinate.lat) / 180.0 * f64::from(inner.height);
    (f64::from(inner.x) + x, f64::from(inner.y) + y)
}

/// The coordinate under the centre of a terminal cell, if the cell is on the map.
pub fn cell_to_coordinate(area: Rect, column: u16, row: u16) -> Option<Coordinate> {
    let inner = inner(area);
    if inner.width == 0
        || inner.height == 0
        || column < inner.x
        || row < inner.y
        || column >= inner.x + inner.width
        || row >= inner.y + inner.height
    {
        return None;
    }

    let x = (f64::from(column - inner.x) + 0.5) / f64::from(inner.width);
    let y = (f64::from(row - inner.y) + 0.5) / f64::from(inner.height);
    Some(Coordinate::new(90.0 - y * 180.0, x * 360.0 - 180.0))
}

/// Resolve a mouse click to the nearest city point within reach.
pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<GlobeClick> {
    cell_to_coordinate(area, column, row)?;
    let inner = inner(area);
    let (cx, cy) = (f64::from(column) + 0.5, f64::from(row) + 0.5);

    HOST_CITIES
        .iter()
        .map(|city| {
            let (x, y) = coordinate_to_cell(inner, city.coordinate());
            (city, (x - cx).hypot(y - cy))
        })
        .filter(|(_, distance)| *distance <= HIT_TOLERANCE)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(city, _)| GlobeClick {
            city,
            coordinate: city.coordinate(),
        })
}

pub fn render_globe(f: &mut Frame<'_>, area: Rect, scene: &GlobeScene<'_>) {
    if area.width < 4 || area.height < 4 {
        return;
    }

    let title = scene.highlighted.map_or_else(
        || " Olympic Host Cities ".to_string(),
        |city| format!(" Olympic Host Cities  ‹ {} › ", city.name),
    );
    let inner_width = inner(area).width;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(title)
                .title_style(Style::default().fg(Color::Yellow))
                .borders(Borders::ALL),
        )
        .marker(Marker::Braille)
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();

            for ring in scene.rings {
                for radius in ring_radii(ring, scene.timing, scene.now) {
                    ctx.draw(&Circle {
                        x: ring.at.lng,
                        y: ring.at.lat,
                        radius,
                        color: RING_COLOR,
                    });
                }
            }

            for arc in scene.arcs {
                if let Some((from, to)) = arc_dash(arc, scene.timing, scene.now) {
                    ctx.draw(&CanvasLine {
                        x1: from.lng,
                        y1: from.lat,
                        x2: to.lng,
                        y2: to.lat,
                        color: ARC_COLOR,
                    });
                }
            }

            let coords: Vec<(f64, f64)> = scene
                .points
                .iter()
                .map(|city| (city.lng, city.lat))
                .collect();
            ctx.draw(&Points {
                coords: &coords,
                color: POINT_COLOR,
            });

            for city in scene.labels(inner_width) {
                let is_open = scene.open_city == Some(city.name);
                let style = if is_open {
                    Style::default().fg(ARC_COLOR).add_modifier(Modifier::BOLD)
                } else if scene.highlighted.is_some_and(|h| h.name == city.name) {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(POINT_COLOR)
                };
                ctx.print(
                    city.lng,
                    city.lat,
                    TextLine::from(Span::styled(format!(" {}", city.name), style)),
                );
            }
        });

    f.render_widget(canvas, area);
}
