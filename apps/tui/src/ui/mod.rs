// UI module for host_city_explorer
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::api::AthleteSource;
use crate::app::App;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

/// Screen regions of the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplorerLayout {
    pub header: Rect,
    pub globe: Rect,
    pub panel: Option<Rect>,
    pub footer: Rect,
}

pub fn explorer_layout(area: Rect, panel_open: bool) -> ExplorerLayout {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(area);

    if !panel_open {
        return ExplorerLayout {
            header,
            globe: body,
            panel: None,
            footer,
        };
    }

    let [globe, panel] =
        Layout::horizontal([Constraint::Min(30), Constraint::Length(46)]).areas(body);
    ExplorerLayout {
        header,
        globe,
        panel: Some(panel),
        footer,
    }
}

pub fn ui<S: AthleteSource>(app: &App<S>, f: &mut Frame<'_>) {
    screens::explorer::render_explorer(app, f);
}
