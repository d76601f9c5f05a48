pub mod screens;

use crate::api::AthleteSource;
use crate::app::state::App;
use crate::ui::explorer_layout;
use crate::ui::widgets::globe::hit_test;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

pub fn handle_input<S: AthleteSource>(app: &mut App<S>, key: KeyEvent) {
    screens::dispatch_input(app, key);
}

/// Left clicks on the globe are point clicks; the wheel scrolls the panel.
pub fn handle_mouse<S: AthleteSource>(app: &mut App<S>, mouse: MouseEvent, frame_area: Rect) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = explorer_layout(frame_area, app.selection.is_open());
            if let Some(click) = hit_test(layout.globe, mouse.column, mouse.row) {
                debug!(
                    city = click.city.name,
                    lat = click.coordinate.lat,
                    lng = click.coordinate.lng,
                    "globe point clicked"
                );
                app.focus = crate::app::PanelFocus::Globe;
                app.click_city(click.city);
            }
        }
        MouseEventKind::ScrollDown => app.scroll_results(true, 1),
        MouseEventKind::ScrollUp => app.scroll_results(false, 1),
        _ => {}
    }
}
