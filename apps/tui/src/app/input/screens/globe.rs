use crate::api::AthleteSource;
use crate::app::state::{App, PanelFocus};
use crossterm::event::KeyCode;

const PAGE: usize = 5;

pub fn handle_globe_input<S: AthleteSource>(app: &mut App<S>, key: KeyCode) {
    match key {
        KeyCode::Left | KeyCode::Char('h') => app.cycle_highlight(false),
        KeyCode::Right | KeyCode::Char('l') => app.cycle_highlight(true),
        KeyCode::Enter => app.click_highlighted(),
        KeyCode::Char('/' | 's') if app.selection.is_open() => {
            app.focus = PanelFocus::Search;
        }
        KeyCode::Char('m') if app.selection.is_open() => {
            app.set_medal_filter(app.medal_filter.next());
        }
        KeyCode::Char('M') if app.selection.is_open() => {
            app.set_medal_filter(app.medal_filter.prev());
        }
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results(true, 1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results(false, 1),
        KeyCode::PageDown => app.scroll_results(true, PAGE),
        KeyCode::PageUp => app.scroll_results(false, PAGE),
        KeyCode::Home => app.result_scroll = 0,
        KeyCode::Esc => {
            if app.selection.is_open() {
                app.close_panel();
            }
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        _ => {}
    }
}
