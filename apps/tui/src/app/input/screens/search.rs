use crate::api::AthleteSource;
use crate::app::state::{App, PanelFocus};
use crossterm::event::KeyCode;

/// Every edit to the search box is a new search.
pub fn handle_search_input<S: AthleteSource>(app: &mut App<S>, key: KeyCode) {
    match key {
        KeyCode::Char(c) => app.push_search_char(c),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => {
            app.focus = PanelFocus::Globe;
        }
        KeyCode::Down => app.scroll_results(true, 1),
        KeyCode::Up => app.scroll_results(false, 1),
        _ => {}
    }
}
