use crate::api::AthleteSource;
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_help_input<S: AthleteSource>(app: &mut App<S>, key: KeyCode) {
    match key {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter => {
            app.show_help = false;
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        _ => {}
    }
}
