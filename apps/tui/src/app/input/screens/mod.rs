use crate::api::AthleteSource;
use crate::app::state::{App, PanelFocus};
use crossterm::event::{KeyCode, KeyEvent};

mod globe;
mod help;
mod search;

pub fn dispatch_input<S: AthleteSource>(app: &mut App<S>, key: KeyEvent) {
    if app.show_help {
        help::handle_help_input(app, key.code);
        return;
    }

    match app.focus {
        PanelFocus::Search => search::handle_search_input(app, key.code),
        PanelFocus::Globe => {
            if key.code == KeyCode::Char('?') {
                app.show_help = true;
                return;
            }
            globe::handle_globe_input(app, key.code);
        }
    }
}
