use crate::ui::App;
use crossterm::event::{KeyCode, KeyEvent};

pub(super) fn handle_overlay_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::F(1) => app.close_overlay(),
        KeyCode::Down | KeyCode::Char('j') => app.overlay_scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.overlay_scroll_up(),
        KeyCode::PageDown => (0..10).for_each(|_| app.overlay_scroll_down()),
        KeyCode::PageUp => (0..10).for_each(|_| app.overlay_scroll_up()),
        _ => {}
    }
}
