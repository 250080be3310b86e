use crate::ui::{App, ResultTab};
use crossterm::event::{KeyCode, KeyEvent};

const PAGE: u16 = 10;

/// Keys while history and result panes have focus
pub(super) fn handle_results_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.open_help(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.set_tab(app.tab.next()),
        KeyCode::Left | KeyCode::Char('h') => app.set_tab(app.tab.prev()),
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(tab) = c.to_digit(10).and_then(|d| ResultTab::from_index(d as usize - 1)) {
                app.set_tab(tab);
            }
        }
        KeyCode::PageDown => app.scroll_down(PAGE),
        KeyCode::PageUp => app.scroll_up(PAGE),
        KeyCode::Char('J') => app.scroll_down(1),
        KeyCode::Char('K') => app.scroll_up(1),
        KeyCode::Char('r') => app.load_selected_into_editor(),
        KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('i') => app.toggle_focus(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        handle_results_input(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_tab_keys() {
        let mut app = App::new("m");
        app.toggle_focus();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.tab, ResultTab::Diff);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.tab, ResultTab::Complexity);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.tab, ResultTab::Explanation);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.tab, ResultTab::Complexity);
    }

    #[test]
    fn test_scrolling_resets_on_tab_change() {
        let mut app = App::new("m");
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::Char('J'));
        assert_eq!(app.result_scroll, PAGE + 1);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.result_scroll, 0);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.result_scroll, 0);
    }

    #[test]
    fn test_quit_and_edit() {
        let mut app = App::new("m");
        app.toggle_focus();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.focus, crate::ui::Focus::Editor);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
