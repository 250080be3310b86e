use crate::ui::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys while the code editor has focus
pub(super) fn handle_editor_input(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.toggle_focus();
        return;
    }

    let editor = &mut app.editor;
    match key.code {
        KeyCode::Tab => editor.indent(),
        KeyCode::Enter => editor.newline(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Up => editor.move_up(),
        KeyCode::Down => editor.move_down(),
        KeyCode::Home => editor.home(),
        KeyCode::End => editor.end(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => editor.clear(),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            editor.insert_char(c)
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        handle_editor_input(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_multiline_editing() {
        let mut app = App::new("m");
        for c in "if x:".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        for c in "pass".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.editor.text(), "if x:\n    pas");
    }

    #[test]
    fn test_shifted_characters_are_typed() {
        let mut app = App::new("m");
        handle_editor_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT),
        );
        assert_eq!(app.editor.text(), "X");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut app = App::new("m");
        app.editor.set_text("a\nb");
        handle_editor_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert!(app.editor.is_blank());
    }

    #[test]
    fn test_escape_leaves_editor() {
        let mut app = App::new("m");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, crate::ui::Focus::History);
    }
}
