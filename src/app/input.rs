//! Key handling for the explainer TUI

use crate::app::{background, RuntimeContext};
use crate::llm::CompletionService;
use crate::ui::{App, Focus, Overlay};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

mod editor;
mod overlay;
mod results;

use editor::handle_editor_input;
use overlay::handle_overlay_input;
use results::handle_results_input;

// ═══════════════════════════════════════════════════════════════════════════
//  MAIN INPUT DISPATCHER
// ═══════════════════════════════════════════════════════════════════════════

/// Main key event handler: global bindings first, then overlay, then focus
pub fn handle_key_event<S>(app: &mut App, key: KeyEvent, ctx: &RuntimeContext<'_, S>)
where
    S: CompletionService + 'static,
{
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.overlay != Overlay::None {
        handle_overlay_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('s') if ctrl => return submit(app, ctx),
        KeyCode::F(5) => return submit(app, ctx),
        KeyCode::Char('l') if ctrl => return app.toggle_language(),
        KeyCode::F(1) => return app.open_help(),
        KeyCode::BackTab => return app.toggle_focus(),
        KeyCode::Tab if app.focus == Focus::History => return app.toggle_focus(),
        _ => {}
    }

    match app.focus {
        Focus::Editor => handle_editor_input(app, key),
        Focus::History => handle_results_input(app, key),
    }
}

/// Bracketed paste goes straight into the editor
pub fn handle_paste(app: &mut App, text: &str) {
    if app.overlay == Overlay::None && app.focus == Focus::Editor {
        app.editor.insert_str(text);
    }
}

fn submit<S>(app: &mut App, ctx: &RuntimeContext<'_, S>)
where
    S: CompletionService + 'static,
{
    if let Some(sample) = app.prepare_submission() {
        background::spawn_explanation(ctx, sample);
    }
}
