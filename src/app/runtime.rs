//! TUI runtime for the explainer
//!
//! The loop draws, drains background results, and polls crossterm with a short
//! timeout so the spinner keeps moving while a request is in flight.

use crate::app::messages::BackgroundMessage;
use crate::app::{background, input, RuntimeContext};
use crate::explain::Explainer;
use crate::llm::CompletionService;
use crate::ui;
use crate::ui::App;
use anyhow::Result;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::Duration;

/// Run the interactive session until the user quits
pub async fn run_tui<S>(explainer: Explainer<S>, log_path: Option<PathBuf>) -> Result<()>
where
    S: CompletionService + 'static,
{
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(explainer.model());
    app.log_path = log_path;
    if let Some(path) = &app.log_path {
        app.show_info(&format!("Logging to {}", path.display()));
    }

    let (tx, rx) = mpsc::channel();
    let explainer = Arc::new(explainer);
    tracing::info!(model = explainer.model(), "session started");

    let result = run_loop(&mut terminal, &mut app, rx, tx, &explainer);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    tracing::info!(entries = app.history.len(), "session ended");
    result
}

/// Main event loop with background message handling
fn run_loop<B, S>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<BackgroundMessage>,
    tx: mpsc::Sender<BackgroundMessage>,
    explainer: &Arc<Explainer<S>>,
) -> Result<()>
where
    B: Backend,
    S: CompletionService + 'static,
{
    let ctx = RuntimeContext {
        tx: &tx,
        explainer,
    };

    loop {
        app.clear_expired_toast();
        app.tick_loading();

        // Check for background messages (non-blocking)
        background::drain_messages(app, &rx);

        terminal.draw(|f| ui::render(f, app))?;

        // Poll for events with fast timeout (snappy animations)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key_event(app, key, &ctx);
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
