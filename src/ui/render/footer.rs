use crate::ui::theme::Theme;
use crate::ui::{App, Focus, SPINNER_FRAMES};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub(super) fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled("  ", Style::default())];

    if app.loading.is_loading() {
        let spinner = SPINNER_FRAMES[app.loading_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!("{} Explaining {} code...", spinner, app.language.name()),
            Style::default().fg(Theme::YELLOW),
        ));
    } else {
        spans.push(Span::styled(
            app.language.name(),
            Style::default().fg(Theme::GREY_400),
        ));
    }

    if app.session_tokens > 0 {
        spans.push(Span::styled(
            format!("  tok {}", app.session_tokens),
            Style::default().fg(Theme::GREY_500),
        ));
    }

    let hints: &[(&str, &str)] = match app.focus {
        Focus::Editor => &[("^S", "explain"), ("^L", "language"), ("Esc", "results")],
        Focus::History => &[("↵", "edit"), ("←→", "tab"), ("r", "reload"), ("Tab", "editor")],
    };
    let mut buttons: Vec<Span> = Vec::new();
    for (key, label) in hints.iter().chain(&[("F1", "help"), ("^C", "quit")]) {
        buttons.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Theme::GREY_900).bg(Theme::GREY_500),
        ));
        buttons.push(Span::styled(
            format!(" {} ", label),
            Style::default().fg(Theme::GREY_500),
        ));
    }

    // Right-align the buttons
    let status_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let buttons_len: usize = buttons.iter().map(|s| s.content.chars().count()).sum();
    let spacer_len = (area.width as usize).saturating_sub(status_len + buttons_len + 2);
    if spacer_len > 0 {
        spans.push(Span::raw(" ".repeat(spacer_len)));
    }
    spans.extend(buttons);

    let footer = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .style(Style::default().bg(Theme::BG));
    frame.render_widget(footer, area);
}
