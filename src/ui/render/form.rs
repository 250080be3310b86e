use crate::sample::Language;
use crate::ui::editor::display_line;
use crate::ui::helpers::scroll_offset;
use crate::ui::theme::Theme;
use crate::ui::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Language selector above a multi-line code editor
pub(super) fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Editor;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_language_selector(frame, layout[0], app.language, focused);
    render_editor(frame, layout[1], app, focused);
}

fn render_language_selector(frame: &mut Frame, area: Rect, current: Language, focused: bool) {
    let mut spans = vec![Span::raw(" ")];
    for language in Language::ALL {
        let (bullet, style) = if language == current {
            (Theme::BULLET_FILLED, Theme::selected())
        } else {
            (Theme::BULLET_EMPTY, Theme::text_dim())
        };
        spans.push(Span::styled(format!("{} {}   ", bullet, language.name()), style));
    }

    let block = Block::default()
        .title(" Language ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::panel_border(focused));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_editor(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let block = Block::default()
        .title(" Code ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::panel_border(focused));
    let inner = block.inner(area);

    let (row, _) = app.editor.cursor();
    let first = scroll_offset(row, inner.height as usize);
    let gutter = app.editor.lines().len().to_string().len();

    let lines: Vec<Line> = if app.editor.is_blank() && !focused {
        vec![Line::from(Span::styled(
            " Paste or type code, then Ctrl+S",
            Theme::text_dim(),
        ))]
    } else {
        app.editor
            .lines()
            .iter()
            .enumerate()
            .skip(first)
            .take(inner.height as usize)
            .map(|(i, line)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>width$} ", i + 1, width = gutter),
                        Style::default().fg(Theme::GREY_500),
                    ),
                    Span::styled(display_line(line), Theme::text()),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);

    if focused && app.overlay == crate::ui::Overlay::None {
        let x = inner.x as usize + gutter + 1 + app.editor.cursor_display_col();
        let y = inner.y as usize + row - first;
        if x < (inner.x + inner.width) as usize && y < (inner.y + inner.height) as usize {
            frame.set_cursor_position(Position::new(x as u16, y as u16));
        }
    }
}
