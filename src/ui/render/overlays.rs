use crate::ui::helpers::centered_rect;
use crate::ui::theme::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub(super) fn render_help(frame: &mut Frame, scroll: u16) {
    let area = centered_rect(55, 80, frame.area());
    frame.render_widget(Clear, area);

    fn section_start(title: &str) -> Vec<Line<'static>> {
        vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("    ╭─ ".to_string(), Style::default().fg(Theme::GREY_600)),
                Span::styled(
                    title.to_string(),
                    Style::default()
                        .fg(Theme::WHITE)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    " ─────────────────────────╮".to_string(),
                    Style::default().fg(Theme::GREY_600),
                ),
            ]),
        ]
    }

    fn key_row(key: &str, desc: &str) -> Line<'static> {
        Line::from(vec![
            Span::styled("    │  ".to_string(), Style::default().fg(Theme::GREY_600)),
            Span::styled(
                format!(" {} ", key),
                Style::default().fg(Theme::GREY_900).bg(Theme::GREY_300),
            ),
            Span::styled(format!("  {}", desc), Style::default().fg(Theme::GREY_200)),
        ])
    }

    fn section_end() -> Line<'static> {
        Line::from(vec![Span::styled(
            "    ╰─────────────────────────────────────╯".to_string(),
            Style::default().fg(Theme::GREY_600),
        )])
    }

    let mut help_text: Vec<Line<'static>> = vec![Line::from("")];

    help_text.extend(section_start("Anywhere"));
    help_text.push(key_row("Ctrl+S / F5", "Explain the code in the editor"));
    help_text.push(key_row("Ctrl+L", "Switch Python / JavaScript"));
    help_text.push(key_row("Shift+Tab", "Switch between editor and results"));
    help_text.push(key_row("F1", "Show this help"));
    help_text.push(key_row("Ctrl+C", "Quit"));
    help_text.push(section_end());

    help_text.extend(section_start("Editor"));
    help_text.push(key_row("←→↑↓", "Move the cursor"));
    help_text.push(key_row("Home/End", "Start / end of line"));
    help_text.push(key_row("Tab", "Indent four spaces"));
    help_text.push(key_row("Ctrl+U", "Clear the editor"));
    help_text.push(key_row("Esc", "Jump to results"));
    help_text.push(section_end());

    help_text.extend(section_start("Results"));
    help_text.push(key_row("↑↓ / j k", "Select a history entry"));
    help_text.push(key_row("←→ / 1-4", "Switch result tab"));
    help_text.push(key_row("PgUp/Dn", "Scroll the result pane"));
    help_text.push(key_row("r", "Load entry back into the editor"));
    help_text.push(key_row("Tab", "Back to the editor"));
    help_text.push(key_row("↵ / e", "Edit code"));
    help_text.push(key_row("?", "Show this help"));
    help_text.push(key_row("q", "Quit"));
    help_text.push(section_end());

    let block = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .title_style(Style::default().fg(Theme::GREY_100))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::GREY_400))
                .style(Style::default().bg(Theme::GREY_900)),
        )
        .scroll((scroll, 0));

    frame.render_widget(block, area);
}

/// Model output that could not be decoded into a record
pub(super) fn render_raw_output(frame: &mut Frame, raw: &str, scroll: u16) {
    let area = centered_rect(70, 75, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "AI returned invalid JSON. Raw output:",
            Style::default().fg(Theme::RED).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        raw.lines()
            .map(|l| Line::from(Span::styled(l, Theme::text()))),
    );

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Raw Model Output ")
                .title_style(Style::default().fg(Theme::GREY_100))
                .title_bottom(Line::from(" Esc close  ↑↓ scroll ").style(Theme::text_dim()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::GREY_400))
                .style(Style::default().bg(Theme::GREY_900)),
        )
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}
