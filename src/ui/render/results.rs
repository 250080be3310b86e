use crate::diff::{diff_lines, stats, DiffLine, NO_CHANGES};
use crate::history::HistoryEntry;
use crate::report::{complexity_lines, highlight_lines};
use crate::ui::theme::Theme;
use crate::ui::{App, Focus, ResultTab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

const HISTORY_HEIGHT: u16 = 7;

pub(super) fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::History;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HISTORY_HEIGHT),
            Constraint::Percentage(35),
            Constraint::Min(6),
        ])
        .split(area);

    render_history(frame, layout[0], app, focused);

    let Some(entry) = app.selected_entry() else {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("  No results yet.", Theme::text_muted())),
        ])
        .block(panel(" Results ", false));
        let rest = Rect {
            height: layout[1].height + layout[2].height,
            ..layout[1]
        };
        frame.render_widget(empty, rest);
        return;
    };

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout[1]);
    render_original(frame, top[0], entry);
    render_highlights(frame, top[1], entry);
    render_tabbed(frame, layout[2], app, entry, focused);
}

fn panel(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::panel_border(focused))
}

fn render_history(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let items: Vec<ListItem> = app
        .history
        .all()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    entry.created_at.format("%H:%M:%S ").to_string(),
                    Theme::text_dim(),
                ),
                Span::styled(entry.title(), Theme::text()),
            ]))
        })
        .collect();

    let title = format!(" History ({}) ", app.history.len());
    let list = List::new(items)
        .block(panel(&title, focused))
        .highlight_style(Theme::selected().bg(Theme::GREY_700))
        .highlight_symbol("› ");

    let mut state = ListState::default();
    if !app.history.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_original(frame: &mut Frame, area: Rect, entry: &HistoryEntry) {
    let title = format!(" Original Code ({}) ", entry.sample.language().tag());
    let lines: Vec<Line> = entry
        .sample
        .source()
        .lines()
        .map(|l| Line::from(Span::styled(l, Theme::text())))
        .collect();
    frame.render_widget(Paragraph::new(lines).block(panel(&title, false)), area);
}

fn render_highlights(frame: &mut Frame, area: Rect, entry: &HistoryEntry) {
    let lines: Vec<Line> = highlight_lines(&entry.highlights)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Theme::text_muted())))
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel(" Static Highlights ", false)),
        area,
    );
}

fn render_tabbed(frame: &mut Frame, area: Rect, app: &App, entry: &HistoryEntry, focused: bool) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let tabs = Tabs::new(ResultTab::ALL.iter().map(|t| t.title()))
        .select(app.tab.index())
        .style(Theme::text_dim())
        .highlight_style(
            Style::default()
                .fg(Theme::WHITE)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::styled(" │ ", Style::default().fg(Theme::GREY_600)));
    frame.render_widget(tabs, layout[0]);

    let (title, lines, wrap) = match app.tab {
        ResultTab::Explanation => (
            " Explanation ".to_string(),
            text_or_placeholder(&entry.result.explanation),
            true,
        ),
        ResultTab::OptimizedCode => (
            format!(" Optimized Code ({}) ", entry.sample.language().tag()),
            text_or_placeholder(&entry.result.optimized_code),
            false,
        ),
        ResultTab::Diff => diff_pane(entry),
        ResultTab::Complexity => (
            " Time & Space Complexity ".to_string(),
            complexity_lines(&entry.result.complexity)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, Theme::text())))
                .collect(),
            false,
        ),
    };

    let mut paragraph = Paragraph::new(lines)
        .block(panel(&title, focused))
        .scroll((app.result_scroll, 0));
    if wrap {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }
    frame.render_widget(paragraph, layout[1]);
}

fn text_or_placeholder(text: &str) -> Vec<Line<'_>> {
    if text.trim().is_empty() {
        return vec![Line::from(Span::styled("(empty)", Theme::text_dim()))];
    }
    text.lines()
        .map(|l| Line::from(Span::styled(l, Theme::text())))
        .collect()
}

fn diff_pane(entry: &HistoryEntry) -> (String, Vec<Line<'static>>, bool) {
    let diff = diff_lines(entry.sample.source(), &entry.result.optimized_code);
    if diff.is_empty() {
        return (
            " Diff (Original → Optimized) ".to_string(),
            vec![Line::from(Span::styled(NO_CHANGES, Theme::text_muted()))],
            false,
        );
    }

    let (adds, removes) = stats(&diff);
    let title = format!(" Diff (Original → Optimized)  +{} -{} ", adds, removes);
    let lines = diff
        .iter()
        .map(|line| match line {
            DiffLine::Header(s) => Line::from(Span::styled(s.clone(), Theme::text_dim())),
            DiffLine::Hunk(s) => Line::from(Span::styled(
                s.clone(),
                Style::default().fg(Theme::GREY_300),
            )),
            DiffLine::Add(_) => Line::from(Span::styled(
                format!("+{}", line.content()),
                Style::default().fg(Theme::GREEN),
            )),
            DiffLine::Remove(_) => Line::from(Span::styled(
                format!("-{}", line.content()),
                Style::default().fg(Theme::RED),
            )),
            DiffLine::Context(_) => Line::from(Span::styled(
                format!(" {}", line.content()),
                Theme::text(),
            )),
        })
        .collect();
    (title, lines, false)
}
