//! Terminal UI state for one explainer session
//!
//! `App` owns the session: the input form, the history, and what is currently
//! shown. Rendering lives in `render`; key handling in `crate::app::input`.

pub mod editor;
pub mod helpers;
mod render;
pub mod theme;

pub use editor::Editor;
pub use render::render;

use crate::error::ExplainError;
use crate::explain::Explanation;
use crate::history::{HistoryEntry, SessionHistory};
use crate::sample::{CodeSample, Language};
use std::path::PathBuf;
use std::time::Instant;

/// Which half of the screen takes key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Editor,
    History,
}

/// The four result panes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultTab {
    #[default]
    Explanation,
    OptimizedCode,
    Diff,
    Complexity,
}

impl ResultTab {
    pub const ALL: [ResultTab; 4] = [
        ResultTab::Explanation,
        ResultTab::OptimizedCode,
        ResultTab::Diff,
        ResultTab::Complexity,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ResultTab::Explanation => "Explanation",
            ResultTab::OptimizedCode => "Optimized Code",
            ResultTab::Diff => "Diff",
            ResultTab::Complexity => "Complexity",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    None,
    Explaining,
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        !matches!(self, LoadingState::None)
    }
}

/// Spinner animation frames (braille pattern)
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Overlay state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Overlay {
    #[default]
    None,
    Help {
        scroll: u16,
    },
    /// Model output that could not be decoded, shown for diagnosis
    RawOutput {
        raw: String,
        scroll: u16,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    /// Duration in seconds before toast expires
    pub fn duration_secs(&self) -> u64 {
        match self {
            ToastKind::Info => 3,
            ToastKind::Success => 3,
            ToastKind::Error => 10, // Errors stay longer
        }
    }
}

/// Toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub created_at: Instant,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(message: &str, kind: ToastKind) -> Self {
        Self {
            message: message.to_string(),
            created_at: Instant::now(),
            kind,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= self.kind.duration_secs()
    }
}

/// Session state
pub struct App {
    pub language: Language,
    pub editor: Editor,
    pub focus: Focus,
    pub history: SessionHistory,
    /// Index into history (0 = newest)
    pub selected: usize,
    pub tab: ResultTab,
    pub result_scroll: u16,
    pub loading: LoadingState,
    pub loading_frame: usize,
    pub overlay: Overlay,
    pub toast: Option<Toast>,
    pub model: String,
    pub session_tokens: u32,
    pub log_path: Option<PathBuf>,
    pub should_quit: bool,
}

impl App {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            language: Language::default(),
            editor: Editor::new(),
            focus: Focus::default(),
            history: SessionHistory::new(),
            selected: 0,
            tab: ResultTab::default(),
            result_scroll: 0,
            loading: LoadingState::None,
            loading_frame: 0,
            overlay: Overlay::None,
            toast: None,
            model: model.into(),
            session_tokens: 0,
            log_path: None,
            should_quit: false,
        }
    }

    pub fn selected_entry(&self) -> Option<&HistoryEntry> {
        self.history.get(self.selected)
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  SUBMISSION
    // ═══════════════════════════════════════════════════════════════════════

    /// Turn the form into a sample and mark a request as in flight.
    ///
    /// Returns `None` (with a toast) if a request is already running or the
    /// input is blank. Nothing is sent in either case.
    pub fn prepare_submission(&mut self) -> Option<CodeSample> {
        if self.loading.is_loading() {
            self.show_info("Still explaining the previous sample...");
            return None;
        }
        match CodeSample::new(self.editor.text(), self.language) {
            Ok(sample) => {
                self.loading = LoadingState::Explaining;
                self.loading_frame = 0;
                Some(sample)
            }
            Err(e) => {
                self.show_error(&e.to_string());
                None
            }
        }
    }

    /// A request finished with a decoded answer
    pub fn record_explanation(&mut self, explanation: Explanation) {
        self.loading = LoadingState::None;
        if let Some(usage) = &explanation.usage {
            self.session_tokens = self.session_tokens.saturating_add(usage.total_tokens);
        }
        self.history.append(explanation.entry);
        self.selected = 0;
        self.tab = ResultTab::Explanation;
        self.result_scroll = 0;
        self.focus = Focus::History;
        self.show_success("+ Explanation ready");
    }

    /// A request failed; history is left as it was
    pub fn record_failure(&mut self, error: ExplainError) {
        self.loading = LoadingState::None;
        match error {
            ExplainError::Decode { raw } => {
                self.show_error("AI returned invalid JSON");
                self.overlay = Overlay::RawOutput { raw, scroll: 0 };
            }
            other => self.show_error(&other.to_string()),
        }
    }

    /// A background task died without reporting a result
    pub fn record_crash(&mut self, message: &str) {
        self.loading = LoadingState::None;
        self.show_error(message);
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  FORM
    // ═══════════════════════════════════════════════════════════════════════

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggle();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Editor => Focus::History,
            Focus::History => Focus::Editor,
        };
    }

    /// Copy the selected entry's source and language back into the form
    pub fn load_selected_into_editor(&mut self) {
        let Some((source, language)) = self
            .selected_entry()
            .map(|e| (e.sample.source().to_string(), e.sample.language()))
        else {
            return;
        };
        self.editor.set_text(&source);
        self.language = language;
        self.focus = Focus::Editor;
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  RESULTS NAVIGATION
    // ═══════════════════════════════════════════════════════════════════════

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.history.len() {
            self.selected += 1;
            self.result_scroll = 0;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.result_scroll = 0;
        }
    }

    pub fn set_tab(&mut self, tab: ResultTab) {
        if self.tab != tab {
            self.tab = tab;
            self.result_scroll = 0;
        }
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.result_scroll = self.result_scroll.saturating_add(amount);
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.result_scroll = self.result_scroll.saturating_sub(amount);
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  OVERLAYS & TOASTS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn open_help(&mut self) {
        self.overlay = Overlay::Help { scroll: 0 };
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    pub fn overlay_scroll_down(&mut self) {
        if let Overlay::Help { scroll } | Overlay::RawOutput { scroll, .. } = &mut self.overlay {
            *scroll = scroll.saturating_add(1);
        }
    }

    pub fn overlay_scroll_up(&mut self) {
        if let Overlay::Help { scroll } | Overlay::RawOutput { scroll, .. } = &mut self.overlay {
            *scroll = scroll.saturating_sub(1);
        }
    }

    pub fn show_info(&mut self, message: &str) {
        self.toast = Some(Toast::new(message, ToastKind::Info));
    }

    pub fn show_success(&mut self, message: &str) {
        self.toast = Some(Toast::new(message, ToastKind::Success));
    }

    pub fn show_error(&mut self, message: &str) {
        tracing::debug!(message, "error shown to user");
        self.toast = Some(Toast::new(message, ToastKind::Error));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn tick_loading(&mut self) {
        if self.loading.is_loading() {
            self.loading_frame = self.loading_frame.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StaticHighlights;
    use crate::decode::ExplanationRecord;
    use crate::error::ServiceError;
    use crate::llm::Usage;

    fn explanation(source: &str) -> Explanation {
        Explanation {
            entry: HistoryEntry::new(
                CodeSample::new(source, Language::Python).unwrap(),
                StaticHighlights::default(),
                ExplanationRecord::default(),
            ),
            usage: Some(Usage {
                total_tokens: 10,
                ..Usage::default()
            }),
        }
    }

    #[test]
    fn test_blank_input_is_not_submitted() {
        let mut app = App::new("m");
        app.editor.set_text("   \n  ");
        assert!(app.prepare_submission().is_none());
        assert!(!app.loading.is_loading());
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Error);
    }

    #[test]
    fn test_only_one_request_in_flight() {
        let mut app = App::new("m");
        app.editor.set_text("x = 1");
        let sample = app.prepare_submission().unwrap();
        assert_eq!(sample.source(), "x = 1");
        assert_eq!(app.loading, LoadingState::Explaining);

        assert!(app.prepare_submission().is_none());
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Info);
    }

    #[test]
    fn test_record_explanation_selects_newest() {
        let mut app = App::new("m");
        app.record_explanation(explanation("a = 1"));
        app.select_next();
        app.record_explanation(explanation("b = 2"));

        assert_eq!(app.history.len(), 2);
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_entry().unwrap().sample.source(), "b = 2");
        assert_eq!(app.session_tokens, 20);
        assert_eq!(app.focus, Focus::History);
        assert!(!app.loading.is_loading());
    }

    #[test]
    fn test_failures_leave_history_alone() {
        let mut app = App::new("m");
        app.loading = LoadingState::Explaining;
        app.record_failure(ServiceError::RateLimited.into());
        assert!(app.history.is_empty());
        assert!(!app.loading.is_loading());
        assert_eq!(app.overlay, Overlay::None);

        app.record_failure(ExplainError::Decode {
            raw: "garbage".into(),
        });
        assert!(app.history.is_empty());
        assert_eq!(
            app.overlay,
            Overlay::RawOutput {
                raw: "garbage".into(),
                scroll: 0
            }
        );
    }

    #[test]
    fn test_selection_bounds() {
        let mut app = App::new("m");
        app.select_next();
        assert_eq!(app.selected, 0);
        app.record_explanation(explanation("a"));
        app.record_explanation(explanation("b"));
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
        app.select_prev();
        app.select_prev();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_tab_cycling() {
        assert_eq!(ResultTab::Explanation.next(), ResultTab::OptimizedCode);
        assert_eq!(ResultTab::Complexity.next(), ResultTab::Explanation);
        assert_eq!(ResultTab::Explanation.prev(), ResultTab::Complexity);
        assert_eq!(ResultTab::from_index(2), Some(ResultTab::Diff));
        assert_eq!(ResultTab::from_index(4), None);
    }

    #[test]
    fn test_load_selected_into_editor() {
        let mut app = App::new("m");
        let mut e = explanation("function f() {}");
        e.entry.sample = CodeSample::new("function f() {}", Language::JavaScript).unwrap();
        app.record_explanation(e);
        app.load_selected_into_editor();
        assert_eq!(app.editor.text(), "function f() {}");
        assert_eq!(app.language, Language::JavaScript);
        assert_eq!(app.focus, Focus::Editor);
    }
}
