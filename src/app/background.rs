//! Background tasks for the TUI
//!
//! Results come back over a std mpsc channel and are applied to `App` on the
//! UI thread by [`drain_messages`]. Channel sends use `let _ =`: the receiver
//! only goes away when the app is shutting down.

use crate::app::messages::BackgroundMessage;
use crate::app::RuntimeContext;
use crate::llm::CompletionService;
use crate::sample::CodeSample;
use crate::ui::App;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc};

pub fn drain_messages(app: &mut App, rx: &mpsc::Receiver<BackgroundMessage>) {
    while let Ok(msg) = rx.try_recv() {
        match msg {
            BackgroundMessage::ExplanationReady(explanation) => {
                tracing::info!(
                    id = %explanation.entry.id,
                    tokens = explanation.usage.as_ref().map(|u| u.total_tokens).unwrap_or(0),
                    "explanation recorded"
                );
                app.record_explanation(explanation);
            }
            BackgroundMessage::ExplanationFailed(error) => {
                tracing::warn!(error = %error, "explain action failed");
                app.record_failure(error);
            }
            BackgroundMessage::Error(e) => {
                tracing::error!(error = %e, "background task crashed");
                app.record_crash(&e);
            }
        }
    }
}

/// Run one explain action off the UI thread
pub fn spawn_explanation<S>(ctx: &RuntimeContext<'_, S>, sample: CodeSample)
where
    S: CompletionService + 'static,
{
    let explainer = Arc::clone(ctx.explainer);
    let tx = ctx.tx.clone();
    tracing::info!(
        language = %sample.language(),
        chars = sample.source().chars().count(),
        model = explainer.model(),
        "explain requested"
    );
    spawn_background(ctx.tx.clone(), "explain", async move {
        let msg = match explainer.explain(sample).await {
            Ok(explanation) => BackgroundMessage::ExplanationReady(explanation),
            Err(e) => BackgroundMessage::ExplanationFailed(e),
        };
        let _ = tx.send(msg);
    });
}

pub fn spawn_background<F>(tx: mpsc::Sender<BackgroundMessage>, task_name: &'static str, fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(panic) = AssertUnwindSafe(fut).catch_unwind().await {
            let detail = if let Some(s) = panic.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic payload".to_string()
            };
            let _ = tx.send(BackgroundMessage::Error(format!(
                "Background task '{}' crashed unexpectedly: {}",
                task_name, detail
            )));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExplainError, ServiceError};
    use crate::explain::Explainer;
    use crate::llm::Completion;
    use crate::sample::Language;
    use std::time::Duration;

    struct Canned(Result<Completion, ServiceError>);

    impl CompletionService for Canned {
        async fn request_explanation(
            &self,
            _prompt: &str,
            _model: &str,
        ) -> Result<Completion, ServiceError> {
            self.0.clone()
        }
    }

    fn recv(rx: &mpsc::Receiver<BackgroundMessage>) -> BackgroundMessage {
        rx.recv_timeout(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_spawn_explanation_reports_success() {
        let (tx, rx) = mpsc::channel();
        let explainer = Arc::new(Explainer::new(
            Canned(Ok(Completion::text(
                r#"{"explanation":"ok","optimized_code":"","complexity":{"time":"O(1)","space":"O(1)"}}"#,
            ))),
            "m",
        ));
        let ctx = RuntimeContext {
            tx: &tx,
            explainer: &explainer,
        };
        spawn_explanation(&ctx, CodeSample::new("x = 1", Language::Python).unwrap());

        let msg = tokio::task::spawn_blocking(move || recv(&rx)).await.unwrap();
        match msg {
            BackgroundMessage::ExplanationReady(e) => {
                assert_eq!(e.entry.result.explanation, "ok")
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_spawn_explanation_reports_failure() {
        let (tx, rx) = mpsc::channel();
        let explainer = Arc::new(Explainer::new(Canned(Err(ServiceError::Unauthorized)), "m"));
        let ctx = RuntimeContext {
            tx: &tx,
            explainer: &explainer,
        };
        spawn_explanation(&ctx, CodeSample::new("x = 1", Language::Python).unwrap());

        let msg = tokio::task::spawn_blocking(move || recv(&rx)).await.unwrap();
        assert!(matches!(
            msg,
            BackgroundMessage::ExplanationFailed(ExplainError::Service(ServiceError::Unauthorized))
        ));
    }

    #[tokio::test]
    async fn test_panicking_task_is_reported() {
        let (tx, rx) = mpsc::channel();
        spawn_background(tx, "boom", async { panic!("kaboom"); });
        let msg = tokio::task::spawn_blocking(move || recv(&rx)).await.unwrap();
        match msg {
            BackgroundMessage::Error(e) => {
                assert!(e.contains("'boom'"));
                assert!(e.contains("kaboom"));
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_drain_applies_messages_in_order() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new("m");
        app.loading = crate::ui::LoadingState::Explaining;
        tx.send(BackgroundMessage::ExplanationFailed(
            ServiceError::Timeout { secs: 60 }.into(),
        ))
        .unwrap();
        drain_messages(&mut app, &rx);
        assert!(!app.loading.is_loading());
        assert!(app.history.is_empty());
        assert!(app.toast.as_ref().unwrap().message.contains("timed out"));
    }
}
