pub mod background;
pub mod input;
pub mod messages;
pub mod runtime;

pub use messages::BackgroundMessage;
pub use runtime::run_tui;

use crate::explain::Explainer;
use std::sync::mpsc;
use std::sync::Arc;

/// What key handlers need to start background work
pub struct RuntimeContext<'a, S> {
    pub tx: &'a mpsc::Sender<BackgroundMessage>,
    pub explainer: &'a Arc<Explainer<S>>,
}
