use tokio::sync::mpsc;

/// Emitted after every completed batch. Subscribers (a progress bar, a log
/// line) observe the scheduler without the scheduler knowing about any UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub completed: usize,
    pub total: usize,
}

pub type ProgressTx = mpsc::UnboundedSender<ProgressEvent>;
