use std::collections::BTreeMap;

use thattachu_core::segment::Segmentation;

use crate::metrics::LevelReport;

/// Observable session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    LevelComplete,
    Finished,
}

/// Per-cluster paragraph feedback, aligned with the segmentation spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStatus {
    Pending,
    Correct,
    Wrong,
}

/// Judgement of a single keystroke. A wrong key is a scoring event,
/// not an error condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyVerdict {
    Correct,
    Wrong { expected: char },
}

/// Response from `handle_key`, returned to the caller driving the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResponse {
    pub verdict: KeyVerdict,
    /// Whether the cursor moved (wrong keys advance only in paragraph mode).
    pub cursor_advanced: bool,
    /// Whether this keystroke completed the current target.
    pub item_complete: bool,
    /// Tamil preview of everything typed so far for this target.
    pub preview: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session is not running")]
    NotRunning,
    #[error("no completed level to act on")]
    NotLevelComplete,
    #[error("accuracy {accuracy}% is below the required {required}%")]
    BelowPassAccuracy { accuracy: u32, required: u32 },
}

pub(crate) enum SessionState {
    Idle,
    Running(LevelRun),
    LevelComplete(LevelReport),
    Finished(LevelReport),
}

/// Mutable state for one level attempt. Counters span the whole level;
/// the segmentation, cursor, and typed text are per target item.
pub(crate) struct LevelRun {
    pub(crate) level_idx: usize,
    pub(crate) item_idx: usize,
    pub(crate) seg: Segmentation,
    pub(crate) cursor: usize,
    pub(crate) typed: String,
    pub(crate) preview: String,
    pub(crate) feedback: Vec<FeedbackStatus>,
    pub(crate) correct: u32,
    pub(crate) errors: u32,
    pub(crate) errors_by_cluster: BTreeMap<String, u32>,
    pub(crate) time_left: u32,
}

impl LevelRun {
    pub(crate) fn load_item(&mut self, seg: Segmentation) {
        self.feedback = vec![FeedbackStatus::Pending; seg.spans.len()];
        self.seg = seg;
        self.cursor = 0;
        self.typed.clear();
        self.preview.clear();
    }
}
