//! Stateful typing session for the Tamil trainer.
//!
//! `TypingSession` owns one session's progress through the graduated
//! levels and processes keystroke and timer events, replacing the
//! ambient mutable UI state of a typical trainer front end with an
//! explicit state machine: Idle -> Running -> LevelComplete ->
//! (Running | Finished).

mod judge;
mod metrics;
mod types;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use tracing::debug;

use thattachu_core::levels::{self, Level};
use thattachu_core::phonetic::PhoneticTable;
use thattachu_core::segment::{CharSpan, Segmentation};
use thattachu_core::settings::{self, Settings};

pub use metrics::LevelReport;
pub use types::{FeedbackStatus, KeyResponse, KeyVerdict, Phase, SessionError};

use types::{LevelRun, SessionState};

pub struct TypingSession {
    table: &'static PhoneticTable,
    levels: Vec<Level>,
    settings: Settings,
    /// Key-hint toggle for levels above the always-hint threshold.
    hints_enabled: bool,
    state: SessionState,
}

impl TypingSession {
    /// Session over the global table, levels, and settings.
    pub fn new() -> Self {
        Self::with_parts(
            PhoneticTable::global(),
            levels::levels().to_vec(),
            settings::settings().clone(),
        )
    }

    /// The loaders reject empty levels and targets; an ad-hoc level list
    /// gets the same treatment here, so a started session always has a
    /// target to segment.
    pub fn with_parts(
        table: &'static PhoneticTable,
        mut levels: Vec<Level>,
        settings: Settings,
    ) -> Self {
        for level in &mut levels {
            level.content.retain(|t| !t.is_empty());
        }
        levels.retain(|l| !l.content.is_empty());
        Self {
            table,
            levels,
            settings,
            hints_enabled: false,
            state: SessionState::Idle,
        }
    }

    /// Start (or restart) from level 1. With no levels to play the
    /// session stays Idle.
    pub fn start(&mut self) {
        if self.levels.is_empty() {
            self.state = SessionState::Idle;
            return;
        }
        debug!("session start");
        self.state = SessionState::Running(self.begin_level(0));
    }

    /// Retry the level that just completed.
    pub fn retry_level(&mut self) -> Result<(), SessionError> {
        let level_idx = match &self.state {
            SessionState::LevelComplete(report) => (report.level - 1) as usize,
            _ => return Err(SessionError::NotLevelComplete),
        };
        self.state = SessionState::Running(self.begin_level(level_idx));
        Ok(())
    }

    /// Advance past a completed level. Requires the pass accuracy;
    /// after the last level the session transitions to Finished.
    pub fn proceed_to_next_level(&mut self) -> Result<(), SessionError> {
        let report = match &self.state {
            SessionState::LevelComplete(report) => report,
            _ => return Err(SessionError::NotLevelComplete),
        };

        let required = self.settings.session.pass_accuracy_pct;
        if report.accuracy_pct < required {
            return Err(SessionError::BelowPassAccuracy {
                accuracy: report.accuracy_pct,
                required,
            });
        }

        let next_idx = report.level as usize;
        if next_idx < self.levels.len() {
            debug!(level = next_idx + 1, "proceeding to next level");
            self.state = SessionState::Running(self.begin_level(next_idx));
        } else {
            debug!("all levels complete");
            let report = report.clone();
            self.state = SessionState::Finished(report);
        }
        Ok(())
    }

    pub fn set_hints(&mut self, enabled: bool) {
        self.hints_enabled = enabled;
    }

    /// Key hints are always on up to the configured level; above that
    /// they follow the toggle.
    pub fn hints_active(&self) -> bool {
        match self.run() {
            Some(run) => {
                (run.level_idx as u32) < self.settings.feedback.hint_max_level
                    || self.hints_enabled
            }
            None => self.hints_enabled,
        }
    }

    /// Levels above the hint threshold run in paragraph mode: wrong
    /// keys advance and backspace rewinds.
    pub fn paragraph_mode(&self) -> bool {
        self.run()
            .is_some_and(|run| (run.level_idx as u32) >= self.settings.feedback.hint_max_level)
    }

    // --- Accessors ---

    pub fn phase(&self) -> Phase {
        match self.state {
            SessionState::Idle => Phase::Idle,
            SessionState::Running(_) => Phase::Running,
            SessionState::LevelComplete(_) => Phase::LevelComplete,
            SessionState::Finished(_) => Phase::Finished,
        }
    }

    /// 1-based level number while running.
    pub fn current_level(&self) -> Option<u32> {
        self.run().map(|run| run.level_idx as u32 + 1)
    }

    pub fn level_description(&self) -> Option<&str> {
        self.run()
            .map(|run| self.levels[run.level_idx].description.as_str())
    }

    pub fn current_target(&self) -> Option<&str> {
        self.run()
            .map(|run| self.levels[run.level_idx].content[run.item_idx].as_str())
    }

    pub fn segmentation(&self) -> Option<&Segmentation> {
        self.run().map(|run| &run.seg)
    }

    /// The keystroke expected next.
    pub fn expected_key(&self) -> Option<char> {
        self.run()
            .and_then(|run| run.seg.keystrokes.get(run.cursor).copied())
    }

    /// The cluster the cursor is inside, for the "கா -> kA" hint.
    pub fn current_span(&self) -> Option<&CharSpan> {
        self.run().and_then(|run| run.seg.span_at(run.cursor))
    }

    pub fn cursor(&self) -> usize {
        self.run().map(|run| run.cursor).unwrap_or(0)
    }

    pub fn typed(&self) -> &str {
        self.run().map(|run| run.typed.as_str()).unwrap_or("")
    }

    /// Tamil preview of the text typed so far.
    pub fn preview(&self) -> &str {
        self.run().map(|run| run.preview.as_str()).unwrap_or("")
    }

    pub fn feedback(&self) -> &[FeedbackStatus] {
        self.run().map(|run| run.feedback.as_slice()).unwrap_or(&[])
    }

    pub fn time_left(&self) -> u32 {
        self.run().map(|run| run.time_left).unwrap_or(0)
    }

    /// Report of the completed (or final) level.
    pub fn report(&self) -> Option<&LevelReport> {
        match &self.state {
            SessionState::LevelComplete(report) | SessionState::Finished(report) => Some(report),
            _ => None,
        }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    // --- Internals ---

    fn begin_level(&self, level_idx: usize) -> LevelRun {
        let target = &self.levels[level_idx].content[0];
        let seg = self.table.segment_target(target);
        let mut run = LevelRun {
            level_idx,
            item_idx: 0,
            seg: Segmentation::default(),
            cursor: 0,
            typed: String::new(),
            preview: String::new(),
            feedback: Vec::new(),
            correct: 0,
            errors: 0,
            errors_by_cluster: BTreeMap::new(),
            time_left: self.settings.session.time_limit_secs,
        };
        run.load_item(seg);
        run
    }

    pub(crate) fn run(&self) -> Option<&LevelRun> {
        match &self.state {
            SessionState::Running(run) => Some(run),
            _ => None,
        }
    }

    pub(crate) fn run_mut(&mut self) -> Option<&mut LevelRun> {
        match &mut self.state {
            SessionState::Running(run) => Some(run),
            _ => None,
        }
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        self.state = state;
    }
}

impl Default for TypingSession {
    fn default() -> Self {
        Self::new()
    }
}
