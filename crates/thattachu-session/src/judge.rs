//! Keystroke judging and timer handling.

use tracing::debug;

use crate::metrics::compute_report;
use crate::types::{FeedbackStatus, KeyResponse, KeyVerdict, SessionError, SessionState};
use crate::TypingSession;

impl TypingSession {
    /// Judge one keystroke against the expected key at the cursor.
    ///
    /// A correct key advances the cursor and extends the typed text. A
    /// wrong key is recorded against the enclosing Tamil cluster; in
    /// paragraph mode it also advances the cursor (the miss is typed
    /// through), while in hint mode the cursor holds until the right
    /// key arrives.
    pub fn handle_key(&mut self, pressed: char) -> Result<KeyResponse, SessionError> {
        let paragraph = self.paragraph_mode();
        let hints = self.hints_active();
        let table = self.table;
        let run = self.run_mut().ok_or(SessionError::NotRunning)?;

        let Some(&expected) = run.seg.keystrokes.get(run.cursor) else {
            // Degenerate empty target: complete it immediately.
            let preview = run.preview.clone();
            self.advance_item();
            return Ok(KeyResponse {
                verdict: KeyVerdict::Correct,
                cursor_advanced: false,
                item_complete: true,
                preview,
            });
        };

        if pressed == expected {
            run.correct += 1;
            run.typed.push(pressed);
            run.preview = table.transliterate(&run.typed);
            if let Some(idx) = run.seg.span_index_at(run.cursor) {
                run.feedback[idx] = FeedbackStatus::Correct;
            }

            let at_last = run.cursor + 1 == run.seg.keystrokes.len();
            let preview = run.preview.clone();
            if at_last {
                self.advance_item();
            } else {
                run.cursor += 1;
            }
            return Ok(KeyResponse {
                verdict: KeyVerdict::Correct,
                cursor_advanced: true,
                item_complete: at_last,
                preview,
            });
        }

        // Wrong key: a scoring event, attributed to the cluster the
        // cursor is inside.
        run.errors += 1;
        if let Some(span) = run.seg.span_at(run.cursor) {
            *run
                .errors_by_cluster
                .entry(span.grapheme.clone())
                .or_insert(0) += 1;
        }

        let advance_on_error = paragraph && !hints;
        if !advance_on_error {
            return Ok(KeyResponse {
                verdict: KeyVerdict::Wrong { expected },
                cursor_advanced: false,
                item_complete: false,
                preview: run.preview.clone(),
            });
        }

        if let Some(idx) = run.seg.span_index_at(run.cursor) {
            run.feedback[idx] = FeedbackStatus::Wrong;
        }
        let at_last = run.cursor + 1 == run.seg.keystrokes.len();
        if at_last {
            let preview = run.preview.clone();
            self.advance_item();
            return Ok(KeyResponse {
                verdict: KeyVerdict::Wrong { expected },
                cursor_advanced: true,
                item_complete: true,
                preview,
            });
        }

        // The miss is typed through so the preview shows what was
        // actually pressed.
        run.cursor += 1;
        run.typed.push(pressed);
        run.preview = table.transliterate(&run.typed);
        Ok(KeyResponse {
            verdict: KeyVerdict::Wrong { expected },
            cursor_advanced: true,
            item_complete: false,
            preview: run.preview.clone(),
        })
    }

    /// Rewind one keystroke. Paragraph mode only; returns whether the
    /// cursor moved. Counters are not adjusted — the miss already
    /// happened.
    pub fn handle_backspace(&mut self) -> Result<bool, SessionError> {
        let paragraph = self.paragraph_mode();
        let table = self.table;
        let run = self.run_mut().ok_or(SessionError::NotRunning)?;

        if !paragraph || run.cursor == 0 {
            return Ok(false);
        }

        run.cursor -= 1;
        run.typed.pop();
        run.preview = table.transliterate(&run.typed);
        if let Some(idx) = run.seg.span_index_at(run.cursor) {
            run.feedback[idx] = FeedbackStatus::Pending;
        }
        Ok(true)
    }

    /// One second of countdown. Returns true when the tick expired the
    /// timer and finished the level.
    pub fn tick(&mut self) -> bool {
        let Some(run) = self.run_mut() else {
            return false;
        };
        run.time_left = run.time_left.saturating_sub(1);
        if run.time_left == 0 {
            self.finish_level();
            return true;
        }
        false
    }

    /// Move to the next target, or finish the level after the last one.
    /// Returns true when the level finished.
    fn advance_item(&mut self) -> bool {
        let table = self.table;
        let (level_idx, next_item) = {
            let run = self.run().expect("advance_item outside Running");
            (run.level_idx, run.item_idx + 1)
        };

        if next_item < self.levels[level_idx].content.len() {
            let seg = table.segment_target(&self.levels[level_idx].content[next_item]);
            let run = self.run_mut().expect("advance_item outside Running");
            run.item_idx = next_item;
            run.load_item(seg);
            false
        } else {
            self.finish_level();
            true
        }
    }

    fn finish_level(&mut self) {
        let time_limit = self.settings.session.time_limit_secs;
        let session_settings = self.settings.session.clone();
        let run = self.run().expect("finish_level outside Running");
        let elapsed = time_limit - run.time_left;
        let report = compute_report(
            run.level_idx as u32 + 1,
            run.correct,
            run.errors,
            elapsed,
            &run.errors_by_cluster,
            &session_settings,
        );
        debug!(
            level = report.level,
            wpm = report.wpm,
            accuracy = report.accuracy_pct,
            "level finished"
        );
        self.set_state(SessionState::LevelComplete(report));
    }

    #[cfg(test)]
    pub(crate) fn run_for_test(&self) -> &crate::types::LevelRun {
        self.run().expect("session not running")
    }
}
