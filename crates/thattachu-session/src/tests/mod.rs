use thattachu_core::levels::Level;
use thattachu_core::phonetic::PhoneticTable;
use thattachu_core::settings::{FeedbackSettings, SessionSettings, Settings};

use crate::TypingSession;

mod flow;

pub(crate) fn test_settings(hint_max_level: u32) -> Settings {
    Settings {
        session: SessionSettings {
            time_limit_secs: 60,
            pass_accuracy_pct: 80,
            wpm_word_length: 5,
        },
        feedback: FeedbackSettings { hint_max_level },
    }
}

pub(crate) fn make_levels(defs: &[(&str, &[&str])]) -> Vec<Level> {
    defs
        .iter()
        .map(|(description, content)| Level {
            description: description.to_string(),
            content: content.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}

/// Session in hint mode (wrong keys hold the cursor).
pub(crate) fn hint_session(targets: &[&str]) -> TypingSession {
    let mut session = TypingSession::with_parts(
        PhoneticTable::global(),
        make_levels(&[("test level", targets)]),
        test_settings(3),
    );
    session.start();
    session
}

/// Session in paragraph mode (wrong keys advance, backspace rewinds).
pub(crate) fn paragraph_session(targets: &[&str]) -> TypingSession {
    let mut session = TypingSession::with_parts(
        PhoneticTable::global(),
        make_levels(&[("test level", targets)]),
        test_settings(0),
    );
    session.start();
    session
}

pub(crate) fn type_string(session: &mut TypingSession, keys: &str) {
    for c in keys.chars() {
        session.handle_key(c).expect("session should be running");
    }
}
