use super::*;
use crate::{Phase, SessionError};

#[test]
fn finishing_all_items_completes_level() {
    let mut session = hint_session(&["க", "இ"]);
    type_string(&mut session, "ka");
    assert_eq!(session.phase(), Phase::Running);
    type_string(&mut session, "i");
    assert_eq!(session.phase(), Phase::LevelComplete);

    let report = session.report().unwrap();
    assert_eq!(report.level, 1);
    assert_eq!(report.correct_keys, 3);
    assert_eq!(report.errors, 0);
    assert_eq!(report.accuracy_pct, 100);
    assert!(report.errors_by_cluster.is_empty());
}

#[test]
fn report_ranks_error_clusters() {
    let mut session = hint_session(&["கா", "இ"]);
    // Two misses on கா, one on இ.
    type_string(&mut session, "xkxA");
    type_string(&mut session, "zi");
    let report = session.report().unwrap();
    assert_eq!(report.errors, 3);
    assert_eq!(
        report.errors_by_cluster,
        vec![("கா".to_string(), 2), ("இ".to_string(), 1)]
    );
}

#[test]
fn proceed_requires_level_complete() {
    let mut session = hint_session(&["க"]);
    assert!(matches!(
        session.proceed_to_next_level(),
        Err(SessionError::NotLevelComplete)
    ));
}

#[test]
fn proceed_requires_pass_accuracy() {
    let mut session = hint_session(&["க"]);
    // 2 correct, 3 errors: 40% accuracy, below the 80% gate.
    type_string(&mut session, "xxxka");
    assert_eq!(session.phase(), Phase::LevelComplete);

    match session.proceed_to_next_level() {
        Err(SessionError::BelowPassAccuracy { accuracy, required }) => {
            assert_eq!(accuracy, 40);
            assert_eq!(required, 80);
        }
        other => panic!("expected BelowPassAccuracy, got {:?}", other),
    }

    // Retry resets the level counters and timer.
    session.retry_level().unwrap();
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(session.current_level(), Some(1));
    assert_eq!(session.time_left(), 60);
    assert_eq!(session.run_for_test().errors, 0);
}

#[test]
fn proceed_through_levels_to_finished() {
    let levels = make_levels(&[("one", &["க"]), ("two", &["இ"])]);
    let mut session = crate::TypingSession::with_parts(
        thattachu_core::phonetic::PhoneticTable::global(),
        levels,
        test_settings(3),
    );
    session.start();

    type_string(&mut session, "ka");
    assert_eq!(session.phase(), Phase::LevelComplete);
    session.proceed_to_next_level().unwrap();
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(session.current_level(), Some(2));
    assert_eq!(session.level_description(), Some("two"));

    type_string(&mut session, "i");
    assert_eq!(session.phase(), Phase::LevelComplete);
    session.proceed_to_next_level().unwrap();
    assert_eq!(session.phase(), Phase::Finished);
    // The final report stays readable.
    assert_eq!(session.report().unwrap().level, 2);

    // And a fresh start returns to level 1.
    session.start();
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(session.current_level(), Some(1));
}

#[test]
fn retry_requires_level_complete() {
    let mut session = hint_session(&["க"]);
    assert!(matches!(
        session.retry_level(),
        Err(SessionError::NotLevelComplete)
    ));
}

#[test]
fn counters_accumulate_across_items_within_a_level() {
    let mut session = hint_session(&["க", "இ"]);
    type_string(&mut session, "xka");
    type_string(&mut session, "i");
    let report = session.report().unwrap();
    assert_eq!(report.correct_keys, 3);
    assert_eq!(report.errors, 1);
    assert_eq!(report.accuracy_pct, 75);
}

#[test]
fn default_session_walks_shipped_level_one() {
    // Types level 1 of the shipped content end to end via the canonical
    // keystrokes from the segmenter.
    let mut session = crate::TypingSession::new();
    session.start();
    assert_eq!(session.current_level(), Some(1));

    while session.phase() == Phase::Running && session.current_level() == Some(1) {
        let keys: String = session.segmentation().unwrap().keystrokes.iter().collect();
        type_string(&mut session, &keys);
    }

    assert_eq!(session.phase(), Phase::LevelComplete);
    let report = session.report().unwrap();
    assert_eq!(report.accuracy_pct, 100);
    assert_eq!(report.errors, 0);
}
