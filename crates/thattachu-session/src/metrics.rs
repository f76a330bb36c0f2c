use std::collections::BTreeMap;

use serde::Serialize;
use thattachu_core::settings::SessionSettings;

/// Metrics for a finished level. `errors_by_cluster` is sorted by
/// descending error count, then by cluster for a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelReport {
    /// 1-based level number.
    pub level: u32,
    pub wpm: u32,
    pub cpm: u32,
    pub accuracy_pct: u32,
    pub correct_keys: u32,
    pub errors: u32,
    pub errors_by_cluster: Vec<(String, u32)>,
}

pub(crate) fn compute_report(
    level: u32,
    correct: u32,
    errors: u32,
    elapsed_secs: u32,
    errors_by_cluster: &BTreeMap<String, u32>,
    session: &SessionSettings,
) -> LevelReport {
    // All rates degrade to 0 rather than dividing by zero: a level
    // finished in the same second it started, or with no keys pressed,
    // reports zeros.
    let per_minute = |count: f64| -> u32 {
        if elapsed_secs == 0 {
            return 0;
        }
        (count * 60.0 / elapsed_secs as f64).round() as u32
    };

    let cpm = per_minute(correct as f64);
    let wpm = per_minute(correct as f64 / session.wpm_word_length.max(1) as f64);

    let attempts = correct + errors;
    let accuracy_pct = if attempts == 0 {
        0
    } else {
        (correct as f64 / attempts as f64 * 100.0).round() as u32
    };

    let mut by_cluster: Vec<(String, u32)> = errors_by_cluster
        .iter()
        .map(|(k, v)| (k.clone(), *v))
        .collect();
    by_cluster.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    LevelReport {
        level,
        wpm,
        cpm,
        accuracy_pct,
        correct_keys: correct,
        errors,
        errors_by_cluster: by_cluster,
    }
}
