//! Interactive line-mode typing drill.
//!
//! Targets are typed one line at a time; each submitted line is judged
//! keystroke by keystroke and the one-second countdown is synced from
//! wall-clock time between prompts. Not a raw-terminal UI: backspace
//! within a line is handled by the terminal's own line editing before
//! the line reaches the session.

use std::io::{self, BufRead, Write};
use std::process;
use std::time::Instant;

use thattachu_core::phonetic::PhoneticTable;
use thattachu_core::{levels, settings};
use thattachu_session::{LevelReport, Phase, SessionError, TypingSession};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn drill_cmd(level: usize, json: bool) {
    let all = levels::levels();
    if level == 0 || level > all.len() {
        eprintln!("No such level: {} (levels are 1..={})", level, all.len());
        process::exit(1);
    }
    let offset = level - 1;

    // The session runs over the tail of the level list so the drill can
    // start anywhere; the hint threshold shifts with it and reported
    // level numbers are mapped back before printing.
    let mut session_settings = settings::settings().clone();
    session_settings.feedback.hint_max_level = session_settings
        .feedback
        .hint_max_level
        .saturating_sub(offset as u32);

    let mut session = TypingSession::with_parts(
        PhoneticTable::global(),
        all[offset..].to_vec(),
        session_settings,
    );
    session.start();

    let stdin = io::stdin();
    let started = Instant::now();
    let mut ticks_sent = 0u64;

    loop {
        match session.phase() {
            Phase::Running => {}
            Phase::LevelComplete => {
                if let Some(report) = session.report() {
                    print_report(report, offset, json);
                }
                if !prompt_next(&mut session, &stdin) {
                    return;
                }
                continue;
            }
            Phase::Finished => {
                println!("All levels complete.");
                return;
            }
            Phase::Idle => return,
        }

        println!();
        println!(
            "Level {}: {}  ({}s left)",
            session.current_level().unwrap_or(0) as usize + offset,
            session.level_description().unwrap_or(""),
            session.time_left()
        );
        println!("Type:  {}", session.current_target().unwrap_or(""));
        if session.hints_active() {
            if let Some(span) = session.current_span() {
                println!("Hint:  {} -> {}", span.grapheme, span.keys);
            }
        }
        print!("> ");
        die!(io::stdout().flush(), "Error writing to stdout: {}");

        let mut line = String::new();
        let n = die!(stdin.lock().read_line(&mut line), "Error reading input: {}");
        if n == 0 {
            println!();
            return;
        }

        for c in line.trim_end_matches(['\r', '\n']).chars() {
            if session.phase() != Phase::Running {
                break;
            }
            if session.handle_key(c).is_err() {
                break;
            }
        }
        if session.phase() == Phase::Running && !session.preview().is_empty() {
            println!("Typed: {}", session.preview());
        }

        let elapsed = started.elapsed().as_secs();
        while ticks_sent < elapsed && session.phase() == Phase::Running {
            session.tick();
            ticks_sent += 1;
        }
    }
}

fn print_report(report: &LevelReport, offset: usize, json: bool) {
    if json {
        let mut adjusted = report.clone();
        adjusted.level += offset as u32;
        println!(
            "{}",
            serde_json::to_string_pretty(&adjusted).expect("JSON serialization failed")
        );
        return;
    }

    println!();
    println!("=== Level {} complete ===", report.level as usize + offset);
    println!("  WPM:      {}", report.wpm);
    println!("  CPM:      {}", report.cpm);
    println!("  Accuracy: {}%", report.accuracy_pct);
    println!(
        "  Keys:     {} correct, {} wrong",
        report.correct_keys, report.errors
    );
    if !report.errors_by_cluster.is_empty() {
        println!("  Trouble spots:");
        for (cluster, count) in &report.errors_by_cluster {
            println!("    {}  {}", cluster, count);
        }
    }
}

/// Returns false when the drill should end.
fn prompt_next(session: &mut TypingSession, stdin: &io::Stdin) -> bool {
    loop {
        print!("[n]ext, [r]etry, [q]uit> ");
        die!(io::stdout().flush(), "Error writing to stdout: {}");

        let mut line = String::new();
        let n = die!(stdin.lock().read_line(&mut line), "Error reading input: {}");
        if n == 0 {
            println!();
            return false;
        }

        match line.trim() {
            "n" | "next" | "" => match session.proceed_to_next_level() {
                Ok(()) => return true,
                Err(SessionError::BelowPassAccuracy { accuracy, required }) => {
                    println!(
                        "Accuracy {}% is below the required {}%; retry to continue.",
                        accuracy, required
                    );
                }
                Err(e) => {
                    eprintln!("{}", e);
                    return false;
                }
            },
            "r" | "retry" => {
                if session.retry_level().is_ok() {
                    return true;
                }
                return false;
            }
            "q" | "quit" => return false,
            other => println!("Unrecognized: {}", other),
        }
    }
}
