//! Trainer settings loaded from TOML, following the same OnceLock
//! pattern as the phonetic table.

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub session: SessionSettings,
    pub feedback: FeedbackSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Countdown per level, in seconds.
    pub time_limit_secs: u32,
    /// Minimum accuracy (percent) to unlock the next level.
    pub pass_accuracy_pct: u32,
    /// Keystrokes per "word" for the WPM metric.
    pub wpm_word_length: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackSettings {
    /// Levels up to this number always show key hints and hold the
    /// cursor on a wrong key; above it the trainer runs in paragraph
    /// mode unless hints are toggled on.
    pub hint_max_level: u32,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(session.time_limit_secs);
    check_positive!(session.wpm_word_length);

    if s.session.pass_accuracy_pct > 100 {
        return Err(SettingsError::InvalidValue {
            field: "session.pass_accuracy_pct".to_string(),
            reason: "must be at most 100".to_string(),
        });
    }

    Ok(())
}
