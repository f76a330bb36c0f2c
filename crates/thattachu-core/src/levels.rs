//! Graduated level content: ordered targets to type, per level.
//!
//! Shipped as an embedded TOML asset, replaceable via `init_custom`
//! with the same OnceLock pattern as the phonetic table.

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_LEVELS_TOML: &str = include_str!("default_levels.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Debug, Clone, Deserialize)]
pub struct Level {
    pub description: String,
    pub content: Vec<String>,
}

#[derive(Deserialize)]
struct LevelFile {
    levels: Vec<Level>,
}

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("no levels defined")]
    Empty,
    #[error("level {0} has no content")]
    EmptyLevel(usize),
    #[error("level {level} target {index} is empty")]
    EmptyTarget { level: usize, index: usize },
    #[error("levels already initialized")]
    AlreadyInitialized,
}

pub fn parse_levels_toml(toml_str: &str) -> Result<Vec<Level>, LevelError> {
    let file: LevelFile = toml::from_str(toml_str).map_err(|e| LevelError::Parse(e.to_string()))?;

    if file.levels.is_empty() {
        return Err(LevelError::Empty);
    }
    for (i, level) in file.levels.iter().enumerate() {
        if level.content.is_empty() {
            return Err(LevelError::EmptyLevel(i + 1));
        }
        for (j, target) in level.content.iter().enumerate() {
            if target.is_empty() {
                return Err(LevelError::EmptyTarget {
                    level: i + 1,
                    index: j,
                });
            }
        }
    }
    Ok(file.levels)
}

/// Set custom TOML before first `levels()` call.
pub fn init_custom(toml_content: String) -> Result<(), LevelError> {
    parse_levels_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| LevelError::AlreadyInitialized)
}

/// Get or initialize the global level list.
pub fn levels() -> &'static [Level] {
    static INSTANCE: OnceLock<Vec<Level>> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_LEVELS_TOML);
        parse_levels_toml(toml_str).expect("levels TOML must be valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_levels() {
        let levels = parse_levels_toml(DEFAULT_LEVELS_TOML).unwrap();
        assert_eq!(levels.len(), 6);
        assert_eq!(levels[0].description, "Individual Tamil letters");
        assert_eq!(levels[0].content[0], "ட்");
        assert_eq!(levels[1].content, vec!["பிடி", "அடி", "குதி"]);
    }

    #[test]
    fn error_no_levels() {
        let err = parse_levels_toml("levels = []").unwrap_err();
        assert!(matches!(err, LevelError::Empty));
    }

    #[test]
    fn error_empty_level() {
        let toml = r#"
[[levels]]
description = "empty"
content = []
"#;
        let err = parse_levels_toml(toml).unwrap_err();
        assert!(matches!(err, LevelError::EmptyLevel(1)));
    }

    #[test]
    fn error_empty_target() {
        let toml = r#"
[[levels]]
description = "bad"
content = ["க", ""]
"#;
        let err = parse_levels_toml(toml).unwrap_err();
        assert!(matches!(
            err,
            LevelError::EmptyTarget { level: 1, index: 1 }
        ));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_levels_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
    }

    #[test]
    fn default_levels_segment_fully() {
        // Every shipped target must be typeable: each Tamil letter
        // resolves to a mapped cluster, nothing falls through except
        // spaces and punctuation.
        let table = crate::phonetic::PhoneticTable::global();
        for level in parse_levels_toml(DEFAULT_LEVELS_TOML).unwrap() {
            for target in &level.content {
                let seg = table.segment_target(target);
                for span in &seg.spans {
                    let c = span.grapheme.chars().next().unwrap();
                    if crate::unicode::is_tamil(c) {
                        assert!(
                            table.keys_for(&span.grapheme).is_some(),
                            "unmapped cluster {:?} in target {:?}",
                            span.grapheme,
                            target
                        );
                    }
                }
            }
        }
    }
}
