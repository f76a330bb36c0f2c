use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Deserialize)]
struct PhoneticConfig {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("non-ASCII key: {0}")]
    NonAsciiKey(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("cluster {cluster} is mapped by both {first_key} and {second_key}")]
    DuplicateCluster {
        cluster: String,
        first_key: String,
        second_key: String,
    },
    #[error("phonetic table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a sorted `BTreeMap<romanized, cluster>`.
///
/// Rejects duplicate cluster values up front: the reverse lookup must be
/// well-defined, so a table with two romanized spellings for the same
/// Tamil cluster fails at load time instead of silently keeping one.
pub fn parse_phonetic_toml(toml_str: &str) -> Result<BTreeMap<String, String>, TableError> {
    let config: PhoneticConfig =
        toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(TableError::Empty);
    }

    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    for (key, value) in &config.mappings {
        if !key.is_ascii() {
            return Err(TableError::NonAsciiKey(key.clone()));
        }
        if value.is_empty() {
            return Err(TableError::EmptyValue(key.clone()));
        }
        if let Some(first_key) = seen.insert(value.as_str(), key.as_str()) {
            return Err(TableError::DuplicateCluster {
                cluster: value.clone(),
                first_key: first_key.to_string(),
                second_key: key.clone(),
            });
        }
    }

    Ok(config.mappings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_toml() {
        let toml = r#"
[mappings]
a = "அ"
ka = "க"
"#;
        let map = parse_phonetic_toml(toml).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "அ");
        assert_eq!(map["ka"], "க");
    }

    #[test]
    fn parse_default_toml() {
        let map = parse_phonetic_toml(super::super::table::DEFAULT_TABLE_TOML).unwrap();
        assert!(map.len() > 250, "expected 250+ mappings, got {}", map.len());
    }

    #[test]
    fn error_empty_mappings() {
        let toml = "[mappings]\n";
        let err = parse_phonetic_toml(toml).unwrap_err();
        assert!(matches!(err, TableError::Empty));
    }

    #[test]
    fn error_non_ascii_key() {
        let toml = "
[mappings]
\"க\" = \"ka\"
";
        let err = parse_phonetic_toml(toml).unwrap_err();
        assert!(matches!(err, TableError::NonAsciiKey(_)));
    }

    #[test]
    fn error_empty_value() {
        let toml = r#"
[mappings]
a = ""
"#;
        let err = parse_phonetic_toml(toml).unwrap_err();
        assert!(matches!(err, TableError::EmptyValue(_)));
    }

    #[test]
    fn error_duplicate_cluster() {
        let toml = r#"
[mappings]
kA = "கா"
kaa = "கா"
"#;
        let err = parse_phonetic_toml(toml).unwrap_err();
        match err {
            TableError::DuplicateCluster {
                cluster,
                first_key,
                second_key,
            } => {
                assert_eq!(cluster, "கா");
                assert_eq!(first_key, "kA");
                assert_eq!(second_key, "kaa");
            }
            other => panic!("expected DuplicateCluster, got {:?}", other),
        }
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_phonetic_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, TableError::Parse(_)));
    }
}
