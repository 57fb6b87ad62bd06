//! Completion engine interface
//!
//! The suggestion controller only talks to a [`CompletionEngine`]; how
//! candidates are matched and ranked is the engine's business.
//! [`WordDictionary`] is the engine the editor ships with.

mod dictionary;

pub use dictionary::WordDictionary;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{Config, ConfigValue};

/// One ranked suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub word: String,
    pub score: f64,
}

impl Candidate {
    pub fn new(word: impl Into<String>, score: f64) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// Query or configuration failure. Never fatal: the editor simply shows no
/// suggestions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid engine setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
    #[error("unknown setting {0}")]
    UnknownSetting(String),
    #[error("engine unavailable: {0}")]
    Unavailable(String),
}

/// Dictionary load/save failure, reported to the user
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: malformed entry", path.display())]
    Parse { path: PathBuf, line: usize },
}

impl DictionaryError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Tuning parameters forwarded verbatim to the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub max_suggestions: usize,
    pub tolerance_threshold: usize,
    pub tolerance: usize,
    pub similar_weight: f64,
    pub original_weight: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 10,
            tolerance_threshold: 0,
            tolerance: 0,
            similar_weight: 0.5,
            original_weight: 1.0,
        }
    }
}

impl EngineConfig {
    pub const MAX_SUGGESTIONS: usize = 50;
    pub const MAX_TOLERANCE_THRESHOLD: usize = 100;
    pub const MAX_TOLERANCE: usize = 10;
    pub const MAX_WEIGHT: f64 = 2.0;

    /// Read engine settings from `config`, clamping each into its range.
    /// Missing or mistyped settings keep their defaults.
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        let int = |key: &str, default: usize, max: usize| match config.settings.get(key) {
            Some(ConfigValue::Int(v)) => (*v).clamp(0, max as i64) as usize,
            _ => default,
        };
        let float = |key: &str, default: f64| match config.settings.get(key) {
            Some(ConfigValue::Float(v)) if v.is_finite() => v.clamp(0.0, Self::MAX_WEIGHT),
            Some(ConfigValue::Int(v)) => (*v as f64).clamp(0.0, Self::MAX_WEIGHT),
            _ => default,
        };

        Self {
            max_suggestions: int("max_suggestions", defaults.max_suggestions, Self::MAX_SUGGESTIONS)
                .max(1),
            tolerance_threshold: int(
                "tolerance_threshold",
                defaults.tolerance_threshold,
                Self::MAX_TOLERANCE_THRESHOLD,
            ),
            tolerance: int("tolerance", defaults.tolerance, Self::MAX_TOLERANCE),
            similar_weight: float("similar_weight", defaults.similar_weight),
            original_weight: float("original_weight", defaults.original_weight),
        }
    }

    /// Names accepted by [`EngineConfig::check`]
    pub const SETTINGS: [&'static str; 5] = [
        "max_suggestions",
        "tolerance_threshold",
        "tolerance",
        "similar_weight",
        "original_weight",
    ];

    /// Validate one user-supplied setting against its range
    pub fn check(name: &str, value: &ConfigValue) -> Result<(), EngineError> {
        let Some(&name) = Self::SETTINGS.iter().find(|s| **s == name) else {
            return Err(EngineError::UnknownSetting(name.to_string()));
        };

        let weights = 0.0..=Self::MAX_WEIGHT;
        let in_range = match (name, value) {
            ("max_suggestions", ConfigValue::Int(v)) => {
                (1..=Self::MAX_SUGGESTIONS as i64).contains(v)
            }
            ("tolerance_threshold", ConfigValue::Int(v)) => {
                (0..=Self::MAX_TOLERANCE_THRESHOLD as i64).contains(v)
            }
            ("tolerance", ConfigValue::Int(v)) => (0..=Self::MAX_TOLERANCE as i64).contains(v),
            ("similar_weight" | "original_weight", ConfigValue::Float(v)) => weights.contains(v),
            ("similar_weight" | "original_weight", ConfigValue::Int(v)) => {
                weights.contains(&(*v as f64))
            }
            _ => false,
        };

        if in_range {
            Ok(())
        } else {
            Err(EngineError::InvalidSetting {
                name,
                reason: "value out of range".to_string(),
            })
        }
    }

    /// Check that weights are usable for scoring
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [
            ("similar_weight", self.similar_weight),
            ("original_weight", self.original_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidSetting {
                    name,
                    reason: format!("{} is not a non-negative number", value),
                });
            }
        }
        Ok(())
    }
}

/// Candidate-ranking service consumed by the suggestion controller.
///
/// All methods are called from the UI thread. Configuration changes apply to
/// subsequent queries only.
pub trait CompletionEngine {
    /// Ordered candidates for `prefix`, at most `limit` of them
    fn query(&self, prefix: &str, limit: usize) -> Result<Vec<Candidate>, EngineError>;

    /// Learn the words in `text`
    fn add_text(&mut self, text: &str);

    fn load_dictionary(&mut self, path: &Path) -> Result<(), DictionaryError>;

    fn save_dictionary(&self, path: &Path) -> Result<(), DictionaryError>;

    /// Forget every known word
    fn clear(&mut self);

    fn configure(&mut self, config: EngineConfig) -> Result<(), EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_defaults() {
        let config = Config::default();
        assert_eq!(EngineConfig::from_config(&config), EngineConfig::default());
    }

    #[test]
    fn test_from_config_clamps() {
        let mut config = Config::default();
        config.set("max_suggestions", 500i64);
        config.set("tolerance", -3i64);
        config.set("similar_weight", 7.5);
        config.set("original_weight", 2i64);

        let engine = EngineConfig::from_config(&config);
        assert_eq!(engine.max_suggestions, 50);
        assert_eq!(engine.tolerance, 0);
        assert_eq!(engine.similar_weight, 2.0);
        assert_eq!(engine.original_weight, 2.0);
    }

    #[test]
    fn test_check_ranges() {
        assert!(EngineConfig::check("max_suggestions", &ConfigValue::Int(50)).is_ok());
        assert!(EngineConfig::check("max_suggestions", &ConfigValue::Int(0)).is_err());
        assert!(EngineConfig::check("tolerance", &ConfigValue::Int(11)).is_err());
        assert!(EngineConfig::check("similar_weight", &ConfigValue::Float(1.5)).is_ok());
        assert!(EngineConfig::check("original_weight", &ConfigValue::Int(2)).is_ok());
        assert!(EngineConfig::check("original_weight", &ConfigValue::Float(2.5)).is_err());
        assert!(EngineConfig::check("tolerance", &ConfigValue::Float(1.0)).is_err());
        assert!(matches!(
            EngineConfig::check("colour", &ConfigValue::Int(1)),
            Err(EngineError::UnknownSetting(_))
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let config = EngineConfig {
            similar_weight: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidSetting {
                name: "similar_weight",
                ..
            })
        ));
    }
}
