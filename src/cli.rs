//! Command-line argument parsing for typeahead.
//!
//! The `Cli` struct holds every option; `apply_to_config` layers them over
//! the compiled-in defaults from `user_config`.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Command-line interface configuration.
#[derive(Parser, Debug, Default)]
#[command(version, about = "A terminal text editor with real-time word completion")]
pub struct Cli {
    /// File to open. Created on first save if it does not exist.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Dictionary file loaded at startup
    #[arg(long = "dict", value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    /// Most candidates returned per query (1-50)
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=50))]
    pub max_suggestions: Option<i64>,

    /// Prefix length at which fuzzy matching starts (0-100)
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=100))]
    pub tolerance_threshold: Option<i64>,

    /// Edit distance allowed for fuzzy matches (0-10)
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=10))]
    pub tolerance: Option<i64>,

    /// Score multiplier for fuzzy matches (0.0-2.0)
    #[arg(long, value_parser = parse_weight)]
    pub similar_weight: Option<f64>,

    /// Score multiplier for exact prefix matches (0.0-2.0)
    #[arg(long, value_parser = parse_weight)]
    pub original_weight: Option<f64>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbose logging (to typeahead.log unless --log-file is given)
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

fn parse_weight(raw: &str) -> Result<f64, String> {
    let weight: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=2.0).contains(&weight) {
        Ok(weight)
    } else {
        Err(format!("{weight} is not in 0.0..=2.0"))
    }
}

impl Cli {
    /// Apply CLI overrides to a configuration object.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(path) = &self.dictionary {
            config.set("dictionary", path.display().to_string());
        }
        if let Some(v) = self.max_suggestions {
            config.set("max_suggestions", v);
        }
        if let Some(v) = self.tolerance_threshold {
            config.set("tolerance_threshold", v);
        }
        if let Some(v) = self.tolerance {
            config.set("tolerance", v);
        }
        if let Some(v) = self.similar_weight {
            config.set("similar_weight", v);
        }
        if let Some(v) = self.original_weight {
            config.set("original_weight", v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigValue;

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "typeahead",
            "notes.txt",
            "--dict",
            "words.txt",
            "--max-suggestions",
            "5",
            "--similar-weight",
            "0.25",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("notes.txt")));

        let mut config = Config::default();
        cli.apply_to_config(&mut config);
        assert_eq!(config.get_string("dictionary"), Some("words.txt"));
        assert_eq!(config.get_int("max_suggestions"), Some(5));
        assert_eq!(config.get("similar_weight"), Some(&ConfigValue::Float(0.25)));
        assert_eq!(config.get("tolerance"), None);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Cli::try_parse_from(["typeahead", "--max-suggestions", "0"]).is_err());
        assert!(Cli::try_parse_from(["typeahead", "--original-weight", "3"]).is_err());
    }
}
