//! Global configuration: the default pass threshold, the answer-matching
//! mode and where attempt reports go.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Exam;
use crate::scoring::{MatchMode, ScoringPolicy, DEFAULT_PASS_THRESHOLD};

/// Top-level examscore configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamscoreConfig {
    /// Pass threshold in percent for exams that do not set their own.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: u32,
    /// Compare answers case-insensitively. Off unless asked for.
    #[serde(default)]
    pub case_insensitive: bool,
    /// Output directory for attempt reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_pass_threshold() -> u32 {
    DEFAULT_PASS_THRESHOLD
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./examscore-results")
}

impl Default for ExamscoreConfig {
    fn default() -> Self {
        Self {
            pass_threshold: default_pass_threshold(),
            case_insensitive: false,
            output_dir: default_output_dir(),
        }
    }
}

impl ExamscoreConfig {
    pub fn match_mode(&self) -> MatchMode {
        if self.case_insensitive {
            MatchMode::CaseInsensitive
        } else {
            MatchMode::Exact
        }
    }

    /// The policy for grading `exam`: its own threshold wins over the
    /// global one.
    pub fn policy_for(&self, exam: &Exam) -> Result<ScoringPolicy> {
        let threshold = exam.pass_threshold.unwrap_or(self.pass_threshold);
        Ok(ScoringPolicy::new(threshold, self.match_mode())?)
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `examscore.toml` in the current directory
/// 2. `~/.config/examscore/config.toml`
///
/// Environment variable overrides: `EXAMSCORE_PASS_THRESHOLD`,
/// `EXAMSCORE_CASE_INSENSITIVE`.
pub fn load_config() -> Result<ExamscoreConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamscoreConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examscore.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ExamscoreConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ExamscoreConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    anyhow::ensure!(
        config.pass_threshold <= 100,
        "pass_threshold must be between 0 and 100, got {}",
        config.pass_threshold
    );

    Ok(config)
}

fn apply_env_overrides(
    config: &mut ExamscoreConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(value) = lookup("EXAMSCORE_PASS_THRESHOLD") {
        config.pass_threshold = value
            .trim()
            .parse()
            .with_context(|| format!("invalid EXAMSCORE_PASS_THRESHOLD: '{value}'"))?;
    }

    if let Some(value) = lookup("EXAMSCORE_CASE_INSENSITIVE") {
        config.case_insensitive = matches!(
            value.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        );
    }

    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examscore"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn exam_with_threshold(pass_threshold: Option<u32>) -> Exam {
        Exam {
            id: "e".into(),
            title: "E".into(),
            description: String::new(),
            course: None,
            pass_threshold,
            questions: vec![],
        }
    }

    #[test]
    fn default_config() {
        let config = ExamscoreConfig::default();
        assert_eq!(config.pass_threshold, 60);
        assert!(!config.case_insensitive);
        assert_eq!(config.match_mode(), MatchMode::Exact);
    }

    #[test]
    fn parse_config_file() {
        let config: ExamscoreConfig =
            toml::from_str("pass_threshold = 75\ncase_insensitive = true\n").unwrap();
        assert_eq!(config.pass_threshold, 75);
        assert_eq!(config.match_mode(), MatchMode::CaseInsensitive);
        assert_eq!(config.output_dir, PathBuf::from("./examscore-results"));
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examscore.toml");
        std::fs::write(&path, "pass_threshold = 50\noutput_dir = \"out\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/no/such/examscore.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("EXAMSCORE_PASS_THRESHOLD", "80"),
            ("EXAMSCORE_CASE_INSENSITIVE", "yes"),
        ]
        .into_iter()
        .collect();
        let mut config = ExamscoreConfig::default();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.pass_threshold, 80);
        assert!(config.case_insensitive);
    }

    #[test]
    fn bad_env_threshold_is_an_error() {
        let mut config = ExamscoreConfig::default();
        let result = apply_env_overrides(&mut config, |k| {
            (k == "EXAMSCORE_PASS_THRESHOLD").then(|| "sixty".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn exam_threshold_overrides_global() {
        let config = ExamscoreConfig::default();
        let own = config.policy_for(&exam_with_threshold(Some(80))).unwrap();
        assert_eq!(own.pass_threshold, 80);
        let global = config.policy_for(&exam_with_threshold(None)).unwrap();
        assert_eq!(global.pass_threshold, 60);
    }
}
