//! Classifier configuration.
//!
//! Values come from built-in defaults, optionally overridden by a TOML file,
//! then by command-line flags.

use std::{fs, path::{Path, PathBuf}};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    vectorizer::{evaluate::classify::DecisionRule, tokenizer::{Stopwords, Tokenizer}},
};

/// Default number of neighbors for the k-NN rule
pub const DEFAULT_K_NEIGHBORS: usize = 5;

/// Which decision rule to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RuleVariant {
    /// Single nearest neighbor
    Nearest,
    /// k-nearest-neighbors majority vote
    #[default]
    Knn,
}

/// Classifier settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Drop stopwords when tokenizing corpus and queries
    pub enable_stopword_filtering: bool,
    /// k for the k-NN rule
    pub k_neighbors: usize,
    /// Decision rule
    pub rule: RuleVariant,
    /// Replaces the built-in English stopword list
    pub stopwords: Option<Vec<String>>,
    /// Added to the active stopword list
    pub extra_stopwords: Vec<String>,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Corpus base directory
    pub corpus_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_stopword_filtering: false,
            k_neighbors: DEFAULT_K_NEIGHBORS,
            rule: RuleVariant::default(),
            stopwords: None,
            extra_stopwords: Vec::new(),
            log_level: "warn".to_string(),
            corpus_dir: None,
        }
    }
}

impl Config {
    /// Parse a TOML document
    /// `path` is only used in error messages. Values are not validated here,
    /// so later overrides can still fix them; call [`Config::validate`] last.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Reject values the classifier cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.k_neighbors == 0 {
            return Err(Error::InvalidConfig("k_neighbors must be a positive integer".to_string()));
        }
        Ok(())
    }

    /// Decision rule selected by `rule` and `k_neighbors`
    pub fn decision_rule(&self) -> DecisionRule {
        match self.rule {
            RuleVariant::Nearest => DecisionRule::Nearest,
            RuleVariant::Knn => DecisionRule::Knn(self.k_neighbors),
        }
    }

    /// Stopword set: the configured list or the English default, plus extras
    pub fn stopword_set(&self) -> Stopwords {
        let mut stopwords = match &self.stopwords {
            Some(words) => words.iter().collect(),
            None => Stopwords::english(),
        };
        stopwords.extend(&self.extra_stopwords);
        stopwords
    }

    /// Tokenizer for this configuration
    pub fn tokenizer(&self) -> Tokenizer {
        if self.enable_stopword_filtering {
            Tokenizer::with_stopwords(self.stopword_set())
        } else {
            Tokenizer::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Config> {
        Config::from_toml_str(content, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse("").expect("valid");
        assert_eq!(config, Config::default());
        assert_eq!(config.decision_rule(), DecisionRule::Knn(DEFAULT_K_NEIGHBORS));
        assert!(!config.tokenizer().filters_stopwords());
    }

    #[test]
    fn parses_every_field() {
        let config = parse(
            r#"
enable_stopword_filtering = true
k_neighbors = 3
rule = "nearest"
stopwords = ["Foo", "bar"]
extra_stopwords = ["baz"]
log_level = "debug"
corpus_dir = "data/news"
"#,
        )
        .expect("valid");
        assert!(config.enable_stopword_filtering);
        assert_eq!(config.k_neighbors, 3);
        assert_eq!(config.decision_rule(), DecisionRule::Nearest);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.corpus_dir, Some(PathBuf::from("data/news")));

        let stopwords = config.stopword_set();
        assert!(stopwords.contains("foo"));
        assert!(stopwords.contains("baz"));
        assert!(!stopwords.contains("the"));
        assert_eq!(config.tokenizer().tokenize("foo the bar baz car"), vec!["the", "car"]);
    }

    #[test]
    fn extra_stopwords_extend_english_list() {
        let config = parse("extra_stopwords = [\"car\"]").expect("valid");
        let stopwords = config.stopword_set();
        assert!(stopwords.contains("the"));
        assert!(stopwords.contains("car"));
    }

    #[test]
    fn zero_k_is_rejected_on_validation() {
        let config = parse("k_neighbors = 0").expect("parses");
        let err = config.validate().expect_err("invalid");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn override_after_parse_makes_config_valid() {
        let mut config = parse("k_neighbors = 0\nrule = \"knn\"").expect("parses");
        config.k_neighbors = 3;
        config.validate().expect("valid after override");
        assert_eq!(config.decision_rule(), DecisionRule::Knn(3));
    }

    #[test]
    fn unknown_rule_is_a_parse_error() {
        let err = parse("rule = \"farthest\"").expect_err("invalid");
        assert!(matches!(err, Error::ParseConfig { .. }));
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = parse("k = 3").expect_err("invalid");
        assert!(matches!(err, Error::ParseConfig { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).expect_err("missing");
        assert!(matches!(err, Error::ReadConfig { .. }));
    }
}
