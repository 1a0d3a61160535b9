//! Layered configuration loader and path helpers.
//!
//! Uses Figment to merge compiled defaults + `config.toml` + `config.<env>.toml`
//! + `FAQBOT_*` env vars (`__` separates nested keys, e.g.
//! `FAQBOT_MATCHER__THRESHOLD=0.4`). Relative paths are resolved against the
//! directory the configuration was loaded from.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_THRESHOLD: f64 = 0.3;
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "I'm not sure about that. Could you rephrase your question?";
pub const DEFAULT_ERROR_MESSAGE: &str = "I encountered an error processing your question";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub corpus: CorpusSettings,
    pub matcher: MatcherSettings,
    pub chat: ChatSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorpusSettings {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatcherSettings {
    pub threshold: f64,
    pub stemming: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatSettings {
    pub fallback_message: String,
    pub error_message: String,
    pub user_label: String,
    pub bot_label: String,
    pub exit_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            corpus: CorpusSettings { path: "faqs.json".to_string() },
            matcher: MatcherSettings { threshold: DEFAULT_THRESHOLD, stemming: true },
            chat: ChatSettings::default(),
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            user_label: "You".to_string(),
            bot_label: "Bot".to_string(),
            exit_command: "exit".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let threshold = self.matcher.threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidConfig(format!(
                "matcher.threshold must be within [0, 1], got {threshold}"
            )));
        }
        if self.chat.fallback_message.trim().is_empty() {
            return Err(Error::InvalidConfig("chat.fallback_message is empty".to_string()));
        }
        if self.chat.error_message.trim().is_empty() {
            return Err(Error::InvalidConfig("chat.error_message is empty".to_string()));
        }
        if self.chat.exit_command.trim().is_empty() {
            return Err(Error::InvalidConfig("chat.exit_command is empty".to_string()));
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Loads from the working directory, picking the env overlay from `RUST_ENV`.
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    pub fn load_from(base_dir: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(base_dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("FAQBOT_").split("__"));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.settings()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extracts and validates the typed settings.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }

    /// The configured corpus path, expanded and resolved against the config directory.
    pub fn corpus_path(&self) -> anyhow::Result<PathBuf> {
        let raw: String = self.get("corpus.path")?;
        Ok(resolve_with_base(&self.base_dir, raw))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
