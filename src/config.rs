//! Game configuration loaded from TOML.

use crate::bot::BotDriver;
use crate::llm_client::{LlmClient, LlmConfig, LlmProvider};
use crate::oracle::{Difficulty, LexiconOracle, LlmOracle, OracleClient, WordOracle};
use crate::session::Player;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use strictly_chain::{DEFAULT_POINTS_MULTIPLIER, TimeControl};
use tracing::{debug, info, instrument, warn};

/// Top-level configuration.
///
/// ```toml
/// [oracle]
/// provider = "gemini"
/// timeout_secs = 15
///
/// [bot]
/// name = "Gemini Grandmaster"
/// min_delay_ms = 1000
///
/// [rules]
/// multiplier = 15
///
/// [rules.time_control]
/// blitz_secs = 180
/// ```
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Word judge settings.
    #[serde(default)]
    oracle: OracleSettings,

    /// Automated opponent settings.
    #[serde(default)]
    bot: BotSettings,

    /// Scoring and timing.
    #[serde(default)]
    rules: RulesSettings,
}

/// Which judge to use and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct OracleSettings {
    /// LLM provider (openai, anthropic or gemini).
    #[serde(default = "default_provider")]
    provider: LlmProvider,

    /// Model name; the provider's default when absent.
    #[serde(default)]
    #[getter(skip)]
    model: Option<String>,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// Word list for the offline judge. Takes precedence over the LLM.
    #[serde(default)]
    lexicon: Option<PathBuf>,
}

/// Bot profile and driver tuning.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct BotSettings {
    /// Display name.
    #[serde(default = "default_bot_name")]
    name: String,

    /// Informational rating.
    #[serde(default = "default_bot_rating")]
    rating: u32,

    /// Shortest thinking delay in milliseconds.
    #[serde(default = "default_min_delay_ms")]
    min_delay_ms: u64,

    /// Longest thinking delay in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    max_delay_ms: u64,

    /// Vocabulary tier requested from the judge.
    #[serde(default)]
    difficulty: Difficulty,

    /// Submissions per turn before the bot gives up until the next pass.
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,

    /// Whether the bot accepts draw offers.
    #[serde(default = "default_accepts_draws")]
    accepts_draws: bool,

    /// Seed for the thinking-delay RNG.
    #[serde(default)]
    seed: Option<u64>,
}

/// Scoring and clock cadence.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct RulesSettings {
    /// Points per letter.
    #[serde(default = "default_multiplier")]
    multiplier: u32,

    /// Real time per clock tick in milliseconds.
    #[serde(
        default = "default_tick_interval_ms",
        deserialize_with = "positive_millis"
    )]
    tick_interval_ms: u64,

    /// Starting seconds per mode.
    #[serde(default, deserialize_with = "nonzero_time_control")]
    time_control: TimeControl,
}

fn positive_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let millis = u64::deserialize(deserializer)?;
    if millis == 0 {
        return Err(de::Error::custom("tick interval must be positive"));
    }
    Ok(millis)
}

fn nonzero_time_control<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<TimeControl, D::Error> {
    let clocks = TimeControl::deserialize(deserializer)?;
    if [
        clocks.blitz_secs,
        clocks.rapid_secs,
        clocks.classical_secs,
        clocks.bot_secs,
    ]
    .contains(&0)
    {
        return Err(de::Error::custom(
            "every time control needs at least one second",
        ));
    }
    Ok(clocks)
}

#[instrument]
fn default_provider() -> LlmProvider {
    LlmProvider::Gemini
}

#[instrument]
fn default_max_tokens() -> u32 {
    256
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_bot_name() -> String {
    "Gemini Grandmaster".to_string()
}

fn default_bot_rating() -> u32 {
    2850
}

fn default_min_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    2500
}

fn default_max_attempts() -> u32 {
    3
}

fn default_accepts_draws() -> bool {
    true
}

fn default_multiplier() -> u32 {
    DEFAULT_POINTS_MULTIPLIER
}

fn default_tick_interval_ms() -> u64 {
    1000
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            lexicon: None,
        }
    }
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            rating: default_bot_rating(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            difficulty: Difficulty::default(),
            max_attempts: default_max_attempts(),
            accepts_draws: default_accepts_draws(),
            seed: None,
        }
    }
}

impl Default for RulesSettings {
    fn default() -> Self {
        Self {
            multiplier: default_multiplier(),
            tick_interval_ms: default_tick_interval_ms(),
            time_control: TimeControl::default(),
        }
    }
}

impl OracleSettings {
    /// Model name, falling back to the provider's default.
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Points the offline judge at a word list.
    pub fn with_lexicon(mut self, path: impl Into<PathBuf>) -> Self {
        self.lexicon = Some(path.into());
        self
    }
}

impl BotSettings {
    /// The bot's player profile.
    pub fn player(&self) -> Player {
        Player::bot(self.name.clone(), self.rating)
    }

    /// Builds a driver from these settings.
    #[instrument(skip(self))]
    pub fn driver(&self) -> Result<BotDriver, ConfigError> {
        if self.min_delay_ms > self.max_delay_ms {
            return Err(ConfigError::new(format!(
                "Bot delay window is inverted: {}ms > {}ms",
                self.min_delay_ms, self.max_delay_ms
            )));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::new(
                "Bot max_attempts must be at least 1".to_string(),
            ));
        }

        let driver = BotDriver::new(
            Duration::from_millis(self.min_delay_ms)..=Duration::from_millis(self.max_delay_ms),
            self.difficulty,
            self.max_attempts,
            self.accepts_draws,
        );
        Ok(match self.seed {
            Some(seed) => driver.with_seed(seed),
            None => driver,
        })
    }
}

impl RulesSettings {
    /// Real time per clock tick.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(provider = %config.oracle.provider, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            warn!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the oracle section.
    pub fn with_oracle(mut self, oracle: OracleSettings) -> Self {
        self.oracle = oracle;
        self
    }

    /// Checks values serde cannot check on its own.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bot.driver()?;
        if self.oracle.timeout_secs == 0 {
            return Err(ConfigError::new("Oracle timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// Creates the LLM configuration.
    /// Requires the provider's API key environment variable.
    #[instrument(skip(self), fields(provider = %self.oracle.provider, model = %self.oracle.model()))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");
        let var = self.oracle.provider.api_key_var();
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            self.oracle.provider,
            api_key,
            self.oracle.model().to_string(),
            self.oracle.max_tokens,
        ))
    }

    /// Builds the configured word judge: the lexicon when one is set,
    /// otherwise the LLM.
    #[instrument(skip(self))]
    pub fn build_oracle(&self) -> Result<Arc<dyn WordOracle>, ConfigError> {
        match &self.oracle.lexicon {
            Some(path) => {
                info!(path = %path.display(), "Using lexicon oracle");
                Ok(Arc::new(LexiconOracle::from_file(path)?))
            }
            None => {
                let client = LlmClient::new(self.create_llm_config()?);
                info!("Using LLM oracle");
                Ok(Arc::new(LlmOracle::new(client)))
            }
        }
    }

    /// Builds the oracle client sessions share.
    #[instrument(skip(self))]
    pub fn oracle_client(&self) -> Result<OracleClient, ConfigError> {
        Ok(OracleClient::new(self.build_oracle()?, self.oracle.timeout()))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config: GameConfig = toml::from_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.oracle().model(), "gemini-3-flash-preview");
        assert_eq!(*config.bot().rating(), 2850);
        assert_eq!(*config.rules().multiplier(), 15);
        assert_eq!(config.rules().time_control().blitz_secs, 180);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: GameConfig = toml::from_str(
            r#"
            [oracle]
            provider = "anthropic"

            [bot]
            difficulty = "easy"
            seed = 7

            [rules.time_control]
            blitz_secs = 60
            "#,
        )
        .unwrap();

        assert_eq!(*config.oracle().provider(), LlmProvider::Anthropic);
        assert_eq!(config.oracle().model(), "claude-3-5-haiku-latest");
        assert_eq!(*config.bot().difficulty(), Difficulty::Easy);
        assert_eq!(*config.bot().seed(), Some(7));
        assert_eq!(*config.bot().max_attempts(), 3);
        assert_eq!(config.rules().time_control().blitz_secs, 60);
        assert_eq!(config.rules().time_control().classical_secs, 600);
    }

    #[test]
    fn test_inverted_delay_window_rejected() {
        let config: GameConfig = toml::from_str(
            r#"
            [bot]
            min_delay_ms = 3000
            max_delay_ms = 1000
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_durations_fail_to_parse() {
        assert!(toml::from_str::<RulesSettings>("tick_interval_ms = 0").is_err());
        assert!(toml::from_str::<RulesSettings>("[time_control]\nblitz_secs = 0").is_err());
        assert!(toml::from_str::<RulesSettings>("[time_control]\nbot_secs = 0").is_err());

        let rules: RulesSettings =
            toml::from_str("tick_interval_ms = 250\n[time_control]\nrapid_secs = 1").unwrap();
        assert_eq!(rules.tick_interval(), Duration::from_millis(250));
        assert_eq!(rules.time_control().rapid_secs, 1);
    }

    #[test]
    fn test_error_records_location() {
        let err = ConfigError::new("bad".to_string());
        assert!(err.file.ends_with("config.rs"));
        assert!(err.to_string().contains("bad"));
    }
}
