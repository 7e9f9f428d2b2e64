use serde::{Deserialize, Serialize};

/// Main configuration structure for the atelier engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Specificity analysis tuning
    #[serde(default)]
    pub specificity: SpecificityConfig,

    /// Bandit selection tuning
    #[serde(default)]
    pub bandit: BanditConfig,

    /// Prompt assembly tuning
    #[serde(default)]
    pub assembler: AssemblerConfig,

    /// Feedback ingestion tuning
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Timeout for per-request repository/provider fetches, in milliseconds.
    /// On timeout the engine falls back to cold-start defaults.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Age beyond which a brand profile should trigger a refresh signal, in days.
    #[serde(default = "default_profile_staleness_days")]
    pub profile_staleness_days: i64,

    /// TTL of explain-cache entries, in seconds.
    #[serde(default = "default_explain_ttl_secs")]
    pub explain_ttl_secs: u64,

    /// Maximum number of retained explanations.
    #[serde(default = "default_explain_capacity")]
    pub explain_capacity: usize,

    /// Fixed RNG seed for deterministic sampling. Test/diagnostic use only;
    /// leave unset in production.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

const fn default_fetch_timeout_ms() -> u64 {
    250
}

const fn default_profile_staleness_days() -> i64 {
    30
}

const fn default_explain_ttl_secs() -> u64 {
    900
}

const fn default_explain_capacity() -> usize {
    512
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            specificity: SpecificityConfig::default(),
            bandit: BanditConfig::default(),
            assembler: AssemblerConfig::default(),
            feedback: FeedbackConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            profile_staleness_days: default_profile_staleness_days(),
            explain_ttl_secs: default_explain_ttl_secs(),
            explain_capacity: default_explain_capacity(),
            rng_seed: None,
        }
    }
}

/// Specificity scoring constants.
///
/// These are empirically chosen tuning knobs, not load-bearing business
/// rules: callers may adjust them so long as the monotonic relationships
/// between score, temperature, and mode are preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SpecificityConfig {
    /// Score added per populated descriptor bucket.
    #[serde(default = "default_descriptor_weight")]
    pub descriptor_weight: f64,

    /// Cap on the total descriptor-density contribution.
    #[serde(default = "default_descriptor_cap")]
    pub descriptor_cap: f64,

    /// Penalty applied when the raw text contains a vague term.
    #[serde(default = "default_vague_penalty")]
    pub vague_penalty: f64,

    /// Bonus applied when the raw text contains a precise term.
    #[serde(default = "default_precise_bonus")]
    pub precise_bonus: f64,

    /// Bonus per distinct technical fabric/construction term.
    #[serde(default = "default_technical_weight")]
    pub technical_weight: f64,

    /// Scores below this are exploratory.
    #[serde(default = "default_exploratory_threshold")]
    pub exploratory_threshold: f64,

    /// Scores above this are specific.
    #[serde(default = "default_specific_threshold")]
    pub specific_threshold: f64,

    /// Terms signalling an open-ended request.
    #[serde(default = "default_vague_lexicon")]
    pub vague_lexicon: Vec<String>,

    /// Terms signalling a tightly constrained request.
    #[serde(default = "default_precise_lexicon")]
    pub precise_lexicon: Vec<String>,

    /// Curated technical fabric and construction vocabulary.
    #[serde(default = "default_technical_lexicon")]
    pub technical_lexicon: Vec<String>,
}

const fn default_descriptor_weight() -> f64 {
    0.2
}

const fn default_descriptor_cap() -> f64 {
    0.6
}

const fn default_vague_penalty() -> f64 {
    0.3
}

const fn default_precise_bonus() -> f64 {
    0.3
}

const fn default_technical_weight() -> f64 {
    0.15
}

const fn default_exploratory_threshold() -> f64 {
    0.35
}

const fn default_specific_threshold() -> f64 {
    0.65
}

fn default_vague_lexicon() -> Vec<String> {
    ["surprise", "random", "varied", "diverse", "anything", "whatever"]
        .map(String::from)
        .to_vec()
}

fn default_precise_lexicon() -> Vec<String> {
    ["exactly", "must have", "precisely", "specifically", "only"]
        .map(String::from)
        .to_vec()
}

fn default_technical_lexicon() -> Vec<String> {
    [
        "cashmere",
        "merino",
        "charmeuse",
        "organza",
        "crepe",
        "jacquard",
        "boucle",
        "gabardine",
        "chiffon",
        "tweed",
        "french seams",
        "princess seams",
        "bias cut",
        "raglan",
        "darts",
        "ribbed cuffs",
        "welt pockets",
        "raw hem",
    ]
    .map(String::from)
    .to_vec()
}

impl Default for SpecificityConfig {
    fn default() -> Self {
        Self {
            descriptor_weight: default_descriptor_weight(),
            descriptor_cap: default_descriptor_cap(),
            vague_penalty: default_vague_penalty(),
            precise_bonus: default_precise_bonus(),
            technical_weight: default_technical_weight(),
            exploratory_threshold: default_exploratory_threshold(),
            specific_threshold: default_specific_threshold(),
            vague_lexicon: default_vague_lexicon(),
            precise_lexicon: default_precise_lexicon(),
            technical_lexicon: default_technical_lexicon(),
        }
    }
}

/// Bandit selection tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BanditConfig {
    /// Default number of modifiers to select when the caller does not say.
    #[serde(default = "default_max_tags")]
    pub default_max_tags: usize,

    /// Diversity cap: at most this many selected tags per category.
    #[serde(default = "default_max_per_category")]
    pub max_per_category: usize,

    /// Days a tag may go untouched before decay applies.
    #[serde(default = "default_decay_window_days")]
    pub decay_window_days: i64,

    /// Multiplier applied to alpha and beta of stale tags (floored at 1).
    #[serde(default = "default_decay_factor")]
    pub decay_factor: f64,
}

const fn default_max_tags() -> usize {
    8
}

const fn default_max_per_category() -> usize {
    2
}

const fn default_decay_window_days() -> i64 {
    90
}

const fn default_decay_factor() -> f64 {
    0.9
}

impl Default for BanditConfig {
    fn default() -> Self {
        Self {
            default_max_tags: default_max_tags(),
            max_per_category: default_max_per_category(),
            decay_window_days: default_decay_window_days(),
            decay_factor: default_decay_factor(),
        }
    }
}

/// Prompt assembly tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AssemblerConfig {
    /// Terms always present in the negative prompt.
    #[serde(default = "default_baseline_negative")]
    pub baseline_negative: Vec<String>,

    /// Modifiers at or above this weight get an emphasis suffix.
    #[serde(default = "default_emphasis_threshold")]
    pub emphasis_threshold: f64,

    /// Fixed technical quality terms closing the main prompt.
    #[serde(default = "default_quality_terms")]
    pub quality_terms: Vec<String>,

    /// Negative-prompt terms keyed by primary aesthetic: when the brand
    /// signature names an aesthetic, the competing looks listed here are
    /// excluded.
    #[serde(default = "default_aesthetic_exclusions")]
    pub aesthetic_exclusions: std::collections::BTreeMap<String, Vec<String>>,
}

fn default_baseline_negative() -> Vec<String> {
    [
        "low quality",
        "blurry",
        "artifacts",
        "distorted anatomy",
        "watermark",
        "text overlay",
    ]
    .map(String::from)
    .to_vec()
}

const fn default_emphasis_threshold() -> f64 {
    0.2
}

fn default_quality_terms() -> Vec<String> {
    [
        "professional fashion photography",
        "sharp focus",
        "high resolution",
    ]
    .map(String::from)
    .to_vec()
}

fn default_aesthetic_exclusions() -> std::collections::BTreeMap<String, Vec<String>> {
    let entries: [(&str, &[&str]); 5] = [
        ("minimalist", &["busy patterns", "maximalist styling", "cluttered composition"]),
        ("maximalist", &["plain styling", "understated palette"]),
        ("romantic", &["harsh industrial styling", "utilitarian details"]),
        ("sporty chic", &["formal eveningwear styling"]),
        ("streetwear", &["formal eveningwear styling", "corporate tailoring"]),
    ];
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.iter().map(|s| (*s).to_string()).collect()))
        .collect()
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            baseline_negative: default_baseline_negative(),
            emphasis_threshold: default_emphasis_threshold(),
            quality_terms: default_quality_terms(),
            aesthetic_exclusions: default_aesthetic_exclusions(),
        }
    }
}

/// Feedback ingestion tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FeedbackConfig {
    /// Bounded retries on conflict before surfacing a persistence error.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

const fn default_max_retries() -> u32 {
    3
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".atelier/atelier.db".to_string()
}

const fn default_max_connections() -> u32 {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        let config = EngineConfig::default();
        assert!(config.specificity.exploratory_threshold < config.specificity.specific_threshold);
        assert!(config.bandit.decay_factor > 0.0 && config.bandit.decay_factor < 1.0);
        assert!(config.bandit.max_per_category >= 1);
        assert!(config.feedback.max_retries >= 1);
    }

    #[test]
    fn test_config_deserializes_from_empty_yaml() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.bandit.default_max_tags, 8);
        assert!(!config.specificity.vague_lexicon.is_empty());
    }
}
