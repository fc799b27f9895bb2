use serde::{Deserialize, Serialize};
use std::fs;

/// Poker site whose history format should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    Winamax,
    Pokerstars,
}

impl SiteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteKind::Winamax => "winamax",
            SiteKind::Pokerstars => "pokerstars",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "winamax" => Some(SiteKind::Winamax),
            "pokerstars" => Some(SiteKind::Pokerstars),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub site: SiteKind,
    pub history_dir: Option<String>,
    pub workers: Option<usize>,
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub site: ValueSource,
    pub history_dir: ValueSource,
    pub workers: ValueSource,
    pub json: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            site: ValueSource::Default,
            history_dir: ValueSource::Default,
            workers: ValueSource::Default,
            json: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteKind::Winamax,
            history_dir: None,
            workers: None,
            json: false,
        }
    }
}

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub site: Option<SiteKind>,
    pub history_dir: Option<String>,
    pub workers: Option<usize>,
    pub json: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Defaults, then the TOML file named by `HANDSCOPE_CONFIG`, then
/// `HANDSCOPE_*` environment variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("HANDSCOPE_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.site {
            cfg.site = v;
            sources.site = ValueSource::File;
        }
        if let Some(v) = f.history_dir {
            cfg.history_dir = Some(v);
            sources.history_dir = ValueSource::File;
        }
        if let Some(v) = f.workers {
            cfg.workers = Some(v);
            sources.workers = ValueSource::File;
        }
        if let Some(v) = f.json {
            cfg.json = v;
            sources.json = ValueSource::File;
        }
    }

    if let Ok(site) = std::env::var("HANDSCOPE_SITE")
        && !site.is_empty()
    {
        cfg.site = SiteKind::parse(&site)
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid site: {}", site)))?;
        sources.site = ValueSource::Env;
    }
    if let Ok(dir) = std::env::var("HANDSCOPE_HISTORY_DIR")
        && !dir.is_empty()
    {
        cfg.history_dir = Some(dir);
        sources.history_dir = ValueSource::Env;
    }
    if let Ok(workers) = std::env::var("HANDSCOPE_WORKERS")
        && !workers.is_empty()
    {
        cfg.workers = Some(
            workers
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid workers".into()))?,
        );
        sources.workers = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// [`load_with_sources`] with command-line flags applied on top.
pub fn resolve(overrides: &CliOverrides) -> Result<ConfigResolved, ConfigError> {
    let ConfigResolved {
        mut config,
        mut sources,
    } = load_with_sources()?;

    if let Some(site) = overrides.site {
        config.site = site;
        sources.site = ValueSource::Cli;
    }
    if let Some(dir) = &overrides.history_dir {
        config.history_dir = Some(dir.clone());
        sources.history_dir = ValueSource::Cli;
    }
    if let Some(workers) = overrides.workers {
        config.workers = Some(workers);
        sources.workers = ValueSource::Cli;
    }
    if overrides.json {
        config.json = true;
        sources.json = ValueSource::Cli;
    }

    validate(&config)?;
    Ok(ConfigResolved { config, sources })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    site: Option<SiteKind>,
    #[serde(default)]
    history_dir: Option<String>,
    #[serde(default)]
    workers: Option<usize>,
    #[serde(default)]
    json: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.workers == Some(0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: workers must be >0".into(),
        ));
    }
    if cfg.history_dir.as_deref() == Some("") {
        return Err(ConfigError::Invalid(
            "Invalid configuration: history_dir must not be empty".into(),
        ));
    }
    Ok(())
}
