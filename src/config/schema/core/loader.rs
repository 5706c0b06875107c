use super::Config;
use crate::error::ConfigError;
use directories::UserDirs;
use std::fs;
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load `~/.weekpage/config.toml`, writing a default one on first run.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("could not find home directory".into()))?;
        let weekpage_dir = home.join(".weekpage");
        let config_path = weekpage_dir.join("config.toml");

        if !weekpage_dir.exists() {
            fs::create_dir_all(&weekpage_dir)?;
        }

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self {
                config_path,
                ..Self::default()
            };
            config.save()?;
            debug!(path = %config.config_path.display(), "wrote default config");
            Ok(config)
        }
    }

    /// Load an explicit config file. Missing files are an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ConfigError::Load(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let mut config: Config = toml::from_str(&contents).map_err(|e| {
            ConfigError::Load(format!("cannot parse config file {}: {e}", path.display()))
        })?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// File (explicit path, or the default location) plus environment
    /// overrides, validated.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(raw) => {
                let expanded = shellexpand::tilde(raw);
                Self::load_from(Path::new(expanded.as_ref()))?
            }
            None => Self::load_or_init()?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Load(format!("cannot serialize config: {e}")))?;
        fs::write(&self.config_path, toml_str)?;
        Ok(())
    }
}
