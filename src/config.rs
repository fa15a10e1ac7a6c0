use std::fs;
use std::io;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use log::debug;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::core::{EmptyResult, GenericError, GenericResult};
use crate::deposits::{BalanceCarry, Limits, Validator};
use crate::time::DEFAULT_DATE_FORMAT;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Deserialize, Validate, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub limits: Limits,

    #[serde(default = "default_date_formats")]
    #[validate(length(min = 1))]
    #[validate(custom(function = "validate_date_formats"))]
    pub date_formats: Vec<String>,

    #[serde(default)]
    pub balance_carry: BalanceCarry,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            limits: Limits::default(),
            date_formats: default_date_formats(),
            balance_carry: BalanceCarry::default(),
        }
    }
}

impl Config {
    /// Loads `config.yaml` from the configuration directory. The file is optional.
    pub fn new(config_dir: &str) -> GenericResult<Config> {
        let path = Path::new(config_dir).join(CONFIG_FILE_NAME);

        let config = match Config::load(&path) {
            Ok(config) => config,
            Err(ConfigError::Missing) => {
                debug!("{:?} doesn't exist. Using the default configuration.", path);
                Config::default()
            },
            Err(ConfigError::Invalid(err)) => return Err!(
                "Error while reading {:?} configuration file: {}", path, err),
        };

        debug!("Configuration: {:?}", config);
        Ok(config)
    }

    fn load(path: &Path) -> Result<Config, ConfigError> {
        let data = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::Missing,
            _ => ConfigError::Invalid(e.into()),
        })?;

        Config::parse(&data).map_err(ConfigError::Invalid)
    }

    pub fn parse(data: &[u8]) -> GenericResult<Config> {
        let config: Config = serde_yaml::from_slice(data)?;
        config.validate().map_err(|e| format!("Invalid configuration: {e}"))?;
        config.validate_inner()?;
        Ok(config)
    }

    pub fn validator(&self) -> Validator {
        Validator::new(self.limits.clone(), self.date_formats.clone())
    }

    fn validate_inner(&self) -> EmptyResult {
        self.limits.validate_inner()
    }
}

enum ConfigError {
    Missing,
    Invalid(GenericError),
}

fn default_date_formats() -> Vec<String> {
    vec![DEFAULT_DATE_FORMAT.to_owned()]
}

fn validate_date_formats<F, S>(formats: F) -> Result<(), ValidationError>
    where
        F: IntoIterator<Item = S>,
        S: AsRef<str>,
{
    for format in formats {
        if StrftimeItems::new(format.as_ref()).any(|item| matches!(item, Item::Error)) {
            return Err(ValidationError::new("Invalid date format"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use indoc::indoc;
    use matches::assert_matches;
    use tempfile::TempDir;

    use crate::deposits::Bounds;

    use super::*;

    #[test]
    fn missing_config() {
        let config_dir = TempDir::new().unwrap();
        let config = Config::new(config_dir.path().to_str().unwrap()).unwrap();

        assert_eq!(config.limits, Limits::default());
        assert_eq!(config.date_formats, vec![s!("%d.%m.%Y")]);
        assert_eq!(config.balance_carry, BalanceCarry::Exact);
    }

    #[test]
    fn config_loading() {
        let config_dir = TempDir::new().unwrap();

        File::create(config_dir.path().join(CONFIG_FILE_NAME)).unwrap().write_all(indoc!("
            limits:
              periods: {min: 1, max: 59}
              amount: {min: 50000, max: 1000000}
            date_formats: ['%d.%m.%Y', '%Y-%m-%d']
            balance_carry: rounded
        ").as_bytes()).unwrap();

        let config = Config::new(config_dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config.limits.periods, Bounds::new(1, 59));
        assert_eq!(config.limits.amount, Bounds::new(50_000, 1_000_000));
        assert_eq!(config.limits.rate, Limits::default().rate);
        assert_eq!(config.date_formats.len(), 2);
        assert_eq!(config.balance_carry, BalanceCarry::Rounded);
    }

    #[test]
    fn invalid_config_file() {
        let config_dir = TempDir::new().unwrap();
        File::create(config_dir.path().join(CONFIG_FILE_NAME)).unwrap()
            .write_all(b"limits: {periods: {min: 12, max: 1}}").unwrap();

        assert_matches!(
            Config::new(config_dir.path().to_str().unwrap()),
            Err(e) if e.to_string().ends_with("Invalid periods limits: 12 > 1"));
    }

    #[test]
    fn invalid_config() {
        assert_matches!(Config::parse(b"unknown: true"), Err(_));
        assert_matches!(Config::parse(b"date_formats: []"), Err(_));
        assert_matches!(Config::parse(b"date_formats: ['%d.%m.%Q']"), Err(_));
        assert_matches!(Config::parse(b"balance_carry: yearly"), Err(_));
        assert_matches!(Config::parse(b"limits: {rate: {min: 0, max: 8}}"), Err(_));
    }
}
