use crate::consts::DEFAULT_BASE_URL;
use crate::error::ConfigError;
use crate::fetcher::ApiConfig;
use crate::types::DateRange;
use crate::utils::parse_api_date;

use std::env;

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Everything the loader needs for one run.
#[derive(Clone, Debug)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub range: DateRange,
    /// Index into the fetched per-site batches of the one batch to save.
    pub site_index: usize,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let api = ApiConfig {
            base_url: lookup("CALLIBRI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            login: required("CALLIBRI_USER_EMAIL")?,
            token: required("CALLIBRI_USER_TOKEN")?,
        };
        let database = DatabaseConfig {
            url: required("DATABASE_URL")?,
            max_connections: number(&lookup, "DATABASE_MAX_CONNECTIONS", 1)?,
        };

        let from = date(&lookup, "CALLIBRI_DATE_FROM", "11.04.2021")?;
        let to = date(&lookup, "CALLIBRI_DATE_TO", "16.04.2021")?;
        let range = DateRange::new(from, to)?;

        Ok(Self {
            api,
            database,
            range,
            site_index: number(&lookup, "CALLIBRI_SITE_INDEX", 0)?,
        })
    }
}

fn date<F>(lookup: &F, var: &'static str, default: &str) -> Result<time::Date, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(var).unwrap_or_else(|| default.to_string());
    parse_api_date(&value).map_err(|source| ConfigError::InvalidDate {
        var,
        value,
        source,
    })
}

fn number<F, N>(lookup: &F, var: &'static str, default: N) -> Result<N, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    N: std::str::FromStr<Err = std::num::ParseIntError>,
{
    match lookup(var) {
        Some(value) => value
            .parse()
            .map_err(|source| ConfigError::InvalidNumber { var, value, source }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use time::macros::date;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("CALLIBRI_USER_EMAIL", "user@example.com"),
        ("CALLIBRI_USER_TOKEN", "secret"),
        ("DATABASE_URL", "postgres://localhost/calls"),
    ];

    #[test]
    fn defaults_fill_optional_values() {
        let config = Config::from_lookup(lookup(REQUIRED)).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.range.from(), date!(2021 - 04 - 11));
        assert_eq!(config.range.to(), date!(2021 - 04 - 16));
        assert_eq!(config.site_index, 0);
        assert_eq!(config.database.max_connections, 1);
    }

    #[test]
    fn overrides_are_read() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("CALLIBRI_BASE_URL", "http://127.0.0.1:9000"),
            ("CALLIBRI_DATE_FROM", "01.05.2021"),
            ("CALLIBRI_DATE_TO", "03.05.2021"),
            ("CALLIBRI_SITE_INDEX", "2"),
        ]);
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.range.from(), date!(2021 - 05 - 01));
        assert_eq!(config.site_index, 2);
    }

    #[test]
    fn missing_token_is_reported() {
        let vars: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != "CALLIBRI_USER_TOKEN")
            .collect();
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("CALLIBRI_USER_TOKEN")));
    }

    #[test]
    fn bad_values_are_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("CALLIBRI_DATE_FROM", "2021-04-11"));
        assert!(matches!(
            Config::from_lookup(lookup(&vars)).unwrap_err(),
            ConfigError::InvalidDate { var: "CALLIBRI_DATE_FROM", .. }
        ));

        let mut vars = REQUIRED.to_vec();
        vars.push(("CALLIBRI_DATE_FROM", "20.04.2021"));
        assert!(matches!(
            Config::from_lookup(lookup(&vars)).unwrap_err(),
            ConfigError::Range(_)
        ));

        let mut vars = REQUIRED.to_vec();
        vars.push(("CALLIBRI_SITE_INDEX", "first"));
        assert!(matches!(
            Config::from_lookup(lookup(&vars)).unwrap_err(),
            ConfigError::InvalidNumber { .. }
        ));
    }
}
