//! Server configuration loaded from environment variables.

pub mod profile;
pub mod seed;

use std::{net::SocketAddr, str::FromStr, time::Duration};

use crate::server::{
    admission::AdmissionLimits, config::profile::RankerType, error::config::ConfigError,
};

/// Storage backend for sessions and the rate-limit ledger
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Process-local, only correct for a single serving process
    Memory,
    /// Shared through Valkey/Redis
    Redis,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" | "valkey" => Ok(Self::Redis),
            other => Err(format!("unknown backend {:?}, expected memory or redis", other)),
        }
    }
}

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_ELO_K_FACTOR: f64 = 32.0;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 600;
pub const DEFAULT_SESSION_SWEEP_PROBABILITY: f64 = 0.1;
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_LOGO_URL_TEMPLATE: &str = "https://cdn.brandfetch.io/{domain}";

pub struct Config {
    pub database_url: String,
    pub admin_secret: String,
    pub listen_addr: SocketAddr,
    pub ranker_type: RankerType,
    pub valkey_url: Option<String>,
    pub session_backend: Backend,
    pub rate_limit_backend: Backend,
    pub elo_k_factor: f64,
    pub limits: AdmissionLimits,
    pub session_ttl: Duration,
    pub session_sweep_probability: f64,
    pub store_timeout: Duration,
    /// Logo URL pattern, `{domain}` is replaced with the firm's host
    pub logo_url_template: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvReader { lookup };
        let defaults = AdmissionLimits::default();

        let config = Self {
            database_url: env.required("DATABASE_URL")?,
            admin_secret: env.required("ADMIN_SECRET")?,
            listen_addr: env.parse_or("LISTEN_ADDR", DEFAULT_LISTEN_ADDR.parse().ok())?,
            ranker_type: env.parse_or("RANKER_TYPE", Some(RankerType::Vc))?,
            valkey_url: env.optional("VALKEY_URL"),
            session_backend: env.parse_or("SESSION_BACKEND", Some(Backend::Memory))?,
            rate_limit_backend: env.parse_or("RATE_LIMIT_BACKEND", Some(Backend::Memory))?,
            elo_k_factor: env.parse_or("ELO_K_FACTOR", Some(DEFAULT_ELO_K_FACTOR))?,
            limits: AdmissionLimits {
                per_minute: env.parse_or("VOTES_PER_MINUTE", Some(defaults.per_minute))?,
                per_hour: env.parse_or("VOTES_PER_HOUR", Some(defaults.per_hour))?,
            },
            session_ttl: Duration::from_secs(
                env.parse_or("SESSION_TTL_SECS", Some(DEFAULT_SESSION_TTL_SECS))?,
            ),
            session_sweep_probability: env.parse_or(
                "SESSION_SWEEP_PROBABILITY",
                Some(DEFAULT_SESSION_SWEEP_PROBABILITY),
            )?,
            store_timeout: Duration::from_millis(
                env.parse_or("STORE_TIMEOUT_MS", Some(DEFAULT_STORE_TIMEOUT_MS))?,
            ),
            logo_url_template: env
                .optional("LOGO_URL_TEMPLATE")
                .unwrap_or_else(|| DEFAULT_LOGO_URL_TEMPLATE.to_string()),
        };

        config.validate()?;

        Ok(config)
    }

    /// Whether any store is configured to use Valkey/Redis
    pub fn uses_redis(&self) -> bool {
        self.session_backend == Backend::Redis || self.rate_limit_backend == Backend::Redis
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |var: &str, reason: &str| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: reason.to_string(),
        };

        if !(self.elo_k_factor.is_finite() && self.elo_k_factor > 0.0) {
            return Err(invalid("ELO_K_FACTOR", "must be a positive number"));
        }
        if self.limits.per_minute == 0 {
            return Err(invalid("VOTES_PER_MINUTE", "must be at least 1"));
        }
        if self.limits.per_hour == 0 {
            return Err(invalid("VOTES_PER_HOUR", "must be at least 1"));
        }
        if self.session_ttl.is_zero() {
            return Err(invalid("SESSION_TTL_SECS", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.session_sweep_probability) {
            return Err(invalid("SESSION_SWEEP_PROBABILITY", "must be between 0 and 1"));
        }
        if self.store_timeout.is_zero() {
            return Err(invalid("STORE_TIMEOUT_MS", "must be at least 1"));
        }
        if !self.logo_url_template.contains("{domain}") {
            return Err(invalid("LOGO_URL_TEMPLATE", "must contain {domain}"));
        }
        if self.uses_redis() && self.valkey_url.is_none() {
            return Err(ConfigError::MissingEnvVar("VALKEY_URL".to_string()));
        }

        Ok(())
    }
}

struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Present and non-blank value
    fn optional(&self, var: &str) -> Option<String> {
        (self.lookup)(var).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, var: &str) -> Result<String, ConfigError> {
        self.optional(var)
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    }

    /// Parses the variable if set, else falls back to `default`
    fn parse_or<T>(&self, var: &str, default: Option<T>) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(var) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvValue {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            None => default.ok_or_else(|| ConfigError::MissingEnvVar(var.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use super::{Backend, Config};
    use crate::server::{config::profile::RankerType, error::config::ConfigError};

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_lookup(|var| vars.get(var).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/ranker"),
        ("ADMIN_SECRET", "secret"),
    ];

    /// Expect defaults for every optional variable
    #[test]
    fn applies_defaults() {
        let config = load(&REQUIRED).unwrap();

        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.ranker_type, RankerType::Vc);
        assert_eq!(config.session_backend, Backend::Memory);
        assert_eq!(config.rate_limit_backend, Backend::Memory);
        assert_eq!(config.elo_k_factor, 32.0);
        assert_eq!(config.limits.per_minute, 4);
        assert_eq!(config.limits.per_hour, 40);
        assert_eq!(config.session_ttl, Duration::from_secs(600));
        assert_eq!(config.session_sweep_probability, 0.1);
        assert_eq!(config.store_timeout, Duration::from_millis(5000));
        assert_eq!(
            config.logo_url_template,
            "https://cdn.brandfetch.io/{domain}"
        );
    }

    /// Expect MissingEnvVar when a required variable is absent
    #[test]
    fn requires_database_url() {
        let result = load(&[("ADMIN_SECRET", "secret")]);

        assert!(matches!(result, Err(ConfigError::MissingEnvVar(var)) if var == "DATABASE_URL"));
    }

    /// Expect InvalidEnvValue for values that do not parse
    #[test]
    fn rejects_unparsable_values() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("VOTES_PER_MINUTE", "four"));

        let result = load(&vars);

        assert!(
            matches!(result, Err(ConfigError::InvalidEnvValue { var, .. }) if var == "VOTES_PER_MINUTE")
        );
    }

    /// Expect a probability outside [0, 1] to be rejected
    #[test]
    fn rejects_out_of_range_probability() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("SESSION_SWEEP_PROBABILITY", "1.5"));

        assert!(load(&vars).is_err());
    }

    /// Expect VALKEY_URL to be required once a redis backend is selected
    #[test]
    fn redis_backend_requires_valkey_url() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("SESSION_BACKEND", "redis"));

        let missing = load(&vars);
        vars.push(("VALKEY_URL", "redis://127.0.0.1:6379"));
        let present = load(&vars);

        assert!(matches!(missing, Err(ConfigError::MissingEnvVar(var)) if var == "VALKEY_URL"));
        assert!(present.is_ok_and(|c| c.session_backend == Backend::Redis));
    }
}
