//! Server Configuration
//!
//! Everything the process needs, read once from the environment at startup.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use advisor::AdvisorConfig;
use anyhow::Context;
use auth::AuthConfig;
use auth::application::config::MAX_SESSION_TTL;
use axum::http::HeaderValue;
use kernel::money::Cents;
use ledger::LedgerConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

/// Process configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<HeaderValue>,
    pub auth: AuthConfig,
    pub ledger: LedgerConfig,
    pub advisor: AdvisorConfig,
}

impl ServerConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let production = lookup("APP_ENV").is_some_and(|env| env == "production");

        let auth_defaults = if production {
            AuthConfig::default()
        } else {
            AuthConfig::development()
        };
        let auth = AuthConfig {
            session_ttl: Duration::from_secs(parse_or(
                &lookup,
                "SESSION_TTL_SECS",
                auth_defaults.session_ttl.as_secs(),
            )?),
            session_sweep_interval: Duration::from_secs(parse_or(
                &lookup,
                "SESSION_SWEEP_SECS",
                auth_defaults.session_sweep_interval.as_secs(),
            )?),
            starting_balance: Cents::new(parse_or(
                &lookup,
                "STARTING_BALANCE_CENTS",
                auth_defaults.starting_balance.get(),
            )?),
            ..auth_defaults
        };
        anyhow::ensure!(
            !auth.session_sweep_interval.is_zero(),
            "SESSION_SWEEP_SECS must be positive"
        );
        anyhow::ensure!(
            auth.session_ttl <= MAX_SESSION_TTL,
            "SESSION_TTL_SECS must be at most {}",
            MAX_SESSION_TTL.as_secs()
        );

        let ledger_defaults = LedgerConfig::default();
        let ledger = LedgerConfig {
            lock_wait: Duration::from_millis(parse_or(
                &lookup,
                "LEDGER_LOCK_WAIT_MS",
                ledger_defaults.lock_wait.as_millis() as u64,
            )?),
            ..ledger_defaults
        };

        let advisor_defaults = AdvisorConfig::default();
        let advisor = AdvisorConfig {
            api_key: lookup("ANTHROPIC_API_KEY").filter(|key| !key.trim().is_empty()),
            model: lookup("ADVISOR_MODEL").unwrap_or(advisor_defaults.model),
            max_tokens: parse_or(&lookup, "ADVISOR_MAX_TOKENS", advisor_defaults.max_tokens)?,
            endpoint: lookup("ADVISOR_ENDPOINT").unwrap_or(advisor_defaults.endpoint),
            timeout: Duration::from_secs(parse_or(
                &lookup,
                "ADVISOR_TIMEOUT_SECS",
                advisor_defaults.timeout.as_secs(),
            )?),
            share_balance: parse_or(
                &lookup,
                "ADVISOR_SHARE_BALANCE",
                advisor_defaults.share_balance,
            )?,
        };

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("FRONTEND_ORIGINS has an invalid origin: {origin:?}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            bind_addr,
            frontend_origins,
            auth,
            ledger,
            advisor,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:5000".parse().unwrap());
        assert!(!config.auth.cookie_secure);
        assert_eq!(config.auth.session_ttl, Duration::from_secs(86_400));
        assert_eq!(config.auth.starting_balance, Cents::new(10_000));
        assert_eq!(config.ledger.lock_wait, Duration::from_millis(2_000));
        assert!(config.advisor.api_key.is_none());
        assert!(config.advisor.share_balance);
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("APP_ENV", "production"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("SESSION_TTL_SECS", "60"),
            ("LEDGER_LOCK_WAIT_MS", "150"),
            ("STARTING_BALANCE_CENTS", "0"),
            ("ANTHROPIC_API_KEY", "sk-ant-test"),
            ("ADVISOR_SHARE_BALANCE", "false"),
            ("FRONTEND_ORIGINS", "https://bank.example"),
        ])
        .unwrap();

        assert!(config.auth.cookie_secure);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.auth.session_ttl, Duration::from_secs(60));
        assert_eq!(config.ledger.lock_wait, Duration::from_millis(150));
        assert_eq!(config.auth.starting_balance, Cents::ZERO);
        assert_eq!(config.advisor.api_key.as_deref(), Some("sk-ant-test"));
        assert!(!config.advisor.share_balance);
        assert_eq!(
            config.frontend_origins,
            vec![HeaderValue::from_static("https://bank.example")]
        );
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = config(&[("LEDGER_LOCK_WAIT_MS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("LEDGER_LOCK_WAIT_MS"));

        assert!(config(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(config(&[("SESSION_SWEEP_SECS", "0")]).is_err());
        assert!(config(&[("SESSION_TTL_SECS", "10000000000000")]).is_err());
        assert!(config(&[("SESSION_TTL_SECS", "31536000")]).is_ok());

        let err = config(&[("FRONTEND_ORIGINS", "https://bank.example,bad\norigin")]).unwrap_err();
        assert!(err.to_string().contains("FRONTEND_ORIGINS"));
    }
}
