//! Server configuration read from the environment.
//!
//! `PAYCALC_BIND_ADDR` sets the listen address (default
//! `127.0.0.1:3000`); `PAYCALC_DEFAULT_DA_PERCENT` sets the DA rate
//! offered to new sessions (default 50).

use crate::error::{Result, SalaryError};
use crate::models::DEFAULT_DA_PERCENT;
use std::net::SocketAddr;

pub const BIND_ADDR_VAR: &str = "PAYCALC_BIND_ADDR";
pub const DEFAULT_DA_VAR: &str = "PAYCALC_DEFAULT_DA_PERCENT";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub default_da_percent: f64,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.  Unset keys
    /// take their defaults; set but unusable values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr.trim().parse::<SocketAddr>().map_err(|_| SalaryError::InvalidConfig {
            key: BIND_ADDR_VAR.to_string(),
            reason: format!("`{addr}` is not a socket address"),
        })?;

        let default_da_percent = match lookup(DEFAULT_DA_VAR) {
            None => DEFAULT_DA_PERCENT,
            Some(raw) => {
                let value = raw.trim().parse::<f64>().ok();
                match value {
                    Some(v) if v.is_finite() && v >= 0.0 => v,
                    _ => {
                        return Err(SalaryError::InvalidConfig {
                            key: DEFAULT_DA_VAR.to_string(),
                            reason: format!("`{raw}` is not a non-negative number"),
                        })
                    }
                }
            }
        };

        Ok(Config {
            bind_addr,
            default_da_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.default_da_percent, 50.0);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "0.0.0.0:8080"),
            (DEFAULT_DA_VAR, " 53 "),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.default_da_percent, 53.0);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = Config::from_lookup(lookup(&[(DEFAULT_DA_VAR, "-4")])).unwrap_err();
        assert!(err.to_string().contains(DEFAULT_DA_VAR));
        let err = Config::from_lookup(lookup(&[(BIND_ADDR_VAR, "localhost")])).unwrap_err();
        assert!(matches!(err, SalaryError::InvalidConfig { .. }));
    }
}
