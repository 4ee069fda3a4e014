// SPDX-License-Identifier: MIT

//! Runtime settings read from the environment

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::node::error::RuntimeError;

pub const HOST_VAR: &str = "REDUX_NODES_HOST";
pub const PORT_VAR: &str = "REDUX_NODES_PORT";
pub const MAX_HOPS_VAR: &str = "REDUX_NODES_MAX_HOPS";

pub const DEFAULT_PORT: u16 = 1880;
pub const DEFAULT_MAX_HOPS: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Upper bound on node invocations for a single injected message
    pub max_hops: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

impl RuntimeConfig {
    /// Read settings from the process environment, falling back to defaults
    pub fn from_env() -> Result<Self, RuntimeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns `None` for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RuntimeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(HOST_VAR) {
            config.host = host.parse().map_err(|_| {
                RuntimeError::config(format!("{} is not an IP address: {}", HOST_VAR, host))
            })?;
        }
        if let Some(port) = lookup(PORT_VAR) {
            config.port = port.parse().map_err(|_| {
                RuntimeError::config(format!("{} is not a port: {}", PORT_VAR, port))
            })?;
        }
        if let Some(max_hops) = lookup(MAX_HOPS_VAR) {
            config.max_hops = match max_hops.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(RuntimeError::config(format!(
                        "{} must be a positive integer: {}",
                        MAX_HOPS_VAR, max_hops
                    )))
                }
            };
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
