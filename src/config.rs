/// 환경 변수 기반 설정
// region:    --- Imports
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;
// endregion: --- Imports

// region:    --- Config
pub const LISTEN_ADDR_ENV: &str = "AUCTION_LISTEN_ADDR";
pub const ENFORCE_MIN_BID_ENV: &str = "AUCTION_ENFORCE_MIN_BID";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// 경매 규칙 설정
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// 켜면 최소 입찰가 미만의 입찰을 거절한다. 기본값은 꺼짐.
    pub enforce_min_bid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub system: SystemConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_addr = lookup(LISTEN_ADDR_ENV).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                key: LISTEN_ADDR_ENV,
                value: listen_addr.clone(),
            })?;

        let enforce_min_bid = match lookup(ENFORCE_MIN_BID_ENV) {
            Some(value) => parse_flag(&value).ok_or(ConfigError::Invalid {
                key: ENFORCE_MIN_BID_ENV,
                value,
            })?,
            None => false,
        };

        Ok(Self {
            listen_addr,
            system: SystemConfig { enforce_min_bid },
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
// endregion: --- Config

// endregion: --- Tests
