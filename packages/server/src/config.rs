//! Relay configuration.

use std::time::Duration;

use crate::domain::{ChatLog, MessageText};

/// Default TCP port of the relay
pub const DEFAULT_PORT: u16 = 8989;

/// Tunables of the relay server
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    /// Address to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Inactivity window after which a player is evicted
    pub player_ttl: Duration,
    /// Period of the expiry sweep
    pub reap_interval: Duration,
    /// Number of chat messages kept
    pub chat_capacity: usize,
    /// Maximum chat text length, in characters
    pub max_chat_chars: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            player_ttl: Duration::from_secs(60),
            reap_interval: Duration::from_secs(10),
            chat_capacity: ChatLog::DEFAULT_CAPACITY,
            max_chat_chars: MessageText::DEFAULT_MAX_CHARS,
        }
    }
}

impl RelayConfig {
    /// `host:port` string used for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // テスト項目: デフォルト設定は 8989 番ポート・TTL 60 秒・チャット 50 件
        // given (前提条件):

        // when (操作):
        let config = RelayConfig::default();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "0.0.0.0:8989");
        assert_eq!(config.player_ttl, Duration::from_secs(60));
        assert!(config.reap_interval < config.player_ttl);
        assert_eq!(config.chat_capacity, 50);
    }
}
