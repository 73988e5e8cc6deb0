//! API接続設定

use std::time::Duration;

/// デフォルトのリクエストタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API接続設定
///
/// `request_timeout` が `None` の場合は無期限に待つ（明示的に選んだ場合のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 例: "https://admin.example.com"（同一オリジンなら空文字）
    pub base_url: String,
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// 秒指定のタイムアウト（0で無効）
    pub fn with_timeout_secs(mut self, seconds: u64) -> Self {
        self.request_timeout = if seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(seconds))
        };
        self
    }

    /// ベースURLとパスをスラッシュ1つで結合
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::VISITS_PATH;

    #[test]
    fn test_endpoint_join() {
        let config = ClientConfig::new("https://admin.example.com/");
        assert_eq!(
            config.endpoint(VISITS_PATH),
            "https://admin.example.com/api/admin/visits"
        );
        assert_eq!(
            ClientConfig::new("http://localhost:3000").endpoint("api/admin/scan-qr"),
            "http://localhost:3000/api/admin/scan-qr"
        );
    }

    #[test]
    fn test_same_origin_endpoint() {
        assert_eq!(ClientConfig::default().endpoint(VISITS_PATH), "/api/admin/visits");
    }

    #[test]
    fn test_timeout_zero_disables() {
        let config = ClientConfig::default().with_timeout_secs(0);
        assert_eq!(config.request_timeout, None);
        let config = config.with_timeout_secs(5);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }
}
