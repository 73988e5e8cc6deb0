//! エラー型定義

use std::time::Duration;
use thiserror::Error;

/// API呼び出しエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// リクエスト自体が失敗（接続不可など）
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// サーバがエラーステータスを返した
    #[error("server error (status {status}): {}", .message.as_deref().unwrap_or("<no message>"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// レスポンスボディを解釈できない
    #[error("decode error: {0}")]
    Decode(String),
}

/// 操作ごとのユーザ向けメッセージ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorMessages {
    /// サーバがメッセージを返さなかった場合
    pub fallback: &'static str,
    /// 通信失敗など詳細を見せない場合
    pub generic: &'static str,
}

pub const SCAN_MESSAGES: ErrorMessages = ErrorMessages {
    fallback: "Failed to process QR code",
    generic: "An error occurred while processing the QR code",
};

pub const RECORD_MESSAGES: ErrorMessages = ErrorMessages {
    fallback: "Failed to record visit",
    generic: "An error occurred while recording the visit",
};

impl ApiError {
    /// 画面に表示するメッセージ
    ///
    /// サーバのメッセージはそのまま、通信系の詳細は出さない
    pub fn user_message(&self, messages: ErrorMessages) -> String {
        match self {
            ApiError::Server { message: Some(m), .. } if !m.is_empty() => m.clone(),
            ApiError::Server { .. } => messages.fallback.to_string(),
            ApiError::Transport(_) | ApiError::Timeout(_) | ApiError::Decode(_) => {
                messages.generic.to_string()
            }
        }
    }
}

/// セッション検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("not signed in as admin (role: {})", .found.as_deref().unwrap_or("<none>"))]
    NotAdmin { found: Option<String> },

    #[error("admin id is missing")]
    MissingAdminId,
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
