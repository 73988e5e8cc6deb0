use thiserror::Error;
use tourist_admin_common::AuthError;

#[derive(Error, Debug)]
pub enum TouristAdminError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Not signed in as admin ({0}). Run `tourist-admin login --admin-id <ID>` first")]
    NotSignedIn(#[from] AuthError),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Please provide a location")]
    MissingLocation,

    /// 利用者向けの文言に変換済みの失敗（詳細はログのみ）
    #[error("{0}")]
    Failed(String),

    #[error("Session file error: {0}")]
    Session(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TouristAdminError>;
