//! 管理者APIのリクエスト/レスポンス型
//!
//! エンドポイントごとに成功/失敗を型で区別し、
//! フィールドの有無チェックではなく `decode_response` で網羅的に扱う。

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::types::{TouristRecord, VisitRecord};

pub const VISITS_PATH: &str = "/api/admin/visits";
pub const SCAN_QR_PATH: &str = "/api/admin/scan-qr";
pub const RECORD_VISIT_PATH: &str = "/api/admin/record-visit";

/// QRコード解決リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanQrRequest {
    pub qr_code: String,
}

/// 訪問記録リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVisitRequest {
    pub user_id: String,
    pub location: String,
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisitsResponse {
    pub visits: Vec<VisitRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanQrResponse {
    pub tourist: TouristRecord,
}

/// 訪問記録の成功レスポンス（中身は使わない）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordVisitResponse {}

/// エラーレスポンス `{ "error": "..." }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// ステータスとボディからレスポンスを解釈する
pub fn decode_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<T, ApiError> {
    if (200..300).contains(&status) {
        // 空ボディは `{}` とみなす（record-visit は中身を返さないことがある）
        let body = if body.trim().is_empty() { "{}" } else { body };
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
    } else {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error);
        Err(ApiError::Server { status, message })
    }
}

/// 管理者APIの抽象
///
/// ブラウザの fetch でも実装できるよう `?Send`
#[async_trait(?Send)]
pub trait AdminApi {
    /// 訪問履歴を取得（サーバ順、新しい順を想定）
    async fn fetch_visits(&self) -> Result<Vec<VisitRecord>, ApiError>;

    /// スキャンしたQRコードを観光客レコードに解決
    async fn resolve_code(&self, qr_code: &str) -> Result<TouristRecord, ApiError>;

    /// 訪問を記録
    async fn record_visit(&self, request: &RecordVisitRequest) -> Result<(), ApiError>;
}
