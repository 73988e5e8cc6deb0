//! 管理者API連携（fetch）
//!
//! GET  /api/admin/visits
//! POST /api/admin/scan-qr
//! POST /api/admin/record-visit

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo::timers::future::TimeoutFuture;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Request, RequestInit, RequestMode, Response};

use tourist_admin_common::{
    decode_response, AdminApi, ApiError, ClientConfig, RecordVisitRequest, RecordVisitResponse,
    ScanQrRequest, ScanQrResponse, TouristRecord, VisitRecord, VisitsResponse,
    RECORD_VISIT_PATH, SCAN_QR_PATH, VISITS_PATH,
};

/// ブラウザ fetch による管理者APIクライアント
#[derive(Debug, Clone, Default)]
pub struct FetchAdminApi {
    config: ClientConfig,
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Transport(format!("{:?}", value))
}

impl FetchAdminApi {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// リクエスト送信（ステータスとボディ文字列を返す）
    async fn send(&self, method: &str, path: &str, body: Option<String>) -> Result<(u16, String), ApiError> {
        let url = self.config.endpoint(path);
        let abort = AbortController::new().map_err(js_error)?;

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::SameOrigin);
        opts.set_signal(Some(&abort.signal()));
        if let Some(body) = &body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(js_error)?;
        }

        let window = web_sys::window().ok_or_else(|| ApiError::Transport("window unavailable".into()))?;
        let fetch = async {
            let resp_value = JsFuture::from(window.fetch_with_request(&request))
                .await
                .map_err(js_error)?;
            let resp: Response = resp_value.dyn_into().map_err(js_error)?;
            let text = JsFuture::from(resp.text().map_err(js_error)?)
                .await
                .map_err(js_error)?;
            Ok((resp.status(), text.as_string().unwrap_or_default()))
        };

        let result = with_timeout(self.config.request_timeout, fetch).await;
        if matches!(result, Err(ApiError::Timeout(_))) {
            // 待つのをやめた通信は中断しておく
            abort.abort();
        }
        result
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(u16, String), ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send("POST", path, Some(body)).await
    }
}

/// タイムアウト付きで待つ（`None` は無期限）
pub async fn with_timeout<T, F>(timeout: Option<Duration>, fut: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let Some(limit) = timeout else {
        return fut.await;
    };
    let millis = u32::try_from(limit.as_millis()).unwrap_or(u32::MAX);
    let timer = TimeoutFuture::new(millis);

    futures::pin_mut!(fut);
    futures::pin_mut!(timer);
    match select(fut, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ApiError::Timeout(limit)),
    }
}

#[async_trait(?Send)]
impl AdminApi for FetchAdminApi {
    async fn fetch_visits(&self) -> Result<Vec<VisitRecord>, ApiError> {
        let (status, body) = self.send("GET", VISITS_PATH, None).await?;
        decode_response::<VisitsResponse>(status, &body).map(|r| r.visits)
    }

    async fn resolve_code(&self, qr_code: &str) -> Result<TouristRecord, ApiError> {
        let request = ScanQrRequest { qr_code: qr_code.to_string() };
        let (status, body) = self.post_json(SCAN_QR_PATH, &request).await?;
        decode_response::<ScanQrResponse>(status, &body).map(|r| r.tourist)
    }

    async fn record_visit(&self, request: &RecordVisitRequest) -> Result<(), ApiError> {
        let (status, body) = self.post_json(RECORD_VISIT_PATH, request).await?;
        decode_response::<RecordVisitResponse>(status, &body).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_timeout_fires() {
        let limit = Duration::from_millis(20);
        let result: Result<(), ApiError> =
            with_timeout(Some(limit), futures::future::pending()).await;
        assert_eq!(result, Err(ApiError::Timeout(limit)));
    }

    #[wasm_bindgen_test]
    async fn test_no_timeout_passes_through() {
        let result = with_timeout(None, async { Ok::<_, ApiError>(7) }).await;
        assert_eq!(result, Ok(7));
    }
}
