//! reqwest による管理者APIクライアント

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Serialize;
use std::time::Duration;
use tourist_admin_common::{
    decode_response, AdminApi, ApiError, ClientConfig, RecordVisitRequest, RecordVisitResponse,
    ScanQrRequest, ScanQrResponse, TouristRecord, VisitRecord, VisitsResponse,
    RECORD_VISIT_PATH, SCAN_QR_PATH, VISITS_PATH,
};

use crate::error::{Result, TouristAdminError};

pub struct HttpAdminApi {
    client: Client,
    config: ClientConfig,
}

impl HttpAdminApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("tourist-admin/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TouristAdminError::HttpClient(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> std::result::Result<(u16, String), ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| self.map_error(e))?;
        tracing::debug!(status, bytes = text.len(), "response received");
        Ok((status, text))
    }

    fn map_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(self.config.request_timeout.unwrap_or(Duration::ZERO))
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

#[async_trait(?Send)]
impl AdminApi for HttpAdminApi {
    async fn fetch_visits(&self) -> std::result::Result<Vec<VisitRecord>, ApiError> {
        let (status, body) = self.send::<()>(Method::GET, VISITS_PATH, None).await?;
        decode_response::<VisitsResponse>(status, &body).map(|r| r.visits)
    }

    async fn resolve_code(&self, qr_code: &str) -> std::result::Result<TouristRecord, ApiError> {
        let request = ScanQrRequest { qr_code: qr_code.to_string() };
        let (status, body) = self.send(Method::POST, SCAN_QR_PATH, Some(&request)).await?;
        decode_response::<ScanQrResponse>(status, &body).map(|r| r.tourist)
    }

    async fn record_visit(&self, request: &RecordVisitRequest) -> std::result::Result<(), ApiError> {
        let (status, body) = self.send(Method::POST, RECORD_VISIT_PATH, Some(request)).await?;
        decode_response::<RecordVisitResponse>(status, &body).map(|_| ())
    }
}
