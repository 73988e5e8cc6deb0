//! ワークフローの実行役
//!
//! `WorkflowState` の遷移が返す `Effect` を `AdminApi` で実行し、
//! 結果を状態機械へ戻す。CLIとテストで使用する。

use crate::api::AdminApi;
use crate::capture::{capture_channel, CaptureReceiver, CaptureSink};
use crate::history::VisitHistory;
use crate::workflow::{Effect, Phase, WorkflowState};

/// スキャン→訪問記録のコントローラ
pub struct WorkflowController<A> {
    api: A,
    state: WorkflowState,
    history: VisitHistory,
    capture: Option<CaptureSink>,
}

impl<A: AdminApi> WorkflowController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: WorkflowState::new(),
            history: VisitHistory::new(),
            capture: None,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn history(&self) -> &VisitHistory {
        &self.history
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// 画面表示時の初回読み込み
    pub async fn mount(&mut self) {
        self.load_visits().await;
    }

    /// 訪問履歴の再読み込み（失敗はログのみ）
    pub async fn load_visits(&mut self) {
        let result = self.api.fetch_visits().await;
        self.history.apply(result);
    }

    /// スキャン開始。デバイスに渡す送信側と受信側を返す
    pub fn start_capture(&mut self) -> Option<(CaptureSink, CaptureReceiver)> {
        if !self.state.start() {
            return None;
        }
        let (sink, rx) = capture_channel();
        self.capture = Some(sink.clone());
        Some((sink, rx))
    }

    /// 手動停止
    pub fn stop_capture(&mut self) {
        if let Some(sink) = self.capture.take() {
            sink.stop();
        }
        self.state.stop();
    }

    /// キャプチャセッションの完了を待ってワークフローへ渡す
    pub async fn run_capture(&mut self, rx: CaptureReceiver) {
        match rx.await {
            Some(payload) => self.handle_payload(&payload).await,
            None => self.stop_capture(),
        }
    }

    /// デコード済みペイロードを処理する
    pub async fn handle_payload(&mut self, payload: &str) {
        let effect = self.state.accept_payload(payload);
        if effect.is_some() {
            // 受理した時点でキャプチャは止める
            if let Some(sink) = self.capture.take() {
                sink.stop();
            }
        }
        self.run(effect).await;
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.state.set_location(location);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.state.set_notes(notes);
    }

    /// 訪問記録を送信
    pub async fn submit(&mut self) {
        let effect = self.state.submit();
        self.run(effect).await;
    }

    /// 確認中の観光客を破棄してアイドルへ戻す
    pub fn cancel_review(&mut self) {
        if self.state.phase == Phase::Reviewing {
            self.state = WorkflowState::new();
        }
    }

    async fn run(&mut self, mut effect: Option<Effect>) {
        while let Some(next) = effect.take() {
            effect = match next {
                Effect::ResolveCode(code) => {
                    match self.api.resolve_code(&code).await {
                        Ok(tourist) => self.state.lookup_succeeded(tourist),
                        Err(e) => {
                            tracing::info!(error = %e, "QR lookup failed");
                            self.state.lookup_failed(&e);
                        }
                    }
                    None
                }
                Effect::RecordVisit(request) => match self.api.record_visit(&request).await {
                    Ok(()) => self.state.submit_succeeded(),
                    Err(e) => {
                        tracing::info!(error = %e, "record visit failed");
                        self.state.submit_failed(&e);
                        None
                    }
                },
                Effect::ReloadVisits => {
                    self.load_visits().await;
                    None
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RecordVisitRequest;
    use crate::error::ApiError;
    use crate::types::{TouristRecord, VisitRecord};
    use crate::workflow::{LOCATION_REQUIRED, VISIT_RECORDED};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// 呼び出しを記録するフェイクAPI
    #[derive(Default)]
    struct FakeApi {
        visits_calls: RefCell<usize>,
        resolve_calls: RefCell<Vec<String>>,
        record_calls: RefCell<Vec<RecordVisitRequest>>,
        resolve_result: RefCell<Option<Result<TouristRecord, ApiError>>>,
        record_result: RefCell<Option<Result<(), ApiError>>>,
        visits_result: RefCell<Option<Result<Vec<VisitRecord>, ApiError>>>,
    }

    #[async_trait(?Send)]
    impl AdminApi for FakeApi {
        async fn fetch_visits(&self) -> Result<Vec<VisitRecord>, ApiError> {
            *self.visits_calls.borrow_mut() += 1;
            self.visits_result.borrow().clone().unwrap_or(Ok(vec![]))
        }

        async fn resolve_code(&self, qr_code: &str) -> Result<TouristRecord, ApiError> {
            self.resolve_calls.borrow_mut().push(qr_code.to_string());
            self.resolve_result
                .borrow()
                .clone()
                .unwrap_or(Err(ApiError::Transport("unset".into())))
        }

        async fn record_visit(&self, request: &RecordVisitRequest) -> Result<(), ApiError> {
            self.record_calls.borrow_mut().push(request.clone());
            self.record_result.borrow().clone().unwrap_or(Ok(()))
        }
    }

    fn abc123() -> TouristRecord {
        TouristRecord {
            id: "abc123".into(),
            wallet_address: "0xDEAD...BEEF".into(),
            kyc_data: Some(serde_json::json!({ "verified": true })),
            created_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    fn controller_in_review() -> WorkflowController<FakeApi> {
        let api = FakeApi::default();
        *api.resolve_result.borrow_mut() = Some(Ok(abc123()));
        let mut controller = WorkflowController::new(api);
        block_on(async {
            controller.mount().await;
            let (sink, rx) = controller.start_capture().unwrap();
            sink.offer(Some("tourist:abc123"));
            controller.run_capture(rx).await;
        });
        controller
    }

    #[test]
    fn test_scan_enters_reviewing_with_record() {
        let controller = controller_in_review();
        assert_eq!(controller.state().phase, Phase::Reviewing);
        assert_eq!(controller.state().tourist, Some(abc123()));
        assert_eq!(*controller.api().resolve_calls.borrow(), vec!["tourist:abc123"]);
    }

    #[test]
    fn test_lookup_success_clears_prior_error() {
        let api = FakeApi::default();
        *api.resolve_result.borrow_mut() =
            Some(Err(ApiError::Server { status: 404, message: None }));
        let mut controller = WorkflowController::new(api);

        block_on(async {
            controller.start_capture();
            controller.handle_payload("tourist:nobody").await;
        });
        assert_eq!(controller.state().error.as_deref(), Some("Failed to process QR code"));
        assert_eq!(controller.state().phase, Phase::Idle);

        *controller.api().resolve_result.borrow_mut() = Some(Ok(abc123()));
        block_on(async {
            controller.start_capture();
            controller.handle_payload("tourist:abc123").await;
        });
        assert_eq!(controller.state().error, None);
        assert_eq!(controller.state().tourist, Some(abc123()));
    }

    #[test]
    fn test_blank_location_makes_no_network_call() {
        let mut controller = controller_in_review();
        controller.set_location("  ");
        block_on(controller.submit());

        assert_eq!(controller.state().phase, Phase::Reviewing);
        assert_eq!(controller.state().error.as_deref(), Some(LOCATION_REQUIRED));
        assert!(controller.api().record_calls.borrow().is_empty());
    }

    #[test]
    fn test_successful_submit_reloads_once() {
        let mut controller = controller_in_review();
        let loads_before = *controller.api().visits_calls.borrow();

        controller.set_location("Gate 3");
        block_on(controller.submit());

        let state = controller.state();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.success.as_deref(), Some(VISIT_RECORDED));
        assert_eq!(state.tourist, None);
        assert!(state.location.is_empty() && state.notes.is_empty());
        assert_eq!(*controller.api().visits_calls.borrow(), loads_before + 1);
        assert_eq!(
            controller.api().record_calls.borrow()[0],
            RecordVisitRequest {
                user_id: "abc123".into(),
                location: "Gate 3".into(),
                notes: String::new(),
            }
        );
    }

    #[test]
    fn test_failed_submit_keeps_drafts_and_no_reload() {
        let mut controller = controller_in_review();
        *controller.api().record_result.borrow_mut() = Some(Err(ApiError::Server {
            status: 400,
            message: Some("Tourist already checked in".into()),
        }));
        let loads_before = *controller.api().visits_calls.borrow();

        controller.set_location("Gate 3");
        controller.set_notes("VIP");
        block_on(controller.submit());

        let state = controller.state();
        assert_eq!(state.phase, Phase::Reviewing);
        assert_eq!(state.error.as_deref(), Some("Tourist already checked in"));
        assert_eq!(state.location, "Gate 3");
        assert_eq!(state.notes, "VIP");
        assert_eq!(state.tourist, Some(abc123()));
        assert_eq!(*controller.api().visits_calls.borrow(), loads_before);
    }

    #[test]
    fn test_manual_stop_before_read() {
        let mut controller = WorkflowController::new(FakeApi::default());
        let (sink, rx) = controller.start_capture().unwrap();
        sink.stop();
        block_on(controller.run_capture(rx));

        assert_eq!(controller.state().phase, Phase::Idle);
        assert!(controller.api().resolve_calls.borrow().is_empty());
    }

    #[test]
    fn test_history_failure_is_silent() {
        let api = FakeApi::default();
        *api.visits_result.borrow_mut() = Some(Err(ApiError::Transport("down".into())));
        let mut controller = WorkflowController::new(api);
        block_on(controller.mount());

        assert!(controller.history().is_empty());
        assert_eq!(controller.state().error, None);
    }

    #[test]
    fn test_cancel_review_returns_to_idle() {
        let mut controller = controller_in_review();
        controller.set_location("Gate 3");
        controller.cancel_review();
        assert_eq!(controller.state(), &WorkflowState::new());
    }
}
