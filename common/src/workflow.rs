//! スキャン→訪問記録ワークフローの状態機械
//!
//! 状態遷移は純粋関数で、ネットワーク処理が必要な場合は `Effect` を返す。
//! 実行はホスト側（`WorkflowController` / Web画面）が行い、結果を
//! `lookup_*` / `submit_*` で戻す。
//!
//! ```text
//! Idle --start--> Capturing --payload--> Resolving --ok--> Reviewing --submit--> Submitting
//!  ^                 |                      |                 ^  |                  |
//!  +------stop-------+                      |                 |  +-(blank location) |
//!  +------------------lookup failed---------+                 +-------failed--------+
//!  +-----------------------------------succeeded----------------------------------+
//! ```

use crate::api::RecordVisitRequest;
use crate::capture::is_qualifying;
use crate::error::{ApiError, RECORD_MESSAGES, SCAN_MESSAGES};
use crate::types::TouristRecord;

/// 場所未入力時のメッセージ
pub const LOCATION_REQUIRED: &str = "Please provide a location";
/// 記録成功時のメッセージ
pub const VISIT_RECORDED: &str = "Visit recorded successfully!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Capturing,
    Resolving,
    Reviewing,
    Submitting,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Capturing => "capturing",
            Phase::Resolving => "resolving",
            Phase::Reviewing => "reviewing",
            Phase::Submitting => "submitting",
        }
    }
}

/// ホストが実行すべき処理
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// QRコードをサーバで解決
    ResolveCode(String),
    /// 訪問を記録
    RecordVisit(RecordVisitRequest),
    /// 訪問履歴を再読み込み
    ReloadVisits,
}

/// ワークフローの状態（画面の唯一の情報源）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub phase: Phase,
    /// 解決済みの観光客（同時に1件まで）
    pub tourist: Option<TouristRecord>,
    pub location: String,
    pub notes: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_capturing(&self) -> bool {
        self.phase == Phase::Capturing
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// 送信ボタンを押せるか
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Reviewing && !self.location.trim().is_empty()
    }

    fn clear_messages(&mut self) {
        self.error = None;
        self.success = None;
    }

    fn clear_active(&mut self) {
        self.tourist = None;
        self.location.clear();
        self.notes.clear();
    }

    /// スキャン開始
    ///
    /// 確認中の観光客があれば破棄して再スキャンする。
    /// 通信中（Resolving / Submitting）は無視。
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Idle | Phase::Reviewing => {
                self.clear_messages();
                self.clear_active();
                self.phase = Phase::Capturing;
                true
            }
            _ => false,
        }
    }

    /// コード読み取り前の手動停止
    pub fn stop(&mut self) -> bool {
        if self.phase != Phase::Capturing {
            return false;
        }
        self.phase = Phase::Idle;
        true
    }

    /// デコード結果を受け取る
    ///
    /// 観光客コード以外は状態を変えない
    pub fn accept_payload(&mut self, payload: &str) -> Option<Effect> {
        if self.phase != Phase::Capturing || !is_qualifying(payload) {
            return None;
        }
        self.phase = Phase::Resolving;
        self.clear_messages();
        Some(Effect::ResolveCode(payload.to_string()))
    }

    pub fn lookup_succeeded(&mut self, tourist: TouristRecord) {
        if self.phase != Phase::Resolving {
            tracing::debug!(phase = self.phase.as_str(), "stale lookup response dropped");
            return;
        }
        self.clear_messages();
        self.tourist = Some(tourist);
        self.location.clear();
        self.notes.clear();
        self.phase = Phase::Reviewing;
    }

    pub fn lookup_failed(&mut self, error: &ApiError) {
        if self.phase != Phase::Resolving {
            return;
        }
        self.clear_active();
        self.error = Some(error.user_message(SCAN_MESSAGES));
        self.phase = Phase::Idle;
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        if self.phase == Phase::Reviewing {
            self.location = location.into();
        }
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        if self.phase == Phase::Reviewing {
            self.notes = notes.into();
        }
    }

    /// 訪問記録の送信
    ///
    /// 場所が空（空白のみ含む）ならローカルで弾き、通信しない
    pub fn submit(&mut self) -> Option<Effect> {
        if self.phase != Phase::Reviewing {
            return None;
        }
        let request = self
            .tourist
            .as_ref()
            .and_then(|t| build_visit_request(&t.id, &self.location, &self.notes));
        let Some(request) = request else {
            self.error = Some(LOCATION_REQUIRED.to_string());
            return None;
        };

        self.clear_messages();
        self.phase = Phase::Submitting;
        Some(Effect::RecordVisit(request))
    }

    pub fn submit_succeeded(&mut self) -> Option<Effect> {
        if self.phase != Phase::Submitting {
            return None;
        }
        self.clear_active();
        self.error = None;
        self.success = Some(VISIT_RECORDED.to_string());
        self.phase = Phase::Idle;
        Some(Effect::ReloadVisits)
    }

    /// 送信失敗。観光客と入力内容は残して再送できるようにする
    pub fn submit_failed(&mut self, error: &ApiError) {
        if self.phase != Phase::Submitting {
            return;
        }
        self.error = Some(error.user_message(RECORD_MESSAGES));
        self.phase = Phase::Reviewing;
    }
}

/// 訪問記録リクエストを組み立てる
///
/// 場所・メモは前後の空白を除去し、場所が空なら `None`
pub fn build_visit_request(user_id: &str, location: &str, notes: &str) -> Option<RecordVisitRequest> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }
    Some(RecordVisitRequest {
        user_id: user_id.to_string(),
        location: location.to_string(),
        notes: notes.trim().to_string(),
    })
}
