//! 訪問履歴の保持

use crate::error::ApiError;
use crate::types::VisitRecord;

/// 表示中の訪問履歴
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitHistory {
    visits: Vec<VisitRecord>,
    /// 成功・失敗を問わない読み込み回数
    loads: usize,
}

impl VisitHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み込み結果を反映する
    ///
    /// 成功時はサーバの順序のまま丸ごと置き換える。失敗時は前の一覧を残し、
    /// ログ用にエラーを返す（画面には出さない）。
    pub fn apply(&mut self, result: Result<Vec<VisitRecord>, ApiError>) -> Option<ApiError> {
        self.loads += 1;
        match result {
            Ok(visits) => {
                self.visits = visits;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch visits");
                Some(e)
            }
        }
    }

    pub fn visits(&self) -> &[VisitRecord] {
        &self.visits
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn loads(&self) -> usize {
        self.loads
    }
}
