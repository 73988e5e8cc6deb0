//! 画面表示の射影
//!
//! `WorkflowState` から表示内容を決めるだけで、独自の状態は持たない。

use crate::workflow::{Phase, WorkflowState};

/// メインパネル（同時に1つだけ表示）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainPanel {
    /// スキャン開始ボタン
    StartButton,
    /// カメラ映像と停止ボタン
    Scanner,
    /// 観光客情報と入力フォーム
    Review,
}

/// メッセージバナー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Error(String),
    Success(String),
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Banner::Error(m) | Banner::Success(m) => m,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Banner::Error(_) => "banner banner-error",
            Banner::Success(_) => "banner banner-success",
        }
    }
}

impl WorkflowState {
    pub fn panel(&self) -> MainPanel {
        match self.phase {
            Phase::Idle | Phase::Resolving => MainPanel::StartButton,
            Phase::Capturing => MainPanel::Scanner,
            Phase::Reviewing | Phase::Submitting => MainPanel::Review,
        }
    }

    /// パネルとは独立して表示するバナー（エラー→成功の順）
    pub fn banners(&self) -> Vec<Banner> {
        let mut banners = Vec::new();
        if let Some(e) = self.error.as_deref().filter(|m| !m.is_empty()) {
            banners.push(Banner::Error(e.to_string()));
        }
        if let Some(s) = self.success.as_deref().filter(|m| !m.is_empty()) {
            banners.push(Banner::Success(s.to_string()));
        }
        banners
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Recording..."
        } else {
            "Record Visit"
        }
    }

    /// 通信待ちの補足表示
    pub fn pending_hint(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Resolving => Some("Looking up tourist..."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TouristRecord;

    #[test]
    fn test_panel_per_phase() {
        let mut state = WorkflowState::new();
        assert_eq!(state.panel(), MainPanel::StartButton);

        state.start();
        assert_eq!(state.panel(), MainPanel::Scanner);

        state.accept_payload("tourist:abc");
        assert_eq!(state.panel(), MainPanel::StartButton);
        assert_eq!(state.pending_hint(), Some("Looking up tourist..."));

        state.lookup_succeeded(TouristRecord {
            id: "abc".into(),
            wallet_address: "0x1".into(),
            kyc_data: None,
            created_at: "2024-01-01T00:00:00Z".into(),
        });
        assert_eq!(state.panel(), MainPanel::Review);
        assert_eq!(state.submit_label(), "Record Visit");

        state.set_location("Gate 3");
        state.submit();
        assert_eq!(state.panel(), MainPanel::Review);
        assert_eq!(state.submit_label(), "Recording...");
    }

    #[test]
    fn test_banners_independent_of_panel() {
        let state = WorkflowState {
            error: Some("Please provide a location".into()),
            success: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            state.banners(),
            vec![Banner::Error("Please provide a location".into())]
        );
        assert_eq!(state.panel(), MainPanel::StartButton);
    }
}
