//! 端末向けの表示

use tourist_admin_common::{Banner, KycStatus, TouristRecord, VisitRecord, WorkflowState};

/// 観光客情報
pub fn render_tourist(tourist: &TouristRecord) -> String {
    let mut lines = vec![
        "Tourist Information".to_string(),
        format!("  Wallet Address: {}", tourist.wallet_address),
        format!("  Member Since:   {}", tourist.member_since()),
    ];
    if tourist.kyc_status() == KycStatus::Verified {
        lines.push("  KYC Status:     Verified".to_string());
    }
    lines.join("\n")
}

/// 訪問履歴（空なら案内文）
pub fn render_visits(visits: &[VisitRecord]) -> String {
    if visits.is_empty() {
        return "No visits recorded yet".to_string();
    }

    visits
        .iter()
        .map(|visit| {
            let mut entry = format!(
                "{}  {}  ({})",
                visit.visited_on(),
                visit.location,
                visit.user.short_wallet()
            );
            if visit.has_notes() {
                entry.push_str(&format!("\n    {}", visit.notes));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// エラー/成功メッセージ
pub fn render_banners(state: &WorkflowState) -> Vec<String> {
    state
        .banners()
        .into_iter()
        .map(|banner| match banner {
            Banner::Error(m) => format!("✗ {}", m),
            Banner::Success(m) => format!("✔ {}", m),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tourist(kyc: Option<serde_json::Value>) -> TouristRecord {
        TouristRecord {
            id: "abc123".into(),
            wallet_address: "0xDEAD000000000000BEEF".into(),
            kyc_data: kyc,
            created_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn test_render_tourist_verified() {
        let text = render_tourist(&tourist(Some(serde_json::json!({ "verified": true }))));
        assert!(text.contains("0xDEAD000000000000BEEF"));
        assert!(text.contains("2024-01-01"));
        assert!(text.contains("Verified"));
    }

    #[test]
    fn test_render_tourist_without_kyc() {
        let text = render_tourist(&tourist(None));
        assert!(!text.contains("KYC"));
    }

    #[test]
    fn test_render_visits() {
        assert_eq!(render_visits(&[]), "No visits recorded yet");

        let visits = vec![VisitRecord {
            id: "v1".into(),
            location: "Gate 3".into(),
            notes: "group of four".into(),
            created_at: "2024-02-01T08:00:00Z".into(),
            user: tourist(None),
        }];
        let text = render_visits(&visits);
        assert!(text.starts_with("2024-02-01  Gate 3  (0xDEAD...BEEF)"));
        assert!(text.contains("group of four"));
    }

    #[test]
    fn test_render_banners() {
        let state = WorkflowState {
            error: Some("Please provide a location".into()),
            ..Default::default()
        };
        assert_eq!(render_banners(&state), vec!["✗ Please provide a location"]);
    }
}
