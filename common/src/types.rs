//! 観光客・訪問記録の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - TouristRecord: QRコードから解決された観光客プロフィール
//! - VisitRecord: 管理者が記録した訪問（観光客情報を埋め込み）

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// 観光客レコード
///
/// 取得後は不変。新しいスキャンのたびに丸ごと置き換える。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouristRecord {
    pub id: String,
    pub wallet_address: String,

    /// KYCデータ（中身のスキーマはサーバ側の責務）
    #[serde(default)]
    pub kyc_data: Option<serde_json::Value>,

    pub created_at: String,
}

/// KYC状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KycStatus {
    Verified,
    Unverified,
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Verified => "Verified",
            KycStatus::Unverified => "Unverified",
        }
    }
}

impl TouristRecord {
    /// KYCデータが存在すれば検証済み扱い
    pub fn kyc_status(&self) -> KycStatus {
        match &self.kyc_data {
            Some(value) if !value.is_null() => KycStatus::Verified,
            _ => KycStatus::Unverified,
        }
    }

    /// 登録日（YYYY-MM-DD）
    pub fn member_since(&self) -> String {
        date_part(&self.created_at)
    }

    /// 短縮ウォレットアドレス（例: "0xDEAD...BEEF"）
    pub fn short_wallet(&self) -> String {
        shorten_wallet(&self.wallet_address)
    }
}

/// 訪問レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub id: String,
    pub location: String,

    #[serde(default)]
    pub notes: String,

    pub created_at: String,

    /// サーバ側で結合された観光客情報
    pub user: TouristRecord,
}

impl VisitRecord {
    /// 訪問日（YYYY-MM-DD）
    pub fn visited_on(&self) -> String {
        date_part(&self.created_at)
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.trim().is_empty()
    }
}

/// RFC 3339 のタイムスタンプから日付部分を取り出す
///
/// パースできない場合は元の文字列をそのまま返す
pub fn date_part(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

/// 先頭6文字 + "..." + 末尾4文字
pub fn shorten_wallet(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "abc123",
            "walletAddress": "0xDEAD00000000000000000000000000000000BEEF",
            "kycData": {"verified": true},
            "createdAt": "2024-01-01T00:00:00Z"
        }"#
    }

    #[test]
    fn test_tourist_deserialize_camel_case() {
        let tourist: TouristRecord = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(tourist.id, "abc123");
        assert_eq!(tourist.kyc_status(), KycStatus::Verified);
        assert_eq!(tourist.member_since(), "2024-01-01");
    }

    #[test]
    fn test_kyc_missing_or_null_is_unverified() {
        let missing: TouristRecord = serde_json::from_str(
            r#"{"id":"a","walletAddress":"0x1","createdAt":"x"}"#,
        )
        .unwrap();
        assert_eq!(missing.kyc_status(), KycStatus::Unverified);

        let null: TouristRecord = serde_json::from_str(
            r#"{"id":"a","walletAddress":"0x1","kycData":null,"createdAt":"x"}"#,
        )
        .unwrap();
        assert_eq!(null.kyc_status(), KycStatus::Unverified);
    }

    #[test]
    fn test_short_wallet() {
        assert_eq!(
            shorten_wallet("0xDEAD00000000000000000000000000000000BEEF"),
            "0xDEAD...BEEF"
        );
        assert_eq!(shorten_wallet("0x1234"), "0x1234");
    }

    #[test]
    fn test_date_part_fallback() {
        assert_eq!(date_part("2024-03-05T10:20:30+09:00"), "2024-03-05");
        assert_eq!(date_part("not a date"), "not a date");
    }

    #[test]
    fn test_visit_notes_default_empty() {
        let json = format!(
            r#"{{"id":"v1","location":"Gate 3","createdAt":"2024-02-01T08:00:00Z","user":{}}}"#,
            sample_json()
        );
        let visit: VisitRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(visit.location, "Gate 3");
        assert!(!visit.has_notes());
        assert_eq!(visit.visited_on(), "2024-02-01");
        assert_eq!(visit.user.short_wallet(), "0xDEAD...BEEF");
    }
}
