//! 管理者セッションの検証
//!
//! 保存先（localStorage / ファイル / メモリ）は `SessionStore` で差し替え、
//! 検証ロジックは保存方式に依存しない。

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::AuthError;

pub const USER_TYPE_KEY: &str = "userType";
pub const ADMIN_ID_KEY: &str = "adminId";
pub const ADMIN_ROLE: &str = "admin";

/// ログイン画面
pub const LOGIN_PATH: &str = "/admin/login";
/// ログアウト後の遷移先
pub const ROOT_PATH: &str = "/";

/// セッション値の保存先
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// 検証済みの管理者セッション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub admin_id: String,
}

impl AdminSession {
    /// 保存済みの値を検証する
    ///
    /// サーバ問い合わせは行わない。各リクエストの認証はサーバ側の責務。
    pub fn validate(store: &impl SessionStore) -> Result<Self, AuthError> {
        let role = store.get(USER_TYPE_KEY);
        if role.as_deref() != Some(ADMIN_ROLE) {
            return Err(AuthError::NotAdmin { found: role });
        }

        match store.get(ADMIN_ID_KEY) {
            Some(id) if !id.is_empty() => Ok(Self { admin_id: id }),
            _ => Err(AuthError::MissingAdminId),
        }
    }

    /// 管理者としてログイン状態を保存
    pub fn login(store: &impl SessionStore, admin_id: &str) -> Result<Self, AuthError> {
        let admin_id = admin_id.trim();
        if admin_id.is_empty() {
            return Err(AuthError::MissingAdminId);
        }
        store.set(USER_TYPE_KEY, ADMIN_ROLE);
        store.set(ADMIN_ID_KEY, admin_id);
        Ok(Self { admin_id: admin_id.to_string() })
    }
}

/// 両方のキーを削除
pub fn logout(store: &impl SessionStore) {
    store.remove(USER_TYPE_KEY);
    store.remove(ADMIN_ID_KEY);
}

/// メモリ上のセッション（テスト・一時利用）
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // 値の書き込み途中で panic しても中身は壊れない
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_admin_session() {
        let store = MemorySessionStore::new();
        store.set(USER_TYPE_KEY, "admin");
        store.set(ADMIN_ID_KEY, "admin-42");

        let session = AdminSession::validate(&store).unwrap();
        assert_eq!(session.admin_id, "admin-42");
    }

    #[test]
    fn test_validate_empty_store() {
        let store = MemorySessionStore::new();
        assert_eq!(
            AdminSession::validate(&store),
            Err(AuthError::NotAdmin { found: None })
        );
    }

    #[test]
    fn test_validate_tourist_role_rejected() {
        let store = MemorySessionStore::new();
        store.set(USER_TYPE_KEY, "tourist");
        store.set(ADMIN_ID_KEY, "admin-42");
        assert_eq!(
            AdminSession::validate(&store),
            Err(AuthError::NotAdmin { found: Some("tourist".into()) })
        );
    }

    #[test]
    fn test_validate_missing_admin_id() {
        let store = MemorySessionStore::new();
        store.set(USER_TYPE_KEY, "admin");
        assert_eq!(AdminSession::validate(&store), Err(AuthError::MissingAdminId));

        store.set(ADMIN_ID_KEY, "");
        assert_eq!(AdminSession::validate(&store), Err(AuthError::MissingAdminId));
    }

    #[test]
    fn test_validate_only_rejects_empty_admin_id() {
        let store = MemorySessionStore::new();
        store.set(USER_TYPE_KEY, "admin");
        store.set(ADMIN_ID_KEY, " ");
        assert!(AdminSession::validate(&store).is_ok());
    }

    #[test]
    fn test_login_then_logout() {
        let store = MemorySessionStore::new();
        let session = AdminSession::login(&store, "  ops-1 ").unwrap();
        assert_eq!(session.admin_id, "ops-1");
        assert!(AdminSession::validate(&store).is_ok());

        logout(&store);
        assert_eq!(store.get(USER_TYPE_KEY), None);
        assert_eq!(store.get(ADMIN_ID_KEY), None);
        assert!(AdminSession::validate(&store).is_err());
    }

    #[test]
    fn test_login_rejects_blank_id() {
        let store = MemorySessionStore::new();
        assert_eq!(AdminSession::login(&store, " "), Err(AuthError::MissingAdminId));
        assert_eq!(store.get(USER_TYPE_KEY), None);
    }
}
