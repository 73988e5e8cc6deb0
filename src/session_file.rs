//! ファイル保存のセッション
//!
//! ブラウザの localStorage と同じキー（userType / adminId）を
//! ~/.config/tourist-admin/session.json に保存する。

use crate::config::Config;
use crate::error::{Result, TouristAdminError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tourist_admin_common::{session, AdminSession, SessionStore};

const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
    /// 直近の書き込み失敗
    write_error: Mutex<Option<String>>,
}

impl FileSessionStore {
    /// 既定の場所から開く
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(&Config::config_dir()?.join(SESSION_FILE_NAME)))
    }

    /// 読めない・壊れているファイルは空のセッションとして扱う
    pub fn open(path: &Path) -> Self {
        let values = std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            values: Mutex::new(values),
            write_error: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ログイン状態を保存し、ファイルに書けたことまで確認する
    pub fn sign_in(&self, admin_id: &str) -> Result<AdminSession> {
        let session = AdminSession::login(self, admin_id)?;
        self.take_write_error()?;
        Ok(session)
    }

    /// ログイン状態を削除する。ファイルに反映できなければエラー
    pub fn sign_out(&self) -> Result<()> {
        session::logout(self);
        self.take_write_error()
    }

    fn take_write_error(&self) -> Result<()> {
        let error = self.write_error.lock().unwrap_or_else(|e| e.into_inner()).take();
        match error {
            Some(e) => Err(TouristAdminError::Session(format!("{}: {}", self.path.display(), e))),
            None => Ok(()),
        }
    }

    fn write(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(values)?)?;
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut values);
        if let Err(e) = self.write(&values) {
            tracing::error!(path = %self.path.display(), error = %e, "failed to write session file");
            *self.write_error.lock().unwrap_or_else(|p| p.into_inner()) = Some(e.to_string());
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.modify(|values| {
            values.insert(key.to_string(), value.to_string());
        });
    }

    fn remove(&self, key: &str) {
        self.modify(|values| {
            values.remove(key);
        });
    }
}
