//! localStorage によるセッション保存
//!
//! ログイン画面が生の文字列で書き込むため、JSONではなく raw API を使う

use gloo::storage::{LocalStorage, Storage};
use tourist_admin_common::SessionStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSessionStore;

impl SessionStore for LocalSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = LocalStorage::raw().set_item(key, value) {
            gloo::console::error!(format!("localStorage write failed for {}: {:?}", key, e));
        }
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// ページ遷移
pub fn redirect(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(path) {
            gloo::console::error!(format!("redirect to {} failed: {:?}", path, e));
        }
    }
}
