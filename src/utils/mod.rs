//! ユーティリティモジュール

pub mod cache;
pub mod log_trace;
pub mod request_slot;
pub mod summary_api;

use log_trace::log_warn;

/// 新しいタブでURLを開く（openerを渡さない）
pub fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else {
        log_warn("hover-card", "windowがないためリンクを開けません");
        return;
    };
    let result = window.open_with_url_and_target_and_features(url, "_blank", "noopener");
    if let Some(message) = open_failure_message(url, &result) {
        log_warn("hover-card", &message);
    }
}

/// window.open() が例外を投げた場合の警告文
fn open_failure_message<T, E: std::fmt::Debug>(url: &str, result: &Result<T, E>) -> Option<String> {
    result
        .as_ref()
        .err()
        .map(|e| format!("リンクを開けません: {} ({:?})", url, e))
}
