//! 時系列トレースログ
//! ホバー・取得・設定の各イベントを記録し、コンソールにも出力する。
//! 永続化はせず、`window.heroPreviewLogs()` から確認できる。

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use wasm_bindgen::prelude::*;

const MAX_LOG_ENTRIES: usize = 200;
const WINDOW_HOOK_NAME: &str = "heroPreviewLogs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub category: String, // "summary-fetch", "hover-card", "config"
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

pub struct LogTrace {
    logs: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogTrace {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_ENTRIES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LogTrace {
            logs: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn log(&mut self, level: LogLevel, category: &str, message: &str, data: Option<serde_json::Value>) {
        let timestamp = js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default();

        let line = JsValue::from_str(&format!("[{}] {}", category, message));
        match level {
            LogLevel::Error => web_sys::console::error_1(&line),
            LogLevel::Warn => web_sys::console::warn_1(&line),
            LogLevel::Info => web_sys::console::info_1(&line),
            LogLevel::Debug => web_sys::console::debug_1(&line),
        }

        self.push(LogEntry {
            timestamp,
            level,
            category: category.to_string(),
            message: message.to_string(),
            data,
        });
    }

    /// 上限を超えたら古いものから捨てる
    pub fn push(&mut self, entry: LogEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.logs.len() >= self.capacity {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn get_logs_json(&self) -> String {
        let logs: Vec<&LogEntry> = self.logs.iter().collect();
        serde_json::to_string_pretty(&logs).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Default for LogTrace {
    fn default() -> Self {
        Self::new()
    }
}

// グローバルなログトレースインスタンス
thread_local! {
    static LOG_TRACE: std::cell::RefCell<LogTrace> = std::cell::RefCell::new(LogTrace::new());
}

pub fn log_debug(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Debug, category, message, None);
    });
}

pub fn log_info_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Info, category, message, Some(data));
    });
}

pub fn log_warn(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Warn, category, message, None);
    });
}

pub fn log_error_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().log(LogLevel::Error, category, message, Some(data));
    });
}

pub fn get_logs_json() -> String {
    LOG_TRACE.with(|trace| trace.borrow().get_logs_json())
}

/// `window.heroPreviewLogs()` でログJSONを返す関数を登録
pub fn expose_logs_on_window() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("windowがありません"))?;
    let hook = Closure::<dyn Fn() -> String>::new(get_logs_json);
    js_sys::Reflect::set(&window, &JsValue::from_str(WINDOW_HOOK_NAME), hook.as_ref())?;
    hook.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
            level: LogLevel::Info,
            category: "hover-card".to_string(),
            message: message.to_string(),
            data: None,
        }
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut trace = LogTrace::with_capacity(3);
        for i in 0..5 {
            trace.push(entry(&format!("event {}", i)));
        }
        assert_eq!(trace.len(), 3);

        let logs: Vec<LogEntry> = serde_json::from_str(&trace.get_logs_json()).unwrap();
        let messages: Vec<&str> = logs.iter().map(|l| l.message.as_str()).collect();
        assert_eq!(messages, vec!["event 2", "event 3", "event 4"]);
    }

    #[test]
    fn test_zero_capacity() {
        let mut trace = LogTrace::with_capacity(0);
        trace.push(entry("ignored"));
        assert_eq!(trace.len(), 0);
        assert_eq!(trace.get_logs_json(), "[]");
    }

    #[test]
    fn test_json_shape() {
        let mut trace = LogTrace::new();
        let mut with_data = entry("fetched");
        with_data.level = LogLevel::Warn;
        with_data.data = Some(serde_json::json!({ "status": 404 }));
        trace.push(with_data);

        let json: serde_json::Value = serde_json::from_str(&trace.get_logs_json()).unwrap();
        assert_eq!(json[0]["level"], "warn");
        assert_eq!(json[0]["data"]["status"], 404);
    }
}
