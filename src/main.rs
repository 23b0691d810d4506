//! 見出しホバープレビュー
//!
//! ページ見出しにポインタを乗せると、参照トピックの要約をカードで表示する。

mod components;
mod config;
mod error;
mod models;
mod position;
mod styles;
mod utils;

use leptos::*;

use components::PreviewCard;
use utils::log_trace::{expose_logs_on_window, log_info_with_data, log_warn};

fn main() {
    console_error_panic_hook::set_once();

    if let Err(e) = expose_logs_on_window() {
        log_warn("config", &format!("ログ参照関数の登録に失敗: {:?}", e));
    }

    let config = config::load_config();
    log_info_with_data(
        "config",
        "設定を読み込み",
        serde_json::to_value(&config).unwrap_or_default(),
    );

    if let Err(e) = styles::inject_stylesheet(config.style_mode) {
        log_warn("config", &format!("スタイルの注入に失敗: {:?}", e));
    }

    mount_to_body(move || view! { <PreviewCard config=config /> });
}
