//! ウィジェット設定
//!
//! ページ内の `<script type="application/json" id="hero-preview-config">` から読み込む。
//! 要素がなければ既定値を使う。

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::FetchError;
use crate::position::Geometry;
use crate::utils::log_trace::log_warn;

pub const CONFIG_ELEMENT_ID: &str = "hero-preview-config";

/// スタイルの適用方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    /// Tailwindユーティリティクラス
    #[default]
    Utility,
    /// `<style>`要素を注入してセマンティックなクラス名を使う
    Stylesheet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub topic: String,
    pub api_base: String,
    pub heading_selector: String,
    pub card_width: f64,
    pub card_offset: f64,
    pub edge_padding: f64,
    pub animation_ms: u32,
    pub style_mode: StyleMode,
    pub loading_text: String,
    pub fallback_text: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        PreviewConfig {
            topic: "raspberry".to_string(),
            api_base: "https://en.wikipedia.org/api/rest_v1/page/summary/".to_string(),
            heading_selector: ".hero h1".to_string(),
            card_width: 320.0,
            card_offset: 16.0,
            edge_padding: 12.0,
            animation_ms: 150,
            style_mode: StyleMode::Utility,
            loading_text: "Loading...".to_string(),
            fallback_text: "Preview unavailable.".to_string(),
        }
    }
}

impl PreviewConfig {
    /// JSON文字列から設定を作る（欠けたフィールドは既定値）
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 要約APIのURL
    ///
    /// トピックは予約文字（`&` `+` `:` `/` など）も含めてエンコードし、1つのパスセグメントにする
    pub fn endpoint(&self) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| FetchError::InvalidEndpoint(format!("{}: {}", self.api_base, e)))?;
        if url.cannot_be_a_base() {
            return Err(FetchError::InvalidEndpoint(self.api_base.clone()));
        }
        let path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            urlencoding::encode(&self.topic)
        );
        url.set_path(&path);
        Ok(url)
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            offset: self.card_offset,
            padding: self.edge_padding,
        }
    }
}

/// ページ内のJSON要素から設定を読み込む
pub fn load_config() -> PreviewConfig {
    let Some(text) = config_element_text() else {
        return PreviewConfig::default();
    };
    match PreviewConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            log_warn("config", &format!("設定JSONの解析に失敗、既定値を使用: {}", e));
            PreviewConfig::default()
        }
    }
}

fn config_element_text() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
    element.text_content().filter(|t| !t.trim().is_empty())
}
