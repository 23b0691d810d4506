//! データ構造体モジュール

use serde::{Deserialize, Serialize};

// ============================================
// 要約APIレスポンス（必要なフィールドのみ）
// ============================================

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawSummary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<RawThumbnail>,
    #[serde(default)]
    pub content_urls: Option<RawContentUrls>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawThumbnail {
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawContentUrls {
    #[serde(default)]
    pub desktop: Option<RawPageUrl>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawPageUrl {
    #[serde(default)]
    pub page: Option<String>,
}

// ============================================
// 正規化済みの要約レコード
// ============================================

/// カードに表示する要約
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Summary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<RawSummary> for Summary {
    fn from(raw: RawSummary) -> Self {
        Summary {
            title: raw.title,
            extract: raw.extract,
            thumbnail: raw.thumbnail.and_then(|t| t.source),
            url: raw
                .content_urls
                .and_then(|c| c.desktop)
                .and_then(|d| d.page),
        }
    }
}

impl Summary {
    /// タイトルが空ならトピック名で代用
    pub fn display_title(&self, topic: &str) -> String {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(topic)
            .to_string()
    }

    pub fn display_extract(&self) -> String {
        self.extract.clone().unwrap_or_default()
    }
}

/// カードの表示内容
#[derive(Debug, Clone, PartialEq)]
pub enum CardContent {
    Loading,
    Ready(Summary),
    Unavailable,
}

/// 表示フェーズ（フェードアニメーション用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    Hidden,
    Shown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_full_response() {
        let json = r#"{
            "type": "standard",
            "title": "Raspberry",
            "extract": "The raspberry is the edible fruit of many plant species.",
            "thumbnail": { "source": "https://upload.wikimedia.org/raspberry.jpg", "width": 320, "height": 213 },
            "content_urls": {
                "desktop": { "page": "https://en.wikipedia.org/wiki/Raspberry" },
                "mobile": { "page": "https://en.m.wikipedia.org/wiki/Raspberry" }
            }
        }"#;
        let raw: RawSummary = serde_json::from_str(json).unwrap();
        let summary = Summary::from(raw);
        assert_eq!(summary.title.as_deref(), Some("Raspberry"));
        assert_eq!(
            summary.thumbnail.as_deref(),
            Some("https://upload.wikimedia.org/raspberry.jpg")
        );
        assert_eq!(
            summary.url.as_deref(),
            Some("https://en.wikipedia.org/wiki/Raspberry")
        );
    }

    #[test]
    fn test_normalize_missing_nested_fields() {
        let json = r#"{
            "title": "Raspberry",
            "thumbnail": {},
            "content_urls": { "mobile": { "page": "https://en.m.wikipedia.org/wiki/Raspberry" } }
        }"#;
        let summary = Summary::from(serde_json::from_str::<RawSummary>(json).unwrap());
        assert_eq!(summary.extract, None);
        assert_eq!(summary.thumbnail, None);
        assert_eq!(summary.url, None);
    }

    #[test]
    fn test_normalize_empty_object() {
        let summary = Summary::from(serde_json::from_str::<RawSummary>("{}").unwrap());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_display_fallbacks() {
        let summary = Summary {
            title: Some(String::new()),
            ..Summary::default()
        };
        assert_eq!(summary.display_title("raspberry"), "raspberry");
        assert_eq!(summary.display_extract(), "");

        let summary = Summary {
            title: Some("Raspberry".to_string()),
            extract: Some("Edible fruit.".to_string()),
            ..Summary::default()
        };
        assert_eq!(summary.display_title("raspberry"), "Raspberry");
        assert_eq!(summary.display_extract(), "Edible fruit.");
    }
}
