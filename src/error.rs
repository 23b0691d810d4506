//! エラー型

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 要約取得のエラー
///
/// 共有Promiseのreject値として受け渡すためSerialize/Deserializeを実装する
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum FetchError {
    #[error("リクエストが中断されました")]
    Aborted,
    #[error("要約APIエラー: {0}")]
    Status(u16),
    #[error("fetch失敗: {0}")]
    Network(String),
    #[error("JSONパース失敗: {0}")]
    Decode(String),
    #[error("エンドポイントが不正です: {0}")]
    InvalidEndpoint(String),
}

impl FetchError {
    /// ホバーアウトによる中断か
    pub fn is_cancellation(&self) -> bool {
        matches!(self, FetchError::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation() {
        assert!(FetchError::Aborted.is_cancellation());
        assert!(!FetchError::Status(404).is_cancellation());
        assert!(!FetchError::Network("offline".to_string()).is_cancellation());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(FetchError::Status(503)).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "Status", "detail": 503 }));

        let back: FetchError = serde_json::from_value(json).unwrap();
        assert_eq!(back, FetchError::Status(503));

        let aborted: FetchError =
            serde_json::from_value(serde_json::json!({ "kind": "Aborted" })).unwrap();
        assert!(aborted.is_cancellation());
    }

    #[test]
    fn test_display() {
        assert_eq!(FetchError::Status(404).to_string(), "要約APIエラー: 404");
    }
}
