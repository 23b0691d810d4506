//! 要約キャッシュ管理
//!
//! ページの寿命の間、最初に取得できた要約を1件だけ保持する（永続化しない）

use std::cell::RefCell;

use crate::models::Summary;

thread_local! {
    static CACHED_SUMMARY: RefCell<Option<Summary>> = const { RefCell::new(None) };
}

/// 要約をキャッシュに保存（既に値があれば上書きしない）
pub fn save_to_cache(summary: &Summary) {
    CACHED_SUMMARY.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(summary.clone());
        }
    });
}

/// キャッシュから要約を読み込み
pub fn load_from_cache() -> Option<Summary> {
    CACHED_SUMMARY.with(|cache| cache.borrow().clone())
}

/// キャッシュをクリア
#[cfg(test)]
pub fn clear_cache() {
    CACHED_SUMMARY.with(|cache| {
        cache.borrow_mut().take();
    });
}
