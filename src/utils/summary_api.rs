//! 要約API連携
//!
//! 同時に飛ぶリクエストは1本だけ。実行中のリクエストは共有Promiseとして保持し、
//! 後から来た呼び出しもそれを待つ。ホバーアウト時はAbortControllerで中断する。

use std::cell::RefCell;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{AbortController, AbortSignal, Request, RequestInit, Response};

use crate::config::PreviewConfig;
use crate::error::FetchError;
use crate::models::{RawSummary, Summary};
use crate::utils::cache;
use crate::utils::request_slot::{RequestSlot, Resolved};
use crate::utils::log_trace::{log_debug, log_error_with_data, log_info_with_data};

const LOG_CATEGORY: &str = "summary-fetch";

thread_local! {
    static IN_FLIGHT: RefCell<RequestSlot<Promise, AbortController>> = const { RefCell::new(RequestSlot::new()) };
}

/// 要約を取得（キャッシュ → 実行中リクエスト → 新規リクエストの順）
pub async fn fetch_summary(config: &PreviewConfig) -> Result<Summary, FetchError> {
    let resolved = IN_FLIGHT.with(|slot| {
        slot.borrow_mut()
            .resolve(cache::load_from_cache(), || start_request(config))
    })?;

    let promise = match resolved {
        Resolved::Cached(summary) => return Ok(summary),
        Resolved::Pending { promise, started } => {
            if !started {
                log_debug(LOG_CATEGORY, "実行中のリクエストに合流");
            }
            promise
        }
    };

    let value = JsFuture::from(promise).await.map_err(error_from_rejection)?;
    serde_wasm_bindgen::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))
}

/// 実行中のリクエストを中断。中断対象があったかを返す
pub fn abort_in_flight() -> bool {
    IN_FLIGHT.with(|slot| {
        slot.borrow().abort_with(|controller| {
            log_debug(LOG_CATEGORY, "リクエストを中断");
            controller.abort();
        })
    })
}

/// 新規リクエストを開始し、共有Promiseと中断ハンドルを返す
fn start_request(config: &PreviewConfig) -> Result<(Promise, AbortController), FetchError> {
    let endpoint = config.endpoint()?.to_string();
    let controller = AbortController::new()
        .map_err(|e| FetchError::Network(format!("AbortController作成失敗: {:?}", e)))?;
    let signal = controller.signal();

    log_info_with_data(
        LOG_CATEGORY,
        "要約を取得開始",
        serde_json::json!({ "endpoint": endpoint }),
    );

    // future_to_promise の本体は次のマイクロタスクで走るので、
    // 呼び出し側がスロットに登録するより先に settle が走ることはない
    let promise = future_to_promise(async move {
        let result = request_summary(&endpoint, &signal).await;
        IN_FLIGHT.with(|slot| slot.borrow_mut().settle());

        match result {
            Ok(summary) => {
                cache::save_to_cache(&summary);
                serde_wasm_bindgen::to_value(&summary).map_err(JsValue::from)
            }
            Err(err) => {
                if err.is_cancellation() {
                    log_debug(LOG_CATEGORY, "中断されたリクエストを破棄");
                } else {
                    log_error_with_data(
                        LOG_CATEGORY,
                        &err.to_string(),
                        serde_json::json!({ "endpoint": endpoint }),
                    );
                }
                Err(error_to_js(&err))
            }
        }
    });

    Ok((promise, controller))
}

async fn request_summary(endpoint: &str, signal: &AbortSignal) -> Result<Summary, FetchError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_signal(Some(signal));

    let request = Request::new_with_str_and_init(endpoint, &opts)
        .map_err(|e| FetchError::Network(format!("Request作成失敗: {:?}", e)))?;

    let window = web_sys::window().ok_or_else(|| FetchError::Network("windowがありません".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(classify_js_error)?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| FetchError::Decode("Responseへの変換失敗".to_string()))?;

    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }

    let json = JsFuture::from(resp.json().map_err(|e| FetchError::Decode(format!("json()失敗: {:?}", e)))?)
        .await
        .map_err(|e| match classify_js_error(e) {
            FetchError::Network(msg) => FetchError::Decode(msg),
            other => other,
        })?;

    let raw: RawSummary =
        serde_wasm_bindgen::from_value(json).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(Summary::from(raw))
}

/// fetch()のreject値を分類（DOMException AbortError は中断扱い）
fn classify_js_error(value: JsValue) -> FetchError {
    let name = js_sys::Reflect::get(&value, &JsValue::from_str("name"))
        .ok()
        .and_then(|n| n.as_string());
    if name.as_deref() == Some("AbortError") {
        FetchError::Aborted
    } else {
        FetchError::Network(format!("{:?}", value))
    }
}

fn error_to_js(err: &FetchError) -> JsValue {
    serde_wasm_bindgen::to_value(err).unwrap_or_else(|_| JsValue::from_str(&err.to_string()))
}

/// 共有Promiseのreject値を FetchError に戻す
fn error_from_rejection(value: JsValue) -> FetchError {
    serde_wasm_bindgen::from_value(value.clone()).unwrap_or_else(|_| classify_js_error(value))
}
