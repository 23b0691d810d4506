//! ホバープレビューカードコンポーネント
//!
//! 見出しにポインタが乗ったら要約を取得してカーソル付近にカードを表示する。
//! ポインタが外れたらフェードアウトし、実行中のリクエストを中断する。

use gloo::events::EventListener;
use leptos::html::Div;
use leptos::*;
use wasm_bindgen::JsCast;

use crate::config::PreviewConfig;
use crate::components::card_state::CardState;
use crate::models::CardContent;
use crate::position::{place_card, viewport_size, Point, Size};
use crate::styles::{card_class, classes, extract_class};
use crate::utils::cache;
use crate::utils::log_trace::{log_debug, log_info_with_data, log_warn};
use crate::utils::open_in_new_tab;
use crate::utils::summary_api;

const LOG_CATEGORY: &str = "hover-card";

/// 表示内容から組み立てた描画用の値
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub title: String,
    pub extract: String,
    pub muted: bool,
    pub thumbnail: Option<String>,
    pub link: Option<String>,
}

impl CardView {
    pub fn build(content: &CardContent, config: &PreviewConfig) -> Self {
        match content {
            CardContent::Loading => CardView {
                title: config.topic.clone(),
                extract: config.loading_text.clone(),
                muted: true,
                thumbnail: None,
                link: None,
            },
            CardContent::Ready(summary) => CardView {
                title: summary.display_title(&config.topic),
                extract: summary.display_extract(),
                muted: false,
                thumbnail: summary.thumbnail.clone().filter(|t| !t.is_empty()),
                link: summary.url.clone().filter(|u| !u.is_empty()),
            },
            CardContent::Unavailable => CardView {
                title: config.topic.clone(),
                extract: config.fallback_text.clone(),
                muted: false,
                thumbnail: None,
                link: None,
            },
        }
    }
}

/// Enter / Space でカードを開く
fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

#[component]
pub fn PreviewCard(config: PreviewConfig) -> impl IntoView {
    let mode = config.style_mode;
    let card_width = config.card_width;
    let animation_ms = config.animation_ms;
    let selector = config.heading_selector.clone();
    let config = store_value(config);

    let card_ref = create_node_ref::<Div>();
    let state = create_rw_signal(CardState::default());
    let (position, set_position) = create_signal(Point::default());
    let pointer = store_value(Point::default());

    let phase = create_memo(move |_| state.with(|s| s.phase));
    let card_view = create_memo(move |_| {
        state.with(|s| config.with_value(|cfg| CardView::build(&s.content, cfg)))
    });
    let is_visible = move || state.with_untracked(|s| s.visible);

    // 最後のカーソル位置と現在のカード高さから配置
    let position_card = move || {
        let Some(card) = card_ref.get_untracked() else {
            return;
        };
        let Some(viewport) = viewport_size() else {
            return;
        };
        let size = Size {
            width: card_width,
            height: card.get_bounding_client_rect().height(),
        };
        let geometry = config.with_value(|c| c.geometry());
        set_position.set(place_card(pointer.get_value(), size, viewport, geometry));
    };

    let show_card = move |point: Point| {
        pointer.set_value(point);

        let effects = state
            .try_update(|s| s.show(cache::load_from_cache()))
            .unwrap_or_default();

        if effects.reposition {
            position_card();
        }
        // レイアウトを確定させてからフェードインする
        if let Some(card) = card_ref.get_untracked() {
            let _ = card.get_bounding_client_rect();
        }
        request_animation_frame(move || {
            state.update(|s| {
                s.reveal();
            });
        });

        if !effects.fetch {
            return;
        }
        spawn_local(async move {
            let config = config.get_value();
            let result = summary_api::fetch_summary(&config).await;
            if let Err(e) = &result {
                if !e.is_cancellation() {
                    log_warn(LOG_CATEGORY, &format!("プレビューを表示できません: {}", e));
                }
            }
            let effects = state
                .try_update(|s| s.apply_fetch_result(result))
                .unwrap_or_default();
            if effects.reposition {
                position_card();
            }
        });
    };

    let hide_card = move || {
        let effects = state.try_update(|s| s.hide()).unwrap_or_default();
        if effects.abort {
            summary_api::abort_in_flight();
        }
    };

    let activate = move || {
        match card_view.get_untracked().link {
            Some(url) => open_in_new_tab(&url),
            None => log_debug(LOG_CATEGORY, "リンク先がないため無視"),
        }
    };

    let heading_listeners = bind_headings(&selector, show_card, hide_card);

    let mousemove = window_event_listener(ev::mousemove, move |ev| {
        pointer.set_value(Point {
            x: ev.client_x() as f64,
            y: ev.client_y() as f64,
        });
        if is_visible() {
            position_card();
        }
    });
    let resize = window_event_listener(ev::resize, move |_| {
        if is_visible() {
            position_card();
        }
    });

    on_cleanup(move || {
        drop(heading_listeners);
        mousemove.remove();
        resize.remove();
    });

    let c = classes(mode);

    view! {
        <div
            node_ref=card_ref
            class=move || card_class(mode, phase.get())
            style=move || {
                let p = position.get();
                format!(
                    "left: {}px; top: {}px; width: {}px; transition-duration: {}ms;",
                    p.x, p.y, card_width, animation_ms
                )
            }
            role="link"
            tabindex="0"
            on:click=move |_| activate()
            on:keydown=move |ev: ev::KeyboardEvent| {
                if is_activation_key(&ev.key()) {
                    ev.prevent_default();
                    activate();
                }
            }
        >
            <img
                class=c.image
                alt=""
                hidden=move || card_view.with(|v| v.thumbnail.is_none())
                src=move || card_view.with(|v| v.thumbnail.clone().unwrap_or_default())
                on:load=move |_| {
                    // 画像読み込みで高さが変わるので再配置
                    if is_visible() {
                        position_card();
                    }
                }
            />
            <div class=c.body>
                <div class=c.title>{move || card_view.with(|v| v.title.clone())}</div>
                <div class=move || extract_class(mode, card_view.with(|v| v.muted))>
                    {move || card_view.with(|v| v.extract.clone())}
                </div>
            </div>
        </div>
    }
}

/// セレクタに一致する見出しへ pointerenter / pointerleave を登録
fn bind_headings(
    selector: &str,
    show: impl Fn(Point) + Copy + 'static,
    hide: impl Fn() + Copy + 'static,
) -> Vec<EventListener> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    let nodes = match document.query_selector_all(selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            log_warn(LOG_CATEGORY, &format!("セレクタが不正です: {} ({:?})", selector, e));
            return Vec::new();
        }
    };

    let mut listeners = Vec::with_capacity(nodes.length() as usize * 2);
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else {
            continue;
        };
        listeners.push(EventListener::new(&node, "pointerenter", move |event| {
            if let Some(ev) = event.dyn_ref::<web_sys::MouseEvent>() {
                show(Point {
                    x: ev.client_x() as f64,
                    y: ev.client_y() as f64,
                });
            }
        }));
        listeners.push(EventListener::new(&node, "pointerleave", move |_| hide()));
    }

    if listeners.is_empty() {
        log_warn(LOG_CATEGORY, &format!("見出しが見つかりません: {}", selector));
    } else {
        log_info_with_data(
            LOG_CATEGORY,
            "見出しにバインド",
            serde_json::json!({ "selector": selector, "count": nodes.length() }),
        );
    }
    listeners
}
