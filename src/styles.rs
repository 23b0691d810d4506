//! カードのスタイル定義
//!
//! Tailwindユーティリティクラス版と、`<style>`注入版の2通り。

use wasm_bindgen::JsValue;

use crate::config::StyleMode;
use crate::models::CardPhase;

const STYLE_ELEMENT_ID: &str = "hero-preview-styles";

/// 各要素のクラス名一式
pub struct CardClasses {
    pub card: &'static str,
    pub hidden: &'static str,
    pub visible: &'static str,
    pub image: &'static str,
    pub body: &'static str,
    pub title: &'static str,
    pub extract: &'static str,
    pub extract_muted: &'static str,
}

const UTILITY_CLASSES: CardClasses = CardClasses {
    card: "fixed left-0 top-0 z-[9999] overflow-hidden rounded-xl bg-white text-neutral-900 \
           shadow-[0_10px_30px_rgba(0,0,0,0.12)] transition ease-in-out",
    hidden: "opacity-0 translate-y-1.5 pointer-events-none",
    visible: "opacity-100 translate-y-0 pointer-events-auto",
    image: "block h-auto w-full",
    body: "p-[14px_16px_16px] font-[\"Times_New_Roman\"]",
    title: "mb-1.5 text-[1.1rem] font-bold",
    extract: "text-[0.95rem] leading-[1.35] line-clamp-3",
    extract_muted: "text-neutral-600",
};

const STYLESHEET_CLASSES: CardClasses = CardClasses {
    card: "hero-preview-card",
    hidden: "hero-preview-card--hidden",
    visible: "hero-preview-card--visible",
    image: "hero-preview-card__image",
    body: "hero-preview-card__body",
    title: "hero-preview-card__title",
    extract: "hero-preview-card__extract",
    extract_muted: "hero-preview-card__extract--muted",
};

/// 注入版のCSS（ユーティリティクラス版と同じ見た目）
pub const CARD_STYLESHEET: &str = r#"
.hero-preview-card {
  position: fixed;
  left: 0;
  top: 0;
  z-index: 9999;
  overflow: hidden;
  border-radius: 12px;
  background: #ffffff;
  color: #171717;
  box-shadow: 0 10px 30px rgba(0, 0, 0, 0.12);
  transition-property: opacity, transform;
  transition-timing-function: ease-in-out;
}

.hero-preview-card--hidden {
  opacity: 0;
  transform: translateY(6px);
  pointer-events: none;
}

.hero-preview-card--visible {
  opacity: 1;
  transform: translateY(0);
  pointer-events: auto;
}

.hero-preview-card__image {
  display: block;
  width: 100%;
  height: auto;
}

.hero-preview-card__body {
  padding: 14px 16px 16px;
  font-family: "Times New Roman", serif;
}

.hero-preview-card__title {
  margin-bottom: 6px;
  font-size: 1.1rem;
  font-weight: 700;
}

.hero-preview-card__extract {
  font-size: 0.95rem;
  line-height: 1.35;
  display: -webkit-box;
  -webkit-line-clamp: 3;
  -webkit-box-orient: vertical;
  overflow: hidden;
}

.hero-preview-card__extract--muted {
  color: #525252;
}
"#;

pub fn classes(mode: StyleMode) -> &'static CardClasses {
    match mode {
        StyleMode::Utility => &UTILITY_CLASSES,
        StyleMode::Stylesheet => &STYLESHEET_CLASSES,
    }
}

pub fn card_class(mode: StyleMode, phase: CardPhase) -> String {
    let c = classes(mode);
    let state = match phase {
        CardPhase::Hidden => c.hidden,
        CardPhase::Shown => c.visible,
    };
    format!("{} {}", c.card, state)
}

pub fn extract_class(mode: StyleMode, muted: bool) -> String {
    let c = classes(mode);
    if muted {
        format!("{} {}", c.extract, c.extract_muted)
    } else {
        c.extract.to_string()
    }
}

/// 注入版のときだけ`<head>`に`<style>`を1度だけ追加
pub fn inject_stylesheet(mode: StyleMode) -> Result<(), JsValue> {
    if mode != StyleMode::Stylesheet {
        return Ok(());
    }
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("documentがありません"))?;
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(CARD_STYLESHEET));
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("headがありません"))?;
    head.append_child(&style)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_classes_are_exclusive() {
        let hidden = card_class(StyleMode::Utility, CardPhase::Hidden);
        assert!(hidden.contains("opacity-0"));
        assert!(hidden.contains("pointer-events-none"));
        assert!(!hidden.contains("opacity-100"));

        let shown = card_class(StyleMode::Utility, CardPhase::Shown);
        assert!(shown.contains("opacity-100"));
        assert!(shown.contains("pointer-events-auto"));
        assert!(!shown.contains("pointer-events-none"));
    }

    #[test]
    fn test_stylesheet_classes_are_defined() {
        let c = classes(StyleMode::Stylesheet);
        for class in [c.card, c.hidden, c.visible, c.image, c.body, c.title, c.extract, c.extract_muted] {
            assert!(
                CARD_STYLESHEET.contains(&format!(".{} {{", class)),
                "missing rule for {}",
                class
            );
        }
    }

    #[test]
    fn test_extract_muted() {
        assert_eq!(
            extract_class(StyleMode::Utility, true),
            "text-[0.95rem] leading-[1.35] line-clamp-3 text-neutral-600"
        );
        assert_eq!(
            extract_class(StyleMode::Stylesheet, false),
            "hero-preview-card__extract"
        );
    }
}
