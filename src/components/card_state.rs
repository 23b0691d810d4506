//! カード表示状態の遷移
//!
//! イベントごとの状態変化と、それに伴う副作用（再配置・取得・中断）を決める。
//! DOMやネットワークには触れない。

use crate::error::FetchError;
use crate::models::{CardContent, CardPhase, Summary};

/// 遷移後に実行する副作用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Effects {
    pub reposition: bool,
    pub fetch: bool,
    pub abort: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    pub visible: bool,
    pub phase: CardPhase,
    pub content: CardContent,
}

impl Default for CardState {
    fn default() -> Self {
        CardState {
            visible: false,
            phase: CardPhase::Hidden,
            content: CardContent::Loading,
        }
    }
}

impl CardState {
    /// ポインタが見出しに入った
    ///
    /// 非表示からの遷移のときだけ Hidden に戻してフェードインをやり直す
    pub fn show(&mut self, cached: Option<Summary>) -> Effects {
        if !self.visible {
            self.visible = true;
            self.phase = CardPhase::Hidden;
        }
        match cached {
            Some(summary) => {
                self.content = CardContent::Ready(summary);
                Effects {
                    reposition: true,
                    ..Effects::default()
                }
            }
            None => {
                self.content = CardContent::Loading;
                Effects {
                    reposition: true,
                    fetch: true,
                    ..Effects::default()
                }
            }
        }
    }

    /// 次のアニメーションフレーム。まだ表示中なら Shown にする
    pub fn reveal(&mut self) -> bool {
        if self.visible {
            self.phase = CardPhase::Shown;
        }
        self.visible
    }

    /// ポインタが見出しから出た
    pub fn hide(&mut self) -> Effects {
        self.visible = false;
        self.phase = CardPhase::Hidden;
        Effects {
            abort: true,
            ..Effects::default()
        }
    }

    /// 取得結果を反映する
    ///
    /// 中断は何も変えない。成功時の再配置は表示中のときだけ。
    pub fn apply_fetch_result(&mut self, result: Result<Summary, FetchError>) -> Effects {
        match result {
            Ok(summary) => {
                self.content = CardContent::Ready(summary);
                Effects {
                    reposition: self.visible,
                    ..Effects::default()
                }
            }
            Err(e) if e.is_cancellation() => Effects::default(),
            Err(_) => {
                self.content = CardContent::Unavailable;
                Effects::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> Summary {
        Summary {
            title: Some("Raspberry".to_string()),
            url: Some("https://en.wikipedia.org/wiki/Raspberry".to_string()),
            ..Summary::default()
        }
    }

    fn shown() -> CardState {
        let mut state = CardState::default();
        state.show(None);
        state.reveal();
        state
    }

    #[test]
    fn test_show_without_cache_fetches() {
        let mut state = CardState::default();
        let effects = state.show(None);
        assert!(state.visible);
        assert_eq!(state.phase, CardPhase::Hidden);
        assert_eq!(state.content, CardContent::Loading);
        assert_eq!(
            effects,
            Effects {
                reposition: true,
                fetch: true,
                abort: false
            }
        );
    }

    #[test]
    fn test_show_with_cache_skips_fetch() {
        let mut state = CardState::default();
        let effects = state.show(Some(summary()));
        assert_eq!(state.content, CardContent::Ready(summary()));
        assert!(effects.reposition);
        assert!(!effects.fetch);
    }

    #[test]
    fn test_show_while_visible_keeps_phase() {
        let mut state = shown();
        assert_eq!(state.phase, CardPhase::Shown);
        state.show(Some(summary()));
        assert_eq!(state.phase, CardPhase::Shown);
    }

    #[test]
    fn test_reveal_only_when_visible() {
        let mut state = CardState::default();
        state.show(None);
        state.hide();
        // フレーム到着前に離れた
        assert!(!state.reveal());
        assert_eq!(state.phase, CardPhase::Hidden);

        state.show(None);
        assert!(state.reveal());
        assert_eq!(state.phase, CardPhase::Shown);
    }

    #[test]
    fn test_hide_always_aborts() {
        let mut state = shown();
        let effects = state.hide();
        assert!(!state.visible);
        assert_eq!(state.phase, CardPhase::Hidden);
        assert!(effects.abort);

        // 非表示のままでも中断は要求する
        assert!(CardState::default().hide().abort);
    }

    #[test]
    fn test_aborted_result_leaves_content() {
        let mut state = shown();
        let effects = state.apply_fetch_result(Err(FetchError::Aborted));
        assert_eq!(state.content, CardContent::Loading);
        assert_eq!(effects, Effects::default());
    }

    #[test]
    fn test_error_result_shows_unavailable() {
        let mut state = shown();
        let effects = state.apply_fetch_result(Err(FetchError::Status(500)));
        assert_eq!(state.content, CardContent::Unavailable);
        assert!(!effects.reposition);

        let mut state = shown();
        state.apply_fetch_result(Err(FetchError::Network("offline".to_string())));
        assert_eq!(state.content, CardContent::Unavailable);
    }

    #[test]
    fn test_late_success_repositions_only_when_visible() {
        let mut state = shown();
        let effects = state.apply_fetch_result(Ok(summary()));
        assert_eq!(state.content, CardContent::Ready(summary()));
        assert!(effects.reposition);

        let mut state = shown();
        state.hide();
        let effects = state.apply_fetch_result(Ok(summary()));
        assert_eq!(state.content, CardContent::Ready(summary()));
        assert!(!effects.reposition);
    }
}
