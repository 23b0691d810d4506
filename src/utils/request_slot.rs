//! 実行中リクエストの管理
//!
//! 同時に1本だけ保持する。保持中の呼び出しは同じPromiseに合流し、
//! 決着したら空に戻す。中断ハンドルはリクエストと同じ寿命。

use crate::models::Summary;

/// 共有Promise `P` と中断ハンドル `H` の組を1つだけ持つスロット
#[derive(Debug)]
pub struct RequestSlot<P, H> {
    current: Option<(P, H)>,
}

/// 要約取得の解決方法
#[derive(Debug, PartialEq)]
pub enum Resolved<P> {
    /// キャッシュ済み（ネットワークに出ない）
    Cached(Summary),
    /// 実行中のリクエストを待つ。`started` は今回新規に開始したか
    Pending { promise: P, started: bool },
}

impl<P: Clone, H> RequestSlot<P, H> {
    pub const fn new() -> Self {
        RequestSlot { current: None }
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// 実行中なら合流し、なければ `start` で開始して保持する
    ///
    /// `start` が失敗した場合はスロットは空のまま
    pub fn join_or_start<E>(
        &mut self,
        start: impl FnOnce() -> Result<(P, H), E>,
    ) -> Result<(P, bool), E> {
        if let Some((promise, _)) = &self.current {
            return Ok((promise.clone(), false));
        }
        let (promise, handle) = start()?;
        self.current = Some((promise.clone(), handle));
        Ok((promise, true))
    }

    /// キャッシュ → 実行中 → 新規 の順に解決する
    pub fn resolve<E>(
        &mut self,
        cached: Option<Summary>,
        start: impl FnOnce() -> Result<(P, H), E>,
    ) -> Result<Resolved<P>, E> {
        if let Some(summary) = cached {
            return Ok(Resolved::Cached(summary));
        }
        let (promise, started) = self.join_or_start(start)?;
        Ok(Resolved::Pending { promise, started })
    }

    /// 成否にかかわらず決着したら呼ぶ
    pub fn settle(&mut self) {
        self.current = None;
    }

    /// 中断ハンドルがあれば `abort` に渡す。渡したかどうかを返す
    pub fn abort_with(&self, abort: impl FnOnce(&H)) -> bool {
        match &self.current {
            Some((_, handle)) => {
                abort(handle);
                true
            }
            None => false,
        }
    }
}

impl<P: Clone, H> Default for RequestSlot<P, H> {
    fn default() -> Self {
        Self::new()
    }
}
